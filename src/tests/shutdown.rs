use bevy_app::prelude::*;
use delayed_respawn_host::{GameMode, HostPlugin, Location, Look, PlayerBundle, UniqueId, Worlds};

use crate::clock::RespawnClock;
use crate::config::RespawnSettings;
use crate::registry::RespawnRegistry;
use crate::store::RespawnStore;
use crate::testing::{ScenarioSingleClient, WORLD_NAME};
use crate::DelayedRespawnPlugin;

#[test]
fn pending_respawns_are_flushed_on_exit() {
    let mut scenario = ScenarioSingleClient::new(3000);
    scenario.die_and_respawn(scenario.location_at([0.0, 64.0, 0.0], Look::default()));
    scenario.tick_at(1000);

    scenario.exit();

    assert!(scenario.registry().is_empty());
    assert!(scenario.is_stored());

    let record = scenario.store().take(scenario.id).unwrap().unwrap();
    assert_eq!(record.respawn_time, 2000);
}

#[test]
fn exit_without_pending_respawns_writes_nothing() {
    let mut scenario = ScenarioSingleClient::new(3000);
    scenario.exit();

    assert!(!scenario.store().root().exists());
}

#[test]
fn players_online_at_startup_are_restored() {
    let mut scenario = ScenarioSingleClient::new(3000);
    let respawn_point = scenario.location_at([12.0, 64.0, -12.0], Look::new(90.0, 0.0));
    scenario.die_and_respawn(respawn_point);
    scenario.tick_at(1000);
    scenario.exit();

    // Start over with the same data folder and the player already connected.
    let mut app = App::new();
    app.insert_resource(RespawnSettings {
        data_dir: scenario.data_dir.path().to_owned(),
        respawn_delay: 3000,
    })
    .insert_resource(RespawnClock::manual(0))
    .add_plugins((HostPlugin, DelayedRespawnPlugin));

    let world = app.world_mut().spawn_empty().id();
    app.world_mut()
        .resource_mut::<Worlds>()
        .insert(WORLD_NAME, world);

    let client = app
        .world_mut()
        .spawn(PlayerBundle {
            id: UniqueId(scenario.id),
            game_mode: GameMode::Spectator,
            ..PlayerBundle::at(Location::new(world, [0.0, 64.0, 0.0], Look::default()))
        })
        .id();

    app.update();

    let registry = app.world().resource::<RespawnRegistry>();
    let respawn = registry.get(scenario.id).unwrap();
    assert_eq!(respawn.remaining(0), 2000);
    assert_eq!(respawn.game_mode(), GameMode::Survival);
    assert_eq!(registry.client(scenario.id), Some(client));
    assert!(!app.world().resource::<RespawnStore>().contains(scenario.id));

    app.world_mut()
        .resource_mut::<RespawnClock>()
        .set(2000);
    app.update();

    assert_eq!(app.world().get::<GameMode>(client), Some(&GameMode::Survival));
    assert!(app.world().resource::<RespawnRegistry>().is_empty());
}
