//! Kills a single player shortly after startup and logs their countdown until
//! they are released, then exits.
//!
//! Configuration is read from (and created in) `./delayed_respawn`.

use std::time::Duration;

use bevy_app::ScheduleRunnerPlugin;
use bevy_log::LogPlugin;
use delayed_respawn::prelude::*;
use tracing::info;

#[derive(Resource)]
struct Demo {
    player: Entity,
    ticks: u32,
    died: bool,
}

fn main() -> anyhow::Result<()> {
    let settings = RespawnSettings::load("delayed_respawn")?;

    App::new()
        .add_plugins((
            LogPlugin::default(),
            ScheduleRunnerPlugin::run_loop(Duration::from_millis(50)),
        ))
        .insert_resource(settings)
        .add_plugins((HostPlugin, DelayedRespawnPlugin))
        .add_systems(PreStartup, setup)
        .add_systems(Update, (kill_player, log_action_bar).chain().after(RespawnSet))
        .run();

    Ok(())
}

fn setup(mut commands: Commands, mut worlds: ResMut<Worlds>, settings: Res<RespawnSettings>) {
    info!("Respawn delay is {}ms", settings.respawn_delay);

    let world = commands.spawn_empty().id();
    worlds.insert("world", world);

    let player = commands
        .spawn(PlayerBundle::at(Location::new(
            world,
            [0.5, 64.0, 0.5],
            Look::default(),
        )))
        .id();

    commands.insert_resource(Demo {
        player,
        ticks: 0,
        died: false,
    });
}

fn kill_player(
    mut demo: ResMut<Demo>,
    players: Query<&WorldId>,
    mut respawns: EventWriter<PlayerRespawnEvent>,
) {
    demo.ticks += 1;

    if demo.died || demo.ticks < 20 {
        return;
    }

    if let Ok(world) = players.get(demo.player) {
        info!("Player died");
        respawns.send(PlayerRespawnEvent {
            client: demo.player,
            respawn_location: Location::new(world.0, [0.5, 70.0, 0.5], Look::default()),
        });
        demo.died = true;
    }
}

fn log_action_bar(
    demo: Res<Demo>,
    players: Query<(Ref<ActionBar>, &GameMode)>,
    mut exit: EventWriter<AppExit>,
) {
    let Ok((action_bar, game_mode)) = players.get(demo.player) else {
        return;
    };

    if !demo.died || !action_bar.is_changed() {
        return;
    }

    if action_bar.is_clear() {
        info!("Released in {game_mode}");
        exit.send(AppExit::Success);
    } else {
        info!("{}", action_bar.text());
    }
}
