use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use delayed_respawn_host::{
    ActionBar, GameMode, HostPlugin, Location, Look, PlayerBundle, PlayerJoinEvent,
    PlayerQuitEvent, PlayerRespawnEvent, Position, TeleportCause, TeleportRequest, UniqueId,
    WorldId, Worlds,
};
use tempfile::TempDir;
use uuid::Uuid;

use crate::clock::{Millis, RespawnClock};
use crate::config::RespawnSettings;
use crate::registry::RespawnRegistry;
use crate::store::RespawnStore;
use crate::DelayedRespawnPlugin;

/// Name of the world [`ScenarioSingleClient`] puts its client in.
pub const WORLD_NAME: &str = "world";

pub struct ScenarioSingleClient {
    /// The new bevy application.
    pub app: App,
    /// Entity handle for the single client. Replaced by
    /// [`rejoin`](Self::rejoin).
    pub client: Entity,
    /// The client's stable id.
    pub id: Uuid,
    /// The world entity registered as [`WORLD_NAME`].
    pub world: Entity,
    /// Data folder the plugin reads its configuration from and stores
    /// respawns in. Deleted on drop.
    pub data_dir: TempDir,
}

impl ScenarioSingleClient {
    /// Sets up the plugin with a manual clock at zero, the given respawn
    /// delay, one world, and a single survival-mode client standing in it.
    ///
    /// Reduces boilerplate in unit tests.
    pub fn new(respawn_delay: u32) -> Self {
        let data_dir = tempfile::tempdir().expect("failed to create temporary data folder");

        let mut app = App::new();

        app.insert_resource(RespawnSettings {
            data_dir: data_dir.path().to_owned(),
            respawn_delay,
        })
        .insert_resource(RespawnClock::manual(0))
        .add_plugins((HostPlugin, DelayedRespawnPlugin));

        let world = app.world_mut().spawn_empty().id();
        app.world_mut()
            .resource_mut::<Worlds>()
            .insert(WORLD_NAME, world);

        let bundle = PlayerBundle::at(Location::new(world, [0.5, 64.0, 0.5], Look::default()));
        let id = bundle.id.0;
        let client = app.world_mut().spawn(bundle).id();

        app.update(); // Initialize plugins.

        Self {
            app,
            client,
            id,
            world,
            data_dir,
        }
    }

    /// Moves the clock forward and runs one tick.
    pub fn advance(&mut self, millis: Millis) {
        self.app
            .world_mut()
            .resource_mut::<RespawnClock>()
            .advance(millis);
        self.app.update();
    }

    /// Sets the clock and runs one tick.
    pub fn tick_at(&mut self, millis: Millis) {
        self.app
            .world_mut()
            .resource_mut::<RespawnClock>()
            .set(millis);
        self.app.update();
    }

    /// Kills the client and has them respawn at `location`, then runs one
    /// tick.
    pub fn die_and_respawn(&mut self, location: Location) {
        self.app.world_mut().send_event(PlayerRespawnEvent {
            client: self.client,
            respawn_location: location,
        });
        self.app.update();
    }

    /// Disconnects the client and runs one tick.
    pub fn quit(&mut self) {
        self.app.world_mut().send_event(PlayerQuitEvent {
            client: self.client,
            id: UniqueId(self.id),
        });
        self.app.update();
        self.app.world_mut().despawn(self.client);
    }

    /// Connects the same player again as a new client entity, then runs one
    /// tick.
    pub fn rejoin(&mut self) {
        let bundle = PlayerBundle {
            id: UniqueId(self.id),
            ..PlayerBundle::at(Location::new(self.world, [0.5, 64.0, 0.5], Look::default()))
        };
        self.client = self.app.world_mut().spawn(bundle).id();
        self.app.world_mut().send_event(PlayerJoinEvent {
            client: self.client,
        });
        self.app.update();
    }

    /// Has the host try to move the client's camera as if they clicked
    /// something while spectating. Returns whether the teleport went through.
    pub fn request_teleport(&mut self, target: Location, cause: TeleportCause) -> bool {
        let before = self.location();

        self.app
            .world_mut()
            .entity_mut(self.client)
            .insert(TeleportRequest::new(target, cause));
        self.app.update();

        self.location() != before
    }

    /// Runs one tick during which the app is asked to exit.
    pub fn exit(&mut self) {
        self.app.world_mut().send_event(AppExit::Success);
        self.app.update();
    }

    pub fn game_mode(&self) -> GameMode {
        *self.app.world().get::<GameMode>(self.client).unwrap()
    }

    pub fn set_game_mode(&mut self, mode: GameMode) {
        *self
            .app
            .world_mut()
            .get_mut::<GameMode>(self.client)
            .unwrap() = mode;
    }

    pub fn action_bar(&self) -> String {
        self.app
            .world()
            .get::<ActionBar>(self.client)
            .unwrap()
            .text()
            .to_owned()
    }

    /// Where the client currently is.
    pub fn location(&self) -> Location {
        let entity = self.app.world().entity(self.client);

        Location::new(
            entity.get::<WorldId>().unwrap().0,
            entity.get::<Position>().unwrap().get(),
            *entity.get::<Look>().unwrap(),
        )
    }

    pub fn registry(&self) -> &RespawnRegistry {
        self.app.world().resource::<RespawnRegistry>()
    }

    pub fn store(&self) -> &RespawnStore {
        self.app.world().resource::<RespawnStore>()
    }

    pub fn is_tracked(&self) -> bool {
        self.registry().is_tracked(self.id)
    }

    pub fn is_stored(&self) -> bool {
        self.store().contains(self.id)
    }

    /// Milliseconds left in the client's delay, if they have one.
    pub fn remaining(&self) -> Option<Millis> {
        let now = self.app.world().resource::<RespawnClock>().now_millis();
        self.registry()
            .get(self.id)
            .map(|respawn| respawn.remaining(now))
    }

    /// A location in the scenario's world.
    pub fn location_at(&self, pos: [f64; 3], look: Look) -> Location {
        Location::new(self.world, pos, look)
    }
}
