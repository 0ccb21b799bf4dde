#![doc = include_str!("../README.md")]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls,
    rustdoc::invalid_html_tags
)]
#![warn(
    trivial_casts,
    trivial_numeric_casts,
    unused_lifetimes,
    unused_import_braces,
    unreachable_pub,
    clippy::dbg_macro
)]

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use delayed_respawn_host::{HostPlugin, TeleportSet};

pub mod clock;
pub mod config;
pub mod countdown;
mod lifecycle;
pub mod record;
pub mod registry;
pub mod respawn;
pub mod store;

#[cfg(feature = "testing")]
pub mod testing;


pub use delayed_respawn_host as host;

use crate::clock::RespawnClock;
use crate::config::RespawnSettings;
use crate::registry::RespawnRegistry;
use crate::store::RespawnStore;

/// Contains the most frequently used items.
///
/// This is usually glob imported like so:
///
/// ```
/// use delayed_respawn::prelude::*; // Glob import.
///
/// let mut app = App::new();
/// app.add_plugins(DelayedRespawnPlugin);
/// ```
pub mod prelude {
    pub use bevy_app::prelude::*;
    pub use bevy_ecs; // Needed for bevy_ecs macros to function correctly.
    pub use bevy_ecs::prelude::*;
    pub use delayed_respawn_host::{
        ActionBar, GameMode, HostPlugin, Location, Look, PlayerBundle, PlayerJoinEvent,
        PlayerQuitEvent, PlayerRespawnEvent, Position, TeleportCause, TeleportRequest,
        TeleportSet, UniqueId, WorldId, Worlds,
    };
    pub use uuid::Uuid;

    pub use super::clock::RespawnClock;
    pub use super::config::RespawnSettings;
    pub use super::registry::RespawnRegistry;
    pub use super::respawn::Respawn;
    pub use super::store::RespawnStore;
    pub use super::{DelayedRespawnPlugin, RespawnSet};
}

/// Holds players who die in survival or adventure mode as spectators for
/// [`RespawnSettings::respawn_delay`] milliseconds before putting them back
/// where they respawned.
///
/// Uses the [`RespawnSettings`] resource if one was inserted before the
/// plugin, and the defaults otherwise. Adds [`HostPlugin`] if it has not
/// been added yet.
pub struct DelayedRespawnPlugin;

/// The system set the death, join, quit and countdown systems run in. Runs
/// in `Update`.
#[derive(SystemSet, Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct RespawnSet;

impl Plugin for DelayedRespawnPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<HostPlugin>() {
            app.add_plugins(HostPlugin);
        }

        app.init_resource::<RespawnSettings>();
        let respawns_dir = app.world().resource::<RespawnSettings>().respawns_dir();

        app.insert_resource(RespawnStore::new(respawns_dir))
            .init_resource::<RespawnRegistry>()
            .init_resource::<RespawnClock>()
            .configure_sets(Update, RespawnSet)
            .add_systems(Startup, lifecycle::restore_online_players)
            .add_systems(
                Update,
                (
                    lifecycle::persist_on_quit,
                    lifecycle::restore_on_join,
                    lifecycle::begin_on_respawn,
                    countdown::tick_respawns,
                )
                    .chain()
                    .in_set(RespawnSet),
            )
            .add_systems(
                PostUpdate,
                lifecycle::cancel_spectate_teleports.before(TeleportSet),
            )
            .add_systems(Last, lifecycle::flush_on_exit);
    }
}
