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

mod action_bar;
pub mod event;
mod game_mode;
mod teleport;
mod unique_id;
mod world;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
pub use glam::DVec3;
pub use uuid::Uuid;

pub use crate::action_bar::ActionBar;
pub use crate::event::{PlayerJoinEvent, PlayerQuitEvent, PlayerRespawnEvent};
pub use crate::game_mode::{GameMode, ParseGameModeError};
pub use crate::teleport::{TeleportCause, TeleportRequest, TeleportSet};
pub use crate::unique_id::UniqueId;
pub use crate::world::{Location, Look, Position, WorldId, Worlds};

/// Registers the host-side resources, events and systems.
pub struct HostPlugin;

impl Plugin for HostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Worlds>()
            .add_event::<PlayerRespawnEvent>()
            .add_event::<PlayerJoinEvent>()
            .add_event::<PlayerQuitEvent>()
            .configure_sets(PostUpdate, TeleportSet)
            .add_systems(PostUpdate, teleport::apply_teleports.in_set(TeleportSet));
    }
}

/// The components every player entity carries.
#[derive(Bundle, Default, Debug)]
pub struct PlayerBundle {
    pub id: UniqueId,
    pub game_mode: GameMode,
    pub world: WorldId,
    pub position: Position,
    pub look: Look,
    pub action_bar: ActionBar,
}

impl PlayerBundle {
    /// A player with a fresh random id standing at `location`.
    pub fn at(location: Location) -> Self {
        Self {
            world: WorldId(location.world),
            position: Position(location.position),
            look: location.look,
            ..Default::default()
        }
    }
}
