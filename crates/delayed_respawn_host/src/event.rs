//! Player lifecycle notifications sent by the host.

use bevy_ecs::prelude::*;

use crate::unique_id::UniqueId;
use crate::world::Location;

/// Sent when a dead player respawns. The client's [`GameMode`] still holds
/// the mode they died in.
///
/// [`GameMode`]: crate::GameMode
#[derive(Event, Copy, Clone, PartialEq, Debug)]
pub struct PlayerRespawnEvent {
    pub client: Entity,
    /// Where the host placed (or is about to place) the player.
    pub respawn_location: Location,
}

/// Sent once a newly connected client entity has all of its components.
#[derive(Event, Copy, Clone, PartialEq, Eq, Debug)]
pub struct PlayerJoinEvent {
    pub client: Entity,
}

/// Sent when a client disconnects. The client entity may already be
/// despawned by the time this is read, so the player's id is carried along.
#[derive(Event, Copy, Clone, PartialEq, Eq, Debug)]
pub struct PlayerQuitEvent {
    pub client: Entity,
    pub id: UniqueId,
}
