use bevy_ecs::prelude::*;
use derive_more::Deref;
use uuid::Uuid;

/// The universally unique identifier of a player. Component wrapper for a
/// [`Uuid`].
///
/// Unlike the client [`Entity`], this stays the same across reconnects, so it
/// is what anything outliving a session should be keyed by. The [`Default`]
/// impl generates a new random UUID.
#[derive(Component, Copy, Clone, PartialEq, Eq, Debug, PartialOrd, Ord, Hash, Deref)]
pub struct UniqueId(pub Uuid);

/// Generates a new random UUID.
impl Default for UniqueId {
    fn default() -> Self {
        Self(Uuid::from_bytes(rand::random()))
    }
}
