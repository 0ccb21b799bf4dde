use bevy_ecs::prelude::*;
use delayed_respawn_host::{GameMode, Location};
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::clock::Millis;
use crate::respawn::Respawn;

/// Every online player currently waiting to respawn, keyed by their
/// [`UniqueId`](delayed_respawn_host::UniqueId).
///
/// A player has at most one entry. Entries of players who go offline are
/// moved to the [`RespawnStore`](crate::store::RespawnStore).
#[derive(Resource, Default, Debug)]
pub struct RespawnRegistry {
    entries: FxHashMap<Uuid, Tracked>,
}

#[derive(Copy, Clone, Debug)]
struct Tracked {
    /// The player's client entity in the current session.
    client: Entity,
    respawn: Respawn,
}

/// The state of one entry as seen by [`RespawnRegistry::tick`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum RespawnStatus {
    /// Still waiting. `remaining` is always positive.
    Pending { remaining: Millis },
    /// The delay is over and the entry has been removed.
    Released(Respawn),
}

impl RespawnRegistry {
    /// Starts a delay of `delay` milliseconds for `player`, replacing any
    /// delay they already had.
    pub fn begin(
        &mut self,
        player: Uuid,
        client: Entity,
        location: Location,
        game_mode: GameMode,
        delay: Millis,
        now: Millis,
    ) -> Respawn {
        let respawn = Respawn::delayed(location, game_mode, now, delay);
        self.insert(player, client, respawn);
        respawn
    }

    /// Tracks an existing respawn, such as one restored from disk. Returns the
    /// respawn it replaced.
    pub fn insert(&mut self, player: Uuid, client: Entity, respawn: Respawn) -> Option<Respawn> {
        self.entries
            .insert(player, Tracked { client, respawn })
            .map(|old| old.respawn)
    }

    /// Stops tracking `player` without releasing them.
    pub fn evict(&mut self, player: Uuid) -> Option<Respawn> {
        self.entries.remove(&player).map(|tracked| tracked.respawn)
    }

    pub fn is_tracked(&self, player: Uuid) -> bool {
        self.entries.contains_key(&player)
    }

    pub fn get(&self, player: Uuid) -> Option<&Respawn> {
        self.entries.get(&player).map(|tracked| &tracked.respawn)
    }

    /// The client entity `player` was last tracked with.
    pub fn client(&self, player: Uuid) -> Option<Entity> {
        self.entries.get(&player).map(|tracked| tracked.client)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes and yields every entry.
    pub fn drain(&mut self) -> impl Iterator<Item = (Uuid, Respawn)> + '_ {
        self.entries
            .drain()
            .map(|(player, tracked)| (player, tracked.respawn))
    }

    /// Visits every entry exactly once. Entries whose delay is over at `now`
    /// are removed before `f` sees them as [`RespawnStatus::Released`].
    pub fn tick(&mut self, now: Millis, mut f: impl FnMut(Uuid, Entity, RespawnStatus)) {
        self.entries.retain(|&player, tracked| {
            let remaining = tracked.respawn.remaining(now);

            if remaining > 0 {
                f(player, tracked.client, RespawnStatus::Pending { remaining });
                true
            } else {
                f(player, tracked.client, RespawnStatus::Released(tracked.respawn));
                false
            }
        });
    }
}
