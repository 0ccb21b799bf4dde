use delayed_respawn_host::{GameMode, Location};

use crate::clock::Millis;

/// A pending delayed respawn.
///
/// Fields are fixed at construction. A respawn is released once its
/// [`remaining`](Self::remaining) time is no longer positive.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Respawn {
    location: Location,
    game_mode: GameMode,
    respawn_time: Millis,
}

impl Respawn {
    pub fn new(location: Location, game_mode: GameMode, respawn_time: Millis) -> Self {
        Self {
            location,
            game_mode,
            respawn_time,
        }
    }

    /// A respawn that ends `delay` milliseconds after `now`.
    pub fn delayed(location: Location, game_mode: GameMode, now: Millis, delay: Millis) -> Self {
        Self::new(location, game_mode, now.saturating_add(delay))
    }

    /// Where the player is teleported to when released.
    pub fn location(&self) -> Location {
        self.location
    }

    /// The mode the player was in before dying, restored on release.
    pub fn game_mode(&self) -> GameMode {
        self.game_mode
    }

    /// The absolute time the delay ends at.
    pub fn respawn_time(&self) -> Millis {
        self.respawn_time
    }

    pub fn remaining(&self, now: Millis) -> Millis {
        self.respawn_time.saturating_sub(now)
    }

    pub fn is_due(&self, now: Millis) -> bool {
        self.remaining(now) <= 0
    }
}
