use std::time::Instant;

use bevy_ecs::prelude::*;

/// Milliseconds on a monotonic clock. Only differences between two readings
/// of the same clock are meaningful.
pub type Millis = i64;

/// The clock respawn deadlines are measured against.
///
/// By default this follows the system's monotonic clock, starting at zero
/// when the resource is created. A manual clock only moves when told to and
/// is meant for tests and replays.
#[derive(Resource, Clone, Debug)]
pub struct RespawnClock {
    source: ClockSource,
}

#[derive(Clone, Debug)]
enum ClockSource {
    Monotonic(Instant),
    Manual(Millis),
}

impl RespawnClock {
    pub fn monotonic() -> Self {
        Self {
            source: ClockSource::Monotonic(Instant::now()),
        }
    }

    pub fn manual(start: Millis) -> Self {
        Self {
            source: ClockSource::Manual(start),
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self.source, ClockSource::Manual(_))
    }

    pub fn now_millis(&self) -> Millis {
        match self.source {
            ClockSource::Monotonic(origin) => {
                Millis::try_from(origin.elapsed().as_millis()).unwrap_or(Millis::MAX)
            }
            ClockSource::Manual(now) => now,
        }
    }

    /// Moves a manual clock forward by `millis`. Has no effect on a monotonic
    /// clock.
    pub fn advance(&mut self, millis: Millis) {
        if let ClockSource::Manual(now) = &mut self.source {
            *now = now.saturating_add(millis);
        }
    }

    /// Sets a manual clock to `millis`. Has no effect on a monotonic clock.
    pub fn set(&mut self, millis: Millis) {
        if let ClockSource::Manual(now) = &mut self.source {
            *now = millis;
        }
    }
}

impl Default for RespawnClock {
    fn default() -> Self {
        Self::monotonic()
    }
}
