use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::*;
use thiserror::Error;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Component)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Survival,
        GameMode::Creative,
        GameMode::Adventure,
        GameMode::Spectator,
    ];

    /// The lower-case name of this game mode, e.g. `"survival"`.
    pub const fn name(self) -> &'static str {
        match self {
            GameMode::Survival => "survival",
            GameMode::Creative => "creative",
            GameMode::Adventure => "adventure",
            GameMode::Spectator => "spectator",
        }
    }

    /// Whether a player in this mode can die and go through the normal
    /// respawn flow. Creative and spectator players are invulnerable.
    pub const fn is_vulnerable(self) -> bool {
        matches!(self, GameMode::Survival | GameMode::Adventure)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
#[error("unknown game mode \"{0}\"")]
pub struct ParseGameModeError(pub String);

/// Parses a game mode name, ignoring ASCII case.
impl FromStr for GameMode {
    type Err = ParseGameModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseGameModeError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!("survival".parse(), Ok(GameMode::Survival));
        assert_eq!("CREATIVE".parse(), Ok(GameMode::Creative));
        assert_eq!("Adventure".parse(), Ok(GameMode::Adventure));
        assert_eq!("sPeCtAtOr".parse(), Ok(GameMode::Spectator));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(
            "hardcore".parse::<GameMode>(),
            Err(ParseGameModeError("hardcore".to_owned()))
        );
        assert!("".parse::<GameMode>().is_err());
    }

    #[test]
    fn display_is_lower_case() {
        for mode in GameMode::ALL {
            let name = mode.to_string();
            assert_eq!(name, name.to_lowercase());
            assert_eq!(name.parse(), Ok(mode));
        }
    }

    #[test]
    fn only_survival_and_adventure_are_vulnerable() {
        assert!(GameMode::Survival.is_vulnerable());
        assert!(GameMode::Adventure.is_vulnerable());
        assert!(!GameMode::Creative.is_vulnerable());
        assert!(!GameMode::Spectator.is_vulnerable());
    }
}
