//! The on-disk form of a [`Respawn`].
//!
//! A record stores the time that was *remaining* when it was written rather
//! than the absolute deadline, since the monotonic clock a deadline is
//! measured against does not survive a restart.

use bevy_ecs::entity::Entity;
use delayed_respawn_host::{DVec3, GameMode, Location, Look, ParseGameModeError, Worlds};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::Millis;
use crate::respawn::Respawn;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RespawnRecord {
    /// Milliseconds left in the delay at the moment the record was written.
    pub respawn_time: Millis,
    /// Lower-case game mode name. Read case-insensitively.
    pub game_mode: String,
    pub location: LocationRecord,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LocationRecord {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordError {
    #[error("world \"{0}\" is not loaded")]
    WorldNotFound(String),
    #[error("world {0:?} is not registered under a name")]
    UnnamedWorld(Entity),
    #[error(transparent)]
    InvalidGameMode(#[from] ParseGameModeError),
}

impl RespawnRecord {
    pub fn encode(respawn: &Respawn, worlds: &Worlds, now: Millis) -> Result<Self, RecordError> {
        let location = respawn.location();
        let world = worlds
            .name(location.world)
            .ok_or(RecordError::UnnamedWorld(location.world))?;

        Ok(Self {
            respawn_time: respawn.remaining(now),
            game_mode: respawn.game_mode().name().to_owned(),
            location: LocationRecord {
                world: world.to_owned(),
                x: location.position.x,
                y: location.position.y,
                z: location.position.z,
                yaw: location.look.yaw,
                pitch: location.look.pitch,
            },
        })
    }

    /// Rebuilds the respawn, with its deadline `respawn_time` milliseconds
    /// after `now`.
    pub fn decode(&self, worlds: &Worlds, now: Millis) -> Result<Respawn, RecordError> {
        let loc = &self.location;
        let world = worlds
            .get(&loc.world)
            .ok_or_else(|| RecordError::WorldNotFound(loc.world.clone()))?;
        let game_mode: GameMode = self.game_mode.parse()?;

        Ok(Respawn::delayed(
            Location::new(
                world,
                DVec3::new(loc.x, loc.y, loc.z),
                Look::new(loc.yaw, loc.pitch),
            ),
            game_mode,
            now,
            self.respawn_time,
        ))
    }

    /// Whether the delay had already run out when this record was written.
    pub fn is_expired(&self) -> bool {
        self.respawn_time <= 0
    }
}

#[cfg(test)]
mod tests {
    use bevy_ecs::world::World;
    use pretty_assertions::assert_eq;

    use super::*;

    fn worlds() -> (Worlds, Entity, Entity) {
        let mut world = World::new();
        let overworld = world.spawn_empty().id();
        let nether = world.spawn_empty().id();

        let mut worlds = Worlds::default();
        worlds.insert("world", overworld);
        worlds.insert("world_nether", nether);

        (worlds, overworld, nether)
    }

    fn sample(nether: Entity) -> Respawn {
        Respawn::new(
            Location::new(nether, [12.5, 70.0, -8.25], Look::new(-90.0, 30.0)),
            GameMode::Adventure,
            5000,
        )
    }

    #[test]
    fn encode_stores_remaining_time_and_names() {
        let (worlds, _, nether) = worlds();

        let record = RespawnRecord::encode(&sample(nether), &worlds, 3000).unwrap();

        assert_eq!(
            record,
            RespawnRecord {
                respawn_time: 2000,
                game_mode: "adventure".to_owned(),
                location: LocationRecord {
                    world: "world_nether".to_owned(),
                    x: 12.5,
                    y: 70.0,
                    z: -8.25,
                    yaw: -90.0,
                    pitch: 30.0,
                },
            }
        );
    }

    #[test]
    fn decode_restarts_the_clock_from_remaining_time() {
        let (worlds, _, nether) = worlds();
        let record = RespawnRecord::encode(&sample(nether), &worlds, 1000).unwrap();

        // Restored much later on a clock with a different origin.
        let restored = record.decode(&worlds, 90_000).unwrap();

        assert_eq!(restored.remaining(90_000), 4000);
        assert_eq!(restored.location(), sample(nether).location());
        assert_eq!(restored.game_mode(), GameMode::Adventure);
    }

    #[test]
    fn decode_parses_game_mode_case_insensitively() {
        let (worlds, overworld, _) = worlds();
        let mut record = RespawnRecord::encode(
            &Respawn::new(
                Location::new(overworld, DVec3::ZERO, Look::default()),
                GameMode::Survival,
                100,
            ),
            &worlds,
            0,
        )
        .unwrap();
        record.game_mode = "SURVIVAL".to_owned();

        assert_eq!(
            record.decode(&worlds, 0).unwrap().game_mode(),
            GameMode::Survival
        );
    }

    #[test]
    fn decode_fails_for_unloaded_world() {
        let (mut worlds, _, nether) = worlds();
        let record = RespawnRecord::encode(&sample(nether), &worlds, 0).unwrap();

        worlds.remove("world_nether");

        assert!(matches!(
            record.decode(&worlds, 0),
            Err(RecordError::WorldNotFound(name)) if name == "world_nether"
        ));
    }

    #[test]
    fn decode_fails_for_unknown_game_mode() {
        let (worlds, _, nether) = worlds();
        let mut record = RespawnRecord::encode(&sample(nether), &worlds, 0).unwrap();
        record.game_mode = "hardcore".to_owned();

        assert!(matches!(
            record.decode(&worlds, 0),
            Err(RecordError::InvalidGameMode(_))
        ));
    }

    #[test]
    fn encode_fails_for_unnamed_world() {
        let (worlds, ..) = worlds();
        let unnamed = Entity::from_raw(999);

        assert!(matches!(
            RespawnRecord::encode(&sample(unnamed), &worlds, 0),
            Err(RecordError::UnnamedWorld(e)) if e == unnamed
        ));
    }

    #[test]
    fn expired_records() {
        let (worlds, _, nether) = worlds();

        let at_deadline = RespawnRecord::encode(&sample(nether), &worlds, 5000).unwrap();
        let past_deadline = RespawnRecord::encode(&sample(nether), &worlds, 5050).unwrap();
        let before_deadline = RespawnRecord::encode(&sample(nether), &worlds, 4999).unwrap();

        assert!(at_deadline.is_expired());
        assert!(past_deadline.is_expired());
        assert_eq!(past_deadline.respawn_time, -50);
        assert!(!before_deadline.is_expired());
    }

    #[test]
    fn document_layout() {
        let (worlds, overworld, _) = worlds();
        let respawn = Respawn::new(
            Location::new(overworld, [0.5, 64.0, -3.25], Look::new(90.0, 0.0)),
            GameMode::Survival,
            2000,
        );
        let record = RespawnRecord::encode(&respawn, &worlds, 0).unwrap();

        let text = toml::to_string(&record).unwrap();
        let doc: toml::Table = text.parse().unwrap();

        assert_eq!(doc["respawn-time"].as_integer(), Some(2000));
        assert_eq!(doc["game-mode"].as_str(), Some("survival"));

        let location = doc["location"].as_table().unwrap();
        assert_eq!(location["world"].as_str(), Some("world"));
        assert_eq!(location["x"].as_float(), Some(0.5));
        assert_eq!(location["y"].as_float(), Some(64.0));
        assert_eq!(location["z"].as_float(), Some(-3.25));
        assert_eq!(location["yaw"].as_float(), Some(90.0));
        assert_eq!(location["pitch"].as_float(), Some(0.0));
    }

    #[test]
    fn missing_key_fails_to_parse() {
        let text = r#"
            respawn-time = 2000

            [location]
            world = "world"
            x = 0.0
            y = 64.0
            z = 0.0
            yaw = 0.0
            pitch = 0.0
        "#;

        assert!(toml::from_str::<RespawnRecord>(text).is_err());
    }
}
