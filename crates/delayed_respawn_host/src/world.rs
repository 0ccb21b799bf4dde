use bevy_ecs::prelude::*;
use derive_more::{Deref, DerefMut};
use glam::DVec3;
use rustc_hash::FxHashMap;

/// The pointer to the world entity a player is currently in.
#[derive(Component, Copy, Clone, PartialEq, Eq, Debug)]
pub struct WorldId(pub Entity);

impl Default for WorldId {
    fn default() -> Self {
        Self(Entity::PLACEHOLDER)
    }
}

#[derive(Component, Copy, Clone, PartialEq, Default, Debug, Deref, DerefMut)]
pub struct Position(pub DVec3);

impl Position {
    pub fn new(pos: impl Into<DVec3>) -> Self {
        Self(pos.into())
    }

    pub fn get(self) -> DVec3 {
        self.0
    }

    pub fn set(&mut self, pos: impl Into<DVec3>) {
        self.0 = pos.into();
    }
}

/// Describes the direction an entity is looking using pitch and yaw angles.
#[derive(Component, Copy, Clone, PartialEq, Default, Debug)]
pub struct Look {
    /// The yaw angle in degrees, where:
    /// - `-90` is looking east (towards positive x).
    /// - `0` is looking south (towards positive z).
    /// - `90` is looking west (towards negative x).
    /// - `180` is looking north (towards negative z).
    ///
    /// Values -180 to 180 are also valid.
    pub yaw: f32,
    /// The pitch angle in degrees, where:
    /// - `-90` is looking straight up.
    /// - `0` is looking straight ahead.
    /// - `90` is looking straight down.
    pub pitch: f32,
}

impl Look {
    pub const fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }
}

/// A point in a specific world, together with the direction to face when
/// placed there.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Location {
    pub world: Entity,
    pub position: DVec3,
    pub look: Look,
}

impl Location {
    pub fn new(world: Entity, position: impl Into<DVec3>, look: Look) -> Self {
        Self {
            world,
            position: position.into(),
            look,
        }
    }
}

/// Every world currently loaded by the host, by name.
///
/// Names are unique. Registering a second world under a name that is already
/// taken replaces the previous entry.
#[derive(Resource, Default, Debug)]
pub struct Worlds {
    by_name: FxHashMap<String, Entity>,
    names: FxHashMap<Entity, String>,
}

impl Worlds {
    /// Registers `world` under `name`, returning the world previously
    /// registered under that name, if any.
    pub fn insert(&mut self, name: impl Into<String>, world: Entity) -> Option<Entity> {
        let name = name.into();

        if let Some(old_name) = self.names.insert(world, name.clone()) {
            self.by_name.remove(&old_name);
        }

        let old = self.by_name.insert(name, world);

        if let Some(old) = old.filter(|&old| old != world) {
            self.names.remove(&old);
        }

        old
    }

    /// Unregisters the world with the given name. Called when a world is
    /// unloaded.
    pub fn remove(&mut self, name: &str) -> Option<Entity> {
        let world = self.by_name.remove(name)?;
        self.names.remove(&world);
        Some(world)
    }

    pub fn get(&self, name: &str) -> Option<Entity> {
        self.by_name.get(name).copied()
    }

    /// Returns the name `world` is registered under.
    pub fn name(&self, world: Entity) -> Option<&str> {
        self.names.get(&world).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Entity)> + '_ {
        self.by_name.iter().map(|(name, &world)| (name.as_str(), world))
    }
}
