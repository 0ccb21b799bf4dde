use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use thiserror::Error;
use uuid::Uuid;

use crate::record::RespawnRecord;

/// A folder holding one [`RespawnRecord`] per offline player, stored as
/// `<uuid>.toml`.
#[derive(Resource, Clone, Debug)]
pub struct RespawnStore {
    root: PathBuf,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("an I/O error occurred: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode respawn record: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("failed to parse respawn record: {0}")]
    Decode(#[from] toml::de::Error),
}

impl RespawnStore {
    /// The folder is created on the first [`save`](Self::save).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, player: Uuid) -> PathBuf {
        self.root.join(format!("{player}.toml"))
    }

    pub fn contains(&self, player: Uuid) -> bool {
        self.path(player).is_file()
    }

    /// Writes the record for `player`, replacing any existing one.
    pub fn save(&self, player: Uuid, record: &RespawnRecord) -> Result<(), StoreError> {
        let text = toml::to_string_pretty(record)?;

        fs::create_dir_all(&self.root)?;
        fs::write(self.path(player), text)?;

        Ok(())
    }

    /// Reads and deletes the record for `player`.
    ///
    /// Returns `Ok(None)` if there is no record. The file is deleted as soon
    /// as it has been read, so a record that fails to parse is discarded
    /// rather than retried on every join.
    pub fn take(&self, player: Uuid) -> Result<Option<RespawnRecord>, StoreError> {
        let path = self.path(player);

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        fs::remove_file(&path)?;

        Ok(Some(toml::from_str(&text)?))
    }
}
