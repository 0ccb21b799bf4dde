use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock::Millis;

/// Name of the configuration file inside the data folder.
pub const CONFIG_FILE: &str = "config.toml";

/// Name of the folder inside the data folder that offline players' pending
/// respawns are kept in.
pub const RESPAWNS_FOLDER: &str = "respawns";

/// Settings for [`DelayedRespawnPlugin`](crate::DelayedRespawnPlugin).
///
/// Insert this resource before adding the plugin to override the defaults,
/// usually with the result of [`RespawnSettings::load`].
#[derive(Resource, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RespawnSettings {
    /// The folder holding the configuration file and persisted respawns.
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// How long a dead player spends spectating before they respawn, in
    /// milliseconds.
    pub respawn_delay: u32,
}

impl Default for RespawnSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("delayed_respawn"),
            respawn_delay: 3000,
        }
    }
}

impl RespawnSettings {
    /// Reads `config.toml` from `data_dir`. Missing options keep their default
    /// values. If the file does not exist, it is created with the defaults.
    pub fn load(data_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir.into();
        let path = data_dir.join(CONFIG_FILE);

        let mut settings = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;

            toml::from_str::<Self>(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            let settings = Self::default();
            settings.write_default(&data_dir, &path)?;
            settings
        };

        settings.data_dir = data_dir;

        Ok(settings)
    }

    fn write_default(&self, data_dir: &Path, path: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("failed to write {}", path.display()))?;

        info!("Wrote default configuration to {}", path.display());

        Ok(())
    }

    pub fn respawn_delay_millis(&self) -> Millis {
        Millis::from(self.respawn_delay)
    }

    pub fn respawns_dir(&self) -> PathBuf {
        self.data_dir.join(RESPAWNS_FOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("plugin");

        let settings = RespawnSettings::load(&data_dir).unwrap();

        assert_eq!(settings.respawn_delay, 3000);
        assert_eq!(settings.data_dir, data_dir);

        let written = fs::read_to_string(data_dir.join(CONFIG_FILE)).unwrap();
        assert_eq!(written.trim(), "respawn-delay = 3000");
    }

    #[test]
    fn reads_respawn_delay() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "respawn-delay = 10000\n").unwrap();

        let settings = RespawnSettings::load(dir.path()).unwrap();

        assert_eq!(settings.respawn_delay_millis(), 10_000);
        assert_eq!(settings.respawns_dir(), dir.path().join(RESPAWNS_FOLDER));
    }

    #[test]
    fn empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "").unwrap();

        let settings = RespawnSettings::load(dir.path()).unwrap();

        assert_eq!(settings.respawn_delay, RespawnSettings::default().respawn_delay);
    }

    #[test]
    fn invalid_delay_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "respawn-delay = -5\n").unwrap();

        let err = RespawnSettings::load(dir.path()).unwrap_err();

        assert!(format!("{err:#}").contains("failed to parse"));
    }
}
