use crate::{error::CountdownError, persistence::DEFAULT_SLOT};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

const CONFIG_FILENAME: &str = "config.ron";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Slot key the timers are stored under
    pub slot: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slot: DEFAULT_SLOT.to_owned(),
        }
    }
}

impl Config {
    /// Reads the config under `root`, falling back to the defaults
    pub fn load_or_default(root: &Path) -> Result<Self, CountdownError> {
        let config = Self::try_read(root)?.unwrap_or_else(|| {
            debug!("No config file, using defaults");
            Self::default()
        });

        Ok(config)
    }
}

impl Saveable for Config {
    fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILENAME)
    }
}

pub trait Saveable: Serialize + DeserializeOwned {
    fn path(root: &Path) -> PathBuf;

    fn save(&self, root: &Path) -> Result<(), CountdownError> {
        let path = Self::path(root);

        fs::write(path, ron::to_string(self)?)?;

        Ok(())
    }

    fn try_read(root: &Path) -> Result<Option<Self>, CountdownError> {
        let path = Self::path(root);
        if !path.is_file() {
            return Ok(None);
        }
        let config = fs::read_to_string(path)?;
        let config = ron::from_str(&config)?;

        Ok(Some(config))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.slot, DEFAULT_SLOT);
    }

    #[test]
    fn test_save_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            slot: "kitchen".into(),
        };
        config.save(dir.path()).unwrap();

        assert_eq!(Config::try_read(dir.path()).unwrap(), Some(config));
    }

    #[test]
    fn test_empty_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "()").unwrap();

        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config.slot, DEFAULT_SLOT);
    }

    #[test]
    fn test_broken_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "(slot: ").unwrap();

        assert!(Config::load_or_default(dir.path()).is_err());
    }
}
