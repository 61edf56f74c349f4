use std::{fs, sync::Arc, time::Duration};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{Result, fs::config_dir};

const FILE_NAME: &str = "core.toml";

/// Handle to the core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

/// Tuning knobs for the draft session timers, serialized to TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Quiet period after the last form edit before an autosave fires.
    pub autosave_debounce_ms: u64,
    /// How long the "saving" indicator stays up after a manual draft save.
    pub save_indicator_ms: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            autosave_debounce_ms: 1_000,
            save_indicator_ms: 600,
        }
    }
}

impl CoreConfig {
    pub fn load() -> Self {
        let path = config_dir().join(FILE_NAME);

        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
            Err(_) => {
                let cfg = Self::default();
                let _ = cfg.save();
                cfg
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(self).unwrap_or_default();

        fs::create_dir_all(config_dir())?;
        fs::write(config_dir().join(FILE_NAME), contents)?;

        Ok(())
    }

    pub fn autosave_debounce(&self) -> Duration {
        Duration::from_millis(self.autosave_debounce_ms)
    }

    pub fn save_indicator(&self) -> Duration {
        Duration::from_millis(self.save_indicator_ms)
    }
}
