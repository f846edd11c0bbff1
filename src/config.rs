//! Live highlight configuration
//!
//! Stored in `~/.config/live-highlight/config.yaml`. The only setting the
//! controller consults is whether highlighting is enabled, and it reads that
//! through [`HighlightSetting`] on every evaluation so toggling takes effect
//! without rebuilding anything.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Persisted preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Highlight the rule under the cursor in the live preview
    #[serde(default = "default_highlight")]
    pub highlight: bool,
}

fn default_highlight() -> bool {
    true
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            highlight: default_highlight(),
        }
    }
}

impl HighlightConfig {
    /// Load config from the user config directory, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the user config directory
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Live switch initialised from this config
    pub fn toggle(&self) -> HighlightToggle {
        HighlightToggle::new(self.highlight)
    }
}

/// Source of the "highlighting enabled" flag
pub trait HighlightSetting {
    fn highlight_enabled(&self) -> bool;
}

/// Shared on/off switch; clones observe the same value
#[derive(Debug, Clone)]
pub struct HighlightToggle(Rc<Cell<bool>>);

impl HighlightToggle {
    pub fn new(enabled: bool) -> Self {
        Self(Rc::new(Cell::new(enabled)))
    }

    pub fn set(&self, enabled: bool) {
        if self.0.replace(enabled) != enabled {
            tracing::info!(
                "Live highlight {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
    }
}

impl Default for HighlightToggle {
    fn default() -> Self {
        Self::new(default_highlight())
    }
}

impl HighlightSetting for HighlightToggle {
    fn highlight_enabled(&self) -> bool {
        self.0.get()
    }
}
