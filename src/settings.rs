use crate::keybindings::{KeyBindings, CLOSE_DIALOG};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write the log to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Last known window size. If absent, a default size is used.
    #[serde(default = "default_window_size")]
    pub window_size: Option<(i32, i32)>,
    /// Action name to key combinations, e.g. `"CloseDialog": ["Escape"]`.
    #[serde(default = "default_keybindings")]
    pub keybindings: BTreeMap<String, Vec<String>>,
}

fn default_window_size() -> Option<(i32, i32)> {
    Some((1024, 768))
}

fn default_keybindings() -> BTreeMap<String, Vec<String>> {
    let mut map = BTreeMap::new();
    map.insert(CLOSE_DIALOG.to_string(), vec!["Escape".to_string()]);
    map
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            window_size: default_window_size(),
            keybindings: default_keybindings(),
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn keybindings(&self) -> KeyBindings {
        KeyBindings::from_config(&self.keybindings)
    }
}
