use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

use crate::core::models::KeybindingAction;
use crate::global_constants::{self, LOG_TAG_SETTINGS};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "Dark"),
            ThemeMode::Light => write!(f, "Light"),
        }
    }
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Dark
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeybindingSettings {
    pub clear_history: String,
    pub previous_entry: String,
    pub next_entry: String,
    pub toggle_menu: String,
}

impl Default for KeybindingSettings {
    fn default() -> Self {
        Self {
            clear_history: global_constants::DEFAULT_HOTKEY_CLEAR_HISTORY.to_string(),
            previous_entry: global_constants::DEFAULT_HOTKEY_PREVIOUS_ENTRY.to_string(),
            next_entry: global_constants::DEFAULT_HOTKEY_NEXT_ENTRY.to_string(),
            toggle_menu: global_constants::DEFAULT_HOTKEY_TOGGLE_MENU.to_string(),
        }
    }
}

impl KeybindingSettings {
    pub fn hotkey_for(&self, action: KeybindingAction) -> &str {
        match action {
            KeybindingAction::ClearHistory => &self.clear_history,
            KeybindingAction::PreviousEntry => &self.previous_entry,
            KeybindingAction::NextEntry => &self.next_entry,
            KeybindingAction::ToggleMenu => &self.toggle_menu,
        }
    }

    pub fn set_hotkey(&mut self, action: KeybindingAction, hotkey: String) {
        match action {
            KeybindingAction::ClearHistory => self.clear_history = hotkey,
            KeybindingAction::PreviousEntry => self.previous_entry = hotkey,
            KeybindingAction::NextEntry => self.next_entry = hotkey,
            KeybindingAction::ToggleMenu => self.toggle_menu = hotkey,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserSettings {
    /// Clipboard poll interval in milliseconds.
    pub interval: u64,
    pub history_size: usize,
    pub preview_size: usize,
    pub delete_enabled: bool,
    pub enable_keybinding: bool,
    pub keybindings: KeybindingSettings,
    pub theme_mode: ThemeMode,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            interval: global_constants::DEFAULT_INTERVAL_MS,
            history_size: global_constants::DEFAULT_HISTORY_SIZE,
            preview_size: global_constants::DEFAULT_PREVIEW_SIZE,
            delete_enabled: global_constants::DEFAULT_DELETE_ENABLED,
            enable_keybinding: global_constants::DEFAULT_ENABLE_KEYBINDING,
            keybindings: KeybindingSettings::default(),
            theme_mode: ThemeMode::default(),
        }
    }
}

impl UserSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.interval)
    }

    /// Raises out-of-range values to their minimums.
    pub fn sanitized(mut self) -> Self {
        if self.interval < global_constants::MINIMUM_INTERVAL_MS {
            log::warn!(
                "{} interval {}ms below minimum, using {}ms",
                LOG_TAG_SETTINGS,
                self.interval,
                global_constants::MINIMUM_INTERVAL_MS
            );
            self.interval = global_constants::MINIMUM_INTERVAL_MS;
        }
        self.history_size = self
            .history_size
            .max(global_constants::MINIMUM_HISTORY_SIZE);
        self.preview_size = self
            .preview_size
            .max(global_constants::MINIMUM_PREVIEW_SIZE);
        self
    }

    pub fn load() -> anyhow::Result<Self> {
        let settings_path = Self::get_settings_file_path()?;

        if !settings_path.exists() {
            log::info!("{} No settings file found, using defaults", LOG_TAG_SETTINGS);
            let default_settings = Self::default();
            default_settings.save_to(&settings_path)?;
            return Ok(default_settings);
        }

        Self::load_from(&settings_path)
    }

    pub fn load_from(settings_path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(settings_path)
            .with_context(|| format!("Failed to read {}", settings_path.display()))?;
        let settings: UserSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid settings JSON at {}", settings_path.display()))?;

        log::info!("{} Loaded settings from {:?}", LOG_TAG_SETTINGS, settings_path);
        log::debug!(
            "{} interval={}ms history_size={} preview_size={}",
            LOG_TAG_SETTINGS,
            settings.interval,
            settings.history_size,
            settings.preview_size
        );

        Ok(settings.sanitized())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let settings_path = Self::get_settings_file_path()?;
        self.save_to(&settings_path)
    }

    pub fn save_to(&self, settings_path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(settings_path, contents)?;

        log::info!("{} Saved settings to {:?}", LOG_TAG_SETTINGS, settings_path);
        Ok(())
    }

    pub fn get_settings_file_path() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join(global_constants::APPLICATION_DIR_NAME);

        Ok(config_dir.join(global_constants::SETTINGS_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode_default_is_dark() {
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn test_user_settings_default_values() {
        let settings = UserSettings::default();

        assert_eq!(settings.interval, 1000);
        assert_eq!(settings.history_size, 15);
        assert_eq!(settings.preview_size, 50);
        assert!(settings.delete_enabled);
        assert!(settings.enable_keybinding);
        assert_eq!(settings.keybindings.clear_history, "Ctrl+F10");
        assert_eq!(settings.keybindings.toggle_menu, "Ctrl+F9");
    }

    #[test]
    fn test_poll_interval_converts_milliseconds() {
        let settings = UserSettings {
            interval: 250,
            ..UserSettings::default()
        };

        assert_eq!(settings.poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_deserialization_fills_missing_fields_with_defaults() {
        let json = r#"{ "history_size": 3 }"#;

        let settings: UserSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.history_size, 3);
        assert_eq!(settings.interval, 1000);
        assert_eq!(settings.keybindings, KeybindingSettings::default());
    }

    #[test]
    fn test_sanitized_raises_values_to_minimums() {
        let settings = UserSettings {
            interval: 5,
            history_size: 0,
            preview_size: 0,
            ..UserSettings::default()
        }
        .sanitized();

        assert_eq!(settings.interval, 100);
        assert_eq!(settings.history_size, 1);
        assert_eq!(settings.preview_size, 1);
    }

    #[test]
    fn test_hotkey_for_and_set_hotkey_address_same_field() {
        let mut keybindings = KeybindingSettings::default();

        keybindings.set_hotkey(KeybindingAction::NextEntry, "Alt+N".to_string());

        assert_eq!(keybindings.hotkey_for(KeybindingAction::NextEntry), "Alt+N");
        assert_eq!(keybindings.next_entry, "Alt+N");
    }

    #[test]
    fn test_user_settings_save_and_load_roundtrip() {
        let temp_dir = std::env::temp_dir().join("clipboard-indicator-settings-test");
        let settings_file = temp_dir.join("settings.json");

        let original_settings = UserSettings {
            interval: 500,
            history_size: 30,
            preview_size: 20,
            delete_enabled: false,
            enable_keybinding: false,
            keybindings: KeybindingSettings {
                toggle_menu: "Super+V".to_string(),
                ..KeybindingSettings::default()
            },
            theme_mode: ThemeMode::Light,
        };

        original_settings.save_to(&settings_file).unwrap();
        let loaded_settings = UserSettings::load_from(&settings_file).unwrap();

        assert_eq!(loaded_settings, original_settings);

        std::fs::remove_dir_all(&temp_dir).ok();
    }

    #[test]
    fn test_load_from_malformed_file_returns_error() {
        let temp_dir = std::env::temp_dir().join("clipboard-indicator-settings-malformed");
        std::fs::create_dir_all(&temp_dir).unwrap();
        let settings_file = temp_dir.join("settings.json");
        std::fs::write(&settings_file, "{ not json").unwrap();

        assert!(UserSettings::load_from(&settings_file).is_err());

        std::fs::remove_dir_all(&temp_dir).ok();
    }
}
