use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::core::models::UserSettings;
use crate::global_constants::LOG_TAG_SETTINGS;

/// Picks up edits made to the settings file while the app is running by
/// comparing its modification time.
pub struct SettingsWatcher {
    settings_path: PathBuf,
    last_modified: Option<SystemTime>,
}

impl SettingsWatcher {
    pub fn watch(settings_path: PathBuf) -> Self {
        let last_modified = Self::modified_time(&settings_path);
        log::debug!("{} watching {:?}", LOG_TAG_SETTINGS, settings_path);

        Self {
            settings_path,
            last_modified,
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Records the current file state so the app's own save is not reported
    /// back as an external change.
    pub fn acknowledge_current_file(&mut self) {
        self.last_modified = Self::modified_time(&self.settings_path);
    }

    /// Returns freshly loaded settings when the file changed since the last
    /// check. A file that fails to parse is logged and skipped until it
    /// changes again.
    pub fn check_for_change(&mut self) -> Option<UserSettings> {
        let current = Self::modified_time(&self.settings_path);
        if current.is_none() || current == self.last_modified {
            return None;
        }
        self.last_modified = current;

        match UserSettings::load_from(&self.settings_path) {
            Ok(settings) => {
                log::info!("{} settings file changed on disk", LOG_TAG_SETTINGS);
                Some(settings)
            }
            Err(error) => {
                log::warn!(
                    "{} ignoring unreadable settings file: {:#}",
                    LOG_TAG_SETTINGS,
                    error
                );
                None
            }
        }
    }

    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .ok()
    }
}
