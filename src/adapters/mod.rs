mod arboard_clipboard;
mod json_history_repository;
mod notification_banner;
mod settings_watcher;
mod system_clock;

pub use arboard_clipboard::ArboardClipboard;
pub use json_history_repository::JsonHistoryRepository;
pub use notification_banner::NotificationBanner;
pub use settings_watcher::SettingsWatcher;
pub use system_clock::SystemClock;

#[cfg(test)]
pub use system_clock::ManualClock;
