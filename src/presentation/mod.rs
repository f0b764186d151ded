pub mod app_theme;
mod history_view;
mod notification_view;
mod settings_view;

pub use history_view::{HistoryView, HistoryViewMessage};
pub use notification_view::render_notification;
pub use settings_view::{SettingsView, SettingsViewMessage};
