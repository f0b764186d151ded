mod history_entry;
mod key_chord;
mod user_settings;

pub use history_entry::{EntryId, HistoryEntry};
pub use key_chord::{KeyChord, KeyCode, KeybindingAction, Modifiers};
pub use user_settings::{KeybindingSettings, ThemeMode, UserSettings};
