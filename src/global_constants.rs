#![allow(dead_code)]

pub const APPLICATION_NAME: &str = "Clipboard Indicator";
pub const APPLICATION_DIR_NAME: &str = "clipboard-indicator";

pub const LOG_TAG_APP: &str = "[APP]";
pub const LOG_TAG_HISTORY: &str = "[HISTORY]";
pub const LOG_TAG_SELECTION: &str = "[SELECTION]";
pub const LOG_TAG_POLLER: &str = "[POLLER]";
pub const LOG_TAG_ORCHESTRATOR: &str = "[ORCHESTRATOR]";
pub const LOG_TAG_REGISTRY: &str = "[REGISTRY]";
pub const LOG_TAG_SETTINGS: &str = "[SETTINGS]";
pub const LOG_TAG_KEYBOARD: &str = "[KEYBOARD]";
pub const LOG_TAG_CLIPBOARD: &str = "[CLIPBOARD]";
pub const LOG_TAG_NOTIFICATION: &str = "[NOTIFICATION]";
pub const LOG_TAG_SYSTEM_TRAY: &str = "[SYSTEM_TRAY]";
pub const LOG_TAG_INSTANCE: &str = "[INSTANCE]";

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const REGISTRY_FILE_NAME: &str = "registry.json";
pub const INSTANCE_LOCK_FILE_NAME: &str = "clipboard-indicator.lock";

pub const DEFAULT_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_HISTORY_SIZE: usize = 15;
pub const DEFAULT_PREVIEW_SIZE: usize = 50;
pub const DEFAULT_DELETE_ENABLED: bool = true;
pub const DEFAULT_ENABLE_KEYBINDING: bool = true;

pub const MINIMUM_INTERVAL_MS: u64 = 100;
pub const MINIMUM_HISTORY_SIZE: usize = 1;
pub const MINIMUM_PREVIEW_SIZE: usize = 1;

pub const DEFAULT_HOTKEY_CLEAR_HISTORY: &str = "Ctrl+F10";
pub const DEFAULT_HOTKEY_PREVIOUS_ENTRY: &str = "Ctrl+F11";
pub const DEFAULT_HOTKEY_NEXT_ENTRY: &str = "Ctrl+F12";
pub const DEFAULT_HOTKEY_TOGGLE_MENU: &str = "Ctrl+F9";

pub const HEARTBEAT_INTERVAL_MS: u64 = 100;
pub const SETTINGS_WATCH_EVERY_N_HEARTBEATS: u32 = 10;
pub const POLL_READ_ABANDON_AFTER_INTERVALS: u32 = 10;

pub const ENTRY_LABEL_ELLIPSIS: &str = "...";

pub const USER_MESSAGE_HISTORY_CLEARED: &str = "Clipboard history cleared";

pub const TRAY_ITEM_SHOW_HISTORY: &str = "Show History";
pub const TRAY_ITEM_CLEAR_HISTORY: &str = "Clear History";
pub const TRAY_ITEM_SETTINGS: &str = "Settings";
pub const TRAY_ITEM_QUIT: &str = "Quit";

pub const TRAY_ID_SHOW_HISTORY: &str = "show-history";
pub const TRAY_ID_CLEAR_HISTORY: &str = "clear-history";
pub const TRAY_ID_SETTINGS: &str = "settings";
pub const TRAY_ID_QUIT: &str = "quit";
pub const TRAY_ICON_SIZE: u32 = 32;
