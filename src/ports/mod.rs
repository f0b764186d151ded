mod keyboard_listener;
mod system_tray;

pub use keyboard_listener::GlobalKeyboardListener;
pub use system_tray::{SystemTray, TrayEvent};
