pub mod app_orchestrator;
mod clipboard_indicator;
mod keybinding_registry;

pub use clipboard_indicator::ClipboardIndicator;
