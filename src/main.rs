#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod adapters;
mod app;
mod core;
mod global_constants;
mod ports;
mod presentation;
mod utils;

use iced::daemon;

use crate::global_constants::{APPLICATION_NAME, LOG_TAG_APP};

fn main() -> iced::Result {
    env_logger::init();

    log::info!("{} Starting {}", LOG_TAG_APP, APPLICATION_NAME);

    if !utils::ensure_single_instance() {
        log::error!("{} Failed to ensure single instance", LOG_TAG_APP);
    }

    #[cfg(target_os = "macos")]
    {
        use tray_icon::TrayIconEvent;
        TrayIconEvent::set_event_handler(Some(|_event| {}));
    }

    daemon(
        app::ClipboardIndicatorApp::build,
        app::ClipboardIndicatorApp::handle_update,
        app::ClipboardIndicatorApp::render_view,
    )
    .subscription(app::ClipboardIndicatorApp::handle_subscription)
    .run()
}
