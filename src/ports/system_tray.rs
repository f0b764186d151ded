use tray_icon::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

use crate::global_constants::{
    self, APPLICATION_NAME, LOG_TAG_SYSTEM_TRAY, TRAY_ICON_SIZE, TRAY_ID_CLEAR_HISTORY,
    TRAY_ID_QUIT, TRAY_ID_SETTINGS, TRAY_ID_SHOW_HISTORY,
};

pub struct SystemTray {
    _tray_icon: TrayIcon,
    _menu: Menu,
    _show_history_item: MenuItem,
    _clear_history_item: MenuItem,
    _settings_item: MenuItem,
    _quit_item: MenuItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    ShowHistory,
    ClearHistory,
    OpenSettings,
    Quit,
}

impl SystemTray {
    pub fn build() -> anyhow::Result<Self> {
        log::info!("{} Initializing system tray", LOG_TAG_SYSTEM_TRAY);

        let icon = Icon::from_rgba(
            render_clipboard_icon(TRAY_ICON_SIZE),
            TRAY_ICON_SIZE,
            TRAY_ICON_SIZE,
        )?;

        let menu = Menu::new();
        let show_history_item = MenuItem::with_id(
            TRAY_ID_SHOW_HISTORY,
            global_constants::TRAY_ITEM_SHOW_HISTORY,
            true,
            None,
        );
        let clear_history_item = MenuItem::with_id(
            TRAY_ID_CLEAR_HISTORY,
            global_constants::TRAY_ITEM_CLEAR_HISTORY,
            true,
            None,
        );
        let settings_item = MenuItem::with_id(
            TRAY_ID_SETTINGS,
            global_constants::TRAY_ITEM_SETTINGS,
            true,
            None,
        );
        let quit_item =
            MenuItem::with_id(TRAY_ID_QUIT, global_constants::TRAY_ITEM_QUIT, true, None);

        menu.append(&show_history_item)?;
        menu.append(&clear_history_item)?;
        menu.append(&PredefinedMenuItem::separator())?;
        menu.append(&settings_item)?;
        menu.append(&quit_item)?;

        let tray_icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu.clone()))
            .with_tooltip(APPLICATION_NAME)
            .with_icon(icon)
            .build()?;

        log::info!("{} System tray initialized successfully", LOG_TAG_SYSTEM_TRAY);

        Ok(Self {
            _tray_icon: tray_icon,
            _menu: menu,
            _show_history_item: show_history_item,
            _clear_history_item: clear_history_item,
            _settings_item: settings_item,
            _quit_item: quit_item,
        })
    }

    pub fn poll_events() -> Option<TrayEvent> {
        let event = MenuEvent::receiver().try_recv().ok()?;
        let event_id: &str = event.id.0.as_ref();
        log::debug!("{} Received menu event: {}", LOG_TAG_SYSTEM_TRAY, event_id);

        let tray_event = TrayEvent::from_menu_id(event_id);
        if tray_event.is_none() {
            log::warn!("{} Unknown menu event: {}", LOG_TAG_SYSTEM_TRAY, event_id);
        }
        tray_event
    }
}

impl TrayEvent {
    fn from_menu_id(menu_id: &str) -> Option<Self> {
        match menu_id {
            TRAY_ID_SHOW_HISTORY => Some(TrayEvent::ShowHistory),
            TRAY_ID_CLEAR_HISTORY => Some(TrayEvent::ClearHistory),
            TRAY_ID_SETTINGS => Some(TrayEvent::OpenSettings),
            TRAY_ID_QUIT => Some(TrayEvent::Quit),
            _ => None,
        }
    }
}

/// Draws a clipboard glyph: a board with a clip on top and three text
/// lines, on a transparent background.
fn render_clipboard_icon(size: u32) -> Vec<u8> {
    const BOARD: [u8; 4] = [0xE8, 0xE8, 0xE8, 0xFF];
    const CLIP: [u8; 4] = [0x60, 0x60, 0x60, 0xFF];
    const LINE: [u8; 4] = [0x40, 0x40, 0x40, 0xFF];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    let unit = (size / 16).max(1);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);

    for y in 0..size {
        for x in 0..size {
            let (cell_x, cell_y) = (x / unit, y / unit);

            let on_clip = (5..11).contains(&cell_x) && (1..4).contains(&cell_y);
            let on_board = (2..14).contains(&cell_x) && (2..16).contains(&cell_y);
            let on_line = (4..12).contains(&cell_x) && matches!(cell_y, 6 | 9 | 12);

            let color = if on_clip {
                CLIP
            } else if on_line {
                LINE
            } else if on_board {
                BOARD
            } else {
                CLEAR
            };
            pixels.extend_from_slice(&color);
        }
    }

    pixels
}
