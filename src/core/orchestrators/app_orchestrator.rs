use std::collections::HashMap;
use std::sync::Arc;

use iced::widget::{container, text, Space};
use iced::window::{self, Id};
use iced::{Element, Point, Size, Task};

use crate::adapters::SettingsWatcher;
use crate::core::history::PollTicket;
use crate::core::models::{KeyChord, KeybindingAction, UserSettings};
use crate::core::orchestrators::ClipboardIndicator;
use crate::core::ports::ClipboardPort;
use crate::global_constants::{LOG_TAG_ORCHESTRATOR, SETTINGS_WATCH_EVERY_N_HEARTBEATS};
use crate::ports::TrayEvent;
use crate::presentation::{
    app_theme, render_notification, HistoryView, HistoryViewMessage, SettingsView,
    SettingsViewMessage,
};

pub enum AppWindow {
    History,
    Settings(SettingsView),
    Notification,
    Hidden,
}

pub struct AppOrchestrator {
    indicator: ClipboardIndicator,
    clipboard: Arc<dyn ClipboardPort>,
    settings_watcher: Option<SettingsWatcher>,
    windows: HashMap<Id, AppWindow>,
    history_window_id: Option<Id>,
    settings_window_id: Option<Id>,
    notification_window_id: Option<Id>,
    hidden_window_id: Option<Id>,
    heartbeats_since_settings_check: u32,
}

#[derive(Clone)]
pub enum OrchestratorMessage {
    CreateHiddenWindow,
    Heartbeat,
    ClipboardRead(PollTicket, Result<Option<String>, String>),
    KeyPressed(KeyChord),
    TrayEvent(TrayEvent),
    HistoryMessage(HistoryViewMessage),
    OpenSettings,
    SettingsMessage(Id, SettingsViewMessage),
    WindowClosed(Id),
}

impl std::fmt::Debug for OrchestratorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrchestratorMessage::CreateHiddenWindow => write!(f, "CreateHiddenWindow"),
            OrchestratorMessage::Heartbeat => write!(f, "Heartbeat"),
            OrchestratorMessage::ClipboardRead(ticket, result) => {
                write!(f, "ClipboardRead({:?}, ok: {})", ticket, result.is_ok())
            }
            OrchestratorMessage::KeyPressed(chord) => write!(f, "KeyPressed({:?})", chord),
            OrchestratorMessage::TrayEvent(event) => write!(f, "TrayEvent({:?})", event),
            OrchestratorMessage::HistoryMessage(message) => {
                write!(f, "HistoryMessage({:?})", message)
            }
            OrchestratorMessage::OpenSettings => write!(f, "OpenSettings"),
            OrchestratorMessage::SettingsMessage(id, _) => write!(f, "SettingsMessage({:?})", id),
            OrchestratorMessage::WindowClosed(id) => write!(f, "WindowClosed({:?})", id),
        }
    }
}

impl AppOrchestrator {
    pub fn build(
        indicator: ClipboardIndicator,
        clipboard: Arc<dyn ClipboardPort>,
        settings_watcher: Option<SettingsWatcher>,
    ) -> Self {
        Self {
            indicator,
            clipboard,
            settings_watcher,
            windows: HashMap::new(),
            history_window_id: None,
            settings_window_id: None,
            notification_window_id: None,
            hidden_window_id: None,
            heartbeats_since_settings_check: 0,
        }
    }

    pub fn indicator(&self) -> &ClipboardIndicator {
        &self.indicator
    }

    pub fn create_hidden_window(&mut self) -> Task<OrchestratorMessage> {
        if self.hidden_window_id.is_some() {
            return Task::none();
        }

        log::info!(
            "{} Creating hidden background window to keep app alive",
            LOG_TAG_ORCHESTRATOR
        );

        let (id, task) = window::open(window::Settings {
            size: Size::new(1.0, 1.0),
            position: window::Position::Specific(Point::new(-10000.0, -10000.0)),
            visible: false,
            resizable: false,
            decorations: false,
            ..Default::default()
        });

        self.hidden_window_id = Some(id);
        self.windows.insert(id, AppWindow::Hidden);

        task.discard()
    }

    pub fn update(&mut self, message: OrchestratorMessage) -> Task<OrchestratorMessage> {
        if !matches!(
            message,
            OrchestratorMessage::Heartbeat | OrchestratorMessage::ClipboardRead(..)
        ) {
            log::info!("{} Received message: {:?}", LOG_TAG_ORCHESTRATOR, message);
        }

        match message {
            OrchestratorMessage::CreateHiddenWindow => self.create_hidden_window(),
            OrchestratorMessage::Heartbeat => self.handle_heartbeat(),
            OrchestratorMessage::ClipboardRead(ticket, result) => {
                self.indicator
                    .handle_clipboard_read(ticket, result.map_err(anyhow::Error::msg));
                Task::none()
            }
            OrchestratorMessage::KeyPressed(chord) => self.handle_key_pressed(chord),
            OrchestratorMessage::TrayEvent(event) => self.handle_tray_event(event),
            OrchestratorMessage::HistoryMessage(message) => self.handle_history_message(message),
            OrchestratorMessage::OpenSettings => self.handle_open_settings(),
            OrchestratorMessage::SettingsMessage(window_id, message) => {
                self.handle_settings_message(window_id, message)
            }
            OrchestratorMessage::WindowClosed(id) => self.handle_window_closed(id),
        }
    }

    pub fn render_view(&self, window_id: Id) -> Element<'_, OrchestratorMessage> {
        let theme = app_theme::get_theme(&self.indicator.settings().theme_mode);

        match self.windows.get(&window_id) {
            Some(AppWindow::History) => HistoryView::from_indicator(&self.indicator)
                .render_ui(&theme)
                .map(OrchestratorMessage::HistoryMessage),
            Some(AppWindow::Settings(settings_view)) => settings_view
                .render_ui(&theme)
                .map(move |message| OrchestratorMessage::SettingsMessage(window_id, message)),
            Some(AppWindow::Notification) => {
                render_notification(self.indicator.notification_text().unwrap_or_default())
            }
            Some(AppWindow::Hidden) => container(Space::new()).into(),
            None => text("Loading...").into(),
        }
    }

    fn handle_heartbeat(&mut self) -> Task<OrchestratorMessage> {
        self.check_settings_file();

        let read_task = match self.indicator.handle_heartbeat() {
            Some(ticket) => self.read_clipboard(ticket),
            None => Task::none(),
        };

        Task::batch([read_task, self.sync_notification_window()])
    }

    fn read_clipboard(&self, ticket: PollTicket) -> Task<OrchestratorMessage> {
        let clipboard = Arc::clone(&self.clipboard);

        Task::future(async move {
            let result = clipboard
                .read_text()
                .await
                .map_err(|error| format!("{:#}", error));
            OrchestratorMessage::ClipboardRead(ticket, result)
        })
    }

    fn check_settings_file(&mut self) {
        self.heartbeats_since_settings_check += 1;
        if self.heartbeats_since_settings_check < SETTINGS_WATCH_EVERY_N_HEARTBEATS {
            return;
        }
        self.heartbeats_since_settings_check = 0;

        let changed = self
            .settings_watcher
            .as_mut()
            .and_then(SettingsWatcher::check_for_change);

        if let Some(settings) = changed {
            log::info!("{} Applying settings edited on disk", LOG_TAG_ORCHESTRATOR);
            self.indicator.apply_settings(settings);
        }
    }

    /// Opens the notification window when there is text to show and closes
    /// it once the text has expired.
    fn sync_notification_window(&mut self) -> Task<OrchestratorMessage> {
        let has_text = self.indicator.notification_text().is_some();

        match (has_text, self.notification_window_id) {
            (true, None) => {
                let (id, task) = window::open(window::Settings {
                    size: Size::new(360.0, 48.0),
                    position: window::Position::SpecificWith(|window_size, monitor| {
                        Point::new(monitor.width - window_size.width - 16.0, 40.0)
                    }),
                    resizable: false,
                    decorations: false,
                    level: window::Level::AlwaysOnTop,
                    ..Default::default()
                });
                self.notification_window_id = Some(id);
                self.windows.insert(id, AppWindow::Notification);
                task.discard()
            }
            (false, Some(id)) => {
                self.notification_window_id = None;
                self.windows.remove(&id);
                window::close(id)
            }
            _ => Task::none(),
        }
    }

    fn handle_key_pressed(&mut self, chord: KeyChord) -> Task<OrchestratorMessage> {
        let Some(action) = self.indicator.action_for_chord(&chord) else {
            return Task::none();
        };

        log::info!("{} Keybinding triggered: {}", LOG_TAG_ORCHESTRATOR, action);
        self.run_action(action)
    }

    fn run_action(&mut self, action: KeybindingAction) -> Task<OrchestratorMessage> {
        match action {
            KeybindingAction::ClearHistory => self.indicator.clear_history(),
            KeybindingAction::PreviousEntry => self.indicator.previous_entry(),
            KeybindingAction::NextEntry => self.indicator.next_entry(),
            KeybindingAction::ToggleMenu => return self.handle_toggle_history_menu(),
        }
        self.sync_notification_window()
    }

    fn handle_tray_event(&mut self, event: TrayEvent) -> Task<OrchestratorMessage> {
        log::info!("{} Handling tray event: {:?}", LOG_TAG_ORCHESTRATOR, event);

        match event {
            TrayEvent::ShowHistory => self.open_history_window(),
            TrayEvent::ClearHistory => self.run_action(KeybindingAction::ClearHistory),
            TrayEvent::OpenSettings => self.handle_open_settings(),
            TrayEvent::Quit => self.handle_quit(),
        }
    }

    fn handle_toggle_history_menu(&mut self) -> Task<OrchestratorMessage> {
        match self.history_window_id.take() {
            Some(id) => {
                self.windows.remove(&id);
                window::close(id)
            }
            None => self.open_history_window(),
        }
    }

    fn open_history_window(&mut self) -> Task<OrchestratorMessage> {
        if let Some(id) = self.history_window_id {
            return window::gain_focus(id);
        }

        let (id, task) = window::open(window::Settings {
            size: Size::new(420.0, 480.0),
            position: window::Position::Centered,
            resizable: true,
            level: window::Level::AlwaysOnTop,
            ..Default::default()
        });

        self.history_window_id = Some(id);
        self.windows.insert(id, AppWindow::History);
        log::info!("{} History window created with ID: {:?}", LOG_TAG_ORCHESTRATOR, id);

        task.discard()
    }

    fn handle_history_message(&mut self, message: HistoryViewMessage) -> Task<OrchestratorMessage> {
        match message {
            HistoryViewMessage::Select(entry_id) => {
                self.indicator.select(entry_id);
                self.handle_toggle_history_menu()
            }
            HistoryViewMessage::Remove(entry_id) => {
                self.indicator.remove(entry_id);
                Task::none()
            }
            HistoryViewMessage::ClearHistory => self.run_action(KeybindingAction::ClearHistory),
            HistoryViewMessage::OpenSettings => self.handle_open_settings(),
        }
    }

    fn handle_open_settings(&mut self) -> Task<OrchestratorMessage> {
        log::info!("{} Opening settings window", LOG_TAG_ORCHESTRATOR);
        if let Some(id) = self.settings_window_id {
            log::warn!("{} Settings window already open", LOG_TAG_ORCHESTRATOR);
            return window::gain_focus(id);
        }

        let (id, task) = window::open(window::Settings {
            size: Size::new(520.0, 640.0),
            position: window::Position::Centered,
            resizable: false,
            ..Default::default()
        });

        self.settings_window_id = Some(id);
        self.windows.insert(
            id,
            AppWindow::Settings(SettingsView::new(self.indicator.settings())),
        );
        log::info!("{} Settings window created with ID: {:?}", LOG_TAG_ORCHESTRATOR, id);

        task.discard()
    }

    fn handle_settings_message(
        &mut self,
        window_id: Id,
        message: SettingsViewMessage,
    ) -> Task<OrchestratorMessage> {
        if matches!(message, SettingsViewMessage::OpenSettingsFile) {
            self.open_settings_file();
            return Task::none();
        }

        let Some(AppWindow::Settings(settings_view)) = self.windows.get_mut(&window_id) else {
            return Task::none();
        };

        match settings_view.handle_message(message) {
            Some(settings) => {
                self.commit_settings(settings);
                self.settings_window_id = None;
                self.windows.remove(&window_id);
                window::close(window_id)
            }
            None => Task::none(),
        }
    }

    fn open_settings_file(&self) {
        let Some(watcher) = self.settings_watcher.as_ref() else {
            log::warn!("{} No settings file to open", LOG_TAG_ORCHESTRATOR);
            return;
        };

        if let Err(e) = open::that(watcher.settings_path()) {
            log::error!("{} Failed to open settings file: {}", LOG_TAG_ORCHESTRATOR, e);
        }
    }

    fn commit_settings(&mut self, settings: UserSettings) {
        match settings.save() {
            Ok(()) => {
                log::info!("{} Settings saved successfully", LOG_TAG_ORCHESTRATOR);
                if let Some(watcher) = self.settings_watcher.as_mut() {
                    watcher.acknowledge_current_file();
                }
            }
            Err(e) => log::error!("{} Failed to save settings: {:#}", LOG_TAG_ORCHESTRATOR, e),
        }

        self.indicator.apply_settings(settings);
    }

    fn handle_window_closed(&mut self, id: Id) -> Task<OrchestratorMessage> {
        log::info!("{} Window closed: {:?}", LOG_TAG_ORCHESTRATOR, id);
        self.windows.remove(&id);

        if Some(id) == self.hidden_window_id {
            log::warn!(
                "{} Hidden window closed unexpectedly, recreating",
                LOG_TAG_ORCHESTRATOR
            );
            self.hidden_window_id = None;
            return self.create_hidden_window();
        }

        if Some(id) == self.history_window_id {
            self.history_window_id = None;
        }
        if Some(id) == self.settings_window_id {
            self.settings_window_id = None;
        }
        if Some(id) == self.notification_window_id {
            self.notification_window_id = None;
        }

        Task::none()
    }

    fn handle_quit(&mut self) -> Task<OrchestratorMessage> {
        log::info!("{} Quit requested", LOG_TAG_ORCHESTRATOR);
        self.shutdown();
        iced::exit()
    }

    /// Releases timers, hotkeys and the settings subscription. Idempotent.
    pub fn shutdown(&mut self) {
        self.indicator.shutdown();
        if self.settings_watcher.take().is_some() {
            log::debug!("{} Settings watcher disconnected", LOG_TAG_ORCHESTRATOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{ManualClock, NotificationBanner};
    use crate::core::ports::HistoryRepository;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockClipboard {
        writes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ClipboardPort for MockClipboard {
        async fn read_text(&self) -> Result<Option<String>> {
            Ok(None)
        }

        fn write_text(&self, text: &str) -> Result<()> {
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct MockRepository(Vec<String>);

    impl HistoryRepository for MockRepository {
        fn save(&self, _contents: &[String]) -> Result<()> {
            Ok(())
        }

        fn load(&self) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    fn create_test_orchestrator(contents: &[&str]) -> (AppOrchestrator, Arc<ManualClock>) {
        let clipboard = Arc::new(MockClipboard::default());
        let clock = Arc::new(ManualClock::starting_now());
        let mut indicator = ClipboardIndicator::build(
            clipboard.clone(),
            Arc::new(MockRepository(
                contents.iter().map(|c| c.to_string()).collect(),
            )),
            Box::new(NotificationBanner::build(clock.clone())),
            clock.clone(),
            UserSettings::default(),
        );
        indicator.startup();

        (AppOrchestrator::build(indicator, clipboard, None), clock)
    }

    fn selected_content(orchestrator: &AppOrchestrator) -> Option<String> {
        let indicator = orchestrator.indicator();
        let id = indicator.selected()?;
        indicator
            .list()
            .iter()
            .find(|entry| entry.id() == id)
            .map(|entry| entry.content().to_string())
    }

    #[test]
    fn test_build_creates_orchestrator_with_no_windows() {
        let (orchestrator, _clock) = create_test_orchestrator(&["a"]);

        assert!(orchestrator.windows.is_empty());
        assert!(orchestrator.history_window_id.is_none());
        assert!(orchestrator.settings_window_id.is_none());
        assert!(orchestrator.notification_window_id.is_none());
    }

    #[test]
    fn test_bound_chord_runs_its_action() {
        let (mut orchestrator, _clock) = create_test_orchestrator(&["a", "b", "c"]);

        let _ = orchestrator.update(OrchestratorMessage::KeyPressed(
            KeyChord::parse("Ctrl+F12").unwrap(),
        ));

        assert_eq!(selected_content(&orchestrator), Some("a".to_string()));
        assert_eq!(orchestrator.indicator().notification_text(), Some("1 / 3: a"));
        assert!(orchestrator.notification_window_id.is_some());
    }

    #[test]
    fn test_unbound_chord_is_ignored() {
        let (mut orchestrator, _clock) = create_test_orchestrator(&["a", "b"]);

        let _ = orchestrator.update(OrchestratorMessage::KeyPressed(
            KeyChord::parse("Alt+Q").unwrap(),
        ));

        assert_eq!(selected_content(&orchestrator), Some("b".to_string()));
        assert!(orchestrator.indicator().notification_text().is_none());
    }

    #[test]
    fn test_tray_clear_history_keeps_selected_entry() {
        let (mut orchestrator, _clock) = create_test_orchestrator(&["a", "b", "c"]);

        let _ = orchestrator.update(OrchestratorMessage::TrayEvent(TrayEvent::ClearHistory));

        assert_eq!(orchestrator.indicator().list().len(), 1);
        assert_eq!(selected_content(&orchestrator), Some("c".to_string()));
    }

    #[test]
    fn test_toggle_menu_opens_then_closes_history_window() {
        let (mut orchestrator, _clock) = create_test_orchestrator(&["a"]);

        let _ = orchestrator.update(OrchestratorMessage::KeyPressed(
            KeyChord::parse("Ctrl+F9").unwrap(),
        ));
        let history_id = orchestrator.history_window_id.unwrap();
        assert!(matches!(
            orchestrator.windows.get(&history_id),
            Some(AppWindow::History)
        ));

        let _ = orchestrator.update(OrchestratorMessage::KeyPressed(
            KeyChord::parse("Ctrl+F9").unwrap(),
        ));
        assert!(orchestrator.history_window_id.is_none());
        assert!(!orchestrator.windows.contains_key(&history_id));
    }

    #[test]
    fn test_selecting_from_history_menu_closes_it() {
        let (mut orchestrator, _clock) = create_test_orchestrator(&["a", "b"]);
        let _ = orchestrator.update(OrchestratorMessage::TrayEvent(TrayEvent::ShowHistory));
        let first = orchestrator.indicator().list()[0].id();

        let _ = orchestrator.update(OrchestratorMessage::HistoryMessage(
            HistoryViewMessage::Select(first),
        ));

        assert_eq!(selected_content(&orchestrator), Some("a".to_string()));
        assert!(orchestrator.history_window_id.is_none());
    }

    #[test]
    fn test_removing_from_history_menu_keeps_it_open() {
        let (mut orchestrator, _clock) = create_test_orchestrator(&["a", "b"]);
        let _ = orchestrator.update(OrchestratorMessage::TrayEvent(TrayEvent::ShowHistory));
        let first = orchestrator.indicator().list()[0].id();

        let _ = orchestrator.update(OrchestratorMessage::HistoryMessage(
            HistoryViewMessage::Remove(first),
        ));

        assert_eq!(orchestrator.indicator().list().len(), 1);
        assert!(orchestrator.history_window_id.is_some());
    }

    #[test]
    fn test_open_settings_twice_keeps_one_window() {
        let (mut orchestrator, _clock) = create_test_orchestrator(&[]);

        let _ = orchestrator.update(OrchestratorMessage::OpenSettings);
        let first_id = orchestrator.settings_window_id;
        let _ = orchestrator.update(OrchestratorMessage::OpenSettings);

        assert_eq!(orchestrator.settings_window_id, first_id);
        let settings_windows = orchestrator
            .windows
            .values()
            .filter(|window| matches!(window, AppWindow::Settings(_)))
            .count();
        assert_eq!(settings_windows, 1);
    }

    #[test]
    fn test_window_closed_clears_tracking() {
        let (mut orchestrator, _clock) = create_test_orchestrator(&[]);
        let _ = orchestrator.update(OrchestratorMessage::OpenSettings);
        let id = orchestrator.settings_window_id.unwrap();

        let _ = orchestrator.update(OrchestratorMessage::WindowClosed(id));

        assert!(orchestrator.settings_window_id.is_none());
        assert!(orchestrator.windows.is_empty());
    }

    #[test]
    fn test_notification_window_closes_after_expiry() {
        let (mut orchestrator, clock) = create_test_orchestrator(&["a", "b"]);
        let _ = orchestrator.update(OrchestratorMessage::KeyPressed(
            KeyChord::parse("Ctrl+F11").unwrap(),
        ));
        assert!(orchestrator.notification_window_id.is_some());

        clock.advance(std::time::Duration::from_millis(1000));
        let _ = orchestrator.update(OrchestratorMessage::Heartbeat);

        assert!(orchestrator.notification_window_id.is_none());
    }

    #[test]
    fn test_stale_clipboard_read_message_is_ignored() {
        let (mut orchestrator, clock) = create_test_orchestrator(&[]);
        clock.advance(std::time::Duration::from_millis(1000));
        let ticket = orchestrator.indicator.handle_heartbeat().unwrap();

        let _ = orchestrator.update(OrchestratorMessage::ClipboardRead(
            ticket,
            Ok(Some("copied".to_string())),
        ));
        let _ = orchestrator.update(OrchestratorMessage::ClipboardRead(
            ticket,
            Ok(Some("stale".to_string())),
        ));

        let contents: Vec<&str> = orchestrator
            .indicator()
            .list()
            .iter()
            .map(|entry| entry.content())
            .collect();
        assert_eq!(contents, vec!["copied"]);
    }

    #[test]
    fn test_failed_clipboard_read_message_changes_nothing() {
        let (mut orchestrator, clock) = create_test_orchestrator(&["a"]);
        clock.advance(std::time::Duration::from_millis(1000));
        let ticket = orchestrator.indicator.handle_heartbeat().unwrap();

        let _ = orchestrator.update(OrchestratorMessage::ClipboardRead(
            ticket,
            Err("clipboard unavailable".to_string()),
        ));

        assert_eq!(orchestrator.indicator().list().len(), 1);
    }

    #[test]
    fn test_shutdown_is_idempotent_and_silences_hotkeys() {
        let (mut orchestrator, _clock) = create_test_orchestrator(&["a", "b"]);

        orchestrator.shutdown();
        orchestrator.shutdown();
        let _ = orchestrator.update(OrchestratorMessage::KeyPressed(
            KeyChord::parse("Ctrl+F12").unwrap(),
        ));

        assert!(orchestrator.indicator().is_shut_down());
        assert_eq!(selected_content(&orchestrator), Some("b".to_string()));
    }
}
