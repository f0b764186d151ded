use std::sync::Arc;

use iced::window::Id;
use iced::{Element, Task};

use crate::adapters::{
    ArboardClipboard, JsonHistoryRepository, NotificationBanner, SettingsWatcher, SystemClock,
};
use crate::core::models::UserSettings;
use crate::core::orchestrators::app_orchestrator::{AppOrchestrator, OrchestratorMessage};
use crate::core::orchestrators::ClipboardIndicator;
use crate::core::ports::{ClipboardPort, Clock, HistoryRepository};
use crate::global_constants::{HEARTBEAT_INTERVAL_MS, LOG_TAG_APP};
use crate::ports::{GlobalKeyboardListener, SystemTray};

pub struct ClipboardIndicatorApp {
    orchestrator: AppOrchestrator,
    _tray: Option<SystemTray>,
}

/// Registry that never persists anything, used when no data directory can
/// be resolved so the history still works for the session.
struct SessionOnlyRepository;

impl HistoryRepository for SessionOnlyRepository {
    fn save(&self, _contents: &[String]) -> anyhow::Result<()> {
        Ok(())
    }

    fn load(&self) -> anyhow::Result<Vec<String>> {
        Ok(Vec::new())
    }
}

impl ClipboardIndicatorApp {
    pub fn build() -> (Self, Task<OrchestratorMessage>) {
        log::info!("{} Initializing application", LOG_TAG_APP);

        let settings = UserSettings::load().unwrap_or_else(|e| {
            log::warn!("{} Failed to load settings: {:#}, using defaults", LOG_TAG_APP, e);
            UserSettings::default()
        });

        let repository: Arc<dyn HistoryRepository> = match JsonHistoryRepository::build() {
            Ok(repository) => Arc::new(repository),
            Err(e) => {
                log::error!(
                    "{} History will not be saved this session: {:#}",
                    LOG_TAG_APP,
                    e
                );
                Arc::new(SessionOnlyRepository)
            }
        };

        let clipboard: Arc<dyn ClipboardPort> = Arc::new(ArboardClipboard::initialize());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::initialize());

        let mut indicator = ClipboardIndicator::build(
            Arc::clone(&clipboard),
            repository,
            Box::new(NotificationBanner::build(Arc::clone(&clock))),
            clock,
            settings,
        );
        indicator.startup();

        let settings_watcher = match UserSettings::get_settings_file_path() {
            Ok(path) => Some(SettingsWatcher::watch(path)),
            Err(e) => {
                log::warn!("{} Settings file will not be watched: {:#}", LOG_TAG_APP, e);
                None
            }
        };

        let orchestrator = AppOrchestrator::build(indicator, clipboard, settings_watcher);

        let tray = match SystemTray::build() {
            Ok(tray) => {
                log::info!("{} System tray initialized successfully", LOG_TAG_APP);
                Some(tray)
            }
            Err(e) => {
                log::error!("{} Failed to initialize system tray: {}", LOG_TAG_APP, e);
                None
            }
        };

        (
            Self {
                orchestrator,
                _tray: tray,
            },
            Task::done(OrchestratorMessage::CreateHiddenWindow),
        )
    }

    pub fn handle_update(&mut self, message: OrchestratorMessage) -> Task<OrchestratorMessage> {
        self.orchestrator.update(message)
    }

    pub fn render_view(&self, window_id: Id) -> Element<'_, OrchestratorMessage> {
        self.orchestrator.render_view(window_id)
    }

    pub fn handle_subscription(&self) -> iced::Subscription<OrchestratorMessage> {
        use iced::window;

        let mut subscriptions = vec![
            iced::event::listen_with(|event, _status, id| {
                if let iced::Event::Window(window::Event::Closed) = event {
                    return Some(OrchestratorMessage::WindowClosed(id));
                }
                None
            }),
            iced::Subscription::run(|| {
                iced::stream::channel(
                    10,
                    |mut output: futures::channel::mpsc::Sender<OrchestratorMessage>| async move {
                        loop {
                            tokio::time::sleep(std::time::Duration::from_millis(
                                HEARTBEAT_INTERVAL_MS,
                            ))
                            .await;
                            if let Some(event) = SystemTray::poll_events() {
                                let _ = output.try_send(OrchestratorMessage::TrayEvent(event));
                            }
                            let _ = output.try_send(OrchestratorMessage::Heartbeat);
                        }
                    },
                )
            }),
        ];

        if !self.orchestrator.indicator().is_shut_down() {
            subscriptions.push(
                iced::Subscription::run(GlobalKeyboardListener::create_event_stream)
                    .map(OrchestratorMessage::KeyPressed),
            );
        }

        iced::Subscription::batch(subscriptions)
    }
}

impl Drop for ClipboardIndicatorApp {
    fn drop(&mut self) {
        self.orchestrator.shutdown();
    }
}
