mod clipboard_port;
mod clock;
mod history_repository;
mod notification_sink;

pub use clipboard_port::ClipboardPort;
pub use clock::Clock;
pub use history_repository::HistoryRepository;
pub use notification_sink::NotificationSink;
