use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::ports::{Clock, NotificationSink};
use crate::global_constants::LOG_TAG_NOTIFICATION;

struct PendingNotification {
    text: String,
    hide_at: Instant,
}

/// Notification state rendered by the notification window. The hide timer
/// is a deadline checked against the clock on every heartbeat.
pub struct NotificationBanner {
    clock: Arc<dyn Clock>,
    pending: Option<PendingNotification>,
}

impl NotificationBanner {
    pub fn build(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            pending: None,
        }
    }
}

impl NotificationSink for NotificationBanner {
    fn show(&mut self, text: String, duration: Duration) {
        if self.pending.is_some() {
            log::debug!("{} replacing pending notification", LOG_TAG_NOTIFICATION);
        }
        log::info!("{} {}", LOG_TAG_NOTIFICATION, text);

        self.pending = Some(PendingNotification {
            text,
            hide_at: self.clock.now() + duration,
        });
    }

    fn current_text(&self) -> Option<&str> {
        self.pending
            .as_ref()
            .filter(|pending| self.clock.now() < pending.hide_at)
            .map(|pending| pending.text.as_str())
    }

    fn refresh(&mut self) {
        let expired = self
            .pending
            .as_ref()
            .is_some_and(|pending| self.clock.now() >= pending.hide_at);

        if expired {
            log::debug!("{} hiding notification", LOG_TAG_NOTIFICATION);
            self.pending = None;
        }
    }

    fn dismiss(&mut self) {
        self.pending = None;
    }
}
