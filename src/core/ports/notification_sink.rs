use std::time::Duration;

/// Transient on-screen feedback. Only one notification is visible at a time;
/// showing a new one replaces the text and restarts the hide deadline.
pub trait NotificationSink: Send {
    fn show(&mut self, text: String, duration: Duration);

    fn current_text(&self) -> Option<&str>;

    /// Hides the notification once its deadline has passed.
    fn refresh(&mut self);

    fn dismiss(&mut self);
}
