use std::sync::Arc;

use anyhow::Result;

use crate::core::history::{format_entry_label, HistoryStore, PollTicket, Poller, SelectionController};
use crate::core::models::{EntryId, HistoryEntry, KeyChord, KeybindingAction, UserSettings};
use crate::core::orchestrators::keybinding_registry::KeybindingRegistry;
use crate::core::ports::{ClipboardPort, Clock, HistoryRepository, NotificationSink};
use crate::global_constants::{LOG_TAG_ORCHESTRATOR, USER_MESSAGE_HISTORY_CLEARED};

/// The clipboard history engine: one owned instance per process.
///
/// Every structural change to the history is followed by a full write of
/// the registry. Selection changes alone are not persisted.
pub struct ClipboardIndicator {
    store: HistoryStore,
    selection: SelectionController,
    poller: Poller,
    notifications: Box<dyn NotificationSink>,
    repository: Arc<dyn HistoryRepository>,
    clock: Arc<dyn Clock>,
    settings: UserSettings,
    keybindings: KeybindingRegistry,
    shut_down: bool,
}

impl ClipboardIndicator {
    pub fn build(
        clipboard: Arc<dyn ClipboardPort>,
        repository: Arc<dyn HistoryRepository>,
        notifications: Box<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
        settings: UserSettings,
    ) -> Self {
        let mut indicator = Self {
            store: HistoryStore::new(),
            selection: SelectionController::build(clipboard),
            poller: Poller::new(),
            notifications,
            repository,
            clock,
            settings: settings.sanitized(),
            keybindings: KeybindingRegistry::new(),
            shut_down: false,
        };
        indicator.sync_keybindings();
        indicator
    }

    /// Seeds the history from the registry and selects the newest entry
    /// without touching the clipboard. A missing or unreadable registry
    /// starts an empty history.
    pub fn startup(&mut self) {
        let loaded = match self.repository.load() {
            Ok(contents) => contents,
            Err(error) => {
                log::warn!(
                    "{} starting with empty history, registry not loaded: {:#}",
                    LOG_TAG_ORCHESTRATOR,
                    error
                );
                Vec::new()
            }
        };

        let loaded_count = loaded.len();
        for content in loaded.into_iter().filter(|content| !content.is_empty()) {
            self.store.add(content);
        }
        let had_duplicates = self.store.len() != loaded_count;
        let evicted = self.evict_to_capacity();

        self.selection.ensure_selection(&mut self.store);

        if had_duplicates || evicted > 0 {
            log::info!(
                "{} normalized loaded registry ({} empty or duplicate, {} evicted)",
                LOG_TAG_ORCHESTRATOR,
                loaded_count - self.store.len() - evicted,
                evicted
            );
            self.persist();
        }

        log::info!(
            "{} started with {} entries",
            LOG_TAG_ORCHESTRATOR,
            self.store.len()
        );
    }

    /// Advances timers. Returns a ticket when a clipboard read should start.
    pub fn handle_heartbeat(&mut self) -> Option<PollTicket> {
        self.notifications.refresh();
        self.poller
            .begin_poll(self.clock.now(), self.settings.poll_interval())
    }

    /// Completes a poll cycle. Returns true when a new entry was recorded.
    pub fn handle_clipboard_read(
        &mut self,
        ticket: PollTicket,
        result: Result<Option<String>>,
    ) -> bool {
        if !self.poller.complete_poll(ticket) {
            return false;
        }

        let text = match result {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => return false,
            Err(error) => {
                log::debug!("{} clipboard read failed: {:#}", LOG_TAG_ORCHESTRATOR, error);
                return false;
            }
        };

        if self.store.contains_content(&text) {
            return false;
        }

        let (id, inserted) = self.store.add(text);
        if !inserted {
            return false;
        }

        self.selection.select(&mut self.store, id, false);
        self.evict_to_capacity();
        self.selection.ensure_selection(&mut self.store);
        self.persist();

        log::info!("{} recorded new clipboard entry {}", LOG_TAG_ORCHESTRATOR, id);
        true
    }

    pub fn action_for_chord(&self, chord: &KeyChord) -> Option<KeybindingAction> {
        if self.shut_down {
            return None;
        }
        self.keybindings.action_for(chord)
    }

    pub fn clear_history(&mut self) {
        self.remove_all_except_selected();
        self.notify(USER_MESSAGE_HISTORY_CLEARED.to_string());
    }

    pub fn previous_entry(&mut self) {
        let outcome = self.selection.previous(&mut self.store);
        self.announce_navigation(outcome);
    }

    pub fn next_entry(&mut self) {
        let outcome = self.selection.next(&mut self.store);
        self.announce_navigation(outcome);
    }

    pub fn list(&self) -> &[HistoryEntry] {
        self.store.list()
    }

    pub fn selected(&self) -> Option<EntryId> {
        self.selection.selected()
    }

    /// Inserts content as if it had been observed on the clipboard, without
    /// changing which entry is selected (unless the history was empty).
    pub fn add(&mut self, content: String) -> (EntryId, bool) {
        let (id, inserted) = self.store.add(content);
        if inserted {
            self.evict_to_capacity();
            self.selection.ensure_selection(&mut self.store);
            self.persist();
        }
        (id, inserted)
    }

    /// Removes one entry. Returns whether it was the selected one; removing
    /// the selection moves it to the newest remaining entry.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let Some(removed) = self.store.remove(id) else {
            return false;
        };

        if removed.selected {
            self.selection.forget(id);
            self.selection.ensure_selection(&mut self.store);
        }
        self.persist();

        removed.selected
    }

    /// Selects an entry and writes its content to the clipboard.
    pub fn select(&mut self, id: EntryId) -> bool {
        self.selection.select(&mut self.store, id, true)
    }

    pub fn remove_all_except_selected(&mut self) {
        let removed = self.store.remove_all_except_selected();
        for entry in &removed {
            self.selection.forget(entry.id());
        }
        self.persist();
    }

    pub fn entry_label(&self, entry: &HistoryEntry) -> String {
        format_entry_label(entry.content(), self.settings.preview_size)
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    /// Swaps in new settings. Capacity, labels, poll interval and hotkeys
    /// all follow immediately.
    pub fn apply_settings(&mut self, settings: UserSettings) {
        let settings = settings.sanitized();
        if settings == self.settings {
            return;
        }

        let keybindings_changed = settings.keybindings != self.settings.keybindings
            || settings.enable_keybinding != self.settings.enable_keybinding;
        self.settings = settings;

        log::info!(
            "{} applying settings (interval {}ms, history size {})",
            LOG_TAG_ORCHESTRATOR,
            self.settings.interval,
            self.settings.history_size
        );

        if self.evict_to_capacity() > 0 {
            self.selection.ensure_selection(&mut self.store);
            self.persist();
        }

        if keybindings_changed {
            self.sync_keybindings();
        }
    }

    pub fn notification_text(&self) -> Option<&str> {
        self.notifications.current_text()
    }

    /// Stops polling, hides the notification and releases hotkeys. Safe to
    /// call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        self.poller.stop();
        self.notifications.dismiss();
        self.keybindings.unbind_all();

        log::info!("{} shut down", LOG_TAG_ORCHESTRATOR);
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    fn sync_keybindings(&mut self) {
        if self.shut_down || !self.settings.enable_keybinding {
            self.keybindings.unbind_all();
            return;
        }
        self.keybindings.bind_all(&self.settings.keybindings);
    }

    fn evict_to_capacity(&mut self) -> usize {
        let evicted = self.store.evict_oldest(self.settings.history_size);
        for entry in &evicted {
            self.selection.forget(entry.id());
        }
        evicted.len()
    }

    fn announce_navigation(&mut self, outcome: Option<crate::core::history::NavigationOutcome>) {
        let Some(outcome) = outcome else {
            return;
        };
        let Some(entry) = self.store.find(outcome.entry_id) else {
            return;
        };

        let message = format!(
            "{} / {}: {}",
            outcome.position,
            outcome.total,
            self.entry_label(entry)
        );
        self.notify(message);
    }

    fn notify(&mut self, text: String) {
        if self.shut_down {
            return;
        }
        self.notifications.show(text, self.settings.poll_interval());
    }

    fn persist(&self) {
        if let Err(error) = self.repository.save(&self.store.contents()) {
            log::error!(
                "{} failed to save registry, will retry on next change: {:#}",
                LOG_TAG_ORCHESTRATOR,
                error
            );
        }
    }
}
