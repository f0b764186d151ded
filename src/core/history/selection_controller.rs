use std::sync::Arc;

use crate::core::history::HistoryStore;
use crate::core::models::EntryId;
use crate::core::ports::ClipboardPort;
use crate::global_constants::LOG_TAG_SELECTION;

/// Result of a Next/Previous step. `position` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationOutcome {
    pub entry_id: EntryId,
    pub position: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Keeps exactly one entry selected while the store is non-empty.
///
/// The selected id is held here so a selection change only touches the
/// previously selected entry and the newly selected one.
pub struct SelectionController {
    clipboard: Arc<dyn ClipboardPort>,
    selected: Option<EntryId>,
}

impl SelectionController {
    pub fn build(clipboard: Arc<dyn ClipboardPort>) -> Self {
        Self {
            clipboard,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<EntryId> {
        self.selected
    }

    /// Marks `id` as the only selected entry. With `auto_set_clipboard` the
    /// entry's content is also written to the system clipboard. Returns
    /// false when `id` is not in the store.
    pub fn select(&mut self, store: &mut HistoryStore, id: EntryId, auto_set_clipboard: bool) -> bool {
        let Some(entry) = store.find(id) else {
            log::debug!("{} cannot select missing entry {}", LOG_TAG_SELECTION, id);
            return false;
        };

        if auto_set_clipboard {
            if let Err(error) = self.clipboard.write_text(entry.content()) {
                log::error!(
                    "{} failed to write entry {} to clipboard: {}",
                    LOG_TAG_SELECTION,
                    id,
                    error
                );
            }
        }

        if let Some(previous) = self.selected.filter(|previous| *previous != id) {
            if let Some(previous_entry) = store.find_mut(previous) {
                previous_entry.selected = false;
            }
        }

        if let Some(entry) = store.find_mut(id) {
            entry.selected = true;
        }
        self.selected = Some(id);

        log::debug!(
            "{} selected entry {} (clipboard written: {})",
            LOG_TAG_SELECTION,
            id,
            auto_set_clipboard
        );
        true
    }

    pub fn next(&mut self, store: &mut HistoryStore) -> Option<NavigationOutcome> {
        self.step(store, Direction::Forward)
    }

    pub fn previous(&mut self, store: &mut HistoryStore) -> Option<NavigationOutcome> {
        self.step(store, Direction::Backward)
    }

    /// Drops the remembered selection if it points at `id`.
    pub fn forget(&mut self, id: EntryId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Restores the single-selection invariant after structural changes:
    /// when nothing valid is selected, the newest entry is selected without
    /// touching the clipboard.
    pub fn ensure_selection(&mut self, store: &mut HistoryStore) {
        if let Some(id) = self.selected {
            if store.find(id).is_some() {
                return;
            }
            self.selected = None;
        }

        if let Some(newest) = store.newest().map(|entry| entry.id()) {
            log::debug!(
                "{} no valid selection, falling back to newest entry {}",
                LOG_TAG_SELECTION,
                newest
            );
            self.select(store, newest, false);
        }
    }

    fn step(&mut self, store: &mut HistoryStore, direction: Direction) -> Option<NavigationOutcome> {
        let total = store.len();
        if total == 0 {
            return None;
        }

        let current = store.position_of(self.selected?)?;
        let target = match direction {
            Direction::Forward => (current + 1) % total,
            Direction::Backward => (current + total - 1) % total,
        };

        let entry_id = store.entry_at(target)?.id();
        self.select(store, entry_id, true);

        Some(NavigationOutcome {
            entry_id,
            position: target + 1,
            total,
        })
    }
}
