use crate::core::models::{EntryId, HistoryEntry};
use crate::global_constants::LOG_TAG_HISTORY;

/// Ordered clipboard history, oldest first. Contents are unique.
///
/// The store only tracks structure. Selection flags are flipped by
/// [`SelectionController`](super::SelectionController) and persistence is
/// triggered by whoever owns both the store and the repository.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    next_id: u64,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `content` unless an entry with identical content exists
    /// anywhere in the store. An existing duplicate is neither moved nor
    /// re-selected.
    pub fn add(&mut self, content: String) -> (EntryId, bool) {
        if let Some(existing) = self.entries.iter().find(|e| e.content() == content) {
            log::debug!(
                "{} content already present as {}, not inserting",
                LOG_TAG_HISTORY,
                existing.id()
            );
            return (existing.id(), false);
        }

        let id = EntryId::from_raw(self.next_id);
        self.next_id += 1;
        self.entries.push(HistoryEntry::build(id, content));

        log::debug!(
            "{} added entry {} (now {} entries)",
            LOG_TAG_HISTORY,
            id,
            self.entries.len()
        );

        (id, true)
    }

    /// Removes the entry and hands it back; `None` when it is not present.
    /// The returned entry's `selected` flag tells whether it was the
    /// selected one.
    pub fn remove(&mut self, id: EntryId) -> Option<HistoryEntry> {
        let index = self.position_of(id)?;
        let removed = self.entries.remove(index);

        log::debug!(
            "{} removed entry {} (selected: {})",
            LOG_TAG_HISTORY,
            removed.id(),
            removed.selected
        );

        Some(removed)
    }

    /// Keeps only the selected entry. With no selection the store ends up
    /// empty.
    pub fn remove_all_except_selected(&mut self) -> Vec<HistoryEntry> {
        let (kept, removed): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.entries)
                .into_iter()
                .partition(|entry| entry.selected);
        self.entries = kept;

        log::debug!(
            "{} cleared {} entries, {} kept",
            LOG_TAG_HISTORY,
            removed.len(),
            self.entries.len()
        );

        removed
    }

    /// Drops entries from the front one at a time until `len <= capacity`.
    /// Evicted entries are returned oldest first.
    pub fn evict_oldest(&mut self, capacity: usize) -> Vec<HistoryEntry> {
        let mut evicted = Vec::new();

        while self.entries.len() > capacity {
            let oldest = self.entries.remove(0);
            log::debug!("{} evicted oldest entry {}", LOG_TAG_HISTORY, oldest.id());
            evicted.push(oldest);
        }

        evicted
    }

    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn contents(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.content().to_string())
            .collect()
    }

    pub fn find(&self, id: EntryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub(crate) fn find_mut(&mut self, id: EntryId) -> Option<&mut HistoryEntry> {
        self.entries.iter_mut().find(|entry| entry.id() == id)
    }

    pub fn position_of(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    pub fn entry_at(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn newest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn contains_content(&self, content: &str) -> bool {
        self.entries.iter().any(|entry| entry.content() == content)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(contents: &[&str]) -> HistoryStore {
        let mut store = HistoryStore::new();
        for content in contents {
            store.add(content.to_string());
        }
        store
    }

    #[test]
    fn test_add_appends_new_content_at_tail() {
        let mut store = store_with(&["a", "b"]);

        let (id, inserted) = store.add("c".to_string());

        assert!(inserted);
        assert_eq!(store.contents(), vec!["a", "b", "c"]);
        assert_eq!(store.newest().unwrap().id(), id);
    }

    #[test]
    fn test_add_duplicate_anywhere_leaves_store_unchanged() {
        let mut store = store_with(&["a", "b", "c"]);
        let existing_id = store.entry_at(1).unwrap().id();

        let (id, inserted) = store.add("b".to_string());

        assert!(!inserted);
        assert_eq!(id, existing_id);
        assert_eq!(store.contents(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_add_never_produces_duplicate_contents() {
        let mut store = HistoryStore::new();
        for content in ["x", "y", "x", "z", "y", "x", "z"] {
            store.add(content.to_string());
        }

        let mut contents = store.contents();
        contents.sort();
        contents.dedup();
        assert_eq!(contents.len(), store.len());
        assert_eq!(store.contents(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_add_uses_exact_string_equality() {
        let mut store = store_with(&["hello"]);

        let (_, inserted) = store.add("hello ".to_string());

        assert!(inserted);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut store = store_with(&["a"]);
        let first_id = store.entry_at(0).unwrap().id();
        store.remove(first_id);

        let (second_id, _) = store.add("a".to_string());

        assert_ne!(first_id, second_id);
    }

    #[test]
    fn test_remove_absent_entry_is_noop() {
        let mut store = store_with(&["a"]);

        let removed = store.remove(EntryId::from_raw(99));

        assert!(removed.is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_reports_selected_flag() {
        let mut store = store_with(&["a", "b"]);
        let id = store.entry_at(1).unwrap().id();
        store.find_mut(id).unwrap().selected = true;

        let removed = store.remove(id).unwrap();

        assert!(removed.selected);
        assert_eq!(store.contents(), vec!["a"]);
    }

    #[test]
    fn test_remove_all_except_selected_keeps_only_selected() {
        let mut store = store_with(&["a", "b", "c"]);
        let id = store.entry_at(1).unwrap().id();
        store.find_mut(id).unwrap().selected = true;

        let removed = store.remove_all_except_selected();

        assert_eq!(removed.len(), 2);
        assert_eq!(store.contents(), vec!["b"]);
        assert!(store.entry_at(0).unwrap().selected);
    }

    #[test]
    fn test_remove_all_except_selected_without_selection_empties_store() {
        let mut store = store_with(&["a", "b"]);

        store.remove_all_except_selected();

        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_all_except_selected_on_empty_store_is_noop() {
        let mut store = HistoryStore::new();

        let removed = store.remove_all_except_selected();

        assert!(removed.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_evict_oldest_removes_smallest_insertion_index_first() {
        let mut store = store_with(&["a", "b", "c", "d"]);

        let evicted = store.evict_oldest(2);

        let evicted_contents: Vec<&str> = evicted.iter().map(|e| e.content()).collect();
        assert_eq!(evicted_contents, vec!["a", "b"]);
        assert_eq!(store.contents(), vec!["c", "d"]);
    }

    #[test]
    fn test_evict_oldest_within_capacity_is_noop() {
        let mut store = store_with(&["a", "b"]);

        let evicted = store.evict_oldest(5);

        assert!(evicted.is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_sequential_add_with_eviction_keeps_newest() {
        let mut store = HistoryStore::new();

        for content in ["a", "b", "c"] {
            store.add(content.to_string());
            store.evict_oldest(2);
            assert!(store.len() <= 2);
        }

        assert_eq!(store.contents(), vec!["b", "c"]);
    }
}
