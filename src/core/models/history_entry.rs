use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(u64);

impl EntryId {
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One clipboard snapshot. `content` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    id: EntryId,
    content: String,
    pub selected: bool,
}

impl HistoryEntry {
    pub fn build(id: EntryId, content: String) -> Self {
        Self {
            id,
            content,
            selected: false,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_creates_unselected_entry() {
        let entry = HistoryEntry::build(EntryId::from_raw(7), "hello".to_string());

        assert_eq!(entry.id().value(), 7);
        assert_eq!(entry.content(), "hello");
        assert!(!entry.selected);
    }

    #[test]
    fn test_entry_id_display_uses_hash_prefix() {
        assert_eq!(EntryId::from_raw(3).to_string(), "#3");
    }
}
