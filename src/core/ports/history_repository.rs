use anyhow::Result;

/// Durable storage for the ordered list of history contents, oldest first.
pub trait HistoryRepository: Send + Sync {
    fn save(&self, contents: &[String]) -> Result<()>;

    fn load(&self) -> Result<Vec<String>>;
}
