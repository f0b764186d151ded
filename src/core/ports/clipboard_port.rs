use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ClipboardPort: Send + Sync {
    /// Current clipboard text, `None` when the clipboard holds no text.
    async fn read_text(&self) -> Result<Option<String>>;

    fn write_text(&self, text: &str) -> Result<()>;
}
