use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use arboard::Clipboard;
use async_trait::async_trait;

use crate::core::ports::ClipboardPort;
use crate::global_constants::LOG_TAG_CLIPBOARD;

/// System clipboard through arboard. The handle is kept alive for the whole
/// process because on X11/Wayland the owning process serves the contents.
pub struct ArboardClipboard {
    clipboard: Arc<Mutex<Option<Clipboard>>>,
}

impl ArboardClipboard {
    pub fn initialize() -> Self {
        log::debug!("{} initializing clipboard adapter", LOG_TAG_CLIPBOARD);
        Self {
            clipboard: Arc::new(Mutex::new(None)),
        }
    }

    fn with_clipboard<T>(
        slot: &Mutex<Option<Clipboard>>,
        operation: impl FnOnce(&mut Clipboard) -> Result<T, arboard::Error>,
    ) -> Result<T> {
        let mut guard = slot
            .lock()
            .map_err(|error| anyhow!("Clipboard mutex poisoned: {}", error))?;

        if guard.is_none() {
            let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
            *guard = Some(clipboard);
        }

        let clipboard = guard
            .as_mut()
            .ok_or_else(|| anyhow!("Clipboard unavailable"))?;

        operation(clipboard).map_err(anyhow::Error::new)
    }

    fn read_text_blocking(slot: &Mutex<Option<Clipboard>>) -> Result<Option<String>> {
        match Self::with_clipboard(slot, |clipboard| clipboard.get_text()) {
            Ok(text) if text.is_empty() => Ok(None),
            Ok(text) => Ok(Some(text)),
            Err(error) => match error.downcast_ref::<arboard::Error>() {
                Some(arboard::Error::ContentNotAvailable) => Ok(None),
                _ => Err(error),
            },
        }
    }
}

#[async_trait]
impl ClipboardPort for ArboardClipboard {
    async fn read_text(&self) -> Result<Option<String>> {
        let slot = Arc::clone(&self.clipboard);

        tokio::task::spawn_blocking(move || Self::read_text_blocking(&slot))
            .await
            .context("Clipboard read task failed")?
    }

    fn write_text(&self, text: &str) -> Result<()> {
        log::debug!(
            "{} writing {} characters to clipboard",
            LOG_TAG_CLIPBOARD,
            text.chars().count()
        );

        Self::with_clipboard(&self.clipboard, |clipboard| {
            clipboard.set_text(text.to_string())
        })
        .context("Failed to copy text to clipboard")
    }
}
