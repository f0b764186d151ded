use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::ports::HistoryRepository;
use crate::global_constants::{self, LOG_TAG_REGISTRY};

/// Registry file holding the history as a pretty-printed JSON array of
/// strings, oldest first.
pub struct JsonHistoryRepository {
    registry_path: PathBuf,
}

impl JsonHistoryRepository {
    pub fn build() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?
            .join(global_constants::APPLICATION_DIR_NAME);

        Ok(Self::at_path(
            data_dir.join(global_constants::REGISTRY_FILE_NAME),
        ))
    }

    pub fn at_path(registry_path: PathBuf) -> Self {
        log::debug!("{} using registry at {:?}", LOG_TAG_REGISTRY, registry_path);
        Self { registry_path }
    }

    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create registry directory: {}", parent.display())
            })?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, data)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
        fs::rename(&temp_path, path).with_context(|| {
            format!(
                "Failed to replace {} with {}",
                path.display(),
                temp_path.display()
            )
        })?;

        Ok(())
    }
}

impl HistoryRepository for JsonHistoryRepository {
    fn save(&self, contents: &[String]) -> Result<()> {
        let serialized =
            serde_json::to_string_pretty(contents).context("Failed to serialize registry")?;
        Self::write_atomic(&self.registry_path, serialized.as_bytes())?;

        log::debug!(
            "{} saved {} entries to {:?}",
            LOG_TAG_REGISTRY,
            contents.len(),
            self.registry_path
        );
        Ok(())
    }

    fn load(&self) -> Result<Vec<String>> {
        let raw = fs::read_to_string(&self.registry_path)
            .with_context(|| format!("Failed to read {}", self.registry_path.display()))?;
        let contents: Vec<String> = serde_json::from_str(&raw).with_context(|| {
            format!("Invalid registry JSON at {}", self.registry_path.display())
        })?;

        log::info!(
            "{} loaded {} entries from {:?}",
            LOG_TAG_REGISTRY,
            contents.len(),
            self.registry_path
        );
        Ok(contents)
    }
}
