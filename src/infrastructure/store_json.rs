use std::path::{Path, PathBuf};

use log::info;

use crate::{Dependent, DependentStore, StoreError};

/// A store keeping the harvested records of one target repository as a
/// single JSON array file, rewritten in full on every persist.
pub struct JsonFileStore {
    store_path: PathBuf,
}

impl JsonFileStore {
    /// Creates a new `JsonFileStore` instance writing to the given file.
    pub fn new(store_path: &Path) -> Self {
        Self {
            store_path: store_path.to_path_buf(),
        }
    }

    async fn write_all(&self, records: &[Dependent]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        tokio::fs::write(&self.store_path, content)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl DependentStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Dependent>, StoreError> {
        let content = tokio::fs::read_to_string(&self.store_path)
            .await
            .map_err(|e| StoreError::CorruptOrMissing(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| StoreError::CorruptOrMissing(e.to_string()))
    }

    async fn initialize(&self) -> Result<(), StoreError> {
        self.write_all(&[]).await
    }

    async fn append_deduped(&self, batch: &[Dependent]) -> Result<u32, StoreError> {
        let mut records = self.load().await?;
        let mut total_appended = 0;
        for dependent in batch {
            if records.contains(dependent) {
                info!("Already persisted {dependent}");
                continue;
            }
            info!("Persisted {dependent}");
            records.push(dependent.clone());
            total_appended += 1;
        }
        self.write_all(&records).await?;

        Ok(total_appended)
    }
}
