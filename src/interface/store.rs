use crate::{Dependent, StoreError};

/// A trait for persisting the harvested record sequence of one target repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DependentStore: Sync + Send {
    /// Reads the full persisted record sequence.
    async fn load(&self) -> Result<Vec<Dependent>, StoreError>;

    /// Writes an empty record sequence, discarding any existing content.
    async fn initialize(&self) -> Result<(), StoreError>;

    /// Appends the batch records not already persisted and returns the number appended.
    async fn append_deduped(&self, batch: &[Dependent]) -> Result<u32, StoreError>;
}
