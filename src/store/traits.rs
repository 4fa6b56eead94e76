use crate::model::{Build, Release};

/// Failures surfaced by the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A record failed a storage precondition, e.g. a release with no builds.
    #[error("validation failed: {0}")]
    Validation(String),
    /// The requested object does not exist.
    #[error("no object at {0}")]
    NotFound(String),
    /// The underlying object store failed.
    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

/// A blob-style object store: whole-object writes and reads under string
/// keys. Any key-value or blob backend can satisfy this contract.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    async fn write(&self, path: &str, bytes: Vec<u8>) -> Result<(), StoreError>;
    async fn read(&self, path: &str) -> Result<Vec<u8>, StoreError>;
}

/// A data access layer which could in theory be implemented by a range of
/// backing data stores.
///
/// Concurrent saves targeting the same build version or release path are
/// last-write-wins; no conflict detection is performed here.
#[async_trait::async_trait]
pub trait DataStore: Send + Sync {
    /// Gets a build record for the specified product.
    async fn load_build(&self, product_id: &str, build_version: &str) -> Result<Build, StoreError>;

    /// Saves a build record for the specified product, both by ID and as a
    /// chronological date entry.
    async fn save_build(&self, product_id: &str, build: &Build) -> Result<(), StoreError>;

    /// Saves a release record, archiving all relevant information as a
    /// snapshot to give a stable history.
    async fn save_release(&self, release: &Release) -> Result<(), StoreError>;
}
