pub mod api;
pub mod config;
pub mod model;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export all model types
pub use model::*;

// Export store types
pub use store::{
    BlobDataStore, DataStore, FsObjectStore, MemoryObjectStore, ObjectStore, StoreError,
};
