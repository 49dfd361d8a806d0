// Service exports
pub mod api;
pub mod directory;
pub mod storage;

pub use api::{ApiClient, ApiError, ApiStatus};
pub use directory::{DiscoverFilter, ProfileDirectory};
pub use storage::{Storage, StorageError, StorageKey, RECORD_VERSION};
