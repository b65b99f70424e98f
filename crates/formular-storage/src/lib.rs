//! Storage abstraction and backends for onboarding documents.
//!
//! Documents live under deterministic keys:
//! `{subsidiary_id}/{category}/{document_type}/{timestamp}_{sanitized_file_name}`.
//! Key generation is centralized in the `keys` module so all backends stay
//! consistent. Download access goes through time-limited signed URLs; only
//! the key (file path) is ever persisted.

pub mod factory;
pub mod keys;
pub mod local;
pub mod s3;
pub mod traits;

pub use factory::create_storage;
pub use formular_core::StorageBackend;
pub use keys::{document_key, sanitize_file_name};
pub use local::LocalStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
