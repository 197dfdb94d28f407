//! Object storage for uploaded images.
//!
//! Two key-naming policies coexist (see [`keys`]): a flat
//! timestamp-prefixed policy for untargeted uploads and a hierarchical
//! reference-scoped policy for uploads tied to a specific entity. All
//! backends implement the [`Storage`] trait; the production backend is S3
//! via the `object_store` crate, and an in-memory backend backs tests.

pub mod keys;
pub mod memory;
mod metadata;
mod s3;
mod traits;

pub use memory::InMemoryStorage;
pub use metadata::merge_object_metadata;
pub use s3::S3Storage;
pub use traits::{
    ByteStream, ObjectMetadata, Storage, StorageError, StorageResult, StoredObject,
};
