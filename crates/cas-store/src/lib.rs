//! Content-addressed blob storage for the cas blob store.
//!
//! Every blob lives at a path derived from its own name:
//! `<root>/<d[0:3]>/<d[3:6]>/<family>-<digest>.dat`. A blob becomes visible
//! at that path only after its content has been verified against the name.
//!
//! # Storage Backends
//!
//! All backends implement the [`BlobStore`] trait:
//!
//! - [`FsBlobStore`] -- local filesystem store with staged, verified writes
//!
//! # Design Rules
//!
//! 1. A blob is never observable under its name unless it is complete and
//!    its digest matches the name.
//! 2. Write-verify-rename: stage into a unique temp file, hash it, then rename.
//! 3. Failures before the rename always remove the staging file.
//! 4. Failures at or after the rename leave files in place for offline repair.
//! 5. Concurrent reads are always safe (blobs are immutable).
//! 6. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use fs::FsBlobStore;
pub use traits::{BlobReader, BlobStore};
