use async_trait::async_trait;
use cas_types::ObjectRef;
use tokio::io::AsyncRead;

use crate::error::StoreResult;

/// An open blob ready to be streamed.
pub struct BlobReader {
    /// Size of the blob when it was opened.
    pub size: u64,
    /// The blob's content.
    pub reader: Box<dyn AsyncRead + Send + Unpin>,
}

impl std::fmt::Debug for BlobReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobReader").field("size", &self.size).finish()
    }
}

/// Content-addressed blob store.
///
/// All implementations must satisfy these invariants:
/// - A blob is visible under its name only if it is complete and its content
///   hashes to that name.
/// - Blobs are immutable once written; re-writing a name with the same
///   content is a no-op from a reader's point of view.
/// - Concurrent reads are always safe.
/// - All I/O errors are propagated, never silently ignored.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stream `body` into the store under `oref`, verifying it on the way.
    ///
    /// Returns the number of bytes committed. Fails with
    /// [`StoreError::DigestMismatch`](crate::StoreError::DigestMismatch) when
    /// the content does not hash to `oref`, in which case nothing becomes
    /// visible under the name.
    async fn put(
        &self,
        oref: &ObjectRef,
        body: &mut (dyn AsyncRead + Send + Unpin),
    ) -> StoreResult<u64>;

    /// Open a blob for reading.
    ///
    /// Returns `Ok(None)` if the blob does not exist.
    /// Returns `Err` on any other I/O failure.
    async fn open(&self, oref: &ObjectRef) -> StoreResult<Option<BlobReader>>;

    /// Check whether a blob exists in the store.
    async fn exists(&self, oref: &ObjectRef) -> StoreResult<bool>;

    /// Delete a blob. Returns `true` if the blob existed.
    ///
    /// This is intended for offline maintenance only; no request path
    /// deletes blobs.
    async fn delete(&self, oref: &ObjectRef) -> StoreResult<bool>;
}
