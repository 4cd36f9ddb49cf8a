use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cas_crypto::DigestRegistry;
use cas_types::ObjectRef;
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncSeekExt, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::{BlobReader, BlobStore};

/// Filesystem blob store rooted at a single directory.
///
/// Writes go through a staging file in the blob's shard directory and are
/// renamed onto the final path only after the digest check passes. The rename
/// is the single point at which a blob becomes visible.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    digests: DigestRegistry,
}

impl FsBlobStore {
    /// Create a store rooted at `root` with the default digest registry.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_registry(root, DigestRegistry::default())
    }

    /// Create a store with a custom digest registry.
    pub fn with_registry(root: impl Into<PathBuf>, digests: DigestRegistry) -> Self {
        Self {
            root: root.into(),
            digests,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the committed blob for `oref` lives.
    pub fn blob_path(&self, oref: &ObjectRef) -> PathBuf {
        oref.final_path(&self.root)
    }

    /// Copy the body into the staging file, then rewind and hash it.
    async fn stage_and_verify(
        &self,
        oref: &ObjectRef,
        file: &mut File,
        body: &mut (dyn AsyncRead + Send + Unpin),
    ) -> StoreResult<u64> {
        let written = tokio::io::copy(body, file).await?;
        file.flush().await?;
        file.sync_all().await?;
        debug!(%oref, bytes = written, "staged upload");

        file.seek(SeekFrom::Start(0)).await?;
        let computed = self.digests.digest_reader(oref.family(), file).await?;
        if computed != oref.digest() {
            warn!(%oref, %computed, "uploaded content does not match its name");
            return Err(StoreError::DigestMismatch {
                oref: oref.clone(),
                computed,
            });
        }
        Ok(written)
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(
        &self,
        oref: &ObjectRef,
        body: &mut (dyn AsyncRead + Send + Unpin),
    ) -> StoreResult<u64> {
        if !self.digests.supports(oref.family()) {
            warn!(%oref, "no hasher registered for family");
            return Err(StoreError::Unsupported(oref.family()));
        }

        let dir = oref.shard_dir(&self.root);
        create_shard_dir(&dir).await?;

        // Dropping the TempPath removes the staging file.
        let (file, staged) = create_staging_file(oref, &dir).await?;
        let mut file = File::from_std(file);
        let written = match self.stage_and_verify(oref, &mut file, body).await {
            Ok(written) => written,
            Err(err) => {
                drop(file);
                debug!(staged = %staged.display(), "removing staging file");
                return Err(err);
            }
        };
        drop(file);

        let target = oref.final_path(&self.root);
        commit(staged, &target).await?;
        confirm(&target, written).await?;

        info!(%oref, bytes = written, "blob committed");
        Ok(written)
    }

    async fn open(&self, oref: &ObjectRef) -> StoreResult<Option<BlobReader>> {
        let path = oref.final_path(&self.root);
        let meta = match tokio::fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if !meta.is_file() {
            return Err(StoreError::Io(io::Error::other(format!(
                "{} is not a regular file",
                path.display()
            ))));
        }
        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(BlobReader {
            size: meta.len(),
            reader: Box::new(file),
        }))
    }

    async fn exists(&self, oref: &ObjectRef) -> StoreResult<bool> {
        match tokio::fs::metadata(oref.final_path(&self.root)).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, oref: &ObjectRef) -> StoreResult<bool> {
        match tokio::fs::remove_file(oref.final_path(&self.root)).await {
            Ok(()) => {
                info!(%oref, "blob deleted");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

async fn create_shard_dir(dir: &Path) -> io::Result<()> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o700);
    builder.create(dir).await
}

/// Exclusively create `<base>.tmp<random>` inside the shard directory.
async fn create_staging_file(oref: &ObjectRef, dir: &Path) -> io::Result<(std::fs::File, TempPath)> {
    let prefix = format!("{}.tmp", oref.file_base_name());
    let dir = dir.to_path_buf();
    let named = tokio::task::spawn_blocking(move || {
        tempfile::Builder::new().prefix(&prefix).tempfile_in(dir)
    })
    .await
    .map_err(io::Error::other)??;
    Ok(named.into_parts())
}

/// Rename the staging file onto `target`. On failure the staging file is
/// kept on disk.
async fn commit(staged: TempPath, target: &Path) -> StoreResult<()> {
    let staged_path = staged.to_path_buf();
    let target_path = target.to_path_buf();
    let result = tokio::task::spawn_blocking(move || {
        staged.persist(&target_path).map_err(|err| {
            let _ = err.path.keep();
            err.error
        })
    })
    .await
    .map_err(io::Error::other)?;

    result.map_err(|source| {
        error!(staged = %staged_path.display(), target = %target.display(), %source, "commit rename failed; staging file kept");
        StoreError::Commit {
            staged: staged_path,
            target: target.to_path_buf(),
            source,
        }
    })
}

/// Check that the committed path holds a regular file of the staged size.
/// An inconsistent file is left in place.
async fn confirm(target: &Path, written: u64) -> StoreResult<()> {
    let meta = tokio::fs::symlink_metadata(target).await?;
    let regular = meta.file_type().is_file();
    if !regular || meta.len() != written {
        error!(path = %target.display(), expected = written, actual = meta.len(), regular, "committed blob is inconsistent");
        return Err(StoreError::SizeMismatch {
            path: target.to_path_buf(),
            expected: written,
            actual: meta.len(),
            regular,
        });
    }
    Ok(())
}
