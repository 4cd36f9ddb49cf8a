use std::collections::HashMap;

use cas_types::{HashFamily, ObjectRef};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{DigestError, DigestResult};
use crate::hasher::{Sha1Hasher, StreamingDigest};

/// Constructor for a fresh accumulator.
pub type HasherCtor = fn() -> Box<dyn StreamingDigest>;

const READ_CHUNK: usize = 64 * 1024;

/// Registry mapping each hash family to its hasher constructor.
///
/// Lookup failure is uniformly treated as "unsupported": callers must reject
/// the request before doing any I/O.
#[derive(Clone)]
pub struct DigestRegistry {
    hashers: HashMap<HashFamily, HasherCtor>,
}

impl DigestRegistry {
    /// A registry with no hashers at all.
    pub fn empty() -> Self {
        Self {
            hashers: HashMap::new(),
        }
    }

    /// Register (or replace) the hasher for `family`.
    pub fn register(&mut self, family: HashFamily, ctor: HasherCtor) -> &mut Self {
        self.hashers.insert(family, ctor);
        self
    }

    /// Returns `true` if a hasher is registered for `family`.
    pub fn supports(&self, family: HashFamily) -> bool {
        self.hashers.contains_key(&family)
    }

    /// A fresh accumulator for the reference's family, or `None` if the family
    /// has no hasher.
    pub fn new_hasher(&self, oref: &ObjectRef) -> Option<Box<dyn StreamingDigest>> {
        self.hasher_for(oref.family())
    }

    fn hasher_for(&self, family: HashFamily) -> Option<Box<dyn StreamingDigest>> {
        self.hashers.get(&family).map(|ctor| ctor())
    }

    /// Hash an in-memory buffer.
    pub fn digest_bytes(&self, family: HashFamily, data: &[u8]) -> Option<String> {
        let mut hasher = self.hasher_for(family)?;
        hasher.update(data);
        Some(hasher.finalize_hex())
    }

    /// Drain `reader` to EOF and return its hex digest under `family`.
    pub async fn digest_reader<R>(&self, family: HashFamily, reader: &mut R) -> DigestResult<String>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let mut hasher = self
            .hasher_for(family)
            .ok_or(DigestError::Unsupported(family))?;
        let mut buf = vec![0u8; READ_CHUNK];
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(hasher.finalize_hex())
    }

    /// Drain `reader` and compare its digest to the one `oref` declares.
    ///
    /// Comparison is exact string equality; hasher output is always lowercase.
    pub async fn verify<R>(&self, oref: &ObjectRef, reader: &mut R) -> DigestResult<bool>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let computed = self.digest_reader(oref.family(), reader).await?;
        Ok(computed == oref.digest())
    }
}

impl Default for DigestRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(HashFamily::Sha1, Sha1Hasher::boxed);
        registry
    }
}

impl std::fmt::Debug for DigestRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut families: Vec<_> = self.hashers.keys().map(HashFamily::name).collect();
        families.sort_unstable();
        f.debug_struct("DigestRegistry")
            .field("families", &families)
            .finish()
    }
}
