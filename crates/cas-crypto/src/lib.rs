//! Digest engine for the cas blob store.
//!
//! Maps each [`HashFamily`](cas_types::HashFamily) to a streaming hasher and
//! checks uploaded content against the digest its name declares.
//!
//! All digests wrap established libraries -- no custom cryptography.

pub mod error;
pub mod hasher;
pub mod registry;

pub use error::{DigestError, DigestResult};
pub use hasher::{Sha1Hasher, StreamingDigest};
pub use registry::{DigestRegistry, HasherCtor};
