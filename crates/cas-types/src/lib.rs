//! Foundation types for the cas blob store.
//!
//! Every blob is named by the digest of its own content. This crate owns the
//! naming scheme: parsing request paths into an [`ObjectRef`] and rendering an
//! [`ObjectRef`] back into the sharded on-disk location of its blob. Every other
//! cas crate depends on `cas-types`.
//!
//! # Key Types
//!
//! - [`HashFamily`] -- Whitelisted digest algorithm and its expected hex length
//! - [`ObjectRef`] -- Parsed `<family>-<digest>` pair identifying one blob

pub mod error;
pub mod family;
pub mod object;

pub use error::{TypeError, TypeResult};
pub use family::HashFamily;
pub use object::ObjectRef;
