use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// A whitelisted digest algorithm.
///
/// The variant list is the codec's whitelist: a name that does not map to a
/// variant never parses. Each family carries its own digest length rule, so
/// adding a family means adding a variant plus its length here and a hasher in
/// `cas-crypto`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashFamily {
    /// SHA-1, 20-byte digest rendered as 40 hex characters.
    Sha1,
}

impl HashFamily {
    /// Every family the codec recognises.
    pub const ALL: &'static [HashFamily] = &[HashFamily::Sha1];

    /// Lowercase identifier used in object names (`sha1`).
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
        }
    }

    /// Expected length of the lowercase hex digest.
    pub const fn hex_len(&self) -> usize {
        match self {
            Self::Sha1 => 40,
        }
    }

    /// Whether the store can hash content for this family.
    pub const fn is_supported(&self) -> bool {
        match self {
            Self::Sha1 => true,
        }
    }

    /// Look up a family by its identifier. Matching is case-sensitive.
    pub fn from_name(name: &str) -> TypeResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|family| family.name() == name)
            .ok_or_else(|| TypeError::UnknownFamily(name.to_string()))
    }
}

impl fmt::Display for HashFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
