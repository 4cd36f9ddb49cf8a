use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{TypeError, TypeResult};
use crate::family::HashFamily;

/// Suffix of every committed blob file.
pub const BLOB_FILE_EXTENSION: &str = "dat";

/// Self-verifying name of one blob: a hash family plus the lowercase hex
/// digest the blob's content must hash to.
///
/// An `ObjectRef` can only be obtained through parsing, so its digest always
/// has the length its family requires.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    family: HashFamily,
    digest: String,
}

impl ObjectRef {
    /// Parse a request path of the form `/<namespace>/<family>-<digest>`.
    ///
    /// The namespace is a single non-empty segment of ASCII alphanumerics,
    /// `-` or `_`; it does not participate in addressing.
    ///
    /// ```
    /// use cas_types::{HashFamily, ObjectRef};
    ///
    /// let path = "/camli/sha1-0beec7b5ea3f0fdbc95d0dd47f3c5bc275da8a33";
    /// let oref = ObjectRef::parse(path).unwrap();
    /// assert_eq!(oref.family(), HashFamily::Sha1);
    /// assert!(ObjectRef::parse("/camli/sha1-abc").is_err());
    /// ```
    pub fn parse(path: &str) -> TypeResult<Self> {
        let malformed = || TypeError::MalformedPath(path.to_string());

        let rest = path.strip_prefix('/').ok_or_else(malformed)?;
        let (namespace, name) = rest.split_once('/').ok_or_else(malformed)?;
        if !is_valid_namespace(namespace) || name.contains('/') {
            return Err(malformed());
        }
        Self::from_name(name)
    }

    /// Parse a bare `<family>-<digest>` name.
    pub fn from_name(name: &str) -> TypeResult<Self> {
        let (family, digest) = name
            .split_once('-')
            .filter(|(family, digest)| !family.is_empty() && !digest.is_empty())
            .ok_or_else(|| TypeError::MalformedPath(name.to_string()))?;

        let family = HashFamily::from_name(family)?;
        if !digest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(TypeError::InvalidHex(digest.to_string()));
        }
        if digest.len() != family.hex_len() {
            return Err(TypeError::InvalidLength {
                family: family.name(),
                expected: family.hex_len(),
                actual: digest.len(),
            });
        }

        Ok(Self {
            family,
            digest: digest.to_string(),
        })
    }

    pub fn family(&self) -> HashFamily {
        self.family
    }

    /// The lowercase hex digest.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Returns `true` if the store can verify content for this reference.
    pub fn is_supported(&self) -> bool {
        self.family.is_supported()
    }

    /// Two-level shard directory under `root`: `<d[0:3]>/<d[3:6]>`.
    pub fn shard_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.digest[0..3]).join(&self.digest[3..6])
    }

    /// Location of the committed blob under `root`.
    pub fn final_path(&self, root: &Path) -> PathBuf {
        self.shard_dir(root).join(self.file_base_name())
    }

    /// `<family>-<digest>.dat`, also the prefix seed for staging files.
    pub fn file_base_name(&self) -> String {
        format!("{}-{}.{BLOB_FILE_EXTENSION}", self.family, self.digest)
    }
}

fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({self})")
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.family, self.digest)
    }
}

impl FromStr for ObjectRef {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HELLO_SHA1: &str = "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d";

    #[test]
    fn parse_valid_path() {
        let oref = ObjectRef::parse(&format!("/camli/sha1-{HELLO_SHA1}")).unwrap();
        assert_eq!(oref.family(), HashFamily::Sha1);
        assert_eq!(oref.digest(), HELLO_SHA1);
        assert!(oref.is_supported());
    }

    #[test]
    fn parse_accepts_any_namespace_segment() {
        assert!(ObjectRef::parse(&format!("/ns/sha1-{HELLO_SHA1}")).is_ok());
        assert!(ObjectRef::parse(&format!("/my_store-2/sha1-{HELLO_SHA1}")).is_ok());
    }

    #[test]
    fn parse_rejects_short_digest() {
        let err = ObjectRef::parse("/ns/sha1-abc").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                family: "sha1",
                expected: 40,
                actual: 3
            }
        );
    }

    #[test]
    fn parse_rejects_long_digest() {
        let path = format!("/ns/sha1-{HELLO_SHA1}00");
        assert!(matches!(
            ObjectRef::parse(&path),
            Err(TypeError::InvalidLength { actual: 42, .. })
        ));
    }

    #[test]
    fn parse_rejects_uppercase_hex() {
        let path = format!("/ns/sha1-{}", HELLO_SHA1.to_uppercase());
        assert!(matches!(ObjectRef::parse(&path), Err(TypeError::InvalidHex(_))));
    }

    #[test]
    fn parse_rejects_non_hex() {
        let digest = "g".repeat(40);
        assert!(matches!(
            ObjectRef::parse(&format!("/ns/sha1-{digest}")),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn parse_rejects_unknown_family() {
        assert!(matches!(
            ObjectRef::parse(&format!("/ns/md5-{HELLO_SHA1}")),
            Err(TypeError::UnknownFamily(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        for path in [
            "",
            "/",
            "/ns",
            "/ns/",
            "ns/sha1-abc",
            "//sha1-abc",
            "/ns/sha1-",
            "/ns/-abc",
            "/ns/sha1",
            "/a/b/sha1-abc",
            "/n s/sha1-abc",
        ] {
            assert!(ObjectRef::parse(path).is_err(), "{path:?} should not parse");
        }
        let trailing = format!("/ns/sha1-{HELLO_SHA1}/");
        assert!(ObjectRef::parse(&trailing).is_err());
    }

    #[test]
    fn layout_paths() {
        let oref: ObjectRef = format!("sha1-{HELLO_SHA1}").parse().unwrap();
        let root = Path::new("/srv/blobs");
        assert_eq!(oref.shard_dir(root), PathBuf::from("/srv/blobs/aaf/4c6"));
        assert_eq!(
            oref.final_path(root),
            PathBuf::from(format!("/srv/blobs/aaf/4c6/sha1-{HELLO_SHA1}.dat"))
        );
        assert_eq!(oref.file_base_name(), format!("sha1-{HELLO_SHA1}.dat"));
    }

    #[test]
    fn display_is_bare_name() {
        let name = format!("sha1-{HELLO_SHA1}");
        let oref = ObjectRef::from_name(&name).unwrap();
        assert_eq!(oref.to_string(), name);
        assert_eq!(format!("{oref:?}"), format!("ObjectRef({name})"));
    }

    proptest! {
        #[test]
        fn any_lowercase_sha1_digest_parses_and_shards(digest in "[0-9a-f]{40}") {
            let oref = ObjectRef::parse(&format!("/ns/sha1-{digest}")).unwrap();
            prop_assert_eq!(oref.digest(), digest.as_str());
            let shard = oref.shard_dir(Path::new("r"));
            prop_assert_eq!(shard, Path::new("r").join(&digest[0..3]).join(&digest[3..6]));
        }

        #[test]
        fn wrong_length_never_parses(digest in "[0-9a-f]{1,80}") {
            prop_assume!(digest.len() != 40);
            let input = format!("/ns/sha1-{digest}");
            prop_assert!(ObjectRef::parse(&input).is_err());
        }
    }
}
