use sha1::{Digest, Sha1};

/// Incremental hash accumulator for one hash family.
///
/// Bytes are fed with [`update`](Self::update) in any chunking; the final
/// digest is rendered as lowercase hex.
pub trait StreamingDigest: Send {
    /// Feed the next chunk of content.
    fn update(&mut self, data: &[u8]);

    /// Consume the accumulator and return the lowercase hex digest.
    fn finalize_hex(self: Box<Self>) -> String;
}

/// SHA-1 accumulator.
#[derive(Default)]
pub struct Sha1Hasher {
    inner: Sha1,
}

impl Sha1Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxed constructor for registry use.
    pub fn boxed() -> Box<dyn StreamingDigest> {
        Box::new(Self::new())
    }
}

impl StreamingDigest for Sha1Hasher {
    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize_hex(self: Box<Self>) -> String {
        hex::encode(self.inner.finalize())
    }
}
