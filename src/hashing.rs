//! Content hashing primitive
//!
//! Every scalar leaf of a template is compressed to a SHA3-256 digest before it
//! is placed into the canonical encoding. The hasher is created per call, so
//! these functions are reentrant and safe to use from any number of threads.

use sha3::{Digest as _, Sha3_256};

/// Length in bytes of a [`Digest`]
pub const DIGEST_LEN: usize = 32;

/// A SHA3-256 digest
pub type Digest = [u8; DIGEST_LEN];

/// Hash an arbitrary byte string
pub fn digest(bytes: &[u8]) -> Digest {
    let mut hasher = Sha3_256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Hash a UTF-8 string leaf
pub fn hash_leaf(value: &str) -> Digest {
    digest(value.as_bytes())
}

/// Hash an integer leaf as its 8-byte big-endian representation
pub fn hash_u64(value: u64) -> Digest {
    digest(&value.to_be_bytes())
}

/// Hash a byte string and return the lowercase hex digest
pub fn digest_hex(bytes: &[u8]) -> String {
    hex::encode(digest(bytes))
}
