//! Canonical binary encoding of interaction templates

mod canonical;
mod error;
pub mod rlp;

pub use canonical::{encode_arguments, encode_dependencies, to_canonical_bytes, CanonicalEncode};
pub use error::EncodingError;
pub use rlp::RlpItem;
