//! Error types for canonical encoding

use thiserror::Error;

/// Errors that can occur while canonically encoding a template
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Two keys of a map-shaped node are indistinguishable under byte-wise ordering
    #[error("ambiguous ordering in {node}: key '{key}' appears more than once")]
    AmbiguousOrdering { node: &'static str, key: String },

    /// A map-shaped node contains an empty key
    #[error("empty key in {node}")]
    EmptyKey { node: &'static str },
}

impl EncodingError {
    /// Create an ambiguous ordering error
    pub fn ambiguous(node: &'static str, key: impl Into<String>) -> Self {
        Self::AmbiguousOrdering {
            node,
            key: key.into(),
        }
    }

    /// Name of the node that failed to encode
    pub fn node(&self) -> &'static str {
        match self {
            Self::AmbiguousOrdering { node, .. } => node,
            Self::EmptyKey { node } => node,
        }
    }
}
