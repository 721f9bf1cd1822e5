//! Template identity generation and verification
//!
//! The ID is `hex(sha3(hex(canonical_bytes)))`. The inner digest runs over the
//! lowercase hex *text* of the canonical encoding, not over the raw bytes.
//! This two-stage form is part of the wire format: previously published IDs
//! can only be reproduced by following it exactly.

use log::{debug, warn};
use thiserror::Error;

use crate::encoding::{to_canonical_bytes, EncodingError};
use crate::hashing::digest_hex;

use super::types::Template;

/// Errors from verifying a stored template ID
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The template could not be encoded, so it has no valid ID
    #[error("cannot encode template: {0}")]
    Encoding(#[from] EncodingError),

    /// The document carries no ID
    #[error("template has no id")]
    Missing,

    /// The stored ID does not match the template data
    #[error("template id mismatch: stored {stored}, computed {computed}")]
    Mismatch { stored: String, computed: String },
}

/// Compute the content identifier of a template
///
/// The stored `id` field is ignored.
pub fn generate_id(template: &Template) -> Result<String, EncodingError> {
    let canonical = to_canonical_bytes(template)?;
    let canonical_hex = hex::encode(canonical);
    let id = digest_hex(canonical_hex.as_bytes());
    debug!("generated template id {} ({} data)", id, template.data().kind);
    Ok(id)
}

/// Check that the stored ID matches the template data
///
/// Returns the verified ID.
pub fn verify_id(template: &Template) -> Result<String, IdentityError> {
    if template.id().is_empty() {
        return Err(IdentityError::Missing);
    }
    let computed = generate_id(template)?;
    if !computed.eq_ignore_ascii_case(template.id()) {
        warn!("stale template id {} (computed {})", template.id(), computed);
        return Err(IdentityError::Mismatch {
            stored: template.id().to_string(),
            computed,
        });
    }
    Ok(computed)
}
