//! Interaction Template - content identifiers for script and transaction templates
//!
//! This library encodes an interaction template canonically, derives its
//! content identifier, verifies stored identifiers, and renders a template's
//! source for a specific network.
//!
//! # Example
//!
//! ```rust
//! use interaction_template::template::{InteractionKind, TemplateBuilder};
//! use interaction_template::verify_template;
//!
//! let template = TemplateBuilder::new(InteractionKind::Script, "pub fun main(): Int { return 42 }")
//!     .build()
//!     .unwrap();
//!
//! let json = template.to_json(true).unwrap();
//! assert_eq!(verify_template(&json).unwrap(), template.id());
//! ```

pub mod encoding;
pub mod error;
pub mod hashing;
pub mod manifest;
pub mod pin;
pub mod source;
pub mod template;

pub use encoding::EncodingError;
pub use error::Error;
pub use manifest::{Manifest, ManifestError};
pub use pin::{compute_dependency_pin, ContractSource, PinError};
pub use source::{resolve, ResolveError};
pub use template::{generate_id, verify_id, Template, TemplateBuilder};

/// Compute the ID of a template JSON document
///
/// Any `id` already present in the document is ignored.
pub fn template_id(json: &str) -> Result<String, Error> {
    let template = Template::from_json(json)?;
    Ok(generate_id(&template)?)
}

/// Check the `id` of a template JSON document against its data
///
/// # Example
///
/// ```rust
/// use interaction_template::{verify_template, Error};
///
/// let json = r#"{
///     "f_type": "InteractionTemplate",
///     "f_version": "1.0.0",
///     "id": "0000",
///     "data": { "type": "script", "cadence": "pub fun main() {}" }
/// }"#;
///
/// assert!(matches!(verify_template(json), Err(Error::Identity(_))));
/// ```
pub fn verify_template(json: &str) -> Result<String, Error> {
    let template = Template::from_json(json)?;
    Ok(verify_id(&template)?)
}

/// Resolve the source of a template JSON document for `network`
pub fn resolve_template(json: &str, network: &str) -> Result<String, Error> {
    let template = Template::from_json(json)?;
    Ok(resolve(&template, network)?)
}

/// Assemble a template from a manifest file
pub fn generate_from_manifest(path: &std::path::Path) -> Result<Template, Error> {
    let builder = Manifest::from_file(path)?.into_builder()?;
    Ok(builder.build()?)
}
