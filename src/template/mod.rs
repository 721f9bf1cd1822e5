//! Interaction templates
//!
//! This module defines the template model, assembles templates from their
//! parts, and derives the content identifier that names a template.
//!
//! # Example
//!
//! ```rust
//! use interaction_template::template::{InteractionKind, TemplateBuilder};
//!
//! let template = TemplateBuilder::new(InteractionKind::Script, "pub fun main(a: Int): Int { return a }")
//!     .with_parameter("a", "Int")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(template.id().len(), 64);
//! ```

mod builder;
mod identity;
mod types;

pub use builder::{BuildError, MessageBundle, MessageEntry, ParameterDecl, TemplateBuilder};
pub use identity::{generate_id, verify_id, IdentityError};
pub use types::{
    Argument, Arguments, ContractPins, Dependencies, InteractionKind, LocalizedText, Messages,
    Network, Template, TemplateData, TemplateType, DEFAULT_VERSION,
};
