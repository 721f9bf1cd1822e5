//! Interaction template data model
//!
//! These types mirror the published JSON document. Maps keep their document
//! order so that a template round-trips unchanged; canonical encoding never
//! relies on that order.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::encoding::EncodingError;

/// Template format version written by this crate
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Document type tag, always `InteractionTemplate`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateType {
    #[default]
    InteractionTemplate,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::InteractionTemplate => "InteractionTemplate",
        }
    }
}

/// Whether the template describes a read-only script or a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Script,
    Transaction,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Script => "script",
            InteractionKind::Transaction => "transaction",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display strings keyed by language tag (e.g. `en-US`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub i18n: IndexMap<String, String>,
}

impl LocalizedText {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a translation, replacing any previous text for the same language
    pub fn with(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.i18n.insert(lang.into(), text.into());
        self
    }

    /// Look up the text for a language tag
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.i18n.get(lang).map(String::as_str)
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        Self {
            i18n: iter
                .into_iter()
                .map(|(lang, text)| (lang.into(), text.into()))
                .collect(),
        }
    }
}

/// Optional localized title and description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
}

impl Messages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: LocalizedText) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_description(mut self, description: LocalizedText) -> Self {
        self.description = Some(description);
        self
    }
}

/// A dependency pinned on one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Account address the contract is deployed to
    pub address: String,
    /// Fully-qualified contract identifier (`A.<address>.<name>`)
    pub fq_address: String,
    /// Contract name
    pub contract: String,
    /// Hash of the deployed contract code and its imports
    pub pin: String,
    /// Block height at which the pin was captured
    #[serde(default)]
    pub pin_block_height: u64,
}

/// contract name -> network name -> pin
pub type ContractPins = IndexMap<String, IndexMap<String, Network>>;

/// placeholder token -> contract name -> network name -> pin
pub type Dependencies = IndexMap<String, ContractPins>;

/// A declared parameter of the script or transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    /// Position in the parameter list
    pub index: u64,
    /// Declared type name (e.g. `UFix64`)
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub messages: Messages,
    /// Token balance type tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,
}

/// argument label -> argument
pub type Arguments = IndexMap<String, Argument>;

/// The template body covered by the identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateData {
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    #[serde(default)]
    pub interface: String,
    #[serde(default)]
    pub messages: Messages,
    pub cadence: String,
    #[serde(default)]
    pub dependencies: Dependencies,
    #[serde(default)]
    pub arguments: Arguments,
}

impl TemplateData {
    /// Create template data with no messages, dependencies, or arguments
    pub fn new(kind: InteractionKind, cadence: impl Into<String>) -> Self {
        Self {
            kind,
            interface: String::new(),
            messages: Messages::default(),
            cadence: cadence.into(),
            dependencies: Dependencies::default(),
            arguments: Arguments::default(),
        }
    }
}

/// An interaction template together with its derived identity
///
/// Fields are only reachable through accessors: a template built with
/// [`Template::new`] always carries the ID of its data. Templates loaded from
/// JSON carry whatever ID the document states and should be checked with
/// [`crate::verify_id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    f_type: TemplateType,
    f_version: String,
    #[serde(default)]
    id: String,
    data: TemplateData,
}

impl Template {
    /// Build a template and compute its ID
    pub fn new(version: impl Into<String>, data: TemplateData) -> Result<Self, EncodingError> {
        let mut template = Self::unidentified(version, data);
        template.id = crate::template::identity::generate_id(&template)?;
        Ok(template)
    }

    /// Build a template without an ID
    pub(crate) fn unidentified(version: impl Into<String>, data: TemplateData) -> Self {
        Self {
            f_type: TemplateType::InteractionTemplate,
            f_version: version.into(),
            id: String::new(),
            data,
        }
    }

    /// Parse a template JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a template JSON document from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Serialize to JSON
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    pub fn f_type(&self) -> TemplateType {
        self.f_type
    }

    pub fn version(&self) -> &str {
        &self.f_version
    }

    /// The stored identity (empty if the document had none)
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn data(&self) -> &TemplateData {
        &self.data
    }

    /// Give up the identity to edit the data; the result must be rebuilt with [`Template::new`]
    pub fn into_data(self) -> TemplateData {
        self.data
    }

    /// Every network name any dependency is pinned on, sorted
    pub fn networks(&self) -> Vec<&str> {
        let names: BTreeSet<&str> = self
            .data
            .dependencies
            .values()
            .flat_map(|contracts| contracts.values())
            .flat_map(|networks| networks.keys())
            .map(String::as_str)
            .collect();
        names.into_iter().collect()
    }
}
