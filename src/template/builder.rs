//! Template assembly from externally supplied parts
//!
//! A template is put together from an ordered parameter list (as produced by a
//! source parser), author-supplied message bundles and per-network dependency
//! pins, and receives its ID as the last step.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encoding::EncodingError;
use crate::source::placeholders;

use super::types::{
    Argument, Arguments, Dependencies, InteractionKind, LocalizedText, Messages, Network, Template,
    TemplateData, DEFAULT_VERSION,
};

/// Errors that can occur while assembling a template
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The same parameter label is declared twice
    #[error("duplicate parameter '{label}'")]
    DuplicateParameter { label: String },

    /// Messages or a balance tag were supplied for a parameter that does not exist
    #[error("{what} supplied for unknown parameter '{label}'")]
    UnknownParameter { label: String, what: &'static str },

    #[error("cannot encode template: {0}")]
    Encoding(#[from] EncodingError),
}

/// A declared parameter: label and type name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDecl {
    pub label: String,
    pub type_name: String,
}

impl ParameterDecl {
    pub fn new(label: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            type_name: type_name.into(),
        }
    }
}

/// Title and description in one language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Author-supplied messages keyed by language: `{lang: {title, description}}`
pub type MessageBundle = IndexMap<String, MessageEntry>;

impl Messages {
    /// Regroup a language-first bundle into title and description
    ///
    /// A title (or description) is only present if at least one language supplies it.
    pub fn from_bundle(bundle: &MessageBundle) -> Self {
        let mut title = LocalizedText::new();
        let mut description = LocalizedText::new();
        for (lang, entry) in bundle {
            if let Some(text) = &entry.title {
                title.i18n.insert(lang.clone(), text.clone());
            }
            if let Some(text) = &entry.description {
                description.i18n.insert(lang.clone(), text.clone());
            }
        }
        Self {
            title: (!title.i18n.is_empty()).then_some(title),
            description: (!description.i18n.is_empty()).then_some(description),
        }
    }
}

/// Builder for a [`Template`]
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    kind: InteractionKind,
    cadence: String,
    version: String,
    interface: String,
    messages: Messages,
    parameters: Vec<ParameterDecl>,
    argument_messages: IndexMap<String, Messages>,
    balances: IndexMap<String, String>,
    dependencies: Dependencies,
}

impl TemplateBuilder {
    /// Start a template for the given source
    pub fn new(kind: InteractionKind, cadence: impl Into<String>) -> Self {
        Self {
            kind,
            cadence: cadence.into(),
            version: DEFAULT_VERSION.to_string(),
            interface: String::new(),
            messages: Messages::default(),
            parameters: Vec::new(),
            argument_messages: IndexMap::new(),
            balances: IndexMap::new(),
            dependencies: Default::default(),
        }
    }

    /// Set the template format version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the interface reference id
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = interface.into();
        self
    }

    /// Set the template's own messages
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Append parameters in declaration order
    pub fn with_parameters(mut self, parameters: impl IntoIterator<Item = ParameterDecl>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Append one parameter
    pub fn with_parameter(self, label: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.with_parameters([ParameterDecl::new(label, type_name)])
    }

    /// Attach messages to a parameter
    pub fn with_argument_messages(mut self, label: impl Into<String>, messages: Messages) -> Self {
        self.argument_messages.insert(label.into(), messages);
        self
    }

    /// Tag a parameter with the token balance type it denotes
    pub fn with_balance(mut self, label: impl Into<String>, balance: impl Into<String>) -> Self {
        self.balances.insert(label.into(), balance.into());
        self
    }

    /// Pin `placeholder` on `network`; the contract name is taken from the pin
    pub fn with_pin(mut self, placeholder: impl Into<String>, network: impl Into<String>, pin: Network) -> Self {
        self.dependencies
            .entry(placeholder.into())
            .or_default()
            .entry(pin.contract.clone())
            .or_default()
            .insert(network.into(), pin);
        self
    }

    /// Replace all dependency pins
    pub fn with_dependencies(mut self, dependencies: Dependencies) -> Self {
        self.dependencies = dependencies;
        self
    }

    fn arguments(&mut self) -> Result<Arguments, BuildError> {
        let mut arguments = Arguments::with_capacity(self.parameters.len());
        for (index, param) in self.parameters.iter().enumerate() {
            if arguments.contains_key(&param.label) {
                return Err(BuildError::DuplicateParameter {
                    label: param.label.clone(),
                });
            }
            let argument = Argument {
                index: index as u64,
                type_name: param.type_name.clone(),
                messages: self.argument_messages.shift_remove(&param.label).unwrap_or_default(),
                balance: self.balances.shift_remove(&param.label),
            };
            arguments.insert(param.label.clone(), argument);
        }
        if let Some(label) = self.argument_messages.keys().next() {
            return Err(BuildError::UnknownParameter {
                label: label.clone(),
                what: "messages",
            });
        }
        if let Some(label) = self.balances.keys().next() {
            return Err(BuildError::UnknownParameter {
                label: label.clone(),
                what: "balance",
            });
        }
        Ok(arguments)
    }

    /// Assemble the template and compute its ID
    pub fn build(mut self) -> Result<Template, BuildError> {
        let arguments = self.arguments()?;

        let used: HashSet<String> = placeholders(&self.cadence)
            .into_iter()
            .map(|(placeholder, _)| placeholder)
            .collect();
        for placeholder in &used {
            if !self.dependencies.contains_key(placeholder) {
                warn!("placeholder {} has no dependency pins", placeholder);
            }
        }
        for placeholder in self.dependencies.keys() {
            if !used.contains(placeholder) {
                debug!("dependency {} is not referenced by the source", placeholder);
            }
        }

        let data = TemplateData {
            kind: self.kind,
            interface: self.interface,
            messages: self.messages,
            cadence: self.cadence,
            dependencies: self.dependencies,
            arguments,
        };
        Ok(Template::new(self.version, data)?)
    }
}
