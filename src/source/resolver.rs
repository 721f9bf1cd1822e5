//! Network resolution - renders template source for one network
//!
//! Each placeholder token in code is replaced by the address its dependency
//! entry pins on the requested network. Resolution never touches the template
//! identity.

use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::error::format_source_error;
use crate::template::{Dependencies, Template};

use super::lexer::{lex, Span, Token};

/// Errors that can occur while resolving placeholders
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Placeholder in source with no dependency entry at all
    #[error("no dependency declared for placeholder '{placeholder}'")]
    UnknownPlaceholder { placeholder: String, span: Span },

    /// Placeholder declared, but not pinned on the requested network
    #[error("placeholder '{placeholder}' is not pinned on network '{network}'")]
    NotPinned {
        placeholder: String,
        network: String,
        span: Span,
    },

    /// Contracts under one placeholder live at different addresses on the network
    #[error("placeholder '{placeholder}' resolves to conflicting addresses on network '{network}': {}", addresses.join(", "))]
    ConflictingAddresses {
        placeholder: String,
        network: String,
        addresses: Vec<String>,
        span: Span,
    },
}

impl ResolveError {
    /// Source span of the offending placeholder
    pub fn span(&self) -> &Span {
        match self {
            Self::UnknownPlaceholder { span, .. } => span,
            Self::NotPinned { span, .. } => span,
            Self::ConflictingAddresses { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let label = match self {
            Self::UnknownPlaceholder { .. } => "not declared in dependencies".to_string(),
            Self::NotPinned { network, .. } => format!("no pin for network '{}'", network),
            Self::ConflictingAddresses { addresses, .. } => {
                format!("pinned at {}", addresses.join(" and "))
            }
        };
        format_source_error(source, filename, self.span(), &self.to_string(), &label)
    }
}

/// Address a placeholder resolves to on `network`
fn resolve_placeholder(
    dependencies: &Dependencies,
    placeholder: &str,
    network: &str,
    span: &Span,
) -> Result<String, ResolveError> {
    let contracts = dependencies
        .get(placeholder)
        .ok_or_else(|| ResolveError::UnknownPlaceholder {
            placeholder: placeholder.to_string(),
            span: span.clone(),
        })?;

    let mut addresses: Vec<String> = contracts
        .values()
        .filter_map(|networks| networks.get(network))
        .map(|pin| pin.address.clone())
        .collect();
    addresses.sort();
    addresses.dedup();

    match addresses.len() {
        0 => Err(ResolveError::NotPinned {
            placeholder: placeholder.to_string(),
            network: network.to_string(),
            span: span.clone(),
        }),
        1 => Ok(addresses.remove(0)),
        _ => Err(ResolveError::ConflictingAddresses {
            placeholder: placeholder.to_string(),
            network: network.to_string(),
            addresses,
            span: span.clone(),
        }),
    }
}

/// Tokens to substitute: every placeholder, plus address-shaped tokens
/// (such as `0xFEED`) that are declared as dependency keys
fn substitution_sites(source: &str, dependencies: &Dependencies) -> Vec<(String, Span)> {
    lex(source)
        .filter_map(|(tok, span)| match tok {
            Token::Placeholder(name) => Some((name, span)),
            Token::Address(name) if dependencies.contains_key(&name) => Some((name, span)),
            _ => None,
        })
        .collect()
}

/// Substitute placeholders in `source` with their addresses on `network`
///
/// A placeholder made only of hex digits is indistinguishable from an address,
/// so it is substituted only when `dependencies` declares it.
pub fn resolve_source(
    source: &str,
    dependencies: &Dependencies,
    network: &str,
) -> Result<String, ResolveError> {
    let mut resolved = String::with_capacity(source.len());
    let mut addresses: HashMap<String, String> = HashMap::new();
    let mut cursor = 0;

    for (placeholder, span) in substitution_sites(source, dependencies) {
        let address = match addresses.get(&placeholder) {
            Some(address) => address.clone(),
            None => {
                let address = resolve_placeholder(dependencies, &placeholder, network, &span)?;
                debug!("{} -> {} on {}", placeholder, address, network);
                addresses.insert(placeholder, address.clone());
                address
            }
        };
        resolved.push_str(&source[cursor..span.start]);
        resolved.push_str(&address);
        cursor = span.end;
    }
    resolved.push_str(&source[cursor..]);
    Ok(resolved)
}

/// Render the template's source for `network`
pub fn resolve(template: &Template, network: &str) -> Result<String, ResolveError> {
    let data = template.data();
    resolve_source(&data.cadence, &data.dependencies, network)
}
