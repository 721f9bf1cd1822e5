//! Canonical encoding of the template tree
//!
//! Every scalar leaf is replaced by its digest and every map-shaped node is
//! walked in ascending byte order of its keys, so two logically equal
//! templates always encode to the same bytes.

use log::trace;

use crate::hashing::{hash_leaf, hash_u64};
use crate::template::{
    Argument, Arguments, ContractPins, Dependencies, LocalizedText, Messages, Network, Template,
};

use super::error::EncodingError;
use super::rlp::RlpItem;

/// A node with a fixed canonical encoding rule
pub trait CanonicalEncode {
    fn encode_canonical(&self) -> Result<RlpItem, EncodingError>;
}

/// Encode a value straight to canonical bytes
pub fn to_canonical_bytes<T: CanonicalEncode + ?Sized>(value: &T) -> Result<Vec<u8>, EncodingError> {
    let bytes = value.encode_canonical()?.encode();
    trace!("canonical encoding: {} bytes", bytes.len());
    Ok(bytes)
}

fn leaf(value: &str) -> RlpItem {
    RlpItem::from(hash_leaf(value))
}

/// Collect map entries in ascending byte order of the key
///
/// Rejects empty keys and keys that compare equal to a neighbour.
fn sorted_entries<'a, V: 'a>(
    node: &'static str,
    entries: impl IntoIterator<Item = (&'a String, &'a V)>,
) -> Result<Vec<(&'a str, &'a V)>, EncodingError> {
    let mut sorted: Vec<(&str, &V)> = entries
        .into_iter()
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    if sorted.iter().any(|(key, _)| key.is_empty()) {
        return Err(EncodingError::EmptyKey { node });
    }
    sorted.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    if let Some(pair) = sorted.windows(2).find(|w| w[0].0.as_bytes() == w[1].0.as_bytes()) {
        return Err(EncodingError::ambiguous(node, pair[0].0));
    }
    Ok(sorted)
}

/// `[hash(tag), [[hash(lang), hash(text)], ...]]`
fn encode_localized(tag: &'static str, text: &LocalizedText) -> Result<RlpItem, EncodingError> {
    let pairs = sorted_entries(tag, &text.i18n)?
        .into_iter()
        .map(|(lang, text)| RlpItem::List(vec![leaf(lang), leaf(text)]))
        .collect();
    Ok(RlpItem::List(vec![leaf(tag), RlpItem::List(pairs)]))
}

impl CanonicalEncode for Messages {
    fn encode_canonical(&self) -> Result<RlpItem, EncodingError> {
        let title = match &self.title {
            Some(title) => encode_localized("title", title)?,
            None => RlpItem::null(),
        };
        let description = match &self.description {
            Some(description) => encode_localized("description", description)?,
            None => RlpItem::null(),
        };
        Ok(RlpItem::List(vec![title, description]))
    }
}

// pin_block_height is not part of the identity
impl CanonicalEncode for Network {
    fn encode_canonical(&self) -> Result<RlpItem, EncodingError> {
        Ok(RlpItem::List(vec![
            leaf(&self.address),
            leaf(&self.contract),
            leaf(&self.fq_address),
            leaf(&self.pin),
        ]))
    }
}

fn encode_contract_pins(contracts: &ContractPins) -> Result<RlpItem, EncodingError> {
    let mut items = Vec::with_capacity(contracts.len());
    for (contract, networks) in sorted_entries("dependency contracts", contracts)? {
        let mut pins = Vec::with_capacity(networks.len());
        for (network, pin) in sorted_entries("dependency networks", networks)? {
            pins.push(RlpItem::List(vec![leaf(network), pin.encode_canonical()?]));
        }
        items.push(RlpItem::List(vec![leaf(contract), RlpItem::List(pins)]));
    }
    Ok(RlpItem::List(items))
}

/// Encode the placeholder -> contract -> network tree
pub fn encode_dependencies(dependencies: &Dependencies) -> Result<RlpItem, EncodingError> {
    let mut items = Vec::with_capacity(dependencies.len());
    for (placeholder, contracts) in sorted_entries("dependencies", dependencies)? {
        items.push(RlpItem::List(vec![
            leaf(placeholder),
            encode_contract_pins(contracts)?,
        ]));
    }
    Ok(RlpItem::List(items))
}

impl CanonicalEncode for Argument {
    fn encode_canonical(&self) -> Result<RlpItem, EncodingError> {
        Ok(RlpItem::List(vec![
            RlpItem::from(hash_u64(self.index)),
            leaf(&self.type_name),
            leaf(self.balance.as_deref().unwrap_or("")),
            self.messages.encode_canonical()?,
        ]))
    }
}

/// Encode the label -> argument map as `[[hash(label), argument], ...]`
pub fn encode_arguments(arguments: &Arguments) -> Result<RlpItem, EncodingError> {
    let mut items = Vec::with_capacity(arguments.len());
    for (label, argument) in sorted_entries("arguments", arguments)? {
        items.push(RlpItem::List(vec![leaf(label), argument.encode_canonical()?]));
    }
    Ok(RlpItem::List(items))
}

impl CanonicalEncode for Template {
    fn encode_canonical(&self) -> Result<RlpItem, EncodingError> {
        let data = self.data();
        Ok(RlpItem::List(vec![
            leaf(self.f_type().as_str()),
            leaf(self.version()),
            leaf(data.kind.as_str()),
            leaf(&data.interface),
            data.messages.encode_canonical()?,
            leaf(&data.cadence),
            encode_dependencies(&data.dependencies)?,
            encode_arguments(&data.arguments)?,
        ]))
    }
}
