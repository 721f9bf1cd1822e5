//! Recursive length-prefixed list encoding
//!
//! Byte-compatible with Ethereum RLP: a byte string below `0x80` of length one
//! is its own encoding, other byte strings and lists carry a short (`0x80` /
//! `0xc0` based) or long (`0xb7` / `0xf7` based) length prefix.

use crate::hashing::Digest;

const SHORT_STRING: u8 = 0x80;
const LONG_STRING: u8 = 0xb7;
const SHORT_LIST: u8 = 0xc0;
const LONG_LIST: u8 = 0xf7;
const SHORT_PAYLOAD_MAX: usize = 55;

/// A node of the nested-list structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    /// Opaque byte string
    Bytes(Vec<u8>),
    /// Ordered list of items
    List(Vec<RlpItem>),
}

impl RlpItem {
    /// The empty list, used as the explicit marker for absent nodes
    pub fn null() -> Self {
        RlpItem::List(Vec::new())
    }

    /// Encode this item to bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        match self {
            RlpItem::Bytes(bytes) => {
                if bytes.len() == 1 && bytes[0] < SHORT_STRING {
                    out.push(bytes[0]);
                } else {
                    write_prefix(bytes.len(), SHORT_STRING, LONG_STRING, out);
                    out.extend_from_slice(bytes);
                }
            }
            RlpItem::List(items) => {
                let mut payload = Vec::new();
                for item in items {
                    item.encode_into(&mut payload);
                }
                write_prefix(payload.len(), SHORT_LIST, LONG_LIST, out);
                out.extend_from_slice(&payload);
            }
        }
    }
}

impl From<Digest> for RlpItem {
    fn from(digest: Digest) -> Self {
        RlpItem::Bytes(digest.to_vec())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}

fn write_prefix(len: usize, short_base: u8, long_base: u8, out: &mut Vec<u8>) {
    if len <= SHORT_PAYLOAD_MAX {
        out.push(short_base + len as u8);
    } else {
        let len_bytes = (len as u64).to_be_bytes();
        let skip = len_bytes.iter().take_while(|b| **b == 0).count();
        let significant = &len_bytes[skip..];
        out.push(long_base + significant.len() as u8);
        out.extend_from_slice(significant);
    }
}
