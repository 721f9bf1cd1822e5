//! Dependency pin computation
//!
//! A pin asserts which code a template was written against. Starting from one
//! deployed contract, the import horizon is walked breadth-first: each
//! contract's code is fetched, its address imports are appended to the
//! horizon, and the pin is the digest of the concatenated hex digests of every
//! horizon entry's code, in visiting order.
//!
//! Fetching code is left to the caller through [`ContractSource`].

use std::collections::HashMap;

use log::{debug, trace};
use thiserror::Error;

use crate::hashing::digest_hex;
use crate::source::{find_imports, ImportLocation};

/// Upper bound on horizon entries, guarding against cyclic imports
pub const MAX_HORIZON: usize = 1024;

/// Errors that can occur while computing a pin
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PinError {
    /// The chain client has no such contract
    #[error("contract {contract} not found at {address}")]
    ContractNotFound { address: String, contract: String },

    /// A fetched contract imports from a placeholder instead of an address
    #[error("contract {contract} imports from unresolved location {location}")]
    UnresolvedImport { contract: String, location: String },

    /// The import horizon grew past [`MAX_HORIZON`]
    #[error("import horizon of {contract} exceeds {} contracts", MAX_HORIZON)]
    HorizonTooLarge { contract: String },

    /// The chain client failed
    #[error("failed to fetch {contract} at {address}: {message}")]
    Fetch {
        address: String,
        contract: String,
        message: String,
    },
}

/// Supplier of deployed contract code, typically backed by a chain client
pub trait ContractSource {
    fn contract_code(&self, address: &str, contract: &str) -> Result<String, PinError>;
}

/// In-memory contract source keyed by (address, contract name)
#[derive(Debug, Clone, Default)]
pub struct StaticContracts {
    contracts: HashMap<(String, String), String>,
}

impl StaticContracts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register deployed code
    pub fn with_contract(
        mut self,
        address: impl AsRef<str>,
        contract: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        self.contracts.insert(
            (with_prefix(address.as_ref()), contract.into()),
            code.into(),
        );
        self
    }
}

impl ContractSource for StaticContracts {
    fn contract_code(&self, address: &str, contract: &str) -> Result<String, PinError> {
        self.contracts
            .get(&(with_prefix(address), contract.to_string()))
            .cloned()
            .ok_or_else(|| PinError::ContractNotFound {
                address: address.to_string(),
                contract: contract.to_string(),
            })
    }
}

/// Normalise an address to lowercase with a `0x` prefix
pub fn with_prefix(address: &str) -> String {
    let bare = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    format!("0x{}", bare.to_ascii_lowercase())
}

/// Compute the pin of `contract` deployed at `address`
pub fn compute_dependency_pin(
    source: &dyn ContractSource,
    address: &str,
    contract: &str,
) -> Result<String, PinError> {
    let mut horizon = vec![(with_prefix(address), contract.to_string())];
    let mut hashes = String::new();
    let mut next = 0;

    while let Some((address, name)) = horizon.get(next).cloned() {
        next += 1;
        let code = source.contract_code(&address, &name)?;
        hashes.push_str(&digest_hex(code.as_bytes()));
        trace!("horizon[{}] = {}.{}", next - 1, address, name);

        for import in find_imports(&code) {
            let location = match import.location {
                ImportLocation::Address(location) => with_prefix(&location),
                ImportLocation::Placeholder(location) => {
                    return Err(PinError::UnresolvedImport {
                        contract: name,
                        location,
                    })
                }
            };
            for imported in import.contracts {
                horizon.push((location.clone(), imported));
            }
        }
        if horizon.len() > MAX_HORIZON {
            return Err(PinError::HorizonTooLarge {
                contract: contract.to_string(),
            });
        }
    }

    let pin = digest_hex(hashes.as_bytes());
    debug!("pin for {}.{} over {} contracts: {}", address, contract, horizon.len(), pin);
    Ok(pin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_prefix() {
        assert_eq!(with_prefix("F233DCEE88FE0ABE"), "0xf233dcee88fe0abe");
        assert_eq!(with_prefix("0xABC"), "0xabc");
        assert_eq!(with_prefix("0x01"), "0x01");
    }

    #[test]
    fn test_single_contract_pin() {
        let code = "pub contract interface FungibleToken {}";
        let source = StaticContracts::new().with_contract("0x01", "FungibleToken", code);
        let pin = compute_dependency_pin(&source, "0x01", "FungibleToken").unwrap();
        assert_eq!(pin, digest_hex(digest_hex(code.as_bytes()).as_bytes()));
    }

    #[test]
    fn test_imports_walked_breadth_first() {
        let token = "import FungibleToken from 0x01\nimport MetadataViews from 0x02\npub contract FlowToken {}";
        let ft = "pub contract interface FungibleToken {}";
        let views = "import FungibleToken from 0x01\npub contract MetadataViews {}";
        let source = StaticContracts::new()
            .with_contract("0x03", "FlowToken", token)
            .with_contract("0x01", "FungibleToken", ft)
            .with_contract("0x02", "MetadataViews", views);

        let expected: String = [token, ft, views, ft]
            .iter()
            .map(|code| digest_hex(code.as_bytes()))
            .collect();
        assert_eq!(
            compute_dependency_pin(&source, "0x03", "FlowToken").unwrap(),
            digest_hex(expected.as_bytes())
        );
    }

    #[test]
    fn test_missing_contract() {
        let err = compute_dependency_pin(&StaticContracts::new(), "0x01", "Nope").unwrap_err();
        assert_eq!(
            err,
            PinError::ContractNotFound {
                address: "0x01".to_string(),
                contract: "Nope".to_string()
            }
        );
    }

    #[test]
    fn test_placeholder_import_rejected() {
        let source = StaticContracts::new().with_contract("0x01", "A", "import B from 0xBADDRESS");
        let err = compute_dependency_pin(&source, "0x01", "A").unwrap_err();
        assert!(matches!(err, PinError::UnresolvedImport { .. }));
    }

    #[test]
    fn test_imports_after_star_run_comment_are_walked() {
        let source = StaticContracts::new().with_contract(
            "0x01",
            "A",
            "/** banner **/\nimport B from 0x02\npub contract A {}",
        );
        let err = compute_dependency_pin(&source, "0x01", "A").unwrap_err();
        assert_eq!(
            err,
            PinError::ContractNotFound {
                address: "0x02".to_string(),
                contract: "B".to_string()
            }
        );
    }

    #[test]
    fn test_cyclic_imports_bounded() {
        let source = StaticContracts::new()
            .with_contract("0x01", "A", "import B from 0x02")
            .with_contract("0x02", "B", "import A from 0x01");
        let err = compute_dependency_pin(&source, "0x01", "A").unwrap_err();
        assert_eq!(err, PinError::HorizonTooLarge { contract: "A".to_string() });
    }
}
