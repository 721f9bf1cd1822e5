//! Template generation manifest
//!
//! A manifest is a TOML file describing everything a template is assembled
//! from: the source, its ordered parameters, localized messages, and the
//! per-network dependency pins.
//!
//! ```toml
//! type = "transaction"
//! cadence = "transfer.cdc"
//!
//! [messages.en-US]
//! title = "Transfer Tokens"
//!
//! [[arguments]]
//! label = "amount"
//! type = "UFix64"
//! balance = "FlowToken"
//! [arguments.messages.en-US]
//! title = "Amount"
//!
//! [dependencies."0xFUNGIBLETOKENADDRESS".FungibleToken.mainnet]
//! address = "0xf233dcee88fe0abe"
//! fq_address = "A.f233dcee88fe0abe.FungibleToken"
//! contract = "FungibleToken"
//! pin = "83c9e3d61d3b5ebf24356a9f17b5b57b12d6d56547abc73e05f820a0ae7d9cf5"
//! pin_block_height = 34166296
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::template::{
    Dependencies, InteractionKind, MessageBundle, Messages, Network, ParameterDecl,
    TemplateBuilder, DEFAULT_VERSION,
};

/// Errors that can occur when loading or parsing manifests
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse manifest TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("manifest must set exactly one of `cadence` and `cadence_inline`")]
    SourceUnspecified,
    #[error("Failed to read source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One declared argument, in declaration order
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestArgument {
    pub label: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub messages: MessageBundle,
    pub balance: Option<String>,
}

/// A dependency pin as written in a manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestPin {
    pub address: String,
    pub fq_address: String,
    pub contract: String,
    pub pin: String,
    #[serde(default)]
    pub pin_block_height: u64,
}

impl From<ManifestPin> for Network {
    fn from(pin: ManifestPin) -> Self {
        Network {
            address: pin.address,
            fq_address: pin.fq_address,
            contract: pin.contract,
            pin: pin.pin,
            pin_block_height: pin.pin_block_height,
        }
    }
}

/// placeholder -> contract name -> network name -> pin
pub type ManifestDependencies = IndexMap<String, IndexMap<String, IndexMap<String, ManifestPin>>>;

fn into_dependencies(manifest: ManifestDependencies) -> Dependencies {
    manifest
        .into_iter()
        .map(|(placeholder, contracts)| {
            let contracts = contracts
                .into_iter()
                .map(|(contract, networks)| {
                    let networks = networks
                        .into_iter()
                        .map(|(network, pin)| (network, Network::from(pin)))
                        .collect();
                    (contract, networks)
                })
                .collect();
            (placeholder, contracts)
        })
        .collect()
}

/// A parsed generation manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub interface: String,
    /// Source file, relative to the manifest
    pub cadence: Option<PathBuf>,
    /// Source given directly in the manifest
    pub cadence_inline: Option<String>,
    #[serde(default)]
    pub messages: MessageBundle,
    #[serde(default)]
    pub arguments: Vec<ManifestArgument>,
    #[serde(default)]
    pub dependencies: ManifestDependencies,
    /// Directory relative source paths are resolved against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

impl Manifest {
    /// Load a manifest from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        let mut manifest = Self::from_str(&content)?;
        manifest.base_dir = path.parent().map(Path::to_path_buf);
        Ok(manifest)
    }

    /// Load a manifest from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Read the template source
    pub fn source(&self) -> Result<String, ManifestError> {
        match (&self.cadence, &self.cadence_inline) {
            (Some(path), None) => {
                let path = match &self.base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path.clone(),
                };
                std::fs::read_to_string(&path)
                    .map_err(|source| ManifestError::SourceRead { path, source })
            }
            (None, Some(inline)) => Ok(inline.clone()),
            _ => Err(ManifestError::SourceUnspecified),
        }
    }

    /// Turn the manifest into a template builder
    pub fn into_builder(self) -> Result<TemplateBuilder, ManifestError> {
        let source = self.source()?;
        let mut builder = TemplateBuilder::new(self.kind, source)
            .with_version(self.version)
            .with_interface(self.interface)
            .with_messages(Messages::from_bundle(&self.messages))
            .with_dependencies(into_dependencies(self.dependencies));

        for argument in self.arguments {
            builder = builder.with_parameters([ParameterDecl::new(
                argument.label.clone(),
                argument.type_name,
            )]);
            if !argument.messages.is_empty() {
                builder = builder
                    .with_argument_messages(argument.label.clone(), Messages::from_bundle(&argument.messages));
            }
            if let Some(balance) = argument.balance {
                builder = builder.with_balance(argument.label, balance);
            }
        }
        Ok(builder)
    }
}
