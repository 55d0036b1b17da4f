//! Common descriptor shape for installed packages.
//!
//! Every package source produces `PackageDescriptor`s. The provenance
//! builder consumes them without knowing which package manager answered.

use serde::{Deserialize, Serialize};

/// A package installed on the host, as reported by a package source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,
    /// Packager or distributor; may be empty.
    pub vendor: String,
    pub epoch: Epoch,
    pub version: String,
    pub release: String,
    pub arch: String,
    pub checksum: PackageChecksum,
}

/// RPM epoch in whichever shape the source reports it.
///
/// The dnf binding exposes an integer, the yum binding a string. Each has
/// its own zero value and neither is normalized into the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Epoch {
    Number(u32),
    Text(String),
}

impl Epoch {
    /// Whether this epoch is the zero value for its representation.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0,
            Self::Text(s) => s == "0",
        }
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// The single digest a source populated for a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageChecksum {
    pub algorithm: DigestAlgorithm,
    pub value: ChecksumValue,
}

impl PackageChecksum {
    pub fn sha1_raw(bytes: Vec<u8>) -> Self {
        Self {
            algorithm: DigestAlgorithm::Sha1,
            value: ChecksumValue::Raw(bytes),
        }
    }

    pub fn sha256_text(text: impl Into<String>) -> Self {
        Self {
            algorithm: DigestAlgorithm::Sha256,
            value: ChecksumValue::Text(text.into()),
        }
    }

    /// Textual form placed in a provenance digest.
    ///
    /// Raw bytes are hex-encoded; text is passed through unchanged.
    pub fn to_text(&self) -> String {
        match &self.value {
            ChecksumValue::Raw(bytes) => hex::encode(bytes),
            ChecksumValue::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumValue {
    Raw(Vec<u8>),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sha1 => write!(f, "sha1"),
            Self::Sha256 => write!(f, "sha256"),
        }
    }
}

/// Which package-manager binding supplied the descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Dnf,
    Yum,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dnf => write!(f, "dnf"),
            Self::Yum => write!(f, "yum"),
        }
    }
}
