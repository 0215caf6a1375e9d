//! The canonical signing report every inspector shape normalizes into.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identity metadata from the package manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Add-on ID; unidentified add-ons are valid.
    pub id: Option<String>,
    pub version: String,
}

/// PKCS#7 signature facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pkcs7Signature {
    /// Digest algorithm, `unknown` when the inspector did not name one.
    pub algorithm: String,
}

/// COSE signature facts. Presence of this value means COSE-signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoseSignature {
    pub algorithm: Option<String>,
}

/// Signing root that issued the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Staging,
    Development,
    Unknown,
}

impl Environment {
    /// Parse an environment name as written by the legacy inspector.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "production" => Some(Environment::Production),
            "staging" => Some(Environment::Staging),
            "development" => Some(Environment::Development),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Development => "development",
            Environment::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inspector generation a report was normalized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaGeneration {
    Legacy,
    Split,
    Unified,
    Unrecognized,
}

impl SchemaGeneration {
    /// Whether this generation can state that a package is *not* COSE-signed.
    pub fn expresses_cose(&self) -> bool {
        matches!(self, SchemaGeneration::Legacy | SchemaGeneration::Split)
    }
}

/// Canonical, shape-independent signing report.
///
/// Built once per loaded file by [`adapt`](super::adapt) and never mutated
/// afterwards; the next load replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigningReport {
    pub has_manifest: bool,
    /// Present iff `has_manifest`.
    pub manifest: Option<Manifest>,
    /// Declared add-on type. Only trustworthy when signed.
    pub kind: Option<String>,
    pub pkcs7: Option<Pkcs7Signature>,
    pub cose: Option<CoseSignature>,
    pub environment: Environment,
    /// `None` when there is no manifest.
    pub schema: Option<SchemaGeneration>,
    /// Verbatim inspector payload for the raw dump.
    pub raw_for_display: Option<Value>,
}

impl SigningReport {
    /// The report for anything that is not an add-on.
    pub fn no_manifest() -> Self {
        Self {
            has_manifest: false,
            manifest: None,
            kind: None,
            pkcs7: None,
            cose: None,
            environment: Environment::Unknown,
            schema: None,
            raw_for_display: None,
        }
    }
}
