//! Signing state classification.

use crate::report::SigningReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall signing state of a package.
///
/// Variants after `NoManifest` are ordered by increasing signing strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SigningState {
    NoManifest,
    Unsigned,
    Pkcs7Only,
    DualSigned,
}

impl SigningState {
    pub fn is_signed(&self) -> bool {
        matches!(self, SigningState::Pkcs7Only | SigningState::DualSigned)
    }
}

impl fmt::Display for SigningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SigningState::NoManifest => "NO MANIFEST",
                SigningState::Unsigned => "UNSIGNED",
                SigningState::Pkcs7Only => "PKCS#7 ONLY",
                SigningState::DualSigned => "DUAL-SIGNED",
            }
        )
    }
}

/// Derive the signing state of a canonical report.
pub fn classify(report: &SigningReport) -> SigningState {
    if !report.has_manifest {
        return SigningState::NoManifest;
    }
    match (&report.pkcs7, &report.cose) {
        (Some(_), Some(_)) => SigningState::DualSigned,
        (Some(_), None) => SigningState::Pkcs7Only,
        (None, _) => SigningState::Unsigned,
    }
}
