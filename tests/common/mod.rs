//! Raw report builders for each inspector generation.

use addon_sigview::RawReport;
use serde_json::{json, Value};

/// Signing facts expressed independently of any report shape.
#[derive(Debug, Clone, Copy)]
pub struct Facts {
    pub pkcs7: bool,
    pub cose: bool,
    pub staging: bool,
}

pub fn raw(value: Value) -> RawReport {
    RawReport::from_value(value).expect("report must be a JSON object")
}

pub fn legacy(facts: Facts) -> RawReport {
    raw(json!({
        "has_manifest": true,
        "manifest": {"id": "addon@example.com", "version": "1.0"},
        "kind": "regular",
        "pkcs7_algorithm": if facts.pkcs7 { "SHA-256" } else { "" },
        "cose_algorithm": if facts.cose { "ES256" } else { "" },
        "has_pkcs7_sig": facts.pkcs7,
        "has_cose_sig": facts.cose,
        "env": if facts.staging { "staging" } else { "production" },
    }))
}

pub fn split(facts: Facts) -> RawReport {
    raw(json!({
        "has_manifest": true,
        "manifest": {"id": "addon@example.com", "version": "1.0"},
        "kind": "regular",
        "pkcs7_algorithm": "SHA-256",
        "is_pkcs7_signed": facts.pkcs7,
        "is_cose_signed": facts.cose,
        "is_staging": facts.staging,
        "signatures": {"pkcs7": {"present": facts.pkcs7}, "cose": {"present": facts.cose}},
    }))
}

pub fn unified(facts: Facts) -> RawReport {
    raw(json!({
        "has_manifest": true,
        "manifest": {"id": "addon@example.com", "version": "1.0"},
        "kind": "regular",
        "pkcs7_algorithm": "SHA-256",
        "is_signed": facts.pkcs7,
        "is_staging": facts.staging,
        "signatures": [],
    }))
}

/// Every combination of signing facts the unified shape can also express.
pub fn unified_expressible_facts() -> Vec<Facts> {
    let mut all = Vec::new();
    for pkcs7 in [false, true] {
        for staging in [false, true] {
            all.push(Facts {
                pkcs7,
                cose: false,
                staging,
            });
        }
    }
    all
}
