//! Normalization of raw inspector reports into [`SigningReport`].
//!
//! The adapter is total: malformed or unexpected fields degrade into
//! [`SchemaIssue`]s and conservative defaults, never into errors. Shape
//! differences stop here; nothing downstream looks at raw fields.

use super::canonical::{
    CoseSignature, Environment, Manifest, Pkcs7Signature, SchemaGeneration, SigningReport,
};
use super::raw::{
    Field, RawReport, RawShape, COMMON_FIELDS, LEGACY_FIELDS, SPLIT_FIELDS, UNIFIED_FIELDS,
};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Placeholder for values the inspector did not report.
pub const UNKNOWN: &str = "unknown";

/// A non-fatal observation made while normalizing a report.
///
/// These are for logs only and never reach the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SchemaIssue {
    /// A field no known inspector generation writes.
    UnknownField(String),
    /// A field a report with a manifest should carry is absent.
    MissingField(String),
    /// A known field holds a value of the wrong type.
    MalformedField { field: String, expected: String },
    /// Two fields disagree; `preferred` won and `ignored` was dropped.
    AmbiguousSigningInfo { preferred: String, ignored: String },
    /// The legacy `env` string names no known signing root.
    UnrecognizedEnvironment(String),
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaIssue::UnknownField(name) => write!(f, "unknown field '{}'", name),
            SchemaIssue::MissingField(name) => write!(f, "missing field '{}'", name),
            SchemaIssue::MalformedField { field, expected } => {
                write!(f, "field '{}' is not a {}", field, expected)
            }
            SchemaIssue::AmbiguousSigningInfo { preferred, ignored } => {
                write!(f, "'{}' disagrees with '{}'; using '{}'", ignored, preferred, preferred)
            }
            SchemaIssue::UnrecognizedEnvironment(name) => {
                write!(f, "unrecognized environment '{}'", name)
            }
        }
    }
}

/// Normalize a raw report.
pub fn adapt(raw: &RawReport) -> SigningReport {
    adapt_with_issues(raw).0
}

/// Normalize a raw report and return what was noticed along the way.
pub fn adapt_with_issues(raw: &RawReport) -> (SigningReport, Vec<SchemaIssue>) {
    let mut issues = Vec::new();

    let schema = match raw.shape() {
        // Nothing else in the report is trusted once the manifest is missing.
        RawShape::NoManifest => return (SigningReport::no_manifest(), issues),
        RawShape::Legacy => SchemaGeneration::Legacy,
        RawShape::Split => SchemaGeneration::Split,
        RawShape::Unified => SchemaGeneration::Unified,
        RawShape::Unrecognized => SchemaGeneration::Unrecognized,
    };

    note_unknown_fields(raw, &mut issues);

    let (pkcs7_signed, cose_signed) = signing_flags(raw, schema, &mut issues);

    let pkcs7 = pkcs7_signed.then(|| Pkcs7Signature {
        algorithm: read_text(raw, "pkcs7_algorithm", &mut issues)
            .unwrap_or_else(|| UNKNOWN.to_string()),
    });

    let cose = match (cose_signed, pkcs7.is_some()) {
        (true, true) => Some(CoseSignature {
            algorithm: read_text(raw, "cose_algorithm", &mut issues),
        }),
        (true, false) => {
            // COSE never signs alone.
            issues.push(SchemaIssue::AmbiguousSigningInfo {
                preferred: pkcs7_key(schema).to_string(),
                ignored: cose_key(schema).to_string(),
            });
            None
        }
        (false, _) => None,
    };

    let report = SigningReport {
        has_manifest: true,
        manifest: Some(read_manifest(raw, &mut issues)),
        kind: read_text(raw, "kind", &mut issues),
        pkcs7,
        cose,
        environment: resolve_environment(raw, &mut issues),
        schema: Some(schema),
        raw_for_display: Some(raw.to_value()),
    };

    (report, issues)
}

fn pkcs7_key(schema: SchemaGeneration) -> &'static str {
    match schema {
        SchemaGeneration::Legacy => "has_pkcs7_sig",
        SchemaGeneration::Split => "is_pkcs7_signed",
        SchemaGeneration::Unified | SchemaGeneration::Unrecognized => "is_signed",
    }
}

fn cose_key(schema: SchemaGeneration) -> &'static str {
    match schema {
        SchemaGeneration::Legacy => "has_cose_sig",
        _ => "is_cose_signed",
    }
}

/// Returns `(pkcs7_signed, cose_signed)` for the detected generation.
fn signing_flags(
    raw: &RawReport,
    schema: SchemaGeneration,
    issues: &mut Vec<SchemaIssue>,
) -> (bool, bool) {
    match schema {
        SchemaGeneration::Legacy => {
            let pkcs7 = read_flag(raw, "has_pkcs7_sig", issues);
            let cose = read_flag(raw, "has_cose_sig", issues);
            check_agreement(raw, "has_pkcs7_sig", pkcs7, "is_pkcs7_signed", issues);
            check_agreement(raw, "has_pkcs7_sig", pkcs7, "is_signed", issues);
            check_agreement(raw, "has_cose_sig", cose, "is_cose_signed", issues);
            (pkcs7, cose)
        }
        SchemaGeneration::Split => {
            let pkcs7 = read_flag(raw, "is_pkcs7_signed", issues);
            let cose = read_flag(raw, "is_cose_signed", issues);
            check_agreement(raw, "is_pkcs7_signed", pkcs7, "is_signed", issues);
            (pkcs7, cose)
        }
        // The unified generation cannot say anything about COSE.
        SchemaGeneration::Unified => (read_flag(raw, "is_signed", issues), false),
        SchemaGeneration::Unrecognized => (false, false),
    }
}

fn read_flag(raw: &RawReport, key: &str, issues: &mut Vec<SchemaIssue>) -> bool {
    match raw.flag(key) {
        Field::Present(value) => value,
        Field::Absent => false,
        Field::Malformed => {
            issues.push(malformed(key, "boolean"));
            false
        }
    }
}

fn read_text(raw: &RawReport, key: &str, issues: &mut Vec<SchemaIssue>) -> Option<String> {
    let field = raw.text(key);
    if field.is_malformed() {
        issues.push(malformed(key, "string"));
    }
    field.present().map(str::to_owned)
}

fn check_agreement(
    raw: &RawReport,
    preferred: &str,
    value: bool,
    other: &str,
    issues: &mut Vec<SchemaIssue>,
) {
    if let Field::Present(other_value) = raw.flag(other) {
        if other_value != value {
            issues.push(SchemaIssue::AmbiguousSigningInfo {
                preferred: preferred.to_string(),
                ignored: other.to_string(),
            });
        }
    }
}

fn malformed(field: &str, expected: &str) -> SchemaIssue {
    SchemaIssue::MalformedField {
        field: field.to_string(),
        expected: expected.to_string(),
    }
}

fn note_unknown_fields(raw: &RawReport, issues: &mut Vec<SchemaIssue>) {
    let known = COMMON_FIELDS
        .iter()
        .chain(LEGACY_FIELDS)
        .chain(SPLIT_FIELDS)
        .chain(UNIFIED_FIELDS);
    let known: Vec<&str> = known.copied().collect();
    for key in raw.keys() {
        if !known.contains(&key) {
            issues.push(SchemaIssue::UnknownField(key.to_string()));
        }
    }
}

/// The legacy `env` name wins over the `is_staging` flag; a name that is not
/// recognized falls through to the flag.
fn resolve_environment(raw: &RawReport, issues: &mut Vec<SchemaIssue>) -> Environment {
    let staging = match raw.flag("is_staging") {
        Field::Present(value) => Some(value),
        Field::Absent => None,
        Field::Malformed => {
            issues.push(malformed("is_staging", "boolean"));
            None
        }
    };

    match raw.text("env") {
        Field::Present(name) => match Environment::from_name(name) {
            Some(env) => {
                if let Some(staging) = staging {
                    if staging != (env == Environment::Staging) {
                        issues.push(SchemaIssue::AmbiguousSigningInfo {
                            preferred: "env".to_string(),
                            ignored: "is_staging".to_string(),
                        });
                    }
                }
                return env;
            }
            None => issues.push(SchemaIssue::UnrecognizedEnvironment(name.to_string())),
        },
        Field::Malformed => issues.push(malformed("env", "string")),
        Field::Absent => {}
    }

    match staging {
        Some(true) => Environment::Staging,
        Some(false) => Environment::Production,
        None => Environment::Unknown,
    }
}

fn read_manifest(raw: &RawReport, issues: &mut Vec<SchemaIssue>) -> Manifest {
    let fields = match raw.get("manifest") {
        Some(Value::Object(fields)) => fields,
        Some(_) => {
            issues.push(malformed("manifest", "object"));
            return unknown_manifest();
        }
        None => {
            issues.push(SchemaIssue::MissingField("manifest".to_string()));
            return unknown_manifest();
        }
    };

    let id = match fields.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        None | Some(Value::Null) | Some(Value::String(_)) => None,
        Some(_) => {
            issues.push(malformed("manifest.id", "string"));
            None
        }
    };

    let version = match fields.get("version") {
        Some(Value::String(version)) if !version.is_empty() => version.clone(),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            issues.push(SchemaIssue::MissingField("manifest.version".to_string()));
            UNKNOWN.to_string()
        }
        Some(_) => {
            issues.push(malformed("manifest.version", "string"));
            UNKNOWN.to_string()
        }
    };

    Manifest { id, version }
}

fn unknown_manifest() -> Manifest {
    Manifest {
        id: None,
        version: UNKNOWN.to_string(),
    }
}
