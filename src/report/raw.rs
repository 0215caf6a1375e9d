//! Inspector output as received, before normalization.
//!
//! The inspector has emitted three incompatible shapes over its lifetime and
//! carries no version tag, so the shape is recovered by probing which
//! signing fields are present, most specific first.

use serde::Serialize;
use serde_json::{Map, Value};

/// Field names written by the legacy (per-signature `has_*_sig`) inspector.
pub const LEGACY_FIELDS: &[&str] = &["has_pkcs7_sig", "has_cose_sig", "env", "cose_algorithm"];
/// Field names written by the split (`is_*_signed`) inspector.
pub const SPLIT_FIELDS: &[&str] = &["is_pkcs7_signed", "is_cose_signed"];
/// Field names written by the unified (`is_signed`) inspector.
pub const UNIFIED_FIELDS: &[&str] = &["is_signed"];
/// Field names common to every shape.
pub const COMMON_FIELDS: &[&str] = &[
    "has_manifest",
    "manifest",
    "kind",
    "pkcs7_algorithm",
    "is_staging",
    "signatures",
];

/// A raw inspector report: the verbatim JSON object the inspector produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawReport {
    fields: Map<String, Value>,
}

/// Result of looking up a single raw field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Field<T> {
    Absent,
    Present(T),
    /// The key exists but holds a value of the wrong type.
    Malformed,
}

impl<T> Field<T> {
    pub(crate) fn present(self) -> Option<T> {
        match self {
            Field::Present(v) => Some(v),
            Field::Absent | Field::Malformed => None,
        }
    }

    pub(crate) fn is_malformed(&self) -> bool {
        matches!(self, Field::Malformed)
    }
}

impl RawReport {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wrap a JSON value; anything other than an object is not a report.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The whole report as a JSON value, for raw-dump rendering.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    pub(crate) fn flag(&self, key: &str) -> Field<bool> {
        match self.fields.get(key) {
            None => Field::Absent,
            Some(Value::Bool(b)) => Field::Present(*b),
            Some(_) => Field::Malformed,
        }
    }

    /// String field; `null` reads as absent, and so does `""`, which older
    /// inspectors emitted for "no value".
    pub(crate) fn text(&self, key: &str) -> Field<&str> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Field::Absent,
            Some(Value::String(s)) if s.is_empty() => Field::Absent,
            Some(Value::String(s)) => Field::Present(s.as_str()),
            Some(_) => Field::Malformed,
        }
    }

    /// Detect which inspector generation produced this report.
    pub fn shape(&self) -> RawShape {
        if !self.flag("has_manifest").present().unwrap_or(false) {
            return RawShape::NoManifest;
        }
        if self.contains("has_pkcs7_sig") || self.contains("has_cose_sig") {
            RawShape::Legacy
        } else if self.contains("is_pkcs7_signed") || self.contains("is_cose_signed") {
            RawShape::Split
        } else if self.contains("is_signed") {
            RawShape::Unified
        } else {
            RawShape::Unrecognized
        }
    }
}

/// Shape of a raw report, as detected by field presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RawShape {
    /// `has_manifest` is false, absent or not a boolean.
    NoManifest,
    /// `has_pkcs7_sig` / `has_cose_sig` / `env`.
    Legacy,
    /// `is_pkcs7_signed` / `is_cose_signed` / `is_staging`.
    Split,
    /// `is_signed` / `is_staging`; COSE cannot be expressed.
    Unified,
    /// A manifest is present but none of the known signing probes are.
    Unrecognized,
}
