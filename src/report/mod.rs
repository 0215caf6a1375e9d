//! Inspector reports: raw shapes, the canonical model, and the adapter
//! between them.

pub mod adapter;
pub mod canonical;
pub mod raw;

pub use adapter::{adapt, adapt_with_issues, SchemaIssue, UNKNOWN};
pub use canonical::{
    CoseSignature, Environment, Manifest, Pkcs7Signature, SchemaGeneration, SigningReport,
};
pub use raw::{RawReport, RawShape};
