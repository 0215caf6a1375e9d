//! Signing-status summaries for browser add-on packages.
//!
//! An external inspector turns package bytes into a raw report whose shape
//! depends on the inspector generation. This crate normalizes every known
//! shape into one [`SigningReport`], classifies it into a [`SigningState`]
//! and presents it as a toolkit-independent [`DisplayModel`].
//!
//! # Example
//!
//! ```
//! use addon_sigview::{adapt, classify, present, RawReport, SigningState};
//! use serde_json::json;
//!
//! let raw = RawReport::from_value(json!({
//!     "has_manifest": true,
//!     "manifest": {"id": "abc", "version": "1.0"},
//!     "is_pkcs7_signed": true,
//!     "is_cose_signed": false,
//!     "is_staging": true,
//!     "pkcs7_algorithm": "SHA-1",
//! }))
//! .unwrap();
//!
//! let report = adapt(&raw);
//! let state = classify(&report);
//! assert_eq!(state, SigningState::Pkcs7Only);
//!
//! let model = present(&report, state);
//! assert!(model.summary_text().contains("not signed with COSE"));
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod load;
pub mod logging;
pub mod present;
pub mod report;
pub mod timeout;

pub use classify::{classify, SigningState};
pub use config::{OutputFormat, SigviewConfig};
pub use error::{Result, SigviewError};
pub use load::{
    summarize, ByteSource, FileByteSource, Inspector, JsonReportInspector, LoadController,
    LoadOutcome, LoadTicket,
};
pub use present::{present, DisplayModel, Marker, RenderSink, Span, SummaryLine};
pub use report::{adapt, adapt_with_issues, Environment, RawReport, SchemaIssue, SigningReport};
