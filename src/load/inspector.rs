//! The inspector boundary.
//!
//! Archive parsing and signature detection live outside this crate. An
//! [`Inspector`] turns package bytes into a [`RawReport`] or fails; anything
//! it fails on is shown as "not an add-on".

use crate::error::{Result, SigviewError};
use crate::report::RawReport;
use serde_json::Value;
use tracing::debug;

/// Produces a raw report from package bytes.
pub trait Inspector {
    fn inspect(&self, bytes: &[u8]) -> Result<RawReport>;
}

impl<F> Inspector for F
where
    F: Fn(&[u8]) -> Result<RawReport>,
{
    fn inspect(&self, bytes: &[u8]) -> Result<RawReport> {
        self(bytes)
    }
}

/// Inspector for reports that were already extracted, i.e. the JSON object
/// an inspector writes out.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportInspector;

impl Inspector for JsonReportInspector {
    fn inspect(&self, bytes: &[u8]) -> Result<RawReport> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| {
            debug!("input is not a JSON report: {}", e);
            SigviewError::NotAnArchive(format!("not a JSON report: {}", e))
        })?;
        RawReport::from_value(value)
            .ok_or_else(|| SigviewError::NotAnArchive("expected a JSON object".to_string()))
    }
}
