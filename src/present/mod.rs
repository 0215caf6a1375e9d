//! Presentation of a classified report as toolkit-independent summary lines.
//!
//! A [`DisplayModel`] is plain data: lines of marked-up spans plus the raw
//! inspector dump. Turning it into text, HTML or JSON is the job of a
//! [`render::RenderSink`].

pub mod render;

use crate::classify::SigningState;
use crate::report::{SigningReport, UNKNOWN};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use render::{render_html, render_json, render_text, MemorySink, RenderSink, WriterSink};

/// Leading status symbol of a summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Warning,
    Success,
    /// Signed with both PKCS#7 and COSE.
    Locked,
    /// Signed with PKCS#7 only.
    Unlocked,
    Failure,
}

impl Marker {
    pub fn symbol(&self) -> &'static str {
        match self {
            Marker::Warning => "⚠️",
            Marker::Success => "✅",
            Marker::Locked => "🔐",
            Marker::Unlocked => "🔓",
            Marker::Failure => "❌",
        }
    }
}

/// A run of text with optional emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", content = "text", rename_all = "lowercase")]
pub enum Span {
    Text(String),
    Strong(String),
    /// Identifiers and versions taken verbatim from the package.
    Code(String),
}

impl Span {
    pub fn text(&self) -> &str {
        match self {
            Span::Text(s) | Span::Strong(s) | Span::Code(s) => s,
        }
    }
}

fn text(s: impl Into<String>) -> Span {
    Span::Text(s.into())
}

fn strong(s: impl Into<String>) -> Span {
    Span::Strong(s.into())
}

fn code(s: impl Into<String>) -> Span {
    Span::Code(s.into())
}

/// One line of the summary. A line without marker or spans is a separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub marker: Option<Marker>,
    pub spans: Vec<Span>,
}

impl SummaryLine {
    pub fn new(marker: Marker, spans: Vec<Span>) -> Self {
        Self {
            marker: Some(marker),
            spans,
        }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.marker.is_none() && self.spans.is_empty()
    }

    /// The line's words without markers or markup.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(Span::text).collect()
    }
}

/// What the rendering sink receives for one load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub state: SigningState,
    pub summary_lines: Vec<SummaryLine>,
    /// Verbatim inspector payload; absent when the file is not an add-on.
    pub raw_dump: Option<Value>,
}

impl DisplayModel {
    /// The single warning shown for anything that is not an add-on.
    pub fn not_an_addon() -> Self {
        Self {
            state: SigningState::NoManifest,
            summary_lines: vec![SummaryLine::new(
                Marker::Warning,
                vec![text("This file doesn't look like an add-on.")],
            )],
            raw_dump: None,
        }
    }

    /// All summary lines as plain text, one per line.
    pub fn summary_text(&self) -> String {
        self.summary_lines
            .iter()
            .map(SummaryLine::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build the display model for a classified report.
pub fn present(report: &SigningReport, state: SigningState) -> DisplayModel {
    let manifest = match (&report.manifest, state) {
        (_, SigningState::NoManifest) | (None, _) => return DisplayModel::not_an_addon(),
        (Some(manifest), _) => manifest,
    };

    // An unsigned package's declared kind cannot be trusted.
    let mut identity = match report.kind.as_deref().filter(|_| state.is_signed()) {
        Some(kind) => vec![text("This "), strong(kind), text(" add-on")],
        None => vec![text("This add-on")],
    };
    match &manifest.id {
        Some(id) => identity.extend([
            text(" has the following ID in its manifest: "),
            code(id.as_str()),
            text(". Its version is: "),
        ]),
        None => identity.push(text(" has no ID in its manifest. Its version is: ")),
    }
    identity.extend([code(manifest.version.as_str()), text(".")]);

    DisplayModel {
        state,
        summary_lines: vec![
            SummaryLine::new(Marker::Success, identity),
            SummaryLine::blank(),
            status_line(report, state),
        ],
        raw_dump: report.raw_for_display.clone(),
    }
}

fn status_line(report: &SigningReport, state: SigningState) -> SummaryLine {
    let pkcs7 = match (&report.pkcs7, state) {
        (Some(pkcs7), SigningState::Pkcs7Only | SigningState::DualSigned) => pkcs7,
        _ => {
            return SummaryLine::new(
                Marker::Failure,
                vec![text("It doesn't appear to be signed.")],
            )
        }
    };

    let dual = state == SigningState::DualSigned;
    let mut spans = vec![
        text("It has been signed with the "),
        strong(report.environment.as_str()),
        text(" root certificate. "),
    ];

    if dual {
        spans.push(text("This add-on is dual-signed (PKCS#7 and COSE). "));
    } else if report.schema.is_some_and(|schema| schema.expresses_cose()) {
        spans.extend([
            text("This add-on is "),
            strong("not"),
            text(" signed with COSE. "),
        ]);
    }

    spans.extend([
        text("The PKCS#7 digest algorithm is: "),
        strong(pkcs7.algorithm.as_str()),
        text("."),
    ]);

    if dual {
        let algorithm = report
            .cose
            .as_ref()
            .and_then(|cose| cose.algorithm.as_deref())
            .unwrap_or(UNKNOWN);
        spans.extend([
            text(" The COSE algorithm is: "),
            strong(algorithm),
            text("."),
        ]);
    }

    let marker = if dual {
        Marker::Locked
    } else {
        Marker::Unlocked
    };
    SummaryLine::new(marker, spans)
}
