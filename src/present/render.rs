//! Rendering sinks for display models.

use super::{DisplayModel, Span, SummaryLine};
use crate::config::OutputFormat;
use crate::error::{Result, SigviewError};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::sync::Mutex;

/// Receives exactly one display model per completed, current load.
pub trait RenderSink {
    fn render(&self, model: &DisplayModel) -> Result<()>;
}

fn raw_json(raw: &Value) -> Result<String> {
    serde_json::to_string_pretty(raw)
        .map_err(|e| SigviewError::Serialization(format!("JSON serialization error: {}", e)))
}

fn text_line(line: &SummaryLine) -> String {
    match line.marker {
        Some(marker) => format!("{} {}", marker.symbol(), line.plain_text()),
        None => line.plain_text(),
    }
}

/// Render a model as plain text, optionally followed by the raw dump.
pub fn render_text(model: &DisplayModel, show_raw: bool) -> Result<String> {
    let mut out: Vec<String> = model.summary_lines.iter().map(text_line).collect();
    if let (true, Some(raw)) = (show_raw, &model.raw_dump) {
        out.push(String::new());
        out.push(raw_json(raw)?);
    }
    Ok(out.join("\n"))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn html_line(line: &SummaryLine) -> String {
    let mut out = String::new();
    if let Some(marker) = line.marker {
        out.push_str(marker.symbol());
        out.push(' ');
    }
    for span in &line.spans {
        match span {
            Span::Text(s) => out.push_str(&escape_html(s)),
            Span::Strong(s) => out.push_str(&format!("<strong>{}</strong>", escape_html(s))),
            Span::Code(s) => out.push_str(&format!("<code>{}</code>", escape_html(s))),
        }
    }
    out
}

/// Render a model as an HTML fragment. Every interpolated value is escaped.
pub fn render_html(model: &DisplayModel, show_raw: bool) -> Result<String> {
    let lines: Vec<String> = model.summary_lines.iter().map(html_line).collect();
    let mut out = format!(
        "<div class=\"output-pretty\">\n{}\n</div>",
        lines.join("\n<br>\n")
    );
    if let (true, Some(raw)) = (show_raw, &model.raw_dump) {
        out.push_str(&format!(
            "\n<pre class=\"output-raw\">{}</pre>",
            escape_html(&raw_json(raw)?)
        ));
    }
    Ok(out)
}

#[derive(Serialize)]
struct JsonView<'a> {
    #[serde(flatten)]
    model: &'a DisplayModel,
    summary_text: String,
}

/// Render a model as JSON, with the plain-text summary alongside.
pub fn render_json(model: &DisplayModel, show_raw: bool) -> Result<String> {
    let stripped;
    let model = if show_raw {
        model
    } else {
        stripped = DisplayModel {
            raw_dump: None,
            ..model.clone()
        };
        &stripped
    };
    let view = JsonView {
        model,
        summary_text: model.summary_text(),
    };
    serde_json::to_string_pretty(&view)
        .map_err(|e| SigviewError::Serialization(format!("JSON serialization error: {}", e)))
}

/// Writes each model to an `io::Write` in the configured format.
pub struct WriterSink<W: Write> {
    writer: Mutex<W>,
    format: OutputFormat,
    show_raw: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: OutputFormat, show_raw: bool) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
            show_raw,
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|_| SigviewError::Render("writer lock poisoned".to_string()))
    }
}

impl<W: Write> RenderSink for WriterSink<W> {
    fn render(&self, model: &DisplayModel) -> Result<()> {
        let rendered = match self.format {
            OutputFormat::Text => render_text(model, self.show_raw)?,
            OutputFormat::Html => render_html(model, self.show_raw)?,
            OutputFormat::Json => render_json(model, self.show_raw)?,
        };
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| SigviewError::Render("writer lock poisoned".to_string()))?;
        writeln!(writer, "{}", rendered)?;
        writer.flush()?;
        Ok(())
    }
}

/// Keeps every delivered model in memory, most recent last.
#[derive(Debug, Default)]
pub struct MemorySink {
    models: Mutex<Vec<DisplayModel>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn models(&self) -> Vec<DisplayModel> {
        self.models
            .lock()
            .map(|models| models.clone())
            .unwrap_or_default()
    }

    pub fn latest(&self) -> Option<DisplayModel> {
        self.models().pop()
    }
}

impl RenderSink for MemorySink {
    fn render(&self, model: &DisplayModel) -> Result<()> {
        self.models
            .lock()
            .map_err(|_| SigviewError::Render("sink lock poisoned".to_string()))?
            .push(model.clone());
        Ok(())
    }
}

impl<S: RenderSink + ?Sized> RenderSink for &S {
    fn render(&self, model: &DisplayModel) -> Result<()> {
        (**self).render(model)
    }
}
