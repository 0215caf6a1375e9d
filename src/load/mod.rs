//! Load controller: the single entry point from a file selection to the
//! rendering sink.
//!
//! Byte reads are asynchronous and may complete out of order. Every
//! selection takes a [`LoadTicket`] from a monotonically increasing
//! [`Sequencer`] at selection time, and a completed load is delivered only
//! if its ticket is still the latest one. Superseded work is not aborted,
//! its result is dropped on arrival.

pub mod inspector;
pub mod source;

use crate::classify::classify;
use crate::config::SigviewConfig;
use crate::error::{Result, SigviewError};
use crate::present::{present, DisplayModel, RenderSink};
use crate::report::{adapt_with_issues, RawReport, SchemaIssue};
use crate::timeout::{with_timeout, TimeoutConfig};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub use inspector::{Inspector, JsonReportInspector};
pub use source::{BoundedReader, ByteSource, FileByteSource, IOLimits, SafeFileReader};

/// Position of a load in selection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Hands out load tickets and remembers the latest one.
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket. The first ticket is sequence 1.
    pub fn next_ticket(&self) -> LoadTicket {
        LoadTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn latest(&self) -> Option<LoadTicket> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            n => Some(LoadTicket(n)),
        }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// What happened to a load once its bytes were processed.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The model was handed to the sink.
    Delivered(DisplayModel),
    /// A later selection was made before this load completed.
    Superseded {
        ticket: LoadTicket,
        latest: LoadTicket,
    },
}

impl LoadOutcome {
    pub fn delivered(&self) -> Option<&DisplayModel> {
        match self {
            LoadOutcome::Delivered(model) => Some(model),
            LoadOutcome::Superseded { .. } => None,
        }
    }
}

/// Run the pure pipeline on a raw report.
pub fn summarize(raw: &RawReport) -> (DisplayModel, Vec<SchemaIssue>) {
    let (report, issues) = adapt_with_issues(raw);
    let state = classify(&report);
    (present(&report, state), issues)
}

/// Orchestrates byte source, inspector, the pure stages and the sink.
pub struct LoadController<I, S, R> {
    inspector: I,
    source: S,
    sink: R,
    sequencer: Sequencer,
    read_timeout: Duration,
}

impl<I, S, R> LoadController<I, S, R>
where
    I: Inspector,
    S: ByteSource,
    R: RenderSink,
{
    pub fn new(inspector: I, source: S, sink: R) -> Self {
        Self {
            inspector,
            source,
            sink,
            sequencer: Sequencer::new(),
            read_timeout: Duration::from_secs(crate::timeout::DEFAULT_TIMEOUT_SECONDS),
        }
    }

    pub fn with_config(mut self, config: &SigviewConfig) -> Self {
        self.read_timeout = Duration::from_secs(config.load.read_timeout_seconds);
        self
    }

    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn latest_ticket(&self) -> Option<LoadTicket> {
        self.sequencer.latest()
    }

    /// Inspect bytes and build their display model. Never fails: anything
    /// the inspector rejects becomes the not-an-add-on model.
    pub fn analyze(&self, bytes: &[u8]) -> DisplayModel {
        match self.inspector.inspect(bytes) {
            Ok(raw) => {
                let (model, issues) = summarize(&raw);
                for issue in &issues {
                    debug!(issue = %issue, "schema issue");
                }
                model
            }
            Err(e) => {
                warn!(error = %e, bytes = bytes.len(), "inspector rejected input");
                DisplayModel::not_an_addon()
            }
        }
    }

    /// Handle a file selection. `None` means the user chose nothing.
    ///
    /// The ticket is taken before the returned future is first polled, so
    /// selection order, not completion order, decides which load wins.
    pub fn on_file_selected<'a>(
        &'a self,
        handle: Option<S::Handle>,
    ) -> impl Future<Output = LoadOutcome> + 'a
    where
        S::Handle: 'a,
    {
        let ticket = self.sequencer.next_ticket();
        info!(sequence = ticket.sequence(), "load started");

        async move {
            let model = match self.read(handle).await {
                Ok(bytes) => self.analyze(&bytes),
                Err(e) => {
                    warn!(sequence = ticket.sequence(), error = %e, "load failed");
                    DisplayModel::not_an_addon()
                }
            };
            self.deliver(ticket, model)
        }
    }

    async fn read(&self, handle: Option<S::Handle>) -> Result<Vec<u8>> {
        let handle = handle.ok_or(SigviewError::NoFileChosen)?;
        let config = TimeoutConfig {
            duration: self.read_timeout,
            log_warnings: true,
            operation_name: "byte read".to_string(),
        };
        with_timeout(config, self.source.read(handle)).await
    }

    fn deliver(&self, ticket: LoadTicket, model: DisplayModel) -> LoadOutcome {
        if let Some(latest) = self.sequencer.latest().filter(|l| *l != ticket) {
            info!(
                sequence = ticket.sequence(),
                latest = latest.sequence(),
                "discarding superseded load"
            );
            return LoadOutcome::Superseded { ticket, latest };
        }

        if let Err(e) = self.sink.render(&model) {
            error!(sequence = ticket.sequence(), error = %e, "rendering sink failed");
        }
        info!(sequence = ticket.sequence(), state = %model.state, "load delivered");
        LoadOutcome::Delivered(model)
    }
}
