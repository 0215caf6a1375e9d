use addon_sigview::load::{ByteSource, FileByteSource, IOLimits, JsonReportInspector};
use addon_sigview::present::{MemorySink, WriterSink};
use addon_sigview::{LoadController, LoadOutcome, OutputFormat, Result, SigningState};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Byte source that returns the handle's bytes after the handle's delay.
struct DelayedSource;

impl ByteSource for DelayedSource {
    type Handle = (Duration, Vec<u8>);

    async fn read(&self, handle: (Duration, Vec<u8>)) -> Result<Vec<u8>> {
        let (delay, bytes) = handle;
        tokio::time::sleep(delay).await;
        Ok(bytes)
    }
}

fn unified_report(version: &str, signed: bool) -> Vec<u8> {
    serde_json::json!({
        "has_manifest": true,
        "manifest": {"version": version},
        "is_signed": signed,
        "is_staging": false,
        "pkcs7_algorithm": "SHA-256",
    })
    .to_string()
    .into_bytes()
}

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    file.as_file().write_all(bytes).unwrap();
    file
}

#[tokio::test]
async fn later_selection_wins_even_when_it_finishes_first() {
    let controller = LoadController::new(JsonReportInspector, DelayedSource, MemorySink::new());

    let first = controller.on_file_selected(Some((
        Duration::from_millis(80),
        unified_report("1.0", true),
    )));
    let second =
        controller.on_file_selected(Some((Duration::ZERO, unified_report("2.0", false))));

    let (first, second) = tokio::join!(first, second);

    match first {
        LoadOutcome::Superseded { ticket, latest } => {
            assert_eq!(ticket.sequence(), 1);
            assert_eq!(latest.sequence(), 2);
        }
        other => panic!("first load should be superseded, got {:?}", other),
    }
    assert_eq!(
        second.delivered().map(|m| m.state),
        Some(SigningState::Unsigned)
    );

    let models = controller.sink().models();
    assert_eq!(models.len(), 1);
    assert!(models[0].summary_text().contains("2.0"));
}

#[tokio::test]
async fn sequential_loads_are_all_delivered() {
    let controller = LoadController::new(JsonReportInspector, DelayedSource, MemorySink::new());
    for version in ["1.0", "2.0", "3.0"] {
        let outcome = controller
            .on_file_selected(Some((Duration::ZERO, unified_report(version, true))))
            .await;
        assert!(outcome.delivered().is_some());
    }
    assert_eq!(controller.sink().models().len(), 3);
    assert_eq!(controller.latest_ticket().map(|t| t.sequence()), Some(3));
}

#[tokio::test]
async fn file_source_end_to_end() {
    let good = write_temp(&unified_report("4.2", true));
    let garbage = write_temp(b"PK\x03\x04 definitely not a report");

    let sink = WriterSink::new(Vec::new(), OutputFormat::Text, false);
    let controller = LoadController::new(JsonReportInspector, FileByteSource::default(), &sink);

    let outcome = controller
        .on_file_selected(Some(good.path().to_path_buf()))
        .await;
    assert_eq!(
        outcome.delivered().map(|m| m.state),
        Some(SigningState::Pkcs7Only)
    );

    let outcome = controller
        .on_file_selected(Some(garbage.path().to_path_buf()))
        .await;
    assert_eq!(
        outcome.delivered().map(|m| m.state),
        Some(SigningState::NoManifest)
    );

    drop(controller);
    let written = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert!(written.contains("4.2"));
    assert!(written.contains("production"));
    assert!(written.contains("doesn't look like an add-on"));
    assert!(!written.contains("Error"));
}

#[tokio::test]
async fn oversized_file_renders_warning() {
    let big = write_temp(&unified_report("5.0", true));
    let source = FileByteSource::new(IOLimits { max_file_size: 8 });
    let controller = LoadController::new(JsonReportInspector, source, MemorySink::new());

    let outcome = controller
        .on_file_selected(Some(big.path().to_path_buf()))
        .await;
    assert_eq!(
        outcome.delivered().map(|m| m.state),
        Some(SigningState::NoManifest)
    );
}
