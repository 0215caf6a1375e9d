use crate::common::raw;
use addon_sigview::{
    adapt, classify, present, summarize, Environment, Marker, SigningState, Span,
};
use serde_json::json;

#[test]
fn scenario_a_not_an_addon() {
    let raw = raw(json!({"has_manifest": false}));
    let report = adapt(&raw);
    let state = classify(&report);
    assert_eq!(state, SigningState::NoManifest);

    let model = present(&report, state);
    assert_eq!(model.summary_lines.len(), 1);
    assert_eq!(model.summary_lines[0].marker, Some(Marker::Warning));
    assert!(model.raw_dump.is_none());
}

#[test]
fn scenario_b_legacy_dual_signed() {
    let raw = raw(json!({
        "has_manifest": true,
        "manifest": {"id": "abc", "version": "1.0"},
        "has_pkcs7_sig": true,
        "has_cose_sig": true,
        "pkcs7_algorithm": "SHA256",
        "cose_algorithm": "ES256",
        "env": "production",
        "kind": "extension",
    }));
    let report = adapt(&raw);
    let state = classify(&report);
    assert_eq!(state, SigningState::DualSigned);

    let model = present(&report, state);
    let identity = &model.summary_lines[0];
    assert!(identity.spans.contains(&Span::Code("abc".to_string())));
    assert!(identity.spans.contains(&Span::Code("1.0".to_string())));
    assert!(identity.spans.contains(&Span::Strong("extension".to_string())));

    assert!(model.summary_lines[1].is_blank());

    let status = &model.summary_lines[2];
    assert_eq!(status.marker, Some(Marker::Locked));
    assert!(status.spans.contains(&Span::Strong("production".to_string())));
    assert!(status.spans.contains(&Span::Strong("SHA256".to_string())));
    assert!(status.spans.contains(&Span::Strong("ES256".to_string())));
    assert!(status.plain_text().contains("dual-signed"));
}

#[test]
fn scenario_c_unified_unsigned_without_id() {
    let raw = raw(json!({
        "has_manifest": true,
        "manifest": {"id": null, "version": "2.0"},
        "is_signed": false,
        "kind": "privileged",
    }));
    let report = adapt(&raw);
    let state = classify(&report);
    assert_eq!(state, SigningState::Unsigned);

    let model = present(&report, state);
    let identity = model.summary_lines[0].plain_text();
    assert!(identity.contains("no ID"));
    assert!(identity.contains("2.0"));
    assert!(!model.summary_text().contains("privileged"));
    assert!(identity.starts_with("This add-on"));

    assert_eq!(model.summary_lines[2].marker, Some(Marker::Failure));
    assert_eq!(
        model.summary_lines[2].plain_text(),
        "It doesn't appear to be signed."
    );
}

#[test]
fn scenario_d_split_pkcs7_only_on_staging() {
    let raw = raw(json!({
        "has_manifest": true,
        "manifest": {"version": "3.0"},
        "is_pkcs7_signed": true,
        "is_cose_signed": false,
        "is_staging": true,
        "pkcs7_algorithm": "SHA1",
    }));
    let report = adapt(&raw);
    assert_eq!(report.environment, Environment::Staging);
    let state = classify(&report);
    assert_eq!(state, SigningState::Pkcs7Only);

    let model = present(&report, state);
    let status = model.summary_lines[2].plain_text();
    assert!(status.contains("staging"));
    assert!(status.contains("not signed with COSE"));
    assert!(status.contains("SHA1"));
    assert_eq!(model.summary_lines[2].marker, Some(Marker::Unlocked));
}

#[test]
fn no_manifest_dump_never_leaks_input() {
    let raw = raw(json!({
        "has_manifest": false,
        "manifest": {"id": "secret@example.com", "version": "9.9"},
        "has_pkcs7_sig": true,
    }));
    let (model, _) = summarize(&raw);
    assert!(model.raw_dump.is_none());
    let json = serde_json::to_string(&model).unwrap();
    assert!(!json.contains("secret@example.com"));
    assert!(!json.contains("9.9"));
}

#[test]
fn legacy_dual_signed_dump_keeps_algorithms_verbatim() {
    let raw = raw(json!({
        "has_manifest": true,
        "manifest": {"id": "abc", "version": "1.0"},
        "has_pkcs7_sig": true,
        "has_cose_sig": true,
        "pkcs7_algorithm": "SHA-256",
        "cose_algorithm": "ES256",
        "env": "production",
        "kind": "regular",
    }));
    let (model, _) = summarize(&raw);
    let dump = model.raw_dump.expect("signed add-on has a raw dump");
    assert_eq!(dump["pkcs7_algorithm"], "SHA-256");
    assert_eq!(dump["cose_algorithm"], "ES256");

    let text = serde_json::to_string(&dump).unwrap();
    assert!(text.contains("SHA-256"));
    assert!(text.contains("ES256"));
}

#[test]
fn raw_dump_is_independent_of_wording() {
    let value = json!({
        "has_manifest": true,
        "manifest": {"version": "1.0"},
        "is_signed": true,
        "pkcs7_algorithm": "SHA-1",
        "future_field": {"nested": [1, 2, 3]},
    });
    let (model, issues) = summarize(&raw(value.clone()));
    assert_eq!(model.raw_dump, Some(value));
    assert_eq!(
        issues,
        vec![addon_sigview::SchemaIssue::UnknownField("future_field".to_string())]
    );
}
