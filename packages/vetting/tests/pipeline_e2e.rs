//! End-to-end tests for the record vetting pipeline.
//!
//! These tests drive the full flow against the mock client:
//! 1. Prompt construction from record fields
//! 2. Streamed answer collection (and the fallback path)
//! 3. Sanitization and gating
//! 4. Record validation and verdict computation

use serde_json::json;

use vetting::pipeline::{process_records, process_single_record, NoopObserver, PipelineConfig};
use vetting::testing::MockClient;
use vetting::{Record, RewriterConfig, SanitizeConfig, SENTINEL_TEXT};

const GOOD_RESPONSE: &str = r#"1. Route map approvals cannot be sequenced for teaching staff to meet compliance obligations.
2. HR notifications cannot be triggered for new hires as required by policy.
3. Approval templates cannot be localized per statutory directive.
{"validation":[
  {"item":1,"object":"Route Map","module":"rcm","impact":"Approvals blocked","config_required":"yes","evidence_pointer":"https://help.sap.com/viewer/123","control":"governance"},
  {"item":2,"object":"Notifications","module":"rcm","impact":"HR not alerted","config_required":"no","evidence_pointer":"https://help.sap.com/viewer/456","control":"notification-content"},
  {"item":3,"object":"Templates","module":"rcm","impact":"Localization gap","config_required":"yes","evidence_pointer":"sap kba 7654321","control":"localization"}
]}"#;

fn workflow_record() -> Record {
    serde_json::from_value(json!({
        "Title": "Approval routing",
        "Description": "Workflow approvals for teaching staff with routing gaps.",
        "Area": ["HR"],
        "Product": ["Recruiting"],
    }))
    .unwrap()
}

fn config() -> PipelineConfig {
    PipelineConfig {
        sanitize: SanitizeConfig::default(),
        rewriter: RewriterConfig {
            enabled: false,
            ..RewriterConfig::default()
        },
    }
}

#[tokio::test]
async fn test_well_formed_answer_passes_end_to_end() {
    let client = MockClient::new(GOOD_RESPONSE);
    let record = workflow_record();

    let processed = process_single_record(&record, 1, 1, &client, &config(), &NoopObserver).await;

    assert_eq!(processed.processed, Some(true));
    assert!(processed.failure_reason.is_none());

    let metrics = processed.metrics.unwrap();
    assert_eq!(metrics.items, 3);
    assert_eq!(metrics.validation_rows, 3);

    // Modules are written back in canonical spelling.
    let rows = &processed.validation.as_ref().unwrap().validation;
    assert!(rows.iter().all(|row| row.module == "RCM"));

    // Input fields survive the whole trip.
    assert_eq!(processed.title(), "Approval routing");
}

#[tokio::test]
async fn test_positive_only_answer_lands_on_sentinel() {
    let client = MockClient::new("1. The system supports CSV export.\n{\"validation\":[]}");
    let record: Record = serde_json::from_value(json!({
        "Title": "Export",
        "Description": "Unrelated description.",
    }))
    .unwrap();

    let processed = process_single_record(&record, 1, 1, &client, &config(), &NoopObserver).await;

    assert_eq!(processed.research_analysis.as_deref(), Some(SENTINEL_TEXT));
    assert_eq!(processed.processed, Some(true));
}

#[tokio::test]
async fn test_sentinel_with_rows_is_flagged() {
    // Sentinel text but a validation block with a surviving row.
    let raw = format!(
        "{SENTINEL_TEXT}\n{}",
        r#"{"validation":[{"item":1,"object":"X","module":"rcm","impact":"i","config_required":"no","evidence_pointer":"https://help.sap.com/a","control":"privacy"}]}"#
    );
    let client = MockClient::new(raw);
    let record = workflow_record();

    let processed = process_single_record(&record, 1, 1, &client, &config(), &NoopObserver).await;

    assert_eq!(processed.processed, Some(false));
    assert!(processed
        .failure_reason
        .as_deref()
        .unwrap()
        .contains("sentinel_with_validation"));
}

#[tokio::test]
async fn test_fallback_path_produces_identical_verdict() {
    let streaming = MockClient::new(GOOD_RESPONSE);
    let falling_back = MockClient::new(GOOD_RESPONSE).with_stream_failure();
    let record = workflow_record();

    let a = process_single_record(&record, 1, 1, &streaming, &config(), &NoopObserver).await;
    let b = process_single_record(&record, 1, 1, &falling_back, &config(), &NoopObserver).await;

    assert_eq!(a.research_analysis, b.research_analysis);
    assert_eq!(a.processed, b.processed);
    assert_eq!(falling_back.once_calls(), 1);
}

#[tokio::test]
async fn test_batch_outcomes_are_independent() {
    let client = MockClient::new(GOOD_RESPONSE);
    let good = workflow_record();
    let off_topic: Record = serde_json::from_value(json!({
        "Title": "Other",
        "Description": "Unique identifier collisions for requisition IDs.",
    }))
    .unwrap();

    let processed = process_records(
        &[good, off_topic],
        &client,
        &config(),
        None,
        &NoopObserver,
    )
    .await;

    assert_eq!(processed.len(), 2);
    assert_eq!(processed[0].processed, Some(true));
    // The identifier topic gates every item out, so the second record lands
    // on the sentinel while still carrying rows: a contradiction. The batch
    // completed regardless.
    assert_eq!(processed[1].processed, Some(false));
    assert!(processed[1]
        .failure_reason
        .as_deref()
        .unwrap()
        .contains("sentinel_with_validation"));
}
