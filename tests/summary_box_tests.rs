//! Summary Box Integration Tests
//!
//! Drives the whole path from WMStats summary JSON to a rendered container.

use std::fs;
use std::path::PathBuf;

use wmstats_summary_box::{
    render_summary_box, summary_rows, ContainerRef, FileSink, FileSinkConfig, JsonFormatter,
    MemorySink, RenderError, RequestSummary, SummaryBoxError, UiSink,
};

const REQUEST_A: &str = r#"{
    "totalEvents": 60,
    "processedEvents": 30,
    "status": {
        "success": 5,
        "failure": {"exception": 1},
        "cooloff": {"submit": 1},
        "queued": {"first": 2},
        "submit": {"running": 2, "pending": 1}
    }
}"#;

const REQUEST_B: &str = r#"{
    "totalEvents": 40,
    "processedEvents": 20,
    "status": {
        "success": 3,
        "cooloff": {"job": 1},
        "queued": {"first": 1, "retry": 1},
        "submit": {"running": 1, "pending": 1}
    }
}"#;

const REQUEST_C: &str = r#"{"status": {}}"#;

fn three_requests() -> RequestSummary {
    let requests: Vec<RequestSummary> = [REQUEST_A, REQUEST_B, REQUEST_C]
        .iter()
        .map(|json| RequestSummary::from_json_str(json).unwrap())
        .collect();
    RequestSummary::aggregate(&requests)
}

fn list_items(html: &str) -> Vec<String> {
    html.lines()
        .filter_map(|line| line.strip_prefix("<li>")?.strip_suffix("</li>"))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_aggregated_requests_render_expected_rows() {
    let summary = three_requests();
    let container = ContainerRef::new("#summary_box");
    let mut sink = MemorySink::with_containers(["summary_box"]);

    render_summary_box(&summary, &mut sink, &container).unwrap();

    assert_eq!(
        list_items(sink.content(&container).unwrap()),
        vec![
            "requests: 3",
            "total events: 100",
            "processed events: 50",
            "created: 20",
            "cooloff: 2",
            "success: 8",
            "failure: 1",
            "queued: 4",
            "running: 3",
            "pending: 2",
        ]
    );
}

#[test]
fn test_bad_status_value_leaves_container_unmodified() {
    let summary = RequestSummary::from_json_str(
        r#"{"status": {"submit": {"running": "several"}}}"#,
    )
    .unwrap();
    let container = ContainerRef::new("summary_box");
    let mut sink = MemorySink::with_containers(["summary_box"]);
    sink.replace_content(&container, "<p>last good render</p>").unwrap();

    let err = render_summary_box(&summary, &mut sink, &container).unwrap_err();

    // "created" already sums submit.running, so it is the first row to fail
    match err {
        SummaryBoxError::Render(RenderError::NotNumeric { field, found }) => {
            assert_eq!(field, "created");
            assert!(found.contains("submit.running"));
            assert!(found.contains("several"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(sink.content(&container), Some("<p>last good render</p>"));
}

#[test]
fn test_float_and_negative_leaves_never_render_silently() {
    let container = ContainerRef::new("summary_box");
    let mut sink = MemorySink::with_containers(["summary_box"]);

    let floats = RequestSummary::from_json_str(
        r#"{"status": {"queued": {"first": 2.0, "retry": 1}}}"#,
    )
    .unwrap();
    render_summary_box(&floats, &mut sink, &container).unwrap();
    let html = sink.content(&container).unwrap();
    assert!(html.contains("<li>queued: 3</li>"));
    assert!(html.contains("<li>created: 3</li>"));

    let negative = RequestSummary::from_json_str(
        r#"{"status": {"failure": {"create": -1, "submit": 4, "exception": 5}}}"#,
    )
    .unwrap();
    assert!(matches!(
        render_summary_box(&negative, &mut sink, &container),
        Err(SummaryBoxError::Render(RenderError::NotNumeric { .. }))
    ));
    assert!(sink.content(&container).unwrap().contains("<li>queued: 3</li>"));
}

#[test]
fn test_aggregation_order_does_not_hide_bad_data() {
    let bad = RequestSummary::from_json_str(r#"{"status": {"queued": {"first": "n/a"}}}"#).unwrap();
    let good = RequestSummary::from_json_str(r#"{"status": {"queued": {"first": 1}}}"#).unwrap();

    for summary in [
        RequestSummary::aggregate([&bad, &good]),
        RequestSummary::aggregate([&good, &bad]),
    ] {
        assert!(wmstats_summary_box::render_fragment(&summary).is_err());
    }
}

#[test]
fn test_file_sink_round_trip() {
    let dir: PathBuf =
        std::env::temp_dir().join(format!("wmstats_summary_it_{}", std::process::id()));
    let mut sink = FileSink::new(FileSinkConfig {
        output_dir: dir.clone(),
        ..FileSinkConfig::default()
    });
    let container = ContainerRef::new("summary_box");

    // No file yet: the container does not exist
    assert!(matches!(
        render_summary_box(&three_requests(), &mut sink, &container),
        Err(SummaryBoxError::TargetNotFound(_))
    ));
    assert!(!dir.join("summary_box.html").exists());

    let path = sink.create_container(&container).unwrap();
    render_summary_box(&three_requests(), &mut sink, &container).unwrap();
    let first = fs::read_to_string(&path).unwrap();
    render_summary_box(&three_requests(), &mut sink, &container).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), first);
    assert!(first.contains("<li>requests: 3</li>"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_json_rows_follow_display_order() {
    let rows = summary_rows(&three_requests()).unwrap();
    let json = JsonFormatter::format_compact(&rows).unwrap();

    assert!(json.starts_with(r#"[{"label":"requests","value":3},"#));
    assert!(json.ends_with(r#"{"label":"pending","value":2}]"#));
}
