//! Summary Box Renderer
//!
//! Reads the ten dashboard counters from a [`JobSummary`] in fixed order and
//! writes the resulting fragment into a container through a [`UiSink`].

use serde::Serialize;
use serde_json::Number;

use crate::error::{RenderError, SummaryBoxError};
use crate::formatters::HtmlFormatter;
use crate::sink::{ContainerRef, UiSink};
use crate::summary::{coerce_count, JobSummary};

/// Status path for jobs running at a site
pub const STATUS_RUNNING: &str = "submit.running";
/// Status path for jobs submitted but not yet running
pub const STATUS_PENDING: &str = "submit.pending";
/// Status path for successfully finished jobs
pub const STATUS_SUCCESS: &str = "success";

/// Row labels in display order
pub const SUMMARY_LABELS: [&str; 10] = [
    "requests",
    "total events",
    "processed events",
    "created",
    "cooloff",
    "success",
    "failure",
    "queued",
    "running",
    "pending",
];

/// One labelled counter in the summary box
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: Number,
}

/// Collect the ten counters in display order
///
/// Stops at the first accessor that is missing or not numeric.
pub fn summary_rows(summary: &dyn JobSummary) -> Result<Vec<SummaryRow>, RenderError> {
    let [requests, total_events, processed_events, created, cooloff, success, failure, queued, running, pending] =
        SUMMARY_LABELS;

    let values = [
        (requests, summary.request_count()),
        (total_events, summary.total_events()),
        (processed_events, summary.processed_events()),
        (created, summary.wmbs_total_jobs()),
        (cooloff, summary.total_cooloff()),
        (success, summary.job_status(STATUS_SUCCESS)),
        (failure, summary.total_failure()),
        (queued, summary.total_queued()),
        (running, summary.job_status(STATUS_RUNNING)),
        (pending, summary.job_status(STATUS_PENDING)),
    ];

    values
        .into_iter()
        .map(|(label, value)| {
            coerce_count(label, value).map(|value| SummaryRow { label, value })
        })
        .collect()
}

/// Build the summary box fragment without writing it anywhere
pub fn render_fragment(summary: &dyn JobSummary) -> Result<String, RenderError> {
    let rows = summary_rows(summary)?;
    Ok(HtmlFormatter::format(&rows))
}

/// Render `summary` and replace the content of `container` with it
///
/// The container is resolved before any markup is built, and markup is fully
/// built before the container is touched, so a failure leaves the container
/// as it was.
pub fn render_summary_box<S>(
    summary: &dyn JobSummary,
    sink: &mut S,
    container: &ContainerRef,
) -> Result<(), SummaryBoxError>
where
    S: UiSink + ?Sized,
{
    sink.resolve(container)?;

    let markup = match render_fragment(summary) {
        Ok(markup) => markup,
        Err(e) => {
            tracing::warn!("Summary box for '{}' not rendered: {}", container, e);
            return Err(e.into());
        }
    };

    sink.replace_content(container, &markup)?;
    tracing::debug!("Rendered summary box into '{}' ({} bytes)", container, markup.len());
    Ok(())
}
