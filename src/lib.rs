//! WMStats Summary Box
//!
//! Renders the job summary box of the WMStats monitoring dashboard: ten
//! counters (requests, events, and job counts by state) read from an
//! aggregated summary and written as an HTML list into a container.
//!
//! - `summary/`: the [`JobSummary`] capability trait and the WMStats-backed
//!   [`RequestSummary`]
//! - `renderer`: fixed-order row collection and [`render_summary_box`]
//! - `formatters/`: HTML and JSON output for the rows
//! - `sink/`: containers the markup is written into (memory, files)

pub mod error;
pub mod formatters;
pub mod renderer;
pub mod sink;
pub mod summary;

// Re-export commonly used types
pub use error::{RenderError, SinkError, SummaryBoxError, TargetNotFoundError};
pub use formatters::{HtmlFormatter, JsonFormatter};
pub use renderer::{render_fragment, render_summary_box, summary_rows, SummaryRow, SUMMARY_LABELS};
pub use sink::{ContainerRef, FileSink, FileSinkConfig, MemorySink, UiSink};
pub use summary::{coerce_count, JobSummary, RequestSummary};
