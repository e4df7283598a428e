//! Error types for summary box rendering
//!
//! Rendering fails in two ways: the summary cannot supply a renderable value
//! for one of the counters, or the target container does not exist.

use thiserror::Error;

/// A summary field was absent or could not be turned into display text
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("summary is missing field '{field}'")]
    MissingField { field: String },

    #[error("summary field '{field}' is not numeric: {found}")]
    NotNumeric { field: String, found: String },
}

impl RenderError {
    /// Name of the summary field that failed
    pub fn field(&self) -> &str {
        match self {
            RenderError::MissingField { field } | RenderError::NotNumeric { field, .. } => field,
        }
    }
}

/// The container handle did not resolve to anything writable
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("container '{container}' not found")]
pub struct TargetNotFoundError {
    pub container: String,
}

/// Failure while writing markup into a sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error(transparent)]
    TargetNotFound(#[from] TargetNotFoundError),

    #[error("failed to write container '{container}'")]
    Io {
        container: String,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that can go wrong in [`crate::render_summary_box`]
#[derive(Debug, Error)]
pub enum SummaryBoxError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    TargetNotFound(#[from] TargetNotFoundError),

    #[error(transparent)]
    Sink(SinkError),
}

impl From<SinkError> for SummaryBoxError {
    fn from(err: SinkError) -> Self {
        match err {
            SinkError::TargetNotFound(e) => SummaryBoxError::TargetNotFound(e),
            other => SummaryBoxError::Sink(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_messages() {
        let err = RenderError::MissingField { field: "total queued".to_string() };
        assert_eq!(err.to_string(), "summary is missing field 'total queued'");
        assert_eq!(err.field(), "total queued");

        let err = RenderError::NotNumeric {
            field: "cooloff".to_string(),
            found: "null".to_string(),
        };
        assert_eq!(err.to_string(), "summary field 'cooloff' is not numeric: null");
    }

    #[test]
    fn test_sink_target_error_lifts_to_target_not_found() {
        let sink_err = SinkError::from(TargetNotFoundError { container: "box".to_string() });
        match SummaryBoxError::from(sink_err) {
            SummaryBoxError::TargetNotFound(e) => assert_eq!(e.container, "box"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
