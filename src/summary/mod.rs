//! Job Summary Capabilities
//!
//! The summary box only reads from a summary; it never builds one. Anything
//! that can answer the eight accessors below can be rendered, whether it is a
//! [`RequestSummary`] loaded from WMStats JSON or a hand-built test double.
//!
//! Accessors return raw JSON values because upstream aggregates are loosely
//! typed: counts may arrive as numbers or as numeric strings. The renderer
//! coerces them with [`coerce_count`].

pub mod request_summary;

pub use request_summary::RequestSummary;

use serde_json::{Number, Value};

use crate::error::RenderError;

/// Read-only view of an aggregated job summary
///
/// Each accessor returns `None` when the summary does not provide that
/// capability at all.
pub trait JobSummary {
    /// Number of requests folded into this summary
    fn request_count(&self) -> Option<Value>;

    /// Total events requested
    fn total_events(&self) -> Option<Value>;

    /// Events processed so far
    fn processed_events(&self) -> Option<Value>;

    /// Jobs created in WMBS
    fn wmbs_total_jobs(&self) -> Option<Value>;

    /// Jobs sitting in any cooloff state
    fn total_cooloff(&self) -> Option<Value>;

    /// Count for a dotted status path such as `"success"` or `"submit.running"`
    fn job_status(&self, status: &str) -> Option<Value>;

    /// Jobs failed at any stage
    fn total_failure(&self) -> Option<Value>;

    /// Jobs queued for first submission or retry
    fn total_queued(&self) -> Option<Value>;
}

/// Coerce an accessor result into a displayable number
///
/// Integral reals are normalised to integers so `3.0` displays as `3`.
pub fn coerce_count(field: &str, value: Option<Value>) -> Result<Number, RenderError> {
    let value = value.ok_or_else(|| RenderError::MissingField {
        field: field.to_string(),
    })?;

    let number = match &value {
        Value::Number(n) => normalize(n.clone()),
        Value::String(s) => parse_numeric(s.trim()),
        _ => None,
    };

    number.ok_or_else(|| RenderError::NotNumeric {
        field: field.to_string(),
        found: value.to_string(),
    })
}

fn parse_numeric(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    if let Ok(u) = s.parse::<u64>() {
        return Some(Number::from(u));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64).and_then(normalize)
}

fn normalize(n: Number) -> Option<Number> {
    if n.is_i64() || n.is_u64() {
        return Some(n);
    }
    let f = n.as_f64()?;
    if !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        return Some(Number::from(f as i64));
    }
    Some(n)
}
