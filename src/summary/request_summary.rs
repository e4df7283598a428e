//! WMStats Request Summary
//!
//! Concrete [`JobSummary`] over the request/job-status document WMStats
//! serves to the dashboard. The status tree is nested by job state:
//!
//! ```text
//! { "success": 8,
//!   "failure": { "create": 0, "submit": 0, "exception": 1 },
//!   "cooloff": { "create": 0, "submit": 0, "job": 2 },
//!   "queued":  { "first": 3, "retry": 1 },
//!   "submit":  { "running": 3, "pending": 2 },
//!   "paused":  { "create": 0, "submit": 0, "job": 0 } }
//! ```
//!
//! Missing paths count as zero, matching how the dashboard treats agents that
//! have not reported a state yet. Anything that is present but is not a
//! count (negative, fractional, text, a group where a count belongs, or a sum
//! past `u64::MAX`) becomes a `not_a_count` marker object, which the renderer
//! rejects. Markers survive aggregation regardless of input order.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

use super::JobSummary;

const FAILURE_PATHS: &[&str] = &["failure.create", "failure.submit", "failure.exception"];
const COOLOFF_PATHS: &[&str] = &["cooloff.create", "cooloff.submit", "cooloff.job"];
const QUEUED_PATHS: &[&str] = &["queued.first", "queued.retry"];
const PAUSED_PATHS: &[&str] = &["paused.create", "paused.submit", "paused.job"];
const SUBMITTED_PATHS: &[&str] = &["submit.running", "submit.pending"];

/// Key identifying a marker object in the status tree
const NOT_A_COUNT: &str = "not_a_count";

/// Aggregated job counts for one or more requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    /// Number of requests in this summary; a lone request document counts as one
    #[serde(default = "single_request", deserialize_with = "lenient_count")]
    pub length: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_events: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub processed_events: u64,
    /// Job-status tree keyed by state, see module docs
    #[serde(default)]
    pub status: Map<String, Value>,
    /// Top-level tallies that overflowed while aggregating
    #[serde(skip)]
    overflowed: BTreeSet<&'static str>,
}

fn single_request() -> u64 {
    1
}

/// Accept the same count spellings as status leaves (`3`, `3.0`, `"3"`)
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    as_count(&value).ok_or_else(|| {
        serde::de::Error::custom(format!("expected a non-negative count, found {value}"))
    })
}

impl Default for RequestSummary {
    fn default() -> Self {
        Self {
            length: 0,
            total_events: 0,
            processed_events: 0,
            status: Map::new(),
            overflowed: BTreeSet::new(),
        }
    }
}

/// A file may hold one summary or a list of per-request summaries
#[derive(Deserialize)]
#[serde(untagged)]
enum SummaryDocument {
    Many(Vec<RequestSummary>),
    One(RequestSummary),
}

impl RequestSummary {
    /// Parse a single summary from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).with_context(|| "Failed to parse request summary JSON")
    }

    /// Load every summary in a JSON file (object or array of objects)
    pub fn load(path: &Path) -> Result<Vec<Self>> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read summary file: {:?}", path))?;

        let doc: SummaryDocument = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse summary file: {:?}", path))?;

        Ok(match doc {
            SummaryDocument::Many(list) => list,
            SummaryDocument::One(summary) => vec![summary],
        })
    }

    /// Fold many summaries into one
    pub fn aggregate<'a, I>(summaries: I) -> Self
    where
        I: IntoIterator<Item = &'a RequestSummary>,
    {
        let mut total = Self::default();
        for summary in summaries {
            total.absorb(summary);
        }
        total
    }

    /// Add another summary's requests, events and job counts into this one
    pub fn absorb(&mut self, other: &RequestSummary) {
        self.overflowed.extend(other.overflowed.iter().copied());
        self.length = self.add_tally("length", self.length, other.length);
        self.total_events = self.add_tally("totalEvents", self.total_events, other.total_events);
        self.processed_events =
            self.add_tally("processedEvents", self.processed_events, other.processed_events);
        merge_status(&mut self.status, &other.status, "");
    }

    fn add_tally(&mut self, field: &'static str, a: u64, b: u64) -> u64 {
        a.checked_add(b).unwrap_or_else(|| {
            tracing::warn!("'{}' overflowed while aggregating request summaries", field);
            self.overflowed.insert(field);
            u64::MAX
        })
    }

    fn tally(&self, field: &'static str, value: u64) -> Value {
        if self.overflowed.contains(field) {
            not_a_count(field, &json!("overflow"))
        } else {
            Value::from(value)
        }
    }

    /// Look up a dotted path in the status tree
    pub fn status_at(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut node = self.status.get(parts.next()?)?;
        for part in parts {
            node = node.as_object()?.get(part)?;
        }
        Some(node)
    }

    /// Jobs paused at any stage
    pub fn total_paused(&self) -> Value {
        into_value(self.sum_paths(PAUSED_PATHS))
    }

    /// Count at a dotted path; absent paths are 0, anything else non-count is a marker
    fn count_at(&self, path: &str) -> Result<u64, Value> {
        let mut parts = path.split('.');
        let Some(mut node) = parts.next().and_then(|first| self.status.get(first)) else {
            return Ok(0);
        };
        for part in parts {
            if is_marker(node) {
                return Err(node.clone());
            }
            match node {
                Value::Object(group) => match group.get(part) {
                    Some(child) => node = child,
                    None => return Ok(0),
                },
                leaf => return Err(not_a_count(path, leaf)),
            }
        }
        if is_marker(node) {
            return Err(node.clone());
        }
        as_count(node).ok_or_else(|| not_a_count(path, node))
    }

    fn sum_paths(&self, paths: &[&str]) -> Result<u64, Value> {
        let mut total = 0u64;
        for path in paths {
            let n = self.count_at(path)?;
            total = total
                .checked_add(n)
                .ok_or_else(|| not_a_count(&paths.join("+"), &json!("overflow")))?;
        }
        Ok(total)
    }
}

impl JobSummary for RequestSummary {
    fn request_count(&self) -> Option<Value> {
        Some(self.tally("length", self.length))
    }

    fn total_events(&self) -> Option<Value> {
        Some(self.tally("totalEvents", self.total_events))
    }

    fn processed_events(&self) -> Option<Value> {
        Some(self.tally("processedEvents", self.processed_events))
    }

    fn wmbs_total_jobs(&self) -> Option<Value> {
        let groups: [&[&str]; 6] = [
            &["success"],
            FAILURE_PATHS,
            COOLOFF_PATHS,
            QUEUED_PATHS,
            SUBMITTED_PATHS,
            PAUSED_PATHS,
        ];
        let mut total = 0u64;
        for group in groups {
            let part = match self.sum_paths(group) {
                Ok(n) => n,
                Err(marker) => return Some(marker),
            };
            total = match total.checked_add(part) {
                Some(t) => t,
                None => return Some(not_a_count("created", &json!("overflow"))),
            };
        }
        Some(Value::from(total))
    }

    fn total_cooloff(&self) -> Option<Value> {
        Some(into_value(self.sum_paths(COOLOFF_PATHS)))
    }

    fn job_status(&self, status: &str) -> Option<Value> {
        Some(into_value(self.count_at(status)))
    }

    fn total_failure(&self) -> Option<Value> {
        Some(into_value(self.sum_paths(FAILURE_PATHS)))
    }

    fn total_queued(&self) -> Option<Value> {
        Some(into_value(self.sum_paths(QUEUED_PATHS)))
    }
}

fn into_value(count: Result<u64, Value>) -> Value {
    count.map(Value::from).unwrap_or_else(|marker| marker)
}

/// Job counts are non-negative integers, possibly sent as integral reals or strings
fn as_count(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse().ok().or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

fn integral(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64).then(|| f as u64)
}

fn not_a_count(path: &str, found: &Value) -> Value {
    json!({ NOT_A_COUNT: path, "found": found })
}

fn is_marker(v: &Value) -> bool {
    v.as_object().is_some_and(|m| m.contains_key(NOT_A_COUNT))
}

/// Pick between two values when at least one is not a count
///
/// Markers beat raw values; ties go to the smaller serialisation so the result
/// does not depend on which side is which.
fn pick_non_count(a: &Value, b: &Value) -> Value {
    let rank = |v: &Value| match (is_marker(v), as_count(v)) {
        (true, _) => 0,
        (false, None) => 1,
        (false, Some(_)) => 2,
    };
    match rank(a).cmp(&rank(b)) {
        std::cmp::Ordering::Less => a.clone(),
        std::cmp::Ordering::Greater => b.clone(),
        std::cmp::Ordering::Equal => {
            if b.to_string() < a.to_string() {
                b.clone()
            } else {
                a.clone()
            }
        }
    }
}

fn merge_status(into: &mut Map<String, Value>, from: &Map<String, Value>, prefix: &str) {
    for (key, incoming) in from {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        let Some(current) = into.get_mut(key) else {
            into.insert(key.clone(), incoming.clone());
            continue;
        };

        let merged = if is_marker(current) || is_marker(incoming) {
            pick_non_count(current, incoming)
        } else {
            match (&mut *current, incoming) {
                (Value::Object(existing), Value::Object(incoming)) => {
                    merge_status(existing, incoming, &path);
                    continue;
                }
                (Value::Object(_), _) | (_, Value::Object(_)) => {
                    tracing::warn!("Status '{}' is a group in one summary and a count in another", path);
                    not_a_count(&path, &json!("group and count mixed"))
                }
                (existing, incoming) => match (as_count(existing), as_count(incoming)) {
                    (Some(a), Some(b)) => match a.checked_add(b) {
                        Some(sum) => Value::from(sum),
                        None => {
                            tracing::warn!("Status '{}' overflowed while aggregating", path);
                            not_a_count(&path, &json!("overflow"))
                        }
                    },
                    _ => pick_non_count(existing, incoming),
                },
            }
        };
        *current = merged;
    }
}
