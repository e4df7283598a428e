use crate::renderer::SummaryRow;

/// JSON formatter for summary rows, for dashboards that build their own markup
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format rows as a pretty-printed JSON array of `{label, value}`
    pub fn format(rows: &[SummaryRow]) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(rows)
    }

    /// Format rows as compact JSON (no whitespace)
    pub fn format_compact(rows: &[SummaryRow]) -> Result<String, serde_json::Error> {
        serde_json::to_string(rows)
    }
}
