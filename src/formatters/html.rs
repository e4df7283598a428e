use crate::renderer::SummaryRow;

/// HTML formatter for the summary box
pub struct HtmlFormatter;

impl HtmlFormatter {
    /// Format rows as the summary box fragment, one list item per counter
    pub fn format(rows: &[SummaryRow]) -> String {
        let mut html = String::with_capacity(64 + rows.len() * 32);

        html.push_str("<div class=\"summary_box\">\n");
        html.push_str("<ul>\n");
        for row in rows {
            html.push_str(&format!("<li>{}: {}</li>\n", row.label, row.value));
        }
        html.push_str("</ul>\n");
        html.push_str("</div>\n");
        html
    }
}
