//! Report serialization to CSV, JSON and HTML.
//!
//! All three renderers share the canonical column set from
//! [`ReportRow::COLUMNS`]. The HTML renderer escapes every interpolated
//! value; report fields are attacker-influenced (file names, recipient
//! names) and must not be able to inject markup into the page.

use sharewatch_core::model::ReportRow;
use sharewatch_core::thresholds::{Severity, Thresholds};

use crate::bundle::ReportBundle;
use crate::error::RenderError;

/// Render the bundle as CSV: one header row, one line per report row,
/// standard quoting.
pub fn to_csv(bundle: &ReportBundle) -> String {
    let mut out = String::new();
    out.push_str(&ReportRow::COLUMNS.join(","));
    out.push('\n');

    for row in &bundle.rows {
        let line: Vec<String> = row_cells(row).iter().map(|c| csv_field(c)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

/// Render the bundle as a JSON array of row objects keyed by the canonical
/// column names. Nested structure in More Info is preserved.
pub fn to_json(bundle: &ReportBundle) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(&bundle.rows)?)
}

/// Render the bundle as a self-contained HTML page: title, run metadata,
/// threshold banner and the full table.
pub fn to_html(bundle: &ReportBundle, thresholds: &Thresholds, title: &str) -> String {
    let total = bundle.total();
    let severity = thresholds.classify(total as u64);

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    page.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 2em; }\n\
         table { border-collapse: collapse; width: 100%; }\n\
         th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: left; }\n\
         th { background: #f0f0f0; }\n\
         .banner { padding: 0.75em 1em; margin: 1em 0; border-radius: 4px; }\n\
         .warning { background: #fff3cd; border: 1px solid #ffe69c; }\n\
         .critical { background: #f8d7da; border: 1px solid #f1aeb5; }\n\
         </style>\n</head>\n<body>\n",
    );

    page.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    page.push_str(&format!(
        "<p>Generated {} &middot; range {} &ndash; {} &middot; {} record(s)</p>\n",
        html_escape(&bundle.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        html_escape(&bundle.range.start.format("%Y-%m-%d %H:%M UTC").to_string()),
        html_escape(&bundle.range.end.format("%Y-%m-%d %H:%M UTC").to_string()),
        total,
    ));

    match severity {
        Severity::Critical => page.push_str(&format!(
            "<div class=\"banner critical\">Critical: {} sharing events meet or exceed the critical threshold of {}.</div>\n",
            total, thresholds.critical,
        )),
        Severity::Warning => page.push_str(&format!(
            "<div class=\"banner warning\">Warning: {} sharing events meet or exceed the warning threshold of {}.</div>\n",
            total, thresholds.warning,
        )),
        Severity::Normal => {}
    }

    page.push_str("<table>\n<thead>\n<tr>");
    for column in ReportRow::COLUMNS {
        page.push_str(&format!("<th>{}</th>", html_escape(column)));
    }
    page.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &bundle.rows {
        page.push_str("<tr>");
        for cell in row_cells(row) {
            page.push_str(&format!("<td>{}</td>", html_escape(&cell)));
        }
        page.push_str("</tr>\n");
    }

    page.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    page
}

/// The nine cell values of a row, in column order. More Info collapses to
/// compact JSON for the tabular formats.
pub(crate) fn row_cells(row: &ReportRow) -> [String; 9] {
    [
        row.sharing_time.clone(),
        row.shared_by.clone(),
        row.shared_with.clone(),
        row.resource_type.clone(),
        row.resource.clone(),
        row.site_url.clone(),
        row.sharing_type.clone(),
        row.system.clone(),
        row.more_info.to_string(),
    ]
}

/// Quote a CSV field when it contains a delimiter, quote or line break;
/// embedded quotes are doubled.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Escape the characters HTML assigns meaning to.
pub(crate) fn html_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
