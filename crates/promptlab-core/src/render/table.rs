use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::escape_html;
use crate::dispatch::ResponseRecord;

/// One row of the session history: model, prompt, response, elapsed time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub model: String,
    pub prompt: String,
    pub response: String,
    pub time_elapsed: String,
}

impl HistoryRow {
    pub fn from_record(record: &ResponseRecord) -> Self {
        Self {
            model: record.model.clone(),
            prompt: format_prompt_cell(&record.prompt),
            response: record.response.clone(),
            time_elapsed: record
                .time_elapsed
                .map(|t| format!("{:.3}s", t))
                .unwrap_or_default(),
        }
    }

    pub fn cells(&self) -> [&str; 4] {
        [&self.model, &self.prompt, &self.response, &self.time_elapsed]
    }
}

/// Text for the prompt column. Message arrays show one JSON-encoded entry
/// per line; plain strings show as-is.
pub fn format_prompt_cell(prompt: &Value) -> String {
    match prompt {
        Value::Array(entries) => entries
            .iter()
            .map(|entry| entry.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Append-only record of every successful request in a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryTable {
    rows: Vec<HistoryRow>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, row: HistoryRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from(
            "<table id=\"history-table\">\n<thead><tr><th>Model</th><th>Prompt</th>\
<th>Response</th><th>Time Elapsed</th></tr></thead>\n<tbody>\n",
        );
        for row in &self.rows {
            html.push_str("<tr>");
            for cell in row.cells() {
                html.push_str("<td>");
                html.push_str(&escape_html(cell));
                html.push_str("</td>");
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(response: &str, time_elapsed: Option<f64>) -> ResponseRecord {
        ResponseRecord {
            model: "gpt-4o-mini".to_string(),
            prompt: json!([
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": "0.4 + 0.8?"}
            ]),
            response: response.to_string(),
            time_elapsed,
        }
    }

    #[test]
    fn test_prompt_array_is_one_json_entry_per_line() {
        let row = HistoryRow::from_record(&record("1.2", None));
        assert_eq!(
            row.prompt,
            "{\"role\":\"system\",\"content\":\"Be brief.\"}\n{\"role\":\"user\",\"content\":\"0.4 + 0.8?\"}"
        );
    }

    #[test]
    fn test_scalar_prompt_used_as_is() {
        assert_eq!(format_prompt_cell(&json!("hello")), "hello");
        assert_eq!(format_prompt_cell(&Value::Null), "");
    }

    #[test]
    fn test_time_three_decimals_or_blank() {
        assert_eq!(
            HistoryRow::from_record(&record("x", Some(1.23456))).time_elapsed,
            "1.235s"
        );
        assert_eq!(HistoryRow::from_record(&record("x", None)).time_elapsed, "");
    }

    #[test]
    fn test_table_grows_by_one_row_per_append() {
        let mut table = HistoryTable::new();
        for n in 0..5 {
            table.append(HistoryRow::from_record(&record(&format!("answer {n}"), Some(0.5))));
            assert_eq!(table.len(), n + 1);
        }
        assert_eq!(table.rows()[0].response, "answer 0");
        assert_eq!(table.rows()[4].response, "answer 4");
    }

    #[test]
    fn test_html_cells_are_escaped() {
        let mut table = HistoryTable::new();
        table.append(HistoryRow::from_record(&record("<b>bold</b>", Some(2.0))));
        let html = table.to_html();
        assert!(html.contains("&lt;b&gt;bold&lt;"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("<td>2.000s</td>"));
    }
}
