use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::SheetConfig;
use crate::sheet::is_valid_cell;

/// The persisted unit: grid rows plus free-text notes.
///
/// Serializes as `{ "data": [[...], ...], "notes": "..." }`, which is both the
/// stored format and the export file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    #[serde(default)]
    pub data: Vec<Vec<String>>,
    #[serde(default)]
    pub notes: String,
}

impl Sheet {
    /// A sheet with the configured number of rows, every cell blank
    pub fn blank(config: &SheetConfig) -> Self {
        Self {
            data: vec![vec![String::new(); config.cols]; config.rows],
            notes: String::new(),
        }
    }

    /// Build a sheet from any parsed JSON value without validating its shape.
    ///
    /// Values are read the way a loosely typed form would read them: `data`
    /// may be an array of rows or a string (one row per character), a string
    /// row yields one cell per character, and scalar cells or notes are
    /// rendered as text unless they are falsy (`null`, `false`, `0`, `""`).
    /// Anything else degrades to blanks. Row widths are left as found.
    pub fn from_value(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };

        let data = match map.remove("data") {
            Some(Value::Array(rows)) => rows.into_iter().map(row_from_value).collect(),
            Some(Value::String(text)) => text.chars().map(|c| vec![c.to_string()]).collect(),
            _ => Vec::new(),
        };

        let notes = map.remove("notes").map(|v| field_text(&v)).unwrap_or_default();

        Self { data, notes }
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Number of cells holding something other than blank or one `A-Z` letter
    pub fn invalid_cells(&self) -> usize {
        self.data
            .iter()
            .flatten()
            .filter(|cell| !is_valid_cell(cell))
            .count()
    }
}

fn row_from_value(row: Value) -> Vec<String> {
    match row {
        Value::Array(cells) => cells.iter().map(field_text).collect(),
        Value::String(text) => text.chars().map(String::from).collect(),
        _ => Vec::new(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text shown for a cell or the notes: blank when falsy, otherwise the value
/// as text
fn field_text(value: &Value) -> String {
    if is_truthy(value) {
        value_text(value)
    } else {
        String::new()
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            // f64 Display prints `5` for 5.0, unlike serde_json's `5.0`
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
