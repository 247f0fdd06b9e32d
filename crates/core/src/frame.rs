//! Row-major data frame: ordered column names, ordered rows of cells.
//!
//! Survey exports are small (hundreds of respondents), so the frame is a
//! plain `Vec<Vec<Value>>` — no sparse storage, no interning.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Empty,
    Text(String),
    Number(f64),
}

impl Default for Value {
    fn default() -> Self {
        Value::Empty
    }
}

impl Value {
    /// Parse a raw input field. Numeric-looking text becomes `Number` at load
    /// time, so downstream numeric reads never re-parse strings.
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Value::Empty;
        }

        if let Ok(num) = trimmed.parse::<f64>() {
            return Value::Number(num);
        }

        Value::Text(trimmed.to_string())
    }

    /// Lenient numeric read: anything that is not a number reads as 0.0.
    /// This is the item-column coercion semantic.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            _ => 0.0,
        }
    }

    /// Strict numeric read: `None` unless the cell actually holds a number.
    pub fn as_number_strict(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Render for delimited-text output. Integers print without a decimal
    /// point; other numbers use shortest-roundtrip formatting so a re-import
    /// reproduces the same value.
    pub fn display(&self) -> String {
        match self {
            Value::Empty => String::new(),
            Value::Text(s) => s.clone(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }
}

/// Ordered columns + rows. Column names are unique by construction of the
/// import path (first header occurrence wins); `set_column` overwrites in
/// place when the name already exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Frame {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Append a row, padding or truncating to frame width so every row has
    /// exactly one cell per column.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Empty);
        self.rows.push(row);
    }

    pub fn row(&self, idx: usize) -> &[Value] {
        &self.rows[idx]
    }

    pub fn value(&self, row: usize, col: usize) -> &Value {
        &self.rows[row][col]
    }

    pub fn set_value(&mut self, row: usize, col: usize, value: Value) {
        self.rows[row][col] = value;
    }

    /// All values of one column, top to bottom.
    pub fn column_values(&self, col: usize) -> Vec<Value> {
        self.rows.iter().map(|r| r[col].clone()).collect()
    }

    /// Write a numeric column. Overwrites in place when `name` exists,
    /// otherwise appends it as the last column. `values` must have one entry
    /// per row.
    pub fn set_column(&mut self, name: &str, values: &[f64]) {
        debug_assert_eq!(values.len(), self.rows.len());

        let col = match self.column_index(name) {
            Some(idx) => idx,
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(Value::Empty);
                }
                self.columns.len() - 1
            }
        };

        for (row, &v) in self.rows.iter_mut().zip(values) {
            row[col] = Value::Number(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_parses_numbers() {
        assert_eq!(Value::from_input("42"), Value::Number(42.0));
        assert_eq!(Value::from_input(" 3.5 "), Value::Number(3.5));
        assert_eq!(Value::from_input("-1e3"), Value::Number(-1000.0));
    }

    #[test]
    fn test_from_input_text_and_empty() {
        assert_eq!(Value::from_input(""), Value::Empty);
        assert_eq!(Value::from_input("   "), Value::Empty);
        assert_eq!(Value::from_input("n/a"), Value::Text("n/a".to_string()));
    }

    #[test]
    fn test_lenient_vs_strict_reads() {
        assert_eq!(Value::Number(2.0).as_number(), 2.0);
        assert_eq!(Value::Text("x".into()).as_number(), 0.0);
        assert_eq!(Value::Empty.as_number(), 0.0);

        assert_eq!(Value::Number(2.0).as_number_strict(), Some(2.0));
        assert_eq!(Value::Text("x".into()).as_number_strict(), None);
        assert_eq!(Value::Empty.as_number_strict(), None);
    }

    #[test]
    fn test_display_integer_without_decimals() {
        assert_eq!(Value::Number(5.0).display(), "5");
        assert_eq!(Value::Number(5.25).display(), "5.25");
        assert_eq!(Value::Empty.display(), "");
    }

    #[test]
    fn test_push_row_pads_to_width() {
        let mut frame = Frame::new(vec!["a".into(), "b".into(), "c".into()]);
        frame.push_row(vec![Value::Number(1.0)]);
        assert_eq!(frame.row(0).len(), 3);
        assert_eq!(frame.value(0, 2), &Value::Empty);
    }

    #[test]
    fn test_set_column_appends_then_overwrites() {
        let mut frame = Frame::new(vec!["a".into()]);
        frame.push_row(vec![Value::Number(1.0)]);
        frame.push_row(vec![Value::Number(2.0)]);

        frame.set_column("derived", &[10.0, 20.0]);
        assert_eq!(frame.columns(), &["a".to_string(), "derived".to_string()]);
        assert_eq!(frame.value(1, 1), &Value::Number(20.0));

        frame.set_column("derived", &[30.0, 40.0]);
        assert_eq!(frame.n_cols(), 2);
        assert_eq!(frame.value(0, 1), &Value::Number(30.0));
    }
}
