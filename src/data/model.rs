use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// FieldValue – a single cell of the loaded table
// ---------------------------------------------------------------------------

/// A typed cell value. Inference happens once at load time so that range and
/// classification logic never has to guess what a cell means.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    /// Absent, empty or whitespace-only cell.
    Missing,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{v}"),
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Missing => write!(f, ""),
        }
    }
}

impl FieldValue {
    /// The numeric payload, if this cell is a `Number`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// One data row. `row` is the record's position in its dataset and serves as
/// its identity when the dataset is partitioned.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub row: usize,
    /// column_name → value; every header of the dataset has an entry.
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// Numeric value of `column`, `None` when absent or not a number.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(FieldValue::as_f64)
    }

    /// `(x, y)` when both axis columns hold numbers.
    pub fn point(&self, x_column: &str, y_column: &str) -> Option<(f64, f64)> {
        Some((self.number(x_column)?, self.number(y_column)?))
    }
}

// ---------------------------------------------------------------------------
// AxisColumns – which columns are plotted as x / y
// ---------------------------------------------------------------------------

/// Names of the columns read as the x and y axis.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AxisColumns {
    pub x: String,
    pub y: String,
}

impl Default for AxisColumns {
    fn default() -> Self {
        Self {
            x: "x".to_string(),
            y: "y".to_string(),
        }
    }
}

impl AxisColumns {
    /// The record's point on these axes, if both are numeric.
    pub fn point_of(&self, record: &Record) -> Option<(f64, f64)> {
        record.point(&self.x, &self.y)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// Header set plus the ordered records of one successful load.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Field names in first-row order, unique.
    pub headers: Vec<String>,
    /// Records in input order.
    pub records: Vec<Record>,
}

impl Dataset {
    /// Assemble a dataset from rows of cells aligned with `headers`.
    /// Rows are numbered in the order given.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<FieldValue>>) -> Self {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(row, cells)| Record {
                row,
                fields: headers.iter().cloned().zip(cells).collect(),
            })
            .collect();
        Dataset { headers, records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_rows(
            vec!["x".into(), "y".into(), "label".into()],
            vec![
                vec![
                    FieldValue::Number(1.0),
                    FieldValue::Number(2.0),
                    FieldValue::Text("a".into()),
                ],
                vec![
                    FieldValue::Number(3.0),
                    FieldValue::Missing,
                    FieldValue::Text("b".into()),
                ],
            ],
        )
    }

    #[test]
    fn rows_are_numbered_in_order() {
        let ds = sample();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].row, 0);
        assert_eq!(ds.records[1].row, 1);
        assert_eq!(ds.record(1).and_then(|r| r.number("x")), Some(3.0));
    }

    #[test]
    fn point_requires_both_axes_numeric() {
        let ds = sample();
        assert_eq!(ds.records[0].point("x", "y"), Some((1.0, 2.0)));
        assert_eq!(ds.records[1].point("x", "y"), None);
        assert_eq!(ds.records[0].point("x", "label"), None);
        assert_eq!(ds.records[0].point("x", "nope"), None);
    }

    #[test]
    fn display_of_values() {
        assert_eq!(FieldValue::Number(1.5).to_string(), "1.5");
        assert_eq!(FieldValue::Text("hi".into()).to_string(), "hi");
        assert_eq!(FieldValue::Missing.to_string(), "");
        assert!(FieldValue::Missing.is_missing());
    }
}
