use std::collections::BTreeSet;
use std::path::Path;

use log::debug;

use super::model::{Dataset, FieldValue};
use crate::error::{CoreError, Result};

/// MIME types accepted as delimited text. Browsers and OS pickers disagree on
/// what a `.csv` is, so the common aliases are all allowed.
const ACCEPTED_MIME_TYPES: &[&str] = &[
    "text/csv",
    "application/csv",
    "text/comma-separated-values",
    "text/plain",
    "application/vnd.ms-excel",
];

/// Extensions accepted when no MIME type is known.
const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "txt"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Content-type check done before any parsing.
///
/// A known MIME type decides on its own; otherwise the file extension must
/// be one of [`ACCEPTED_EXTENSIONS`].
pub fn check_content_type(file_name: &str, mime: Option<&str>) -> Result<()> {
    if let Some(mime) = mime {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        if ACCEPTED_MIME_TYPES.contains(&essence.as_str()) {
            return Ok(());
        }
        return Err(CoreError::UnsupportedFileType {
            detail: format!("'{file_name}' has content type '{mime}', expected CSV"),
        });
    }

    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(CoreError::UnsupportedFileType {
            detail: format!("'{file_name}' is not a .csv file"),
        })
    }
}

/// Content-type check followed by [`parse_csv`].
pub fn ingest(file_name: &str, mime: Option<&str>, text: &str) -> Result<Dataset> {
    check_content_type(file_name, mime)?;
    parse_csv(text)
}

/// Parse header-first, comma-delimited text into a [`Dataset`].
///
/// * The first non-blank line is the header; names are trimmed and must be
///   unique and non-empty.
/// * Blank lines are skipped anywhere in the input.
/// * A row whose cell count differs from the header aborts the whole parse
///   with [`CoreError::RowShapeMismatch`].
/// * Every cell is inferred independently, see [`infer_field`].
pub fn parse_csv(text: &str) -> Result<Dataset> {
    if text.contains('\0') {
        return Err(CoreError::UnsupportedFileType {
            detail: "input contains binary data".to_string(),
        });
    }
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<FieldValue>> = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| CoreError::UnsupportedFileType {
            detail: format!("not readable as delimited text: {e}"),
        })?;

        if is_blank(&record) {
            continue;
        }

        match &headers {
            None => headers = Some(parse_header(&record)?),
            Some(h) => {
                if record.len() != h.len() {
                    return Err(CoreError::RowShapeMismatch {
                        row: rows.len() + 1,
                        expected: h.len(),
                        found: record.len(),
                    });
                }
                rows.push(record.iter().map(infer_field).collect());
            }
        }
    }

    let headers = headers.ok_or(CoreError::EmptyDataset)?;
    if rows.is_empty() {
        return Err(CoreError::EmptyDataset);
    }

    debug!("Parsed {} rows with columns {:?}", rows.len(), headers);
    Ok(Dataset::from_rows(headers, rows))
}

// ---------------------------------------------------------------------------
// Cell inference
// ---------------------------------------------------------------------------

/// Infer the type of a single cell: `Number` when the trimmed text is a
/// numeric literal with a finite value, `Missing` when it is empty or
/// whitespace, else `Text` holding the trimmed text. A literal that
/// overflows `f64` (`1e400`) stays `Text`.
pub fn infer_field(raw: &str) -> FieldValue {
    let s = raw.trim();
    if s.is_empty() {
        return FieldValue::Missing;
    }
    if is_numeric_literal(s) {
        if let Ok(v) = s.parse::<f64>() {
            if v.is_finite() {
                return FieldValue::Number(v);
            }
        }
    }
    FieldValue::Text(s.to_string())
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
///
/// Stricter than `f64::from_str`, which also accepts `inf` and `NaN`.
fn is_numeric_literal(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }
    if mantissa_digits == 0 {
        return false;
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        i += 1;
        if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == b.len()
}

// -- helpers --

fn is_blank(record: &csv::StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|cell| cell.trim().is_empty())
}

fn parse_header(record: &csv::StringRecord) -> Result<Vec<String>> {
    let mut seen = BTreeSet::new();
    let mut names = Vec::with_capacity(record.len());

    for (idx, raw) in record.iter().enumerate() {
        let name = raw.trim();
        if name.is_empty() {
            return Err(CoreError::MalformedHeader {
                detail: format!("column {} has an empty name", idx + 1),
            });
        }
        if !seen.insert(name.to_string()) {
            return Err(CoreError::MalformedHeader {
                detail: format!("duplicate column name '{name}'"),
            });
        }
        names.push(name.to_string());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_table() {
        let ds = parse_csv("x,y\n1,2\n3,4").unwrap();
        assert_eq!(ds.headers, vec!["x", "y"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].get("x"), Some(&FieldValue::Number(1.0)));
        assert_eq!(ds.records[0].get("y"), Some(&FieldValue::Number(2.0)));
        assert_eq!(ds.records[1].point("x", "y"), Some((3.0, 4.0)));
    }

    #[test]
    fn skips_blank_lines_and_handles_crlf() {
        let ds = parse_csv("\n\r\nx,y\r\n\r\n1,2\r\n   \r\n3,4\r\n\r\n").unwrap();
        assert_eq!(ds.headers, vec!["x", "y"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].row, 1);
    }

    #[test]
    fn strips_bom_and_trims_header_names() {
        let ds = parse_csv("\u{feff} x , y \n1,2").unwrap();
        assert_eq!(ds.headers, vec!["x", "y"]);
    }

    #[test]
    fn infers_cell_types() {
        let ds = parse_csv("x,y,name\n1.5e2, ,alpha\n-0.5,,\"quoted, text\"").unwrap();
        let first = &ds.records[0];
        assert_eq!(first.get("x"), Some(&FieldValue::Number(150.0)));
        assert_eq!(first.get("y"), Some(&FieldValue::Missing));
        assert_eq!(first.get("name"), Some(&FieldValue::Text("alpha".into())));
        let second = &ds.records[1];
        assert_eq!(second.get("x"), Some(&FieldValue::Number(-0.5)));
        assert_eq!(second.get("y"), Some(&FieldValue::Missing));
        assert_eq!(
            second.get("name"),
            Some(&FieldValue::Text("quoted, text".into()))
        );
    }

    #[test]
    fn numeric_grammar() {
        for ok in ["0", "-1", "+2", "3.", ".5", "1e3", "1E-3", "  7  ", "-.5e+2"] {
            assert!(
                matches!(infer_field(ok), FieldValue::Number(_)),
                "{ok} should be numeric"
            );
        }
        for text in ["inf", "NaN", "0x10", "1_000", "1e", "e5", ".", "-", "1.2.3", "12abc"] {
            assert!(
                matches!(infer_field(text), FieldValue::Text(_)),
                "{text} should be text"
            );
        }
        assert_eq!(infer_field("\t "), FieldValue::Missing);
    }

    #[test]
    fn overflowing_literal_stays_text() {
        assert_eq!(infer_field("1e400"), FieldValue::Text("1e400".into()));
        assert_eq!(infer_field("-1e400"), FieldValue::Text("-1e400".into()));
        assert_eq!(infer_field("1e-400"), FieldValue::Number(0.0));
        let ds = parse_csv("x,y\n1e400,1").unwrap();
        assert_eq!(ds.records[0].number("x"), None);
    }

    #[test]
    fn text_cells_are_trimmed() {
        assert_eq!(infer_field("  beta \t"), FieldValue::Text("beta".into()));
        let ds = parse_csv("x,label\n1, spaced out ").unwrap();
        assert_eq!(
            ds.records[0].get("label"),
            Some(&FieldValue::Text("spaced out".into()))
        );
    }

    #[test]
    fn duplicate_header_is_malformed() {
        let err = parse_csv("x,y,x\n1,2,3").unwrap_err();
        assert!(matches!(err, CoreError::MalformedHeader { .. }));
    }

    #[test]
    fn empty_header_name_is_malformed() {
        let err = parse_csv("x,,y\n1,2,3").unwrap_err();
        assert!(matches!(err, CoreError::MalformedHeader { .. }));
    }

    #[test]
    fn row_shape_mismatch_aborts_with_row_index() {
        let err = parse_csv("x,y\n1,2\n\n3\n4,5").unwrap_err();
        assert_eq!(
            err,
            CoreError::RowShapeMismatch {
                row: 2,
                expected: 2,
                found: 1
            }
        );
        let err = parse_csv("x,y\n1,2,3").unwrap_err();
        assert_eq!(
            err,
            CoreError::RowShapeMismatch {
                row: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn header_only_or_empty_input_is_empty_dataset() {
        assert_eq!(parse_csv("x,y\n\n\n").unwrap_err(), CoreError::EmptyDataset);
        assert_eq!(parse_csv("").unwrap_err(), CoreError::EmptyDataset);
        assert_eq!(parse_csv("  \n\n").unwrap_err(), CoreError::EmptyDataset);
    }

    #[test]
    fn binary_input_is_rejected() {
        let err = parse_csv("x,y\n1,\u{0}2").unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedFileType { .. }));
    }

    #[test]
    fn content_type_by_mime() {
        assert!(check_content_type("points.csv", Some("text/csv")).is_ok());
        assert!(check_content_type("blob", Some("text/csv; charset=utf-8")).is_ok());
        assert!(check_content_type("points.csv", Some("application/pdf")).is_err());
    }

    #[test]
    fn content_type_by_extension() {
        assert!(check_content_type("points.CSV", None).is_ok());
        assert!(check_content_type("dir/points.txt", None).is_ok());
        let err = check_content_type("image.png", None).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedFileType { .. }));
        assert!(check_content_type("noext", None).is_err());
    }

    #[test]
    fn ingest_checks_type_before_parsing() {
        let err = ingest("points.png", None, "x,y\n1,2").unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedFileType { .. }));
        assert_eq!(ingest("points.csv", None, "x,y\n1,2").unwrap().len(), 1);
    }
}
