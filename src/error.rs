// ---------------------------------------------------------------------------
// CoreError – every failure the data/geometry core can report
// ---------------------------------------------------------------------------

/// Errors returned by the ingestor, the geometry generators and the
/// orchestrator. None of them are fatal: the caller shows the message and
/// keeps whatever state it already had.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// The input is not delimited text (wrong MIME type / extension, or binary content).
    #[error("unsupported file type: {detail}")]
    UnsupportedFileType { detail: String },

    /// Header row is missing, has an empty name, or repeats a name.
    #[error("malformed header: {detail}")]
    MalformedHeader { detail: String },

    /// A data row has a different number of cells than the header.
    /// `row` is 1-based over non-blank data rows.
    #[error("row {row} has {found} fields, header has {expected}")]
    RowShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// No records remained after skipping blank lines.
    #[error("no data rows found")]
    EmptyDataset,

    /// A shape/region/config parameter is out of its valid domain.
    #[error("invalid parameter '{name}': {detail}")]
    InvalidParameter { name: &'static str, detail: String },
}

impl CoreError {
    pub(crate) fn invalid(name: &'static str, detail: impl Into<String>) -> Self {
        CoreError::InvalidParameter {
            name,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_shape_message_names_the_row() {
        let err = CoreError::RowShapeMismatch {
            row: 3,
            expected: 2,
            found: 1,
        };
        assert_eq!(err.to_string(), "row 3 has 1 fields, header has 2");
    }

    #[test]
    fn invalid_parameter_message() {
        let err = CoreError::invalid("radius", "must be > 0, got -1");
        assert_eq!(
            err.to_string(),
            "invalid parameter 'radius': must be > 0, got -1"
        );
    }
}
