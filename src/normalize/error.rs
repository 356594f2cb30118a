use thiserror::Error;

/// Structural validation failures for one import batch. All-or-nothing: any
/// of these rejects the whole upload, and the message is shown to the end
/// user verbatim, naming the exact offending column or row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The upload parsed to zero data rows.
    #[error("the uploaded file contains no requirement rows")]
    EmptyFile,

    /// None of the accepted aliases for a mandatory column is present.
    #[error("required column `{0}` was not found in the uploaded file")]
    MissingColumn(String),

    /// The header set contains names outside the allow-list. A closed
    /// schema: extra columns would otherwise be silently dropped.
    #[error("unrecognized columns in the uploaded file: {}", .0.join(", "))]
    UnrecognizedColumns(Vec<String>),

    /// The resolved requirement text is blank after trimming. `row` is the
    /// 0-based data-row index.
    #[error("requirement text is empty in row {row}")]
    EmptyRequirement { row: usize },
}
