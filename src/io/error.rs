use thiserror::Error;

/// Failures parsing the flat `*`-delimited instance or solution file
/// formats. Never panics on malformed input.
#[derive(Debug, Error)]
pub enum InputFormatError {
    #[error("expected {expected} lines, found {found}")]
    WrongLineCount { expected: usize, found: usize },
    #[error("line {line}: expected an integer, found {value:?}")]
    NotAnInteger { line: usize, value: String },
    #[error("line {line}: field count mismatch ({field} has {found} values, expected {expected})")]
    FieldCountMismatch {
        line: usize,
        field: &'static str,
        found: usize,
        expected: usize,
    },
    #[error("patient references unknown surgical type {type_id}")]
    UnknownSurgicalType { type_id: u32 },
    #[error("operating room references unknown surgical type {type_id}")]
    OperatingRoomUnknownSurgicalType { type_id: u32 },
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
