// Record error taxonomy

use std::fmt;

/// Failures raised by record construction and parsing. Syntax errors from
/// the underlying N-Quads parser are not wrapped in this type; they
/// propagate as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A value that must name a resource could not be used as an IRI.
    InvalidArgument(String),
    /// A record was built before it was fully configured.
    InvalidState(String),
    /// Parsed text does not have the two-partition record structure.
    MalformedRecord(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            RecordError::InvalidState(msg) => write!(f, "invalid state: {}", msg),
            RecordError::MalformedRecord(msg) => write!(f, "malformed record: {}", msg),
        }
    }
}

impl std::error::Error for RecordError {}
