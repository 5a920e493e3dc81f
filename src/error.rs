//! Error types for paperwright operations.

use std::io;

use thiserror::Error;

/// Errors that abort an export.
///
/// Anything recoverable (a chart that fails to rasterize, an unreadable
/// template) is reported as an [`ExportWarning`] instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Missing required title field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse category of a fatal failure, used to phrase the user-facing hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureHint {
    /// The document could not be assembled in memory.
    Memory,
    /// Reading or writing bytes failed.
    Io,
    /// The caller supplied bad input.
    Input,
}

impl Error {
    /// Classify this error for the user-facing message.
    pub fn hint(&self) -> FailureHint {
        match self {
            Error::Io(e) if e.kind() == io::ErrorKind::OutOfMemory => FailureHint::Memory,
            Error::Zip(zip::result::ZipError::Io(e)) if e.kind() == io::ErrorKind::OutOfMemory => {
                FailureHint::Memory
            }
            Error::MissingField { .. } | Error::InvalidRequest(_) => FailureHint::Input,
            _ => FailureHint::Io,
        }
    }
}

/// A non-fatal problem encountered while assembling a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportWarning {
    /// The title-page template could not be used; the default page was rendered.
    TemplateFallback { reason: String },
    /// A chart could not be rasterized; a placeholder line was emitted.
    ChartFailed { section: String, chart: String, reason: String },
    /// Chart data did not match its labels and was padded or truncated.
    ChartDataNormalized { section: String, chart: String },
    /// A table row had the wrong number of cells and was normalized.
    TableRowsNormalized { section: String, table: String },
}

impl std::fmt::Display for ExportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportWarning::TemplateFallback { reason } => {
                write!(f, "title page template ignored: {reason}")
            }
            ExportWarning::ChartFailed {
                section,
                chart,
                reason,
            } => write!(f, "chart \"{chart}\" in \"{section}\" not rendered: {reason}"),
            ExportWarning::ChartDataNormalized { section, chart } => {
                write!(f, "chart \"{chart}\" in \"{section}\" had mismatched data lengths")
            }
            ExportWarning::TableRowsNormalized { section, table } => {
                write!(f, "table \"{table}\" in \"{section}\" had ragged rows")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_memory() {
        let err = Error::Io(io::Error::from(io::ErrorKind::OutOfMemory));
        assert_eq!(err.hint(), FailureHint::Memory);
    }

    #[test]
    fn test_hint_io_and_input() {
        let err = Error::Io(io::Error::other("disk full"));
        assert_eq!(err.hint(), FailureHint::Io);

        let err = Error::MissingField { field: "title" };
        assert_eq!(err.hint(), FailureHint::Input);
        assert_eq!(err.to_string(), "Missing required title field: title");
    }
}
