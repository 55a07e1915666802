//! Errors that occur during writing

use crate::validate::ValidationReport;

/// An error occurred while writing a table.
#[derive(Debug, Clone)]
pub enum Error {
    ValidationFailed(ValidationReport),
}

impl From<ValidationReport> for Error {
    fn from(report: ValidationReport) -> Self {
        Error::ValidationFailed(report)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ValidationFailed(report) => report.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ValidationFailed(report) => Some(report),
        }
    }
}
