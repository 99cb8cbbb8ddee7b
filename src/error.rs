//! Errors raised while loading and parsing a coverage report

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("LCOV report not found at {}", path.display())]
    ReportNotFound { path: PathBuf },

    #[error("Invalid {marker} count {value:?} on line {line}")]
    InvalidCount {
        line: usize,
        marker: &'static str,
        value: String,
    },

    #[error("Failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = GateError> = std::result::Result<T, E>;
