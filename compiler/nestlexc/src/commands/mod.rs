//! Command handlers for the nestlex CLI.
//!
//! Handlers return their output instead of printing it, so `main` decides
//! where text and diagnostics go.

use std::io;
use std::path::Path;

use nestlex_langs::UnknownLanguage;
use nestlex_scan::ScanError;

mod langs;
mod lex;

pub use langs::list_languages;
pub use lex::{lex_file, OutputFormat};

/// Anything that stops a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Read(String),

    #[error(transparent)]
    UnknownLanguage(#[from] UnknownLanguage),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("cannot encode output as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub(crate) fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| {
        let path = path.display();
        let msg = match e.kind() {
            io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
            io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
            io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
            _ => format!("error reading '{path}': {e}"),
        };
        CliError::Read(msg)
    })
}
