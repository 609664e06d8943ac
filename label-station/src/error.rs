//! Error types for the label station

use std::path::PathBuf;

use thiserror::Error;
use tspl_printer::PrintError;

#[derive(Debug, Error)]
pub enum LabelError {
    /// The confirmed selection contains no items
    #[error("No items selected for printing")]
    EmptySelection,

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Printer target is neither a configured queue nor a network address
    #[error("Unknown printer: {0}")]
    UnknownPrinter(String),

    #[error("Print failed: {0}")]
    Print(#[from] PrintError),
}

pub type LabelResult<T> = Result<T, LabelError>;
