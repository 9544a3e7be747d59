//! Error types for preference card operations

use std::fmt;
use std::path::PathBuf;

/// Which catalog files were missing when the user tried to confirm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFiles {
    Container,
    SoftGoods,
    Both,
}

impl fmt::Display for MissingFiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingFiles::Container => write!(f, "container file"),
            MissingFiles::SoftGoods => write!(f, "soft goods file"),
            MissingFiles::Both => write!(f, "container file or soft goods file"),
        }
    }
}

/// Unified error type for loading, editing and exporting preference cards
#[derive(Debug, thiserror::Error)]
pub enum PrefCardError {
    /// Catalog or card file is unreadable, corrupt or empty
    #[error("Failed to read Excel file {}: {reason}", .path.display())]
    FileRead { path: PathBuf, reason: String },

    /// File lacks the columns required for its role
    #[error("The selected file does not have the expected columns for a {kind} (missing: {})", .missing.join(", "))]
    SchemaValidation {
        path: PathBuf,
        kind: &'static str,
        missing: Vec<String>,
    },

    /// Tried to continue without choosing any service
    #[error("Please select at least one service first.")]
    NoSelection,

    /// Export attempted with no selected rows
    #[error("Nothing to save!")]
    NothingToExport,

    /// Confirmation attempted without both catalog files
    #[error("No {0} identified!")]
    MissingFile(MissingFiles),

    /// Workbook could not be written
    #[error("Failed to write Excel file {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

impl PrefCardError {
    pub fn file_read(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        PrefCardError::FileRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        PrefCardError::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias for preference card operations
pub type Result<T> = std::result::Result<T, PrefCardError>;
