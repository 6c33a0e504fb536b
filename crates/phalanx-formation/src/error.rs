use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormationError {
    #[error("formation definition `{name}` not found at {}", path.display())]
    NotFound { name: String, path: PathBuf },
    #[error("failed to read formation definition `{name}`: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "formation `{name}` ({}) contains an invalid slot specifier {found:?} at row {row}, column {column}",
        path.display()
    )]
    InvalidSlot {
        name: String,
        path: PathBuf,
        row: usize,
        column: usize,
        found: char,
    },
    #[error("formation `{name}` defines no slots")]
    Empty { name: String },
}

impl FormationError {
    pub fn name(&self) -> &str {
        match self {
            FormationError::NotFound { name, .. }
            | FormationError::Io { name, .. }
            | FormationError::InvalidSlot { name, .. }
            | FormationError::Empty { name } => name,
        }
    }

    /// Point a parse error at the file it came from.
    pub fn in_file(self, file: &Path) -> Self {
        match self {
            FormationError::InvalidSlot {
                name,
                row,
                column,
                found,
                ..
            } => FormationError::InvalidSlot {
                name,
                path: file.to_path_buf(),
                row,
                column,
                found,
            },
            other => other,
        }
    }
}
