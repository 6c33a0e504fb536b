use std::path::PathBuf;

use thiserror::Error;

/// Structural problems found while assembling nodes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeError {
    #[error("`{composite}` takes exactly one child, found {found}")]
    ChildCount {
        composite: &'static str,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum TreeLoadError {
    #[error("tree definition `{name}` not found at {}", path.display())]
    NotFound { name: String, path: PathBuf },
    #[error("failed to read tree definition `{name}`: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("tree definition `{name}` is not valid JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed tree definition `{name}`: {reason}")]
    Malformed { name: String, reason: String },
    #[error("unknown composite `{composite}` in tree definition `{name}`")]
    UnknownComposite { name: String, composite: String },
    #[error("`{token}` in tree definition `{name}` is neither a node type nor a tree definition")]
    Unresolved { name: String, token: String },
    #[error("invalid node in tree definition `{name}`: {source}")]
    Structure {
        name: String,
        #[source]
        source: NodeError,
    },
    #[error("cyclic subtree reference: {chain}")]
    Cycle { chain: String },
}

impl TreeLoadError {
    /// Name of the definition the error was raised for.
    pub fn definition(&self) -> Option<&str> {
        match self {
            TreeLoadError::NotFound { name, .. }
            | TreeLoadError::Io { name, .. }
            | TreeLoadError::Parse { name, .. }
            | TreeLoadError::Malformed { name, .. }
            | TreeLoadError::UnknownComposite { name, .. }
            | TreeLoadError::Unresolved { name, .. }
            | TreeLoadError::Structure { name, .. } => Some(name),
            TreeLoadError::Cycle { .. } => None,
        }
    }
}
