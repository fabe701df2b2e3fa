//! Error type shared by the catalog, store and assembler.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("unknown shader class: {class}")]
    UnknownClass { class: String },

    #[error("function {id} not found in shader class {class}")]
    UnknownFunction { class: String, id: String },

    #[error("struct {id} not found in shader class {class}")]
    UnknownStruct { class: String, id: String },

    #[error("text document not found: {container}/{id}")]
    TextNotFound { container: String, id: String },

    #[error("undefined row type: {kind:?}")]
    UnknownRowType { kind: String },

    /// Failure while processing one table row; `row` is the table row index
    /// (the header is row 0).
    #[error("row {row}: {source}")]
    AtRow {
        row: usize,
        #[source]
        source: Box<BuildError>,
    },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }

    /// The innermost error, with any row context peeled off.
    pub fn root(&self) -> &BuildError {
        match self {
            BuildError::AtRow { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
