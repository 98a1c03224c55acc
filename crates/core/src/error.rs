use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type StagingResult<T> = Result<T, StagingError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    SectionNotFound,
    InvalidQuery,
    Io,
}

#[derive(Debug, Error)]
pub enum StagingError {
    #[error("{0} not loaded. Use load(path) first.")]
    DocumentNotLoaded(String),

    #[error("File not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Section '{heading}' not found in {document}")]
    SectionNotFound { document: String, heading: String },

    #[error("invalid search query: {0}")]
    InvalidQuery(String),

    #[error("failed reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StagingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DocumentNotLoaded(_) | Self::SourceNotFound(_) => ErrorKind::NotFound,
            Self::SectionNotFound { .. } => ErrorKind::SectionNotFound,
            Self::InvalidQuery(_) => ErrorKind::InvalidQuery,
            Self::Read { .. } => ErrorKind::Io,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
