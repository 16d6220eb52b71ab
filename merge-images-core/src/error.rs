use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::pack::PackError;

/// Failures of one generation run or of a style lookup.
#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("no images matched pattern \"{pattern}\" under \"{}\"", .src.display())]
    NoMatch { pattern: String, src: PathBuf },
    #[error("invalid glob pattern \"{pattern}\": {source}")]
    Pattern { pattern: String, #[source] source: glob::PatternError },
    #[error(transparent)]
    Packer(#[from] PackError),
    #[error("filesystem error at \"{}\": {source}", .path.display())]
    FileSystem { path: PathBuf, #[source] source: io::Error },
    #[error("image \"{name}\" not found in coordinate table")]
    NotFound { name: String },
    #[error("logical name \"{key}\" is produced by both \"{}\" and \"{}\"", .first.display(), .second.display())]
    DuplicateKey { key: String, first: PathBuf, second: PathBuf },
    #[error("scale must be a positive finite number, got {0}")]
    InvalidScale(f64),
    #[error("coordinate table JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl SpriteError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileSystem { path: path.into(), source }
    }
}

pub type Result<T, E = SpriteError> = std::result::Result<T, E>;
