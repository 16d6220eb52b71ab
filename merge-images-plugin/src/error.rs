use std::io;

use merge_images_core::SpriteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("invalid plugin state: {0}")]
    InvalidState(String),
    #[error("cannot resolve the project root: {0}")]
    Root(#[source] io::Error),
    #[error(transparent)]
    Sprite(#[from] SpriteError),
    #[error("failed to render virtual module: {0}")]
    Serialize(#[from] serde_json::Error),
}
