//! Packing boundary: anything that turns a list of image files into one raster plus per-file rectangles.

mod skyline;

use std::error::Error as StdError;
use std::future::Future;
use std::path::PathBuf;

use thiserror::Error;

use crate::coords::PlacementRect;

pub use skyline::{SkylinePacker, MAX_EXTENT};

#[derive(Debug, Error)]
pub enum PackError {
    #[error("failed to decode \"{}\": {source}", .path.display())]
    Decode { path: PathBuf, #[source] source: image::ImageError },
    #[error("\"{}\" has an empty extent", .path.display())]
    EmptyImage { path: PathBuf },
    #[error("failed to encode atlas: {0}")]
    Encode(#[source] image::ImageError),
    #[error("atlas would exceed {width}x{height} pixels")]
    TooLarge { width: u64, height: u64 },
    #[error("packing task failed: {0}")]
    Join(String),
    #[error(transparent)]
    Custom(Box<dyn StdError + Send + Sync>),
}

/// One input's placement as reported by a packer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedImage {
    pub path: PathBuf,
    pub rect: PlacementRect,
}

/// Encoded raster plus the placement of every input, in the packer's reporting order.
#[derive(Debug, Clone)]
pub struct PackedAtlas {
    pub image: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub coordinates: Vec<PackedImage>,
}

/// Pluggable packing strategy. Implementations must accept inputs in any order.
pub trait AtlasPacker: Send + Sync {
    fn pack(&self, images: &[PathBuf]) -> impl Future<Output = Result<PackedAtlas, PackError>> + Send;
}
