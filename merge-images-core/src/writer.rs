//! Persist the raster and the coordinate table. Existing files are overwritten.

use std::path::Path;

use log::debug;

use crate::coords::CoordinateTable;
use crate::{Result, SpriteError};

pub async fn ensure_dir(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| SpriteError::fs(dir, e))
}

pub async fn write_raster(path: &Path, image: &[u8]) -> Result<()> {
    tokio::fs::write(path, image).await.map_err(|e| SpriteError::fs(path, e))?;
    debug!("wrote raster {} ({} bytes)", path.display(), image.len());
    Ok(())
}

/// Pretty JSON with two-space indentation.
pub async fn write_coords(path: &Path, coords: &CoordinateTable) -> Result<()> {
    let json = serde_json::to_string_pretty(coords)?;
    tokio::fs::write(path, json).await.map_err(|e| SpriteError::fs(path, e))?;
    debug!("wrote {} coordinate entries to {}", coords.len(), path.display());
    Ok(())
}

pub async fn read_coords(path: &Path) -> Result<CoordinateTable> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| SpriteError::fs(path, e))?;
    Ok(serde_json::from_str(&text)?)
}
