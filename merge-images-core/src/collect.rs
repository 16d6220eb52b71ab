//! Resolve a glob pattern under the source directory into absolute image paths.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use log::debug;

use crate::{Result, SpriteError};

/// Matching files under `src`, absolute and sorted. Fails with `NoMatch` when nothing matches.
pub async fn collect_images(src: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let root = absolute(src)?;
    let pattern = pattern.to_string();
    let images = tokio::task::spawn_blocking(move || collect_blocking(&root, &pattern)).await??;
    debug!("collected {} images under {}", images.len(), src.display());
    Ok(images)
}

fn collect_blocking(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let root_str = root.to_str().ok_or_else(|| {
        SpriteError::fs(root, std::io::Error::new(std::io::ErrorKind::InvalidInput, "source directory is not valid UTF-8"))
    })?;
    let full = format!("{}/{}", Pattern::escape(root_str.trim_end_matches(['/', '\\'])), pattern.trim_start_matches("./"));
    let options = MatchOptions { require_literal_leading_dot: true, ..MatchOptions::new() };
    let paths = glob::glob_with(&full, options)
        .map_err(|source| SpriteError::Pattern { pattern: pattern.to_string(), source })?;

    let mut images = Vec::new();
    for entry in paths {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            SpriteError::fs(path, e.into_error())
        })?;
        if path.is_file() {
            images.push(path);
        }
    }
    if images.is_empty() {
        return Err(SpriteError::NoMatch { pattern: pattern.to_string(), src: root.to_path_buf() });
    }
    images.sort();
    Ok(images)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|e| SpriteError::fs(path, e))?;
    Ok(cwd.join(path))
}
