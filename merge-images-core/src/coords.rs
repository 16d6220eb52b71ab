//! Placement rectangles and the logical-name -> rectangle table.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::DuplicatePolicy;
use crate::pack::PackedImage;
use crate::{Result, SpriteError};

/// Pixel rectangle of one sub-image inside the composed raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PlacementRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self { Self { x, y, width, height } }

    pub fn right(&self) -> u64 { self.x as u64 + self.width as u64 }
    pub fn bottom(&self) -> u64 { self.y as u64 + self.height as u64 }

    /// Non-empty and inside a `width` x `height` raster.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0 && self.height > 0 && self.right() <= width as u64 && self.bottom() <= height as u64
    }
}

/// Sorted so that identical packer output always serializes to identical bytes.
pub type CoordinateTable = BTreeMap<String, PlacementRect>;

/// File name with directory and last extension stripped.
pub fn logical_name(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Key the packer's per-image rectangles by logical name, in the order the packer reported them.
pub fn build_table(images: &[PackedImage], policy: DuplicatePolicy) -> Result<CoordinateTable> {
    let mut table = CoordinateTable::new();
    let mut origin: BTreeMap<String, &PathBuf> = BTreeMap::new();
    for img in images {
        let key = logical_name(&img.path);
        match table.entry(key.clone()) {
            Entry::Vacant(slot) => { slot.insert(img.rect); }
            Entry::Occupied(mut slot) => {
                let first = origin.get(&key).map(|p| p.to_path_buf()).unwrap_or_default();
                if policy == DuplicatePolicy::Error {
                    return Err(SpriteError::DuplicateKey { key, first, second: img.path.clone() });
                }
                warn!("logical name \"{}\": {} replaces {}", key, img.path.display(), first.display());
                slot.insert(img.rect);
            }
        }
        origin.insert(key, &img.path);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(path: &str, x: u32) -> PackedImage {
        PackedImage { path: PathBuf::from(path), rect: PlacementRect::new(x, 0, 8, 8) }
    }

    #[test]
    fn logical_name_strips_dir_and_extension() {
        assert_eq!(logical_name(Path::new("/abs/icons/home.png")), "home");
        assert_eq!(logical_name(Path::new("/abs/icons/arrow.left.png")), "arrow.left");
        assert_eq!(logical_name(Path::new("plain")), "plain");
    }

    #[test]
    fn one_entry_per_unique_name() {
        let table = build_table(&[packed("/i/a.png", 0), packed("/i/b.png", 8)], DuplicatePolicy::LastWins).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["b"], PlacementRect::new(8, 0, 8, 8));
    }

    #[test]
    fn collision_keeps_last_listed() {
        let images = [packed("/i/x/a.png", 0), packed("/i/b.png", 8), packed("/i/y/a.png", 16)];
        let table = build_table(&images, DuplicatePolicy::LastWins).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["a"].x, 16);
    }

    #[test]
    fn collision_rejected_under_error_policy() {
        let images = [packed("/i/x/a.png", 0), packed("/i/y/a.png", 16)];
        match build_table(&images, DuplicatePolicy::Error) {
            Err(SpriteError::DuplicateKey { key, first, second }) => {
                assert_eq!(key, "a");
                assert_eq!(first, PathBuf::from("/i/x/a.png"));
                assert_eq!(second, PathBuf::from("/i/y/a.png"));
            }
            other => panic!("expected DuplicateKey, got {:?}", other),
        }
    }

    #[test]
    fn rebuilding_is_byte_identical() {
        let images = [packed("/i/c.png", 0), packed("/i/a.png", 8), packed("/i/b.png", 16)];
        let a = serde_json::to_string_pretty(&build_table(&images, DuplicatePolicy::LastWins).unwrap()).unwrap();
        let b = serde_json::to_string_pretty(&build_table(&images, DuplicatePolicy::LastWins).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fits_within_bounds() {
        assert!(PlacementRect::new(32, 0, 32, 32).fits_within(64, 32));
        assert!(!PlacementRect::new(33, 0, 32, 32).fits_within(64, 32));
        assert!(!PlacementRect::new(0, 0, 0, 32).fits_within(64, 32));
    }
}
