//! Virtual module ids and the source text served for them.

use std::path::{Component, Path, PathBuf};

use merge_images_core::{CoordinateTable, StyleDescriptor};

/// Exports `sprite`, `style`, `coords` and re-exports `getImageStyle`.
pub const VIRTUAL_MODULE_ID: &str = "virtual:merge-images-runtime";
/// Static runtime-support module providing `getImageStyle`.
pub const RUNTIME_MODULE_ID: &str = "virtual:merge-images-runtime/style";

/// Public URL of the raster: relative to `root`, forward slashes, leading slash.
pub fn sprite_url(root: &Path, sprite_path: &Path) -> String {
    let target = if sprite_path.is_absolute() { sprite_path.to_path_buf() } else { root.join(sprite_path) };
    let rel = relative_to(&target, root);
    format!("/{}", rel.to_string_lossy().replace('\\', "/"))
}

fn relative_to(target: &Path, base: &Path) -> PathBuf {
    let target: Vec<Component> = target.components().collect();
    let base: Vec<Component> = base.components().collect();
    let common = target.iter().zip(&base).take_while(|(t, b)| t == b).count();

    let mut out = PathBuf::new();
    for _ in common..base.len() {
        out.push("..");
    }
    for c in &target[common..] {
        out.push(c.as_os_str());
    }
    out
}

pub fn render_artifact_module(
    sprite_url: &str,
    style: &StyleDescriptor,
    coords: &CoordinateTable,
) -> Result<String, serde_json::Error> {
    Ok(format!(
        "export const sprite = {};\nexport const style = {};\nexport const coords = {};\nexport {{ getImageStyle }} from {};\n",
        serde_json::to_string(sprite_url)?,
        serde_json::to_string(style)?,
        serde_json::to_string(coords)?,
        serde_json::to_string(RUNTIME_MODULE_ID)?,
    ))
}
