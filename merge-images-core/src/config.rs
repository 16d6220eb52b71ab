//! Generation options. Every field is optional on the wire and falls back to the defaults below.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SRC: &str = "./src/icons";
pub const DEFAULT_OUTPUT: &str = "./dist/assets";
pub const DEFAULT_SPRITE_NAME: &str = "sprite.png";
pub const DEFAULT_COORDS_NAME: &str = "sprite-coords.json";
pub const DEFAULT_GLOB: &str = "**/*.png";

/// What to do when two source images strip to the same logical name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// The image the packer lists last replaces earlier ones; a warning is logged.
    #[default]
    LastWins,
    /// Abort generation with [`SpriteError::DuplicateKey`](crate::SpriteError::DuplicateKey).
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpriteConfig {
    pub src: PathBuf,
    pub output: PathBuf,
    pub sprite_name: String,
    pub coords_name: String,
    pub glob: String,
    pub duplicates: DuplicatePolicy,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            src: PathBuf::from(DEFAULT_SRC),
            output: PathBuf::from(DEFAULT_OUTPUT),
            sprite_name: DEFAULT_SPRITE_NAME.to_string(),
            coords_name: DEFAULT_COORDS_NAME.to_string(),
            glob: DEFAULT_GLOB.to_string(),
            duplicates: DuplicatePolicy::default(),
        }
    }
}

impl SpriteConfig {
    pub fn with_src(mut self, src: impl Into<PathBuf>) -> Self { self.src = src.into(); self }
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self { self.output = output.into(); self }
    pub fn with_sprite_name(mut self, name: impl Into<String>) -> Self { self.sprite_name = name.into(); self }
    pub fn with_coords_name(mut self, name: impl Into<String>) -> Self { self.coords_name = name.into(); self }
    pub fn with_glob(mut self, glob: impl Into<String>) -> Self { self.glob = glob.into(); self }
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self { self.duplicates = policy; self }

    pub fn sprite_path(&self) -> PathBuf { self.output.join(&self.sprite_name) }
    pub fn coords_path(&self) -> PathBuf { self.output.join(&self.coords_name) }
}
