//! Build a single sprite atlas from a directory of images and describe where each image landed.

pub mod collect;
pub mod config;
pub mod coords;
pub mod error;
pub mod generate;
pub mod pack;
pub mod runtime;
pub mod style;
pub mod writer;

pub use config::{DuplicatePolicy, SpriteConfig};
pub use coords::{build_table, logical_name, CoordinateTable, PlacementRect};
pub use error::{Result, SpriteError};
pub use generate::{generate_sprite, generate_sprite_with, GenerationResult};
pub use pack::{AtlasPacker, SkylinePacker, PackError, PackedAtlas, PackedImage};
pub use style::{derive_styles, get_image_style, ScaledStyle, StyleDescriptor, StyleEntry};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
