//! The generation pipeline: collect, pack, build the table, write both artifacts, derive styles.

use std::path::PathBuf;

use log::{debug, info};
use serde::Serialize;

use crate::collect::collect_images;
use crate::config::SpriteConfig;
use crate::coords::{build_table, CoordinateTable};
use crate::pack::{AtlasPacker, SkylinePacker};
use crate::style::{derive_styles, StyleDescriptor};
use crate::writer::{ensure_dir, write_coords, write_raster};
use crate::Result;

/// Everything one generation run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub sprite_path: PathBuf,
    pub coords_path: PathBuf,
    pub style: StyleDescriptor,
    pub coords: CoordinateTable,
}

/// Run the pipeline with the default skyline packer.
pub async fn generate_sprite(config: &SpriteConfig) -> Result<GenerationResult> {
    generate_sprite_with(config, &SkylinePacker::default()).await
}

/// Run the pipeline with a caller-supplied packer.
///
/// Nothing is written until collection, packing and table building have succeeded. A write failure
/// leaves any file written before it in place. Concurrent runs against one output directory are not
/// synchronized.
pub async fn generate_sprite_with<P: AtlasPacker>(config: &SpriteConfig, packer: &P) -> Result<GenerationResult> {
    let images = collect_images(&config.src, &config.glob).await?;
    let atlas = packer.pack(&images).await?;
    debug!("atlas is {}x{} with {} placements", atlas.width, atlas.height, atlas.coordinates.len());
    let coords = build_table(&atlas.coordinates, config.duplicates)?;

    ensure_dir(&config.output).await?;
    let sprite_path = config.sprite_path();
    write_raster(&sprite_path, &atlas.image).await?;
    let coords_path = config.coords_path();
    write_coords(&coords_path, &coords).await?;

    let style = derive_styles(&coords);
    info!("generated {} with {} images", sprite_path.display(), coords.len());
    Ok(GenerationResult { sprite_path, coords_path, style, coords })
}
