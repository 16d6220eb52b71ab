//! Default packer: the skyline strategy of `texture_packer`, driven from the blocking pool.

use std::io::Cursor;
use std::path::PathBuf;

use image::{imageops, DynamicImage, ImageOutputFormat, RgbaImage};
use log::debug;
use texture_packer::{TexturePacker, TexturePackerConfig};

use super::{AtlasPacker, PackError, PackedAtlas, PackedImage};
use crate::coords::PlacementRect;

/// Largest atlas side the packer may grow to.
pub const MAX_EXTENT: u32 = 16384;

#[derive(Debug, Clone, Copy)]
pub struct SkylinePacker {
    /// Transparent pixels kept between neighbouring sub-images.
    pub padding: u32,
    pub max_extent: u32,
}

impl Default for SkylinePacker {
    fn default() -> Self { Self { padding: 0, max_extent: MAX_EXTENT } }
}

impl SkylinePacker {
    pub fn new() -> Self { Self::default() }
    pub fn with_padding(padding: u32) -> Self { Self { padding, ..Self::default() } }
    pub fn with_max_extent(mut self, max_extent: u32) -> Self {
        self.max_extent = max_extent;
        self
    }

    fn config(&self) -> TexturePackerConfig {
        TexturePackerConfig {
            max_width: self.max_extent,
            max_height: self.max_extent,
            allow_rotation: false,
            border_padding: 0,
            texture_padding: self.padding,
            trim: false,
            ..Default::default()
        }
    }
}

impl AtlasPacker for SkylinePacker {
    async fn pack(&self, images: &[PathBuf]) -> Result<PackedAtlas, PackError> {
        let images = images.to_vec();
        let packer = *self;
        tokio::task::spawn_blocking(move || packer.pack_files(&images))
            .await
            .map_err(|e| PackError::Join(e.to_string()))?
    }
}

impl SkylinePacker {
    fn pack_files(&self, paths: &[PathBuf]) -> Result<PackedAtlas, PackError> {
        let mut images = Vec::with_capacity(paths.len());
        for path in paths {
            let img = image::open(path)
                .map_err(|source| PackError::Decode { path: path.clone(), source })?
                .to_rgba8();
            if img.width() == 0 || img.height() == 0 {
                return Err(PackError::EmptyImage { path: path.clone() });
            }
            images.push(img);
        }

        let mut packer: TexturePacker<RgbaImage, String> = TexturePacker::new_skyline(self.config());
        let mut rects = Vec::with_capacity(images.len());
        for (i, img) in images.iter().enumerate() {
            let key = i.to_string();
            packer
                .pack_own(key.clone(), img.clone())
                .map_err(|_| PackError::TooLarge { width: self.max_extent as u64, height: self.max_extent as u64 })?;
            let frame = packer
                .get_frame(&key)
                .ok_or_else(|| PackError::Join(format!("packer lost frame for \"{}\"", paths[i].display())))?
                .frame;
            rects.push(PlacementRect::new(frame.x, frame.y, img.width(), img.height()));
        }

        // The canvas is the bounding box of the frames, not the packer's maximum.
        let width = rects.iter().map(|r| r.right()).max().unwrap_or(0) as u32;
        let height = rects.iter().map(|r| r.bottom()).max().unwrap_or(0) as u32;
        debug!("packed {} images into {}x{}", images.len(), width, height);

        let mut canvas = RgbaImage::new(width, height);
        for (img, rect) in images.iter().zip(&rects) {
            imageops::replace(&mut canvas, img, rect.x as i64, rect.y as i64);
        }
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .map_err(PackError::Encode)?;

        let coordinates = paths
            .iter()
            .zip(rects)
            .map(|(path, rect)| PackedImage { path: path.clone(), rect })
            .collect();
        Ok(PackedAtlas { image: bytes, width, height, coordinates })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba};
    use std::path::Path;

    fn solid(dir: &Path, name: &str, w: u32, h: u32, px: [u8; 4]) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(w, h, Rgba(px)).save(&path).unwrap();
        path
    }

    fn overlaps(a: &PlacementRect, b: &PlacementRect) -> bool {
        a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
    }

    #[tokio::test]
    async fn mixed_sizes_stay_in_bounds_without_overlap() {
        let dir = tempfile::tempdir().unwrap();
        let sizes = [(10, 40), (64, 16), (8, 8), (30, 30), (1, 1), (50, 5), (16, 64)];
        let paths: Vec<_> = sizes
            .iter()
            .enumerate()
            .map(|(i, &(w, h))| solid(dir.path(), &format!("img{}.png", i), w, h, [0, 0, 0, 255]))
            .collect();

        let atlas = SkylinePacker::new().pack(&paths).await.unwrap();
        assert_eq!(atlas.coordinates.len(), sizes.len());
        for (i, a) in atlas.coordinates.iter().enumerate() {
            assert_eq!(a.path, paths[i]);
            assert_eq!((a.rect.width, a.rect.height), sizes[i]);
            assert!(a.rect.fits_within(atlas.width, atlas.height), "{:?} outside {}x{}", a.rect, atlas.width, atlas.height);
            for b in &atlas.coordinates[i + 1..] {
                assert!(!overlaps(&a.rect, &b.rect), "{:?} overlaps {:?}", a.rect, b.rect);
            }
        }
    }

    #[tokio::test]
    async fn padding_separates_neighbours() {
        let dir = tempfile::tempdir().unwrap();
        let a = solid(dir.path(), "a.png", 10, 10, [1, 2, 3, 255]);
        let b = solid(dir.path(), "b.png", 10, 10, [4, 5, 6, 255]);

        let atlas = SkylinePacker::with_padding(2).pack(&[a, b]).await.unwrap();
        let (r0, r1) = (atlas.coordinates[0].rect, atlas.coordinates[1].rect);
        let apart = r0.right() + 2 <= r1.x as u64
            || r1.right() + 2 <= r0.x as u64
            || r0.bottom() + 2 <= r1.y as u64
            || r1.bottom() + 2 <= r0.y as u64;
        assert!(apart, "{:?} and {:?} are closer than the padding", r0, r1);
    }

    #[tokio::test]
    async fn image_larger_than_the_atlas_is_too_large() {
        let dir = tempfile::tempdir().unwrap();
        let big = solid(dir.path(), "big.png", 20, 20, [9, 9, 9, 255]);
        match SkylinePacker::new().with_max_extent(16).pack(&[big]).await {
            Err(PackError::TooLarge { width, height }) => assert_eq!((width, height), (16, 16)),
            other => panic!("expected TooLarge, got {:?}", other.map(|a| a.coordinates)),
        }
    }

    #[tokio::test]
    async fn empty_input_yields_empty_atlas() {
        let atlas = SkylinePacker::new().pack(&[]).await.unwrap();
        assert_eq!((atlas.width, atlas.height), (0, 0));
        assert!(atlas.coordinates.is_empty());
    }

    #[tokio::test]
    async fn pack_composes_pixels_at_reported_rects() {
        let dir = tempfile::tempdir().unwrap();
        let blue = solid(dir.path(), "blue.png", 4, 4, [0, 0, 255, 255]);
        let red = solid(dir.path(), "red.png", 16, 8, [255, 0, 0, 255]);

        let atlas = SkylinePacker::new().pack(&[blue.clone(), red.clone()]).await.unwrap();
        assert_eq!(atlas.coordinates[0].path, blue);
        assert_eq!(atlas.coordinates[1].path, red);

        let raster = image::load_from_memory(&atlas.image).unwrap();
        assert_eq!(raster.dimensions(), (atlas.width, atlas.height));
        let r = atlas.coordinates[1].rect;
        assert_eq!(raster.get_pixel(r.x + r.width - 1, r.y), Rgba([255, 0, 0, 255]));
        let b = atlas.coordinates[0].rect;
        assert_eq!(raster.get_pixel(b.x, b.y + b.height - 1), Rgba([0, 0, 255, 255]));
    }

    #[tokio::test]
    async fn undecodable_file_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.png");
        std::fs::write(&bogus, b"not a png").unwrap();
        match SkylinePacker::new().pack(&[bogus.clone()]).await {
            Err(PackError::Decode { path, .. }) => assert_eq!(path, bogus),
            other => panic!("expected Decode error, got {:?}", other.map(|a| a.coordinates)),
        }
    }
}
