//! Sprite generation hooked into a host build.
//!
//! Each [`SpritePlugin`] owns its generation state. The first `build_start` runs the pipeline;
//! calls that arrive while it is in flight wait for the same run, later ones reuse its result.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use merge_images_core::{generate_sprite_with, AtlasPacker, SkylinePacker, CoordinateTable, SpriteConfig, StyleDescriptor};
use merge_images_core::runtime::RUNTIME_SOURCE;
use tokio::sync::OnceCell;

use crate::host::{BuildPlugin, HostConfig};
use crate::module::{render_artifact_module, sprite_url, RUNTIME_MODULE_ID, VIRTUAL_MODULE_ID};
use crate::PluginError;

pub const PLUGIN_NAME: &str = "merge-images";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
    Ungenerated,
    Generating,
    Generated,
}

/// What the virtual module is rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSprite {
    pub sprite_path: PathBuf,
    pub style: StyleDescriptor,
    pub coords: CoordinateTable,
}

pub struct SpritePlugin<P = SkylinePacker> {
    config: SpriteConfig,
    packer: P,
    root: PathBuf,
    generated: OnceCell<GeneratedSprite>,
    /// `build_start` calls currently inside the pipeline or waiting on it.
    in_flight: AtomicUsize,
}

/// Counts one `build_start` as in flight until dropped, including when the host drops the future.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

fn resolve_root(cwd: io::Result<PathBuf>) -> Result<PathBuf, PluginError> {
    cwd.map_err(PluginError::Root)
}

impl SpritePlugin<SkylinePacker> {
    pub fn new(config: SpriteConfig) -> Result<Self, PluginError> { Self::with_packer(config, SkylinePacker::default()) }
}

impl<P: AtlasPacker> SpritePlugin<P> {
    /// The sprite URL is made relative to the current directory; see [`with_root`](Self::with_root).
    /// Fails when the current directory cannot be read.
    pub fn with_packer(config: SpriteConfig, packer: P) -> Result<Self, PluginError> {
        let root = resolve_root(std::env::current_dir())?;
        Ok(Self::in_root(config, packer, root))
    }

    /// Construct with an explicit project root, without consulting the current directory.
    pub fn in_root(config: SpriteConfig, packer: P, root: impl Into<PathBuf>) -> Self {
        Self { config, packer, root: root.into(), generated: OnceCell::new(), in_flight: AtomicUsize::new(0) }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn sprite_config(&self) -> &SpriteConfig { &self.config }
    pub fn root(&self) -> &Path { &self.root }
    pub fn packer(&self) -> &P { &self.packer }
    pub fn generated(&self) -> Option<&GeneratedSprite> { self.generated.get() }

    pub fn state(&self) -> GenerationState {
        if self.generated.initialized() {
            GenerationState::Generated
        } else if self.in_flight.load(Ordering::Acquire) > 0 {
            GenerationState::Generating
        } else {
            GenerationState::Ungenerated
        }
    }

    async fn generate(&self) -> Result<GeneratedSprite, PluginError> {
        let result = generate_sprite_with(&self.config, &self.packer).await?;
        Ok(GeneratedSprite { sprite_path: result.sprite_path, style: result.style, coords: result.coords })
    }

    fn artifact_module(&self) -> Result<String, PluginError> {
        let sprite = self.generated.get().ok_or_else(|| {
            PluginError::InvalidState(format!("{} requested before build_start generated the sprite", VIRTUAL_MODULE_ID))
        })?;
        let url = sprite_url(&self.root, &sprite.sprite_path);
        Ok(render_artifact_module(&url, &sprite.style, &sprite.coords)?)
    }
}

impl<P: AtlasPacker> BuildPlugin for SpritePlugin<P> {
    fn name(&self) -> &'static str { PLUGIN_NAME }

    fn config(&self) -> HostConfig {
        HostConfig { assets_include: vec![self.config.sprite_name.clone()] }
    }

    async fn build_start(&self) -> Result<(), PluginError> {
        if self.generated.initialized() {
            debug!("sprite already generated, skipping");
            return Ok(());
        }
        // Dropped only after the cell is set, so `state` never falls back to Ungenerated on success.
        let _in_flight = InFlight::enter(&self.in_flight);
        self.generated.get_or_try_init(|| self.generate()).await?;
        Ok(())
    }

    fn resolve_id(&self, id: &str) -> Option<String> {
        (id == VIRTUAL_MODULE_ID || id == RUNTIME_MODULE_ID).then(|| id.to_string())
    }

    fn load(&self, id: &str) -> Result<Option<String>, PluginError> {
        match id {
            VIRTUAL_MODULE_ID => self.artifact_module().map(Some),
            RUNTIME_MODULE_ID => Ok(Some(RUNTIME_SOURCE.to_string())),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_only_its_ids() {
        let plugin = SpritePlugin::new(SpriteConfig::default()).unwrap();
        assert_eq!(plugin.resolve_id(VIRTUAL_MODULE_ID).as_deref(), Some(VIRTUAL_MODULE_ID));
        assert_eq!(plugin.resolve_id(RUNTIME_MODULE_ID).as_deref(), Some(RUNTIME_MODULE_ID));
        assert_eq!(plugin.resolve_id("./main.js"), None);
        assert!(plugin.load("./main.js").unwrap().is_none());
    }

    #[test]
    fn registers_sprite_as_asset() {
        let plugin = SpritePlugin::new(SpriteConfig::default().with_sprite_name("icons.png")).unwrap();
        assert_eq!(plugin.config().assets_include, vec!["icons.png".to_string()]);
        assert_eq!(plugin.name(), "merge-images");
    }

    #[test]
    fn artifact_load_before_build_start_is_invalid_state() {
        let plugin = SpritePlugin::new(SpriteConfig::default()).unwrap();
        assert_eq!(plugin.state(), GenerationState::Ungenerated);
        assert!(matches!(plugin.load(VIRTUAL_MODULE_ID), Err(PluginError::InvalidState(_))));
    }

    #[test]
    fn runtime_module_loads_any_time() {
        let plugin = SpritePlugin::new(SpriteConfig::default()).unwrap();
        let src = plugin.load(RUNTIME_MODULE_ID).unwrap().unwrap();
        assert!(src.contains("export function getImageStyle"));
    }

    #[test]
    fn root_defaults_to_current_dir() {
        let plugin = SpritePlugin::new(SpriteConfig::default()).unwrap();
        assert_eq!(plugin.root(), std::env::current_dir().unwrap());
        assert!(plugin.root().is_absolute());
    }

    #[test]
    fn unreadable_current_dir_is_an_error() {
        let err = resolve_root(Err(io::Error::new(io::ErrorKind::NotFound, "cwd removed"))).unwrap_err();
        assert!(matches!(err, PluginError::Root(_)));
        assert!(err.to_string().contains("cwd removed"));
    }

    #[test]
    fn explicit_root_skips_current_dir() {
        let plugin = SpritePlugin::in_root(SpriteConfig::default(), SkylinePacker::default(), "/project");
        assert_eq!(plugin.root(), Path::new("/project"));
        assert_eq!(plugin.state(), GenerationState::Ungenerated);
    }
}
