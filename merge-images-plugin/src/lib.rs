//! Bundler integration for `merge-images-core`: generate the atlas once per plugin instance and serve
//! it to application code through a virtual module.

pub mod error;
pub mod host;
pub mod module;
pub mod plugin;

pub use error::PluginError;
pub use host::{BuildPlugin, HostConfig};
pub use module::{RUNTIME_MODULE_ID, VIRTUAL_MODULE_ID};
pub use plugin::{GeneratedSprite, GenerationState, SpritePlugin, PLUGIN_NAME};
