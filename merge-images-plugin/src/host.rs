//! The slice of a bundler's plugin lifecycle this crate relies on.

use std::future::Future;

use crate::PluginError;

/// Options a plugin contributes to the host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostConfig {
    /// File names the host must treat as static assets.
    pub assets_include: Vec<String>,
}

pub trait BuildPlugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn config(&self) -> HostConfig { HostConfig::default() }

    /// Called when a build session starts.
    fn build_start(&self) -> impl Future<Output = Result<(), PluginError>> + Send;

    /// Claim a module id. `None` leaves resolution to other plugins.
    fn resolve_id(&self, id: &str) -> Option<String>;

    /// Source text for an id this plugin resolved, `Ok(None)` for anything else.
    fn load(&self, id: &str) -> Result<Option<String>, PluginError>;
}
