//! Configuration for the view catalog emitter
//!
//! Settings are merged from three layers, last one wins:
//! 1. Built-in defaults
//! 2. Config file (route-unify.toml)
//! 3. Overrides (CLI flags or host application)

mod defaults;
mod effective;
mod merge;

pub use defaults::BuiltinDefaults;
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig};
pub use merge::{deep_merge, merge_layers};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default config file name.
pub const CONFIG_FILE: &str = "route-unify.toml";

/// When server views are collected for the client-side menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuPopulation {
    /// Always collect server views.
    Always,
    /// Collect server views only when the client has no main layout.
    #[default]
    Auto,
}

/// Typed emitter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnifyConfig {
    /// Overlay server-declared views on the client catalog
    pub expose_server_routes: bool,

    /// In development mode the client route file is re-read when it changes
    pub production_mode: bool,

    pub menu_population: MenuPopulation,

    /// Frontend directory holding `generated/file-routes.json` (development mode only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend_dir: Option<PathBuf>,
}

impl Default for UnifyConfig {
    fn default() -> Self {
        let defaults = BuiltinDefaults::default();
        Self {
            expose_server_routes: defaults.expose_server_routes,
            production_mode: defaults.production_mode,
            menu_population: defaults.menu_population,
            frontend_dir: None,
        }
    }
}

impl UnifyConfig {
    /// Validate cross-field rules.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.production_mode && self.frontend_dir.is_none() {
            tracing::warn!("development mode without frontend_dir; client routes will not be reloaded");
        }
        if let Some(dir) = &self.frontend_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Validation(
                    "frontend_dir must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
