//! Effective configuration with provenance
//!
//! Records which layers contributed to the final settings and the digest of
//! the config file that was read.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;
use super::UnifyConfig;

/// Origin of a configuration layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Override,
}

/// A contributing layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (None for builtin/override)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 of the raw file bytes (None for builtin/override)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Merged settings plus the layers they came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub config: UnifyConfig,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveConfig {
    /// Build from the built-in defaults, an optional config file and optional overrides.
    ///
    /// A config path that does not exist is skipped.
    pub fn build(config_path: Option<&Path>, overrides: Option<Value>) -> Result<Self, ConfigError> {
        let mut layers = vec![BuiltinDefaults::default().to_value()];
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        }];

        if let Some(path) = config_path.filter(|p| p.exists()) {
            let (value, digest) = load_toml_file(path)?;
            layers.push(value);
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.display().to_string()),
                digest: Some(digest),
            });
        }

        if let Some(overrides) = overrides {
            layers.push(overrides);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Override,
                path: None,
                digest: None,
            });
        }

        let config: UnifyConfig = serde_json::from_value(merge_layers(layers))
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        config.validate()?;

        tracing::debug!(?config, layers = sources.len(), "resolved configuration");
        Ok(Self { config, sources })
    }
}

fn load_toml_file(path: &Path) -> Result<(Value, String), ConfigError> {
    let bytes = fs::read(path)?;
    let digest = hex::encode(Sha256::digest(&bytes));

    let contents = String::from_utf8(bytes)
        .map_err(|e| ConfigError::Parse(format!("{}: invalid UTF-8: {}", path.display(), e)))?;
    let value: Value = toml::from_str(&contents)
        .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;

    Ok((value, digest))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MenuPopulation;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_build_with_defaults_only() {
        let effective = EffectiveConfig::build(None, None).unwrap();
        assert_eq!(effective.config, UnifyConfig::default());
        assert_eq!(effective.sources.len(), 1);
        assert_eq!(effective.sources[0].origin, ConfigOrigin::Builtin);
    }

    #[test]
    fn test_file_then_override() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "production_mode = false").unwrap();
        writeln!(temp, "menu_population = \"always\"").unwrap();
        writeln!(temp, "frontend_dir = \"frontend\"").unwrap();

        let overrides = serde_json::json!({"menu_population": "auto", "expose_server_routes": false});
        let effective = EffectiveConfig::build(Some(temp.path()), Some(overrides)).unwrap();

        assert!(!effective.config.production_mode);
        assert!(!effective.config.expose_server_routes);
        assert_eq!(effective.config.menu_population, MenuPopulation::Auto);
        assert_eq!(effective.config.frontend_dir.as_deref(), Some(Path::new("frontend")));

        let origins: Vec<_> = effective.sources.iter().map(|s| s.origin).collect();
        assert_eq!(origins, vec![ConfigOrigin::Builtin, ConfigOrigin::File, ConfigOrigin::Override]);
        assert_eq!(effective.sources[1].digest.as_ref().map(String::len), Some(64));
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let effective = EffectiveConfig::build(Some(Path::new("/nonexistent/route-unify.toml")), None).unwrap();
        assert_eq!(effective.sources.len(), 1);
    }

    #[test]
    fn test_unknown_menu_population_rejected() {
        let overrides = serde_json::json!({"menu_population": "sometimes"});
        let err = EffectiveConfig::build(None, Some(overrides)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let overrides = serde_json::json!({"expose_server_views": true});
        let err = EffectiveConfig::build(None, Some(overrides)).unwrap_err();
        assert!(err.to_string().contains("expose_server_views"));
    }

    #[test]
    fn test_invalid_toml() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "production_mode = ").unwrap();
        let err = EffectiveConfig::build(Some(temp.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
