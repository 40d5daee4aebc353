/// CLI configuration
use crate::error::{CliError, Result};
use dhikr_catalog::{CatalogConfig, DEFAULT_BUCKET};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "dhikr.toml";

/// Prefix for environment overrides, e.g. `DHIKR_CATALOG__API_KEY`.
pub const ENV_PREFIX: &str = "DHIKR";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub share: ShareSettings,

    #[serde(default)]
    pub sync: SyncSettings,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShareSettings {
    /// Origin of the web player, used for `/track/<id>` links
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncSettings {
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            bucket: default_bucket(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `dhikr.toml` is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    /// Load with a caller-supplied environment source
    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path.to_path_buf()).required(true),
            None => config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
        };

        let settings = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.catalog.url.trim().is_empty() {
            return Err(CliError::MissingSetting {
                key: "catalog.url",
                env: "DHIKR_CATALOG__URL",
            });
        }

        if self.catalog.api_key.trim().is_empty() {
            return Err(CliError::MissingSetting {
                key: "catalog.api_key",
                env: "DHIKR_CATALOG__API_KEY",
            });
        }

        Ok(())
    }

    /// Catalog client settings
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(self.catalog.url.clone(), self.catalog.api_key.clone())
    }
}

/// Environment source for `DHIKR_<SECTION>__<KEY>` variables
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.sync.bucket, "audio");
        assert!(config.share.base_url.is_none());
        assert!(config.catalog.url.is_empty());
    }

    #[test]
    fn test_validate_requires_url_then_key() {
        let mut config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(CliError::MissingSetting { key: "catalog.url", .. })
        ));

        config.catalog.url = "https://x.supabase.co".into();
        assert!(matches!(
            config.validate(),
            Err(CliError::MissingSetting { key: "catalog.api_key", .. })
        ));

        config.catalog.api_key = "anon".into();
        assert!(config.validate().is_ok());
    }
}
