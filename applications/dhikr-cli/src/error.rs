/// CLI error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Missing setting {key} (set {env} or add it to the config file)")]
    MissingSetting {
        key: &'static str,
        env: &'static str,
    },

    #[error("Track not found: {0}")]
    TrackNotFound(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] dhikr_catalog::CatalogError),

    #[error("Share link error: {0}")]
    Share(#[from] dhikr_core::CoreError),
}
