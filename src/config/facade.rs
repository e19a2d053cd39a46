//! Loader facade over the layered sources.

use super::merge::merge_policy;
use super::sources::{environment, global_file, workspace_file};
use super::CurriculaConfig;
use crate::error::ApiError;
use config::{ConfigError, File};
use std::path::Path;
use tracing::debug;

/// Loads [`CurriculaConfig`] from defaults, files and the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, `config/config.toml`,
    /// `config/{CURRICULA_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<CurriculaConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: CurriculaConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            endpoint_configured = config.generation.configured_endpoint().is_some(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a single file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<CurriculaConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()
    }

    /// Write a configuration as TOML, creating the parent directory if needed.
    pub fn save_to_file(config: &CurriculaConfig, path: &Path) -> Result<(), ApiError> {
        let rendered = toml::to_string_pretty(config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ApiError::ConfigError(format!("Failed to create config directory: {}", e))
                })?;
            }
        }
        std::fs::write(path, rendered)
            .map_err(|e| ApiError::ConfigError(format!("Failed to write config {:?}: {}", path, e)))
    }
}
