//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override these keys one by one, so a file that only sets
/// `retry.max_attempts` keeps the default delay and multiplier.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    let store_path = crate::config::default_store_path();
    Config::builder()
        .set_default("generation.request_timeout_secs", 120_i64)?
        .set_default("retry.max_attempts", 3_i64)?
        .set_default("retry.initial_delay_ms", 1000_i64)?
        .set_default("retry.backoff_multiplier", 2_i64)?
        .set_default("bulk.item_interval_ms", 100_i64)?
        .set_default("storage.store_path", store_path.to_string_lossy().into_owned())
}
