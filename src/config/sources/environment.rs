//! Environment source: `CURRICULA__GENERATION__ENDPOINT=...` sets `generation.endpoint`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("CURRICULA")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
