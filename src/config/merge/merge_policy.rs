//! Merge rules: defaults first, later sources override earlier ones key by key.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("generator.component", crate::workspace::DEFAULT_COMPONENT)?
        .set_default("generator.package_manager", "npm")?
        .set_default("generator.skip_install", false)
}
