//! Merge rules: defaults first, then files in precedence order.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("snapshot.output", "output.md")?
        .set_default("snapshot.follow_symlinks", false)?
        .set_default("restore.input", "input.md")?
        .set_default("restore.allow_escaping_paths", false)
}
