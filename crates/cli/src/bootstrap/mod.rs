mod logging;

pub use logging::init_logging;

use netdns_domain::{CliOverrides, Config};

/// Load, override and validate configuration.
pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}
