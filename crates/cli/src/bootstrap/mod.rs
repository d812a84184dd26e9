mod logging;

pub use logging::init_logging;

use anyhow::Context;
use doh_relay_domain::{CliOverrides, Config};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}
