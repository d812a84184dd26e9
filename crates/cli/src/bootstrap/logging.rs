use anyhow::Context;
use doh_relay_domain::config::LoggingConfig;
use tracing_subscriber::{
    filter::{LevelFilter, ParseError},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// `RUST_LOG` wins over the configured level when it is set.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(&config.level, env)
        .with_context(|| format!("invalid log level '{}'", config.level))?;

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()?;
    }

    Ok(())
}

fn build_filter(level: &str, env: Option<String>) -> Result<EnvFilter, ParseError> {
    match env {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives),
        _ => EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .parse(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_level() {
        let filter = build_filter("debug", None).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_env_overrides_configured_level() {
        let filter = build_filter("debug", Some("warn".to_string())).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let filter = build_filter("error", Some("  ".to_string())).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::ERROR));
    }

    #[test]
    fn test_invalid_level() {
        assert!(build_filter("doh_relay=verbose", None).is_err());
    }
}
