use super::{
    types::{Config, MAX_MIN_INTERVAL_MINS},
    ConfigError,
};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Site URLs are http(s)
/// - Site timeout is not 0
/// - Poll tick is not 0 when polling is enabled
/// - Cache minimum interval is at most one week
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    for (key, url) in [
        ("site.base_url", &config.site.base_url),
        ("site.download_url", &config.site.download_url),
    ] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "{} must be an http(s) URL, got {:?}",
                key, url
            )));
        }
    }

    if config.site.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "site.timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.cache.poll_enabled && config.cache.poll_tick_secs == 0 {
        return Err(ConfigError::ValidationError(
            "cache.poll_tick_secs cannot be 0 when polling is enabled".to_string(),
        ));
    }

    if config.cache.min_interval_mins > MAX_MIN_INTERVAL_MINS {
        return Err(ConfigError::ValidationError(format!(
            "cache.min_interval_mins must be at most {}, got {}",
            MAX_MIN_INTERVAL_MINS, config.cache.min_interval_mins
        )));
    }

    Ok(())
}
