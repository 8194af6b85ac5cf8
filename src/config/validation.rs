use crate::config::types::{Config, LoggingConfig, Settings, Target};
use crate::scrape::CompiledTarget;
use crate::ConfigError;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Record columns that a selector field may not shadow
pub const RESERVED_FIELDS: [&str; 3] = ["target_name", "url", "fetched_at"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_and_compile(config).map(|_| ())
}

/// Validates the configuration and returns its targets compiled, in order
///
/// Selectors are parsed exactly once here; callers that go on to scrape
/// keep the compiled targets instead of parsing them again.
pub fn validate_and_compile(config: &Config) -> Result<Vec<CompiledTarget>, ConfigError> {
    validate_settings(&config.settings)?;
    validate_logging_config(&config.logging)?;
    validate_targets(&config.targets)
}

/// Converts a seconds setting into a `Duration`, rejecting values it cannot hold
pub(crate) fn seconds_to_duration(name: &str, seconds: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(seconds).map_err(|e| {
        ConfigError::Validation(format!(
            "{} of {} seconds is out of range: {}",
            name, seconds, e
        ))
    })
}

/// Validates global settings
fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    if settings.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if !settings.request_delay.is_finite() || settings.request_delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "request_delay must be >= 0 seconds, got {}",
            settings.request_delay
        )));
    }

    if !settings.timeout.is_finite() || settings.timeout <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "timeout must be > 0 seconds, got {}",
            settings.timeout
        )));
    }

    seconds_to_duration("request_delay", settings.request_delay)?;
    seconds_to_duration("timeout", settings.timeout)?;

    if settings.data_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "data_dir cannot be empty".to_string(),
        ));
    }

    if settings.filename_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "filename_prefix cannot be empty".to_string(),
        ));
    }

    if settings.filename_prefix.contains(['/', '\\']) {
        return Err(ConfigError::Validation(format!(
            "filename_prefix must not contain path separators, got '{}'",
            settings.filename_prefix
        )));
    }

    Ok(())
}

/// Validates logging configuration
fn validate_logging_config(config: &LoggingConfig) -> Result<(), ConfigError> {
    config.level.parse::<tracing::Level>().map_err(|_| {
        ConfigError::Validation(format!("Unknown log level '{}'", config.level))
    })?;
    Ok(())
}

/// Validates the target list, including selector syntax
fn validate_targets(targets: &[Target]) -> Result<Vec<CompiledTarget>, ConfigError> {
    if targets.is_empty() {
        return Err(ConfigError::Validation(
            "At least one target must be configured".to_string(),
        ));
    }

    let mut names = HashSet::new();
    let mut compiled = Vec::with_capacity(targets.len());
    for target in targets {
        if target.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Target with URL '{}' has an empty name",
                target.url
            )));
        }

        if !names.insert(target.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Duplicate target name '{}'",
                target.name
            )));
        }

        validate_target_url(target)?;
        validate_field_names(target)?;

        compiled.push(CompiledTarget::compile(target)?);
    }

    Ok(compiled)
}

/// Target URLs must be absolute http(s)
fn validate_target_url(target: &Target) -> Result<(), ConfigError> {
    let url = Url::parse(&target.url).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid URL '{}' for target '{}': {}",
            target.url, target.name, e
        ))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "URL '{}' for target '{}' must use http or https",
            target.url, target.name
        )));
    }

    Ok(())
}

fn validate_field_names(target: &Target) -> Result<(), ConfigError> {
    for field in target.selectors.keys() {
        if field.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Target '{}' has a selector with an empty field name",
                target.name
            )));
        }

        if RESERVED_FIELDS.contains(&field.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Target '{}' uses reserved field name '{}'",
                target.name, field
            )));
        }
    }

    Ok(())
}
