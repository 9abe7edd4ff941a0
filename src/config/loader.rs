//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::OnexportConfig;
use crate::domain::errors::OnexportError;
use crate::domain::result::Result;
use crate::domain::OutputKind;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "onexport.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into OnexportConfig
/// 4. Applies environment variable overrides (ONEXPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use onexport::config::loader::load_config;
///
/// let config = load_config("onexport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<OnexportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(OnexportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        OnexportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] without the file access.
pub fn load_config_from_str(contents: &str) -> Result<OnexportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: OnexportConfig = toml::from_str(&contents)
        .map_err(|e| OnexportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        OnexportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(OnexportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    let mut result = lines.join("\n");
    if input.ends_with('\n') {
        result.push('\n');
    }
    Ok(result)
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(OnexportError::Configuration(format!(
            "{name} must be a boolean, got '{other}'"
        ))),
    }
}

fn parse_u64(name: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        OnexportError::Configuration(format!("{name} must be a non-negative integer, got '{value}'"))
    })
}

/// Applies environment variable overrides using ONEXPORT_* prefix
///
/// Environment variables follow the pattern: ONEXPORT_<SECTION>_<KEY>
/// For example: ONEXPORT_EXPORT_DESTINATION_DIR, ONEXPORT_HELPER_PATH
fn apply_env_overrides(config: &mut OnexportConfig) -> Result<()> {
    const PREFIX: &str = "ONEXPORT_";
    let var = |key: &str| std::env::var(format!("{PREFIX}{key}")).ok();

    // Application overrides
    if let Some(val) = var("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Helper overrides
    if let Some(val) = var("HELPER_PATH") {
        config.helper.path = Some(val);
    }
    if let Some(val) = var("HELPER_CALL_TIMEOUT_SECS") {
        config.helper.call_timeout_secs = parse_u64("ONEXPORT_HELPER_CALL_TIMEOUT_SECS", &val)?;
    }

    // Export overrides
    if let Some(val) = var("EXPORT_DESTINATION_DIR") {
        config.export.destination_dir = val;
    }
    if let Some(val) = var("EXPORT_FORMAT") {
        config.export.format = val
            .parse::<OutputKind>()
            .map_err(OnexportError::Configuration)?;
    }
    if let Some(val) = var("EXPORT_NOTEBOOKS") {
        config.export.notebooks = val
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(val) = var("EXPORT_NETWORK_TRIGGER_RETRY") {
        config.export.network_trigger_retry =
            parse_bool("ONEXPORT_EXPORT_NETWORK_TRIGGER_RETRY", &val)?;
    }
    if let Some(val) = var("EXPORT_NETWORK_RETRY_DELAY_SECS") {
        config.export.network_retry_delay_secs =
            parse_u64("ONEXPORT_EXPORT_NETWORK_RETRY_DELAY_SECS", &val)?;
    }
    if let Some(val) = var("EXPORT_TERMINATE_HOST_ON_CANCEL") {
        config.export.terminate_host_on_cancel =
            parse_bool("ONEXPORT_EXPORT_TERMINATE_HOST_ON_CANCEL", &val)?;
    }

    // Backup overrides
    if let Some(val) = var("BACKUP_SOURCE_DIR") {
        config.backup.source_dir = val;
    }

    // Logging overrides
    if let Some(val) = var("LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("ONEXPORT_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = var("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
