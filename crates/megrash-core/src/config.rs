use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("MEGRASH_ENV", "development"));
    let bind_addr = parse_addr("MEGRASH_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("MEGRASH_LOG_LEVEL", "info");
    let dataset_path = PathBuf::from(or_default("MEGRASH_DATASET_PATH", "./data/courts.csv"));

    let default_count = parse_usize("MEGRASH_DEFAULT_COUNT", "5")?;
    let max_count = parse_usize("MEGRASH_MAX_COUNT", "100")?;
    if max_count == 0 {
        return Err(invalid("MEGRASH_MAX_COUNT", "must be at least 1".to_string()));
    }
    if default_count > max_count {
        return Err(invalid(
            "MEGRASH_DEFAULT_COUNT",
            format!("{default_count} exceeds MEGRASH_MAX_COUNT ({max_count})"),
        ));
    }

    let cors_origins = parse_origins(&or_default("MEGRASH_CORS_ORIGINS", ""));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        dataset_path,
        default_count,
        max_count,
        cors_origins,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
