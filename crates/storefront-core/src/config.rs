use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Upper bound for `STOREFRONT_PRICE_DECIMALS`.
const MAX_PRICE_DECIMALS: u8 = 6;

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
/// Decoupled from the process environment so tests can use a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_decimals = |var: &str, default: &str| -> Result<u8, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.parse::<u8>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value > MAX_PRICE_DECIMALS {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be at most {MAX_PRICE_DECIMALS}"),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"));
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");
    let currency_symbol = or_default("STOREFRONT_CURRENCY_SYMBOL", "$");
    let price_decimals = parse_decimals("STOREFRONT_PRICE_DECIMALS", "2")?;
    let tba_label = or_default("STOREFRONT_TBA_LABEL", "TBA");

    if tba_label.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_TBA_LABEL".to_string(),
            reason: "must not be blank".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        currency_symbol,
        price_decimals,
        tba_label,
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
