use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let completion_api_key = require("PEDIDOS_COMPLETION_API_KEY")?;

    let env = parse_environment(&or_default("PEDIDOS_ENV", "development"));
    let log_level = or_default("PEDIDOS_LOG_LEVEL", "info");
    let completion_base_url = or_default(
        "PEDIDOS_COMPLETION_BASE_URL",
        "https://api.openai.com/v1",
    );
    let completion_model = or_default("PEDIDOS_COMPLETION_MODEL", "gpt-4o-mini");
    let request_timeout_secs = parse_u64("PEDIDOS_REQUEST_TIMEOUT_SECS", "30")?;
    let max_catalog_items = parse_usize("PEDIDOS_MAX_CATALOG_ITEMS", "100")?;

    Ok(AppConfig {
        env,
        log_level,
        completion_base_url,
        completion_api_key,
        completion_model,
        request_timeout_secs,
        max_catalog_items,
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

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("PEDIDOS_COMPLETION_API_KEY", "sk-test-key");
        m
    }

    #[test]
    fn parse_environment_test() {
        assert_eq!(parse_environment("test"), Environment::Test);
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_api_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "PEDIDOS_COMPLETION_API_KEY"),
            "expected MissingEnvVar(PEDIDOS_COMPLETION_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.completion_base_url, "https://api.openai.com/v1");
        assert_eq!(cfg.completion_model, "gpt-4o-mini");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.max_catalog_items, 100);
    }

    #[test]
    fn build_app_config_timeout_override() {
        let mut map = full_env();
        map.insert("PEDIDOS_REQUEST_TIMEOUT_SECS", "60");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.request_timeout_secs, 60);
    }

    #[test]
    fn build_app_config_timeout_invalid() {
        let mut map = full_env();
        map.insert("PEDIDOS_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PEDIDOS_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(PEDIDOS_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_max_catalog_items_override() {
        let mut map = full_env();
        map.insert("PEDIDOS_MAX_CATALOG_ITEMS", "25");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_catalog_items, 25);
    }

    #[test]
    fn build_app_config_max_catalog_items_invalid() {
        let mut map = full_env();
        map.insert("PEDIDOS_MAX_CATALOG_ITEMS", "-1");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PEDIDOS_MAX_CATALOG_ITEMS"),
            "expected InvalidEnvVar(PEDIDOS_MAX_CATALOG_ITEMS), got: {result:?}"
        );
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("sk-test-key"), "api key leaked: {rendered}");
        assert!(rendered.contains("[redacted]"));
    }
}
