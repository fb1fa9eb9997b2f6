pub mod server;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Application environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Name and version of the running binary, reported by the health endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Build an [`AppInfo`] from the calling crate's package metadata.
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Read an optional variable, treating blank values as unset.
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Return the first non-blank variable among `keys`.
///
/// The error names the first key, which is the canonical one.
pub fn env_first(keys: &[&str]) -> Result<String, ConfigError> {
    keys.iter()
        .find_map(|key| env_optional(key))
        .ok_or_else(|| ConfigError::MissingEnvVar(keys.first().copied().unwrap_or_default().to_string()))
}

/// Parse a variable into `T`, falling back to `default` when it is unset.
pub fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_optional(key) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// Split a comma-separated variable into trimmed, non-empty entries.
pub fn env_list(key: &str) -> Vec<String> {
    env_optional(key)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_app_info_macro_uses_package_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("TEST_VAR", "default"), "test_value");
        });
        temp_env::with_var_unset("MISSING_VAR", || {
            assert_eq!(env_or_default("MISSING_VAR", "default_value"), "default_value");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("MISSING_REQUIRED", || {
            let err = env_required("MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_optional_treats_blank_as_unset() {
        temp_env::with_var("BLANK_VAR", Some("   "), || {
            assert_eq!(env_optional("BLANK_VAR"), None);
        });
    }

    #[test]
    fn test_env_first_uses_fallbacks_in_order() {
        temp_env::with_vars(
            [
                ("PRIMARY_URL", None::<&str>),
                ("SECONDARY_URL", Some("second")),
                ("TERTIARY_URL", Some("third")),
            ],
            || {
                let value = env_first(&["PRIMARY_URL", "SECONDARY_URL", "TERTIARY_URL"]).unwrap();
                assert_eq!(value, "second");
            },
        );
    }

    #[test]
    fn test_env_first_reports_canonical_key() {
        temp_env::with_vars([("PRIMARY_URL", None::<&str>), ("SECONDARY_URL", None)], || {
            let err = env_first(&["PRIMARY_URL", "SECONDARY_URL"]).unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "PRIMARY_URL"));
        });
    }

    #[test]
    fn test_env_parse() {
        temp_env::with_var("POOL_SIZE", Some("12"), || {
            assert_eq!(env_parse("POOL_SIZE", 4u32).unwrap(), 12);
        });
        temp_env::with_var_unset("POOL_SIZE", || {
            assert_eq!(env_parse("POOL_SIZE", 4u32).unwrap(), 4);
        });
        temp_env::with_var("POOL_SIZE", Some("many"), || {
            let err = env_parse("POOL_SIZE", 4u32).unwrap_err();
            assert!(err.to_string().contains("POOL_SIZE"));
        });
    }

    #[test]
    fn test_env_list_splits_and_trims() {
        temp_env::with_var("ORIGINS", Some("https://a.dev, ,https://b.dev "), || {
            assert_eq!(env_list("ORIGINS"), vec!["https://a.dev", "https://b.dev"]);
        });
        temp_env::with_var_unset("ORIGINS", || {
            assert!(env_list("ORIGINS").is_empty());
        });
    }
}
