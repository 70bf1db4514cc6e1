// src/config.rs
use crate::domain::slug::services::SlugPolicy;
use std::{env, str::FromStr};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    database_max_connections: u32,
    listen_addr: String,
    allowed_origins: Vec<String>,
    slug_policy: SlugPolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_database_url() -> String {
    "sqlite://permaslug.db?mode=rwc".into()
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

/// Parse an optional numeric variable, rejecting values that do not parse or are zero.
fn positive_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) if value > T::default() => Ok(value),
            _ => Err(ConfigError::Invalid(format!(
                "{key} must be a positive integer, got {raw:?}"
            ))),
        },
    }
}

impl AppConfig {
    /// Build configuration from environment variables. Uses sensible defaults
    /// for optional values and validates the rest.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(default_database_url);
        if database_url.trim().is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(default_listen_addr);

        let database_max_connections = positive_var(&lookup, "DATABASE_MAX_CONNECTIONS", 16u32)?;

        let defaults = SlugPolicy::default();
        let slug_policy = SlugPolicy {
            max_length: positive_var(&lookup, "SLUG_MAX_LENGTH", defaults.max_length)?,
            max_suffix: positive_var(&lookup, "SLUG_MAX_SUFFIX", defaults.max_suffix)?,
            max_save_attempts: positive_var(
                &lookup,
                "SLUG_MAX_SAVE_ATTEMPTS",
                defaults.max_save_attempts,
            )?,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|s| s.split(',').map(|p| p.trim().to_string()).collect())
            .unwrap_or_else(default_allowed_origins);

        Ok(Self {
            database_url,
            database_max_connections,
            listen_addr,
            allowed_origins,
            slug_policy,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn database_max_connections(&self) -> u32 {
        self.database_max_connections
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn slug_policy(&self) -> SlugPolicy {
        self.slug_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(move |key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url(), "sqlite://permaslug.db?mode=rwc");
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.database_max_connections(), 16);
        assert_eq!(config.slug_policy(), SlugPolicy::default());
        assert_eq!(config.slug_policy().max_length, 80);
    }

    #[test]
    fn slug_policy_is_read_from_env() {
        let config = config_from(&[
            ("SLUG_MAX_LENGTH", "40"),
            ("SLUG_MAX_SUFFIX", "99"),
            ("SLUG_MAX_SAVE_ATTEMPTS", "2"),
            ("ALLOWED_ORIGINS", "http://a.test, http://b.test"),
        ])
        .unwrap();
        let policy = config.slug_policy();
        assert_eq!(policy.max_length, 40);
        assert_eq!(policy.max_suffix, 99);
        assert_eq!(policy.max_save_attempts, 2);
        assert_eq!(config.allowed_origins(), ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!(matches!(
            config_from(&[("SLUG_MAX_LENGTH", "0")]),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            config_from(&[("SLUG_MAX_SUFFIX", "lots")]),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            config_from(&[("DATABASE_URL", " ")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
    }
}
