use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

/// Server settings shared by every binary, read from an optional
/// `configuration` file and `APP__*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Typed access to flat environment variables.
///
/// The lookup is injected so that service configs can be built from a fixed
/// map in tests instead of mutating the process environment.
pub struct EnvSource<F> {
    lookup: F,
    is_prod: bool,
}

impl EnvSource<fn(&str) -> Option<String>> {
    /// Reads from the process environment.
    pub fn process() -> Self {
        fn lookup(key: &str) -> Option<String> {
            std::env::var(key).ok()
        }
        Self::new(lookup as fn(&str) -> Option<String>)
    }
}

impl<F> EnvSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        let is_prod = lookup("ENVIRONMENT").as_deref() == Some("prod");
        Self { lookup, is_prod }
    }

    pub fn is_prod(&self) -> bool {
        self.is_prod
    }

    /// A value that must be present in every environment.
    pub fn required(&self, key: &str) -> Result<String, AppError> {
        match (self.lookup)(key) {
            Some(val) if !val.trim().is_empty() => Ok(val),
            _ => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        }
    }

    /// A value with a development default. Production must set it explicitly.
    pub fn with_default(&self, key: &str, default: &str) -> Result<String, AppError> {
        match (self.lookup)(key) {
            Some(val) => Ok(val),
            None if self.is_prod => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required in production but not set",
                key
            ))),
            None => Ok(default.to_string()),
        }
    }

    pub fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }

    /// A tunable with a fixed default in every environment.
    pub fn parsed<T>(&self, key: &str, default: T) -> Result<T, AppError>
    where
        T: FromStr,
        T::Err: Display,
    {
        Ok(self.parsed_optional(key)?.unwrap_or(default))
    }

    pub fn parsed_optional<T>(&self, key: &str) -> Result<Option<T>, AppError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.optional(key) {
            None => Ok(None),
            Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, raw, e))
            }),
        }
    }
}
