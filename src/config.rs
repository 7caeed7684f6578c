//! Configuration management for the harness.
//!
//! Values are read through an [`EnvSource`] rather than straight from the
//! process environment, so callers and tests can inject their own mapping.
//! [`ProcessEnv`] is the real environment, with a `.env` file loaded first
//! if one exists.

use crate::domain::{EmailAddress, SpaceSigner};
use crate::endpoint::Target;
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::env;

/// Email address of the account under test.
pub const EMAIL_VAR: &str = "W3S_EMAIL";

/// Formatted signer of a space already registered with the service.
pub const REGISTERED_SPACE_SIGNER_VAR: &str = "REGISTERED_SPACE_SIGNER";

/// Deployment selector (`staging` or `production`).
pub const TARGET_VAR: &str = "W3_TARGET";

/// A mapping from variable name to optional value.
pub trait EnvSource {
    fn get(&self, name: &str) -> Option<String>;

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// Load `.env` if present (without failing if it isn't) and return the
    /// process environment.
    pub fn load() -> Self {
        // dotenvy::dotenv() doesn't print to stdout
        let _ = dotenvy::dotenv();
        ProcessEnv
    }
}

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).map(|v| v.to_string())
    }
}

/// Read a variable that must be present and non-empty.
pub fn read_required(env: &dyn EnvSource, var: &str) -> ConfigResult<String> {
    match env.get(var) {
        Some(value) if !value.is_empty() => Ok(value),
        other => Err(ConfigError::MissingVar {
            var: var.to_string(),
            got: match other {
                Some(empty) => format!("{:?}", empty),
                None => "undefined".to_string(),
            },
        }),
    }
}

/// Read a required variable and parse it as an [`EmailAddress`].
pub fn read_email_address_from_env(env: &dyn EnvSource, var: &str) -> ConfigResult<EmailAddress> {
    tracing::warn!("'{}' in env: {}", var, env.contains(var));
    let raw = read_required(env, var)?;
    EmailAddress::parse(&raw).map_err(|e| ConfigError::InvalidValue {
        var: var.to_string(),
        expected: "EmailAddress",
        value: raw,
        source: Some(Box::new(e)),
    })
}

/// Read a required variable and parse it as a formatted [`SpaceSigner`].
pub fn read_signer_from_env(env: &dyn EnvSource, var: &str) -> ConfigResult<SpaceSigner> {
    let formatted = read_required(env, var)?;
    SpaceSigner::parse(&formatted).map_err(|e| ConfigError::InvalidValue {
        var: var.to_string(),
        expected: "ed25519.Signer",
        value: formatted,
        source: Some(Box::new(e)),
    })
}

/// Configuration for a harness run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment to probe (default: staging)
    pub target: Target,

    /// Account email, if configured
    pub email: Option<EmailAddress>,

    /// Signer of a registered space, if configured
    pub registered_space: Option<SpaceSigner>,

    /// HTTP request timeout in seconds (default: 30)
    pub request_timeout: u64,

    /// Log level (default: "warn")
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process environment (and `.env`).
    ///
    /// Optional environment variables:
    /// - `W3_TARGET`: `staging` or `production` (default: staging)
    /// - `W3S_EMAIL`: account email address
    /// - `REGISTERED_SPACE_SIGNER`: formatted ed25519 signer of a registered space
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 30)
    /// - `LOG_LEVEL`: Logging level (default: "warn")
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_source(&ProcessEnv::load())
    }

    /// Load configuration from any [`EnvSource`].
    ///
    /// Absent variables fall back to their defaults; present but invalid
    /// ones are errors.
    pub fn from_source(env: &dyn EnvSource) -> ConfigResult<Self> {
        let target = match env.get(TARGET_VAR) {
            Some(raw) => raw.parse::<Target>().map_err(|reason| ConfigError::InvalidValue {
                var: TARGET_VAR.to_string(),
                expected: "Target",
                value: raw,
                source: Some(reason.into()),
            })?,
            None => Target::default(),
        };

        let email = if env.contains(EMAIL_VAR) {
            Some(read_email_address_from_env(env, EMAIL_VAR)?)
        } else {
            None
        };

        let registered_space = if env.contains(REGISTERED_SPACE_SIGNER_VAR) {
            Some(read_signer_from_env(env, REGISTERED_SPACE_SIGNER_VAR)?)
        } else {
            None
        };

        let request_timeout = Self::parse_env_u64(env, "REQUEST_TIMEOUT", 30)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                expected: "a positive number of seconds",
                value: "0".to_string(),
                source: None,
            });
        }

        let log_level = env.get("LOG_LEVEL").unwrap_or_else(|| "warn".to_string());

        Ok(Config {
            target,
            email,
            registered_space,
            request_timeout,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(env: &dyn EnvSource, var_name: &str, default: u64) -> ConfigResult<u64> {
        match env.get(var_name) {
            Some(val) => val.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                var: var_name.to_string(),
                expected: "u64",
                value: val,
                source: Some(Box::new(e)),
            }),
            None => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target: Target::default(),
            email: None,
            registered_space: None,
            request_timeout: 30,
            log_level: "warn".to_string(),
        }
    }
}
