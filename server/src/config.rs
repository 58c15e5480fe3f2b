//! Server configuration parsed from environment variables.
//!
//! All keys are optional; absent keys fall back to defaults. A `.env` file
//! is loaded by `main` before this runs. Malformed values are errors rather
//! than silent fallbacks so a typo in a delay does not go unnoticed.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CHAT_REPLY_DELAY_MS: u64 = 1500;
pub const DEFAULT_CALL_CONNECT_DELAY_MS: u64 = 2000;
pub const DEFAULT_CALL_TICK_MS: u64 = 1000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid number for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("invalid boolean for {key}: {value:?}")]
    InvalidBool { key: &'static str, value: String },
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}

/// Timer settings for the simulated chat and call sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaygroundConfig {
    pub reply_delay: Duration,
    pub connect_delay: Duration,
    pub tick: Duration,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(DEFAULT_CHAT_REPLY_DELAY_MS),
            connect_delay: Duration::from_millis(DEFAULT_CALL_CONNECT_DELAY_MS),
            tick: Duration::from_millis(DEFAULT_CALL_TICK_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Start with the stock topics instead of an empty knowledge base.
    pub seed: bool,
    pub playground: PlaygroundConfig,
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `KB_SEED`: `true` (default) or `false`
    /// - `CHAT_REPLY_DELAY_MS`: default 1500
    /// - `CALL_CONNECT_DELAY_MS`: default 2000
    /// - `CALL_TICK_MS`: default 1000, must be non-zero
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for any value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for any value that does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_number(&lookup, "PORT", DEFAULT_PORT)?;
        let seed = parse_bool(&lookup, "KB_SEED", true)?;
        let tick_ms = parse_number(&lookup, "CALL_TICK_MS", DEFAULT_CALL_TICK_MS)?;
        if tick_ms == 0 {
            return Err(ConfigError::Zero { key: "CALL_TICK_MS" });
        }

        let playground = PlaygroundConfig {
            reply_delay: Duration::from_millis(parse_number(
                &lookup,
                "CHAT_REPLY_DELAY_MS",
                DEFAULT_CHAT_REPLY_DELAY_MS,
            )?),
            connect_delay: Duration::from_millis(parse_number(
                &lookup,
                "CALL_CONNECT_DELAY_MS",
                DEFAULT_CALL_CONNECT_DELAY_MS,
            )?),
            tick: Duration::from_millis(tick_ms),
        };

        Ok(Self { port, seed, playground })
    }
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
    }
}

fn parse_bool<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { key, value: raw }),
    }
}
