//! Server configuration
//!
//! Reads config from env vars:
//!   ONBOARD_BIND_ADDR            — listen host (default: 0.0.0.0)
//!   PORT                         — listen port (default: 5000)
//!   ONBOARD_URL                  — base URL the form submits to (default: http://127.0.0.1:<PORT>)
//!   ONBOARD_REQUEST_TIMEOUT_SECS — submission timeout (default: 30)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Base URL of the onboarding API used by the form
    pub onboard_url: String,
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: IpAddr = parse_var(&lookup, "ONBOARD_BIND_ADDR", DEFAULT_HOST.parse().ok())?;
        let port: u16 = parse_var(&lookup, "PORT", Some(DEFAULT_PORT))?;
        let timeout_secs: u64 =
            parse_var(&lookup, "ONBOARD_REQUEST_TIMEOUT_SECS", Some(DEFAULT_TIMEOUT_SECS))?;

        let onboard_url = lookup("ONBOARD_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", port));

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            onboard_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var).filter(|v| !v.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue {
                var,
                reason: e.to_string(),
                value,
            }),
        None => default.ok_or_else(|| ConfigError::InvalidValue {
            var,
            value: String::new(),
            reason: "no value and no default".to_string(),
        }),
    }
}
