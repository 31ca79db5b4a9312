//! Configuration loading and representation.
//!
//! Settings come from environment variables; every value has a default so a
//! bare `saddlebook-api` starts with `./students.json` on port 5000.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DATA_FILE_ENV: &str = "SADDLEBOOK_DATA_FILE";
pub const BIND_ADDR_ENV: &str = "SADDLEBOOK_BIND_ADDR";

pub const DEFAULT_DATA_FILE: &str = "students.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value:?}")]
    InvalidBindAddr { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_file: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_file = lookup(DATA_FILE_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

        let bind_raw = lookup(BIND_ADDR_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr {
                var: BIND_ADDR_ENV,
                value: bind_raw.clone(),
            })?;

        Ok(Self {
            data_file: PathBuf::from(data_file),
            bind_addr,
        })
    }
}
