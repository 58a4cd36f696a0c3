//! Server configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `PORT` | `3000` | Listen port |
//! | `TOKEN_SECRET` | random per process | HMAC key for bearer tokens |
//! | `TOKEN_TTL_SECS` | `3600` | Bearer token lifetime |
//! | `DATA_PATH` | `pillarx.json` | Workspace snapshot file; empty keeps state in memory |

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use rand::Rng;

use crate::services::session::bytes_to_hex;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEFAULT_DATA_PATH: &str = "pillarx.json";

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub token_secret: String,
    /// Whether `token_secret` was generated because none was configured.
    pub ephemeral_secret: bool,
    pub token_ttl_secs: u64,
    /// `None` keeps the workspace in memory only.
    pub data_path: Option<PathBuf>,
}

impl Config {
    #[must_use]
    pub fn from_env() -> Self {
        let (token_secret, ephemeral_secret) = match std::env::var("TOKEN_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => (secret, false),
            _ => (random_secret(), true),
        };
        let data_path = match std::env::var("DATA_PATH") {
            Ok(path) if path.trim().is_empty() => None,
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => Some(PathBuf::from(DEFAULT_DATA_PATH)),
        };
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            token_secret,
            ephemeral_secret,
            token_ttl_secs: env_parse("TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS),
            data_path,
        }
    }
}

fn random_secret() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}
