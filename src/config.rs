//! Configuration management for the music export CLI.
//!
//! This module loads configuration values from environment variables and
//! `.env` files and collects them into an explicit [`Config`] value that is
//! handed to the fetcher and the export writer. Nothing else in the crate
//! reads the environment.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::types::Credentials;

/// Environment variable holding the developer (bearer) token.
pub const DEVELOPER_TOKEN_VAR: &str = "APPLE_DEVELOPER_TOKEN";
/// Environment variable holding the per-user media token.
pub const USER_TOKEN_VAR: &str = "APPLE_MUSIC_USER_TOKEN";
/// Optional override for the export directory.
pub const OUTPUT_DIR_VAR: &str = "OUTPUT_DIR";
/// Optional override for the log directory.
pub const LOG_DIR_VAR: &str = "LOG_DIR";
/// Optional override for the API origin.
pub const API_URL_VAR: &str = "APPLE_MUSIC_API_URL";

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_API_BASE: &str = "https://amp-api.music.apple.com";

/// Runtime configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub developer_token: Option<String>,
    pub user_token: Option<String>,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    pub api_base: String,
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Tokens that are set but empty count as missing. Blank overrides fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            developer_token: non_empty(DEVELOPER_TOKEN_VAR),
            user_token: non_empty(USER_TOKEN_VAR),
            output_dir: PathBuf::from(
                non_empty(OUTPUT_DIR_VAR).unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            ),
            log_dir: PathBuf::from(
                non_empty(LOG_DIR_VAR).unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()),
            ),
            api_base: non_empty(API_URL_VAR)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    /// Returns both tokens when they are present.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.developer_token, &self.user_token) {
            (Some(dev), Some(user)) => Some(Credentials::new(dev, user)),
            _ => None,
        }
    }

    /// Replaces the export directory, e.g. from a command line flag.
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        self
    }
}

/// Loads environment variables from `.env` files.
///
/// The `.env` in the working directory is read first, then the one in the
/// platform-specific local data directory under `music-export/.env`:
/// - Linux: `~/.local/share/music-export/.env`
/// - macOS: `~/Library/Application Support/music-export/.env`
/// - Windows: `%LOCALAPPDATA%/music-export/.env`
///
/// Variables that are already set are never overwritten, and neither file is
/// required to exist.
///
/// # Errors
///
/// Returns an error string if a `.env` file exists but cannot be parsed.
pub fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("music-export/.env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    Ok(())
}
