//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file from the working directory, if there is one
//! 2. Attempts to load from environment variables
//! 3. If the credentials are missing, falls back to loading from file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `NORDIGEN_SECRET_ID`: Secret id (UUID), required
//! - `NORDIGEN_SECRET_KEY`: Secret key as hex text, required
//! - `NORDIGEN_BASE_URL`: Versioned API root
//! - `NORDIGEN_TIMEOUT_SECS`: Request timeout in seconds
//! - `NORDIGEN_TOKEN_EXPIRATION_BUFFER_SECS`: Expiry buffer, zero or negative
//! - `NORDIGEN_PAGE_SIZE`: Page size for paged listings
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./nordigen.toml` or `./nordigen.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use nordigen_domain::{NordigenConfig, NordigenError, Result};

pub const SECRET_ID_VAR: &str = "NORDIGEN_SECRET_ID";
pub const SECRET_KEY_VAR: &str = "NORDIGEN_SECRET_KEY";
pub const BASE_URL_VAR: &str = "NORDIGEN_BASE_URL";
pub const TIMEOUT_VAR: &str = "NORDIGEN_TIMEOUT_SECS";
pub const TOKEN_EXPIRATION_BUFFER_VAR: &str = "NORDIGEN_TOKEN_EXPIRATION_BUFFER_SECS";
pub const PAGE_SIZE_VAR: &str = "NORDIGEN_PAGE_SIZE";

const CONFIG_FILE_NAMES: [&str; 4] = ["nordigen.toml", "nordigen.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables (after reading any
/// `.env` file). If the credentials are missing, falls back to a config file.
///
/// # Errors
/// Returns `NordigenError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A value fails validation
pub fn load() -> Result<NordigenConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Read .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The credentials must be present; every other setting falls back to its
/// default when unset.
///
/// # Errors
/// Returns `NordigenError::Config` if a credential is missing, a number does
/// not parse, or the result fails validation.
pub fn load_from_env() -> Result<NordigenConfig> {
    let mut config = NordigenConfig::new(env_var(SECRET_ID_VAR)?, env_var(SECRET_KEY_VAR)?);

    if let Some(base_url) = optional_env_var(BASE_URL_VAR) {
        config.base_url = base_url;
    }
    if let Some(timeout) = env_parse(TIMEOUT_VAR, "timeout")? {
        config.timeout_secs = timeout;
    }
    if let Some(buffer) = env_parse(TOKEN_EXPIRATION_BUFFER_VAR, "token expiration buffer")? {
        config.token_expiration_buffer_secs = buffer;
    }
    if let Some(page_size) = env_parse(PAGE_SIZE_VAR, "page size")? {
        config.page_size = page_size;
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `NordigenError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - A value fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<NordigenConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(NordigenError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            NordigenError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| NordigenError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `NordigenError::Config` if format is invalid or parsing fails.
pub fn parse_config(contents: &str, path: &Path) -> Result<NordigenConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| NordigenError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| NordigenError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(NordigenError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory first, then the directory of the
/// running executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(CONFIG_FILE_NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `NordigenError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    optional_env_var(key).ok_or_else(|| {
        NordigenError::Config(format!("Missing required environment variable: {}", key))
    })
}

fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Parse an optional numeric environment variable.
///
/// # Errors
/// Returns `NordigenError::Config` naming `what` if the value does not parse.
fn env_parse<N>(key: &str, what: &str) -> Result<Option<N>>
where
    N: FromStr,
    N::Err: std::fmt::Display,
{
    optional_env_var(key)
        .map(|raw| {
            raw.parse::<N>()
                .map_err(|e| NordigenError::Config(format!("Invalid {what} in {key}: {e}")))
        })
        .transpose()
}
