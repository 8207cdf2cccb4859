use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "transcript-batch";

/// Name of the environment variable that carries a session cookie.
pub const COOKIE_ENV: &str = "NEXTAUTH_COOKIE";

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .context("Unable to determine config directory")
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Prepend `http://` when the URL carries no scheme and drop trailing slashes.
pub fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    let with_scheme = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    };
    with_scheme.trim_end_matches('/').to_string()
}
