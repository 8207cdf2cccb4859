//! Browser cookie store discovery.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use super::Browser;

/// File names a Chromium profile may keep its cookies in, newest layout first
const CHROMIUM_COOKIE_FILES: &[&str] = &["Network/Cookies", "Cookies"];

const FIREFOX_COOKIE_FILE: &str = "cookies.sqlite";

/// Base directories the store locations are derived from.
#[derive(Debug, Clone)]
pub struct BaseDirs {
    pub home: PathBuf,
    /// `~/.config`, `~/Library/Application Support` or `%APPDATA%`
    pub config: PathBuf,
    /// `%LOCALAPPDATA%` on Windows, otherwise the same as `config`
    pub local_data: PathBuf,
}

impl BaseDirs {
    pub fn detect() -> Result<Self> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        let config = dirs::config_dir().context("Could not determine config directory")?;
        let local_data = dirs::data_local_dir().unwrap_or_else(|| config.clone());
        Ok(Self {
            home,
            config,
            local_data,
        })
    }
}

/// Profile directories (Chromium family) or profile roots (Firefox).
#[cfg(all(unix, not(target_os = "macos")))]
fn profile_locations(browser: Browser, base: &BaseDirs) -> Vec<PathBuf> {
    let config = &base.config;
    match browser {
        Browser::Chrome => vec![config.join("google-chrome/Default")],
        Browser::Chromium => vec![config.join("chromium/Default")],
        Browser::Brave => vec![config.join("BraveSoftware/Brave-Browser/Default")],
        Browser::Edge => vec![config.join("microsoft-edge/Default")],
        Browser::Opera => vec![config.join("opera")],
        Browser::Firefox => vec![
            base.home.join(".mozilla/firefox"),
            base.home.join("snap/firefox/common/.mozilla/firefox"),
        ],
    }
}

#[cfg(target_os = "macos")]
fn profile_locations(browser: Browser, base: &BaseDirs) -> Vec<PathBuf> {
    let support = &base.config;
    match browser {
        Browser::Chrome => vec![support.join("Google/Chrome/Default")],
        Browser::Chromium => vec![support.join("Chromium/Default")],
        Browser::Brave => vec![support.join("BraveSoftware/Brave-Browser/Default")],
        Browser::Edge => vec![support.join("Microsoft Edge/Default")],
        Browser::Opera => vec![support.join("com.operasoftware.Opera")],
        Browser::Firefox => vec![support.join("Firefox/Profiles")],
    }
}

#[cfg(windows)]
fn profile_locations(browser: Browser, base: &BaseDirs) -> Vec<PathBuf> {
    let local = &base.local_data;
    let roaming = &base.config;
    match browser {
        Browser::Chrome => vec![local.join("Google/Chrome/User Data/Default")],
        Browser::Chromium => vec![local.join("Chromium/User Data/Default")],
        Browser::Brave => vec![local.join("BraveSoftware/Brave-Browser/User Data/Default")],
        Browser::Edge => vec![local.join("Microsoft/Edge/User Data/Default")],
        Browser::Opera => vec![roaming.join("Opera Software/Opera Stable")],
        Browser::Firefox => vec![roaming.join("Mozilla/Firefox/Profiles")],
    }
}

fn chromium_store(profile: &Path) -> Option<PathBuf> {
    CHROMIUM_COOKIE_FILES
        .iter()
        .map(|file| profile.join(file))
        .find(|path| path.is_file())
}

fn firefox_stores(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == FIREFOX_COOKIE_FILE)
        .map(|entry| entry.into_path())
        .collect()
}

/// Existing cookie store files for `browser` below `base`.
pub fn cookie_stores_in(browser: Browser, base: &BaseDirs) -> Vec<PathBuf> {
    let mut stores = Vec::new();
    for location in profile_locations(browser, base) {
        debug!("Checking for {} profile at: {:?}", browser, location);
        if !location.is_dir() {
            continue;
        }
        if browser.is_chromium_based() {
            stores.extend(chromium_store(&location));
        } else {
            stores.extend(firefox_stores(&location));
        }
    }
    stores
}

/// Existing cookie store files for `browser` in the current user's profile.
pub fn cookie_stores(browser: Browser) -> Result<Vec<PathBuf>> {
    Ok(cookie_stores_in(browser, &BaseDirs::detect()?))
}
