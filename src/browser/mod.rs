//! NextAuth session cookie extraction from locally installed browsers.
//!
//! Cookie stores are only ever read: each store is copied to a temporary
//! location before it is opened.

mod chromium;
pub mod discovery;
mod firefox;
mod snapshot;

pub use chromium::{decrypt_chromium_value, read_chromium_cookies};
pub use firefox::read_firefox_cookies;

use anyhow::{bail, Context};
use reqwest::Url;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{BatchError, Result};
use crate::global::normalize_base_url;
use crate::session::{SECURE_SESSION_COOKIE, SESSION_COOKIE};

/// Cookie names searched for, in order of preference.
pub const COOKIE_NAMES: [&str; 2] = [SECURE_SESSION_COOKIE, SESSION_COOKIE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Browser {
    Edge,
    Chrome,
    Brave,
    Chromium,
    Firefox,
    Opera,
}

/// Order tried by `--browser auto`.
pub const AUTO_ORDER: [Browser; 6] = [
    Browser::Edge,
    Browser::Chrome,
    Browser::Brave,
    Browser::Chromium,
    Browser::Firefox,
    Browser::Opera,
];

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Edge => "edge",
            Browser::Chrome => "chrome",
            Browser::Brave => "brave",
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Opera => "opera",
        }
    }

    pub fn is_chromium_based(&self) -> bool {
        !matches!(self, Browser::Firefox)
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserSelector {
    Auto,
    One(Browser),
}

impl BrowserSelector {
    pub fn browsers(&self) -> Vec<Browser> {
        match self {
            BrowserSelector::Auto => AUTO_ORDER.to_vec(),
            BrowserSelector::One(browser) => vec![*browser],
        }
    }
}

impl FromStr for BrowserSelector {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        if wanted == "auto" {
            return Ok(BrowserSelector::Auto);
        }
        AUTO_ORDER
            .iter()
            .find(|browser| browser.as_str() == wanted)
            .map(|browser| BrowserSelector::One(*browser))
            .ok_or_else(|| BatchError::configuration(format!("Unsupported browser: {s}")))
    }
}

/// A cookie row read from a browser store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
}

/// The session cookie that was found, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieMatch {
    pub browser: Browser,
    pub name: String,
    pub value: String,
}

impl CookieMatch {
    /// `name=value`, ready for `--cookie` or `NEXTAUTH_COOKIE`.
    pub fn header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Outcome of a browser search. `found` is `None` when no browser had the cookie.
#[derive(Debug, Default)]
pub struct CookieSearch {
    pub found: Option<CookieMatch>,
    /// One line per browser that was tried without success
    pub diagnostics: Vec<String>,
}

/// Source of stored cookies for one browser and host.
pub trait CookieSource {
    fn load(&self, browser: Browser, host: &str) -> anyhow::Result<Vec<StoredCookie>>;
}

/// Reads the cookie stores of the current user's browser profiles.
#[derive(Debug, Default)]
pub struct LocalCookieStores;

impl CookieSource for LocalCookieStores {
    fn load(&self, browser: Browser, host: &str) -> anyhow::Result<Vec<StoredCookie>> {
        let stores = discovery::cookie_stores(browser)?;
        if stores.is_empty() {
            bail!("no cookie store found (is {} installed?)", browser);
        }

        let mut cookies = Vec::new();
        for store in stores {
            debug!("Reading {} cookies from {:?}", browser, store);
            let found = if browser.is_chromium_based() {
                read_chromium_cookies(&store, host)
            } else {
                read_firefox_cookies(&store, host)
            }
            .with_context(|| format!("failed to read {}", store.display()))?;
            cookies.extend(found);
        }
        Ok(cookies)
    }
}

/// True when a cookie stored for `cookie_host` is sent to `host`.
pub fn host_matches(cookie_host: &str, host: &str) -> bool {
    let cookie_host = cookie_host.trim_start_matches('.').to_lowercase();
    let host = host.to_lowercase();
    if cookie_host.is_empty() {
        return false;
    }
    host == cookie_host || host.ends_with(&format!(".{cookie_host}"))
}

/// Hostname of `base_url`, adding `http://` when the scheme is missing.
pub fn hostname(base_url: &str) -> Result<String> {
    let normalized = normalize_base_url(base_url);
    Url::parse(&normalized)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .ok_or_else(|| BatchError::configuration(format!("Invalid base URL: {base_url}")))
}

fn pick_session_cookie(cookies: &[StoredCookie]) -> Option<(&'static str, String)> {
    COOKIE_NAMES.iter().find_map(|name| {
        cookies
            .iter()
            .rev()
            .find(|cookie| cookie.name == *name && !cookie.value.is_empty())
            .map(|cookie| (*name, cookie.value.clone()))
    })
}

/// Search `selector`'s browsers, in order, for a NextAuth session cookie.
pub fn find_nextauth_cookie_in<S: CookieSource>(
    source: &S,
    base_url: &str,
    selector: BrowserSelector,
) -> Result<CookieSearch> {
    let host = hostname(base_url)?;
    let mut search = CookieSearch::default();

    for browser in selector.browsers() {
        let cookies = match source.load(browser, &host) {
            Ok(cookies) => cookies,
            Err(err) => {
                debug!("{}: {:#}", browser, err);
                search.diagnostics.push(format!("{browser}: {err:#}"));
                continue;
            }
        };

        if let Some((name, value)) = pick_session_cookie(&cookies) {
            info!("Found {} in {}", name, browser);
            search.found = Some(CookieMatch {
                browser,
                name: name.to_string(),
                value,
            });
            return Ok(search);
        }

        search
            .diagnostics
            .push(format!("{browser}: NextAuth cookie not found for domain {host}"));
    }

    Ok(search)
}

/// [`find_nextauth_cookie_in`] against the local browser profiles.
pub fn find_nextauth_cookie(base_url: &str, selector: BrowserSelector) -> Result<CookieSearch> {
    find_nextauth_cookie_in(&LocalCookieStores, base_url, selector)
}
