//! CLI handler for printing a browser's NextAuth cookie.

use anyhow::{anyhow, Result};
use std::path::Path;
use tracing::info;

use super::args::CookieCliArgs;
use super::load_config;
use crate::browser::{find_nextauth_cookie, BrowserSelector, CookieMatch};
use crate::global::{normalize_base_url, COOKIE_ENV};

/// `$env:NEXTAUTH_COOKIE='<value>'` with single quotes doubled.
pub fn powershell_assignment(cookie: &str) -> String {
    format!("$env:{}='{}'", COOKIE_ENV, cookie.replace('\'', "''"))
}

/// Error text listing every browser that was tried.
pub fn not_found_message(headline: &str, diagnostics: &[String], hint: &str) -> String {
    let mut message = headline.to_string();
    if !diagnostics.is_empty() {
        message.push_str("\nDetails:");
        for line in diagnostics {
            message.push_str(&format!("\n  - {line}"));
        }
    }
    message.push_str("\n\n");
    message.push_str(hint);
    message
}

/// Look up the session cookie for `base_url` or fail with the per-browser details.
pub(crate) fn locate_cookie(base_url: &str, browser: &str, headline: &str, hint: &str) -> Result<CookieMatch> {
    let selector: BrowserSelector = browser.parse()?;
    let search = find_nextauth_cookie(base_url, selector)?;

    match search.found {
        Some(found) => Ok(found),
        None => Err(anyhow!(not_found_message(headline, &search.diagnostics, hint))),
    }
}

/// Handle the cookie CLI command.
pub fn handle_cookie_command(args: CookieCliArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let base_url = normalize_base_url(args.base_url.as_deref().unwrap_or(&config.base_url));
    let browser = args.browser.unwrap_or(config.browser);

    let found = locate_cookie(
        &base_url,
        &browser,
        "Could not find a valid NextAuth session cookie.",
        "Make sure you have signed in to the app in the selected browser first.",
    )?;
    info!("Using cookie {} from {}", found.name, found.browser);

    if args.powershell_env {
        println!("{}", powershell_assignment(&found.header()));
        return Ok(());
    }

    println!("{}", found.header());
    println!("# browser={}", found.browser);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_powershell_assignment_escapes_quotes() {
        assert_eq!(
            powershell_assignment("next-auth.session-token=a'b"),
            "$env:NEXTAUTH_COOKIE='next-auth.session-token=a''b'"
        );
    }

    #[test]
    fn test_not_found_message_lists_details() {
        let message = not_found_message(
            "No cookie.",
            &["edge: boom".to_string(), "chrome: missing".to_string()],
            "Sign in first.",
        );
        assert_eq!(
            message,
            "No cookie.\nDetails:\n  - edge: boom\n  - chrome: missing\n\nSign in first."
        );
    }

    #[test]
    fn test_not_found_message_without_details() {
        assert_eq!(not_found_message("No cookie.", &[], "Hint."), "No cookie.\n\nHint.");
    }

    #[test]
    fn test_unsupported_browser_is_rejected_before_search() {
        let err = locate_cookie("http://localhost:3000", "netscape", "x", "y").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported browser: netscape");
    }
}
