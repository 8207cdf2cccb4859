use anyhow::{Context, Result};
use rusqlite::params;
use std::path::Path;

use super::snapshot::Snapshot;
use super::{host_matches, StoredCookie, COOKIE_NAMES};

/// Session cookies for `host` from a Firefox `cookies.sqlite` database.
pub fn read_firefox_cookies(store: &Path, host: &str) -> Result<Vec<StoredCookie>> {
    let snapshot = Snapshot::open(store)?;
    let mut stmt = snapshot
        .conn()
        .prepare("SELECT host, name, value FROM moz_cookies WHERE name IN (?1, ?2)")
        .context("Failed to query moz_cookies table")?;

    let cookies = stmt
        .query_map(params![COOKIE_NAMES[0], COOKIE_NAMES[1]], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?
        .filter_map(|row| match row {
            Ok((cookie_host, name, value)) if host_matches(&cookie_host, host) => {
                Some(Ok(StoredCookie { name, value }))
            }
            Ok(_) => None,
            Err(err) => Some(Err(err)),
        })
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(cookies)
}
