//! Chromium-family cookie stores (Chrome, Chromium, Brave, Edge, Opera).

use aes::Aes128;
use anyhow::{anyhow, bail, Context, Result};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use pbkdf2::pbkdf2_hmac;
use rusqlite::params;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::debug;

use super::snapshot::Snapshot;
use super::{host_matches, StoredCookie, COOKIE_NAMES};

type Aes128CbcDec = cbc::Decryptor<Aes128>;

const V10_PREFIX: &[u8] = b"v10";
const V10_PASSWORD: &[u8] = b"peanuts";
const V10_SALT: &[u8] = b"saltysalt";
const V10_IV: [u8; 16] = [b' '; 16];
const HOST_DIGEST_LEN: usize = 32;

/// Key Chromium uses on Linux when no OS keyring is available.
pub(crate) fn v10_key() -> [u8; 16] {
    let mut key = [0u8; 16];
    pbkdf2_hmac::<Sha1>(V10_PASSWORD, V10_SALT, 1, &mut key);
    key
}

fn decrypt_v10(ciphertext: &[u8], key: &[u8; 16], host_key: &str) -> Result<String> {
    let mut plain = Aes128CbcDec::new_from_slices(key, &V10_IV)
        .map_err(|e| anyhow!("invalid cookie key: {e}"))?
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| anyhow!("failed to decrypt cookie value"))?;

    // Newer stores prefix the value with SHA-256(host_key).
    let digest = Sha256::digest(host_key.as_bytes());
    if plain.len() >= HOST_DIGEST_LEN && plain[..HOST_DIGEST_LEN] == digest[..] {
        plain.drain(..HOST_DIGEST_LEN);
    }

    String::from_utf8(plain).context("decrypted cookie value is not UTF-8")
}

/// Decrypt an `encrypted_value` blob.
///
/// Only the Linux `v10` scheme with its fixed key is supported; values
/// protected by the OS keyring, Keychain or DPAPI are reported as errors.
pub fn decrypt_chromium_value(encrypted: &[u8], host_key: &str) -> Result<String> {
    if encrypted.is_empty() {
        return Ok(String::new());
    }
    match encrypted.strip_prefix(V10_PREFIX) {
        Some(ciphertext) if cfg!(target_os = "linux") => {
            decrypt_v10(ciphertext, &v10_key(), host_key)
        }
        _ => bail!("cookie is encrypted with an OS-protected key, which is not supported"),
    }
}

/// Session cookies for `host` from a Chromium `Cookies` database.
pub fn read_chromium_cookies(store: &Path, host: &str) -> Result<Vec<StoredCookie>> {
    let snapshot = Snapshot::open(store)?;
    let mut stmt = snapshot
        .conn()
        .prepare("SELECT host_key, name, value, encrypted_value FROM cookies WHERE name IN (?1, ?2)")
        .context("Failed to query cookies table")?;

    let rows = stmt
        .query_map(params![COOKIE_NAMES[0], COOKIE_NAMES[1]], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Vec<u8>>(3)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut cookies = Vec::new();
    for (host_key, name, value, encrypted) in rows {
        if !host_matches(&host_key, host) {
            continue;
        }
        let value = if value.is_empty() {
            decrypt_chromium_value(&encrypted, &host_key)?
        } else {
            value
        };
        debug!("Found {} for {}", name, host_key);
        cookies.push(StoredCookie { name, value });
    }
    Ok(cookies)
}
