//! Site-to-salt derivation and digest helpers.

use data_encoding::HEXLOWER;
use sha2::{Digest, Sha256};

/// Salt length in bytes — one SHA-256 digest.
pub const SALT_LEN: usize = 32;

/// Derive the salt for a site: `SHA-256(site)`.
///
/// A pure function of the site alone. Passphrase and budgets never touch
/// the salt, so it is identical across runs and implementations; it is
/// recomputed per request and never persisted.
#[must_use]
pub fn site_salt(site: &str) -> [u8; SALT_LEN] {
    Sha256::digest(site.as_bytes()).into()
}

/// Lowercase hex SHA-256 digest of arbitrary bytes.
///
/// Diagnostic helper: the passphrase fingerprint and the self-test vector
/// both go through this. Two hex characters per byte, no separators.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    HEXLOWER.encode(&Sha256::digest(data))
}
