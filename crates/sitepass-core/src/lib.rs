//! `sitepass-core` — deterministic site-password derivation.
//!
//! Derives a reproducible password from a memorized passphrase and a site
//! identifier: scrypt cost parameters are chosen at runtime from caller
//! memory/CPU budgets, the salt is the SHA-256 of the site, and the
//! 64-byte derived key is encoded into a printable password. No state is
//! persisted; identical inputs always produce identical passwords.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod memory;

pub mod params;

pub mod salt;

pub mod kdf;

pub mod encode;

pub use encode::{encode_password, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN};
pub use error::DeriveError;
pub use kdf::{derive, DerivationRequest, DERIVED_KEY_LEN};
pub use memory::{disable_core_dumps, LockedRegion, SecretBuffer, SecretBytes};
pub use params::{check_params, pick_params, Budget, CostParams, BLOCK_SIZE};
pub use salt::{sha256_hex, site_salt, SALT_LEN};
