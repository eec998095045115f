//! The derivation pipeline: budgets → cost parameters → salt → scrypt.

use std::fmt;

use data_encoding::HEXLOWER;
use zeroize::Zeroize;

use crate::error::DeriveError;
use crate::memory::SecretBytes;
use crate::params::{pick_params, Budget};
use crate::salt::site_salt;

/// Length of the derived key in bytes. The two 32-byte halves were
/// historically separate encryption and authentication keys; password
/// encoding consumes all 64 bytes as entropy.
pub const DERIVED_KEY_LEN: usize = 64;

/// One password derivation, fully described.
///
/// An immutable value passed through the pipeline — nothing about a
/// request is process-global. The caller owns `passphrase` and must
/// zeroize it after use; holding it in a [`crate::SecretBuffer`] makes
/// that automatic.
pub struct DerivationRequest<'a> {
    /// The master passphrase, possibly extended with key-file bytes.
    pub passphrase: &'a [u8],
    /// Site identifier the password is for. Not secret.
    pub site: &'a str,
    /// Resource budgets for the KDF.
    pub budget: Budget,
    /// Emit intermediate diagnostics on stderr. Never prints the
    /// passphrase itself.
    pub verbose: bool,
}

impl fmt::Debug for DerivationRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationRequest")
            .field("passphrase", &"***")
            .field("site", &self.site)
            .field("budget", &self.budget)
            .field("verbose", &self.verbose)
            .finish()
    }
}

/// Derive the 64-byte key for a request.
///
/// Sequence: pick cost parameters from the budgets, hash the site into the
/// salt, run scrypt. The returned key zeroizes itself on drop; on the KDF
/// failure path the partially written buffer is zeroized before the error
/// propagates.
///
/// Determinism contract: for a fixed (passphrase, site, budgets) the
/// output is bit-identical across runs and across conforming
/// implementations.
///
/// # Errors
///
/// - [`DeriveError::InvalidBudget`] — zero memory or CPU budget.
/// - [`DeriveError::InvalidParameters`] — the scrypt crate rejected the
///   chosen parameters.
/// - [`DeriveError::Kdf`] — the scrypt computation itself failed (e.g.
///   its working memory could not be allocated). Not retried.
pub fn derive(
    request: &DerivationRequest<'_>,
) -> Result<SecretBytes<DERIVED_KEY_LEN>, DeriveError> {
    let params = pick_params(&request.budget)?;
    if request.verbose {
        eprintln!("N = {} r = {} p = {}", params.n(), params.r, params.p);
    }

    let salt = site_salt(request.site);
    if request.verbose {
        eprintln!("Site hex: {}", HEXLOWER.encode(&salt));
    }

    let scrypt_params = params.to_scrypt(DERIVED_KEY_LEN)?;
    let mut output = [0u8; DERIVED_KEY_LEN];
    if let Err(e) = scrypt::scrypt(request.passphrase, &salt, &scrypt_params, &mut output) {
        output.zeroize();
        return Err(DeriveError::Kdf(e.to_string()));
    }

    Ok(SecretBytes::new(output))
}
