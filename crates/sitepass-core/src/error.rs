//! Error types for `sitepass-core`.

use thiserror::Error;

/// Errors produced by the derivation pipeline.
#[derive(Debug, Error)]
pub enum DeriveError {
    /// Memory or CPU budget is zero — no usable cost parameters exist.
    #[error("invalid budget: {0}")]
    InvalidBudget(String),

    /// Cost parameters outside the scrypt safety bounds (work-factor
    /// exponent out of `[1, 63]`, or `r * p` at overflow risk).
    #[error("invalid cost parameters: {0}")]
    InvalidParameters(String),

    /// The parameters would use more memory than the budget's safety
    /// floor allows. Raise the memory budget.
    #[error("deriving the key would require too much memory")]
    MemoryTooHigh,

    /// The parameters would use more CPU than the budget's safety floor
    /// allows. Raise the CPU budget.
    #[error("deriving the key would take too much CPU time")]
    CpuTooHigh,

    /// The scrypt primitive itself failed (e.g. could not allocate its
    /// working memory). Not retried — the same parameters fail the same way.
    #[error("key derivation failed: {0}")]
    Kdf(String),

    /// Requested password length outside `[3, 64]`.
    #[error("cannot generate a password of length {length}")]
    InvalidOutputLength {
        /// The rejected length.
        length: usize,
    },

    /// Secure memory handling failure.
    #[error("secure memory error: {0}")]
    SecureMemory(String),
}
