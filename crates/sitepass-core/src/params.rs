//! scrypt cost-parameter selection and validation.
//!
//! This module provides:
//! - [`pick_params`] — turn abstract memory/CPU budgets into concrete
//!   scrypt cost parameters
//! - [`check_params`] — standalone safety validation of a parameter set
//!   against budgets (for parameters arriving from an external source)
//! - [`Budget`] / [`CostParams`] — serializable value types
//!
//! The selector solves for the largest safe work factor under two
//! simultaneous constraints: `128 * N * r` bytes of memory and
//! `4 * N * r * p` operations of CPU. Whichever budget binds harder
//! determines `N`; a memory-bound selection then spends the remaining CPU
//! budget on parallelism.

use crate::error::DeriveError;
use serde::{Deserialize, Serialize};

/// scrypt block size (`r`). Fixed — not a tunable in this system.
pub const BLOCK_SIZE: u32 = 8;

/// Exclusive upper bound on `r * p`, the scrypt 32-bit overflow guard.
const MAX_RP: u64 = 1 << 30;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Resource budgets for one derivation.
///
/// Both fields must be positive; [`pick_params`] rejects zeros.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Memory budget in mebibytes.
    pub memory_mib: u32,
    /// CPU budget in millions of operations.
    pub mega_ops: u32,
}

impl Default for Budget {
    /// The stock policy: 1000 MiB of memory, 32 megaops of CPU.
    fn default() -> Self {
        Self {
            memory_mib: 1000,
            mega_ops: 32,
        }
    }
}

impl Budget {
    /// Memory budget in bytes (binary mebi scaling — the selector's view).
    // memory_mib is a u32, so the shifted value stays far below 2^53.
    #[allow(clippy::arithmetic_side_effects)]
    const fn mem_limit(self) -> u64 {
        (self.memory_mib as u64) << 20
    }

    /// Memory budget in bytes, decimal mega scaling — the validator's view.
    ///
    /// Deliberately different from [`Self::mem_limit`]; the ~4.9% gap
    /// between the two interpretations is a preserved historical behavior,
    /// not a bug to fix. See [`check_params`].
    #[allow(clippy::arithmetic_side_effects)]
    const fn mem_limit_decimal(self) -> u64 {
        (self.memory_mib as u64) * 1_000_000
    }

    /// CPU budget in operations (decimal mega scaling, floating point).
    fn ops_limit(self) -> f64 {
        f64::from(self.mega_ops) * 1e6
    }
}

/// scrypt cost parameters.
///
/// Fields use the scrypt convention: the work factor is `N = 2^log_n`,
/// `r` is the block size, `p` the parallelism. Serializable so callers
/// can persist or transmit a chosen parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostParams {
    /// Work-factor exponent; `N = 2^log_n`. Valid range `[1, 63]`.
    pub log_n: u8,
    /// Block size. Always [`BLOCK_SIZE`] in selector output.
    pub r: u32,
    /// Parallelism. `r * p` must stay below `2^30`.
    pub p: u32,
}

impl CostParams {
    /// The work factor `N = 2^log_n`.
    ///
    /// # Panics
    ///
    /// Panics if `log_n` is 64 or greater. [`check_params`] rejects such
    /// values, and selector output never carries them.
    #[allow(clippy::arithmetic_side_effects)]
    #[must_use]
    pub const fn n(self) -> u64 {
        1 << self.log_n
    }

    /// Convert to the `scrypt` crate's parameter type for an output of
    /// `output_len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`DeriveError::InvalidParameters`] if the scrypt crate
    /// rejects the values.
    pub fn to_scrypt(self, output_len: usize) -> Result<scrypt::Params, DeriveError> {
        scrypt::Params::new(self.log_n, self.r, self.p, output_len)
            .map_err(|e| DeriveError::InvalidParameters(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Choose scrypt cost parameters for the given budgets.
///
/// The memory limit requires `128 * N * r <= mem_limit`, while the CPU
/// limit requires `4 * N * r * p <= ops_limit`. If
/// `ops_limit < mem_limit / 32`, the CPU limit imposes the stronger bound
/// on `N`: parallelism stays at 1 and `N` is sized to the CPU budget.
/// Otherwise `N` is sized to the memory budget and the leftover CPU budget
/// buys parallelism, clamped under the `r * p` overflow bound.
///
/// Deterministic: the same budgets always select the same parameters.
///
/// # Errors
///
/// Returns [`DeriveError::InvalidBudget`] if either budget is zero —
/// degenerate inputs that would select unusable parameters.
// All arithmetic operates on budget-bounded quantities: the limits fit in
// 2^53 (so the f64 casts are exact), max_rp is clamped under 2^30 before
// the u32 truncation, and divisors are nonzero constants.
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn pick_params(budget: &Budget) -> Result<CostParams, DeriveError> {
    if budget.memory_mib == 0 {
        return Err(DeriveError::InvalidBudget(
            "memory budget must be at least 1 MiB".into(),
        ));
    }
    if budget.mega_ops == 0 {
        return Err(DeriveError::InvalidBudget(
            "CPU budget must be at least 1 megaop".into(),
        ));
    }

    let mem_limit = budget.mem_limit();
    let ops_limit = budget.ops_limit();
    let r = BLOCK_SIZE;

    let cpu_bound = ops_limit < (mem_limit / 32) as f64;
    if cpu_bound {
        // CPU is the binding constraint: p = 1, size N to the CPU budget.
        let max_n = ops_limit / (f64::from(r) * 4.0);
        let log_n = scan_log_n(max_n);
        Ok(CostParams { log_n, r, p: 1 })
    } else {
        // Memory is the binding constraint: size N to the memory budget...
        let max_n = (mem_limit / (u64::from(r) * 128)) as f64;
        let log_n = scan_log_n(max_n);

        // ...then let the CPU budget buy parallelism.
        let n = (1u64 << log_n) as f64;
        let mut max_rp = (ops_limit / 4.0) / n;
        if max_rp > 1_073_741_823.0 {
            max_rp = 1_073_741_823.0;
        }
        let p = (max_rp as u32) / r;
        Ok(CostParams { log_n, r, p })
    }
}

/// Bounded linear scan for the work-factor exponent: the first exponent in
/// `[1, 63]` whose power of two exceeds half the ceiling, or 63 when even
/// `2^62` does not. The resulting `N` never exceeds the ceiling itself —
/// stopping at half leaves a 2x headroom margin.
///
/// The scan, rather than a closed-form log2, is deliberate: its exact
/// rounding behavior at power-of-two boundaries is part of the
/// cross-implementation compatibility contract.
// log_n is bounded by the loop condition; the shifted value is exact in f64.
#[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
fn scan_log_n(max_n: f64) -> u8 {
    let mut log_n: u8 = 1;
    while log_n < 63 {
        if (1u64 << log_n) as f64 > max_n / 2.0 {
            break;
        }
        log_n += 1;
    }
    log_n
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate cost parameters against the budgets' hard safety floors.
///
/// A standalone second pass, independent of [`pick_params`] — parameters
/// arriving from an external source go through this before use. The
/// derivation pipeline itself does not re-validate selector output.
///
/// Note the scaling: budgets are interpreted here in decimal megabytes and
/// megaops, not the binary mebibytes the selector works in. The ~4.9% gap
/// is preserved as-is; near power-of-two ceilings it makes this check
/// stricter than the selector, so a selector-chosen parameter set can fail
/// the memory floor (and only the memory floor — see tests).
///
/// # Errors
///
/// - [`DeriveError::InvalidParameters`] — exponent outside `[1, 63]`,
///   zero `r` or `p`, or `r * p` at overflow risk.
/// - [`DeriveError::MemoryTooHigh`] — memory use per block would exceed
///   the budget's 128-byte floor.
/// - [`DeriveError::CpuTooHigh`] — operations per block would exceed the
///   budget's 4-op floor.
// r and p are verified nonzero and r * p bounded before the divisions;
// N fits in 2^53 so its f64 cast is exact.
#[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
pub fn check_params(budget: &Budget, params: &CostParams) -> Result<(), DeriveError> {
    let mem_limit = budget.mem_limit_decimal();
    let ops_limit = budget.ops_limit();

    if params.log_n < 1 || params.log_n > 63 {
        return Err(DeriveError::InvalidParameters(format!(
            "work-factor exponent {} outside [1, 63]",
            params.log_n
        )));
    }
    if params.r == 0 || params.p == 0 {
        return Err(DeriveError::InvalidParameters(
            "block size and parallelism must be nonzero".into(),
        ));
    }
    if u64::from(params.r) * u64::from(params.p) >= MAX_RP {
        return Err(DeriveError::InvalidParameters(format!(
            "r = {} and p = {} risk 32-bit overflow",
            params.r, params.p
        )));
    }

    let n = params.n();
    if (mem_limit / n) / u64::from(params.r) < 128 {
        return Err(DeriveError::MemoryTooHigh);
    }
    if (ops_limit / n as f64) / (f64::from(params.r) * f64::from(params.p)) < 4.0 {
        return Err(DeriveError::CpuTooHigh);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
