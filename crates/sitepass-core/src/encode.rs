//! Derived-key to password encoding.

use crate::error::DeriveError;
use crate::kdf::DERIVED_KEY_LEN;

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 3;

/// Maximum password length — one derived-key byte per output character.
pub const MAX_PASSWORD_LEN: usize = DERIVED_KEY_LEN;

/// Printable ASCII, `!` (0x21) through `~` (0x7e). 94 characters.
const PRINTABLE: &[u8] =
    b"!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

const DIGITS: &[u8] = b"0123456789";

/// Map a derived key to a password string.
///
/// Output character `i` is `alphabet[key[i] mod alphabet length]` — one
/// key byte per character, so the 64-byte key bounds the maximum length.
/// Pure in `(key, length, numbers_only)`: the same key always encodes to
/// the same password.
///
/// # Errors
///
/// Returns [`DeriveError::InvalidOutputLength`] if `length` is outside
/// [`MIN_PASSWORD_LEN`]`..=`[`MAX_PASSWORD_LEN`].
///
/// # Panics
///
/// Panics if the encoded bytes are not valid UTF-8 (cannot happen — both
/// alphabets are ASCII).
pub fn encode_password(
    key: &[u8; DERIVED_KEY_LEN],
    length: usize,
    numbers_only: bool,
) -> Result<String, DeriveError> {
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&length) {
        return Err(DeriveError::InvalidOutputLength { length });
    }

    let alphabet: &[u8] = if numbers_only { DIGITS } else { PRINTABLE };
    // Both alphabets are nonempty consts, so the modulo index is in range.
    #[allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]
    let chars: Vec<u8> = key[..length]
        .iter()
        .map(|&b| alphabet[usize::from(b) % alphabet.len()])
        .collect();

    Ok(String::from_utf8(chars).expect("password chars are ASCII"))
}
