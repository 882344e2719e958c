//! Canonical signed-integer encoding for stack elements.
//!
//! Numbers cross the stack-machine boundary as minimal little-endian
//! sign-magnitude byte strings: zero is the empty string, the magnitude is
//! written in as few bytes as possible, and the sign lives in bit 7 of the
//! final byte (with an extra `0x00`/`0x80` byte appended when the magnitude
//! already occupies that bit).

use crate::script::errors::ScriptError;

/// Maximum script number length before the Genesis upgrade
/// (CScriptNum::MAXIMUM_ELEMENT_SIZE in the node software).
pub const MAX_NUM_LENGTH_BEFORE_GENESIS: usize = 4;

/// Maximum script number length after the Genesis upgrade.
pub const MAX_NUM_LENGTH_AFTER_GENESIS: usize = 750 * 1000;

/// Element size cap applied when minimality checking is requested.
pub const MAX_ELEMENT_SIZE: usize = MAX_NUM_LENGTH_AFTER_GENESIS;

/// Encodes a number as a minimal little-endian sign-magnitude byte string.
///
/// Zero encodes as the empty string. The result always satisfies
/// [`is_minimally_encoded`].
pub fn encode_num(num: i64) -> Vec<u8> {
    if num == 0 {
        return Vec::new();
    }

    let negative = num < 0;
    let mut abs_num = (num as i128).unsigned_abs();
    let mut result = Vec::new();
    while abs_num > 0 {
        result.push((abs_num & 0xFF) as u8);
        abs_num >>= 8;
    }

    // Bit 7 of the top magnitude byte is reserved for the sign. If the
    // magnitude already uses it, append a dedicated sign byte.
    if result[result.len() - 1] & 0x80 != 0 {
        result.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        let last = result.len() - 1;
        result[last] |= 0x80;
    }
    result
}

/// Returns true if `element` is a minimal encoding no longer than
/// `max_element_size` bytes.
///
/// An encoding is redundant when the most-significant byte carries no
/// magnitude bits (low 7 bits zero) and is not needed to hold the sign for
/// the byte below it.
pub fn is_minimally_encoded(element: &[u8], max_element_size: usize) -> bool {
    let size = element.len();
    if size > max_element_size {
        return false;
    }
    if size > 0 {
        // Most-significant byte is the last one in little-endian order.
        if element[size - 1] & 0x7F == 0 && (size <= 1 || element[size - 2] & 0x80 == 0) {
            return false;
        }
    }
    true
}

/// Decodes a sign-magnitude little-endian byte string into a number.
///
/// The empty string decodes to zero. When `check_encoding` is set, a
/// non-minimal input is rejected with
/// [`ScriptError::NotMinimallyEncoded`] instead of being interpreted.
pub fn decode_num(element: &[u8], check_encoding: bool) -> Result<i64, ScriptError> {
    if element.is_empty() {
        return Ok(0);
    }

    if check_encoding && !is_minimally_encoded(element, MAX_ELEMENT_SIZE) {
        return Err(ScriptError::NotMinimallyEncoded(hex::encode(element)));
    }

    // Reverse to big-endian: sign bit and top magnitude bits come first.
    let mut iter = element.iter().rev();
    let first = *iter.next().unwrap();
    let negative = first & 0x80 != 0;

    let mut magnitude: u64 = (first & 0x7F) as u64;
    for &byte in iter {
        magnitude = magnitude
            .checked_mul(256)
            .and_then(|m| m.checked_add(byte as u64))
            .ok_or(ScriptError::NumberOutOfRange)?;
    }

    if negative {
        let value = -(magnitude as i128);
        i64::try_from(value).map_err(|_| ScriptError::NumberOutOfRange)
    } else {
        i64::try_from(magnitude).map_err(|_| ScriptError::NumberOutOfRange)
    }
}
