//! 256-bit transaction identifier.

use crate::types::encoding::{read_bytes, Decode, DecodeError, Encode, EncodeSink};
use std::cmp::Ordering;
use std::fmt;

/// A 256-bit hash identifying a transaction.
///
/// Stored in wire byte order; displayed as a single little-endian number,
/// so the hex form reverses the bytes. Hash computation itself lives with
/// the external evaluator; this type only carries identifiers around.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// Converts the hash into its display hex string.
    pub fn to_hex(&self) -> String {
        let mut bytes = self.0;
        bytes.reverse();
        hex::encode(bytes)
    }

    /// Converts a string of 64 hex characters into a hash.
    pub fn from_hex(s: &str) -> Result<Hash256, DecodeError> {
        let decoded = hex::decode(s).map_err(|_| DecodeError::InvalidValue)?;
        let mut bytes: [u8; 32] = decoded
            .try_into()
            .map_err(|_| DecodeError::InvalidValue)?;
        bytes.reverse();
        Ok(Hash256(bytes))
    }
}

impl Encode for Hash256 {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        out.write(&self.0);
    }
}

impl Decode for Hash256 {
    fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
        let bytes = read_bytes(input, 32)?;
        Ok(Hash256(bytes.try_into().unwrap()))
    }
}

impl Ord for Hash256 {
    /// Numeric comparison: most-significant byte is the last one.
    fn cmp(&self, other: &Hash256) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl PartialOrd for Hash256 {
    fn partial_cmp(&self, other: &Hash256) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_valid_strings() {
        let s1 = "0000000000000000000000000000000000000000000000000000000000000000";
        let s2 = "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
        let s3 = "abcdef0000112233445566778899abcdef000011223344556677889912345678";
        assert!(Hash256::from_hex(s1).is_ok());
        assert!(Hash256::from_hex(s2).is_ok());
        assert!(Hash256::from_hex(s3).is_ok());
    }

    #[test]
    fn decode_invalid_strings() {
        // wrong length and a non-hex digit
        let s1 = "000000000000000000000000000000000000000000000000000000000000000";
        let s2 = "00000000000000000000000000000000000000000000000000000000000000000";
        let s3 = "000000000000000000000000000000000000000000000000000000000000000g";
        assert!(Hash256::from_hex(s1).is_err());
        assert!(Hash256::from_hex(s2).is_err());
        assert!(Hash256::from_hex(s3).is_err());
    }

    #[test]
    fn display_reverses_wire_order() {
        let s = "abcdef0000112233445566778899abcdef000011223344556677889912345678";
        let hash = Hash256::from_hex(s).unwrap();
        assert_eq!(hash.to_hex(), s);
        assert_eq!(hash.0[0], 0x78); // wire order starts at the display end
    }

    #[test]
    fn wire_roundtrip_preserves_display() {
        let s = "abcdef0000112233445566778899abcdef000011223344556677889912345678";
        let hash = Hash256::from_hex(s).unwrap();
        let decoded = Hash256::from_bytes(&hash.to_bytes()).unwrap();
        assert_eq!(decoded.to_hex(), s);
    }

    #[test]
    fn numeric_ordering() {
        let low = Hash256::from_hex(
            "0555555555555555555555555555555555555555555555555555555555555555",
        )
        .unwrap();
        let high = Hash256::from_hex(
            "5555555555555555555555555555555555555555555555555555555555555555",
        )
        .unwrap();
        assert!(low < high);
        assert_eq!(high.cmp(&high), Ordering::Equal);
    }
}
