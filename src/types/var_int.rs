//! Variable-width unsigned integer codec.
//!
//! Frames the wire format's length and count fields. A 1-byte discriminator
//! selects the payload width:
//!
//! - `< 0xFD`: the value itself
//! - `0xFD`: 2-byte little-endian payload
//! - `0xFE`: 4-byte little-endian payload
//! - `0xFF`: 8-byte little-endian payload
//!
//! `write` always chooses the smallest applicable form. Values above the
//! 64-bit range are unrepresentable by construction, so oversized writes
//! cannot occur.

use crate::types::encoding::{read_bytes, DecodeError, EncodeSink};

/// Reads a varint from the input, advancing the slice.
pub fn read(input: &mut &[u8]) -> Result<u64, DecodeError> {
    let tag = read_bytes(input, 1)?[0];
    match tag {
        0xFD => {
            let bytes = read_bytes(input, 2)?;
            Ok(u16::from_le_bytes(bytes.try_into().unwrap()) as u64)
        }
        0xFE => {
            let bytes = read_bytes(input, 4)?;
            Ok(u32::from_le_bytes(bytes.try_into().unwrap()) as u64)
        }
        0xFF => {
            let bytes = read_bytes(input, 8)?;
            Ok(u64::from_le_bytes(bytes.try_into().unwrap()))
        }
        value => Ok(value as u64),
    }
}

/// Writes `n` to the sink using the smallest applicable form.
pub fn write<S: EncodeSink>(n: u64, out: &mut S) {
    match n {
        0..=0xFC => out.write(&[n as u8]),
        0xFD..=0xFFFF => {
            out.write(&[0xFD]);
            out.write(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xFFFF_FFFF => {
            out.write(&[0xFE]);
            out.write(&(n as u32).to_le_bytes());
        }
        _ => {
            out.write(&[0xFF]);
            out.write(&n.to_le_bytes());
        }
    }
}

/// Returns the encoded size of `n` in bytes: 1, 3, 5, or 9.
pub fn size(n: u64) -> usize {
    match n {
        0..=0xFC => 1,
        0xFD..=0xFFFF => 3,
        0x1_0000..=0xFFFF_FFFF => 5,
        _ => 9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(n: u64) -> Vec<u8> {
        let mut out = Vec::new();
        write(n, &mut out);
        out
    }

    #[test]
    fn single_byte_form() {
        assert_eq!(encoded(0), vec![0x00]);
        assert_eq!(encoded(1), vec![0x01]);
        assert_eq!(encoded(0xFC), vec![0xFC]);
    }

    #[test]
    fn two_byte_form_at_boundary() {
        // 0xFD itself no longer fits the single-byte form
        assert_eq!(encoded(0xFD), vec![0xFD, 0xFD, 0x00]);
        assert_eq!(encoded(0xFFFF), vec![0xFD, 0xFF, 0xFF]);
    }

    #[test]
    fn four_byte_form_at_boundary() {
        assert_eq!(encoded(0x1_0000), vec![0xFE, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(
            encoded(0xFFFF_FFFF),
            vec![0xFE, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn eight_byte_form_at_boundary() {
        assert_eq!(
            encoded(0x1_0000_0000),
            vec![0xFF, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]
        );
        assert_eq!(encoded(u64::MAX), vec![0xFF; 9]);
    }

    #[test]
    fn roundtrip_boundary_values() {
        for n in [
            0u64,
            1,
            0xFC,
            0xFD,
            0xFFFF,
            0x1_0000,
            0xFFFF_FFFF,
            0x1_0000_0000,
            u64::MAX,
        ] {
            let bytes = encoded(n);
            let mut input = bytes.as_slice();
            assert_eq!(read(&mut input).unwrap(), n);
            assert!(input.is_empty(), "all bytes consumed for {n}");
        }
    }

    #[test]
    fn size_matches_written_length() {
        for n in [0u64, 0xFC, 0xFD, 0xFFFF, 0x1_0000, u64::MAX] {
            assert_eq!(size(n), encoded(n).len());
        }
    }

    #[test]
    fn read_truncated_payload() {
        let mut input: &[u8] = &[0xFD, 0x01];
        assert_eq!(read(&mut input), Err(DecodeError::UnexpectedEof));

        let mut input: &[u8] = &[0xFE, 0x01, 0x02];
        assert_eq!(read(&mut input), Err(DecodeError::UnexpectedEof));

        let mut input: &[u8] = &[];
        assert_eq!(read(&mut input), Err(DecodeError::UnexpectedEof));
    }

    #[test]
    fn read_advances_past_value() {
        let mut input: &[u8] = &[0x05, 0xAA, 0xBB];
        assert_eq!(read(&mut input).unwrap(), 5);
        assert_eq!(input, &[0xAA, 0xBB]);
    }
}
