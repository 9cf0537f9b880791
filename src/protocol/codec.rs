//! # Length / Header Codec
//!
//! Fixed-width little-endian integer encoding, used for the `pL pH` length
//! headers of the framed sub-protocols and for image dimension fields.

use crate::error::{Result, ThermalsError};

/// Encode `value` as exactly `byte_length` little-endian bytes.
///
/// `byte_length` must be 1..=4 and `value` must fit in that many bytes.
///
/// ```
/// use thermals::protocol::codec::encode_low_high;
///
/// assert_eq!(encode_low_high(0x0102, 2).unwrap(), vec![0x02, 0x01]);
/// assert_eq!(encode_low_high(7, 3).unwrap(), vec![7, 0, 0]);
/// assert!(encode_low_high(256, 1).is_err());
/// ```
pub fn encode_low_high(value: u64, byte_length: usize) -> Result<Vec<u8>> {
    if !(1..=4).contains(&byte_length) {
        return Err(ThermalsError::InvalidLength(byte_length));
    }
    let max = (1u64 << (8 * byte_length)) - 1;
    if value > max {
        return Err(ThermalsError::ValueOutOfRange {
            name: "value",
            value: i64::try_from(value).unwrap_or(i64::MAX),
            min: 0,
            max: max as i64,
        });
    }
    Ok(value.to_le_bytes()[..byte_length].to_vec())
}

/// Two-byte header for a payload length, as used by `GS ( k` and `GS ( L`.
pub(crate) fn length_header(len: usize) -> Result<[u8; 2]> {
    let bytes = encode_low_high(len as u64, 2)?;
    Ok([bytes[0], bytes[1]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(bytes: &[u8]) -> u64 {
        bytes
            .iter()
            .rev()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
    }

    #[test]
    fn test_single_byte() {
        assert_eq!(encode_low_high(0, 1).unwrap(), vec![0]);
        assert_eq!(encode_low_high(255, 1).unwrap(), vec![255]);
    }

    #[test]
    fn test_little_endian_order() {
        assert_eq!(encode_low_high(0x1234, 2).unwrap(), vec![0x34, 0x12]);
        assert_eq!(
            encode_low_high(0xDEAD_BEEF, 4).unwrap(),
            vec![0xEF, 0xBE, 0xAD, 0xDE]
        );
    }

    #[test]
    fn test_reassembles_to_value() {
        for byte_length in 1..=4usize {
            let max = (1u64 << (8 * byte_length)) - 1;
            for value in [0, 1, 127, 255, max / 3, max - 1, max] {
                let bytes = encode_low_high(value, byte_length).unwrap();
                assert_eq!(bytes.len(), byte_length);
                assert_eq!(reassemble(&bytes), value);
            }
        }
    }

    #[test]
    fn test_value_out_of_range() {
        assert!(matches!(
            encode_low_high(256, 1),
            Err(ThermalsError::ValueOutOfRange { max: 255, .. })
        ));
        assert!(matches!(
            encode_low_high(65_536, 2),
            Err(ThermalsError::ValueOutOfRange { max: 65_535, .. })
        ));
        assert!(encode_low_high(1 << 32, 4).is_err());
    }

    #[test]
    fn test_invalid_length() {
        assert!(matches!(
            encode_low_high(1, 0),
            Err(ThermalsError::InvalidLength(0))
        ));
        assert!(matches!(
            encode_low_high(1, 5),
            Err(ThermalsError::InvalidLength(5))
        ));
    }

    #[test]
    fn test_length_header() {
        assert_eq!(length_header(13).unwrap(), [13, 0]);
        assert_eq!(length_header(300).unwrap(), [0x2C, 0x01]);
        assert!(length_header(70_000).is_err());
    }
}
