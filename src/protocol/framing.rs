//! # Framed Sub-Protocols (GS ( k / GS ( L)
//!
//! 2D symbols and stored graphics share one framing discipline:
//!
//! ```text
//! GS ( k  pL pH  cn fn [m] data...     (2D codes)
//! GS ( L  pL pH  m  fn     data...     (graphics)
//! ```
//!
//! `pL pH` counts every byte after itself: the two selector bytes, the
//! optional modifier and the payload. The header is always computed from the
//! bytes actually emitted. A wrong count desynchronizes the printer's parser
//! for the rest of the job.

use super::codec::length_header;
use super::commands::GS;
use crate::error::{Result, ThermalsError};

/// Bytes the selectors contribute to the length header.
const SELECTOR_OVERHEAD: usize = 2;

fn single(name: &str, value: &[u8]) -> Result<u8> {
    match value {
        [b] => Ok(*b),
        _ => Err(ThermalsError::InvalidArgument(format!(
            "{name} must be exactly one byte, got {}",
            value.len()
        ))),
    }
}

/// # Send 2D Code Data (GS ( k pL pH cn fn [m] d1...dk)
///
/// - `func`: function selector `fn`
/// - `symbol`: symbol type `cn` (`'1'` = QR Code)
/// - `modifier`: zero or one byte placed before `data`
pub fn code_2d(func: &[u8], symbol: &[u8], data: &[u8], modifier: &[u8]) -> Result<Vec<u8>> {
    let func = single("function selector", func)?;
    let symbol = single("symbol selector", symbol)?;
    if modifier.len() > 1 {
        return Err(ThermalsError::InvalidArgument(format!(
            "modifier must be at most one byte, got {}",
            modifier.len()
        )));
    }

    let [pl, ph] = length_header(data.len() + modifier.len() + SELECTOR_OVERHEAD)?;
    let mut cmd = Vec::with_capacity(7 + modifier.len() + data.len());
    cmd.extend_from_slice(&[GS, b'(', b'k', pl, ph, symbol, func]);
    cmd.extend_from_slice(modifier);
    cmd.extend_from_slice(data);
    Ok(cmd)
}

/// # Send Graphics Data (GS ( L pL pH m fn d1...dk)
///
/// - `mode`: `m` selector (`'0'` for the standard graphics functions)
/// - `func`: function selector (`'p'` store raster, `'2'` print buffer)
pub fn graphics_data(mode: &[u8], func: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mode = single("mode selector", mode)?;
    let func = single("function selector", func)?;

    let [pl, ph] = length_header(data.len() + SELECTOR_OVERHEAD)?;
    let mut cmd = Vec::with_capacity(7 + data.len());
    cmd.extend_from_slice(&[GS, b'(', b'L', pl, ph, mode, func]);
    cmd.extend_from_slice(data);
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_2d_header_counts_selectors_and_modifier() {
        let cmd = code_2d(b"P", b"1", b"Hello", b"0").unwrap();
        assert_eq!(
            cmd,
            vec![0x1D, 0x28, 0x6B, 8, 0, b'1', b'P', b'0', b'H', b'e', b'l', b'l', b'o']
        );
    }

    #[test]
    fn test_code_2d_without_modifier() {
        let cmd = code_2d(&[67], b"1", &[3], b"").unwrap();
        assert_eq!(cmd, vec![0x1D, 0x28, 0x6B, 3, 0, 0x31, 67, 3]);
    }

    #[test]
    fn test_code_2d_header_matches_emitted_length() {
        let data = vec![b'x'; 1000];
        let cmd = code_2d(b"P", b"1", &data, b"0").unwrap();
        let declared = usize::from(cmd[3]) | (usize::from(cmd[4]) << 8);
        assert_eq!(declared, cmd.len() - 5);
    }

    #[test]
    fn test_code_2d_rejects_wide_selectors() {
        assert!(matches!(
            code_2d(b"PQ", b"1", b"", b""),
            Err(ThermalsError::InvalidArgument(_))
        ));
        assert!(code_2d(b"P", b"", b"", b"").is_err());
        assert!(code_2d(b"P", b"1", b"", b"00").is_err());
    }

    #[test]
    fn test_graphics_data_print() {
        assert_eq!(
            graphics_data(b"0", b"2", b"").unwrap(),
            vec![0x1D, 0x28, 0x4C, 2, 0, b'0', b'2']
        );
    }

    #[test]
    fn test_graphics_data_store() {
        let cmd = graphics_data(b"0", b"p", &[1, 2, 3]).unwrap();
        assert_eq!(cmd, vec![0x1D, 0x28, 0x4C, 5, 0, b'0', b'p', 1, 2, 3]);
    }

    #[test]
    fn test_graphics_data_rejects_wide_selectors() {
        assert!(graphics_data(b"00", b"p", b"").is_err());
        assert!(graphics_data(b"0", b"", b"").is_err());
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let data = vec![0u8; 70_000];
        assert!(graphics_data(b"0", b"p", &data).is_err());
    }
}
