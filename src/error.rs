//! # Error Types
//!
//! This module defines the error type used throughout the thermals library.
//!
//! Validation errors are raised before any byte reaches the output buffer, so
//! a failed call never leaves a half-written command behind.

use thiserror::Error;

/// Main error type for thermals operations
#[derive(Debug, Error)]
pub enum ThermalsError {
    /// Barcode symbology name not present in the registry
    #[error("Unknown barcode type: {0}")]
    UnknownBarcodeType(String),

    /// Barcode data has a length the symbology does not accept
    #[error("Invalid barcode length for {kind}: {length}")]
    InvalidBarcodeLength { kind: &'static str, length: usize },

    /// Barcode data contains a character outside the symbology's charset
    #[error("Invalid barcode character for {kind}: {ch:?} at position {position}")]
    InvalidBarcodeCharacter {
        kind: &'static str,
        ch: char,
        position: usize,
    },

    /// Integer argument outside its accepted range
    #[error("{name} must be in range {min}..={max}, got {value}")]
    ValueOutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Requested byte width for a length header is not 1..=4
    #[error("Invalid header byte length: {0} (expected 1..=4)")]
    InvalidLength(usize),

    #[error("Invalid print mode: {0}")]
    InvalidPrintMode(String),

    #[error("Invalid justification: {0}")]
    InvalidJustification(String),

    #[error("Invalid font: {0}")]
    InvalidFont(String),

    #[error("Invalid underline mode: {0}")]
    InvalidUnderline(String),

    #[error("Invalid barcode text position: {0}")]
    InvalidBarcodeTextPosition(String),

    #[error("Invalid image size: {0}")]
    InvalidImageSize(String),

    #[error("Invalid QR error correction level: {0}")]
    InvalidQrLevel(String),

    /// Malformed argument to a framing wrapper (selector width, etc.)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Character table not supported by the active printer profile
    #[error("Character table {table} is not supported by {profile}")]
    UnsupportedCharacterTable { table: u8, profile: &'static str },

    /// Raster encoding produced the wrong number of bytes (encoder bug)
    #[error("Raster encoding error: expected {expected} bytes, got {actual}")]
    RasterEncoding { expected: usize, actual: usize },

    /// Image decoding or conversion error
    #[error("Image error: {0}")]
    Image(String),

    /// Transport-level errors (connection, I/O), passed through untouched
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error (settings file, unknown connector, ...)
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ThermalsError>;

impl ThermalsError {
    /// `true` for errors raised by argument validation, as opposed to
    /// internal invariant or transport failures.
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            ThermalsError::RasterEncoding { .. }
                | ThermalsError::Image(_)
                | ThermalsError::Transport(_)
                | ThermalsError::Config(_)
                | ThermalsError::Io(_)
        )
    }
}

/// Check that `value` lies in `min..=max`.
pub(crate) fn check_range(name: &'static str, value: i64, min: i64, max: i64) -> Result<()> {
    if value < min || value > max {
        return Err(ThermalsError::ValueOutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_range_bounds() {
        assert!(check_range("lines", 0, 0, 255).is_ok());
        assert!(check_range("lines", 255, 0, 255).is_ok());
        assert!(matches!(
            check_range("lines", 256, 0, 255),
            Err(ThermalsError::ValueOutOfRange { value: 256, .. })
        ));
    }

    #[test]
    fn test_is_validation() {
        assert!(ThermalsError::InvalidPrintMode("bogus".into()).is_validation());
        assert!(!ThermalsError::Transport("closed".into()).is_validation());
        assert!(
            !ThermalsError::RasterEncoding {
                expected: 2,
                actual: 1
            }
            .is_validation()
        );
    }

    #[test]
    fn test_display_messages() {
        let err = ThermalsError::InvalidBarcodeLength {
            kind: "UPCA",
            length: 10,
        };
        assert_eq!(err.to_string(), "Invalid barcode length for UPCA: 10");
    }
}
