//! # ESC/POS Barcode Commands
//!
//! This module implements the barcode side of the protocol:
//!
//! | Kind | Command | Notes |
//! |------|---------|-------|
//! | 1D barcode | GS k m n data | Symbology from the [`registry`] |
//! | HRI position | GS H n | Where the human-readable text goes |
//! | Height / width | GS h n / GS w n | Bar geometry |
//! | QR Code | GS ( k ... | Framed, model 1/2/micro |
//! | QR Code (legacy) | GS Z 2, ESC Z ... | Older firmware, single frame |
//!
//! ## Validation
//!
//! The command builders here trust their input. Length and charset rules are
//! checked by [`BarcodeSpec::validate`], which the print session calls before
//! a single byte is emitted.

use super::commands::{ESC, GS};
use super::framing;
use crate::error::{Result, ThermalsError};

pub use registry::{BARCODE_TYPES, BarcodeSpec, lookup};

// ============================================================================
// BARCODE TYPE REGISTRY
// ============================================================================

/// Static table of 1D symbologies with their length and charset rules.
pub mod registry {
    use crate::error::{Result, ThermalsError};

    /// Immutable description of one 1D barcode symbology.
    #[derive(Debug, Clone, Copy)]
    pub struct BarcodeSpec {
        /// Registry name (upper case)
        pub name: &'static str,
        /// `m` value for `GS k` (format B, 65..=75)
        pub code: u8,
        size: fn(usize) -> bool,
        chars: fn(u32) -> bool,
    }

    impl BarcodeSpec {
        /// Does the symbology accept data of `n` characters?
        pub fn size_valid(&self, n: usize) -> bool {
            (self.size)(n)
        }

        /// Is `codepoint` part of the symbology's character set?
        pub fn char_valid(&self, codepoint: u32) -> bool {
            (self.chars)(codepoint)
        }

        /// Check `data` against both rules. Length is checked first.
        pub fn validate(&self, data: &str) -> Result<()> {
            let length = data.chars().count();
            if !self.size_valid(length) {
                return Err(ThermalsError::InvalidBarcodeLength {
                    kind: self.name,
                    length,
                });
            }
            if let Some((position, ch)) = data
                .chars()
                .enumerate()
                .find(|&(_, ch)| !self.char_valid(ch as u32))
            {
                return Err(ThermalsError::InvalidBarcodeCharacter {
                    kind: self.name,
                    ch,
                    position,
                });
            }
            Ok(())
        }
    }

    fn digits(n: u32) -> bool {
        (48..=57).contains(&n)
    }

    fn ascii(n: u32) -> bool {
        n <= 127
    }

    // " $%+-./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ"
    fn code39_chars(n: u32) -> bool {
        matches!(n, 32 | 36 | 37 | 43 | 45..=57 | 65..=90)
    }

    // "$+-./0123456789:ABCD"
    fn codabar_chars(n: u32) -> bool {
        matches!(n, 36 | 43 | 45..=58 | 65..=68)
    }

    fn upc_size(n: usize) -> bool {
        n == 11 || n == 12
    }

    fn ean13_size(n: usize) -> bool {
        n == 12 || n == 13
    }

    fn ean8_size(n: usize) -> bool {
        n == 7 || n == 8
    }

    fn more_than_one(n: usize) -> bool {
        n > 1
    }

    fn even_more_than_one(n: usize) -> bool {
        n > 1 && n % 2 == 0
    }

    const fn spec(
        name: &'static str,
        code: u8,
        size: fn(usize) -> bool,
        chars: fn(u32) -> bool,
    ) -> BarcodeSpec {
        BarcodeSpec {
            name,
            code,
            size,
            chars,
        }
    }

    /// Every registered symbology, in code order.
    pub static BARCODE_TYPES: [BarcodeSpec; 11] = [
        spec("UPCA", 65, upc_size, digits),
        spec("UPCE", 66, upc_size, digits),
        spec("EAN13", 67, ean13_size, digits),
        spec("EAN8", 68, ean8_size, digits),
        spec("CODE39", 69, more_than_one, code39_chars),
        spec("I25", 70, even_more_than_one, digits),
        spec("CODEBAR", 71, more_than_one, codabar_chars),
        spec("CODE93", 72, more_than_one, ascii),
        spec("CODE128", 73, more_than_one, ascii),
        spec("CODE11", 74, more_than_one, digits),
        spec("MSI", 75, more_than_one, digits),
    ];

    /// Name used when the caller does not pick a symbology.
    pub const DEFAULT_TYPE: &str = "CODE39";

    /// Look up a symbology by name, case-insensitively. `None` means CODE39.
    ///
    /// ```
    /// use thermals::protocol::barcode::lookup;
    ///
    /// assert_eq!(lookup(Some("ean8")).unwrap().code, 68);
    /// assert_eq!(lookup(None).unwrap().name, "CODE39");
    /// assert!(lookup(Some("qr")).is_err());
    /// ```
    pub fn lookup(name: Option<&str>) -> Result<&'static BarcodeSpec> {
        let name = name.unwrap_or(DEFAULT_TYPE);
        BARCODE_TYPES
            .iter()
            .find(|spec| spec.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ThermalsError::UnknownBarcodeType(name.to_string()))
    }
}

// ============================================================================
// 1D BARCODES
// ============================================================================

/// # Print Barcode (GS k m n d1...dn)
///
/// Format B: explicit length byte instead of a NUL terminator.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS k m n data |
/// | Hex     | 1D 6B m n data |
///
/// Data longer than 255 bytes cannot be expressed in the length byte.
pub fn barcode(spec: &BarcodeSpec, data: &[u8]) -> Result<Vec<u8>> {
    let n = u8::try_from(data.len()).map_err(|_| ThermalsError::ValueOutOfRange {
        name: "barcode data length",
        value: data.len() as i64,
        min: 0,
        max: 255,
    })?;
    let mut cmd = Vec::with_capacity(4 + data.len());
    cmd.extend_from_slice(&[GS, b'k', spec.code, n]);
    cmd.extend_from_slice(data);
    Ok(cmd)
}

/// HRI (Human Readable Interpretation) position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarcodeTextPosition {
    /// No HRI text printed
    #[default]
    None = 0,
    /// HRI above barcode
    Above = 1,
    /// HRI below barcode
    Below = 2,
    /// HRI both above and below
    Both = 3,
}

impl std::str::FromStr for BarcodeTextPosition {
    type Err = ThermalsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "above" | "top" => Ok(Self::Above),
            "below" | "bottom" => Ok(Self::Below),
            "both" => Ok(Self::Both),
            _ => Err(ThermalsError::InvalidBarcodeTextPosition(s.to_string())),
        }
    }
}

/// # Select HRI Position (GS H n)
#[inline]
pub fn text_position(position: BarcodeTextPosition) -> Vec<u8> {
    vec![GS, b'H', position as u8]
}

/// # Set Barcode Height (GS h n)
///
/// Height in dots, 1..=255.
#[inline]
pub fn height(dots: u8) -> Vec<u8> {
    vec![GS, b'h', dots]
}

/// # Set Barcode Module Width (GS w n)
#[inline]
pub fn width(n: u8) -> Vec<u8> {
    vec![GS, b'w', n]
}

// ============================================================================
// QR CODE COMMANDS
// ============================================================================

/// QR Code command builders
pub mod qr {
    use super::{ESC, GS, framing};
    use crate::error::{Result, ThermalsError};

    /// Symbol type selector `cn` for QR Code in `GS ( k`.
    const QR_SYMBOL: &[u8] = b"1";

    /// QR Code error correction level
    ///
    /// | Level | Recovery |
    /// |-------|----------|
    /// | L | ~7% |
    /// | M | ~15% |
    /// | Q | ~25% |
    /// | H | ~30% |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QrLevel {
        #[default]
        L = 0,
        M = 1,
        Q = 2,
        H = 3,
    }

    impl QrLevel {
        /// Parse a level name, falling back to `L` for anything unknown.
        pub fn from_name_or_default(name: &str) -> Self {
            name.parse().unwrap_or_default()
        }

        /// Letter code used by the legacy `ESC Z` command.
        pub fn ascii(self) -> u8 {
            match self {
                QrLevel::L => b'L',
                QrLevel::M => b'M',
                QrLevel::Q => b'Q',
                QrLevel::H => b'H',
            }
        }
    }

    impl std::str::FromStr for QrLevel {
        type Err = ThermalsError;

        fn from_str(s: &str) -> Result<Self> {
            match s.to_ascii_lowercase().as_str() {
                "l" => Ok(QrLevel::L),
                "m" => Ok(QrLevel::M),
                "q" => Ok(QrLevel::Q),
                "h" => Ok(QrLevel::H),
                _ => Err(ThermalsError::InvalidQrLevel(s.to_string())),
            }
        }
    }

    /// QR Code model selection
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum QrModel {
        /// Original QR Code
        Model1 = 1,
        /// Enhanced QR Code (recommended)
        #[default]
        Model2 = 2,
        /// Micro QR, not supported by every printer
        Micro = 3,
    }

    impl QrModel {
        /// `"micro"` and `"1"` are recognized, anything else is model 2.
        pub fn from_name(name: &str) -> Self {
            match name.to_ascii_lowercase().as_str() {
                "micro" => QrModel::Micro,
                "1" => QrModel::Model1,
                _ => QrModel::Model2,
            }
        }
    }

    /// # Framed QR Code (GS ( k)
    ///
    /// Five framed sub-commands, each with its own length header:
    ///
    /// | fn | Purpose | Payload |
    /// |----|---------|---------|
    /// | 65 | Select model | `48 + model`, 0 |
    /// | 67 | Module size | size |
    /// | 69 | Error correction | `48 + level` |
    /// | 80 | Store data | modifier `'0'` + content |
    /// | 81 | Print symbol | modifier `'0'` |
    ///
    /// Empty content produces no bytes at all.
    ///
    /// ```
    /// use thermals::protocol::barcode::qr::{self, QrLevel, QrModel};
    ///
    /// let cmd = qr::qr_code(b"Hi", QrLevel::L, 3, QrModel::Model2).unwrap();
    /// assert_eq!(&cmd[..9], &[0x1D, 0x28, 0x6B, 4, 0, b'1', 65, 50, 0]);
    /// ```
    pub fn qr_code(content: &[u8], level: QrLevel, size: u8, model: QrModel) -> Result<Vec<u8>> {
        if content.is_empty() {
            return Ok(Vec::new());
        }
        let mut cmd = Vec::with_capacity(content.len() + 40);
        cmd.extend(framing::code_2d(&[65], QR_SYMBOL, &[48 + model as u8, 0], b"")?);
        cmd.extend(framing::code_2d(&[67], QR_SYMBOL, &[size], b"")?);
        cmd.extend(framing::code_2d(&[69], QR_SYMBOL, &[48 + level as u8], b"")?);
        cmd.extend(framing::code_2d(&[80], QR_SYMBOL, content, b"0")?);
        cmd.extend(framing::code_2d(&[81], QR_SYMBOL, b"", b"0")?);
        Ok(cmd)
    }

    /// # Legacy QR Code (GS Z 2, ESC Z v n k dL dH data)
    ///
    /// Older firmware generation. `GS Z 2` selects the QR symbology, then a
    /// single `ESC Z` command carries version, level letter, module size and
    /// the length-prefixed content.
    ///
    /// ```
    /// use thermals::protocol::barcode::qr::{self, QrLevel};
    ///
    /// let cmd = qr::qr_legacy(b"Testing 123", 3, QrLevel::H, 3).unwrap();
    /// assert_eq!(cmd[6], 72);              // 'H'
    /// assert_eq!(&cmd[8..10], &[11, 0]);   // content length
    /// ```
    pub fn qr_legacy(content: &[u8], version: u8, level: QrLevel, size: u8) -> Result<Vec<u8>> {
        let len = u16::try_from(content.len()).map_err(|_| ThermalsError::ValueOutOfRange {
            name: "QR content length",
            value: content.len() as i64,
            min: 0,
            max: i64::from(u16::MAX),
        })?;
        let [dl, dh] = len.to_le_bytes();

        let mut cmd = Vec::with_capacity(10 + content.len());
        cmd.extend_from_slice(&[GS, b'Z', 2]);
        cmd.extend_from_slice(&[ESC, b'Z', version, level.ascii(), size, dl, dh]);
        cmd.extend_from_slice(content);
        Ok(cmd)
    }
}

// ============================================================================
// TESTS
// ============================================================================
