//! # ESC/POS Text Styling Commands
//!
//! Text formatting and text transcoding.
//!
//! | Style | Command | Effect |
//! |-------|---------|--------|
//! | Print mode | ESC ! n | Font B / bold / double size / underline in one byte |
//! | Justification | ESC a n | Left, center, right |
//! | Font | ESC M n | Font A / B / C |
//! | Underline | ESC - n | None, 1-dot, 2-dot |
//! | Emphasis | ESC E n | Bold |
//! | Double-strike | ESC G n | Overstruck |
//! | Reverse | GS B n | White on black |
//! | Character size | GS ! n | 1-8x width and height |
//!
//! ## Text Encoding
//!
//! Text is always sent as GB18030. The printers this driver targets ship with
//! GB18030 firmware fonts, and ASCII passes through unchanged.

use bitflags::bitflags;

use super::commands::{ESC, GS};
use crate::error::{Result, ThermalsError};

// ============================================================================
// PRINT MODE (ESC !)
// ============================================================================

bitflags! {
    /// Print mode bits for `ESC ! n`. Font A is the empty set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PrintMode: u8 {
        const FONT_B = 1;
        const EMPHASIZED = 8;
        const DOUBLE_HEIGHT = 16;
        const DOUBLE_WIDTH = 32;
        const UNDERLINE = 128;
    }
}

/// Mode names accepted by [`PrintMode::by_name`].
const PRINT_MODE_NAMES: &[(&str, PrintMode)] = &[
    ("FONT-A", PrintMode::empty()),
    ("FONT-B", PrintMode::FONT_B),
    ("EMPHASIZED", PrintMode::EMPHASIZED),
    ("DOUBLE-HEIGHT", PrintMode::DOUBLE_HEIGHT),
    ("DOUBLE-WIDTH", PrintMode::DOUBLE_WIDTH),
    ("UNDERLINE", PrintMode::UNDERLINE),
];

impl PrintMode {
    /// Look up one named mode (case-insensitive, `_` accepted for `-`).
    ///
    /// ```
    /// use thermals::protocol::text::PrintMode;
    ///
    /// assert_eq!(PrintMode::by_name("double-width").unwrap().bits(), 32);
    /// assert!(PrintMode::by_name("bogus").is_err());
    /// ```
    pub fn by_name(name: &str) -> Result<Self> {
        let normalized = name.trim().replace('_', "-");
        PRINT_MODE_NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(&normalized))
            .map(|&(_, mode)| mode)
            .ok_or_else(|| ThermalsError::InvalidPrintMode(name.to_string()))
    }
}

/// # Select Print Mode (ESC ! n)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC ! n |
/// | Hex     | 1B 21 n |
#[inline]
pub fn print_mode(mode: PrintMode) -> Vec<u8> {
    vec![ESC, b'!', mode.bits()]
}

// ============================================================================
// JUSTIFICATION
// ============================================================================

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justification {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

impl std::str::FromStr for Justification {
    type Err = ThermalsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Justification::Left),
            "center" | "centre" => Ok(Justification::Center),
            "right" => Ok(Justification::Right),
            _ => Err(ThermalsError::InvalidJustification(s.to_string())),
        }
    }
}

/// # Select Justification (ESC a n)
///
/// Takes effect at the start of the next line.
///
/// ```
/// use thermals::protocol::text::{justify, Justification};
///
/// assert_eq!(justify(Justification::Center), vec![0x1B, 0x61, 0x01]);
/// ```
#[inline]
pub fn justify(justification: Justification) -> Vec<u8> {
    vec![ESC, b'a', justification as u8]
}

// ============================================================================
// FONT SELECTION
// ============================================================================

/// Available fonts. Many printers have no Font C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    A = 0,
    B = 1,
    C = 2,
}

impl std::str::FromStr for Font {
    type Err = ThermalsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "font-a" | "a" => Ok(Font::A),
            "font-b" | "b" => Ok(Font::B),
            "font-c" | "c" => Ok(Font::C),
            _ => Err(ThermalsError::InvalidFont(s.to_string())),
        }
    }
}

/// # Select Character Font (ESC M n)
#[inline]
pub fn font(f: Font) -> Vec<u8> {
    vec![ESC, b'M', f as u8]
}

// ============================================================================
// UNDERLINE
// ============================================================================

/// Underline thickness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Underline {
    #[default]
    None = 0,
    Single = 1,
    Double = 2,
}

impl From<bool> for Underline {
    fn from(on: bool) -> Self {
        if on { Underline::Single } else { Underline::None }
    }
}

impl std::str::FromStr for Underline {
    type Err = ThermalsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "false" => Ok(Underline::None),
            "single" | "true" => Ok(Underline::Single),
            "double" => Ok(Underline::Double),
            _ => Err(ThermalsError::InvalidUnderline(s.to_string())),
        }
    }
}

/// # Set Underline Mode (ESC - n)
///
/// - `n = 0`: Underline OFF
/// - `n = 1`: 1 dot thick
/// - `n = 2`: 2 dots thick
///
/// Underline does not affect spaces or horizontal tabs.
#[inline]
pub fn underline(mode: Underline) -> Vec<u8> {
    vec![ESC, b'-', mode as u8]
}

// ============================================================================
// ON/OFF STYLES
// ============================================================================

/// # Turn Emphasized Mode On/Off (ESC E n)
#[inline]
pub fn emphasis(on: bool) -> Vec<u8> {
    vec![ESC, b'E', u8::from(on)]
}

/// # Turn Double-Strike Mode On/Off (ESC G n)
///
/// Looks much like emphasis on most thermal heads.
#[inline]
pub fn double_strike(on: bool) -> Vec<u8> {
    vec![ESC, b'G', u8::from(on)]
}

/// # Turn White/Black Reverse On/Off (GS B n)
#[inline]
pub fn reverse_colors(on: bool) -> Vec<u8> {
    vec![GS, b'B', u8::from(on)]
}

// ============================================================================
// CHARACTER SIZE
// ============================================================================

/// # Select Character Size (GS ! n)
///
/// Width multiplier in the high nibble, height in the low nibble, both
/// stored minus one:
///
/// ```text
/// n = ((width - 1) << 4) | (height - 1)
/// ```
///
/// Callers pass multipliers in 1..=8.
///
/// ```
/// use thermals::protocol::text::text_size;
///
/// assert_eq!(text_size(2, 3), vec![0x1D, 0x21, 0x12]);
/// ```
#[inline]
pub fn text_size(width: u8, height: u8) -> Vec<u8> {
    let n = ((width.saturating_sub(1) & 0x07) << 4) | (height.saturating_sub(1) & 0x07);
    vec![GS, b'!', n]
}

// ============================================================================
// TEXT ENCODING
// ============================================================================

/// Transcode `text` into GB18030 printer bytes.
///
/// GB18030 covers every Unicode scalar value, so nothing is ever replaced.
pub fn encode(text: &str) -> Vec<u8> {
    let (bytes, _, _) = encoding_rs::GB18030.encode(text);
    bytes.into_owned()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_mode_bits() {
        assert_eq!(PrintMode::by_name("FONT-A").unwrap().bits(), 0);
        assert_eq!(PrintMode::by_name("font-b").unwrap().bits(), 1);
        assert_eq!(PrintMode::by_name("Emphasized").unwrap().bits(), 8);
        assert_eq!(PrintMode::by_name("DOUBLE_HEIGHT").unwrap().bits(), 16);
        assert_eq!(PrintMode::by_name("double-width").unwrap().bits(), 32);
        assert_eq!(PrintMode::by_name("underline").unwrap().bits(), 128);
    }

    #[test]
    fn test_print_mode_by_name_is_lenient() {
        assert_eq!(PrintMode::by_name(" Double_Width ").unwrap(), PrintMode::DOUBLE_WIDTH);
        assert_eq!(PrintMode::by_name("font_a").unwrap(), PrintMode::empty());
        // bitflags' own exact-name lookup is still available
        assert_eq!(PrintMode::from_name("DOUBLE_WIDTH"), Some(PrintMode::DOUBLE_WIDTH));
        assert_eq!(PrintMode::from_name("double-width"), None);
    }

    #[test]
    fn test_print_mode_unknown() {
        assert!(matches!(
            PrintMode::by_name("bogus"),
            Err(ThermalsError::InvalidPrintMode(name)) if name == "bogus"
        ));
    }

    #[test]
    fn test_print_mode_composes() {
        let mode = PrintMode::EMPHASIZED | PrintMode::DOUBLE_WIDTH;
        assert_eq!(print_mode(mode), vec![0x1B, 0x21, 40]);
    }

    #[test]
    fn test_justify() {
        assert_eq!(justify(Justification::Left), vec![0x1B, 0x61, 0]);
        assert_eq!(justify(Justification::Right), vec![0x1B, 0x61, 2]);
        assert_eq!("CENTER".parse::<Justification>().unwrap(), Justification::Center);
        assert!("middle".parse::<Justification>().is_err());
    }

    #[test]
    fn test_font() {
        assert_eq!(font(Font::C), vec![0x1B, 0x4D, 2]);
        assert_eq!("Font-B".parse::<Font>().unwrap(), Font::B);
        assert!(matches!("font-d".parse::<Font>(), Err(ThermalsError::InvalidFont(_))));
    }

    #[test]
    fn test_underline() {
        assert_eq!(underline(Underline::Double), vec![0x1B, 0x2D, 2]);
        assert_eq!(Underline::from(true), Underline::Single);
        assert_eq!(Underline::from(false), Underline::None);
        assert_eq!("NONE".parse::<Underline>().unwrap(), Underline::None);
        assert!("triple".parse::<Underline>().is_err());
    }

    #[test]
    fn test_on_off_styles() {
        assert_eq!(emphasis(true), vec![0x1B, 0x45, 1]);
        assert_eq!(emphasis(false), vec![0x1B, 0x45, 0]);
        assert_eq!(double_strike(true), vec![0x1B, 0x47, 1]);
        assert_eq!(reverse_colors(true), vec![0x1D, 0x42, 1]);
    }

    #[test]
    fn test_text_size() {
        assert_eq!(text_size(1, 1), vec![0x1D, 0x21, 0x00]);
        assert_eq!(text_size(2, 3), vec![0x1D, 0x21, 0x12]);
        assert_eq!(text_size(8, 8), vec![0x1D, 0x21, 0x77]);
    }

    #[test]
    fn test_encode_ascii_passthrough() {
        assert_eq!(encode("hello, world\n"), b"hello, world\n".to_vec());
    }

    #[test]
    fn test_encode_chinese() {
        // 你好 in GB18030
        assert_eq!(encode("你好"), vec![0xC4, 0xE3, 0xBA, 0xC3]);
    }

    #[test]
    fn test_encode_outside_bmp() {
        // four-byte GB18030 sequence, no replacement
        assert_eq!(encode("😀"), vec![0x94, 0x39, 0xFC, 0x36]);
    }
}
