//! # ESC/POS Basic Commands
//!
//! Control bytes and the fixed-shape printer commands: initialization,
//! cutting, paper feed, cash drawer pulse, code page selection and the
//! print area settings.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`, `FF`
//! - Two bytes: `ESC @`, `ESC 2`
//! - Multi-byte with parameters: `ESC d n`, `GS V m n`, `GS L nL nH`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// CONTROL BYTES
// ============================================================================

/// LF (Line Feed) - Print and advance one line
pub const LF: u8 = 0x0A;

/// FF (Form Feed) - Print and eject in page mode
pub const FF: u8 = 0x0C;

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B).
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for graphics, barcodes, character size and the `GS ( k` / `GS ( L`
/// framed sub-protocols.
pub const GS: u8 = 0x1D;

// ============================================================================
// INITIALIZATION
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Clears the print buffer and resets modes to their power-on defaults.
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
///
/// ```
/// use thermals::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

// ============================================================================
// CUTTER CONTROL
// ============================================================================

/// Cut mode selector for `GS V`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutMode {
    /// Full cut, receipt separated from the roll
    #[default]
    Full = 65,
    /// Partial cut, leaves a small hinge
    Partial = 66,
}

impl std::str::FromStr for CutMode {
    type Err = crate::ThermalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(CutMode::Full),
            "partial" => Ok(CutMode::Partial),
            _ => Err(crate::ThermalsError::InvalidArgument(format!(
                "cut mode must be 'full' or 'partial', got {s:?}"
            ))),
        }
    }
}

/// # Feed and Cut (GS V m n)
///
/// Feeds `lines` motion units past the cutter, then cuts.
///
/// | Format  | Bytes      |
/// |---------|------------|
/// | ASCII   | GS V m n   |
/// | Hex     | 1D 56 m n  |
///
/// - `m = 65`: full cut
/// - `m = 66`: partial cut
///
/// ```
/// use thermals::protocol::commands::{self, CutMode};
///
/// assert_eq!(commands::cut(CutMode::Full, 8), vec![0x1D, 0x56, 65, 8]);
/// ```
#[inline]
pub fn cut(mode: CutMode, lines: u8) -> Vec<u8> {
    vec![GS, b'V', mode as u8, lines]
}

// ============================================================================
// PAPER FEED
// ============================================================================

/// # Print and Feed (LF / ESC d n)
///
/// A single `LF` when `lines <= 1`, otherwise `ESC d n`.
///
/// ```
/// use thermals::protocol::commands;
///
/// assert_eq!(commands::feed(1), vec![0x0A]);
/// assert_eq!(commands::feed(7), vec![0x1B, 0x64, 7]);
/// ```
#[inline]
pub fn feed(lines: u8) -> Vec<u8> {
    if lines <= 1 {
        vec![LF]
    } else {
        vec![ESC, b'd', lines]
    }
}

/// Form feed (FF). Mostly meaningful in page mode.
#[inline]
pub fn feed_form() -> Vec<u8> {
    vec![FF]
}

/// # Print and Reverse Feed (ESC e n)
///
/// Not every printer supports reverse feeding.
#[inline]
pub fn feed_reverse(lines: u8) -> Vec<u8> {
    vec![ESC, b'e', lines]
}

// ============================================================================
// CASH DRAWER
// ============================================================================

/// Drawer kick-out connector pin driven by `ESC p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerPin {
    /// Connector pin 2
    #[default]
    Pin2 = 0,
    /// Connector pin 5
    Pin5 = 1,
}

impl TryFrom<u32> for DrawerPin {
    type Error = crate::ThermalsError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(DrawerPin::Pin2),
            1 => Ok(DrawerPin::Pin5),
            _ => Err(crate::ThermalsError::ValueOutOfRange {
                name: "pulse pin",
                value: i64::from(index),
                min: 0,
                max: 1,
            }),
        }
    }
}

/// # Generate Pulse (ESC p m t1 t2)
///
/// Kicks a cash drawer connected to the printer.
///
/// | Format  | Bytes          |
/// |---------|----------------|
/// | ASCII   | ESC p m t1 t2  |
/// | Hex     | 1B 70 m t1 t2  |
///
/// - `m`: `'0'` for drawer pin 2, `'1'` for pin 5
/// - `t1`, `t2`: on/off times in 2ms ticks
///
/// `on_ms` / `off_ms` are milliseconds and are halved (truncating) into
/// hardware ticks.
///
/// ```
/// use thermals::protocol::commands::{self, DrawerPin};
///
/// assert_eq!(commands::pulse(DrawerPin::Pin2, 120, 240), vec![0x1B, 0x70, 48, 60, 120]);
/// ```
pub fn pulse(pin: DrawerPin, on_ms: u16, off_ms: u16) -> Vec<u8> {
    vec![ESC, b'p', b'0' + pin as u8, ticks(on_ms), ticks(off_ms)]
}

fn ticks(ms: u16) -> u8 {
    // 511ms is the longest representable pulse
    (ms / 2).min(u16::from(u8::MAX)) as u8
}

// ============================================================================
// CHARACTER TABLE
// ============================================================================

/// # Select Character Code Table (ESC t n)
///
/// Table numbers are model specific; see [`crate::printer::PrinterProfile`].
#[inline]
pub fn select_character_table(table: u8) -> Vec<u8> {
    vec![ESC, b't', table]
}

// ============================================================================
// LINE SPACING AND PRINT AREA
// ============================================================================

/// # Set Line Spacing (ESC 3 n / ESC 2)
///
/// `Some(n)` sets the spacing to `n` motion units, `None` restores the
/// printer default.
pub fn line_spacing(height: Option<u8>) -> Vec<u8> {
    match height {
        Some(n) => vec![ESC, b'3', n],
        None => vec![ESC, b'2'],
    }
}

/// # Set Left Margin (GS L nL nH)
pub fn left_margin(margin: u16) -> Vec<u8> {
    let [nl, nh] = u16_le(margin);
    vec![GS, b'L', nl, nh]
}

/// # Set Print Area Width (GS W nL nH)
pub fn print_width(width: u16) -> Vec<u8> {
    let [nl, nh] = u16_le(width);
    vec![GS, b'W', nl, nh]
}

/// # Select Color (ESC r n)
///
/// Two-colour printers only. `true` selects the second colour (usually red).
#[inline]
pub fn color(second: bool) -> Vec<u8> {
    vec![ESC, b'r', u8::from(second)]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// ```
/// use thermals::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(576), [0x40, 0x02]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

// ============================================================================
// TESTS
// ============================================================================
