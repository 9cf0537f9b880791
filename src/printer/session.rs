//! # Print Session
//!
//! [`Printer`] is the caller-facing API. Each call validates its arguments,
//! fills in defaults, and only then hands the request to the [`Escpos`]
//! encoder, which appends to the session's job buffer. Nothing reaches the
//! printer until [`Printer::print`] flushes the buffer to the transport.
//!
//! ## Validation
//!
//! | Operation | Checked |
//! |-----------|---------|
//! | `cut` | mode `full`/`partial`, lines 0..=255 |
//! | `feed` | lines 0..=255 |
//! | `feed_reverse` | lines 1..=255 |
//! | `barcode` | symbology name, data length, data charset |
//! | `pulse` | pin 0..=1, on/off 1..=511 ms |
//! | `qr_code`, `qr` | level `l`/`m`/`q`/`h`, size 1..=16 |
//! | `set_text_size` | both multipliers 1..=8 |
//! | `select_character_table` | 0..=255 and supported by the profile |
//!
//! A rejected call returns an error and leaves the buffer exactly as it was.
//!
//! ## Example
//!
//! ```
//! use thermals::printer::Printer;
//! use thermals::transport::MemoryTransport;
//!
//! # #[tokio::main]
//! # async fn main() -> thermals::Result<()> {
//! let (transport, jobs) = MemoryTransport::new();
//! let mut printer = Printer::new(transport);
//!
//! printer.set_align(Some("center"))?.textln("Hello");
//! printer.barcode("CODE39", None)?;
//! printer.cut(None, None)?;
//! printer.print().await?;
//!
//! assert_eq!(jobs.lock().unwrap().len(), 1);
//! assert!(printer.contents().is_empty());
//! # Ok(())
//! # }
//! ```

use std::mem;

use crate::encoder::{Escpos, QrCodeOptions, QrOptions};
use crate::error::{Result, ThermalsError, check_range};
use crate::printer::config::PrinterProfile;
use crate::protocol::barcode::lookup;
use crate::protocol::barcode::qr::{QrLevel, QrModel};
use crate::protocol::commands::{CutMode, DrawerPin};
use crate::protocol::graphics::ImageSize;
use crate::render::MonochromeBitmap;
use crate::transport::{Connector, Settings, Transport};

/// Lines fed before cutting when the caller does not say.
pub const DEFAULT_CUT_LINES: u32 = 3;

/// Barcode height in dots used when none is given.
pub const DEFAULT_BARCODE_HEIGHT: u32 = 8;

/// Drawer kick defaults, suitable for Epson drawers.
pub const DEFAULT_PULSE_PIN: u32 = 0;
pub const DEFAULT_PULSE_ON_MS: u32 = 120;
pub const DEFAULT_PULSE_OFF_MS: u32 = 240;

/// Parameters for [`Printer::qr_code`]. Unset fields take the defaults
/// level `l`, size 3, model 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeParams<'a> {
    pub level: Option<&'a str>,
    pub size: Option<u32>,
    /// `"1"`, `"2"` or `"micro"`
    pub model: Option<&'a str>,
}

/// Parameters for [`Printer::qr`]. Unset fields take the defaults
/// level `l`, size 6, version 3.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrParams<'a> {
    pub level: Option<&'a str>,
    pub size: Option<u32>,
    /// Symbol version 1..=40, or 0 to let the printer pick
    pub version: Option<u32>,
}

/// Range-check `value` and narrow it to the wire type.
fn narrow<T: TryFrom<u32>>(
    name: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<T> {
    let out_of_range = || ThermalsError::ValueOutOfRange {
        name,
        value: i64::from(value),
        min: i64::from(min),
        max: i64::from(max),
    };
    check_range(name, i64::from(value), i64::from(min), i64::from(max))?;
    T::try_from(value).map_err(|_| out_of_range())
}

/// A print session: one job buffer, one transport.
///
/// Not internally synchronized; share it behind your own lock if several
/// tasks need to print.
pub struct Printer {
    encoder: Escpos,
    buffer: Vec<u8>,
    profile: PrinterProfile,
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for Printer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Printer")
            .field("profile", &self.profile.name)
            .field("pending_bytes", &self.buffer.len())
            .finish_non_exhaustive()
    }
}

impl Printer {
    /// Session on `transport` using the default profile.
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self::with_transport(Box::new(transport))
    }

    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self {
            encoder: Escpos,
            buffer: Vec::new(),
            profile: PrinterProfile::default(),
            transport,
        }
    }

    /// Resolve `connector` with `settings` and open a session on the result.
    pub fn from_connector(connector: Connector, settings: &Settings) -> Result<Self> {
        Ok(Self::with_transport(connector.resolve(settings)?))
    }

    pub fn with_profile(mut self, profile: PrinterProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn profile(&self) -> &PrinterProfile {
        &self.profile
    }

    /// Bytes queued for the next [`print`](Self::print).
    pub fn contents(&self) -> &[u8] {
        &self.buffer
    }

    /// Drop everything queued so far.
    pub fn clear(&mut self) -> &mut Self {
        self.buffer.clear();
        self
    }

    /// Send the queued job to the transport.
    ///
    /// The buffer is emptied before the write, so a failed job is not
    /// resent with the next one. Transport errors are returned unchanged.
    pub async fn print(&mut self) -> Result<()> {
        let job = mem::take(&mut self.buffer);
        log::debug!("Printing job of {} bytes", job.len());
        self.transport.write(&job).await
    }

    // ========================================================================
    // TEXT
    // ========================================================================

    /// Reset the printer to power-on settings.
    pub fn initialize(&mut self) -> &mut Self {
        self.encoder.initialize(&mut self.buffer);
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.encoder.text(&mut self.buffer, text);
        self
    }

    /// Text followed by a line feed.
    pub fn textln(&mut self, text: &str) -> &mut Self {
        self.encoder.text(&mut self.buffer, text);
        self.encoder.text_raw(&mut self.buffer, b"\n");
        self
    }

    /// Bytes already encoded for the selected character table.
    pub fn text_raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.encoder.text_raw(&mut self.buffer, bytes);
        self
    }

    pub fn select_print_mode(&mut self, mode: Option<&str>) -> Result<&mut Self> {
        self.encoder.select_print_mode(&mut self.buffer, mode)?;
        Ok(self)
    }

    pub fn set_align(&mut self, justification: Option<&str>) -> Result<&mut Self> {
        self.encoder.set_align(&mut self.buffer, justification)?;
        Ok(self)
    }

    pub fn set_font(&mut self, font: Option<&str>) -> Result<&mut Self> {
        self.encoder.set_font(&mut self.buffer, font)?;
        Ok(self)
    }

    /// `none`, `single`, `double`; `None` means single.
    pub fn set_underline(&mut self, underline: Option<&str>) -> Result<&mut Self> {
        self.encoder
            .set_underline(&mut self.buffer, underline.unwrap_or("single"))?;
        Ok(self)
    }

    pub fn set_emphasis(&mut self, on: bool) -> &mut Self {
        self.encoder.set_emphasis(&mut self.buffer, on);
        self
    }

    pub fn set_double_strike(&mut self, on: bool) -> &mut Self {
        self.encoder.set_double_strike(&mut self.buffer, on);
        self
    }

    pub fn set_reverse_colors(&mut self, on: bool) -> &mut Self {
        self.encoder.set_reverse_colors(&mut self.buffer, on);
        self
    }

    /// Character size as multiples of normal, each 1..=8.
    pub fn set_text_size(&mut self, width: u32, height: u32) -> Result<&mut Self> {
        let width = narrow::<u8>("text width multiplier", width, 1, 8)?;
        let height = narrow::<u8>("text height multiplier", height, 1, 8)?;
        self.encoder.set_text_size(&mut self.buffer, width, height);
        Ok(self)
    }

    /// Switch code page. The table must be one the profile supports.
    pub fn select_character_table(&mut self, table: u32) -> Result<&mut Self> {
        let table = narrow::<u8>("character table", table, 0, 255)?;
        if !self.profile.supports_table(table) {
            return Err(ThermalsError::UnsupportedCharacterTable {
                table,
                profile: self.profile.name,
            });
        }
        self.encoder.select_character_table(&mut self.buffer, table);
        Ok(self)
    }

    /// Line spacing in dots, or `None` for the printer default.
    pub fn set_line_spacing(&mut self, height: Option<u32>) -> Result<&mut Self> {
        let height = height
            .map(|h| narrow::<u8>("line spacing", h, 1, 255))
            .transpose()?;
        self.encoder.set_line_spacing(&mut self.buffer, height);
        Ok(self)
    }

    pub fn set_print_left_margin(&mut self, margin: u32) -> Result<&mut Self> {
        let margin = narrow::<u16>("left margin", margin, 0, 65535)?;
        self.encoder.set_print_left_margin(&mut self.buffer, margin);
        Ok(self)
    }

    pub fn set_print_width(&mut self, width: u32) -> Result<&mut Self> {
        let width = narrow::<u16>("print width", width, 1, 65535)?;
        self.encoder.set_print_width(&mut self.buffer, width);
        Ok(self)
    }

    /// Second colour on two-colour printers.
    pub fn set_color(&mut self, second: bool) -> &mut Self {
        self.encoder.set_color(&mut self.buffer, second);
        self
    }

    // ========================================================================
    // PAPER HANDLING
    // ========================================================================

    /// Feed and cut. Defaults: full cut, 3 lines.
    pub fn cut(&mut self, mode: Option<&str>, lines: Option<u32>) -> Result<&mut Self> {
        let mode = match mode {
            Some(name) => name.parse()?,
            None => CutMode::default(),
        };
        let lines = narrow::<u8>("cut lines", lines.unwrap_or(DEFAULT_CUT_LINES), 0, 255)?;
        self.encoder.cut(&mut self.buffer, mode, lines);
        Ok(self)
    }

    /// Print and feed; `None` feeds one line.
    pub fn feed(&mut self, lines: Option<u32>) -> Result<&mut Self> {
        let lines = narrow::<u8>("feed lines", lines.unwrap_or(1), 0, 255)?;
        self.encoder.feed(&mut self.buffer, lines);
        Ok(self)
    }

    pub fn feed_form(&mut self) -> &mut Self {
        self.encoder.feed_form(&mut self.buffer);
        self
    }

    /// Print and feed backwards; `None` feeds one line.
    pub fn feed_reverse(&mut self, lines: Option<u32>) -> Result<&mut Self> {
        let lines = narrow::<u8>("reverse feed lines", lines.unwrap_or(1), 1, 255)?;
        self.encoder.feed_reverse(&mut self.buffer, lines);
        Ok(self)
    }

    /// Cash drawer pulse on pin 0 (connector pin 2) or 1 (pin 5).
    pub fn pulse(&mut self, pin: u32, on_ms: u32, off_ms: u32) -> Result<&mut Self> {
        let pin = DrawerPin::try_from(pin)?;
        let on_ms = narrow::<u16>("pulse on time", on_ms, 1, 511)?;
        let off_ms = narrow::<u16>("pulse off time", off_ms, 1, 511)?;
        self.encoder.pulse(&mut self.buffer, pin, on_ms, off_ms);
        Ok(self)
    }

    /// Pulse with the Epson drawer defaults.
    pub fn kick_drawer(&mut self) -> Result<&mut Self> {
        self.pulse(DEFAULT_PULSE_PIN, DEFAULT_PULSE_ON_MS, DEFAULT_PULSE_OFF_MS)
    }

    // ========================================================================
    // BARCODES
    // ========================================================================

    /// 1D barcode. `kind` defaults to CODE39.
    pub fn barcode(&mut self, data: &str, kind: Option<&str>) -> Result<&mut Self> {
        let spec = lookup(kind)?;
        spec.validate(data)?;
        self.encoder.barcode(&mut self.buffer, data, spec)?;
        Ok(self)
    }

    /// Barcode height in dots; `None` means 8.
    pub fn set_barcode_height(&mut self, height: Option<u32>) -> Result<&mut Self> {
        let height = narrow::<u8>(
            "barcode height",
            height.unwrap_or(DEFAULT_BARCODE_HEIGHT),
            1,
            255,
        )?;
        self.encoder.set_barcode_height(&mut self.buffer, height);
        Ok(self)
    }

    pub fn set_barcode_width(&mut self, width: u32) -> Result<&mut Self> {
        let width = narrow::<u8>("barcode width", width, 1, 255)?;
        self.encoder.set_barcode_width(&mut self.buffer, width);
        Ok(self)
    }

    /// Where the human readable text goes: `none`, `above`, `below`, `both`.
    pub fn set_barcode_text_position(&mut self, position: &str) -> Result<&mut Self> {
        self.encoder
            .set_barcode_text_position(&mut self.buffer, position)?;
        Ok(self)
    }

    /// Framed QR Code for current firmware.
    pub fn qr_code(&mut self, content: &str, params: QrCodeParams<'_>) -> Result<&mut Self> {
        let defaults = QrCodeOptions::default();
        let options = QrCodeOptions {
            level: match params.level {
                Some(level) => level.parse::<QrLevel>()?,
                None => defaults.level,
            },
            size: match params.size {
                Some(size) => narrow::<u8>("QR module size", size, 1, 16)?,
                None => defaults.size,
            },
            model: params.model.map_or(defaults.model, QrModel::from_name),
        };
        self.encoder.qr_code(&mut self.buffer, content, &options)?;
        Ok(self)
    }

    /// Single-frame QR Code for older firmware.
    pub fn qr(&mut self, content: &str, params: QrParams<'_>) -> Result<&mut Self> {
        let defaults = QrOptions::default();
        let options = QrOptions {
            level: match params.level {
                Some(level) => level.parse::<QrLevel>()?,
                None => defaults.level,
            },
            size: match params.size {
                Some(size) => narrow::<u8>("QR module size", size, 1, 16)?,
                None => defaults.size,
            },
            version: match params.version {
                Some(version) => narrow::<u8>("QR version", version, 0, 40)?,
                None => defaults.version,
            },
        };
        self.encoder.qr(&mut self.buffer, content, &options)?;
        Ok(self)
    }

    // ========================================================================
    // IMAGES
    // ========================================================================

    fn image_size(&self, bitmap: &MonochromeBitmap, size: Option<&str>) -> Result<ImageSize> {
        let size = match size {
            Some(name) => name.parse()?,
            None => ImageSize::default(),
        };
        let scale = if size.double_width() { 2 } else { 1 };
        if bitmap.width() * scale > usize::from(self.profile.width_dots) {
            log::warn!(
                "Image is {} dots wide, {} prints at most {}",
                bitmap.width() * scale,
                self.profile.name,
                self.profile.width_dots
            );
        }
        Ok(size)
    }

    /// Print an image with `GS ( L`. Size: `default`, `double-width`,
    /// `double-height`, `double`.
    pub fn graphics(
        &mut self,
        bitmap: &MonochromeBitmap,
        size: Option<&str>,
    ) -> Result<&mut Self> {
        let size = self.image_size(bitmap, size)?;
        self.encoder.graphics(&mut self.buffer, bitmap, size)?;
        Ok(self)
    }

    /// Print an image with the older `GS v 0` command.
    pub fn bit_image(
        &mut self,
        bitmap: &MonochromeBitmap,
        size: Option<&str>,
    ) -> Result<&mut Self> {
        let size = self.image_size(bitmap, size)?;
        self.encoder.bit_image(&mut self.buffer, bitmap, size)?;
        Ok(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;

    fn printer() -> Printer {
        Printer::new(MemoryTransport::default())
    }

    #[test]
    fn test_cut_defaults() {
        let mut p = printer();
        p.cut(None, None).unwrap();
        assert_eq!(p.contents(), &[0x1D, 0x56, 65, 3]);
    }

    #[test]
    fn test_cut_partial() {
        let mut p = printer();
        p.cut(Some("partial"), Some(0)).unwrap();
        assert_eq!(p.contents(), &[0x1D, 0x56, 66, 0]);
    }

    #[test]
    fn test_cut_rejects_bad_input() {
        let mut p = printer();
        assert!(p.cut(Some("half"), None).is_err());
        assert!(matches!(
            p.cut(None, Some(256)),
            Err(ThermalsError::ValueOutOfRange { value: 256, .. })
        ));
        assert!(p.contents().is_empty());
    }

    #[test]
    fn test_feed() {
        let mut p = printer();
        p.feed(None).unwrap().feed(Some(4)).unwrap();
        assert_eq!(p.contents(), &[0x0A, 0x1B, 0x64, 4]);
        assert!(p.feed(Some(256)).is_err());
        assert_eq!(p.contents().len(), 4);
    }

    #[test]
    fn test_feed_zero_lines_prints_buffer() {
        let mut p = printer();
        p.feed(Some(0)).unwrap();
        assert_eq!(p.contents(), &[0x0A]);
        assert!(p.feed_reverse(Some(0)).is_err());
    }

    #[test]
    fn test_barcode_validation() {
        let mut p = printer();
        p.barcode("12345678901", Some("UPCA")).unwrap();
        let len = p.contents().len();

        assert!(matches!(
            p.barcode("1234567890", Some("UPCA")),
            Err(ThermalsError::InvalidBarcodeLength { .. })
        ));
        assert!(matches!(
            p.barcode("1234567890A", Some("UPCA")),
            Err(ThermalsError::InvalidBarcodeCharacter { position: 10, .. })
        ));
        assert!(matches!(
            p.barcode("123", Some("QR")),
            Err(ThermalsError::UnknownBarcodeType(_))
        ));
        assert_eq!(p.contents().len(), len);
    }

    #[test]
    fn test_barcode_defaults_to_code39() {
        let mut p = printer();
        p.barcode("ABC-123", None).unwrap();
        assert_eq!(&p.contents()[..4], &[0x1D, 0x6B, 69, 7]);
    }

    #[test]
    fn test_pulse_ranges() {
        let mut p = printer();
        p.kick_drawer().unwrap();
        assert_eq!(p.contents(), &[0x1B, 0x70, 48, 60, 120]);

        assert!(p.pulse(2, 100, 100).is_err());
        assert!(p.pulse(0, 0, 100).is_err());
        assert!(p.pulse(0, 100, 512).is_err());
        assert_eq!(p.contents().len(), 5);
    }

    #[test]
    fn test_pulse_second_pin() {
        let mut p = printer();
        p.pulse(1, 2, 511).unwrap();
        assert_eq!(p.contents(), &[0x1B, 0x70, 0x31, 1, 255]);
        assert!(matches!(
            p.pulse(256, 100, 100),
            Err(ThermalsError::ValueOutOfRange { name: "pulse pin", value: 256, .. })
        ));
        assert_eq!(p.contents().len(), 5);
    }

    #[test]
    fn test_text_size_range() {
        let mut p = printer();
        p.set_text_size(2, 3).unwrap();
        assert_eq!(p.contents(), &[0x1D, 0x21, 0x12]);
        assert!(p.set_text_size(0, 1).is_err());
        assert!(p.set_text_size(1, 9).is_err());
        assert_eq!(p.contents().len(), 3);
    }

    #[test]
    fn test_character_table_checks_profile() {
        let mut p = printer().with_profile(PrinterProfile::SIMPLE);
        p.select_character_table(0).unwrap();
        assert!(matches!(
            p.select_character_table(16),
            Err(ThermalsError::UnsupportedCharacterTable { table: 16, .. })
        ));
        assert!(matches!(
            p.select_character_table(300),
            Err(ThermalsError::ValueOutOfRange { .. })
        ));
        assert_eq!(p.contents(), &[0x1B, 0x74, 0]);
    }

    #[test]
    fn test_qr_code_defaults() {
        let mut p = printer();
        p.qr_code("hello", QrCodeParams::default()).unwrap();
        let out = p.contents();
        // model 2
        assert_eq!(&out[7..9], &[50, 0]);
        // size 3
        assert_eq!(out[16], 3);
        // level L
        assert_eq!(out[24], 48);
    }

    #[test]
    fn test_qr_code_rejects_bad_params() {
        let mut p = printer();
        let bad_level = QrCodeParams {
            level: Some("x"),
            ..Default::default()
        };
        assert!(matches!(
            p.qr_code("hello", bad_level),
            Err(ThermalsError::InvalidQrLevel(_))
        ));
        let bad_size = QrCodeParams {
            size: Some(17),
            ..Default::default()
        };
        assert!(p.qr_code("hello", bad_size).is_err());
        assert!(p.contents().is_empty());
    }

    #[test]
    fn test_qr_legacy_level_h() {
        let mut p = printer();
        let params = QrParams {
            level: Some("h"),
            size: Some(3),
            ..Default::default()
        };
        p.qr("Testing 123", params).unwrap();
        let out = p.contents();
        assert_eq!(out[6], 72);
        assert_eq!(u16::from_le_bytes([out[8], out[9]]), 11);
    }

    #[test]
    fn test_graphics_rejects_unknown_size() {
        let mut p = printer();
        let bitmap = MonochromeBitmap::new(8, 1, vec![1; 8]).unwrap();
        assert!(matches!(
            p.graphics(&bitmap, Some("huge")),
            Err(ThermalsError::InvalidImageSize(_))
        ));
        assert!(p.contents().is_empty());
        p.bit_image(&bitmap, Some("double")).unwrap();
        assert_eq!(&p.contents()[..4], &[0x1D, 0x76, 0x30, 3]);
    }

    #[test]
    fn test_underline_defaults_to_single() {
        let mut p = printer();
        p.set_underline(None).unwrap();
        assert_eq!(p.contents(), &[0x1B, 0x2D, 1]);
    }

    #[test]
    fn test_line_spacing_and_margins() {
        let mut p = printer();
        p.set_line_spacing(Some(30))
            .unwrap()
            .set_line_spacing(None)
            .unwrap()
            .set_print_left_margin(256)
            .unwrap();
        assert_eq!(
            p.contents(),
            &[0x1B, 0x33, 30, 0x1B, 0x32, 0x1D, 0x4C, 0, 1]
        );
        assert!(p.set_print_width(0).is_err());
        assert!(p.set_print_left_margin(70_000).is_err());
    }

    #[test]
    fn test_textln_and_clear() {
        let mut p = printer();
        p.textln("hi");
        assert_eq!(p.contents(), b"hi\n");
        p.clear();
        assert!(p.contents().is_empty());
    }

    #[tokio::test]
    async fn test_print_empties_buffer() {
        let (transport, jobs) = MemoryTransport::new();
        let mut p = Printer::new(transport);
        p.initialize().text("one");
        p.print().await.unwrap();
        p.text("two");
        p.print().await.unwrap();

        let jobs = jobs.lock().unwrap();
        assert_eq!(jobs[0], b"\x1b@one".to_vec());
        assert_eq!(jobs[1], b"two".to_vec());
    }

    #[tokio::test]
    async fn test_print_error_passes_through() {
        let mut p = Printer::new(MemoryTransport::failing("paper jam"));
        p.text("lost");
        let err = p.print().await.unwrap_err();
        assert!(matches!(err, ThermalsError::Transport(ref m) if m == "paper jam"));
        assert!(p.contents().is_empty());
    }
}
