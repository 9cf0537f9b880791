//! # Command Encoder
//!
//! [`Escpos`] turns one printer capability at a time into ESC/POS bytes and
//! appends them to a [`Sink`]. It holds no state of its own; everything it
//! knows about the job lives in the sink.
//!
//! Every operation builds its complete byte sequence first and appends it in
//! one call, so an error (unknown mode name, oversized payload, ...) leaves
//! the sink untouched.
//!
//! ```
//! use thermals::encoder::Escpos;
//! use thermals::protocol::commands::CutMode;
//!
//! let escpos = Escpos;
//! let mut out = Vec::new();
//! escpos.text(&mut out, "Hello\n");
//! escpos.cut(&mut out, CutMode::Full, 3);
//! assert_eq!(out, b"Hello\n\x1dVA\x03");
//!
//! assert!(escpos.select_print_mode(&mut out, Some("bogus")).is_err());
//! assert_eq!(out.len(), 10);
//! ```

use crate::error::Result;
use crate::protocol::barcode::qr::{self, QrLevel, QrModel};
use crate::protocol::barcode::{self, BarcodeSpec, BarcodeTextPosition};
use crate::protocol::commands::{self, CutMode, DrawerPin};
use crate::protocol::graphics::{self, ImageSize};
use crate::protocol::text::{self, Font, Justification, PrintMode, Underline};
use crate::render::MonochromeBitmap;

/// Append-only byte destination for encoded commands.
pub trait Sink {
    fn append(&mut self, bytes: &[u8]);
}

impl Sink for Vec<u8> {
    fn append(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Options for the framed QR Code command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrCodeOptions {
    pub level: QrLevel,
    /// Module size in dots
    pub size: u8,
    pub model: QrModel,
}

impl Default for QrCodeOptions {
    fn default() -> Self {
        Self {
            level: QrLevel::L,
            size: 3,
            model: QrModel::Model2,
        }
    }
}

impl QrCodeOptions {
    /// Build options from loose names: unknown levels fall back to `L`,
    /// unknown models to model 2.
    pub fn from_names(level: &str, size: u8, model: &str) -> Self {
        Self {
            level: QrLevel::from_name_or_default(level),
            size,
            model: QrModel::from_name(model),
        }
    }
}

/// Options for the legacy single-frame QR command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOptions {
    pub level: QrLevel,
    /// Module size in dots
    pub size: u8,
    /// Symbol version, 0 lets the printer choose
    pub version: u8,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            level: QrLevel::L,
            size: 6,
            version: 3,
        }
    }
}

/// Stateless ESC/POS command encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Escpos;

impl Escpos {
    fn emit(sink: &mut dyn Sink, bytes: &[u8]) {
        log::trace!("escpos: {} bytes {:02X?}", bytes.len(), &bytes[..bytes.len().min(16)]);
        sink.append(bytes);
    }

    /// `ESC @`
    pub fn initialize(&self, sink: &mut dyn Sink) {
        Self::emit(sink, &commands::init());
    }

    /// Text, transcoded to GB18030.
    pub fn text(&self, sink: &mut dyn Sink, text: &str) {
        Self::emit(sink, &text::encode(text));
    }

    /// Bytes passed through verbatim, for use with a manually selected table.
    pub fn text_raw(&self, sink: &mut dyn Sink, bytes: &[u8]) {
        Self::emit(sink, bytes);
    }

    pub fn cut(&self, sink: &mut dyn Sink, mode: CutMode, lines: u8) {
        Self::emit(sink, &commands::cut(mode, lines));
    }

    pub fn feed(&self, sink: &mut dyn Sink, lines: u8) {
        Self::emit(sink, &commands::feed(lines));
    }

    pub fn feed_form(&self, sink: &mut dyn Sink) {
        Self::emit(sink, &commands::feed_form());
    }

    pub fn feed_reverse(&self, sink: &mut dyn Sink, lines: u8) {
        Self::emit(sink, &commands::feed_reverse(lines));
    }

    /// Barcode data is expected to be validated against `spec` already.
    pub fn barcode(&self, sink: &mut dyn Sink, data: &str, spec: &BarcodeSpec) -> Result<()> {
        let cmd = barcode::barcode(spec, data.as_bytes())?;
        Self::emit(sink, &cmd);
        Ok(())
    }

    /// Cash drawer pulse. Times are milliseconds.
    pub fn pulse(&self, sink: &mut dyn Sink, pin: DrawerPin, on_ms: u16, off_ms: u16) {
        Self::emit(sink, &commands::pulse(pin, on_ms, off_ms));
    }

    pub fn graphics(
        &self,
        sink: &mut dyn Sink,
        bitmap: &MonochromeBitmap,
        size: ImageSize,
    ) -> Result<()> {
        let cmd = graphics::graphics(bitmap, size)?;
        Self::emit(sink, &cmd);
        Ok(())
    }

    pub fn bit_image(
        &self,
        sink: &mut dyn Sink,
        bitmap: &MonochromeBitmap,
        size: ImageSize,
    ) -> Result<()> {
        let cmd = graphics::bit_image(bitmap, size)?;
        Self::emit(sink, &cmd);
        Ok(())
    }

    /// Framed (`GS ( k`) QR Code. Content is sent as UTF-8.
    pub fn qr_code(
        &self,
        sink: &mut dyn Sink,
        content: &str,
        options: &QrCodeOptions,
    ) -> Result<()> {
        let cmd = qr::qr_code(content.as_bytes(), options.level, options.size, options.model)?;
        Self::emit(sink, &cmd);
        Ok(())
    }

    /// Legacy (`ESC Z`) QR Code. Content is sent as UTF-8.
    pub fn qr(&self, sink: &mut dyn Sink, content: &str, options: &QrOptions) -> Result<()> {
        let cmd = qr::qr_legacy(
            content.as_bytes(),
            options.version,
            options.level,
            options.size,
        )?;
        Self::emit(sink, &cmd);
        Ok(())
    }

    /// Select one named print mode; `None` resets to Font A.
    pub fn select_print_mode(&self, sink: &mut dyn Sink, mode: Option<&str>) -> Result<()> {
        let mode = match mode {
            Some(name) => PrintMode::by_name(name)?,
            None => PrintMode::empty(),
        };
        self.set_print_mode(sink, mode);
        Ok(())
    }

    /// Select an explicit combination of print mode flags.
    pub fn set_print_mode(&self, sink: &mut dyn Sink, mode: PrintMode) {
        Self::emit(sink, &text::print_mode(mode));
    }

    /// `left`, `center` or `right`; `None` resets to left.
    pub fn set_align(&self, sink: &mut dyn Sink, justification: Option<&str>) -> Result<()> {
        let justification = match justification {
            Some(name) => name.parse()?,
            None => Justification::default(),
        };
        Self::emit(sink, &text::justify(justification));
        Ok(())
    }

    /// `font-a`, `font-b` or `font-c`; `None` resets to Font A.
    pub fn set_font(&self, sink: &mut dyn Sink, font: Option<&str>) -> Result<()> {
        let font = match font {
            Some(name) => name.parse()?,
            None => Font::default(),
        };
        Self::emit(sink, &text::font(font));
        Ok(())
    }

    /// `none`, `single` or `double` (`true`/`false` also accepted).
    pub fn set_underline(&self, sink: &mut dyn Sink, underline: &str) -> Result<()> {
        let underline: Underline = underline.parse()?;
        Self::emit(sink, &text::underline(underline));
        Ok(())
    }

    /// `none`, `above`, `below` or `both`.
    pub fn set_barcode_text_position(&self, sink: &mut dyn Sink, position: &str) -> Result<()> {
        let position: BarcodeTextPosition = position.parse()?;
        Self::emit(sink, &barcode::text_position(position));
        Ok(())
    }

    pub fn set_emphasis(&self, sink: &mut dyn Sink, on: bool) {
        Self::emit(sink, &text::emphasis(on));
    }

    pub fn set_double_strike(&self, sink: &mut dyn Sink, on: bool) {
        Self::emit(sink, &text::double_strike(on));
    }

    pub fn set_reverse_colors(&self, sink: &mut dyn Sink, on: bool) {
        Self::emit(sink, &text::reverse_colors(on));
    }

    pub fn set_barcode_height(&self, sink: &mut dyn Sink, height: u8) {
        Self::emit(sink, &barcode::height(height));
    }

    pub fn set_barcode_width(&self, sink: &mut dyn Sink, width: u8) {
        Self::emit(sink, &barcode::width(width));
    }

    pub fn set_text_size(&self, sink: &mut dyn Sink, width: u8, height: u8) {
        Self::emit(sink, &text::text_size(width, height));
    }

    pub fn select_character_table(&self, sink: &mut dyn Sink, table: u8) {
        Self::emit(sink, &commands::select_character_table(table));
    }

    pub fn set_line_spacing(&self, sink: &mut dyn Sink, height: Option<u8>) {
        Self::emit(sink, &commands::line_spacing(height));
    }

    pub fn set_print_left_margin(&self, sink: &mut dyn Sink, margin: u16) {
        Self::emit(sink, &commands::left_margin(margin));
    }

    pub fn set_print_width(&self, sink: &mut dyn Sink, width: u16) {
        Self::emit(sink, &commands::print_width(width));
    }

    pub fn set_color(&self, sink: &mut dyn Sink, second: bool) {
        Self::emit(sink, &commands::color(second));
    }
}

// ============================================================================
// TESTS
// ============================================================================
