//! # ESC/POS Graphics Commands
//!
//! Two ways of printing a [`MonochromeBitmap`]:
//!
//! | Mode | Command | Notes |
//! |------|---------|-------|
//! | Graphics | GS ( L fn 112 + fn 50 | Framed store-then-print, newer firmware |
//! | Bit image | GS v 0 | Older raster command, widely supported |
//!
//! ## Bit Packing
//!
//! Both commands use the row-major raster from
//! [`MonochromeBitmap::to_raster_format`]:
//! - Bit 7 (MSB) = leftmost dot
//! - 1 = black (print), 0 = white
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```

use super::codec::encode_low_high;
use super::commands::GS;
use super::framing;
use crate::error::{Result, ThermalsError};
use crate::render::MonochromeBitmap;

/// Output scaling for printed images
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    #[default]
    Default = 0,
    DoubleWidth = 1,
    DoubleHeight = 2,
    Double = 3,
}

impl ImageSize {
    pub fn double_width(self) -> bool {
        (self as u8) & (ImageSize::DoubleWidth as u8) != 0
    }

    pub fn double_height(self) -> bool {
        (self as u8) & (ImageSize::DoubleHeight as u8) != 0
    }
}

impl std::str::FromStr for ImageSize {
    type Err = ThermalsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "normal" => Ok(ImageSize::Default),
            "double-width" => Ok(ImageSize::DoubleWidth),
            "double-height" => Ok(ImageSize::DoubleHeight),
            "double" => Ok(ImageSize::Double),
            _ => Err(ThermalsError::InvalidImageSize(s.to_string())),
        }
    }
}

fn dimension(value: usize) -> Result<Vec<u8>> {
    encode_low_high(value as u64, 2)
}

/// # Store and Print Graphics (GS ( L)
///
/// Stores the raster in the print buffer with function `'p'`, then prints
/// it with function `'2'`. The stored payload is:
///
/// | Field | Value |
/// |-------|-------|
/// | a (tone) | `'0'` monochrome |
/// | bx | 1 or 2 (horizontal scale) |
/// | by | 1 or 2 (vertical scale) |
/// | c (colour) | `'1'` first colour |
/// | xL xH | width in dots |
/// | yL yH | height in dots |
/// | d1...dk | raster data |
///
/// ```
/// use thermals::protocol::graphics::{graphics, ImageSize};
/// use thermals::render::MonochromeBitmap;
///
/// let bitmap = MonochromeBitmap::new(8, 1, vec![1; 8]).unwrap();
/// let cmd = graphics(&bitmap, ImageSize::Default).unwrap();
/// assert_eq!(&cmd[..7], &[0x1D, 0x28, 0x4C, 11, 0, b'0', b'p']);
/// ```
pub fn graphics(bitmap: &MonochromeBitmap, size: ImageSize) -> Result<Vec<u8>> {
    let raster = bitmap.to_raster_format()?;
    let bx = if size.double_width() { 2 } else { 1 };
    let by = if size.double_height() { 2 } else { 1 };

    let mut payload = Vec::with_capacity(8 + raster.len());
    payload.extend_from_slice(&[b'0', bx, by, b'1']);
    payload.extend(dimension(bitmap.width())?);
    payload.extend(dimension(bitmap.height())?);
    payload.extend_from_slice(raster);

    let mut cmd = framing::graphics_data(b"0", b"p", &payload)?;
    cmd.extend(framing::graphics_data(b"0", b"2", b"")?);
    Ok(cmd)
}

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH data |
/// | Hex     | 1D 76 30 m xL xH yL yH data |
///
/// `x` is the width in **bytes**, `y` the height in dots. `m` is the
/// [`ImageSize`] value. Images whose width is not a multiple of 8 get white
/// padding on the right.
pub fn bit_image(bitmap: &MonochromeBitmap, size: ImageSize) -> Result<Vec<u8>> {
    let raster = bitmap.to_raster_format()?;

    let mut cmd = Vec::with_capacity(8 + raster.len());
    cmd.extend_from_slice(&[GS, b'v', b'0', size as u8]);
    cmd.extend(dimension(bitmap.width_bytes())?);
    cmd.extend(dimension(bitmap.height())?);
    cmd.extend_from_slice(raster);
    Ok(cmd)
}

// ============================================================================
// TESTS
// ============================================================================
