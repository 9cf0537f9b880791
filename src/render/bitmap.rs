//! # Monochrome Bitmaps
//!
//! A decoded image reduced to one bit per pixel, plus the packed raster form
//! that the graphics commands send to the printer.
//!
//! ## Monochrome Conversion
//!
//! A pixel prints black only when it is dark *and* not transparent:
//!
//! ```text
//! grey  = ((r + g + b) / 3) >> 7        1 = light, 0 = dark
//! black = (1 - grey) & (alpha >> 6)     bit 0 only
//! ```
//!
//! Alpha is read with its top bit masked off (`alpha & 0x7F`, opaque = 127),
//! which makes the 64..=127 and 192..=255 bands count as opaque while
//! 0..=63 and 128..=191 count as transparent. The rule is kept bit-for-bit
//! so output stays comparable with existing print jobs.
//!
//! ## Raster Format
//!
//! ```text
//! Row 0:    d[0]          d[1]  ...  d[wb-1]
//! Row 1:    d[wb]         ...
//! ...
//! wb = ceil(width / 8), MSB = leftmost pixel, trailing bits zero
//! ```

use std::path::Path;
use std::sync::OnceLock;

use image::DynamicImage;

use crate::error::{Result, ThermalsError};

/// Alpha value reported for pixels of images without an alpha channel.
pub const OPAQUE_ALPHA: u8 = 0x7F;

/// Decide whether an RGBA pixel prints as a black dot.
///
/// ```
/// use thermals::render::bitmap::is_black;
///
/// assert!(is_black(0, 0, 0, 255));
/// assert!(!is_black(255, 255, 255, 255));
/// assert!(!is_black(0, 0, 0, 0));
/// ```
#[inline]
pub fn is_black(r: u8, g: u8, b: u8, alpha: u8) -> bool {
    let grey = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) >> 7;
    let alpha = u16::from(alpha & 0x7F) >> 6;
    (1 - grey) & alpha & 1 == 1
}

/// A width × height grid of 1-bit pixels (1 = black).
///
/// Dimensions are fixed at construction. The raster form is computed on
/// first use and cached.
#[derive(Debug, Clone)]
pub struct MonochromeBitmap {
    width: usize,
    height: usize,
    data: Vec<u8>,
    raster: OnceLock<Vec<u8>>,
}

/// `width * height`, rejecting empty and overflowing dimensions.
fn pixel_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(ThermalsError::Image(format!(
            "bitmap dimensions must be positive, got {width}x{height}"
        )));
    }
    width.checked_mul(height).ok_or_else(|| {
        ThermalsError::Image(format!("bitmap dimensions {width}x{height} are too large"))
    })
}

impl MonochromeBitmap {
    /// Build a bitmap from row-major pixel values. Any non-zero value is
    /// treated as black.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let count = pixel_count(width, height)?;
        if data.len() != count {
            return Err(ThermalsError::Image(format!(
                "expected {count} pixels for {width}x{height}, got {}",
                data.len()
            )));
        }
        let data = data.into_iter().map(|v| u8::from(v != 0)).collect();
        Ok(Self {
            width,
            height,
            data,
            raster: OnceLock::new(),
        })
    }

    /// Build a bitmap from a per-pixel RGBA accessor.
    pub fn from_rgba<F>(width: usize, height: usize, pixel: F) -> Result<Self>
    where
        F: Fn(usize, usize) -> [u8; 4],
    {
        let mut data = Vec::with_capacity(pixel_count(width, height)?);
        for y in 0..height {
            for x in 0..width {
                let [r, g, b, a] = pixel(x, y);
                data.push(u8::from(is_black(r, g, b, a)));
            }
        }
        Self::new(width, height, data)
    }

    /// Convert a decoded image. Images without alpha count as opaque.
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let has_alpha = image.color().has_alpha();
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width as usize, height as usize, |x, y| {
            let [r, g, b, a] = rgba.get_pixel(x as u32, y as u32).0;
            [r, g, b, if has_alpha { a } else { OPAQUE_ALPHA }]
        })
    }

    /// Decode an image file (PNG, JPEG, GIF, ...).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| ThermalsError::Image(format!("Failed to load {}: {e}", path.display())))?;
        Self::from_image(&image)
    }

    /// Decode an in-memory encoded image.
    pub fn from_memory(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| ThermalsError::Image(format!("Failed to decode image: {e}")))?;
        Self::from_image(&image)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per raster row: `ceil(width / 8)`.
    pub fn width_bytes(&self) -> usize {
        self.width.div_ceil(8)
    }

    /// Pixel value at (x, y): 1 = black, 0 = white. `None` outside the bitmap.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Packed raster bytes, computed once and cached.
    ///
    /// Fails with [`ThermalsError::RasterEncoding`] if the packed length is
    /// not `width_bytes() * height()`; that is a bug, never a caller error.
    pub fn to_raster_format(&self) -> Result<&[u8]> {
        if let Some(raster) = self.raster.get() {
            return Ok(raster.as_slice());
        }

        let raster: Vec<u8> = self
            .data
            .chunks(self.width)
            .flat_map(pack_row)
            .collect();

        let expected = self.width_bytes() * self.height;
        if raster.len() != expected {
            return Err(ThermalsError::RasterEncoding {
                expected,
                actual: raster.len(),
            });
        }

        Ok(self.raster.get_or_init(|| raster).as_slice())
    }
}

/// Pack one row of 0/1 pixels into bytes, MSB first, zero padded.
///
/// ```
/// use thermals::render::bitmap::pack_row;
///
/// assert_eq!(pack_row(&[1, 1, 1, 1, 0, 0, 0, 0]), vec![0xF0]);
/// assert_eq!(pack_row(&[1; 12]), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(pixels: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0u8; pixels.len().div_ceil(8)];
    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel != 0 {
            bytes[i / 8] |= 1 << (7 - (i % 8));
        }
    }
    bytes
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_is_black_luminance() {
        assert!(is_black(0, 0, 0, OPAQUE_ALPHA));
        assert!(is_black(127, 127, 127, OPAQUE_ALPHA));
        assert!(!is_black(128, 128, 128, OPAQUE_ALPHA));
        assert!(!is_black(255, 255, 255, OPAQUE_ALPHA));
    }

    #[test]
    fn test_is_black_alpha_bands() {
        assert!(!is_black(0, 0, 0, 0));
        assert!(!is_black(0, 0, 0, 63));
        assert!(is_black(0, 0, 0, 64));
        assert!(is_black(0, 0, 0, 127));
        assert!(!is_black(0, 0, 0, 128));
        assert!(!is_black(0, 0, 0, 191));
        assert!(is_black(0, 0, 0, 192));
        assert!(is_black(0, 0, 0, 255));
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(MonochromeBitmap::new(0, 1, vec![]).is_err());
        assert!(MonochromeBitmap::new(2, 2, vec![1, 0, 1]).is_err());
    }

    #[test]
    fn test_new_rejects_overflowing_dimensions() {
        assert!(matches!(
            MonochromeBitmap::new(usize::MAX, 2, vec![]),
            Err(ThermalsError::Image(_))
        ));
        let called = std::cell::Cell::new(false);
        let result = MonochromeBitmap::from_rgba(usize::MAX, usize::MAX, |_, _| {
            called.set(true);
            [0, 0, 0, 255]
        });
        assert!(matches!(result, Err(ThermalsError::Image(_))));
        assert!(!called.get());
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let bitmap = MonochromeBitmap::new(2, 1, vec![1, 0]).unwrap();
        assert_eq!(bitmap.pixel(0, 0), Some(1));
        assert_eq!(bitmap.pixel(2, 0), None);
        assert_eq!(bitmap.pixel(0, 1), None);
    }

    #[test]
    fn test_pack_row_padding() {
        assert_eq!(pack_row(&[1, 1, 1, 1]), vec![0xF0]);
        assert_eq!(pack_row(&[1; 9]), vec![0xFF, 0x80]);
        assert!(pack_row(&[]).is_empty());
    }

    #[test]
    fn test_raster_rows_are_padded_independently() {
        // 9 wide: each row gets its own trailing byte
        let mut data = vec![0u8; 18];
        data[8] = 1; // last pixel of row 0
        data[9] = 1; // first pixel of row 1
        let bitmap = MonochromeBitmap::new(9, 2, data).unwrap();
        assert_eq!(
            bitmap.to_raster_format().unwrap(),
            &[0x00, 0x80, 0x80, 0x00]
        );
    }

    #[test]
    fn test_raster_length() {
        for (w, h) in [(1, 1), (7, 3), (8, 8), (9, 1), (17, 5), (576, 2)] {
            let bitmap = MonochromeBitmap::new(w, h, vec![1; w * h]).unwrap();
            assert_eq!(bitmap.to_raster_format().unwrap().len(), w.div_ceil(8) * h);
        }
    }

    #[test]
    fn test_raster_is_memoized() {
        let bitmap = MonochromeBitmap::new(10, 3, vec![1; 30]).unwrap();
        let first = bitmap.to_raster_format().unwrap();
        let second = bitmap.to_raster_format().unwrap();
        assert_eq!(first, second);
        assert!(std::ptr::eq(first.as_ptr(), second.as_ptr()));
    }

    #[test]
    fn test_from_image_rgb_is_opaque() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        let bitmap = MonochromeBitmap::from_image(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(bitmap.pixel(0, 0), Some(1));
        assert_eq!(bitmap.pixel(1, 0), Some(0));
    }

    #[test]
    fn test_from_image_transparent_pixels_are_white() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        let bitmap = MonochromeBitmap::from_image(&DynamicImage::ImageRgba8(img)).unwrap();
        assert_eq!(bitmap.pixel(0, 0), Some(0));
        assert_eq!(bitmap.pixel(1, 0), Some(1));
    }

    #[test]
    fn test_from_memory_rejects_garbage() {
        assert!(matches!(
            MonochromeBitmap::from_memory(b"not an image"),
            Err(ThermalsError::Image(_))
        ));
    }
}
