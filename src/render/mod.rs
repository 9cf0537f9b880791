//! # Rendering Module
//!
//! Image data in the shape the printer wants it.
//!
//! ## Modules
//!
//! - [`bitmap`]: monochrome conversion and memoized raster packing
//!
//! ## Usage Example
//!
//! ```
//! use thermals::render::MonochromeBitmap;
//!
//! // 16x2 image, left half black
//! let pixels: Vec<u8> = (0..32).map(|i| u8::from(i % 16 < 8)).collect();
//! let bitmap = MonochromeBitmap::new(16, 2, pixels)?;
//!
//! assert_eq!(bitmap.to_raster_format()?, &[0xFF, 0x00, 0xFF, 0x00]);
//! # Ok::<(), thermals::ThermalsError>(())
//! ```

pub mod bitmap;

pub use bitmap::MonochromeBitmap;
