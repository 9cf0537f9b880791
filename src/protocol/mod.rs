//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS protocol
//! spoken by most thermal receipt printers. Every builder returns the
//! complete byte sequence for one command; nothing here keeps state.
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, cut, feed, pulse)
//! - [`text`]: Text styling and GB18030 transcoding
//! - [`barcode`]: Barcode registry, 1D barcodes and QR codes
//! - [`graphics`]: Raster images (`GS ( L` and `GS v 0`)
//! - [`codec`]: Little-endian length headers
//! - [`framing`]: `GS ( k` / `GS ( L` sub-protocol framing
//!
//! ## Usage Example
//!
//! ```
//! use thermals::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::justify(text::Justification::Center));
//! data.extend(text::emphasis(true));
//! data.extend(text::encode("RECEIPT\n"));
//! data.extend(text::emphasis(false));
//! data.extend(commands::cut(commands::CutMode::Partial, 3));
//!
//! assert_eq!(&data[..2], &[0x1B, 0x40]);
//! ```

pub mod barcode;
pub mod codec;
pub mod commands;
pub mod framing;
pub mod graphics;
pub mod text;
