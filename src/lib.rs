//! # Thermals - ESC/POS Receipt Printer Library
//!
//! Thermals builds ESC/POS command streams for thermal receipt printers and
//! delivers them to the printer. It provides:
//!
//! - **Protocol implementation**: ESC/POS command builders and framing
//! - **Command encoder**: one call per printer capability, appended to a sink
//! - **Print session**: argument validation, defaults, job buffering
//! - **Images**: monochrome conversion and raster packing
//! - **Transport**: file/device, console and in-memory backends
//!
//! ## Quick Start
//!
//! ```no_run
//! use thermals::{Printer, PrinterProfile};
//! use thermals::transport::FileTransport;
//!
//! # #[tokio::main]
//! # async fn main() -> thermals::Result<()> {
//! let mut printer = Printer::new(FileTransport::new("/dev/usb/lp0"))
//!     .with_profile(PrinterProfile::TM_T20);
//!
//! printer
//!     .initialize()
//!     .set_align(Some("center"))?
//!     .select_print_mode(Some("double-height"))?
//!     .textln("RECEIPT")
//!     .select_print_mode(None)?
//!     .barcode("012345678905", Some("UPCA"))?
//!     .cut(None, None)?;
//!
//! printer.print().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`encoder`] | Stateless command encoder over a byte sink |
//! | [`printer`] | Print session and printer profiles |
//! | [`render`] | Monochrome bitmaps |
//! | [`transport`] | Communication backends |
//! | [`error`] | Error types |
//!
//! ## Text Encoding
//!
//! Text is always sent as GB18030, which is what the supported printer
//! firmware expects. Use [`Printer::text_raw`] with
//! [`Printer::select_character_table`] for anything else.

pub mod encoder;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod transport;

// Re-exports for convenience
pub use encoder::{Escpos, Sink};
pub use error::{Result, ThermalsError};
pub use printer::{Printer, PrinterProfile};
pub use render::MonochromeBitmap;
