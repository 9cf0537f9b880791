//! # Printer Module
//!
//! The print session and the printer profiles it validates against.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware profiles
//! - [`session`]: Validating, buffering print session

pub mod config;
pub mod session;

pub use config::{CharacterTables, PrinterProfile};
pub use session::{Printer, QrCodeParams, QrParams};
