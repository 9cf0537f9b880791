//! # Thermals CLI
//!
//! Command-line interface for ESC/POS receipt printing.
//!
//! ## Usage
//!
//! ```bash
//! # Print a line of text to a USB printer
//! thermals --path /dev/usb/lp0 text "Hello, 世界"
//!
//! # Dump the bytes instead of printing
//! thermals --connector console barcode --kind EAN13 400638133393
//!
//! # QR code for older firmware
//! thermals --path /dev/usb/lp0 qr --legacy --level h https://example.com
//!
//! # Print an image with the GS v 0 command
//! thermals --settings printer.json image --bit-image logo.png
//!
//! # Everything at once
//! thermals --connector console demo
//! ```
//!
//! Set `RUST_LOG=debug` to see transport activity.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use thermals::{
    MonochromeBitmap, Printer, PrinterProfile, ThermalsError,
    printer::{QrCodeParams, QrParams},
    transport::{Connector, Settings},
};

/// Thermals - ESC/POS receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "thermals")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Transport to use: file or console (default: settings, then file)
    #[arg(long, global = true)]
    connector: Option<String>,

    /// Printer device or output file for the file connector
    #[arg(long, global = true, value_name = "PATH")]
    path: Option<PathBuf>,

    /// JSON settings file (connector, path, retries, wait_time_ms)
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Printer profile: default, simple, TM-T20, SP-POS88V
    #[arg(long, global = true, default_value = "default")]
    profile: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a line of text
    Text {
        text: String,

        /// Alignment: left, center, right
        #[arg(long)]
        align: Option<String>,
    },

    /// Print a 1D barcode
    Barcode {
        data: String,

        /// Symbology (UPCA, EAN13, CODE39, CODE128, ...)
        #[arg(long, default_value = "CODE39")]
        kind: String,

        /// Bar height in dots
        #[arg(long)]
        height: Option<u32>,
    },

    /// Print a QR code
    Qr {
        data: String,

        /// Error correction: l, m, q, h
        #[arg(long, default_value = "l")]
        level: String,

        /// Module size in dots (1-16)
        #[arg(long)]
        size: Option<u32>,

        /// Use the single-frame command for older firmware
        #[arg(long)]
        legacy: bool,
    },

    /// Print an image file
    Image {
        file: PathBuf,

        /// default, double-width, double-height, double
        #[arg(long, default_value = "default")]
        size: String,

        /// Use GS v 0 instead of GS ( L
        #[arg(long)]
        bit_image: bool,
    },

    /// Print a sample receipt exercising most commands
    Demo,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ThermalsError> {
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::from_json_file(path)?,
        None => Settings::default(),
    };
    if cli.path.is_some() {
        settings.path = cli.path.clone();
    }

    let connector_name = cli
        .connector
        .clone()
        .or_else(|| settings.connector.clone())
        .unwrap_or_else(|| "file".to_string());
    let profile = PrinterProfile::by_name(&cli.profile).ok_or_else(|| {
        ThermalsError::Config(format!("Unknown printer profile: {}", cli.profile))
    })?;

    let connector = Connector::builtin(&connector_name)?;
    let mut printer = Printer::from_connector(connector, &settings)?.with_profile(profile);

    printer.initialize();
    match cli.command {
        Commands::Text { text, align } => {
            printer.set_align(align.as_deref())?.textln(&text);
        }
        Commands::Barcode { data, kind, height } => {
            printer
                .set_barcode_height(height)?
                .set_barcode_text_position("below")?
                .barcode(&data, Some(&kind))?;
        }
        Commands::Qr {
            data,
            level,
            size,
            legacy,
        } => {
            if legacy {
                let params = QrParams {
                    level: Some(&level),
                    size,
                    version: None,
                };
                printer.qr(&data, params)?;
            } else {
                let params = QrCodeParams {
                    level: Some(&level),
                    size,
                    model: None,
                };
                printer.qr_code(&data, params)?;
            }
        }
        Commands::Image {
            file,
            size,
            bit_image,
        } => {
            let bitmap = MonochromeBitmap::open(&file)?;
            if bit_image {
                printer.bit_image(&bitmap, Some(&size))?;
            } else {
                printer.graphics(&bitmap, Some(&size))?;
            }
        }
        Commands::Demo => demo(&mut printer)?,
    }
    printer.feed(Some(2))?.cut(None, None)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(printer.print())?;
    println!("Printed successfully!");
    Ok(())
}

/// Sample receipt: styles, sizes, a barcode and a QR code.
fn demo(printer: &mut Printer) -> Result<(), ThermalsError> {
    printer
        .set_align(Some("center"))?
        .set_text_size(2, 2)?
        .textln("THERMALS")
        .set_text_size(1, 1)?
        .textln("ESC/POS demo receipt");
    printer.set_align(None)?.feed(None)?;

    let modes = [
        "font-a",
        "font-b",
        "emphasized",
        "double-height",
        "double-width",
        "underline",
    ];
    for mode in modes {
        printer.select_print_mode(Some(mode))?.textln(mode);
    }
    printer.select_print_mode(None)?;

    printer
        .set_emphasis(true)
        .text("emphasis ")
        .set_emphasis(false)
        .set_double_strike(true)
        .text("double-strike ")
        .set_double_strike(false)
        .set_reverse_colors(true)
        .textln(" reverse ")
        .set_reverse_colors(false);
    printer
        .set_underline(Some("double"))?
        .textln("double underline")
        .set_underline(Some("none"))?;
    printer.textln("中文 GB18030");
    printer.feed(None)?;

    printer
        .set_align(Some("center"))?
        .set_barcode_height(Some(60))?
        .set_barcode_text_position("below")?
        .barcode("THERMALS-01", None)?
        .feed(None)?
        .qr_code("https://github.com/", QrCodeParams::default())?
        .set_align(None)?;
    Ok(())
}
