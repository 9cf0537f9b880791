//! # Console Transport
//!
//! Prints each job as a hex dump instead of sending it anywhere. Handy for
//! checking what a session would send without a printer attached.
//!
//! ```text
//! 00000000  1b 40 48 65 6c 6c 6f 0a  1d 56 41 03              |.@Hello..VA.|
//! ```

use std::io::{self, Write};

use async_trait::async_trait;

use super::Transport;
use crate::error::Result;

const BYTES_PER_LINE: usize = 16;

pub struct ConsoleTransport {
    out: Box<dyn Write + Send>,
}

impl ConsoleTransport {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: Box::new(writer),
        }
    }
}

impl std::fmt::Debug for ConsoleTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleTransport").finish_non_exhaustive()
    }
}

/// Format bytes as `offset  hex  |ascii|` lines.
pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::new();
    for (line, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        out.push_str(&format!("{:08x} ", line * BYTES_PER_LINE));
        for i in 0..BYTES_PER_LINE {
            if i == BYTES_PER_LINE / 2 {
                out.push(' ');
            }
            match chunk.get(i) {
                Some(b) => out.push_str(&format!(" {b:02x}")),
                None => out.push_str("   "),
            }
        }
        out.push_str("  |");
        out.extend(chunk.iter().map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '.'
            }
        }));
        out.push_str("|\n");
    }
    out
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn write(&mut self, data: &[u8]) -> Result<()> {
        log::debug!("Dumping {} bytes to console", data.len());
        self.out.write_all(hex_dump(data).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
