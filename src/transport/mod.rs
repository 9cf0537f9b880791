//! # Printer Transport Layer
//!
//! This module provides the backends a print session flushes its buffer to.
//! A transport sees one complete job per [`Transport::write`] call and
//! reports success or failure; retries and pacing are its own business.
//!
//! ## Available Transports
//!
//! - [`file`]: writes each job to a device node or file, retrying on failure
//! - [`console`]: hex dump to stdout (or any writer)
//! - [`memory`]: records jobs in memory, for tests and previews
//!
//! ## Choosing a Transport
//!
//! A [`Connector`] is either an already constructed transport or a factory
//! that builds one from [`Settings`]. Built-in factories are looked up by
//! name; nothing is discovered at runtime.
//!
//! ```
//! use thermals::transport::{Connector, Settings};
//!
//! let settings = Settings::from_json_str(r#"{ "path": "/dev/usb/lp0", "retries": 5 }"#)?;
//! assert_eq!(settings.wait_time_ms, 200);
//!
//! let connector = Connector::builtin("console")?;
//! let _transport = connector.resolve(&settings)?;
//! # Ok::<(), thermals::ThermalsError>(())
//! ```

pub mod console;
pub mod file;
pub mod memory;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{Result, ThermalsError};

pub use console::ConsoleTransport;
pub use file::FileTransport;
pub use memory::MemoryTransport;

/// Something a finished print job can be written to.
#[async_trait]
pub trait Transport: Send {
    /// Deliver one complete job. Errors are surfaced to the caller as-is.
    async fn write(&mut self, data: &[u8]) -> Result<()>;
}

fn default_retries() -> u32 {
    1000
}

fn default_wait_time_ms() -> u64 {
    200
}

/// Transport settings, usually loaded from a JSON file.
///
/// ```json
/// { "connector": "file", "path": "/dev/usb/lp0", "retries": 1000, "wait_time_ms": 200 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Built-in connector name, `file` or `console`
    #[serde(default)]
    pub connector: Option<String>,
    /// Device or file path for the file transport
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Extra attempts after the first failed write
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Pause between attempts and between jobs
    #[serde(default = "default_wait_time_ms")]
    pub wait_time_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connector: None,
            path: None,
            retries: default_retries(),
            wait_time_ms: default_wait_time_ms(),
        }
    }
}

impl Settings {
    /// Settings for a file transport writing to `path`, other fields default.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ThermalsError::Config(format!("Invalid settings: {e}")))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ThermalsError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }
}

/// Builds a transport from settings.
pub type TransportFactory = fn(&Settings) -> Result<Box<dyn Transport>>;

/// How a print session gets hold of its transport.
pub enum Connector {
    /// A transport constructed by the caller
    Instance(Box<dyn Transport>),
    /// A constructor invoked with the session's settings
    Factory(TransportFactory),
}

impl Connector {
    /// Look up a built-in connector: `file` or `console`.
    pub fn builtin(name: &str) -> Result<Self> {
        let factory: TransportFactory = match name.to_ascii_lowercase().as_str() {
            "file" => file_factory,
            "console" => console_factory,
            other => {
                return Err(ThermalsError::Config(format!("Unknown connector: {other}")));
            }
        };
        Ok(Connector::Factory(factory))
    }

    /// Produce the transport, calling the factory if there is one.
    pub fn resolve(self, settings: &Settings) -> Result<Box<dyn Transport>> {
        match self {
            Connector::Instance(transport) => Ok(transport),
            Connector::Factory(factory) => factory(settings),
        }
    }
}

fn file_factory(settings: &Settings) -> Result<Box<dyn Transport>> {
    Ok(Box::new(FileTransport::from_settings(settings)?))
}

fn console_factory(_settings: &Settings) -> Result<Box<dyn Transport>> {
    Ok(Box::new(ConsoleTransport::stdout()))
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Connector::Instance(_) => f.write_str("Connector::Instance"),
            Connector::Factory(_) => f.write_str("Connector::Factory"),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::from_json_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.retries, 1000);
        assert_eq!(settings.wait_time_ms, 200);
    }

    #[test]
    fn test_settings_from_json() {
        let json = r#"{"connector":"file","path":"/tmp/out.bin","wait_time_ms":5}"#;
        let settings = Settings::from_json_str(json).unwrap();
        assert_eq!(settings.connector.as_deref(), Some("file"));
        assert_eq!(settings.path, Some(PathBuf::from("/tmp/out.bin")));
        assert_eq!(settings.retries, 1000);
        assert_eq!(settings.wait_time_ms, 5);
    }

    #[test]
    fn test_settings_rejects_bad_json() {
        assert!(matches!(
            Settings::from_json_str(r#"{"retries":"many"}"#),
            Err(ThermalsError::Config(_))
        ));
    }

    #[test]
    fn test_unknown_connector() {
        assert!(matches!(
            Connector::builtin("serial"),
            Err(ThermalsError::Config(_))
        ));
    }

    #[test]
    fn test_file_connector_requires_path() {
        let connector = Connector::builtin("file").unwrap();
        assert!(matches!(
            connector.resolve(&Settings::default()),
            Err(ThermalsError::Config(_))
        ));
    }

    #[test]
    fn test_instance_connector_passes_through() {
        let (transport, jobs) = MemoryTransport::new();
        let connector = Connector::Instance(Box::new(transport));
        assert!(connector.resolve(&Settings::default()).is_ok());
        assert!(jobs.lock().unwrap().is_empty());
    }
}
