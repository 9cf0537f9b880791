//! # File Transport
//!
//! Writes each print job to a path, typically a printer device node such as
//! `/dev/usb/lp0`. Device nodes often refuse writes while the printer is
//! busy or still enumerating, so a failed write is retried after a pause.
//!
//! ## Job Handling
//!
//! ```text
//! write(job) ──► wait until `wait_time` since previous job
//!                 │
//!                 ▼
//!            fs::write(path, job) ──ok──► done
//!                 │ err
//!                 ▼
//!            attempts > retries? ──yes──► Err(Transport)
//!                 │ no
//!                 └── sleep(wait_time), try again
//! ```
//!
//! Jobs are written strictly one after another: `write` takes `&mut self`
//! and does not return until the job is on disk or has been given up.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::{Settings, Transport};
use crate::error::{Result, ThermalsError};

/// # File Transport
///
/// ## Example
///
/// ```no_run
/// use thermals::transport::{FileTransport, Transport};
///
/// # async fn run() -> thermals::Result<()> {
/// let mut transport = FileTransport::new("/dev/usb/lp0");
/// transport.write(b"\x1b@Hello\n").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct FileTransport {
    path: PathBuf,
    retries: u32,
    wait_time: Duration,
    last_write: Option<Instant>,
    jobs_written: u64,
}

impl FileTransport {
    /// Transport for `path` with the default retry policy.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let defaults = Settings::default();
        Self {
            path: path.into(),
            retries: defaults.retries,
            wait_time: Duration::from_millis(defaults.wait_time_ms),
            last_write: None,
            jobs_written: 0,
        }
    }

    /// Build from settings. Fails if no path is configured.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let path = settings
            .path
            .clone()
            .ok_or_else(|| ThermalsError::Config("file connector requires a path".into()))?;
        Ok(Self::new(path)
            .with_retries(settings.retries)
            .with_wait_time(Duration::from_millis(settings.wait_time_ms)))
    }

    /// Extra attempts after the first failure.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Pause between attempts, and minimum spacing between jobs.
    pub fn with_wait_time(mut self, wait_time: Duration) -> Self {
        self.wait_time = wait_time;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of jobs successfully written so far.
    pub fn jobs_written(&self) -> u64 {
        self.jobs_written
    }

    async fn pace(&self) {
        if let Some(last) = self.last_write {
            let ready = last + self.wait_time;
            if Instant::now() < ready {
                tokio::time::sleep_until(ready).await;
            }
        }
    }
}

#[async_trait]
impl Transport for FileTransport {
    async fn write(&mut self, data: &[u8]) -> Result<()> {
        self.pace().await;

        let job = self.jobs_written;
        let mut retried = 0u32;
        loop {
            log::debug!(
                "Writing job #{job} ({} bytes) to {}",
                data.len(),
                self.path.display()
            );
            match tokio::fs::write(&self.path, data).await {
                Ok(()) => {
                    self.last_write = Some(Instant::now());
                    self.jobs_written += 1;
                    return Ok(());
                }
                Err(e) => {
                    if retried >= self.retries {
                        log::warn!(
                            "Giving up on job #{job} after {} attempts: {e}",
                            retried + 1
                        );
                        self.last_write = Some(Instant::now());
                        return Err(ThermalsError::Transport(format!(
                            "Failed to write {}: {e}",
                            self.path.display()
                        )));
                    }
                    retried += 1;
                    log::debug!(
                        "Write of job #{job} failed ({e}), retry {retried}/{}",
                        self.retries
                    );
                    tokio::time::sleep(self.wait_time).await;
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("thermals-{name}-{}.bin", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_write_creates_file() {
        let path = temp_path("write");
        let mut transport = FileTransport::new(&path).with_wait_time(Duration::ZERO);

        transport.write(b"\x1b@hello").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"\x1b@hello");
        assert_eq!(transport.jobs_written(), 1);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_gives_up_after_retries() {
        let path = std::env::temp_dir()
            .join(format!("thermals-missing-{}", uuid::Uuid::new_v4()))
            .join("lp0");
        let mut transport = FileTransport::new(&path)
            .with_retries(2)
            .with_wait_time(Duration::from_millis(1));

        let err = transport.write(b"x").await.unwrap_err();
        assert!(matches!(err, ThermalsError::Transport(_)));
        assert_eq!(transport.jobs_written(), 0);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            retries: 3,
            wait_time_ms: 10,
            ..Settings::for_path("/dev/usb/lp0")
        };
        let transport = FileTransport::from_settings(&settings).unwrap();
        assert_eq!(transport.path(), Path::new("/dev/usb/lp0"));
        assert_eq!(transport.retries, 3);
        assert_eq!(transport.wait_time, Duration::from_millis(10));
    }
}
