//! # Memory Transport
//!
//! Records every job in a shared list. The list handle stays with the
//! caller, so jobs can be inspected after the transport has been moved
//! into a print session.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::Transport;
use crate::error::{Result, ThermalsError};

/// Jobs written so far, oldest first.
pub type Jobs = Arc<Mutex<Vec<Vec<u8>>>>;

#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    jobs: Jobs,
    fail_with: Option<String>,
}

impl MemoryTransport {
    /// New transport plus a handle to the jobs it receives.
    pub fn new() -> (Self, Jobs) {
        let transport = Self::default();
        let jobs = Arc::clone(&transport.jobs);
        (transport, jobs)
    }

    /// A transport whose every write fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            jobs: Jobs::default(),
            fail_with: Some(message.into()),
        }
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn write(&mut self, data: &[u8]) -> Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(ThermalsError::Transport(message.clone()));
        }
        let mut jobs = self
            .jobs
            .lock()
            .map_err(|_| ThermalsError::Transport("job list poisoned".into()))?;
        jobs.push(data.to_vec());
        Ok(())
    }
}
