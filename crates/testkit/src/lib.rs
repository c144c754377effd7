#![warn(missing_docs)]
//! Deterministic testing surfaces: a scripted host, an event recorder and
//! event-log plumbing.

mod frames;
mod host;
mod recorder;
mod snapshot;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub use frames::*;
pub use host::*;
pub use recorder::*;
pub use snapshot::*;

/// A notification tagged with the frame it was dispatched on.
#[derive(Debug, Serialize)]
pub struct FrameEvent<'a> {
    /// Zero-based frame index.
    pub frame: u64,
    /// The notification.
    #[serde(flatten)]
    pub event: &'a RecordedEvent,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent directories if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create event log {}", path.display()))?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &FrameEvent<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
