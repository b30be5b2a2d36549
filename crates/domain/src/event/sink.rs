//! Line-oriented output sinks used by logging handlers.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Destination for human-readable lines written by event handlers.
pub trait LineSink: Send + Sync {
    fn write_line(&self, line: &str) -> std::io::Result<()>;
}

/// Writes each line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl LineSink for StdoutSink {
    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}")
    }
}

/// Records lines in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns how many times `line` was written.
    pub fn count(&self, line: &str) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|l| l.as_str() == line)
            .count()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LineSink for MemorySink {
    fn write_line(&self, line: &str) -> std::io::Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}
