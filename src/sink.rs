//! Where the game's informational logging goes.
//!
//! Nothing in this crate logs through a global. Each component is handed an `Arc<dyn Sink>` when it's built, and the
//! host decides where that leads: [`TracingSink`] to hook into a normal `tracing` setup, [`MemorySink`] to inspect
//! the records directly.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::Level;

use crate::constants::LOG_TARGET;

/// Something that accepts log records.
pub trait Sink: Send + Sync {
    /// Accept one record.
    fn record(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.record(Level::INFO, message)
    }

    fn debug(&self, message: &str) {
        self.record(Level::DEBUG, message)
    }
}

/// Forwards every record to `tracing`, under the crate's log target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn record(&self, level: Level, message: &str) {
        // `tracing` needs the level at compile time, hence the ladder
        if level == Level::ERROR {
            tracing::error!(target: LOG_TARGET, "{}", message);
        } else if level == Level::WARN {
            tracing::warn!(target: LOG_TARGET, "{}", message);
        } else if level == Level::INFO {
            tracing::info!(target: LOG_TARGET, "{}", message);
        } else if level == Level::DEBUG {
            tracing::debug!(target: LOG_TARGET, "{}", message);
        } else {
            tracing::trace!(target: LOG_TARGET, "{}", message);
        }
    }
}

/// Keeps every record in memory, in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poisoning is ignored: records are only ever pushed whole.
    fn lock(&self) -> MutexGuard<'_, Vec<(Level, String)>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything recorded so far.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.lock().clone()
    }

    /// Just the messages at exactly `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Sink for MemorySink {
    fn record(&self, level: Level, message: &str) {
        self.lock().push((level, message.to_owned()));
    }
}
