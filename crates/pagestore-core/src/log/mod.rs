// # Logging Sinks
//
// Implementations of the LogSink trait.
//
// ## Process-wide sink
//
// [`global`] hands out one `TracingLog` per process. The first call decides
// verbosity; the instance is never reset, so later calls with a different
// flag get the existing sink back. Components receive the sink as an
// `Arc<dyn LogSink>` instead of reaching for the global themselves, which
// keeps them testable with [`MemoryLog`].

use std::sync::{Arc, Mutex, OnceLock};

use tracing::{debug, info};

use crate::traits::LogSink;

/// `tracing` target used for every line written through a sink
pub const LOG_TARGET: &str = "pagestore";

static GLOBAL: OnceLock<Arc<TracingLog>> = OnceLock::new();

/// Get the process-wide logging sink, creating it on first use
///
/// # Parameters
///
/// - `verbose`: Whether `write_debug` lines are emitted. Only honored by the
///   call that initializes the sink.
pub fn global(verbose: bool) -> Arc<TracingLog> {
    GLOBAL
        .get_or_init(|| Arc::new(TracingLog::new(verbose)))
        .clone()
}

/// Log sink forwarding to `tracing`
///
/// `write` maps to `info!`, `write_debug` to `debug!`. Debug lines are
/// dropped before reaching `tracing` unless the sink is verbose.
#[derive(Debug, Clone)]
pub struct TracingLog {
    verbose: bool,
}

impl TracingLog {
    /// Create a new sink
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Whether debug lines are emitted
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

impl LogSink for TracingLog {
    fn write(&self, line: &str) {
        info!(target: LOG_TARGET, "{}", line);
    }

    fn write_debug(&self, line: &str) {
        if self.verbose {
            debug!(target: LOG_TARGET, "{}", line);
        }
    }
}

/// In-memory log sink
///
/// Captures every emitted line. Useful for tests and for embedding
/// applications that want to inspect what collaborators reported.
#[derive(Debug, Default)]
pub struct MemoryLog {
    verbose: bool,
    lines: Mutex<Vec<String>>,
}

impl MemoryLog {
    /// Create a new empty memory log
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            lines: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the lines emitted so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Check whether any emitted line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    fn push(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}

impl LogSink for MemoryLog {
    fn write(&self, line: &str) {
        self.push(line);
    }

    fn write_debug(&self, line: &str) {
        if self.verbose {
            self.push(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_is_initialized_once() {
        let first = global(true);
        let second = global(false);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.is_verbose(), second.is_verbose());
    }

    #[test]
    fn test_memory_log_respects_verbosity() {
        let quiet = MemoryLog::new(false);
        quiet.write("always");
        quiet.write_debug("hidden");
        assert_eq!(quiet.lines(), vec!["always".to_string()]);

        let verbose = MemoryLog::new(true);
        verbose.write("always");
        verbose.write_debug("shown");
        assert_eq!(verbose.lines().len(), 2);
        assert!(verbose.contains("shown"));
    }
}
