// # Log Sink Trait
//
// The container and its collaborators only need to "write a line". Keeping
// that behind a trait lets tests capture output and lets the binary route it
// through `tracing`.

/// Two-method logging capability
pub trait LogSink: Send + Sync {
    /// Always emit `line`
    fn write(&self, line: &str);

    /// Emit `line` only when verbose output is enabled
    fn write_debug(&self, line: &str);
}
