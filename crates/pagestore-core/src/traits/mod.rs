//! Core traits for the pagestore system
//!
//! This module defines the abstract interfaces that collaborators implement.
//!
//! - [`DataObserver`]: React to wholesale replacement of raw lines or entries
//! - [`BatchObserver`]: React to rejected entries and to accepted batches
//! - [`LogSink`]: Write-a-line logging capability
//! - [`TelemetrySink`]: Destination for shipped telemetry batches

pub mod data_observer;
pub mod batch_observer;
pub mod log_sink;
pub mod telemetry_sink;

pub use data_observer::DataObserver;
pub use batch_observer::BatchObserver;
pub use log_sink::LogSink;
pub use telemetry_sink::{TelemetryBatch, TelemetrySink};
