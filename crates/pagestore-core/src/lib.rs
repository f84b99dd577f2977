// # pagestore-core
//
// Core library for the pagestore record container.
//
// ## Architecture Overview
//
// This library ingests line-oriented records and keeps observers informed:
// - **Entry**: Typed form of one `id name score` line
// - **PageContainer**: Owns raw lines and entries, filters by threshold,
//   rejects duplicate ids, dispatches notifications
// - **DataObserver**: Trait for observers of wholesale collection replacement
// - **BatchObserver**: Trait for observers of rejections and accepted batches
// - **LogSink**: Write-a-line logging capability injected into components
// - **TelemetrySink**: Destination for batches shipped by `StatSender`
//
// ## Design Principles
//
// 1. **Non-owning observers**: The container holds weak references only
// 2. **Atomic on success**: Entries change only after a fully valid pass
// 3. **Eager rejection**: Skips are reported in line order during the scan
// 4. **Library-First**: The binary is a thin wiring layer over this crate

pub mod traits;
pub mod entry;
pub mod container;
pub mod registry;
pub mod config;
pub mod error;
pub mod log;
pub mod observers;
pub mod telemetry;

// Re-export core types for convenience
pub use traits::{BatchObserver, DataObserver, LogSink, TelemetrySink};
pub use entry::Entry;
pub use container::PageContainer;
pub use registry::ObserverRegistry;
pub use config::{ContainerConfig, IngestPolicy, PageStoreConfig, TelemetryConfig};
pub use error::{Error, Result};
pub use observers::{Delivery, Histogram, StatSender, UsedMemory};
