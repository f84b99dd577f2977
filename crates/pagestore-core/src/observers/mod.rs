// # Built-in Observers
//
// Reactive collaborators attached to a PageContainer.
//
// - UsedMemory: byte accounting for both collections (DataObserver)
// - StatSender: telemetry shipping for filter outcomes (BatchObserver)
// - Histogram: score statistics and rejection counts (both)

pub mod histogram;
pub mod memory;
pub mod stats;

pub use histogram::{Histogram, ScoreStats};
pub use memory::UsedMemory;
pub use stats::{Delivery, StatSender};
