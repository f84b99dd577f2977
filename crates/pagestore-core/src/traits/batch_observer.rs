// # Batch Observer Trait
//
// Observers notified about individual rejections during a parse pass and
// about the accepted batch once the pass succeeds.

use crate::entry::Entry;

/// Trait for observers of filter outcomes
///
/// # Ordering
///
/// During one `load` or `reload` pass:
/// 1. [`skip`](BatchObserver::skip) fires once per rejected line, in line
///    order, while the scan is still running
/// 2. [`on_loaded`](BatchObserver::on_loaded) fires once, after the whole
///    pass validated
///
/// A pass that fails after some rejections were reported does not retract
/// them, and `on_loaded` is not called for it.
pub trait BatchObserver: Send + Sync {
    /// Called once with the accepted entries of a successful pass
    fn on_loaded(&self, accepted: &[Entry]);

    /// Called for each entry whose score did not exceed the threshold
    fn skip(&self, rejected: &Entry);
}
