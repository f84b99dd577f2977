// # Data Observer Trait
//
// Observers notified whenever the container replaces one of its two
// collections wholesale.
//
// ## Usage
//
// ```rust,ignore
// use pagestore_core::{DataObserver, Entry, PageContainer};
// use std::sync::Arc;
//
// struct Counter;
//
// impl DataObserver for Counter {
//     fn on_data_load(&self, old: &[Entry], new: &[Entry]) {
//         println!("{} -> {} entries", old.len(), new.len());
//     }
//
//     fn on_raw_data_load(&self, old: &[String], new: &[String]) {
//         println!("{} -> {} raw lines", old.len(), new.len());
//     }
// }
//
// let counter = Arc::new(Counter);
// container.attach_data(&counter);
// ```

use crate::entry::Entry;

/// Trait for observers of collection replacement
///
/// Both callbacks receive the collection as it was before the replacement and
/// the collection about to take its place. They run inline on the caller's
/// thread, in registration order, before the container commits the new value.
///
/// # Lifetime
///
/// The container only holds a non-owning reference. Whoever attaches an
/// observer keeps it alive; a dropped observer is silently skipped.
pub trait DataObserver: Send + Sync {
    /// Called before the parsed entry collection is replaced
    ///
    /// # Parameters
    ///
    /// - `old_entries`: Entries currently held by the container
    /// - `new_entries`: Freshly parsed entries that are about to be committed
    fn on_data_load(&self, old_entries: &[Entry], new_entries: &[Entry]);

    /// Called before the raw line collection is replaced
    ///
    /// # Parameters
    ///
    /// - `old_lines`: Raw lines currently held by the container
    /// - `new_lines`: Lines read from the new source
    fn on_raw_data_load(&self, old_lines: &[String], new_lines: &[String]);
}
