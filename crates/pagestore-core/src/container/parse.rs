//! Parse-and-filter pass shared by `load` and `reload`

use std::collections::HashSet;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::registry::ObserverRegistry;
use crate::traits::{BatchObserver, LogSink};

/// Turn raw lines into the accepted entry collection
///
/// Lines are scanned in order. Entries at or below `threshold` are reported
/// to every batch observer through `skip` as soon as they are seen; accepted
/// entries are only returned once the whole pass validated.
///
/// # Errors
///
/// - `InvalidRecord`: a line is not `id name score`
/// - `DuplicateId`: an id repeats within this pass, accepted or not
/// - `InsufficientAccepted`: fewer than `min_accepted` entries passed
///
/// Any error discards the accepted entries collected so far. Skips that
/// already fired are not retracted.
pub(crate) fn parse_and_filter(
    lines: &[String],
    threshold: f64,
    min_accepted: usize,
    observers: &mut ObserverRegistry<dyn BatchObserver>,
    log: &dyn LogSink,
) -> Result<Vec<Entry>> {
    let mut accepted = Vec::new();
    let mut seen: HashSet<String> = HashSet::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        let entry = Entry::parse(line, index + 1)?;

        if !seen.insert(entry.id().to_string()) {
            log.write(&format!("PageContainer: duplicate id {}", entry.id()));
            return Err(Error::duplicate_id(entry.id()));
        }

        if entry.exceeds(threshold) {
            accepted.push(entry);
        } else {
            log.write_debug(&format!("PageContainer: skip {}", entry.id()));
            observers.notify(|observer| observer.skip(&entry));
        }
    }

    if accepted.len() < min_accepted {
        log.write(&format!(
            "PageContainer: {} accepted at threshold {}, need {}",
            accepted.len(),
            threshold,
            min_accepted
        ));
        return Err(Error::InsufficientAccepted {
            accepted: accepted.len(),
            min: min_accepted,
        });
    }

    Ok(accepted)
}
