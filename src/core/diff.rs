use crate::core::matcher::find_match;
use crate::domain::model::{ReadEvent, SyncOutcome};

/// Every event in `source` with no match in `target`, in `source` order.
/// O(|source| x |target|) candidate comparisons; fine at personal-library
/// scale.
pub fn find_missing(
    source: &[ReadEvent],
    target: &[ReadEvent],
    tolerance_days: i64,
) -> Vec<ReadEvent> {
    source
        .iter()
        .filter(|event| find_match(event, target, tolerance_days).is_none())
        .cloned()
        .collect()
}

/// Run the set difference in both directions. The two lists are
/// independent computations, not complements: the prefix rule is applied
/// per direction, so an event can in principle land in either or neither.
pub fn reconcile(
    booktracker: &[ReadEvent],
    goodreads: &[ReadEvent],
    tolerance_days: i64,
) -> SyncOutcome {
    SyncOutcome {
        missing_from_goodreads: find_missing(booktracker, goodreads, tolerance_days),
        missing_from_booktracker: find_missing(goodreads, booktracker, tolerance_days),
    }
}
