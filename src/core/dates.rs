use chrono::{Duration, NaiveDate};

use crate::domain::model::ReadEvent;

/// Decide whether two read events overlap in time, within a +/- tolerance
/// window measured in days.
///
/// Each event collapses to an interval: `start_date..=read_date`, with a
/// missing endpoint borrowed from the other (a single-dated event is a
/// zero-width interval). Events without any date information cannot be
/// refuted and count as overlapping. Symmetric in its two events.
pub fn dates_overlap(e1: &ReadEvent, e2: &ReadEvent, tolerance_days: i64) -> bool {
    if e1.read_date.is_none()
        && e1.start_date.is_none()
        && e2.read_date.is_none()
        && e2.start_date.is_none()
    {
        return true;
    }

    let r1_start = e1.start_date.or(e1.read_date);
    let r1_end = e1.read_date.or(e1.start_date);
    let r2_start = e2.start_date.or(e2.read_date);
    let r2_end = e2.read_date.or(e2.start_date);

    // One side is dateless: insufficient data to refute the match
    let (Some(r1_start), Some(r2_start)) = (r1_start, r2_start) else {
        return true;
    };
    let (Some(r1_end), Some(r2_end)) = (r1_end, r2_end) else {
        return true;
    };

    let tolerance = Duration::days(tolerance_days);
    // Saturate at chrono's representable extremes instead of panicking
    let widen_lo = |d: NaiveDate| d.checked_sub_signed(tolerance).unwrap_or(NaiveDate::MIN);
    let widen_hi = |d: NaiveDate| d.checked_add_signed(tolerance).unwrap_or(NaiveDate::MAX);

    widen_lo(r1_start) <= widen_hi(r2_end) && widen_lo(r2_start) <= widen_hi(r1_end)
}
