use crate::core::dates::dates_overlap;
use crate::domain::model::{MatchKey, ReadEvent};

type IdentityRule = fn(&MatchKey, &MatchKey) -> bool;

/// Ordered identity rules, evaluated top to bottom; the first satisfied
/// rule decides, with no voting across rules. Empty fields are "unknown"
/// sentinels and never satisfy a rule.
const IDENTITY_RULES: [IdentityRule; 4] = [
    isbn13_equal,
    isbn10_equal,
    title_author_equal,
    title_prefix_same_author,
];

fn isbn13_equal(a: &MatchKey, b: &MatchKey) -> bool {
    !a.isbn13.is_empty() && !b.isbn13.is_empty() && a.isbn13 == b.isbn13
}

fn isbn10_equal(a: &MatchKey, b: &MatchKey) -> bool {
    !a.isbn10.is_empty() && !b.isbn10.is_empty() && a.isbn10 == b.isbn10
}

fn title_author_equal(a: &MatchKey, b: &MatchKey) -> bool {
    !a.title_author.is_empty() && !b.title_author.is_empty() && a.title_author == b.title_author
}

// One source truncating or extending a subtitle that survived
// normalization, e.g. "gironimo" vs "gironimo riding the italian dream".
fn title_prefix_same_author(a: &MatchKey, b: &MatchKey) -> bool {
    !a.title.is_empty()
        && !b.title.is_empty()
        && !a.author.is_empty()
        && a.author == b.author
        && (a.title.starts_with(&b.title) || b.title.starts_with(&a.title))
}

/// True when some identity rule accepts the pair of keys.
pub fn identity_match(a: &MatchKey, b: &MatchKey) -> bool {
    IDENTITY_RULES.iter().any(|rule| rule(a, b))
}

/// Scan `pool` in order for the first candidate that satisfies an
/// identity rule and the date-overlap check. First match wins: when
/// several candidates would qualify, pool order alone decides, with no
/// closest-date disambiguation.
pub fn find_match<'a>(
    event: &ReadEvent,
    pool: &'a [ReadEvent],
    tolerance_days: i64,
) -> Option<&'a ReadEvent> {
    let key = MatchKey::of(event);
    pool.iter().find(|candidate| {
        identity_match(&key, &MatchKey::of(candidate))
            && dates_overlap(event, candidate, tolerance_days)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(title: &str, author: &str, isbn13: &str, read: Option<&str>) -> ReadEvent {
        let mut e = ReadEvent::new(title, author);
        e.isbn13 = isbn13.to_string();
        e.read_date = read.map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap());
        e
    }

    #[test]
    fn isbn13_rule_matches_regardless_of_title() {
        let a = event("Nineteen Eighty-Four", "George Orwell", "9780451524935", None);
        let b = event("1984", "Orwell,George", "9780451524935", None);
        assert!(identity_match(&MatchKey::of(&a), &MatchKey::of(&b)));
    }

    #[test]
    fn empty_isbn13_is_never_a_match_value() {
        let a = event("A Book", "Someone", "", None);
        let b = event("Another Book", "Someone Else", "", None);
        assert!(!identity_match(&MatchKey::of(&a), &MatchKey::of(&b)));
    }

    #[test]
    fn differing_isbn13_falls_through_to_title_author() {
        // Two editions carry different ISBNs but the same book identity
        let a = event("Morning Star (Red Rising Saga, #3)", "Pierce Brown", "9780345539847", None);
        let b = event("Morning Star", "Pierce Brown", "9781444759075", None);
        assert!(identity_match(&MatchKey::of(&a), &MatchKey::of(&b)));
    }

    #[test]
    fn title_prefix_needs_same_author() {
        let a = event("Gironimo!", "Tim Moore", "", None);
        let b = event("Gironimo! Riding the Italian Dream", "Tim Moore", "", None);
        assert!(identity_match(&MatchKey::of(&a), &MatchKey::of(&b)));

        let c = event("Gironimo! Riding the Italian Dream", "Someone Else", "", None);
        assert!(!identity_match(&MatchKey::of(&a), &MatchKey::of(&c)));
    }

    #[test]
    fn date_check_gates_identity_match() {
        let a = event("Dune", "Frank Herbert", "9780441013593", Some("2025-01-01"));
        let b = event("Dune", "Frank Herbert", "9780441013593", Some("2025-06-01"));
        assert!(find_match(&a, std::slice::from_ref(&b), 30).is_none());
        assert!(find_match(&a, std::slice::from_ref(&b), 365).is_some());
    }

    #[test]
    fn first_match_wins_in_pool_order() {
        let a = event("Dune", "Frank Herbert", "", Some("2025-03-01"));
        // Both rereads qualify at this tolerance; scan order decides
        let pool = vec![
            event("Dune", "Frank Herbert", "", Some("2025-03-10")),
            event("Dune", "Frank Herbert", "", Some("2025-03-02")),
        ];
        let found = find_match(&a, &pool, 30).unwrap();
        assert_eq!(found.read_date, pool[0].read_date);
    }
}
