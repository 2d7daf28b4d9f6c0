//! Deterministic ordering of series members.
//!
//! | Tier | Key   | Rule                                            |
//! |------|-------|-------------------------------------------------|
//! | 1    | order | numeric ascending; valid before invalid         |
//! | 2    | date  | chronological ascending; valid before invalid   |
//! | 3    | title | transliterated, case-insensitive; absent last   |
//!
//! A tier decides only when its two values differ; equal or both-invalid
//! values fall through to the next tier. The sort is stable, so members
//! tied on every tier keep enumeration order.

use crate::{coerce, collect::SeriesItem};
use deunicode::deunicode;
use std::cmp::Ordering;

/// Compare two optional keys: valid before invalid, `None` if undecided.
fn decisive<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Option<Ordering> {
    let ordering = match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    (ordering != Ordering::Equal).then_some(ordering)
}

fn title_key(title: &str) -> String {
    deunicode(title).to_lowercase()
}

/// Total order over series members.
pub fn compare(a: &SeriesItem, b: &SeriesItem) -> Ordering {
    decisive(coerce::order_number(&a.order), coerce::order_number(&b.order), |x, y| {
        x.total_cmp(y)
    })
    .or_else(|| {
        decisive(coerce::date_millis(&a.date), coerce::date_millis(&b.date), |x, y| {
            x.cmp(y)
        })
    })
    .or_else(|| {
        decisive(a.title.as_deref(), b.title.as_deref(), |x, y| {
            title_key(x).cmp(&title_key(y)).then_with(|| x.cmp(y))
        })
    })
    .unwrap_or(Ordering::Equal)
}

/// Sort members in place (stable).
pub fn sort_items(items: &mut [SeriesItem]) {
    items.sort_by(compare);
}
