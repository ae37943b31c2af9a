//! Metric engine: ranking order, mean score and notable classification
//!
//! Pure functions, no state and no I/O.

use std::cmp::Ordering;

use chrono::Utc;
use shared::{Entry, Ranking, SortDirection};

/// Parse a raw score with standard floating-point parsing; unparsable text is NaN
pub fn parse_score(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Compare two scores for the given direction
///
/// NaN sorts after every number in both directions and ties with NaN.
pub fn compare_scores(a: f64, b: f64, direction: SortDirection) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

/// Sort entries by numeric score without touching the input
///
/// The sort is stable, so equal scores keep their feed order.
pub fn sort_entries(entries: &[Entry], direction: SortDirection) -> Vec<Entry> {
    let mut keyed: Vec<(f64, &Entry)> = entries
        .iter()
        .map(|entry| (parse_score(&entry.score), entry))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_scores(*a, *b, direction));

    keyed.into_iter().map(|(_, entry)| entry.clone()).collect()
}

/// Arithmetic mean of the finite scores, 0 when there are none
pub fn mean_score(entries: &[Entry]) -> f64 {
    let (sum, count) = entries
        .iter()
        .map(|entry| parse_score(&entry.score))
        .filter(|score| score.is_finite())
        .fold((0.0, 0usize), |(sum, count), score| (sum + score, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Whether a score beats the mean given the ranking direction
pub fn is_notable(score: f64, mean: f64, direction: SortDirection) -> bool {
    match direction {
        SortDirection::Descending => score > mean,
        SortDirection::Ascending => score < mean,
    }
}

/// Whether a ranked entry beats its ranking's mean
pub fn is_entry_notable(entry: &Entry, ranking: &Ranking) -> bool {
    is_notable(parse_score(&entry.score), ranking.mean_score, ranking.direction)
}

/// Build a ranking snapshot from freshly fetched rows
pub fn rank(entries: &[Entry], direction: SortDirection) -> Ranking {
    Ranking {
        entries: sort_entries(entries, direction),
        direction,
        mean_score: mean_score(entries),
        fetched_at: Utc::now(),
    }
}
