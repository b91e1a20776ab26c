use chrono::{DateTime, Datelike, Utc};
use std::collections::BTreeMap;

use crate::matches::Match;

/// Matches dated within `[start, end]`, both ends inclusive
pub fn matches_between(
    matches: &[Match],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<Match> {
    matches
        .iter()
        .filter(|m| m.date >= start && m.date <= end)
        .cloned()
        .collect()
}

/// Matches in the calendar month containing `now`
pub fn matches_in_month(matches: &[Match], now: DateTime<Utc>) -> Vec<Match> {
    matches
        .iter()
        .filter(|m| m.date.year() == now.year() && m.date.month() == now.month())
        .cloned()
        .collect()
}

/// Matches in the calendar year containing `now`
pub fn matches_in_year(matches: &[Match], now: DateTime<Utc>) -> Vec<Match> {
    matches
        .iter()
        .filter(|m| m.date.year() == now.year())
        .cloned()
        .collect()
}

/// Matches of `year` bucketed by zero-based month; all twelve months are present
pub fn matches_by_month(matches: &[Match], year: i32) -> BTreeMap<u32, Vec<Match>> {
    let mut buckets: BTreeMap<u32, Vec<Match>> =
        (0..12).map(|month| (month, Vec::new())).collect();

    for record in matches.iter().filter(|m| m.date.year() == year) {
        buckets
            .entry(record.date.month0())
            .or_default()
            .push(record.clone());
    }

    buckets
}
