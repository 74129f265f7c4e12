//! Turns a flat entry list into chartable per-symptom, per-day series.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::range::TrendRange;
use super::types::{SymptomPoint, SymptomSeries};
use crate::journal::normalize_name;
use crate::models::SymptomEntry;

/// Sorted, deduplicated canonical names present in the given fetch. Recomputed
/// from scratch for each range, never accumulated across ranges.
pub fn symptoms_in_range(entries: &[SymptomEntry]) -> Vec<String> {
    let mut names: Vec<String> = entries
        .iter()
        .filter_map(|e| normalize_name(&e.name))
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Builds one series per selected symptom: a point for every day of the
/// range, chronological, zero where the symptom has no entries. Multiple
/// entries for the same symptom on the same day reduce to their average.
/// Series come out sorted by name (the selected set iterates in order).
pub fn build_series(
    entries: &[SymptomEntry],
    range: &TrendRange,
    selected: &BTreeSet<String>,
) -> Vec<SymptomSeries> {
    let days = range.days();

    // (name, day) -> (severity sum, entry count)
    let mut groups: BTreeMap<(String, NaiveDate), (u32, u32)> = BTreeMap::new();
    for entry in entries {
        let Some(name) = normalize_name(&entry.name) else {
            continue;
        };
        if !selected.contains(&name) {
            continue;
        }
        let slot = groups.entry((name, entry.recorded_at.date())).or_insert((0, 0));
        slot.0 += u32::from(entry.severity);
        slot.1 += 1;
    }

    selected
        .iter()
        .map(|name| SymptomSeries {
            name: name.clone(),
            points: days
                .iter()
                .map(|day| SymptomPoint {
                    day: *day,
                    intensity: groups
                        .get(&(name.clone(), *day))
                        .map(|&(sum, count)| average_intensity(sum, count))
                        .unwrap_or(0),
                })
                .collect(),
        })
        .collect()
}

/// Average severity rounded to the nearest integer, half up: 2.5 → 3,
/// 4.5 → 5. (`f64::round` is half-away-from-zero, which is half-up for
/// non-negative severities.)
fn average_intensity(sum: u32, count: u32) -> u8 {
    (f64::from(sum) / f64::from(count)).round() as u8
}
