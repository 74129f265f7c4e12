//! Trend chart state: range selection, fetched entries, symptom filter, and
//! the derived series.
//!
//! One controller instance backs the chart screen. Range changes (mode
//! switch, period shift, jump-to-current) re-fetch from the store; filter
//! changes recompute from the entries already in memory and never touch the
//! store. All calls are synchronous; each UI event is processed to
//! completion before the next, so the last completed call wins.

pub mod aggregate;
pub mod range;
pub mod types;

pub use range::{TrendRange, DEFAULT_WEEK_START};
pub use types::{RangeMode, SymptomPoint, SymptomSeries};

use std::collections::BTreeSet;

use chrono::Weekday;
use rusqlite::Connection;

use crate::db::repository;
use crate::models::SymptomEntry;

pub struct TrendController {
    week_start: Weekday,
    range: TrendRange,
    entries: Vec<SymptomEntry>,
    selected: BTreeSet<String>,
    all_symptoms: Vec<String>,
    series: Vec<SymptomSeries>,
}

impl TrendController {
    /// Controller positioned on the current period. Call [`refresh`] to load.
    ///
    /// [`refresh`]: TrendController::refresh
    pub fn new(mode: RangeMode) -> Self {
        Self::with_week_start(mode, DEFAULT_WEEK_START)
    }

    /// Same, with the locale's first day of week injected by the shell.
    pub fn with_week_start(mode: RangeMode, week_start: Weekday) -> Self {
        Self {
            week_start,
            range: TrendRange::current(mode, week_start),
            entries: Vec::new(),
            selected: BTreeSet::new(),
            all_symptoms: Vec::new(),
            series: Vec::new(),
        }
    }

    /// Re-fetches the range's entries and rebuilds everything derived. A
    /// store failure degrades to an empty chart until the next triggering
    /// event; it is logged, never propagated.
    pub fn refresh(&mut self, conn: &Connection) {
        let from = self.range.start.and_hms_opt(0, 0, 0).expect("midnight is valid");
        let to = self.range.end.and_hms_opt(0, 0, 0).expect("midnight is valid");

        self.entries = match repository::fetch_entries_between(conn, from, to) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Trend fetch failed, showing empty chart: {e}");
                Vec::new()
            }
        };

        self.reconcile_selection();
        self.rebuild();
    }

    /// Switches week/month granularity, snapping to the current period.
    pub fn set_mode(&mut self, conn: &Connection, mode: RangeMode) {
        if mode == self.range.mode {
            return;
        }
        self.range = TrendRange::current(mode, self.week_start);
        self.refresh(conn);
    }

    /// Jumps back to the period containing today.
    pub fn jump_to_current(&mut self, conn: &Connection) {
        self.range = TrendRange::current(self.range.mode, self.week_start);
        self.refresh(conn);
    }

    /// Moves whole periods into the past (negative) or future (positive).
    pub fn shift(&mut self, conn: &Connection, periods: i32) {
        self.range = self.range.shift(periods);
        self.refresh(conn);
    }

    /// Replaces the symptom filter. Recomputation only: the store is not
    /// consulted (there is deliberately no connection parameter). An empty
    /// set means "all symptoms in the current range".
    pub fn set_selected(&mut self, names: BTreeSet<String>) {
        self.selected = if names.is_empty() {
            self.all_symptoms.iter().cloned().collect()
        } else {
            names
        };
        self.rebuild();
    }

    /// Recomputes `all_symptoms` from the current fetch and drops selected
    /// names that left the range; an emptied selection resets to select-all.
    fn reconcile_selection(&mut self) {
        self.all_symptoms = aggregate::symptoms_in_range(&self.entries);
        let in_range: BTreeSet<String> = self.all_symptoms.iter().cloned().collect();

        self.selected = self.selected.intersection(&in_range).cloned().collect();
        if self.selected.is_empty() {
            self.selected = in_range;
        }
    }

    fn rebuild(&mut self) {
        self.series = if self.selected.is_empty() {
            Vec::new()
        } else {
            aggregate::build_series(&self.entries, &self.range, &self.selected)
        };
    }

    pub fn range(&self) -> &TrendRange {
        &self.range
    }

    pub fn series(&self) -> &[SymptomSeries] {
        &self.series
    }

    /// Names available to the filter sheet, current range only.
    pub fn all_symptoms(&self) -> &[String] {
        &self.all_symptoms
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }
}
