//! Range boundaries for the trend chart.
//!
//! A [`TrendRange`] is the half-open day interval `[start, end)` for one
//! range mode. Each variant computes its own boundaries and day list, so
//! screens never duplicate calendar math.

use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::types::RangeMode;

/// Stand-in for the locale's first day of week; shells that know the user's
/// locale pass their own value through the controller.
pub const DEFAULT_WEEK_START: Weekday = Weekday::Mon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendRange {
    pub mode: RangeMode,
    pub start: NaiveDate,
    /// Exclusive end bound.
    pub end: NaiveDate,
}

impl TrendRange {
    /// The period containing the current local day.
    pub fn current(mode: RangeMode, week_start: Weekday) -> Self {
        Self::containing(mode, Local::now().date_naive(), week_start)
    }

    /// The period containing `date`.
    pub fn containing(mode: RangeMode, date: NaiveDate, week_start: Weekday) -> Self {
        match mode {
            RangeMode::Week => Self::week_containing(date, week_start),
            RangeMode::Month => Self::month_containing(date),
        }
    }

    fn week_containing(date: NaiveDate, week_start: Weekday) -> Self {
        let back = date.weekday().days_since(week_start);
        let start = date - Days::new(u64::from(back));
        Self {
            mode: RangeMode::Week,
            start,
            end: start + Days::new(7),
        }
    }

    fn month_containing(date: NaiveDate) -> Self {
        let start = date.with_day(1).expect("first of month is a valid date");
        Self {
            mode: RangeMode::Month,
            start,
            end: start + Months::new(1),
        }
    }

    /// Same mode, shifted by whole periods (negative = into the past). A week
    /// range keeps its weekday alignment; a month range snaps to month
    /// boundaries.
    pub fn shift(&self, periods: i32) -> Self {
        match self.mode {
            RangeMode::Week => {
                let delta = i64::from(periods) * 7;
                let start = self.start + chrono::Duration::days(delta);
                Self {
                    mode: RangeMode::Week,
                    start,
                    end: start + Days::new(7),
                }
            }
            RangeMode::Month => {
                let months = Months::new(periods.unsigned_abs());
                let start = if periods >= 0 {
                    self.start + months
                } else {
                    self.start - months
                };
                Self::month_containing(start)
            }
        }
    }

    /// Every day of the range, chronological. 7 for a week, 28–31 for a month.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start.iter_days().take_while(|d| *d < self.end).collect()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day < self.end
    }

    /// Header string for the range: "Mar 2 – Mar 8, 2026" or "March 2026".
    pub fn label(&self) -> String {
        match self.mode {
            RangeMode::Week => {
                let last = self.end.pred_opt().unwrap_or(self.end);
                format!(
                    "{} – {}",
                    self.start.format("%b %-d"),
                    last.format("%b %-d, %Y")
                )
            }
            RangeMode::Month => self.start.format("%B %Y").to_string(),
        }
    }
}
