use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Granularity of the displayed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeMode {
    Week,
    Month,
}

/// One day of one symptom's series. Intensity 0 means no data that day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomPoint {
    pub day: NaiveDate,
    pub intensity: u8,
}

/// A symptom's intensity across every day of the displayed range, exactly
/// one point per day, chronological.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomSeries {
    pub name: String,
    pub points: Vec<SymptomPoint>,
}
