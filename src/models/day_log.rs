use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single logged symptom. Belongs to exactly one [`DayLog`], keyed by the
/// calendar day of `recorded_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub id: Uuid,
    pub name: String,
    pub severity: u8,
    pub recorded_at: NaiveDateTime,
}

/// All entries recorded on a single local calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayLog {
    pub day: NaiveDate,
    pub entries: Vec<SymptomEntry>,
}

impl DayLog {
    pub fn empty(day: NaiveDate) -> Self {
        Self { day, entries: Vec::new() }
    }
}
