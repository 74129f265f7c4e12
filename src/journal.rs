//! Symptom journal: the write path of the log.
//!
//! Buckets entries by local calendar day. A bucket is created lazily the
//! first time a day is written to, and on each "ensure today" call from the
//! shell (screen appear, app foreground). Buckets are never created for past
//! or future days here.

use chrono::{Local, Timelike};
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository;
use crate::db::StorageError;
use crate::models::{DayLog, SymptomEntry};

/// Canonical form of a symptom name: trimmed, case-folded, title-cased per
/// word. Applied at write time and again as the grouping key, so stored and
/// derived representations cannot drift. Returns `None` for blank input.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let titled: Vec<String> = trimmed
        .split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    Some(titled.join(" "))
}

/// Ensures a bucket exists for today and returns it, with any entries already
/// logged. Idempotent, so safe to call on every foreground transition.
pub fn ensure_today_bucket(conn: &Connection) -> Result<DayLog, StorageError> {
    let today = Local::now().date_naive();

    if let Some(existing) = repository::find_day_log(conn, today)? {
        return Ok(existing);
    }

    repository::insert_day_log(conn, today)?;
    Ok(DayLog::empty(today))
}

/// Logs a symptom against today's bucket, stamped with the current local
/// time. A name that is blank after trimming is a silent no-op: no entry is
/// written and no bucket is created. Severity is stored as given; the 1–10
/// range is the input form's contract.
pub fn add_symptom(conn: &Connection, name: &str, severity: u8) -> Result<(), StorageError> {
    let Some(normalized) = normalize_name(name) else {
        tracing::debug!("Ignoring blank symptom name");
        return Ok(());
    };

    let bucket = ensure_today_bucket(conn)?;

    let entry = SymptomEntry {
        id: Uuid::new_v4(),
        name: normalized,
        severity,
        recorded_at: Local::now()
            .naive_local()
            .with_nanosecond(0)
            .expect("zero nanosecond is valid"),
    };
    repository::insert_entry(conn, bucket.day, &entry)
}

/// Removes one entry (swipe-delete). The owning bucket stays, even if empty.
pub fn delete_entry(conn: &Connection, id: Uuid) -> Result<(), StorageError> {
    repository::delete_entry(conn, id)
}

/// Full log for the detailed-log screen and PDF export: every bucket, newest
/// day first, entries newest first within a day.
pub fn fetch_day_logs(conn: &Connection) -> Result<Vec<DayLog>, StorageError> {
    repository::fetch_all_day_logs(conn)
}

/// Case-insensitive substring search over the full log. Keeps the days that
/// have at least one matching entry; a blank query keeps everything.
pub fn filter_day_logs(days: &[DayLog], query: &str) -> Vec<DayLog> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return days.to_vec();
    }

    days.iter()
        .filter(|day| day.entries.iter().any(|e| e.name.to_lowercase().contains(&q)))
        .cloned()
        .collect()
}
