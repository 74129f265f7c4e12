//! Store access for day buckets and their entries.
//!
//! Dates are stored as TEXT (`YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`), which
//! compare correctly as strings in SQL range predicates. Cascade from a day
//! to its entries is enforced by the schema, not here.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::StorageError;
use crate::models::{DayLog, SymptomEntry};

pub const DATE_FMT: &str = "%Y-%m-%d";
pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Inserts an empty bucket row for the given day.
pub fn insert_day_log(conn: &Connection, day: NaiveDate) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO day_logs (day) VALUES (?1)",
        params![day.format(DATE_FMT).to_string()],
    )?;
    Ok(())
}

/// Exact-day lookup. Returns the bucket with its entries, newest first.
pub fn find_day_log(conn: &Connection, day: NaiveDate) -> Result<Option<DayLog>, StorageError> {
    let day_str = day.format(DATE_FMT).to_string();
    let exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM day_logs WHERE day = ?1",
        params![day_str],
        |row| row.get(0),
    )?;
    if !exists {
        return Ok(None);
    }

    let mut stmt = conn.prepare(
        "SELECT id, name, severity, recorded_at
         FROM symptom_entries WHERE day = ?1 ORDER BY recorded_at DESC",
    )?;
    let rows = stmt.query_map(params![day_str], entry_from_row)?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(entry_from_parts(row?)?);
    }
    Ok(Some(DayLog { day, entries }))
}

/// Deletes a bucket row; the FK cascade removes its entries.
pub fn delete_day_log(conn: &Connection, day: NaiveDate) -> Result<(), StorageError> {
    let deleted = conn.execute(
        "DELETE FROM day_logs WHERE day = ?1",
        params![day.format(DATE_FMT).to_string()],
    )?;
    if deleted == 0 {
        return Err(StorageError::NotFound {
            entity_type: "DayLog".into(),
            id: day.to_string(),
        });
    }
    Ok(())
}

/// Attaches an entry to the given day's bucket.
pub fn insert_entry(
    conn: &Connection,
    day: NaiveDate,
    entry: &SymptomEntry,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO symptom_entries (id, day, name, severity, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            entry.id.to_string(),
            day.format(DATE_FMT).to_string(),
            entry.name,
            entry.severity as i32,
            entry.recorded_at.format(DATETIME_FMT).to_string(),
        ],
    )?;
    Ok(())
}

/// Removes a single entry. The owning bucket row is left in place.
pub fn delete_entry(conn: &Connection, id: Uuid) -> Result<(), StorageError> {
    let deleted = conn.execute(
        "DELETE FROM symptom_entries WHERE id = ?1",
        params![id.to_string()],
    )?;
    if deleted == 0 {
        return Err(StorageError::NotFound {
            entity_type: "SymptomEntry".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Range fetch over the half-open interval `[from, to)` on `recorded_at`,
/// oldest first.
pub fn fetch_entries_between(
    conn: &Connection,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Result<Vec<SymptomEntry>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, severity, recorded_at
         FROM symptom_entries
         WHERE recorded_at >= ?1 AND recorded_at < ?2
         ORDER BY recorded_at ASC",
    )?;
    let rows = stmt.query_map(
        params![
            from.format(DATETIME_FMT).to_string(),
            to.format(DATETIME_FMT).to_string(),
        ],
        entry_from_row,
    )?;

    let mut entries = Vec::new();
    for row in rows {
        entries.push(entry_from_parts(row?)?);
    }
    Ok(entries)
}

/// All buckets, newest day first; entries newest first within each day.
pub fn fetch_all_day_logs(conn: &Connection) -> Result<Vec<DayLog>, StorageError> {
    let mut stmt = conn.prepare("SELECT day FROM day_logs ORDER BY day DESC")?;
    let day_rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut days: Vec<NaiveDate> = Vec::new();
    for row in day_rows {
        days.push(parse_date(&row?));
    }

    let mut stmt = conn.prepare(
        "SELECT day, id, name, severity, recorded_at
         FROM symptom_entries ORDER BY recorded_at DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, i32>(3)?,
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut by_day: BTreeMap<NaiveDate, Vec<SymptomEntry>> = BTreeMap::new();
    for row in rows {
        let (day, id, name, severity, recorded_at) = row?;
        by_day
            .entry(parse_date(&day))
            .or_default()
            .push(entry_from_parts((id, name, severity, recorded_at))?);
    }

    Ok(days
        .into_iter()
        .map(|day| DayLog {
            entries: by_day.remove(&day).unwrap_or_default(),
            day,
        })
        .collect())
}

type EntryRow = (String, String, i32, String);

fn entry_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EntryRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn entry_from_parts(parts: EntryRow) -> Result<SymptomEntry, StorageError> {
    let (id, name, severity, recorded_at) = parts;
    Ok(SymptomEntry {
        id: Uuid::parse_str(&id)
            .map_err(|e| StorageError::ConstraintViolation(e.to_string()))?,
        name,
        severity: severity as u8,
        recorded_at: NaiveDateTime::parse_from_str(&recorded_at, DATETIME_FMT)
            .unwrap_or_default(),
    })
}

fn parse_date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, DATE_FMT).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn test_db() -> Connection {
        open_memory_database().expect("in-memory DB")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry_at(name: &str, severity: u8, day: NaiveDate, h: u32, min: u32) -> SymptomEntry {
        SymptomEntry {
            id: Uuid::new_v4(),
            name: name.into(),
            severity,
            recorded_at: day.and_hms_opt(h, min, 0).unwrap(),
        }
    }

    fn seed(conn: &Connection, day: NaiveDate, entries: &[SymptomEntry]) {
        insert_day_log(conn, day).expect("seed day");
        for e in entries {
            insert_entry(conn, day, e).expect("seed entry");
        }
    }

    // ───────────────────────────────────────
    // day bucket tests
    // ───────────────────────────────────────

    #[test]
    fn find_missing_day_returns_none() {
        let conn = test_db();
        assert!(find_day_log(&conn, date(2026, 3, 2)).unwrap().is_none());
    }

    #[test]
    fn find_existing_day_returns_entries_newest_first() {
        let conn = test_db();
        let day = date(2026, 3, 2);
        seed(&conn, day, &[
            entry_at("Headache", 4, day, 9, 0),
            entry_at("Nausea", 2, day, 20, 30),
        ]);

        let log = find_day_log(&conn, day).unwrap().unwrap();
        assert_eq!(log.day, day);
        assert_eq!(log.entries.len(), 2);
        assert_eq!(log.entries[0].name, "Nausea");
        assert_eq!(log.entries[1].name, "Headache");
    }

    #[test]
    fn duplicate_day_rejected_by_primary_key() {
        let conn = test_db();
        let day = date(2026, 3, 2);
        insert_day_log(&conn, day).unwrap();
        assert!(insert_day_log(&conn, day).is_err());
    }

    #[test]
    fn delete_day_cascades_to_entries() {
        let conn = test_db();
        let day = date(2026, 3, 2);
        seed(&conn, day, &[entry_at("Headache", 4, day, 9, 0)]);

        delete_day_log(&conn, day).unwrap();

        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM symptom_entries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn delete_missing_day_returns_not_found() {
        let conn = test_db();
        assert!(delete_day_log(&conn, date(2026, 3, 2)).is_err());
    }

    // ───────────────────────────────────────
    // entry tests
    // ───────────────────────────────────────

    #[test]
    fn delete_entry_keeps_day_row() {
        let conn = test_db();
        let day = date(2026, 3, 2);
        let e = entry_at("Headache", 4, day, 9, 0);
        seed(&conn, day, std::slice::from_ref(&e));

        delete_entry(&conn, e.id).unwrap();

        let log = find_day_log(&conn, day).unwrap().unwrap();
        assert!(log.entries.is_empty());
    }

    #[test]
    fn delete_missing_entry_returns_not_found() {
        let conn = test_db();
        assert!(delete_entry(&conn, Uuid::new_v4()).is_err());
    }

    #[test]
    fn entry_round_trips_fields() {
        let conn = test_db();
        let day = date(2026, 3, 2);
        let e = entry_at("Headache", 7, day, 14, 45);
        seed(&conn, day, std::slice::from_ref(&e));

        let log = find_day_log(&conn, day).unwrap().unwrap();
        assert_eq!(log.entries[0], e);
    }

    // ───────────────────────────────────────
    // range fetch tests
    // ───────────────────────────────────────

    #[test]
    fn range_fetch_is_half_open() {
        let conn = test_db();
        let d1 = date(2026, 3, 2);
        let d2 = date(2026, 3, 9);
        seed(&conn, d1, &[entry_at("Headache", 4, d1, 0, 0)]);
        seed(&conn, d2, &[entry_at("Headache", 5, d2, 0, 0)]);

        // [d1 00:00, d2 00:00): the entry exactly at the end bound is excluded
        let entries = fetch_entries_between(
            &conn,
            d1.and_hms_opt(0, 0, 0).unwrap(),
            d2.and_hms_opt(0, 0, 0).unwrap(),
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].severity, 4);
    }

    #[test]
    fn range_fetch_orders_oldest_first() {
        let conn = test_db();
        let day = date(2026, 3, 2);
        seed(&conn, day, &[
            entry_at("Nausea", 2, day, 20, 0),
            entry_at("Headache", 4, day, 9, 0),
        ]);

        let entries = fetch_entries_between(
            &conn,
            day.and_hms_opt(0, 0, 0).unwrap(),
            date(2026, 3, 3).and_hms_opt(0, 0, 0).unwrap(),
        )
        .unwrap();
        assert_eq!(entries[0].name, "Headache");
        assert_eq!(entries[1].name, "Nausea");
    }

    // ───────────────────────────────────────
    // full log tests
    // ───────────────────────────────────────

    #[test]
    fn fetch_all_orders_days_descending() {
        let conn = test_db();
        let d1 = date(2026, 3, 2);
        let d2 = date(2026, 3, 5);
        seed(&conn, d1, &[entry_at("Headache", 4, d1, 9, 0)]);
        seed(&conn, d2, &[]);

        let logs = fetch_all_day_logs(&conn).unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].day, d2);
        assert!(logs[0].entries.is_empty());
        assert_eq!(logs[1].day, d1);
        assert_eq!(logs[1].entries.len(), 1);
    }
}
