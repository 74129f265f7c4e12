//! PDF export of the symptom log.
//!
//! Renders an ordered list of day buckets (as given, normally newest day
//! first) into an A4 document: one bold date header per day, one line per
//! entry oldest-first below it. The share/save UI around the file is the
//! shell's job; export failure is the one error it surfaces as an alert.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Local;
use printpdf::*;

use crate::db::StorageError;
use crate::models::DayLog;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const TOP_Y: Mm = Mm(280.0);
const BOTTOM_Y: Mm = Mm(20.0);
const MARGIN_X: Mm = Mm(20.0);
const INDENT_X: Mm = Mm(25.0);

/// Renders the full log to PDF bytes.
pub fn render_log_pdf(days: &[DayLog]) -> Result<Vec<u8>, StorageError> {
    let (doc, page1, layer1) = PdfDocument::new("Symptom Log Export", PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| StorageError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| StorageError::Pdf(format!("font error: {e}")))?;

    let mut page = PageCursor {
        doc: &doc,
        layer: doc.get_page(page1).get_layer(layer1),
        y: TOP_Y,
    };

    page.line("Symptom Log Export", 14.0, MARGIN_X, &bold, Mm(10.0));
    page.line(
        &format!("Generated: {}", Local::now().format("%b %-d, %Y %H:%M")),
        9.0,
        MARGIN_X,
        &font,
        Mm(12.0),
    );

    if days.is_empty() {
        page.line("No data available for this export.", 11.0, MARGIN_X, &font, Mm(5.0));
    }

    for day in days {
        page.line(&day.day.format("%b %-d, %Y").to_string(), 11.0, MARGIN_X, &bold, Mm(6.0));

        // Oldest first reads naturally on paper, even though screens show
        // newest first.
        let mut entries = day.entries.clone();
        entries.sort_by_key(|e| e.recorded_at);

        if entries.is_empty() {
            page.line("· No symptoms logged.", 9.0, INDENT_X, &font, Mm(6.0));
            continue;
        }

        for entry in &entries {
            let text = format!(
                "· {}  {} — severity {}",
                entry.recorded_at.format("%H:%M"),
                entry.name,
                entry.severity
            );
            for line in wrap_text(&text, 90) {
                page.line(&line, 9.0, INDENT_X, &font, Mm(4.5));
            }
        }
        page.advance(Mm(4.0));
    }

    drop(page);

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| StorageError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| StorageError::Pdf(format!("buffer error: {e}")))
}

/// Renders and writes `SymptomLog-<timestamp>.pdf` under `dir`, creating the
/// directory if needed. Returns the written path.
pub fn export_log_to_file(days: &[DayLog], dir: &Path) -> Result<PathBuf, StorageError> {
    let bytes = render_log_pdf(days)?;

    fs::create_dir_all(dir).map_err(|e| StorageError::Pdf(format!("create dir: {e}")))?;
    let path = dir.join(format!("SymptomLog-{}.pdf", Local::now().format("%Y%m%d-%H%M%S")));
    fs::write(&path, bytes).map_err(|e| StorageError::Pdf(format!("write file: {e}")))?;

    Ok(path)
}

/// Text cursor that walks down the page and breaks to a fresh page when the
/// bottom margin is reached.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: Mm,
}

impl PageCursor<'_> {
    fn line(&mut self, text: &str, size: f64, x: Mm, font: &IndirectFontRef, advance: Mm) {
        if self.y < BOTTOM_Y {
            let (page, layer) = self.doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP_Y;
        }
        self.layer.use_text(text, size as f32, x, self.y, font);
        self.y -= advance;
    }

    fn advance(&mut self, by: Mm) {
        self.y -= by;
    }
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SymptomEntry;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn day_log(d: u32, names: &[(&str, u8, u32)]) -> DayLog {
        let day = NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
        DayLog {
            day,
            entries: names
                .iter()
                .map(|(name, severity, hour)| SymptomEntry {
                    id: Uuid::new_v4(),
                    name: (*name).into(),
                    severity: *severity,
                    recorded_at: day.and_hms_opt(*hour, 0, 0).unwrap(),
                })
                .collect(),
        }
    }

    #[test]
    fn renders_pdf_bytes_for_empty_log() {
        let bytes = render_log_pdf(&[]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_days_with_and_without_entries() {
        let days = vec![
            day_log(3, &[("Headache", 4, 9), ("Nausea", 2, 20)]),
            day_log(2, &[]),
        ];
        let bytes = render_log_pdf(&days).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_log_spans_pages_without_error() {
        let days: Vec<DayLog> = (1..=31)
            .map(|d| day_log(d, &[("Headache", 4, 9), ("Nausea", 2, 12), ("Fatigue", 6, 20)]))
            .collect();
        let bytes = render_log_pdf(&days).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let days = vec![day_log(3, &[("Headache", 4, 9)])];

        let path = export_log_to_file(&days, dir.path()).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("SymptomLog-"));
        assert!(name.ends_with(".pdf"));
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn wrap_keeps_short_lines_whole() {
        assert_eq!(wrap_text("short line", 80), vec!["short line"]);
    }

    #[test]
    fn wrap_splits_on_word_boundaries() {
        let lines = wrap_text("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn wrap_empty_yields_single_blank_line() {
        assert_eq!(wrap_text("", 80), vec![""]);
    }
}
