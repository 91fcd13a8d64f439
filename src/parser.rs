use std::io;
use std::path::Path;

use csv::{Reader, StringRecord};
use tracing::{debug, warn};

use crate::error::ImportError;
use crate::schedule::{NewEntry, ScheduleStore};
use crate::storage::BackingStore;

/// One importable row: the day it belongs to and the entry to add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub day: String,
    pub entry: NewEntry,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
}

/// Parses a boolean value from various string representations
fn parse_bool(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower == "yes" || lower == "true" || lower == "1"
}

fn column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
}

fn field(record: &StringRecord, col: Option<usize>) -> String {
    col.and_then(|c| record.get(c)).unwrap_or("").trim().to_string()
}

/// Reads itinerary rows from CSV with a header line. `day`, `time` and
/// `title` columns are required; `description` (or `desc`), `link` and
/// `highlight` are optional. Rows missing a day, time or title are skipped.
pub fn read_rows<R: io::Read>(reader: R) -> Result<(Vec<ImportRow>, usize), ImportError> {
    let mut reader = Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    let day_col = column(&headers, &["day"]).ok_or(ImportError::MissingColumn("day"))?;
    let time_col = column(&headers, &["time"]).ok_or(ImportError::MissingColumn("time"))?;
    let title_col = column(&headers, &["title"]).ok_or(ImportError::MissingColumn("title"))?;
    let desc_col = column(&headers, &["description", "desc"]);
    let link_col = column(&headers, &["link"]);
    let highlight_col = column(&headers, &["highlight"]);

    let mut rows = Vec::new();
    let mut skipped = 0;

    for result in reader.records() {
        let record = result?;

        let day = field(&record, Some(day_col));
        let time = field(&record, Some(time_col));
        let title = field(&record, Some(title_col));

        // Skip if essential fields are missing
        if day.is_empty() || time.is_empty() || title.is_empty() {
            skipped += 1;
            continue;
        }

        let link = field(&record, link_col);
        let entry = NewEntry {
            time,
            title,
            // Descriptions keep their inner line breaks; only the ends are trimmed
            description: field(&record, desc_col),
            link: if link.is_empty() { None } else { Some(link) },
            highlight: parse_bool(&field(&record, highlight_col)),
        };
        rows.push(ImportRow { day, entry });
    }

    Ok((rows, skipped))
}

/// Adds every row through the store, one `add_item` per row.
pub fn import_rows<B: BackingStore>(store: &mut ScheduleStore<B>, rows: Vec<ImportRow>) -> ImportSummary {
    let mut summary = ImportSummary::default();
    for row in rows {
        match store.add_item(&row.day, row.entry) {
            Ok(id) => {
                debug!(day = %row.day, id = %id, "imported entry");
                summary.added += 1;
            }
            Err(e) => {
                warn!(day = %row.day, error = %e, "skipped import row");
                summary.skipped += 1;
            }
        }
    }
    summary
}

/// Loads a CSV file into the store
pub fn import_csv<P: AsRef<Path>, B: BackingStore>(
    store: &mut ScheduleStore<B>,
    csv_path: P,
) -> Result<ImportSummary, ImportError> {
    let file = std::fs::File::open(csv_path.as_ref()).map_err(csv::Error::from)?;
    let (rows, skipped) = read_rows(file)?;
    let mut summary = import_rows(store, rows);
    summary.skipped += skipped;
    Ok(summary)
}
