use std::fs::File;
use std::io;
use std::path::Path;

use csv::WriterBuilder;

use crate::error::ExportError;
use crate::schedule::ScheduleCollection;

pub const CSV_HEADER: [&str; 6] = ["day", "time", "title", "description", "link", "highlight"];

/// Writes every entry of the snapshot as one CSV row, days in key order and
/// entries in their list order.
pub fn write_schedule_csv<W: io::Write>(
    schedule: &ScheduleCollection,
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for (day, entries) in schedule {
        for entry in entries {
            let highlight = if entry.highlight { "yes" } else { "no" };
            wtr.write_record([
                day.as_str(),
                entry.time.as_str(),
                entry.title.as_str(),
                entry.description.as_str(),
                entry.link.as_deref().unwrap_or(""),
                highlight,
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the snapshot to a CSV file, replacing any existing file
pub fn export_schedule_to_csv(schedule: &ScheduleCollection, csv_path: &Path) -> Result<(), ExportError> {
    let file = File::create(csv_path)?;
    write_schedule_csv(schedule, file)
}
