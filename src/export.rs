use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{ReviewError, Result};
use crate::record::{ReviewRecord, ReviewRecordSet, COLUMNS};

/// Write `records` as a six-column CSV table, replacing `path`.
///
/// Rows go to a sibling temp file first, so a failed write leaves any
/// previous table untouched and no temp file behind.
pub fn write_csv(path: &Path, records: &ReviewRecordSet) -> Result<()> {
    let tmp = path.with_extension("csv.tmp");
    if let Err(e) = write_rows(&tmp, records) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path)?;
    info!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

fn write_rows(path: &Path, records: &ReviewRecordSet) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)?;
    wtr.write_record(COLUMNS)?;
    for record in records.iter() {
        wtr.write_record(record.fields())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Load a table written by [`write_csv`]. The header must match [`COLUMNS`].
pub fn read_csv(path: &Path) -> Result<ReviewRecordSet> {
    let text = fs::read_to_string(path)?;
    parse_csv(&text)
}

pub fn parse_csv(text: &str) -> Result<ReviewRecordSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let header = rdr.headers().map_err(table_error)?;
    if !header.iter().eq(COLUMNS) {
        return Err(ReviewError::Table {
            line: 1,
            reason: format!("unexpected header {:?}", header),
        });
    }

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(table_error)?;
        let line = row.position().map_or(0, |p| p.line() as usize);
        let fields: [String; 6] = row
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|f: Vec<String>| ReviewError::Table {
                line,
                reason: format!("expected {} fields, found {}", COLUMNS.len(), f.len()),
            })?;
        records.push(ReviewRecord::from_fields(fields));
    }
    Ok(records.into())
}

fn table_error(e: csv::Error) -> ReviewError {
    ReviewError::Table {
        line: e.position().map_or(0, |p| p.line() as usize),
        reason: e.to_string(),
    }
}
