//! CSV source support.
//!
//! Every physical record becomes one row; quoted fields may contain commas,
//! newlines and doubled quotes. Records the parser cannot make sense of are
//! dropped rather than failing the whole import.
use std::{io::BufRead, path::Path};

use csv::StringRecord;

use crate::{
    error::Error,
    traits::TableCodec,
    types::{Row, Table},
};

impl TableCodec for Table {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows: Vec<Row> = Vec::new();
        for (index, result) in rdr.byte_records().enumerate() {
            let record = result.map_err(|e| {
                Error::source_unavailable("cannot read CSV input", Some(Box::new(e)))
            })?;
            match StringRecord::from_byte_record(record) {
                Ok(record) => rows.push(record.iter().map(str::to_string).collect()),
                Err(e) => {
                    tracing::debug!(event = "csv_record_dropped", record = index, error = %e);
                }
            }
        }
        Ok(Table::new(rows))
    }
}

/// Imports the CSV file at `path`.
pub fn import<P: AsRef<Path>>(path: P) -> Result<Table, Error> {
    let path = path.as_ref();
    tracing::debug!(event = "csv_import", path = %path.display());
    let table = Table::read_from(path)?;
    tracing::info!(event = "csv_imported", path = %path.display(), rows = table.len());
    Ok(table)
}
