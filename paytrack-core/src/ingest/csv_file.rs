use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{RawRow, RecordSource};
use crate::error::IngestError;

/// Reads invoice rows from a CSV file with a header line.
///
/// The file is opened afresh on every load.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<RawRow>, IngestError> {
        let file = File::open(&self.path).map_err(|source| IngestError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_csv(file)
    }
}

/// Parses CSV text into rows keyed by the header line.
///
/// Every value is kept as a string. Short rows get empty strings for the
/// missing trailing columns; blank lines are skipped.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<RawRow>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = record.get(i).unwrap_or_default();
                (header.clone(), Value::String(value.to_string()))
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
