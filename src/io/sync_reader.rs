//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger records from a CSV export.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The SyncReader validates the header row when it is opened, so a file
//! without the required columns is rejected before any row is read. Records
//! are then read one at a time; each yields the raw trimmed fields together
//! with the parsed [`LedgerRow`](crate::types::LedgerRow).
//!
//! ```no_run
//! use fiscal_correction_engine::io::csv_format::CsvOptions;
//! use fiscal_correction_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("grootboek.csv"), CsvOptions::default()).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("{}: {}", record.line, record.row.account_label),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, missing columns) are returned from `new()`
//! - Individual record errors are yielded as Err variants carrying the line

use crate::io::csv_format::{build_record, validate_headers, CsvOptions, CsvRecord};
use crate::types::{EngineError, LedgerRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Provides an iterator interface over ledger records.
/// Maintains streaming behavior with constant memory usage.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
    record: StringRecord,
}

/// Open `path`, mapping a missing file to `EngineError::FileNotFound`
pub(crate) fn open_input(path: &Path) -> Result<File, EngineError> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => EngineError::file_not_found(&path.display().to_string()),
        _ => EngineError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        },
    })
}

impl SyncReader {
    /// Open a ledger export and validate its header row
    ///
    /// The CSV reader is configured to:
    /// - Use the delimiter from `options`
    /// - Trim whitespace from headers and fields
    /// - Allow ragged rows
    ///
    /// # Errors
    ///
    /// * `EngineError::FileNotFound` if the file does not exist
    /// * `EngineError::MissingColumns` if a required column is absent
    pub fn new(path: &Path, options: CsvOptions) -> Result<Self, EngineError> {
        let file = open_input(path)?;

        let mut reader = ReaderBuilder::new()
            .delimiter(options.delimiter)
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        validate_headers(headers.iter())?;

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
        })
    }

    /// Column names of the source file, trimmed
    pub fn headers(&self) -> Vec<String> {
        self.headers.iter().map(str::to_string).collect()
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerRecord, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self.record.position().map(|p| p.line()).unwrap_or_default();
                let fields = self.record.iter().map(str::to_string).collect();

                Some(
                    self.record
                        .deserialize::<CsvRecord>(Some(&self.headers))
                        .map_err(EngineError::from)
                        .and_then(|csv_record| build_record(line, fields, csv_record)),
                )
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}
