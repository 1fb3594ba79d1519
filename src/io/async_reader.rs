//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading over ledger records from a CSV export.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - Header validation on open, like the synchronous reader
//! - Batch reading for efficient parallel processing
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of Result<LedgerRecord, EngineError>
//!                  ↓
//!           csv_format module
//!           (CsvRecord, build_record)
//! ```

use crate::io::csv_format::{build_record, validate_headers, CsvOptions, CsvRecord};
use crate::types::{EngineError, LedgerRecord};
use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::io::AsyncRead;

/// Asynchronous CSV reader
///
/// Yields records in batches. Failed rows stay in the batch as `Err` so the
/// caller decides whether to skip them or abort.
pub struct AsyncReader<R: AsyncRead + Unpin + Send> {
    csv_reader: csv_async::AsyncReader<R>,
    headers: StringRecord,
}

impl<R: AsyncRead + Unpin + Send> AsyncReader<R> {
    /// Create a new AsyncReader and validate the header row
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingColumns` if a required column is absent,
    /// or a parse error if the header cannot be read.
    pub async fn new(reader: R, options: CsvOptions) -> Result<Self, EngineError> {
        let mut csv_reader = AsyncReaderBuilder::new()
            .delimiter(options.delimiter)
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_reader(reader);

        let headers = csv_reader.headers().await?.clone();
        validate_headers(headers.iter())?;

        Ok(Self {
            csv_reader,
            headers,
        })
    }

    /// Column names of the source file, trimmed
    pub fn headers(&self) -> Vec<String> {
        self.headers.iter().map(str::to_string).collect()
    }

    /// Read up to `batch_size` records
    ///
    /// Returns an empty vector when the end of the file is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Result<LedgerRecord, EngineError>> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut record = StringRecord::new();

        while batch.len() < batch_size {
            match self.csv_reader.read_record(&mut record).await {
                Ok(false) => break,
                Ok(true) => batch.push(self.convert(&record)),
                Err(e) => batch.push(Err(e.into())),
            }
        }

        batch
    }

    fn convert(&self, record: &StringRecord) -> Result<LedgerRecord, EngineError> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let fields = record.iter().map(str::to_string).collect();

        let csv_record = record.deserialize::<CsvRecord>(Some(&self.headers))?;
        build_record(line, fields, csv_record)
    }
}
