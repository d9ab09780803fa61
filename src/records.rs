// Tabular reader: turns a header-first delimited file into records keyed by
// column name. Rows are produced lazily so callers decide whether to buffer
// the whole file or pull one row at a time.

use crate::error::SourceError;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// One data row: column name to trimmed cell value.
pub type Record = HashMap<String, String>;

/// Lazy sequence of records read from a CSV source.
///
/// The header row is consumed when the sequence is created. Every header and
/// value is trimmed, blank lines are skipped and a row with a different
/// number of fields than the header is reported as a parse error. I/O and
/// UTF-8 decoding failures are read errors naming the source.
pub struct Records<R> {
    origin: PathBuf,
    headers: StringRecord,
    rows: StringRecordsIntoIter<R>,
}

impl Records<File> {
    /// Open `path` and read its header row.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| SourceError::read(path, err))?;
        Records::with_origin(file, path.to_path_buf())
    }
}

impl<R: io::Read> Records<R> {
    /// Read records from any byte source; errors name it `<input>`.
    pub fn from_reader(input: R) -> Result<Self, SourceError> {
        Records::with_origin(input, PathBuf::from("<input>"))
    }

    fn with_origin(input: R, origin: PathBuf) -> Result<Self, SourceError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(input);
        let headers = match reader.headers() {
            Ok(headers) => headers.clone(),
            Err(err) => return Err(classify(&origin, err)),
        };
        Ok(Records {
            origin,
            headers,
            rows: reader.into_records(),
        })
    }

    /// Column names in file order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }
}

impl<R: io::Read> Iterator for Records<R> {
    type Item = Result<Record, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(err) => return Some(Err(classify(&self.origin, err))),
        };
        let record = self
            .headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Some(Ok(record))
    }
}

/// I/O and decoding failures become `Read`, malformed structure `Parse`.
fn classify(origin: &Path, err: csv::Error) -> SourceError {
    match err.kind() {
        csv::ErrorKind::Io(_) | csv::ErrorKind::Utf8 { .. } => {}
        _ => return SourceError::Parse(err.to_string()),
    }
    let message = err.to_string();
    let source = match err.into_kind() {
        csv::ErrorKind::Io(io_err) => io_err,
        _ => io::Error::new(io::ErrorKind::InvalidData, message),
    };
    SourceError::read(origin, source)
}
