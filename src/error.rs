// Error taxonomy shared by the library modules. The binary wraps these in
// `anyhow` with context, so the variants only describe the cause.

use std::error::Error as _;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load one of the two input files (the CSV or the template).
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be opened, read or decoded as UTF-8.
    #[error("could not read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but its content is malformed.
    #[error("{0}")]
    Parse(String),
}

impl SourceError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SourceError::Read {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

/// A request that never produced an HTTP response (connect, DNS, timeout,
/// or a body that could not be read).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // Depending on the reqwest version the root cause (e.g. "connection
        // refused") may be missing from Display, so walk the chain.
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        TransportError(message)
    }
}
