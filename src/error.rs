//! Error types for osis2usfm operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting an OSIS document to USFM.
#[derive(Error, Debug)]
pub enum Error {
    #[error("usage: {0}")]
    Usage(String),

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("unexpected document structure in {}: {message}", path.display())]
    Structure { path: PathBuf, message: String },

    #[error("{}:{line}: expected `ID=Name`, found {content:?}", path.display())]
    Format {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("book #{ordinal} has no canonical identifier (only {limit} books are known)")]
    IndexOutOfRange { ordinal: usize, limit: usize },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why an input document could not be loaded.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Read(#[from] io::Error),

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed XML at byte {position}: {message}")]
    Malformed { position: u64, message: &'static str },
}

impl Error {
    /// Attach a path to a [`ParseError`].
    pub(crate) fn parse(path: impl Into<PathBuf>, source: impl Into<ParseError>) -> Self {
        Error::Parse {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
