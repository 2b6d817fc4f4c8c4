use std::{io, path::PathBuf};

use model::EntityKind;
use railcar::database::DatabaseError;
use thiserror::Error;

pub type IngestResult<T> = Result<T, IngestError>;

/// Errors which abort a whole ingestion. Errors of single rows are
/// [`crate::data_model::FieldError`]s and never end up here.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("opening file {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading from a source other than a file failed.
    #[error("reading csv: {0}")]
    Read(#[source] io::Error),

    /// The file is not valid csv, e.g. a row has a different number of
    /// fields than the header.
    #[error("parsing csv: {0}")]
    MalformedCsv(#[source] csv::Error),

    #[error("{kind} header has {found} columns, expected {expected}")]
    HeaderMismatch {
        kind: EntityKind,
        expected: usize,
        found: usize,
    },

    #[error("storage: {0}")]
    Storage(#[from] DatabaseError),
}

impl From<csv::Error> for IngestError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            Self::Read(error.into())
        } else {
            Self::MalformedCsv(error)
        }
    }
}
