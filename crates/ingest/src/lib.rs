//! Loads the railcar csv datasets into a [`railcar::database::Database`].
//!
//! A dataset is read in full and parsed row by row. Rows that fail to parse
//! are logged and skipped. The remaining records are written in one bulk
//! insert.

pub mod coercion;
pub mod data_model;
pub mod error;
pub mod ingester;

pub use error::{IngestError, IngestResult};
pub use ingester::{IngestReport, Ingester};
