use std::{fs, io::Read, path::Path};

use model::{
    equipment::Equipment, event::Event, location::Location, waybill::Waybill, EntityKind,
};
use railcar::database::{Database, DatabaseOperations, DatabaseTransaction, Repo};

use crate::{
    data_model::{self, CsvRecord, Row},
    IngestError, IngestResult,
};

/// Outcome of a single dataset ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub kind: EntityKind,
    /// Data rows in the file, header excluded.
    pub rows: usize,
    pub skipped: usize,
    pub inserted: usize,
}

/// Replaces the contents of a dataset with the rows of a csv file.
///
/// Ingestions of the same kind must not run concurrently.
pub struct Ingester<D: Database> {
    database: D,
}

impl<D: Database> Ingester<D> {
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &D {
        &self.database
    }

    /// Ingests `path` into the dataset `kind` and returns the number of rows
    /// stored.
    pub async fn ingest_kind(&self, kind: EntityKind, path: &Path) -> IngestResult<usize> {
        let report = match kind {
            EntityKind::Locations => self.ingest::<Location>(path).await?,
            EntityKind::Equipment => self.ingest::<Equipment>(path).await?,
            EntityKind::Waybills => self.ingest::<Waybill>(path).await?,
            EntityKind::Events => self.ingest::<Event>(path).await?,
        };
        Ok(report.inserted)
    }

    pub async fn ingest<T>(&self, path: &Path) -> IngestResult<IngestReport>
    where
        T: CsvRecord,
        D::Transaction: Repo<T>,
    {
        log::info!("ingesting {} from {}", T::KIND, path.display());
        self.reset(T::KIND).await?;

        let content = fs::read(path).map_err(|source| IngestError::FileAccess {
            path: path.to_owned(),
            source,
        })?;
        self.load::<T, _>(content.as_slice()).await
    }

    /// Like [`Ingester::ingest`], reading csv data from any reader. Failing
    /// reads are [`IngestError::Read`].
    pub async fn ingest_reader<T, R>(&self, reader: R) -> IngestResult<IngestReport>
    where
        T: CsvRecord,
        R: Read,
        D::Transaction: Repo<T>,
    {
        log::info!("ingesting {}", T::KIND);
        self.reset(T::KIND).await?;
        self.load::<T, R>(reader).await
    }

    async fn reset(&self, kind: EntityKind) -> IngestResult<()> {
        let mut auto = self.database.auto();
        auto.ensure_schema(kind).await?;
        auto.reset(kind).await?;
        log::info!("reset {} table", kind);
        Ok(())
    }

    async fn load<T, R>(&self, reader: R) -> IngestResult<IngestReport>
    where
        T: CsvRecord,
        R: Read,
        D::Transaction: Repo<T>,
    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let found = reader.byte_headers()?.len();
        if found != T::COLUMNS.len() {
            return Err(IngestError::HeaderMismatch {
                kind: T::KIND,
                expected: T::COLUMNS.len(),
                found,
            });
        }

        let records = reader
            .byte_records()
            .collect::<Result<Vec<_>, csv::Error>>()?;
        let rows = records.len();

        let mut parsed = Vec::with_capacity(rows);
        for (index, record) in records.into_iter().enumerate() {
            let row = data_model::decode(record, T::COLUMNS)
                .and_then(|record| T::from_row(&Row::new(&record, T::COLUMNS)));
            match row {
                Ok(value) => parsed.push(value),
                Err(why) => log::warn!("skipping line {}: {}", index, why),
            }
        }

        let mut report = IngestReport {
            kind: T::KIND,
            rows,
            skipped: rows - parsed.len(),
            inserted: 0,
        };

        if !parsed.is_empty() {
            log::info!("inserting {} {}...", parsed.len(), T::KIND);
            let mut transaction = self.database.transaction().await?;
            Repo::<T>::insert_all(&mut transaction, &parsed).await?;
            transaction.commit().await?;
            report.inserted = parsed.len();
        }

        log::info!(
            "ingested {} {} ({} skipped)",
            report.inserted,
            report.kind,
            report.skipped
        );
        Ok(report)
    }
}
