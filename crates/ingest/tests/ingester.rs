use std::{
    fs, io,
    path::{Path, PathBuf},
};

use ingest::{data_model::CsvRecord, IngestError, Ingester};
use model::{
    equipment::Equipment, event::Event, location::Location, waybill::Waybill, EntityKind,
};
use railcar::{
    database::{Database, Repo},
    memory::{InMemoryAutocommit, InMemoryDatabase},
};
use tempfile::TempDir;

/// Collects the log records of the current thread.
mod logs {
    use std::cell::RefCell;

    use log::{Level, LevelFilter, Log, Metadata, Record};

    thread_local! {
        static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
    }

    struct Capture;

    impl Log for Capture {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            RECORDS.with(|records| {
                records
                    .borrow_mut()
                    .push((record.level(), record.args().to_string()))
            });
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture;

    pub fn capture() {
        // only the first call in a test binary installs it
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(LevelFilter::Trace);
        RECORDS.with(|records| records.borrow_mut().clear());
    }

    pub fn messages(level: Level) -> Vec<String> {
        RECORDS.with(|records| {
            records
                .borrow()
                .iter()
                .filter(|(record_level, _)| *record_level == level)
                .map(|(_, message)| message.clone())
                .collect()
        })
    }
}

fn header<T: CsvRecord>() -> String {
    T::COLUMNS
        .iter()
        .map(|column| column.name)
        .collect::<Vec<_>>()
        .join(",")
}

fn equipment_line(id: usize, status: &str, date_added: &str) -> String {
    format!("{id},Acme Chemicals,Tank Fleet,TILX {id},{status},{date_added},")
}

fn location_line(id: usize) -> String {
    format!("{id},KANSAS CITY,KANSAS CITY,ARGENTINE,34400,BNSF,563500,KS,CT,-94.6786,39.0814,US")
}

fn waybill_line(id: usize) -> String {
    format!(
        "{id},TILX {id},2024-01-02T03:04:05Z,W{id},,BNSF,E,L,BNSF,UP,BNSF,B{id},,\
         263000,63000,263000,0,A,2818184,SODIUM HYDROXIDE,1,2,[],[]"
    )
}

fn event_line(id: usize, waybill_id: usize) -> String {
    format!(
        "{id},TILX 1,2024-01-02T03:04:05Z,A,BNSF,2024-01-02 03:10:00,BNSF,L,AA,\
         Arrival at Intermediate Station,MKCKBAR1,M,1,{waybill_id}"
    )
}

fn write_csv<T: CsvRecord>(dir: &TempDir, lines: &[String]) -> PathBuf {
    let path = dir.path().join(format!("{}.csv", T::KIND));
    let mut content = header::<T>();
    for line in lines {
        content.push('\n');
        content.push_str(line);
    }
    content.push('\n');
    fs::write(&path, content).unwrap();
    path
}

async fn stored<T: model::Entity>(database: &InMemoryDatabase) -> Vec<T>
where
    InMemoryAutocommit: Repo<T>,
{
    Repo::<T>::get_all(&mut database.auto()).await.unwrap()
}

async fn ingest_all(ingester: &Ingester<InMemoryDatabase>, paths: &[(EntityKind, &Path)]) {
    for (kind, path) in paths {
        ingester.ingest_kind(*kind, path).await.unwrap();
    }
}

#[tokio::test]
async fn skips_rows_that_fail_to_parse() {
    let dir = TempDir::new().unwrap();
    let path = write_csv::<Equipment>(
        &dir,
        &[
            equipment_line(1, "true", "2020-01-01T00:00:00Z"),
            equipment_line(2, "true", "not-a-date"),
            equipment_line(3, "true", "2020-01-01 00:00:00"),
            equipment_line(4, "true", "2020-01-01 00:00:00.250000"),
        ],
    );

    logs::capture();
    let ingester = Ingester::new(InMemoryDatabase::new());
    let report = ingester.ingest::<Equipment>(&path).await.unwrap();
    assert_eq!(report.rows, 4);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.inserted, 3);

    let warnings = logs::messages(log::Level::Warn);
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(
        warnings[0].starts_with("skipping line 1: parsing date_added (column 5)"),
        "{}",
        warnings[0]
    );

    let ids = stored::<Equipment>(ingester.database())
        .await
        .into_iter()
        .map(|equipment| equipment.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["1", "3", "4"]);
}

#[tokio::test]
async fn equipment_status_is_stored_as_given() {
    let dir = TempDir::new().unwrap();
    let path = write_csv::<Equipment>(
        &dir,
        &[
            equipment_line(1, "Active", ""),
            equipment_line(2, "", ""),
            equipment_line(3, "true", ""),
        ],
    );

    let ingester = Ingester::new(InMemoryDatabase::new());
    let report = ingester.ingest::<Equipment>(&path).await.unwrap();
    assert_eq!(report.skipped, 0);
    assert_eq!(report.inserted, 3);

    let statuses = stored::<Equipment>(ingester.database())
        .await
        .into_iter()
        .map(|equipment| equipment.equipment_status)
        .collect::<Vec<_>>();
    assert_eq!(statuses, vec!["Active", "", "true"]);
}

#[tokio::test]
async fn row_with_invalid_utf8_is_skipped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("locations.csv");
    let mut content = format!("{}\n{}\n", header::<Location>(), location_line(1)).into_bytes();
    content.extend_from_slice(b"2,Ac\xffme,KANSAS CITY,ARGENTINE,34400,BNSF,563500,KS,CT,,,US\n");
    fs::write(&path, content).unwrap();

    logs::capture();
    let ingester = Ingester::new(InMemoryDatabase::new());
    let report = ingester.ingest::<Location>(&path).await.unwrap();
    assert_eq!(report.rows, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.inserted, 1);

    let warnings = logs::messages(log::Level::Warn);
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert!(
        warnings[0].starts_with("skipping line 1: parsing city (column 1)"),
        "{}",
        warnings[0]
    );

    let stored = stored::<Location>(ingester.database()).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, "1");
}

#[tokio::test]
async fn ingesting_twice_replaces_the_dataset() {
    let dir = TempDir::new().unwrap();
    let locations = write_csv::<Location>(&dir, &(1..=5).map(location_line).collect::<Vec<_>>());
    let waybills = write_csv::<Waybill>(&dir, &(1..=3).map(waybill_line).collect::<Vec<_>>());
    let events = write_csv::<Event>(
        &dir,
        &(1..=4).map(|id| event_line(id, id % 3 + 1)).collect::<Vec<_>>(),
    );
    let paths = [
        (EntityKind::Locations, locations.as_path()),
        (EntityKind::Waybills, waybills.as_path()),
        (EntityKind::Events, events.as_path()),
    ];

    let ingester = Ingester::new(InMemoryDatabase::new());
    ingest_all(&ingester, &paths).await;
    let first_locations = stored::<Location>(ingester.database()).await;
    let first_waybills = stored::<Waybill>(ingester.database()).await;
    let first_events = stored::<Event>(ingester.database()).await;
    assert_eq!(first_locations.len(), 5);
    assert_eq!(first_waybills.len(), 3);
    assert_eq!(first_events.len(), 4);

    ingest_all(&ingester, &paths).await;
    assert_eq!(stored::<Location>(ingester.database()).await, first_locations);
    assert_eq!(stored::<Waybill>(ingester.database()).await, first_waybills);
    assert_eq!(stored::<Event>(ingester.database()).await, first_events);
}

#[tokio::test]
async fn other_kinds_are_untouched() {
    let dir = TempDir::new().unwrap();
    let locations = write_csv::<Location>(&dir, &[location_line(1), location_line(2)]);
    let waybills = write_csv::<Waybill>(&dir, &[waybill_line(1)]);
    let events = write_csv::<Event>(&dir, &[event_line(1, 1), event_line(2, 1)]);
    let equipment = write_csv::<Equipment>(&dir, &[equipment_line(1, "Active", "")]);

    let ingester = Ingester::new(InMemoryDatabase::new());
    ingest_all(
        &ingester,
        &[
            (EntityKind::Locations, locations.as_path()),
            (EntityKind::Waybills, waybills.as_path()),
            (EntityKind::Events, events.as_path()),
        ],
    )
    .await;
    let before = (
        stored::<Location>(ingester.database()).await,
        stored::<Waybill>(ingester.database()).await,
        stored::<Event>(ingester.database()).await,
    );

    ingest_all(
        &ingester,
        &[
            (EntityKind::Equipment, equipment.as_path()),
            (EntityKind::Equipment, equipment.as_path()),
        ],
    )
    .await;
    let after = (
        stored::<Location>(ingester.database()).await,
        stored::<Waybill>(ingester.database()).await,
        stored::<Event>(ingester.database()).await,
    );
    assert_eq!(after, before);
    assert_eq!(after.0.len(), 2);
    assert_eq!(after.1.len(), 1);
    assert_eq!(after.2.len(), 2);
}

#[tokio::test]
async fn malformed_file_leaves_the_table_empty() {
    let good_dir = TempDir::new().unwrap();
    let good = write_csv::<Equipment>(&good_dir, &[equipment_line(1, "Active", "")]);
    let bad_dir = TempDir::new().unwrap();
    let bad = write_csv::<Equipment>(
        &bad_dir,
        &["9,Acme Chemicals,Tank Fleet,TILX 9,Active".to_owned()],
    );

    let ingester = Ingester::new(InMemoryDatabase::new());
    ingester.ingest::<Equipment>(&good).await.unwrap();

    let err = ingester.ingest::<Equipment>(&bad).await.unwrap_err();
    assert!(matches!(err, IngestError::MalformedCsv(_)), "{err}");
    assert!(stored::<Equipment>(ingester.database()).await.is_empty());
}

#[tokio::test]
async fn failed_bulk_insert_stores_nothing() {
    let dir = TempDir::new().unwrap();
    let mut lines = (1..=49)
        .map(|id| equipment_line(id, "Active", "2020-01-01T00:00:00Z"))
        .collect::<Vec<_>>();
    lines.push(equipment_line(17, "Active", "2020-01-01T00:00:00Z"));
    let path = write_csv::<Equipment>(&dir, &lines);

    let ingester = Ingester::new(InMemoryDatabase::new());
    let err = ingester.ingest::<Equipment>(&path).await.unwrap_err();
    assert!(matches!(err, IngestError::Storage(_)), "{err}");
    assert!(stored::<Equipment>(ingester.database()).await.is_empty());
}

#[tokio::test]
async fn missing_file_is_a_file_access_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("events.csv");

    let ingester = Ingester::new(InMemoryDatabase::new());
    let err = ingester
        .ingest_kind(EntityKind::Events, &path)
        .await
        .unwrap_err();
    match err {
        IngestError::FileAccess { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error {other}"),
    }
}

#[tokio::test]
async fn unreadable_file_is_a_file_access_error() {
    let dir = TempDir::new().unwrap();

    let ingester = Ingester::new(InMemoryDatabase::new());
    let err = ingester
        .ingest_kind(EntityKind::Locations, dir.path())
        .await
        .unwrap_err();
    match err {
        IngestError::FileAccess { path, .. } => assert_eq!(path, dir.path()),
        other => panic!("unexpected error {other}"),
    }
}

struct FailingReader;

impl io::Read for FailingReader {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "device gone"))
    }
}

#[tokio::test]
async fn failing_reader_is_a_read_error() {
    let ingester = Ingester::new(InMemoryDatabase::new());
    let err = ingester
        .ingest_reader::<Location, _>(FailingReader)
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::Read(_)), "{err}");
}

#[tokio::test]
async fn header_with_wrong_column_count_is_rejected() {
    let ingester = Ingester::new(InMemoryDatabase::new());
    let csv = "id,city,state\n1,KANSAS CITY,KS\n";

    let err = ingester
        .ingest_reader::<Location, _>(csv.as_bytes())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        IngestError::HeaderMismatch {
            kind: EntityKind::Locations,
            expected: 12,
            found: 3
        }
    ));
}

#[tokio::test]
async fn header_only_file_stores_nothing() {
    let ingester = Ingester::new(InMemoryDatabase::new());
    let csv = format!("{}\n", header::<Equipment>());

    let report = ingester
        .ingest_reader::<Equipment, _>(csv.as_bytes())
        .await
        .unwrap();
    assert_eq!(report.inserted, 0);
    assert_eq!(report.rows, 0);

    assert!(stored::<Equipment>(ingester.database()).await.is_empty());
}
