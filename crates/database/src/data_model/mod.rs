pub mod equipment;
pub mod event;
pub mod location;
pub mod waybill;

/// A row as it is selected from its table.
pub trait DatabaseRow {
    type Model;

    fn to_model(self) -> Self::Model;
}

pub fn to_models<R: DatabaseRow>(rows: Vec<R>) -> Vec<R::Model> {
    rows.into_iter().map(|row| row.to_model()).collect()
}
