use railcar::database::DatabaseError;
use sqlx::{query_builder::Separated, PgConnection, Postgres, QueryBuilder};

pub mod equipment;
pub mod event;
pub mod location;
pub mod schema;
pub mod waybill;

/// Upper bound of bind parameters in a single postgres statement.
const MAX_BIND_PARAMETERS: usize = u16::MAX as usize;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        _ => DatabaseError::Other(Box::new(why)),
    }
}

// bulk insert

/// Number of rows per `INSERT` statement so that the bind parameters of a
/// statement stay below the postgres limit.
pub(crate) fn chunk_size(columns: usize) -> usize {
    (MAX_BIND_PARAMETERS / columns.max(1)).max(1)
}

/// Inserts `values` with multi-row `INSERT ... VALUES` statements, one per
/// chunk, all on `conn`. Run it inside a transaction to make it atomic.
pub async fn insert_all<T, B>(
    conn: &mut PgConnection,
    table: &str,
    columns: &[&str],
    values: &[T],
    mut bind: B,
) -> Result<u64, sqlx::Error>
where
    B: FnMut(Separated<'_, 'static, Postgres, &'static str>, &T),
{
    let mut inserted = 0;
    for chunk in values.chunks(chunk_size(columns.len())) {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "INSERT INTO {} ({}) ",
            table,
            columns.join(", ")
        ));
        query.push_values(chunk, |row, value| bind(row, value));

        inserted += query.build().execute(&mut *conn).await?.rows_affected();
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunks_stay_below_bind_limit() {
        assert_eq!(chunk_size(24), 2730);
        assert!(chunk_size(24) * 24 <= MAX_BIND_PARAMETERS);
        assert_eq!(chunk_size(0), MAX_BIND_PARAMETERS);
    }

    #[test]
    fn row_not_found_is_not_found() {
        assert!(matches!(
            convert_error(sqlx::Error::RowNotFound),
            DatabaseError::NotFound
        ));
        assert!(matches!(
            convert_error(sqlx::Error::PoolTimedOut),
            DatabaseError::Other(_)
        ));
    }
}
