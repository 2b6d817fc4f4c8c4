use std::{env, error::Error};

use async_trait::async_trait;
use model::EntityKind;
use queries::convert_error;
use railcar::database::{
    Database, DatabaseAutocommit, DatabaseOperations, DatabaseTransaction, Result,
};
use sqlx::Transaction;

pub mod data_model;
pub mod queries;

pub struct DatabaseConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Option<Self> {
        let username = env::var("DATABASE_USER").ok()?;
        let password = env::var("DATABASE_PASSWORD").ok()?;
        let hostname = env::var("DATABASE_HOST").ok()?;
        let port: u16 = env::var("DATABASE_PORT").ok()?.parse().ok()?;
        let database = env::var("DATABASE_NAME").ok()?;
        Some(Self {
            username,
            password,
            hostname,
            port,
            database,
        })
    }

    pub(self) fn postgres_url(self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

#[derive(Clone)]
pub struct PgDatabase {
    connection: sqlx::PgPool,
}

pub struct PgDatabaseTransaction<'a> {
    tx: Transaction<'a, sqlx::Postgres>,
}

#[async_trait]
impl<'a> DatabaseTransaction for PgDatabaseTransaction<'a> {
    async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(convert_error)
    }
}

pub struct PgDatabaseAutocommit {
    pool: sqlx::PgPool,
}

impl DatabaseAutocommit for PgDatabaseAutocommit {}

impl PgDatabaseAutocommit {
    /// Bulk inserts span several statements and run in their own transaction.
    pub(crate) async fn begin(&self) -> Result<Transaction<'static, sqlx::Postgres>> {
        self.pool.begin().await.map_err(convert_error)
    }
}

impl PgDatabase {
    /// Connects to postgres. Tables are created lazily by
    /// [`DatabaseOperations::ensure_schema`].
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> std::result::Result<Self, Box<dyn Error + Send + Sync>> {
        let url = database_connection_info.postgres_url();
        let pool = sqlx::postgres::PgPool::connect(&url).await?;

        Ok(Self { connection: pool })
    }
}

#[async_trait]
impl Database for PgDatabase {
    type Transaction = PgDatabaseTransaction<'static>;
    type Autocommit = PgDatabaseAutocommit;

    fn auto(&self) -> Self::Autocommit {
        PgDatabaseAutocommit {
            pool: self.connection.clone(),
        }
    }

    async fn transaction(&self) -> Result<Self::Transaction> {
        let tx: Transaction<'_, sqlx::Postgres> =
            self.connection.begin().await.map_err(convert_error)?;

        Ok(PgDatabaseTransaction { tx })
    }
}

#[async_trait]
impl DatabaseOperations for PgDatabaseAutocommit {
    async fn ensure_schema(&mut self, kind: EntityKind) -> Result<()> {
        queries::schema::ensure_schema(&self.pool, kind).await
    }

    async fn reset(&mut self, kind: EntityKind) -> Result<()> {
        queries::schema::reset(&self.pool, kind).await
    }
}

#[async_trait]
impl<'a> DatabaseOperations for PgDatabaseTransaction<'a> {
    async fn ensure_schema(&mut self, kind: EntityKind) -> Result<()> {
        queries::schema::ensure_schema(&mut *self.tx, kind).await
    }

    async fn reset(&mut self, kind: EntityKind) -> Result<()> {
        queries::schema::reset(&mut *self.tx, kind).await
    }
}
