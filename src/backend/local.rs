use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::store::{self, Param};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("sqlite error: {0}")]
    Sqlite(sqlx::Error),
}

/// SQLite database opened through `sqlx`.
pub struct LocalDatabase {
    pool: SqlitePool,
}

#[derive(Clone)]
pub struct Client {
    pool: SqlitePool,
}

impl LocalDatabase {
    pub async fn open(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // every connection to `:memory:` would see its own empty database
        let max_connections = if url.contains(":memory:") { 1 } else { 4 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        debug!(url, "opened local database");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn client(&self) -> Client {
        Client {
            pool: self.pool.clone(),
        }
    }
}

impl store::Client for Client {
    type Error = Error;

    async fn query<R>(&self, statement: &str, params: &[Param]) -> Result<Vec<R>, Self::Error>
    where
        R: serde::de::DeserializeOwned
            + for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow>
            + Send
            + Unpin,
    {
        let query = params.iter().fold(
            sqlx::query_as::<sqlx::Sqlite, R>(statement),
            |query, param| match param {
                Param::Null => query.bind(None::<String>),
                Param::Integer(value) => query.bind(*value),
                Param::Float(value) => query.bind(*value),
                Param::Text(value) => query.bind(value.clone()),
            },
        );
        query.fetch_all(&self.pool).await.map_err(Error::Sqlite)
    }

    async fn execute(&self, statement: &str, params: &[Param]) -> Result<u64, Self::Error> {
        let query = params
            .iter()
            .fold(sqlx::query::<sqlx::Sqlite>(statement), |query, param| {
                match param {
                    Param::Null => query.bind(None::<String>),
                    Param::Integer(value) => query.bind(*value),
                    Param::Float(value) => query.bind(*value),
                    Param::Text(value) => query.bind(value.clone()),
                }
            });
        let result = query.execute(&self.pool).await.map_err(Error::Sqlite)?;
        Ok(result.rows_affected())
    }
}
