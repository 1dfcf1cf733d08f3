//! Concrete store backends.

use serde::de::DeserializeOwned;

use crate::{
    config::StoreConfig,
    store::{self, Param},
};

pub mod local;
pub mod turso;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("turso: {0}")]
    Turso(turso::Error),
    #[error("local: {0}")]
    Local(local::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("invalid database url: {0}")]
    Url(url::ParseError),
    #[error("failed to open sqlite database: {0}")]
    Sqlite(sqlx::Error),
}

/// Backend selected by configuration.
pub enum Backend {
    Turso(turso::Client),
    Local(local::Client),
}

impl Backend {
    pub async fn connect(config: &StoreConfig) -> Result<Self, ConnectError> {
        match config {
            StoreConfig::Turso { url, token } => turso::Client::new(url, token.as_str())
                .map(Self::Turso)
                .map_err(ConnectError::Url),
            StoreConfig::Local { url } => local::LocalDatabase::open(url)
                .await
                .map(|db| Self::Local(db.client()))
                .map_err(ConnectError::Sqlite),
        }
    }
}

impl store::Client for Backend {
    type Error = Error;

    async fn query<R>(&self, statement: &str, params: &[Param]) -> Result<Vec<R>, Self::Error>
    where
        R: DeserializeOwned + for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin,
    {
        match self {
            Self::Turso(client) => client.query(statement, params).await.map_err(Error::Turso),
            Self::Local(client) => client.query(statement, params).await.map_err(Error::Local),
        }
    }

    async fn execute(&self, statement: &str, params: &[Param]) -> Result<u64, Self::Error> {
        match self {
            Self::Turso(client) => client
                .execute(statement, params)
                .await
                .map_err(Error::Turso),
            Self::Local(client) => client
                .execute(statement, params)
                .await
                .map_err(Error::Local),
        }
    }
}
