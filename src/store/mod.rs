//! Relational store access.
//!
//! Backends implement [`Client`]; the typed `responses` operations are built
//! on top of it and never know which backend they talk to.

use serde::{Serialize, de::DeserializeOwned};

pub mod responses;
pub mod sql;

/// Positional statement argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Param {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

pub trait Client {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Run a statement and decode every returned row.
    fn query<R>(
        &self,
        statement: &str,
        params: &[Param],
    ) -> impl Future<Output = Result<Vec<R>, Self::Error>>
    where
        R: DeserializeOwned + for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin;

    /// Run a statement for its effect, returning the affected row count.
    fn execute(
        &self,
        statement: &str,
        params: &[Param],
    ) -> impl Future<Output = Result<u64, Self::Error>>;
}
