//! Typed operations on stored questionnaire responses.

use serde::Deserialize;
use sqlx::FromRow;
use tracing::debug;

use crate::record::{ResponseRecord, ResponseRow, ResponseSummary, SummaryRow};

use super::{Client, Param, sql};

#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error("store: {0}")]
    Store(E),
    #[error("insert returned no id")]
    MissingId,
}

pub async fn init_schema<C: Client>(client: &C) -> Result<(), Error<C::Error>> {
    client
        .execute(sql::CREATE_TABLE, &[])
        .await
        .map_err(Error::Store)?;
    Ok(())
}

/// Store a submission and return its new id.
pub async fn insert<C: Client>(
    client: &C,
    ext_id: Option<&str>,
    ts: &str,
    answers_json: &str,
) -> Result<i64, Error<C::Error>> {
    #[derive(Deserialize, FromRow)]
    struct Inserted {
        id: i64,
    }
    let rows = client
        .query::<Inserted>(
            sql::INSERT,
            &[ext_id.into(), ts.into(), answers_json.into()],
        )
        .await
        .map_err(Error::Store)?;
    let id = rows.first().map(|row| row.id).ok_or(Error::MissingId)?;
    debug!(id, "stored response");
    Ok(id)
}

pub async fn fetch_one<C: Client>(
    client: &C,
    id: i64,
) -> Result<Option<ResponseRecord>, Error<C::Error>> {
    let rows = client
        .query::<ResponseRow>(sql::SELECT_BY_ID, &[id.into()])
        .await
        .map_err(Error::Store)?;
    Ok(rows.into_iter().next().map(ResponseRecord::from))
}

/// Every record, ascending by id.
pub async fn fetch_all<C: Client>(client: &C) -> Result<Vec<ResponseRecord>, Error<C::Error>> {
    let rows = client
        .query::<ResponseRow>(sql::SELECT_ALL, &[])
        .await
        .map_err(Error::Store)?;
    Ok(rows.into_iter().map(ResponseRecord::from).collect())
}

/// Records with the given ids, ascending by id whatever the input order.
pub async fn fetch_many<C: Client>(
    client: &C,
    ids: &[i64],
) -> Result<Vec<ResponseRecord>, Error<C::Error>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let params = ids.iter().copied().map(Param::from).collect::<Vec<_>>();
    let rows = client
        .query::<ResponseRow>(&sql::select_by_ids(ids.len()), &params)
        .await
        .map_err(Error::Store)?;
    Ok(rows.into_iter().map(ResponseRecord::from).collect())
}

pub async fn list<C: Client>(client: &C) -> Result<Vec<ResponseSummary>, Error<C::Error>> {
    let rows = client
        .query::<SummaryRow>(sql::SELECT_SUMMARIES, &[])
        .await
        .map_err(Error::Store)?;
    Ok(rows.into_iter().map(ResponseSummary::from_row).collect())
}

/// Remove a record. `false` when no record had that id.
pub async fn delete<C: Client>(client: &C, id: i64) -> Result<bool, Error<C::Error>> {
    let affected = client
        .execute(sql::DELETE_BY_ID, &[id.into()])
        .await
        .map_err(Error::Store)?;
    Ok(affected > 0)
}
