//! Turso (libSQL) over its HTTP pipeline API.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, trace, warn};
use url::Url;

use crate::store::{self, Param};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    #[error("turso error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("query failed: {message}")]
    QueryFailed {
        message: String,
        code: Option<String>,
    },
    #[error("empty pipeline result")]
    EmptyResult,
    #[error("parse JSON error: {0}")]
    ParseJson(serde_json::Error),
    #[error("failed to decode row: {0}")]
    DecodeRow(serde_json::Error),
}

pub struct Client {
    token: String,
    client: reqwest::Client,
    url: Url,
}

impl Client {
    /// `database_url` may use the `libsql://` scheme, it is spoken to over https.
    pub fn new(database_url: &str, token: impl Into<String>) -> Result<Self, url::ParseError> {
        let base = match database_url.strip_prefix("libsql://") {
            Some(rest) => format!("https://{rest}"),
            None => database_url.to_owned(),
        };
        let url = format!("{}/v2/pipeline", base.trim_end_matches('/')).parse()?;
        Ok(Self {
            token: token.into(),
            client: reqwest::Client::new(),
            url,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.url
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Arg<'a> {
    Null,
    Integer { value: String },
    Float { value: f64 },
    Text { value: &'a str },
}

impl<'a> From<&'a Param> for Arg<'a> {
    fn from(param: &'a Param) -> Self {
        match param {
            Param::Null => Arg::Null,
            // integers travel as decimal strings to keep 64-bit precision
            Param::Integer(value) => Arg::Integer {
                value: value.to_string(),
            },
            Param::Float(value) => Arg::Float { value: *value },
            Param::Text(value) => Arg::Text { value },
        }
    }
}

#[derive(Serialize)]
struct Statement<'a> {
    sql: &'a str,
    args: Vec<Arg<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum PipelineRequest<'a> {
    Execute { stmt: Statement<'a> },
    Close,
}

#[derive(Serialize)]
struct Pipeline<'a> {
    requests: Vec<PipelineRequest<'a>>,
}

#[derive(Deserialize, Debug)]
struct Column {
    name: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Value {
    Null,
    Integer { value: String },
    Float { value: f64 },
    Text { value: String },
    Blob { base64: String },
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Integer { value } => match value.parse::<i64>() {
                Ok(i) => serde_json::Value::Number(i.into()),
                Err(_) => serde_json::Value::String(value),
            },
            Value::Float { value } => serde_json::Number::from_f64(value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text { value } => serde_json::Value::String(value),
            Value::Blob { base64 } => serde_json::Value::String(base64),
        }
    }
}

#[derive(Deserialize, Debug)]
struct StatementResult {
    #[serde(default)]
    cols: Vec<Column>,
    #[serde(default)]
    rows: Vec<Vec<Value>>,
    #[serde(default)]
    affected_row_count: u64,
}

#[derive(Deserialize, Debug)]
struct StreamError {
    message: String,
    code: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StreamResponse {
    Execute { result: StatementResult },
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "lowercase")]
enum StreamResult {
    Ok { response: StreamResponse },
    Error { error: StreamError },
}

#[derive(Deserialize, Debug)]
struct PipelineResponse {
    #[serde(default)]
    results: Vec<StreamResult>,
}

impl StatementResult {
    fn decode<R: DeserializeOwned>(self) -> Result<Vec<R>, Error> {
        let names = self
            .cols
            .into_iter()
            .enumerate()
            .map(|(index, col)| col.name.unwrap_or_else(|| index.to_string()))
            .collect::<Vec<_>>();
        self.rows
            .into_iter()
            .map(|row| {
                let object = names
                    .iter()
                    .cloned()
                    .zip(row.into_iter().map(serde_json::Value::from))
                    .collect::<serde_json::Map<_, _>>();
                serde_json::from_value::<R>(serde_json::Value::Object(object))
                    .map_err(Error::DecodeRow)
            })
            .collect()
    }
}

impl Client {
    async fn run(&self, statement: &str, params: &[Param]) -> Result<StatementResult, Error> {
        let body = Pipeline {
            requests: vec![
                PipelineRequest::Execute {
                    stmt: Statement {
                        sql: statement,
                        args: params.iter().map(Arg::from).collect(),
                    },
                },
                PipelineRequest::Close,
            ],
        };
        let response = self
            .client
            .post(self.url.clone())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;
        let status = response.status();
        let text = response.text().await.map_err(Error::Transport)?;
        trace!(text = %text, "turso response");
        if !status.is_success() {
            warn!(%status, statement, "turso rejected request");
            return Err(Error::Status { status, body: text });
        }
        let response =
            serde_json::from_str::<PipelineResponse>(&text).map_err(Error::ParseJson)?;
        let Some(first) = response.results.into_iter().next() else {
            warn!(statement, "empty pipeline result");
            return Err(Error::EmptyResult);
        };
        match first {
            StreamResult::Ok {
                response: StreamResponse::Execute { result },
            } => {
                debug!(
                    rows = result.rows.len(),
                    affected = result.affected_row_count,
                    "statement succeeded"
                );
                Ok(result)
            }
            StreamResult::Ok {
                response: StreamResponse::Other,
            } => Err(Error::EmptyResult),
            StreamResult::Error { error } => {
                warn!(error = %error.message, statement, "failed to execute statement");
                Err(Error::QueryFailed {
                    message: error.message,
                    code: error.code,
                })
            }
        }
    }
}

impl store::Client for Client {
    type Error = Error;

    async fn query<R>(&self, statement: &str, params: &[Param]) -> Result<Vec<R>, Self::Error>
    where
        R: DeserializeOwned + for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> + Send + Unpin,
    {
        self.run(statement, params).await?.decode()
    }

    async fn execute(&self, statement: &str, params: &[Param]) -> Result<u64, Self::Error> {
        Ok(self.run(statement, params).await?.affected_row_count)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::{Arg, Client, PipelineResponse, StreamResponse, StreamResult};
    use crate::store::Param;

    #[test]
    fn test_libsql_scheme_is_rewritten() {
        let client = Client::new("libsql://census-org.turso.io", "token").unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://census-org.turso.io/v2/pipeline"
        );
        let client = Client::new("https://census-org.turso.io/", "token").unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://census-org.turso.io/v2/pipeline"
        );
    }

    #[test]
    fn test_args_encoding() {
        let params = [
            Param::Null,
            Param::Integer(7),
            Param::Text("x".into()),
            Param::Float(1.5),
        ];
        let args = params.iter().map(Arg::from).collect::<Vec<_>>();
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            serde_json::json!([
                {"type": "null"},
                {"type": "integer", "value": "7"},
                {"type": "text", "value": "x"},
                {"type": "float", "value": 1.5},
            ])
        );
    }

    #[test]
    fn test_decode_rows() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Row {
            id: i64,
            ts: Option<String>,
        }
        let response: PipelineResponse = serde_json::from_value(serde_json::json!({
            "baton": null,
            "results": [
                {"type": "ok", "response": {"type": "execute", "result": {
                    "cols": [{"name": "id", "decltype": "INTEGER"}, {"name": "ts", "decltype": "TEXT"}],
                    "rows": [
                        [{"type": "integer", "value": "1"}, {"type": "text", "value": "2026-03-01"}],
                        [{"type": "integer", "value": "2"}, {"type": "null"}]
                    ],
                    "affected_row_count": 0,
                    "last_insert_rowid": null
                }}},
                {"type": "ok", "response": {"type": "close"}}
            ]
        }))
        .unwrap();
        let mut results = response.results.into_iter();
        let Some(StreamResult::Ok {
            response: StreamResponse::Execute { result },
        }) = results.next()
        else {
            panic!("expected execute result");
        };
        assert_eq!(
            result.decode::<Row>().unwrap(),
            vec![
                Row {
                    id: 1,
                    ts: Some("2026-03-01".into())
                },
                Row { id: 2, ts: None }
            ]
        );
        assert!(matches!(
            results.next(),
            Some(StreamResult::Ok {
                response: StreamResponse::Other
            })
        ));
    }

    #[test]
    fn test_error_result() {
        let response: PipelineResponse = serde_json::from_value(serde_json::json!({
            "results": [{"type": "error", "error": {"message": "no such table: responses", "code": "SQLITE_ERROR"}}]
        }))
        .unwrap();
        assert!(matches!(
            response.results.first(),
            Some(StreamResult::Error { error }) if error.message == "no such table: responses"
        ));
    }
}
