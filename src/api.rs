//! HTTP surface as plain request to response mapping.
//!
//! Routes (an `/api` prefix is accepted and ignored):
//!
//! * `GET /export[?id=N | ?ids=1,2,3]`
//! * `GET /responses[?full=1]`, `POST /responses`
//! * `GET /responses/<id>`, `DELETE /responses/<id>`

use chrono::{NaiveDate, SecondsFormat, Utc};
use reqwest::{
    Method, StatusCode,
    header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap, HeaderValue, InvalidHeaderValue},
};
use serde::Serialize;
use tracing::{debug, error};

use crate::{
    export::{ExportError, Exported, Exporter, Selector},
    record::ResponseSummary,
    store::{Client, responses},
};

const JSON: &str = "application/json";

#[derive(Debug, thiserror::Error)]
pub enum ApiError<SE> {
    #[error("{0}")]
    Validation(&'static str),
    #[error("Not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("{0}")]
    Export(ExportError<SE>),
    #[error("{0}")]
    Store(responses::Error<SE>),
    #[error("failed to encode JSON: {0}")]
    Json(serde_json::Error),
    #[error("invalid header value: {0}")]
    Header(InvalidHeaderValue),
}

impl<SE> ApiError<SE> {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Export(error) => error.status(),
            Self::Store(_) | Self::Json(_) | Self::Header(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Path with optional query string, e.g. `/export?ids=1,2`.
    pub target: String,
    pub body: Vec<u8>,
}

impl Request {
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            body: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    fn split(&self) -> (&str, &str) {
        let (path, query) = self
            .target
            .split_once('?')
            .unwrap_or((self.target.as_str(), ""));
        let path = path.strip_prefix("/api").unwrap_or(path);
        (path.trim_end_matches('/'), query)
    }

    fn param(&self, name: &str) -> Option<String> {
        let (_, query) = self.split();
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Response {
    fn json<T: Serialize, SE>(status: StatusCode, value: &T) -> Result<Self, ApiError<SE>> {
        let body = serde_json::to_vec(value).map_err(ApiError::Json)?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    fn error(status: StatusCode, message: String) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        Self {
            status,
            headers,
            body: serde_json::json!({ "error": message }).to_string().into_bytes(),
        }
    }

    fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    fn attachment<SE>(exported: Exported) -> Result<Self, ApiError<SE>> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(exported.content_type));
        headers.insert(
            CONTENT_DISPOSITION,
            HeaderValue::try_from(format!("attachment; filename=\"{}\"", exported.filename))
                .map_err(ApiError::Header)?,
        );
        Ok(Self {
            status: StatusCode::OK,
            headers,
            body: exported.bytes,
        })
    }

    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Decoded `POST /responses` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ext_id: Option<String>,
    pub ts: String,
    /// Answers as they are stored: JSON text, or the client's string verbatim.
    pub answers: String,
}

impl Submission {
    pub fn parse<SE>(body: &[u8]) -> Result<Self, ApiError<SE>> {
        let invalid = |_| ApiError::Validation("Invalid JSON");
        let mut value: serde_json::Value = serde_json::from_slice(body).map_err(invalid)?;
        if let serde_json::Value::String(text) = &value {
            value = serde_json::from_str(text).map_err(invalid)?;
        }
        let field = |name: &str| value.get(name).filter(|value| truthy(value));

        let ext_id = field("id").map(|id| match id {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        });
        let ts = match field("ts") {
            Some(serde_json::Value::String(ts)) => ts.clone(),
            Some(other) => other.to_string(),
            None => Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let answers = match field("answers") {
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => "{}".to_owned(),
        };
        Ok(Self {
            ext_id,
            ts,
            answers,
        })
    }
}

fn truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::Number(number) => number.as_f64() != Some(0.0),
        serde_json::Value::String(text) => !text.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

#[derive(Serialize)]
struct Submitted {
    ok: bool,
    db_id: i64,
}

#[derive(Serialize)]
struct Listing {
    total: usize,
    items: Vec<ResponseSummary>,
}

/// Answer one request. Failures become JSON `{"error": ...}` responses.
pub async fn handle<C: Client>(client: &C, request: &Request, today: NaiveDate) -> Response {
    debug!(method = %request.method, path = %request.target, "request");
    match route(client, request, today).await {
        Ok(response) => response,
        Err(err) => {
            let status = err.status();
            if status.is_server_error() {
                error!(%err, path = %request.target, "request failed");
            }
            Response::error(status, err.to_string())
        }
    }
}

async fn route<C: Client>(
    client: &C,
    request: &Request,
    today: NaiveDate,
) -> Result<Response, ApiError<C::Error>> {
    let (path, _) = request.split();
    match path.split('/').collect::<Vec<_>>().as_slice() {
        ["", "export"] => export(client, request, today).await,
        ["", "responses"] => collection(client, request).await,
        ["", "responses", id] => item(client, request, id).await,
        _ => Err(ApiError::NotFound),
    }
}

async fn export<C: Client>(
    client: &C,
    request: &Request,
    today: NaiveDate,
) -> Result<Response, ApiError<C::Error>> {
    if request.method != Method::GET {
        return Err(ApiError::MethodNotAllowed);
    }
    responses::init_schema(client)
        .await
        .map_err(ApiError::Store)?;
    let exporter = Exporter::new(client);
    let exported = if let Some(id) = request.param("id").filter(|id| !id.trim().is_empty()) {
        let id = id
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::Validation("Invalid id"))?;
        exporter.export_by_id(id).await
    } else if let Some(ids) = request.param("ids").filter(|ids| !ids.trim().is_empty()) {
        match Selector::parse_ids(&ids) {
            Ok(selector) => exporter.export_many(&selector, today).await,
            Err(err) => Err(err),
        }
    } else {
        exporter.export_many(&Selector::All, today).await
    }
    .map_err(ApiError::Export)?;
    Response::attachment(exported)
}

async fn collection<C: Client>(
    client: &C,
    request: &Request,
) -> Result<Response, ApiError<C::Error>> {
    match request.method {
        Method::GET => {
            responses::init_schema(client)
                .await
                .map_err(ApiError::Store)?;
            let full = matches!(request.param("full").as_deref(), Some("1" | "true"));
            let items = if full {
                responses::fetch_all(client)
                    .await
                    .map(|records| records.into_iter().map(ResponseSummary::from_record).collect())
            } else {
                responses::list(client).await
            }
            .map_err(ApiError::Store)?;
            Response::json(
                StatusCode::OK,
                &Listing {
                    total: items.len(),
                    items,
                },
            )
        }
        Method::POST => {
            let submission = Submission::parse(&request.body)?;
            responses::init_schema(client)
                .await
                .map_err(ApiError::Store)?;
            let db_id = responses::insert(
                client,
                submission.ext_id.as_deref(),
                &submission.ts,
                &submission.answers,
            )
            .await
            .map_err(ApiError::Store)?;
            Response::json(StatusCode::OK, &Submitted { ok: true, db_id })
        }
        _ => Err(ApiError::MethodNotAllowed),
    }
}

async fn item<C: Client>(
    client: &C,
    request: &Request,
    id: &str,
) -> Result<Response, ApiError<C::Error>> {
    let id = id
        .parse::<i64>()
        .map_err(|_| ApiError::Validation("Invalid id"))?;
    if request.method != Method::GET && request.method != Method::DELETE {
        return Err(ApiError::MethodNotAllowed);
    }
    responses::init_schema(client)
        .await
        .map_err(ApiError::Store)?;
    if request.method == Method::GET {
        let record = responses::fetch_one(client, id)
            .await
            .map_err(ApiError::Store)?
            .ok_or(ApiError::NotFound)?;
        Response::json(StatusCode::OK, &record)
    } else if responses::delete(client, id)
        .await
        .map_err(ApiError::Store)?
    {
        Ok(Response::no_content())
    } else {
        Err(ApiError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use reqwest::{
        Method, StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    };

    use super::{Request, Response, Submission, handle};
    use crate::backend::local::{self, LocalDatabase};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    async fn call(client: &local::Client, request: Request) -> Response {
        handle(client, &request, today()).await
    }

    fn error_message(response: &Response) -> String {
        response.json_body().unwrap()["error"]
            .as_str()
            .unwrap()
            .to_owned()
    }

    #[test]
    fn test_submission_defaults() {
        let submission = Submission::parse::<local::Error>(b"{}").unwrap();
        assert_eq!(submission.ext_id, None);
        assert_eq!(submission.answers, "{}");
        assert!(submission.ts.ends_with('Z'));
        assert_eq!(submission.ts.len(), "2026-10-14T08:00:00.000Z".len());
    }

    #[test]
    fn test_submission_shapes() {
        let submission = Submission::parse::<local::Error>(
            br#"{"id": 17, "ts": "2026-03-01T10:00:00Z", "answers": "{\"p1_plec\":\"1.1\"}"}"#,
        )
        .unwrap();
        assert_eq!(submission.ext_id.as_deref(), Some("17"));
        assert_eq!(submission.ts, "2026-03-01T10:00:00Z");
        assert_eq!(submission.answers, r#"{"p1_plec":"1.1"}"#);

        let nested = serde_json::to_vec(&serde_json::json!(
            r#"{"id":"a-1","answers":{"p9_dochody":["9.2","9.1"]}}"#
        ))
        .unwrap();
        let submission = Submission::parse::<local::Error>(&nested).unwrap();
        assert_eq!(submission.ext_id.as_deref(), Some("a-1"));
        assert_eq!(submission.answers, r#"{"p9_dochody":["9.2","9.1"]}"#);

        assert!(Submission::parse::<local::Error>(b"{not json").is_err());
    }

    #[tokio::test]
    async fn test_response_lifecycle() {
        let database = LocalDatabase::open("sqlite::memory:").await.unwrap();
        let client = database.client();

        let response = call(
            &client,
            Request::new(Method::POST, "/api/responses").with_body(
                r#"{"id":"t-1","ts":"2026-03-01T10:00:00Z","answers":{"p1_plec":"1.2"}}"#,
            ),
        )
        .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.json_body().unwrap(),
            serde_json::json!({"ok": true, "db_id": 1})
        );

        let response = call(&client, Request::new(Method::GET, "/responses")).await;
        let listing = response.json_body().unwrap();
        assert_eq!(listing["total"], 1);
        assert_eq!(listing["items"][0]["ext_id"], "t-1");
        assert!(listing["items"][0].get("answers").is_none());

        let response = call(&client, Request::new(Method::GET, "/responses?full=true")).await;
        assert_eq!(
            response.json_body().unwrap()["items"][0]["answers"]["p1_plec"],
            "1.2"
        );

        let response = call(&client, Request::new(Method::GET, "/responses/1")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json_body().unwrap()["ts"], "2026-03-01T10:00:00Z");

        let response = call(&client, Request::new(Method::GET, "/export?id=1")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.headers[CONTENT_DISPOSITION],
            "attachment; filename=\"kwestionariusz_0001_2026-03-01.docx\""
        );

        let response = call(&client, Request::new(Method::DELETE, "/responses/1")).await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        let response = call(&client, Request::new(Method::DELETE, "/responses/1")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        let response = call(&client, Request::new(Method::GET, "/responses/1")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(error_message(&response), "Not found");
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let database = LocalDatabase::open("sqlite::memory:").await.unwrap();
        let client = database.client();

        let response = call(&client, Request::new(Method::PUT, "/responses")).await;
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(error_message(&response), "Method not allowed");
        assert_eq!(response.headers[CONTENT_TYPE], "application/json");

        let response = call(&client, Request::new(Method::POST, "/export")).await;
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);

        let response = call(&client, Request::new(Method::GET, "/export")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);

        let response = call(&client, Request::new(Method::GET, "/export?id=abc")).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&response), "Invalid id");

        let response = call(&client, Request::new(Method::GET, "/export?ids=,x,")).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);

        let response = call(&client, Request::new(Method::GET, "/export?ids=5,6")).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);

        let response = call(&client, Request::new(Method::GET, "/responses/abc")).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);

        let response = call(
            &client,
            Request::new(Method::POST, "/responses").with_body("{oops"),
        )
        .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&response), "Invalid JSON");
    }

    #[tokio::test]
    async fn test_export_all_as_zip() {
        let database = LocalDatabase::open("sqlite::memory:").await.unwrap();
        let client = database.client();
        for body in [r#"{"ts":"2026-03-01"}"#, r#"{"ts":"2026-03-02"}"#] {
            let request = Request::new(Method::POST, "/responses").with_body(body);
            assert_eq!(call(&client, request).await.status, StatusCode::OK);
        }
        let response = call(&client, Request::new(Method::GET, "/export?ids=2,%201")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.headers[CONTENT_TYPE], "application/zip");
        assert_eq!(
            response.headers[CONTENT_DISPOSITION],
            "attachment; filename=\"kwestionariusze_2026-10-14.zip\""
        );
        let archive = zip::ZipArchive::new(std::io::Cursor::new(response.body)).unwrap();
        assert_eq!(archive.len(), 2);

        let response = call(&client, Request::new(Method::GET, "/export?id=%20")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.headers[CONTENT_TYPE], "application/zip");
        let response = call(&client, Request::new(Method::GET, "/export?ids=")).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.headers[CONTENT_TYPE], "application/zip");
    }

    #[tokio::test]
    async fn test_client_timestamp_cannot_break_download() {
        let database = LocalDatabase::open("sqlite::memory:").await.unwrap();
        let client = database.client();
        let cases = [
            ("2026\n03-01T10", "kwestionariusz_0001_2026_03-01.docx"),
            ("20\"26-03-01", "kwestionariusz_0002_20_26-03-0.docx"),
            ("2026/03/01", "kwestionariusz_0003_2026_03_01.docx"),
        ];
        for (ts, _) in cases {
            let body = serde_json::json!({ "ts": ts }).to_string();
            let request = Request::new(Method::POST, "/responses").with_body(body);
            assert_eq!(call(&client, request).await.status, StatusCode::OK);
        }
        for (id, (_, filename)) in (1..).zip(cases) {
            let response =
                call(&client, Request::new(Method::GET, format!("/export?id={id}"))).await;
            assert_eq!(response.status, StatusCode::OK);
            assert_eq!(
                response.headers[CONTENT_DISPOSITION],
                format!("attachment; filename=\"{filename}\"").as_str()
            );
        }

        let response = call(&client, Request::new(Method::GET, "/export")).await;
        let archive = zip::ZipArchive::new(std::io::Cursor::new(response.body)).unwrap();
        let names = archive.file_names().collect::<Vec<_>>();
        assert!(names.iter().all(|name| !name.contains('/')));
        assert_eq!(names.len(), 3);
    }
}
