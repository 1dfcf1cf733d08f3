use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::answers::Answers;

/// Raw `responses` row as the store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, FromRow)]
pub struct ResponseRow {
    pub id: i64,
    pub ext_id: Option<String>,
    pub ts: Option<String>,
    pub created: Option<String>,
    pub answers: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub id: i64,
    #[serde(default)]
    pub ext_id: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub answers: Answers,
}

impl From<ResponseRow> for ResponseRecord {
    fn from(row: ResponseRow) -> Self {
        let answers = row.answers.as_deref().map(Answers::parse).unwrap_or_default();
        Self {
            id: row.id,
            ext_id: row.ext_id,
            ts: row.ts,
            created: row.created,
            answers,
        }
    }
}

impl ResponseRecord {
    /// Submission date: first ten characters of `ts`, else of `created`.
    pub fn date(&self) -> &str {
        let stamp = [self.ts.as_deref(), self.created.as_deref()]
            .into_iter()
            .flatten()
            .find(|stamp| !stamp.is_empty())
            .unwrap_or_default();
        match stamp.char_indices().nth(10) {
            Some((end, _)) => &stamp[..end],
            None => stamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, FromRow)]
pub struct SummaryRow {
    pub id: i64,
    pub ext_id: Option<String>,
    pub ts: Option<String>,
    pub created: Option<String>,
}

/// Listing entry without answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseSummary {
    pub id: i64,
    pub ext_id: Option<String>,
    pub ts: Option<String>,
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Answers>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

impl ResponseSummary {
    pub fn from_row(row: SummaryRow) -> Self {
        let created = present(row.created);
        Self {
            id: row.id,
            ext_id: row.ext_id,
            ts: present(row.ts).or_else(|| created.clone()),
            created,
            answers: None,
        }
    }

    pub fn from_record(record: ResponseRecord) -> Self {
        let created = present(record.created);
        Self {
            id: record.id,
            ext_id: record.ext_id,
            ts: present(record.ts).or_else(|| created.clone()),
            created,
            answers: Some(record.answers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ResponseRecord, ResponseRow, ResponseSummary, SummaryRow};

    fn row(ts: Option<&str>, created: Option<&str>) -> ResponseRecord {
        ResponseRow {
            id: 1,
            ext_id: None,
            ts: ts.map(Into::into),
            created: created.map(Into::into),
            answers: Some("{}".into()),
        }
        .into()
    }

    #[test]
    fn test_date_prefers_timestamp() {
        assert_eq!(row(Some("2026-03-01T10:00:00Z"), Some("2026-04-01 08:00:00")).date(), "2026-03-01");
        assert_eq!(row(None, Some("2026-04-01 08:00:00")).date(), "2026-04-01");
        assert_eq!(row(Some(""), Some("2026-04-01 08:00:00")).date(), "2026-04-01");
        assert_eq!(row(None, None).date(), "");
        assert_eq!(row(Some("2026"), None).date(), "2026");
    }

    #[test]
    fn test_malformed_answers_become_empty() {
        let record: ResponseRecord = ResponseRow {
            id: 3,
            ext_id: None,
            ts: None,
            created: None,
            answers: Some("{\"broken\":".into()),
        }
        .into();
        assert!(record.answers.is_empty());
    }

    #[test]
    fn test_record_json_accepts_text_or_object_answers() {
        let from_text: ResponseRecord = serde_json::from_str(
            r#"{"id": 5, "ts": "2026-03-01", "answers": "{\"p1_plec\":\"1.1\",\"p9_dochody\":[\"9.2\",\"9.1\"]}"}"#,
        )
        .unwrap();
        let from_object: ResponseRecord = serde_json::from_str(
            r#"{"id": 5, "ts": "2026-03-01", "answers": {"p1_plec": "1.1", "p9_dochody": ["9.2", "9.1"]}}"#,
        )
        .unwrap();
        assert_eq!(from_text, from_object);
        assert_eq!(from_text.answers.text("p1_plec"), Some("1.1"));
        assert_eq!(
            from_text.answers.get("p9_dochody").values(),
            ["9.2".to_owned(), "9.1".to_owned()]
        );

        let broken: ResponseRecord =
            serde_json::from_str(r#"{"id": 6, "answers": "{\"p1_plec\":"}"#).unwrap();
        assert!(broken.answers.is_empty());
        let bare: ResponseRecord = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert!(bare.answers.is_empty());
        assert_eq!(bare.ts, None);
    }

    #[test]
    fn test_summary_ts_falls_back_to_created() {
        let summary = ResponseSummary::from_row(SummaryRow {
            id: 2,
            ext_id: Some("abc".into()),
            ts: None,
            created: Some("2026-01-02 03:04:05".into()),
        });
        assert_eq!(summary.ts.as_deref(), Some("2026-01-02 03:04:05"));
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("answers").is_none());
    }
}
