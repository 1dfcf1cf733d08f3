//! Answer bag of a single questionnaire submission.
//!
//! Answers are stored as JSON text. Each key maps either to one string or to
//! an ordered list of strings (multi-select questions). The bag is normalized
//! once here so that rendering never has to inspect raw JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Scalar(String),
    List(Vec<String>),
}

/// Borrowed view of one key, `Missing` when the key is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer<'a> {
    Missing,
    Scalar(&'a str),
    List(&'a [String]),
}

impl<'a> Answer<'a> {
    pub fn values(self) -> &'a [String] {
        match self {
            Self::List(values) => values,
            Self::Scalar(_) | Self::Missing => &[],
        }
    }

    pub fn as_scalar(self) -> Option<&'a str> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Every stored string, one for a scalar, each element for a list.
    pub fn iter(self) -> impl Iterator<Item = &'a str> {
        let scalar = self.as_scalar();
        scalar
            .into_iter()
            .chain(self.values().iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Answers(IndexMap<String, AnswerValue>);

impl<'de> Deserialize<'de> for Answers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse stored answer text. Invalid text yields an empty bag.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                warn!(error = %e, "unparseable answers, rendering as empty");
                Self::default()
            }
        }
    }

    /// Normalize an already decoded JSON value.
    ///
    /// A string holding JSON (answers posted as text, then encoded again) is
    /// decoded one more time. Anything that is not an object becomes empty.
    pub fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self(
                map.into_iter()
                    .filter_map(|(key, value)| normalize(value).map(|value| (key, value)))
                    .collect(),
            ),
            serde_json::Value::String(inner) => {
                match serde_json::from_str::<serde_json::Value>(&inner) {
                    Ok(serde_json::Value::Object(map)) => {
                        Self::from_value(serde_json::Value::Object(map))
                    }
                    _ => {
                        warn!("answers text is not an object, rendering as empty");
                        Self::default()
                    }
                }
            }
            serde_json::Value::Null => Self::default(),
            other => {
                warn!(kind = json_kind(&other), "answers is not an object, rendering as empty");
                Self::default()
            }
        }
    }

    pub fn get(&self, key: &str) -> Answer<'_> {
        match self.0.get(key) {
            None => Answer::Missing,
            Some(AnswerValue::Scalar(value)) => Answer::Scalar(value),
            Some(AnswerValue::List(values)) => Answer::List(values),
        }
    }

    /// Scalar value of `key`, `None` when absent, a list, or empty.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).as_scalar().filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: AnswerValue) {
        self.0.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}

impl FromIterator<(String, AnswerValue)> for Answers {
    fn from_iter<T: IntoIterator<Item = (String, AnswerValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn scalar_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            None
        }
    }
}

fn normalize(value: serde_json::Value) -> Option<AnswerValue> {
    match value {
        serde_json::Value::Array(items) => Some(AnswerValue::List(
            items.into_iter().filter_map(scalar_text).collect(),
        )),
        other => scalar_text(other).map(AnswerValue::Scalar),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
