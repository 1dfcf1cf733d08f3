//! Single record and batch export of stored responses.

use chrono::NaiveDate;
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::{
    archive,
    document::docx,
    form,
    record::ResponseRecord,
    store::{Client, responses},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `kwestionariusz_<id>_<date>.docx`. Characters of the date that are not
/// ASCII alphanumerics or `-` become `_`, so the name is always a flat,
/// header-safe file name.
pub fn document_filename(record: &ResponseRecord) -> String {
    let date = record
        .date()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect::<String>();
    format!(
        "kwestionariusz_{:04}_{date}.{}",
        record.id,
        docx::EXTENSION
    )
}

pub fn archive_filename(today: NaiveDate) -> String {
    format!(
        "kwestionariusze_{}.{}",
        today.format("%Y-%m-%d"),
        archive::EXTENSION
    )
}

/// Render one record to a `.docx` file.
pub fn export_record(record: &ResponseRecord) -> Result<Exported, docx::Error> {
    let document = form::build(record);
    let bytes = docx::serialize(&document)?;
    debug!(id = record.id, size = bytes.len(), "rendered questionnaire");
    Ok(Exported {
        filename: document_filename(record),
        content_type: docx::CONTENT_TYPE,
        bytes,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    Ids(Vec<i64>),
}

impl Selector {
    /// Parse a comma separated id list. Empty or non-numeric tokens are skipped.
    pub fn parse_ids<SE>(raw: &str) -> Result<Self, ExportError<SE>> {
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter_map(|token| token.parse::<i64>().ok())
            .collect::<Vec<_>>();
        if ids.is_empty() {
            return Err(ExportError::InvalidSelector(raw.to_owned()));
        }
        Ok(Self::Ids(ids))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError<SE> {
    #[error("Invalid ids")]
    InvalidSelector(String),
    #[error("Not found")]
    NotFound,
    #[error("failed to serialize document: {0}")]
    Serialization(docx::Error),
    #[error("failed to pack archive: {0}")]
    Pack(archive::Error),
    #[error("{0}")]
    Store(responses::Error<SE>),
}

impl<SE> ExportError<SE> {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidSelector(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Serialization(_) | Self::Pack(_) | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Exports records read from a store.
pub struct Exporter<'a, C> {
    store: &'a C,
}

impl<'a, C: Client> Exporter<'a, C> {
    pub fn new(store: &'a C) -> Self {
        Self { store }
    }

    pub async fn export_by_id(&self, id: i64) -> Result<Exported, ExportError<C::Error>> {
        let record = responses::fetch_one(self.store, id)
            .await
            .map_err(ExportError::Store)?
            .ok_or(ExportError::NotFound)?;
        export_record(&record).map_err(ExportError::Serialization)
    }

    /// Zip of every selected record, ascending by id. Fails as a whole.
    pub async fn export_many(
        &self,
        selector: &Selector,
        today: NaiveDate,
    ) -> Result<Exported, ExportError<C::Error>> {
        let records = match selector {
            Selector::All => responses::fetch_all(self.store).await,
            Selector::Ids(ids) if ids.is_empty() => {
                return Err(ExportError::InvalidSelector(String::new()));
            }
            Selector::Ids(ids) => responses::fetch_many(self.store, ids).await,
        }
        .map_err(ExportError::Store)?;
        if records.is_empty() {
            return Err(ExportError::NotFound);
        }

        let documents = records
            .iter()
            .map(export_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ExportError::Serialization)?;
        let bytes = archive::pack(
            documents
                .iter()
                .map(|document| (document.filename.as_str(), document.bytes.as_slice())),
        )
        .map_err(ExportError::Pack)?;
        let filename = archive_filename(today);
        info!(%filename, count = documents.len(), "packed questionnaires");
        Ok(Exported {
            filename,
            content_type: archive::CONTENT_TYPE,
            bytes,
        })
    }
}
