use std::path::Path;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config {path}: {error}")]
    Read {
        path: String,
        error: std::io::Error,
    },
    #[error("failed to parse config {path}: {error}")]
    Parse {
        path: String,
        error: serde_yaml::Error,
    },
    #[error("Missing TURSO_DB_URL or TURSO_AUTH_TOKEN env vars")]
    MissingStore,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum StoreConfig {
    Turso { url: String, token: String },
    Local { url: String },
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreConfig,
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|error| Error::Read {
                path: path.display().to_string(),
                error,
            })?;
        serde_yaml::from_str(&text).map_err(|error| Error::Parse {
            path: path.display().to_string(),
            error,
        })
    }

    /// Configuration from command line / environment values.
    ///
    /// A local sqlite url wins over Turso credentials.
    pub fn from_values(
        sqlite: Option<String>,
        db_url: Option<String>,
        auth_token: Option<String>,
    ) -> Result<Self, Error> {
        let store = match (sqlite, db_url, auth_token) {
            (Some(url), _, _) => StoreConfig::Local { url },
            (None, Some(url), Some(token)) if !url.is_empty() && !token.is_empty() => {
                StoreConfig::Turso { url, token }
            }
            _ => return Err(Error::MissingStore),
        };
        Ok(Self { store })
    }
}
