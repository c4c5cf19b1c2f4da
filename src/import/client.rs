//! Import client - Validates a CSV file and submits it to the import service.
//!
//! Every row must validate before anything is sent: one bad row rejects
//! the whole file. Only one import runs per client at a time.

use std::io;
use std::path::Path;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;

use super::csv_source::parse_csv;
use super::session::SessionProvider;
use crate::config::{
    Config, CSV_CONTENT_TYPE, CSV_EXTENSION, IMPORT_REQUEST_TIMEOUT_SECS, IMPORT_USERS_PATH,
    SERVICE_FAILURE_FALLBACK,
};
use crate::domain::{ImportOutcome, ImportSummary, ImportUserRecord, ValidationError};

/// Errors that end an import attempt with nothing imported
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Please select a CSV file")]
    NotCsv,

    #[error("CSV parsing error: {0}")]
    Parse(#[from] csv::Error),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("No data found in CSV file")]
    NoData,

    #[error(transparent)]
    InvalidRow(#[from] ValidationError),

    #[error("No active session. Please log in again.")]
    NoSession,

    #[error("Could not reach the import service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("An import is already in progress")]
    InProgress,
}

/// A file picked for import
#[derive(Debug, Clone)]
pub struct ImportFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImportFile {
    pub fn new(name: impl Into<String>, content_type: Option<&str>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.map(str::to_string),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk; no content type is known for it.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, None, std::fs::read(path)?))
    }

    /// Accepted when either the content type or the extension says CSV.
    pub fn is_csv(&self) -> bool {
        self.content_type.as_deref() == Some(CSV_CONTENT_TYPE) || self.name.ends_with(CSV_EXTENSION)
    }
}

/// Where validated records go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMode {
    /// Submit to the import service at `base_url`
    Live { base_url: String },
    /// Pretend every record was imported after `delay`
    Simulated { delay: Duration },
}

impl BackendMode {
    /// Live when an import service URL is configured.
    pub fn from_config(config: &Config) -> Self {
        match &config.import_api_url {
            Some(base_url) => BackendMode::Live {
                base_url: base_url.clone(),
            },
            None => BackendMode::Simulated {
                delay: config.simulated_delay(),
            },
        }
    }
}

#[derive(Serialize)]
struct ImportRequest<'a> {
    users: &'a [ImportUserRecord],
}

/// Client side of a bulk user import
pub struct ImportClient<S: SessionProvider> {
    http: reqwest::Client,
    session: S,
    mode: BackendMode,
    in_flight: Mutex<()>,
}

impl<S: SessionProvider> ImportClient<S> {
    pub fn new(mode: BackendMode, session: S) -> Result<Self, ImportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(IMPORT_REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            session,
            mode,
            in_flight: Mutex::new(()),
        })
    }

    pub fn mode(&self) -> &BackendMode {
        &self.mode
    }

    /// Validate `file` and import its users.
    ///
    /// Fails without doing any work if another import on this client has
    /// not finished yet.
    pub async fn import_file(&self, file: &ImportFile) -> Result<ImportOutcome, ImportError> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| ImportError::InProgress)?;

        if !file.is_csv() {
            return Err(ImportError::NotCsv);
        }

        let parsed = parse_csv(&file.bytes)?;

        let missing = parsed.missing_columns();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }
        if parsed.rows.is_empty() {
            return Err(ImportError::NoData);
        }

        let records = parsed
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| ImportUserRecord::validate_row(row, index + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let total = parsed.rows.len();
        tracing::debug!(file = %file.name, total, "CSV validated");

        match &self.mode {
            BackendMode::Simulated { delay } => {
                tracing::info!("No import service configured, simulating import of {} users", total);
                tokio::time::sleep(*delay).await;
                Ok(ImportOutcome::simulated(total, parsed.preview()))
            }
            BackendMode::Live { base_url } => {
                let summary = self.submit(base_url, &records).await?;
                Ok(ImportOutcome::from_service(total, summary, parsed.preview()))
            }
        }
    }

    async fn submit(&self, base_url: &str, users: &[ImportUserRecord]) -> Result<ImportSummary, ImportError> {
        let session = self
            .session
            .current_session()
            .await
            .ok_or(ImportError::NoSession)?;

        if let Some(user) = self.session.current_user().await {
            tracing::info!(user = %user.email, "Submitting {} users for import", users.len());
        }

        let url = format!("{}{}", base_url.trim_end_matches('/'), IMPORT_USERS_PATH);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&session.access_token)
            .json(&ImportRequest { users })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = service_error(response).await;
            tracing::warn!(status = status.as_u16(), "Import service rejected the request: {}", message);
            return Err(ImportError::Service {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ImportSummary>().await?)
    }
}

/// The `error` field of a failure body, or a generic message.
async fn service_error(response: reqwest::Response) -> String {
    response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| body.get("error")?.as_str().map(str::to_string))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| SERVICE_FAILURE_FALLBACK.to_string())
}

impl ImportError {
    /// HTTP status reported by the service, if it answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ImportError::Service { status, .. } => StatusCode::from_u16(*status).ok(),
            _ => None,
        }
    }
}
