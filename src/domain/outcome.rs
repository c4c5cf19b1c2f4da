//! Import results: the service summary, the per-record tally and the
//! client-facing outcome.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::import::RawRow;

/// How the identity for an imported record was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// An identity with the same email already existed and was reused
    Existing,
    /// A new identity was created
    Created,
}

/// Failure of one record; never aborts sibling records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{email}: {message}")]
pub struct RecordError {
    /// Email as supplied by the caller, or `Unknown`
    pub email: String,
    pub message: String,
}

impl RecordError {
    pub fn new(email: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self {
            email: email.into(),
            message: message.to_string(),
        }
    }
}

/// Running totals folded over the records of one import request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTally {
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

impl ImportTally {
    /// Fold one record's result into the tally.
    pub fn record(mut self, result: Result<Resolution, RecordError>) -> Self {
        match result {
            Ok(_) => self.successful += 1,
            Err(e) => {
                self.failed += 1;
                self.errors.push(e.to_string());
            }
        }
        self
    }

    pub fn into_summary(self, total: usize) -> ImportSummary {
        ImportSummary {
            total,
            successful: self.successful,
            failed: self.failed,
            errors: self.errors,
        }
    }
}

/// Result returned by the import service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    /// Number of records received
    #[serde(default)]
    #[schema(example = 5)]
    pub total: usize,
    #[serde(default)]
    #[schema(example = 4)]
    pub successful: usize,
    #[serde(default)]
    #[schema(example = 1)]
    pub failed: usize,
    /// One entry per failed record, formatted `<email>: <message>`
    #[serde(default)]
    #[schema(example = json!(["bob@company.com: Failed to update profile: profile not found"]))]
    pub errors: Vec<String>,
}

/// Aggregate result of one client-side import attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    /// Rows read from the file
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<String>,
    /// First rows of the file, as parsed
    pub sample_preview: Vec<RawRow>,
    /// True when no service was contacted
    pub simulated: bool,
}

impl ImportOutcome {
    /// Outcome reported by the service; its counts are taken verbatim.
    pub fn from_service(total: usize, summary: ImportSummary, sample_preview: Vec<RawRow>) -> Self {
        Self {
            total,
            successful: summary.successful,
            failed: summary.failed,
            errors: summary.errors,
            sample_preview,
            simulated: false,
        }
    }

    /// Outcome synthesized without contacting any service.
    pub fn simulated(total: usize, sample_preview: Vec<RawRow>) -> Self {
        Self {
            total,
            successful: total,
            failed: 0,
            errors: Vec::new(),
            sample_preview,
            simulated: true,
        }
    }
}
