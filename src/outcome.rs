//! Analysis results and failures.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::{Language, Msg};
use crate::validate::ValidationError;

/// Shape descriptor used when the requested track is absent from a response.
pub const SHAPE_UNAVAILABLE: &str = "N/A";

/// Summary of one successful prediction: the query echoed back plus the
/// shapes of the returned tensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisRecord {
    Sequence {
        sequence_length: usize,
        organism: String,
        tissue: String,
        output_type: String,
        data_shape: String,
        timestamp: DateTime<Local>,
    },
    Variant {
        chromosome: String,
        position: u64,
        reference: String,
        alternate: String,
        organism: String,
        tissue: String,
        output_type: String,
        ref_shape: String,
        alt_shape: String,
        timestamp: DateTime<Local>,
    },
    Interval {
        chromosome: String,
        start: u64,
        end: u64,
        organism: String,
        tissue: String,
        output_type: String,
        data_shape: String,
        timestamp: DateTime<Local>,
    },
}

impl AnalysisRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisRecord::Sequence { .. } => "sequence",
            AnalysisRecord::Variant { .. } => "variant",
            AnalysisRecord::Interval { .. } => "interval",
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        match self {
            AnalysisRecord::Sequence { timestamp, .. }
            | AnalysisRecord::Variant { timestamp, .. }
            | AnalysisRecord::Interval { timestamp, .. } => *timestamp,
        }
    }
}

/// Result of one analyze action.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Success(AnalysisRecord),
    Failure { message: String },
}

impl AnalysisOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        AnalysisOutcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success(_))
    }

    pub fn record(&self) -> Option<&AnalysisRecord> {
        match self {
            AnalysisOutcome::Success(record) => Some(record),
            AnalysisOutcome::Failure { .. } => None,
        }
    }
}

/// Why an analyze action did not reach the service or did not succeed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error("Prediction service client not configured")]
    ServiceUnavailable,

    #[error("{0}")]
    RemoteCall(String),
}

impl AnalysisError {
    /// Message shown to the user in the given language.
    pub fn localized(&self, lang: Language) -> String {
        match self {
            AnalysisError::InvalidInput(err) => err.localized(lang),
            AnalysisError::ServiceUnavailable => lang.t(Msg::ClientNotConfigured).to_string(),
            AnalysisError::RemoteCall(message) => message.clone(),
        }
    }

    pub fn into_outcome(self, lang: Language) -> AnalysisOutcome {
        AnalysisOutcome::failure(self.localized(lang))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let failure = AnalysisOutcome::failure("boom");
        assert!(!failure.is_success());
        assert!(failure.record().is_none());
    }

    #[test]
    fn test_remote_message_is_verbatim() {
        let err = AnalysisError::RemoteCall("quota exceeded (429)".to_string());
        assert_eq!(err.localized(Language::Tr), "quota exceeded (429)");
        assert_eq!(
            err.into_outcome(Language::En),
            AnalysisOutcome::Failure {
                message: "quota exceeded (429)".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_input_wraps_validation() {
        let err: AnalysisError = ValidationError::MissingApiKey.into();
        assert_eq!(err.localized(Language::En), "Please enter your API key first");
        assert!(AnalysisError::ServiceUnavailable
            .localized(Language::En)
            .contains("GENOME_TUI_ENDPOINT"));
    }
}
