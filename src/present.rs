//! Result presentation.
//!
//! Serializes an [`AnalysisOutcome`] for the results panel and as the
//! downloadable JSON artifact.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::i18n::{Language, Msg};
use crate::outcome::{AnalysisOutcome, AnalysisRecord};

/// Errors that can occur while exporting a result.
#[derive(Error, Debug)]
pub enum PresentError {
    #[error("Nothing to export: the last analysis did not succeed")]
    NothingToExport,

    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

impl PresentError {
    /// Message shown to the user in the given language.
    pub fn localized(&self, lang: Language) -> String {
        match self {
            PresentError::NothingToExport => lang.t(Msg::NothingToExport).to_string(),
            other => format!("{}: {}", lang.t(Msg::Error), other),
        }
    }
}

/// An outcome ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub success: bool,
    /// "Success" or "Error: ..." in the session language
    pub headline: String,
    /// Pretty-printed JSON for a success, the error message otherwise
    pub body: String,
}

pub fn to_display(outcome: &AnalysisOutcome, lang: Language) -> Rendered {
    match outcome {
        AnalysisOutcome::Success(record) => Rendered {
            success: true,
            headline: format!(
                "{} ({})",
                lang.t(Msg::Success),
                record.timestamp().format("%Y-%m-%d %H:%M:%S")
            ),
            body: serde_json::to_string_pretty(record)
                .unwrap_or_else(|err| format!("{}: {}", lang.t(Msg::Error), err)),
        },
        AnalysisOutcome::Failure { message } => Rendered {
            success: false,
            headline: format!("{}: {}", lang.t(Msg::Error), message),
            body: message.clone(),
        },
    }
}

/// Pretty-printed JSON bytes of a successful outcome.
pub fn to_downloadable(outcome: &AnalysisOutcome) -> Result<Vec<u8>, PresentError> {
    let record = outcome.record().ok_or(PresentError::NothingToExport)?;
    let mut bytes = serde_json::to_vec_pretty(record)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Default file name for a record, e.g. `variant_analysis.json`.
pub fn download_filename(record: &AnalysisRecord) -> String {
    format!("{}_analysis.json", record.kind())
}

/// Writes the downloadable JSON of `outcome` to `path`.
pub fn save<P: AsRef<Path>>(outcome: &AnalysisOutcome, path: P) -> Result<usize, PresentError> {
    let bytes = to_downloadable(outcome)?;
    fs::write(path, &bytes)?;
    Ok(bytes.len())
}

/// Formats a count with comma thousands separators (`16384` -> `16,384`).
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Local;
    use tempfile::tempdir;

    use super::*;

    fn variant_record() -> AnalysisRecord {
        AnalysisRecord::Variant {
            chromosome: "chr22".to_string(),
            position: 36_201_698,
            reference: "A".to_string(),
            alternate: "C".to_string(),
            organism: "human".to_string(),
            tissue: "UBERON:0001157".to_string(),
            output_type: "RNA_SEQ".to_string(),
            ref_shape: "(1048576, 667)".to_string(),
            alt_shape: "(1048576, 667)".to_string(),
            timestamp: Local::now(),
        }
    }

    #[test]
    fn test_downloadable_round_trip() {
        let record = variant_record();
        let outcome = AnalysisOutcome::Success(record.clone());

        let bytes = to_downloadable(&outcome).unwrap();
        let parsed: AnalysisRecord = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_json_layout() {
        let outcome = AnalysisOutcome::Success(variant_record());
        let bytes = to_downloadable(&outcome).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["type"], "variant");
        assert_eq!(value["position"], 36_201_698);
        assert_eq!(value["ref_shape"], "(1048576, 667)");
        // Timestamps become ISO-8601 strings
        let timestamp = value["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[test]
    fn test_failure_has_nothing_to_download() {
        let outcome = AnalysisOutcome::failure("network unreachable");
        let err = to_downloadable(&outcome).unwrap_err();
        assert!(matches!(err, PresentError::NothingToExport));
        assert_eq!(err.localized(Language::Tr), Language::Tr.t(Msg::NothingToExport));
    }

    #[test]
    fn test_display() {
        let failure = to_display(&AnalysisOutcome::failure("boom"), Language::En);
        assert!(!failure.success);
        assert_eq!(failure.headline, "Error: boom");

        let success = to_display(&AnalysisOutcome::Success(variant_record()), Language::Tr);
        assert!(success.success);
        assert!(success.headline.starts_with("Başarılı ("));
        assert!(success.body.contains("\"type\": \"variant\""));
    }

    #[test]
    fn test_save_and_filename() {
        let dir = tempdir().unwrap();
        let record = variant_record();
        let path = dir.path().join(download_filename(&record));
        assert!(path.ends_with("variant_analysis.json"));

        let written = save(&AnalysisOutcome::Success(record), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.len(), written);
        assert!(content.starts_with("{\n"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(16_384), "16,384");
        assert_eq!(group_thousands(1_048_576), "1,048,576");
    }
}
