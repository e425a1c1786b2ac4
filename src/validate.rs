//! Input validation.
//!
//! Pure checks run before anything is sent to the prediction service:
//! - Sequence alphabet (A, T, G, C, N, case-insensitive) and minimum length
//! - Reference and alternate bases differ
//! - Interval start lies before its end
//! - An API key is present

use thiserror::Error;

use crate::genome::{Base, Query};
use crate::i18n::{Language, Msg};

/// Shortest sequence the model accepts (its input window).
pub const MIN_SEQUENCE_LENGTH: usize = 16_384;

/// Characters accepted in a sequence (upper case).
const SEQUENCE_ALPHABET: &[u8] = b"ATGCN";

/// Why a query was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("No API key")]
    MissingApiKey,

    #[error("Sequence too short: {length} bp (minimum {minimum})")]
    TooShort { length: usize, minimum: usize },

    #[error("Invalid DNA sequence: '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Reference and alternate bases must be different (both {0})")]
    IdenticalBases(Base),

    #[error("Start position must be less than end position ({start} >= {end})")]
    EmptyInterval { start: u64, end: u64 },

    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

impl ValidationError {
    /// Message shown to the user in the given language.
    pub fn localized(&self, lang: Language) -> String {
        match self {
            ValidationError::MissingApiKey => lang.t(Msg::NoApiKey).to_string(),
            ValidationError::TooShort { .. } => lang.t(Msg::MinLengthWarning).to_string(),
            ValidationError::InvalidCharacter { character, position } => {
                format!("{}: '{}' @ {}", lang.t(Msg::InvalidSequence), character, position + 1)
            }
            ValidationError::IdenticalBases(_) => lang.t(Msg::SameBases).to_string(),
            ValidationError::EmptyInterval { start, end } => {
                format!("{} ({} >= {})", lang.t(Msg::StartAfterEnd), start, end)
            }
            ValidationError::InvalidNumber { value, .. } => {
                format!("{}: '{}'", lang.t(Msg::InvalidNumber), value)
            }
        }
    }
}

/// Outcome of a single check.
pub type ValidationResult = Result<(), ValidationError>;

/// Removes every whitespace character (spaces, line breaks, tabs).
pub fn clean_sequence(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Checks that the sequence, once whitespace is stripped, only uses A/T/G/C/N.
pub fn validate_sequence(text: &str) -> ValidationResult {
    let offending = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .find(|(_, c)| {
            !c.is_ascii() || !SEQUENCE_ALPHABET.contains(&(c.to_ascii_uppercase() as u8))
        });

    match offending {
        Some((position, character)) => {
            Err(ValidationError::InvalidCharacter { character, position })
        }
        None => Ok(()),
    }
}

/// Checks the cleaned sequence fills the model's input window.
pub fn validate_sequence_length(cleaned: &str) -> ValidationResult {
    let length = cleaned.chars().count();
    if length < MIN_SEQUENCE_LENGTH {
        return Err(ValidationError::TooShort {
            length,
            minimum: MIN_SEQUENCE_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_variant(reference: Base, alternate: Base) -> ValidationResult {
    if reference == alternate {
        return Err(ValidationError::IdenticalBases(reference));
    }
    Ok(())
}

pub fn validate_interval(start: u64, end: u64) -> ValidationResult {
    if start >= end {
        return Err(ValidationError::EmptyInterval { start, end });
    }
    Ok(())
}

pub fn validate_api_key(api_key: &str) -> ValidationResult {
    if api_key.trim().is_empty() {
        return Err(ValidationError::MissingApiKey);
    }
    Ok(())
}

/// Runs the checks relevant to the query kind.
///
/// Sequences are checked for length before alphabet, so a short sequence
/// reports the length floor even if it also contains invalid characters.
pub fn validate_query(query: &Query) -> ValidationResult {
    match query {
        Query::Sequence(q) => {
            validate_sequence_length(&clean_sequence(&q.sequence))?;
            validate_sequence(&q.sequence)
        }
        Query::Variant(q) => validate_variant(q.variant.reference, q.variant.alternate),
        Query::Interval(q) => validate_interval(q.interval.start, q.interval.end),
    }
}
