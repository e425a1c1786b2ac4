//! Sequence file loading.
//!
//! Accepts either plain sequence text or FASTA. For FASTA input the first
//! record is used; multi-line records are joined.
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! ACGTACGT...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Errors that can occur while loading a sequence file.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty sequence file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),
}

/// Result type for sequence file operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// A sequence read from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSequence {
    /// Record identifier, for FASTA input
    pub id: Option<String>,
    /// Sequence data with whitespace removed
    pub data: String,
    /// Number of FASTA records in the file (1 for plain text)
    pub record_count: usize,
}

/// Loads a sequence from a FASTA or plain text file.
///
/// ```no_run
/// use genome_tui::fasta::load_sequence_file;
///
/// let loaded = load_sequence_file("region.fa").unwrap();
/// println!("{} bp", loaded.data.len());
/// ```
pub fn load_sequence_file<P: AsRef<Path>>(path: P) -> FastaResult<LoadedSequence> {
    let file = File::open(path)?;
    parse_sequence(BufReader::new(file))
}

/// Parses sequence content from a reader.
pub fn parse_sequence<R: BufRead>(reader: R) -> FastaResult<LoadedSequence> {
    let mut id: Option<String> = None;
    let mut data = String::new();
    let mut record_count = 0;
    let mut line_number = 0;

    for line_result in reader.lines() {
        line_number += 1;
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            record_count += 1;
            if record_count > 1 {
                // Only the first record is analyzed; keep counting the rest
                continue;
            }
            let name = header.split_whitespace().next().unwrap_or("").to_string();
            if name.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }
            id = Some(name);
        } else if record_count <= 1 {
            data.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    if data.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    Ok(LoadedSequence {
        id,
        data,
        record_count: record_count.max(1),
    })
}

/// Parses sequence content from a string.
pub fn parse_sequence_str(content: &str) -> FastaResult<LoadedSequence> {
    parse_sequence(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_plain_text() {
        let loaded = parse_sequence_str("ACGT ACGT\nTTTT\n").unwrap();
        assert_eq!(loaded.id, None);
        assert_eq!(loaded.data, "ACGTACGTTTTT");
        assert_eq!(loaded.record_count, 1);
    }

    #[test]
    fn test_parse_multiline_fasta() {
        let loaded = parse_sequence_str(">seq1 description\nACGT\nTGCA\n\nAAAA\n").unwrap();
        assert_eq!(loaded.id.as_deref(), Some("seq1"));
        assert_eq!(loaded.data, "ACGTTGCAAAAA");
    }

    #[test]
    fn test_first_record_only() {
        let loaded = parse_sequence_str(">seq1\nACGT\n>seq2\nGGGG\n>seq3\nCCCC\n").unwrap();
        assert_eq!(loaded.data, "ACGT");
        assert_eq!(loaded.record_count, 3);
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse_sequence_str(""), Err(FastaError::EmptyFile)));
        assert!(matches!(parse_sequence_str(">seq1\n"), Err(FastaError::EmptyFile)));
    }

    #[test]
    fn test_empty_identifier() {
        assert!(matches!(
            parse_sequence_str(">\nACGT\n"),
            Err(FastaError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_case_preserved() {
        let loaded = parse_sequence_str(">seq1\nacgt\n").unwrap();
        assert_eq!(loaded.data, "acgt");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ">chr22_window").unwrap();
        writeln!(file, "{}", "ACGT".repeat(10)).unwrap();

        let loaded = load_sequence_file(file.path()).unwrap();
        assert_eq!(loaded.data.len(), 40);
        assert_eq!(loaded.id.as_deref(), Some("chr22_window"));
    }
}
