//! FASTA input.
//!
//! Reads the two sequences to compare from a FASTA file: the first record is
//! the reference (top), the second is compared against it (bottom). Extra
//! records are ignored. Both single-line and multi-line records are
//! supported.
//!
//! ```text
//! >reference optional description
//! MKTAYIAKQR...
//! >variant
//! MKTAHIAKQR...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::model::Sequence;

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),

    #[error("Expected two sequences, found {0}")]
    NotEnoughSequences(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses FASTA records from a reader.
pub fn parse_fasta<R: BufRead>(reader: R) -> FastaResult<Vec<Sequence>> {
    let mut sequences = Vec::new();
    let mut current_id: Option<String> = None;
    let mut current_seq = String::new();

    for (idx, line_result) in reader.lines().enumerate() {
        let line_number = idx + 1;
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                sequences.push(Sequence::new(id, std::mem::take(&mut current_seq)));
            }

            // ID is everything after '>' up to the first space
            let id = header.split_whitespace().next().unwrap_or_default();
            if id.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }

            current_id = Some(id.to_string());
        } else {
            if current_id.is_none() {
                return Err(FastaError::SequenceWithoutHeader(line_number));
            }
            current_seq.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    if let Some(id) = current_id {
        sequences.push(Sequence::new(id, current_seq));
    }

    if sequences.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    Ok(sequences)
}

/// Takes the first two records of a parsed file.
pub fn first_two(sequences: Vec<Sequence>) -> FastaResult<(Sequence, Sequence)> {
    let count = sequences.len();
    let mut iter = sequences.into_iter();
    match (iter.next(), iter.next()) {
        (Some(top), Some(bottom)) => Ok((top, bottom)),
        _ => Err(FastaError::NotEnoughSequences(count)),
    }
}

/// Reads the sequence pair from a FASTA file.
pub fn read_pair<P: AsRef<Path>>(path: P) -> FastaResult<(Sequence, Sequence)> {
    let file = File::open(path)?;
    first_two(parse_fasta(BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse_pair_str(content: &str) -> FastaResult<(Sequence, Sequence)> {
        first_two(parse_fasta(content.as_bytes())?)
    }

    #[test]
    fn test_parse_simple_pair() {
        let (top, bottom) = parse_pair_str(">ref\nARND\n>var\nARNE\n").unwrap();
        assert_eq!(top, Sequence::new("ref", "ARND"));
        assert_eq!(bottom, Sequence::new("var", "ARNE"));
    }

    #[test]
    fn test_parse_multiline_sequence() {
        let (top, _) = parse_pair_str(">a\nMKTA\nYIAK\n>b\nMKTAYIAK\n").unwrap();
        assert_eq!(top.data, "MKTAYIAK");
    }

    #[test]
    fn test_parse_with_description_and_blank_lines() {
        let (top, bottom) =
            parse_pair_str(">a human ortholog\n\nARND\n\n>b\nAR-D\n").unwrap();
        assert_eq!(top.id, "a");
        assert_eq!(bottom.data, "AR-D");
    }

    #[test]
    fn test_extra_records_ignored() {
        let (_, bottom) = parse_pair_str(">a\nAR\n>b\nAK\n>c\nAA\n").unwrap();
        assert_eq!(bottom.id, "b");
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse_pair_str(""), Err(FastaError::EmptyFile)));
    }

    #[test]
    fn test_single_record() {
        assert!(matches!(
            parse_pair_str(">a\nARND\n"),
            Err(FastaError::NotEnoughSequences(1))
        ));
    }

    #[test]
    fn test_sequence_without_header() {
        assert!(matches!(
            parse_pair_str("ARND\n>a\nARND\n"),
            Err(FastaError::SequenceWithoutHeader(1))
        ));
    }

    #[test]
    fn test_empty_identifier() {
        assert!(matches!(
            parse_pair_str(">\nARND\n"),
            Err(FastaError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_read_pair_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ">ref\nmktay\n>var\nMKTAH\n").unwrap();

        let (top, bottom) = read_pair(file.path()).unwrap();
        // Case is preserved as-is
        assert_eq!(top.data, "mktay");
        assert_eq!(bottom.data, "MKTAH");
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_pair("/nonexistent/pair.fasta"),
            Err(FastaError::IoError(_))
        ));
    }
}
