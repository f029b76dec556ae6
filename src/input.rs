//! Sequence input checks.
//!
//! Before anything is shown, both sequences are cleaned of whitespace and
//! checked: non-empty, made only of the 20 amino acid letters or '-'
//! (any case), and of equal length.

use std::fmt;

use thiserror::Error;

use crate::model::{AlignedPair, Sequence};

/// Symbols accepted in a sequence (uppercase; lowercase is accepted too).
pub const ALLOWED_SYMBOLS: &str = "ARNDCEQGHILKMFPSTWYV-";

/// Which of the two input sequences an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::First => write!(f, "Sequence 1"),
            Slot::Second => write!(f, "Sequence 2"),
        }
    }
}

/// Errors that can occur while checking the input sequences.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} is required")]
    Missing(Slot),

    #[error(
        "{slot}: invalid character '{found}' at position {position}. \
         Only amino acid letters (A, R, N, D, C, E, Q, G, H, I, L, K, M, F, P, S, T, W, Y, V) \
         and '-' are allowed"
    )]
    InvalidSymbol {
        slot: Slot,
        found: char,
        /// 1-based
        position: usize,
    },

    #[error("Sequence lengths must match (sequence 1: {first}, sequence 2: {second})")]
    LengthMismatch { first: usize, second: usize },
}

/// Removes all whitespace, as when pasting a wrapped sequence.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

fn is_allowed(c: char) -> bool {
    ALLOWED_SYMBOLS.contains(c.to_ascii_uppercase())
}

/// Checks one already-normalized sequence.
pub fn validate_sequence(slot: Slot, data: &str) -> Result<(), InputError> {
    if data.is_empty() {
        return Err(InputError::Missing(slot));
    }
    if let Some((idx, found)) = data.chars().enumerate().find(|(_, c)| !is_allowed(*c)) {
        return Err(InputError::InvalidSymbol {
            slot,
            found,
            position: idx + 1,
        });
    }
    Ok(())
}

/// Normalizes and checks both sequences, producing the pair to display.
///
/// The original letter case is kept; display code uppercases on its own.
pub fn validate_pair(first: Sequence, second: Sequence) -> Result<AlignedPair, InputError> {
    let first = Sequence::new(first.id, normalize(&first.data));
    let second = Sequence::new(second.id, normalize(&second.data));

    validate_sequence(Slot::First, &first.data)?;
    validate_sequence(Slot::Second, &second.data)?;

    if first.len() != second.len() {
        return Err(InputError::LengthMismatch {
            first: first.len(),
            second: second.len(),
        });
    }

    Ok(AlignedPair::new(first, second))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(data: &str) -> Sequence {
        Sequence::new("s", data)
    }

    #[test]
    fn test_normalize_strips_whitespace() {
        assert_eq!(normalize(" AR ND\n\tCQ \r\n"), "ARNDCQ");
    }

    #[test]
    fn test_valid_pair_keeps_case() {
        let pair = validate_pair(seq("ar nd"), seq("ARN-")).unwrap();
        assert_eq!(pair.top.data, "arnd");
        assert_eq!(pair.bottom.data, "ARN-");
    }

    #[test]
    fn test_missing() {
        assert_eq!(
            validate_pair(seq("  "), seq("A")),
            Err(InputError::Missing(Slot::First))
        );
        assert_eq!(
            validate_pair(seq("A"), seq("")),
            Err(InputError::Missing(Slot::Second))
        );
    }

    #[test]
    fn test_invalid_symbol() {
        assert_eq!(
            validate_pair(seq("ARBD"), seq("ARND")),
            Err(InputError::InvalidSymbol {
                slot: Slot::First,
                found: 'B',
                position: 3
            })
        );
        assert_eq!(
            validate_pair(seq("ARND"), seq("AR1D")),
            Err(InputError::InvalidSymbol {
                slot: Slot::Second,
                found: '1',
                position: 3
            })
        );
    }

    #[test]
    fn test_all_allowed_symbols() {
        assert!(validate_sequence(Slot::First, ALLOWED_SYMBOLS).is_ok());
        assert!(validate_sequence(Slot::First, &ALLOWED_SYMBOLS.to_lowercase()).is_ok());
        for c in ['B', 'J', 'O', 'U', 'X', 'Z', '*', '.'] {
            assert!(validate_sequence(Slot::First, &c.to_string()).is_err(), "{c}");
        }
    }

    #[test]
    fn test_length_mismatch() {
        let err = validate_pair(seq("ARND"), seq("ARN")).unwrap_err();
        assert_eq!(err, InputError::LengthMismatch { first: 4, second: 3 });
        assert!(err.to_string().contains("must match"));
    }

    #[test]
    fn test_error_messages_name_the_slot() {
        let err = validate_pair(seq("A"), seq("Z")).unwrap_err();
        assert!(err.to_string().starts_with("Sequence 2: invalid character 'Z' at position 1"));
    }
}
