//! Text payload carried from the dragged row to the drop target.
//!
//! The payload is the decimal form of the source row index, the same thing a browser would put
//! into `DataTransfer` as `text/plain`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("no drag payload present")]
    Missing,
    #[error("drag payload is empty")]
    Empty,
    #[error("drag payload {0:?} is not a row index")]
    NotAnIndex(String),
    #[error("drag payload index {index} is outside a list of length {len}")]
    OutOfBounds { index: usize, len: usize },
}

pub fn encode_index(index: usize) -> String {
    index.to_string()
}

/// Parses `text` as a row index of a list with `len` rows.
pub fn decode_index(text: Option<&str>, len: usize) -> Result<usize, PayloadError> {
    let text = text.ok_or(PayloadError::Missing)?.trim();
    if text.is_empty() {
        return Err(PayloadError::Empty);
    }

    // usize parsing already rejects signs other than '+', fractions and exponents
    let index: usize = text
        .parse()
        .map_err(|_| PayloadError::NotAnIndex(text.to_owned()))?;
    if index >= len {
        return Err(PayloadError::OutOfBounds { index, len });
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_encoded_index() {
        assert_eq!(decode_index(Some(&encode_index(2)), 6), Ok(2));
        assert_eq!(decode_index(Some(" 4\n"), 6), Ok(4));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(decode_index(None, 6), Err(PayloadError::Missing));
        assert_eq!(decode_index(Some(""), 6), Err(PayloadError::Empty));
        assert_eq!(decode_index(Some("   "), 6), Err(PayloadError::Empty));
        for bad in ["x", "-1", "1.5", "NaN", "inf", "1e2", "0x2"] {
            assert_eq!(
                decode_index(Some(bad), 6),
                Err(PayloadError::NotAnIndex(bad.to_owned())),
                "{bad}"
            );
        }
    }

    #[test]
    fn rejects_index_past_end() {
        assert_eq!(
            decode_index(Some("6"), 6),
            Err(PayloadError::OutOfBounds { index: 6, len: 6 })
        );
        assert!(decode_index(Some("0"), 0).is_err());
    }
}
