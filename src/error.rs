use thiserror::Error;

/// Errors reported by tree construction, encoding, decoding and serialization.
///
/// All variants are local, recoverable conditions. Empty input is never an
/// error: it yields an empty tree, an empty bit-string and an empty output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HuffmanError {
    /// The input contains a byte that has no leaf in the tree.
    #[error("symbol {symbol:#04x} at position {position} has no code in the active tree")]
    UnknownSymbol { symbol: u8, position: usize },

    /// The bit-string ended while the decoder stood on a branch.
    #[error("code truncated after {consumed} bits: input ended inside a codeword")]
    TruncatedCode { consumed: usize },

    /// Decode or serialize was requested before any tree was built or loaded.
    #[error("no active tree: compress input or load a tree first")]
    NoActiveTree,

    /// The bit-string contains something other than `'0'` or `'1'`.
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit { position: usize, found: char },

    /// The bit leads nowhere (single-leaf tree given a `'1'`, or an empty tree).
    #[error("bit at position {position} does not map to any path in the tree")]
    UnmappedBit { position: usize },

    /// A serialized tree stream could not be replayed.
    #[error("malformed tree stream at byte {position}: {reason}")]
    MalformedTree {
        position: usize,
        reason: &'static str,
    },

    /// A packed buffer claims more bits than its bytes can hold.
    #[error("packed buffer holds {capacity} bits but claims {bit_count}")]
    InvalidPacking { bit_count: usize, capacity: usize },
}

/// Result type for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, HuffmanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unknown_symbol() {
        let err = HuffmanError::UnknownSymbol {
            symbol: b'z',
            position: 3,
        };
        assert_eq!(
            err.to_string(),
            "symbol 0x7a at position 3 has no code in the active tree"
        );
    }

    #[test]
    fn test_display_truncated() {
        let err = HuffmanError::TruncatedCode { consumed: 5 };
        assert!(err.to_string().contains("after 5 bits"));
    }

    #[test]
    fn test_display_malformed() {
        let err = HuffmanError::MalformedTree {
            position: 2,
            reason: "unknown marker",
        };
        assert_eq!(
            err.to_string(),
            "malformed tree stream at byte 2: unknown marker"
        );
    }
}
