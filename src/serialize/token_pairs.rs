//! The separator-insertion table: which adjacent serialized-token
//! categories would re-tokenize into something different (or a single,
//! larger token) if written back to back without an intervening `/**/`.

/// The serialization category a written token falls into, coarse enough to
/// drive the adjacency table without re-deriving the exact token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Ident,
    AtKeywordOrHash,
    Dimension,
    Number,
    Percentage,
    DelimMinus,
    DelimPlus,
    DelimDot,
    DelimSlash,
    DelimAt,
    DelimHash,
    DelimOther,
    CdcClose, // a token ending in `-` right before a literal `->`
}

/// True when `next` written immediately after `prev` would re-tokenize
/// differently than the two original tokens (CSS Syntax §serialization).
#[must_use]
pub fn needs_separator(prev: TokenCategory, next: TokenCategory) -> bool {
    use TokenCategory::*;
    matches!(
        (prev, next),
        (Ident, Ident)
            | (Ident, DelimMinus)
            | (Ident, Number)
            | (Ident, Percentage)
            | (Ident, Dimension)
            | (Ident, DelimOther)
            | (AtKeywordOrHash, Ident)
            | (AtKeywordOrHash, Number)
            | (AtKeywordOrHash, Dimension)
            | (AtKeywordOrHash, Percentage)
            | (AtKeywordOrHash, DelimMinus)
            | (DelimHash, Ident)
            | (DelimHash, Number)
            | (DelimHash, Dimension)
            | (DelimMinus, Ident)
            | (DelimMinus, Dimension)
            | (DelimMinus, Number)
            | (DelimMinus, DelimMinus)
            | (Number, Ident)
            | (Number, Number)
            | (Number, Percentage)
            | (Number, Dimension)
            | (Number, DelimMinus)
            | (Dimension, Ident)
            | (Dimension, Number)
            | (Dimension, Dimension)
            | (DelimAt, Ident)
            | (DelimDot, Number)
            | (DelimSlash, DelimOther)
            | (CdcClose, DelimOther)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_then_ident_needs_separator() {
        assert!(needs_separator(TokenCategory::Ident, TokenCategory::Ident));
    }

    #[test]
    fn ident_then_colon_does_not() {
        assert!(!needs_separator(TokenCategory::Ident, TokenCategory::DelimSlash));
    }

    #[test]
    fn number_then_dash_needs_separator() {
        assert!(needs_separator(TokenCategory::Number, TokenCategory::DelimMinus));
    }
}
