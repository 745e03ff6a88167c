//! Parse errors.
//!
//! A [`ParseError`] names the token that stopped the grammar, where it sits
//! in the source and what would have been accepted instead. Save-point
//! misuse is not a `ParseError`: it is a bug in the grammar and panics.

use std::fmt;

use phpdoc_ir::TokenKind;

/// What the grammar wanted at the failing position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expected {
    pub kind: TokenKind,
    /// A specific token text, e.g. `of` or `from`.
    pub value: Option<String>,
}

impl Expected {
    pub fn kind(kind: TokenKind) -> Self {
        Expected { kind, value: None }
    }

    pub fn value(kind: TokenKind, value: impl Into<String>) -> Self {
        Expected {
            kind,
            value: Some(value.into()),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.display_name())?;
        if let Some(value) = &self.value {
            write!(f, " ({value:?})")?;
        }
        Ok(())
    }
}

/// A syntax error at a single token.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "unexpected token {found_value:?} ({}) at offset {offset} on line {line}, expected {expected}",
    .found_kind.display_name()
)]
pub struct ParseError {
    /// Verbatim text of the offending token.
    pub found_value: String,
    pub found_kind: TokenKind,
    /// Byte offset of the offending token in the scanned text.
    pub offset: usize,
    /// 1-based line of the offending token.
    pub line: u32,
    pub expected: Expected,
}
