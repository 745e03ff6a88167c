//! Token types for the PHPDoc lexer.
//!
//! Whitespace and line breaks are real tokens. Concatenating every token
//! value of a `TokenList` reproduces the scanned text byte for byte.

mod kind;
mod list;
mod set;

pub use kind::TokenKind;
pub use list::TokenList;
pub use set::TokenSet;

use std::fmt;

/// A token with its verbatim text and the line it starts on.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    /// 1-based line number.
    pub line: u32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, value: impl Into<String>, line: u32) -> Self {
        Token {
            kind,
            value: value.into(),
            line,
        }
    }

    /// The terminal token every list ends with.
    pub fn end(line: u32) -> Self {
        Token::new(TokenKind::End, "", line)
    }

    /// Byte length of the token text.
    #[inline]
    pub fn len(&self) -> usize {
        self.value.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ line {}", self.kind, self.value, self.line)
    }
}
