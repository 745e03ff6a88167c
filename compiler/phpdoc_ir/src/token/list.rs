//! Token list produced by the lexer.

use std::ops::Deref;

use super::{Token, TokenKind};

/// A list of tokens, always terminated by [`TokenKind::End`] once sealed.
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create an empty token list.
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Create a token list with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Build a list from raw tokens and seal it.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut list = TokenList { tokens };
        list.seal();
        list
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Append the terminal token unless the list already ends with one.
    pub fn seal(&mut self) {
        if self.tokens.last().is_some_and(|t| t.kind == TokenKind::End) {
            return;
        }
        let line = self.tokens.last().map_or(1, |t| {
            // A trailing line break moves the end marker to the next line.
            if t.kind == TokenKind::PhpDocEol {
                t.line + 1
            } else {
                t.line
            }
        });
        self.tokens.push(Token::end(line));
    }

    /// Get token at index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Reassemble the scanned text.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.value.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

impl Deref for TokenList {
    type Target = [Token];

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

impl std::fmt::Debug for TokenList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}
