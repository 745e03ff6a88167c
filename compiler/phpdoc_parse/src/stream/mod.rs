//! Token stream with a cursor and a save-point stack.
//!
//! The stream is the only mutable state the grammars share. Every
//! consuming step also skips one following horizontal whitespace token, so
//! grammar code can ignore spacing; `join_until` and
//! `is_preceded_by_horizontal_whitespace` look at spacing when it matters.
//!
//! Backtracking is strictly nested: `push_save_point` before a speculative
//! parse, then exactly one of `drop_save_point` (commit) or `rollback`.

use phpdoc_ir::{Token, TokenKind, TokenList, TokenSet};
use tracing::trace;

use crate::error::{Expected, ParseError};

pub struct TokenStream {
    tokens: TokenList,
    /// Byte offset of each token, so error paths taken during speculative
    /// parses stay constant time.
    offsets: Vec<usize>,
    /// Always a valid index; the last token is `End`.
    index: usize,
    save_points: Vec<usize>,
}

impl TokenStream {
    /// Wrap lexer output, skipping one leading whitespace token.
    pub fn new(mut tokens: TokenList) -> Self {
        tokens.seal();
        let index = usize::from(tokens[0].kind == TokenKind::HorizontalWhitespace);
        let offsets = tokens
            .iter()
            .scan(0, |offset, token| {
                let start = *offset;
                *offset += token.len();
                Some(start)
            })
            .collect();
        TokenStream {
            tokens,
            offsets,
            index,
            save_points: Vec::new(),
        }
    }

    #[inline]
    pub fn tokens(&self) -> &TokenList {
        &self.tokens
    }

    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.index]
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_value(&self) -> &str {
        &self.current().value
    }

    #[inline]
    pub fn current_line(&self) -> u32 {
        self.current().line
    }

    /// Index of the current token.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Line of the token at `index`, clamped to the terminal token.
    pub fn line_at(&self, index: usize) -> u32 {
        self.tokens
            .get(index)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    /// Byte offset of the current token in the scanned text.
    #[inline]
    pub fn current_offset(&self) -> usize {
        self.offsets[self.index]
    }

    #[inline]
    pub fn is_current(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn is_current_value(&self, value: &str) -> bool {
        self.current_value() == value
    }

    #[inline]
    pub fn is_current_any(&self, kinds: TokenSet) -> bool {
        kinds.contains(self.current_kind())
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.is_current(TokenKind::End)
    }

    pub fn is_preceded_by_horizontal_whitespace(&self) -> bool {
        self.index > 0 && self.tokens[self.index - 1].kind == TokenKind::HorizontalWhitespace
    }

    /// Index of the last token before the cursor that is not spacing.
    pub fn end_index_of_last_relevant_token(&self) -> usize {
        let mut index = self.index.saturating_sub(1);
        while index > 0 && self.tokens[index].kind.is_trivia() {
            index -= 1;
        }
        index
    }

    /// Consume a token of `kind` and return its text.
    pub fn consume(&mut self, kind: TokenKind) -> Result<String, ParseError> {
        if self.is_current(kind) {
            let value = self.current_value().to_owned();
            self.advance();
            Ok(value)
        } else {
            Err(self.unexpected(Expected::kind(kind)))
        }
    }

    /// Consume a token of `kind` whose text is exactly `value`.
    pub fn consume_value(&mut self, kind: TokenKind, value: &str) -> Result<(), ParseError> {
        if self.is_current(kind) && self.is_current_value(value) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(Expected::value(kind, value)))
        }
    }

    /// Consume the current token if its text is `value`.
    pub fn try_consume(&mut self, value: &str) -> bool {
        if self.is_current_value(value) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it is of `kind`.
    pub fn try_consume_kind(&mut self, kind: TokenKind) -> bool {
        if self.is_current(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Collect raw token text until a token in `stops`.
    ///
    /// `End` always stops the join.
    pub fn join_until(&mut self, stops: TokenSet) -> String {
        let stops = stops.with(TokenKind::End);
        let mut text = String::new();
        while !self.is_current_any(stops) {
            text.push_str(self.current_value());
            self.index += 1;
        }
        text
    }

    /// Step one token, then over one horizontal whitespace token.
    ///
    /// Stays put on the terminal token.
    pub fn advance(&mut self) {
        if self.index + 1 >= self.tokens.len() {
            return;
        }
        self.index += 1;
        if self.is_current(TokenKind::HorizontalWhitespace) && self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    /// Jump to the terminal token.
    pub fn fast_forward_to_end(&mut self) {
        self.index = self.tokens.len() - 1;
    }

    pub fn push_save_point(&mut self) {
        trace!(index = self.index, depth = self.save_points.len(), "push save point");
        self.save_points.push(self.index);
    }

    /// Commit the innermost speculative parse.
    pub fn drop_save_point(&mut self) {
        if self.save_points.pop().is_none() {
            panic!("drop_save_point without a save point: save point calls are unbalanced");
        }
    }

    /// Restore the cursor to the innermost save point and discard it.
    ///
    /// # Panics
    ///
    /// Panics when no save point is active. That is a grammar bug, never a
    /// property of the input.
    pub fn rollback(&mut self) {
        let Some(index) = self.save_points.pop() else {
            panic!("rollback without a save point: save point calls are unbalanced");
        };
        trace!(from = self.index, to = index, "rollback");
        self.index = index;
    }

    /// Number of active save points.
    #[inline]
    pub fn save_point_depth(&self) -> usize {
        self.save_points.len()
    }

    /// Build an error for the current token.
    #[cold]
    #[inline(never)]
    pub fn unexpected(&self, expected: Expected) -> ParseError {
        let token = self.current();
        trace!(found = ?token.kind, expected = %expected, "unexpected token");
        ParseError {
            found_value: token.value.clone(),
            found_kind: token.kind,
            offset: self.current_offset(),
            line: token.line,
            expected,
        }
    }
}

#[cfg(test)]
mod tests;
