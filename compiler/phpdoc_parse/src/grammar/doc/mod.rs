//! Comment body grammar.
//!
//! ```text
//! docblock = "/**" [ eol ] [ child { eol child } ] [ eol ] "*/"
//! child    = tag | text
//! tag      = "@name" tag_value
//! ```
//!
//! A blank line between two children becomes an empty text child, so it
//! survives printing.

use phpdoc_ir::{PhpDocChild, PhpDocNode, PhpDocTagNode, PhpDocTextNode, TokenKind, TokenSet};
use phpdoc_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::error::ParseError;
use crate::Parser;

const LINE_END: TokenSet = TokenSet::new()
    .with(TokenKind::PhpDocEol)
    .with(TokenKind::ClosePhpDoc)
    .with(TokenKind::End);

/// After a line break, these end a run of text instead of continuing it.
const TEXT_BREAK: TokenSet = LINE_END.with(TokenKind::PhpDocTag);

impl Parser {
    /// Parse a whole `/** ... */` comment.
    ///
    /// Tokens after the close marker are ignored.
    pub fn parse_docblock(&mut self) -> Result<PhpDocNode, ParseError> {
        ensure_sufficient_stack(|| {
            let start = self.mark();
            self.stream.consume(TokenKind::OpenPhpDoc)?;
            self.stream.try_consume_kind(TokenKind::PhpDocEol);

            let mut children = Vec::new();
            if !self.stream.is_current(TokenKind::ClosePhpDoc) {
                children.push(self.parse_child());
                while self.stream.try_consume_kind(TokenKind::PhpDocEol)
                    && !self.stream.is_current(TokenKind::ClosePhpDoc)
                {
                    children.push(self.parse_child());
                }
            }
            self.stream.consume(TokenKind::ClosePhpDoc)?;

            trace!(children = children.len(), "parsed docblock");
            let mut doc = PhpDocNode::new(children);
            self.enrich(&mut doc, start);
            Ok(doc)
        })
    }

    fn parse_child(&mut self) -> PhpDocChild {
        let start = self.mark();
        if self.stream.is_current(TokenKind::PhpDocTag) {
            let mut tag = self.parse_tag();
            self.enrich(&mut tag, start);
            PhpDocChild::Tag(tag)
        } else {
            let mut text = PhpDocTextNode::new(self.parse_text());
            self.enrich(&mut text, start);
            PhpDocChild::Text(text)
        }
    }

    fn parse_tag(&mut self) -> PhpDocTagNode {
        let name = self.stream.current_value().to_owned();
        self.stream.advance();
        let value = self.parse_tag_value(&name);
        PhpDocTagNode::new(name, value)
    }

    /// Capture text verbatim up to the end of the line, continuing over
    /// following lines until a tag line, a blank line or the close marker.
    ///
    /// Each line loses its trailing spaces and tabs; lines are joined with
    /// `\n`.
    pub(crate) fn parse_text(&mut self) -> String {
        let mut text = String::new();
        while !self.stream.is_current(TokenKind::PhpDocEol) {
            let line = self.stream.join_until(LINE_END);
            text.push_str(line.trim_end_matches([' ', '\t']));
            if !self.stream.is_current(TokenKind::PhpDocEol) {
                break;
            }

            self.stream.push_save_point();
            self.stream.advance();
            if self.stream.is_current_any(TEXT_BREAK) {
                self.stream.rollback();
                break;
            }
            self.stream.drop_save_point();
            text.push('\n');
        }
        text
    }
}
