//! Recursive descent parser for PHPDoc comments.
//!
//! Produces the `phpdoc_ir` tree for a whole `/** ... */` comment, a
//! standalone type expression or a standalone constant expression.
//!
//! ```
//! use phpdoc_ir::PhpDocTagValue;
//!
//! let doc = phpdoc_parse::parse_docblock_str("/** @param int|null $x */").unwrap();
//! let PhpDocTagValue::Param(param) = &doc.tags().next().unwrap().value else {
//!     panic!("expected @param");
//! };
//! assert_eq!(param.ty.to_string(), "int|null");
//! assert_eq!(param.name, "x");
//! ```

mod config;
mod error;
mod grammar;
mod stream;

pub use config::ParserConfig;
pub use error::{Expected, ParseError};
pub use stream::TokenStream;

use phpdoc_ir::attributes::keys;
use phpdoc_ir::{ConstExpr, Node, PhpDocNode, TokenKind, TokenList, TypeNode};

/// Parser state: the token stream plus configuration.
///
/// One parser serves one parse call. The grammar entry points
/// (`parse_docblock`, `parse_type`, `parse_const_expr`,
/// `parse_type_lenient`) leave the cursor just past what they parsed.
pub struct Parser {
    stream: TokenStream,
    config: ParserConfig,
}

impl Parser {
    pub fn new(tokens: TokenList) -> Self {
        Parser::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config(tokens: TokenList, config: ParserConfig) -> Self {
        Parser {
            stream: TokenStream::new(tokens),
            config,
        }
    }

    pub fn stream(&self) -> &TokenStream {
        &self.stream
    }

    pub fn config(&self) -> ParserConfig {
        self.config
    }

    /// Fail unless every token has been consumed.
    pub fn expect_end(&self) -> Result<(), ParseError> {
        if self.stream.is_at_end() {
            Ok(())
        } else {
            Err(self.stream.unexpected(Expected::kind(TokenKind::End)))
        }
    }

    /// Start index of a node about to be parsed.
    #[inline]
    fn mark(&self) -> usize {
        self.stream.current_index()
    }

    /// Record position attributes for a node that started at `start`.
    fn enrich<N: Node>(&self, node: &mut N, start: usize) {
        if !self.config.tracks_positions() {
            return;
        }
        let end = self.stream.end_index_of_last_relevant_token();
        if self.config.lines() {
            node.set_attribute(keys::START_LINE, self.stream.line_at(start));
            node.set_attribute(keys::END_LINE, self.stream.line_at(end));
        }
        if self.config.indexes() {
            node.set_attribute(keys::START_INDEX, start);
            node.set_attribute(keys::END_INDEX, end);
        }
    }

    /// Run `f` speculatively: commit on success, restore the cursor on failure.
    ///
    /// All backtracking goes through here so every save point is matched
    /// by exactly one drop or rollback, even when `f` fails halfway.
    fn attempt<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.stream.push_save_point();
        let result = f(self);
        if result.is_ok() {
            self.stream.drop_save_point();
        } else {
            self.stream.rollback();
        }
        result
    }

    /// Line breaks are insignificant inside brackets.
    fn skip_line_breaks(&mut self) {
        while self.stream.try_consume_kind(TokenKind::PhpDocEol) {}
    }
}

/// Parse a whole `/** ... */` comment.
pub fn parse_docblock(tokens: TokenList) -> Result<PhpDocNode, ParseError> {
    Parser::new(tokens).parse_docblock()
}

/// Parse input that must be exactly one type expression.
pub fn parse_type(tokens: TokenList) -> Result<TypeNode, ParseError> {
    let mut parser = Parser::new(tokens);
    let ty = parser.parse_type()?;
    parser.expect_end()?;
    Ok(ty)
}

/// Parse input that must be exactly one constant expression.
pub fn parse_const_expr(tokens: TokenList) -> Result<ConstExpr, ParseError> {
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_const_expr()?;
    parser.expect_end()?;
    Ok(expr)
}

/// Parse a type expression, never failing.
///
/// Malformed input yields an invalid type node holding the raw text, with
/// the error under the `error` attribute.
pub fn parse_type_lenient(tokens: TokenList) -> TypeNode {
    Parser::new(tokens).parse_type_lenient()
}

pub fn parse_docblock_str(source: &str) -> Result<PhpDocNode, ParseError> {
    parse_docblock(phpdoc_lexer::tokenize(source))
}

pub fn parse_type_str(source: &str) -> Result<TypeNode, ParseError> {
    parse_type(phpdoc_lexer::tokenize(source))
}

pub fn parse_const_expr_str(source: &str) -> Result<ConstExpr, ParseError> {
    parse_const_expr(phpdoc_lexer::tokenize(source))
}
