//! Constant expression grammar.
//!
//! Literals keep their lexeme. `true`, `false` and `null` match without
//! regard to case and keep the spelling they were written with.

use phpdoc_ir::{ConstArrayItem, ConstExpr, ConstExprKind, TokenKind};
use phpdoc_stack::ensure_sufficient_stack;

use crate::error::{Expected, ParseError};
use crate::Parser;

impl Parser {
    /// Parse one constant expression at the current token.
    pub fn parse_const_expr(&mut self) -> Result<ConstExpr, ParseError> {
        ensure_sufficient_stack(|| {
            let start = self.mark();
            let kind = self.parse_const_expr_kind()?;
            let mut expr = ConstExpr::new(kind);
            self.enrich(&mut expr, start);
            Ok(expr)
        })
    }

    fn parse_const_expr_kind(&mut self) -> Result<ConstExprKind, ParseError> {
        let kind = match self.stream.current_kind() {
            TokenKind::Integer => ConstExprKind::Integer(self.stream.consume(TokenKind::Integer)?),
            TokenKind::Float => ConstExprKind::Float(self.stream.consume(TokenKind::Float)?),
            kind @ (TokenKind::SingleQuotedString | TokenKind::DoubleQuotedString) => {
                ConstExprKind::String(self.stream.consume(kind)?)
            }
            TokenKind::Minus => {
                self.stream.advance();
                ConstExprKind::UnaryMinus(Box::new(self.parse_const_expr()?))
            }
            TokenKind::OpenSquare => {
                self.stream.advance();
                self.parse_const_array(TokenKind::CloseSquare, false)?
            }
            TokenKind::Identifier => self.parse_identifier_const()?,
            _ => return Err(self.stream.unexpected(Expected::kind(TokenKind::Identifier))),
        };
        Ok(kind)
    }

    fn parse_identifier_const(&mut self) -> Result<ConstExprKind, ParseError> {
        let name = self.stream.consume(TokenKind::Identifier)?;
        if self.stream.try_consume_kind(TokenKind::DoubleColon) {
            return self.parse_class_constant(name);
        }
        let kind = match name.to_ascii_lowercase().as_str() {
            "true" => ConstExprKind::True(name),
            "false" => ConstExprKind::False(name),
            "null" => ConstExprKind::Null(name),
            "array" if self.stream.is_current(TokenKind::OpenParen) => {
                self.stream.advance();
                self.parse_const_array(TokenKind::CloseParen, true)?
            }
            _ => ConstExprKind::Fetch {
                class_name: None,
                name,
            },
        };
        Ok(kind)
    }

    /// The part after `Class::`: a name, a `*` wildcard or a name prefix
    /// followed by `*`. Whitespace ends the name.
    fn parse_class_constant(&mut self, class_name: String) -> Result<ConstExprKind, ParseError> {
        let mut name = String::new();
        let mut last = None;
        loop {
            if last != Some(TokenKind::Identifier) && self.stream.is_current(TokenKind::Identifier) {
                name.push_str(self.stream.current_value());
                self.stream.advance();
                last = Some(TokenKind::Identifier);
            } else if last != Some(TokenKind::Wildcard)
                && self.stream.try_consume_kind(TokenKind::Wildcard)
            {
                name.push('*');
                last = Some(TokenKind::Wildcard);
            } else if last.is_none() {
                return Err(self.stream.unexpected(Expected::kind(TokenKind::Wildcard)));
            } else {
                break;
            }
            if self.stream.is_preceded_by_horizontal_whitespace() {
                break;
            }
        }
        Ok(ConstExprKind::Fetch {
            class_name: Some(class_name),
            name,
        })
    }

    /// Items up to `close`; `[` or `array(` is already consumed.
    fn parse_const_array(
        &mut self,
        close: TokenKind,
        long_syntax: bool,
    ) -> Result<ConstExprKind, ParseError> {
        let mut items = Vec::new();
        loop {
            if self.stream.try_consume_kind(close) {
                break;
            }
            items.push(self.parse_const_array_item()?);
            if !self.stream.try_consume_kind(TokenKind::Comma) {
                self.stream.consume(close)?;
                break;
            }
        }
        Ok(ConstExprKind::Array { items, long_syntax })
    }

    fn parse_const_array_item(&mut self) -> Result<ConstArrayItem, ParseError> {
        let start = self.mark();
        let first = self.parse_const_expr()?;
        let mut item = if self.stream.try_consume_kind(TokenKind::DoubleArrow) {
            ConstArrayItem::new(Some(first), self.parse_const_expr()?)
        } else {
            ConstArrayItem::new(None, first)
        };
        self.enrich(&mut item, start);
        Ok(item)
    }
}
