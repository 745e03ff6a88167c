//! Type expression grammar.
//!
//! ```text
//! type         = intersection { "|" intersection }
//! intersection = operand { "&" operand }
//! operand      = [ "?" ] atomic
//! atomic       = primary { "[" "]" }
//! primary      = "(" sub_type ")" | "$this"
//!              | identifier [ generic | callable | shape ]
//!              | const_expr
//! sub_type     = "$param" conditional | type [ conditional ]
//! conditional  = "is" [ "not" ] type "?" type ":" type [ conditional ]
//! ```
//!
//! Unions and intersections are collected flat. Inside brackets line
//! breaks are skipped, so multi-line shapes and generics parse.

use phpdoc_ir::attributes::keys;
use phpdoc_ir::{
    ArrayShape, ArrayShapeItem, ArrayShapeKey, ArrayShapeKind, CallableParameter, CallableType,
    ConditionalSubject, ConditionalType, ConstExpr, InvalidType, Node, TokenKind, TokenSet,
    TypeKind, TypeNode,
};
use phpdoc_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::error::{Expected, ParseError};
use crate::Parser;

/// Tokens that can start a constant used as a type.
const CONST_TYPE_START: TokenSet = TokenSet::new()
    .with(TokenKind::Integer)
    .with(TokenKind::Float)
    .with(TokenKind::SingleQuotedString)
    .with(TokenKind::DoubleQuotedString)
    .with(TokenKind::Minus)
    .with(TokenKind::Identifier);

impl Parser {
    /// Parse one type expression at the current token.
    pub fn parse_type(&mut self) -> Result<TypeNode, ParseError> {
        ensure_sufficient_stack(|| self.parse_union(false))
    }

    /// Parse the rest of the input as a type, capturing failures.
    pub fn parse_type_lenient(&mut self) -> TypeNode {
        let start = self.mark();
        let result = self.attempt(|p| {
            let ty = p.parse_type()?;
            p.expect_end()?;
            Ok(ty)
        });
        match result {
            Ok(ty) => ty,
            Err(error) => {
                debug!(%error, "capturing invalid type");
                let raw: String = self.stream.tokens()[start..]
                    .iter()
                    .map(|t| t.value.as_str())
                    .collect();
                self.stream.fast_forward_to_end();
                let mut node = self.finish_type(
                    TypeKind::Invalid(InvalidType {
                        raw: raw.trim_end().to_owned(),
                        message: error.to_string(),
                    }),
                    start,
                );
                node.set_attribute(keys::ERROR, error);
                node
            }
        }
    }

    pub(crate) fn finish_type(&self, kind: TypeKind, start: usize) -> TypeNode {
        let mut node = TypeNode::new(kind);
        self.enrich(&mut node, start);
        node
    }

    /// Whether `kind` is next, looking past line breaks when `multiline`.
    ///
    /// Line breaks are only skipped when `kind` actually follows them.
    fn at_operator(&mut self, kind: TokenKind, multiline: bool) -> bool {
        if self.stream.is_current(kind) {
            return true;
        }
        if !multiline || !self.stream.is_current(TokenKind::PhpDocEol) {
            return false;
        }
        self.stream.push_save_point();
        self.skip_line_breaks();
        if self.stream.is_current(kind) {
            self.stream.drop_save_point();
            true
        } else {
            self.stream.rollback();
            false
        }
    }

    fn parse_union(&mut self, multiline: bool) -> Result<TypeNode, ParseError> {
        let start = self.mark();
        let first = self.parse_intersection(multiline)?;
        if !self.at_operator(TokenKind::Union, multiline) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.at_operator(TokenKind::Union, multiline) {
            self.stream.advance();
            if multiline {
                self.skip_line_breaks();
            }
            types.push(self.parse_intersection(multiline)?);
        }
        Ok(self.finish_type(TypeKind::Union(types), start))
    }

    fn parse_intersection(&mut self, multiline: bool) -> Result<TypeNode, ParseError> {
        let start = self.mark();
        let first = self.parse_operand()?;
        if !self.at_operator(TokenKind::Intersection, multiline) {
            return Ok(first);
        }
        let mut types = vec![first];
        while self.at_operator(TokenKind::Intersection, multiline) {
            self.stream.advance();
            if multiline {
                self.skip_line_breaks();
            }
            types.push(self.parse_operand()?);
        }
        Ok(self.finish_type(TypeKind::Intersection(types), start))
    }

    /// `?` binds to the following atomic type only.
    fn parse_operand(&mut self) -> Result<TypeNode, ParseError> {
        if !self.stream.is_current(TokenKind::Nullable) {
            return self.parse_atomic();
        }
        let start = self.mark();
        self.stream.advance();
        let inner = self.parse_atomic()?;
        Ok(self.finish_type(TypeKind::Nullable(Box::new(inner)), start))
    }

    fn parse_atomic(&mut self) -> Result<TypeNode, ParseError> {
        ensure_sufficient_stack(|| {
            let start = self.mark();
            let primary = match self.stream.current_kind() {
                TokenKind::OpenParen => self.parse_parenthesized()?,
                TokenKind::ThisVariable => {
                    self.stream.advance();
                    self.finish_type(TypeKind::This, start)
                }
                TokenKind::Identifier => self.parse_identifier_type()?,
                _ => self.parse_const_type()?,
            };
            Ok(self.parse_array_suffixes(primary, start))
        })
    }

    /// Apply `[]` as often as it follows. A `[` without `]` is left alone.
    fn parse_array_suffixes(&mut self, mut ty: TypeNode, start: usize) -> TypeNode {
        while self.stream.is_current(TokenKind::OpenSquare) {
            self.stream.push_save_point();
            self.stream.advance();
            if self.stream.try_consume_kind(TokenKind::CloseSquare) {
                self.stream.drop_save_point();
                ty = self.finish_type(TypeKind::Array(Box::new(ty)), start);
            } else {
                self.stream.rollback();
                break;
            }
        }
        ty
    }

    fn parse_parenthesized(&mut self) -> Result<TypeNode, ParseError> {
        self.stream.consume(TokenKind::OpenParen)?;
        self.skip_line_breaks();
        let start = self.mark();
        let ty = if self.stream.is_current(TokenKind::Variable) {
            let name = variable_name(&self.stream.consume(TokenKind::Variable)?);
            self.parse_conditional(ConditionalSubject::Parameter(name), start)?
        } else {
            let subject = self.parse_union(true)?;
            if self.is_conditional_next() {
                self.parse_conditional(ConditionalSubject::Type(Box::new(subject)), start)?
            } else {
                subject
            }
        };
        self.skip_line_breaks();
        self.stream.consume(TokenKind::CloseParen)?;
        Ok(ty)
    }

    fn is_conditional_next(&self) -> bool {
        self.stream.is_current(TokenKind::Identifier) && self.stream.is_current_value("is")
    }

    fn parse_conditional(
        &mut self,
        subject: ConditionalSubject,
        start: usize,
    ) -> Result<TypeNode, ParseError> {
        self.stream.consume_value(TokenKind::Identifier, "is")?;
        let negated = self.stream.is_current(TokenKind::Identifier) && self.stream.try_consume("not");
        let target = self.parse_union(true)?;
        self.skip_line_breaks();
        self.stream.consume(TokenKind::Nullable)?;
        self.skip_line_breaks();
        let if_type = self.parse_union(true)?;
        self.skip_line_breaks();
        self.stream.consume(TokenKind::Colon)?;
        self.skip_line_breaks();

        let else_start = self.mark();
        let mut else_type = self.parse_union(true)?;
        if self.is_conditional_next() {
            else_type =
                self.parse_conditional(ConditionalSubject::Type(Box::new(else_type)), else_start)?;
        }

        Ok(self.finish_type(
            TypeKind::Conditional(ConditionalType {
                subject,
                negated,
                target: Box::new(target),
                if_type: Box::new(if_type),
                else_type: Box::new(else_type),
            }),
            start,
        ))
    }

    fn parse_identifier_type(&mut self) -> Result<TypeNode, ParseError> {
        let start = self.mark();
        self.stream.push_save_point();
        let name = self.stream.current_value().to_owned();
        self.stream.advance();

        // `Foo::BAR` is a constant, not a class type.
        if self.stream.is_current(TokenKind::DoubleColon) {
            self.stream.rollback();
            return self.parse_const_type();
        }
        self.stream.drop_save_point();

        let shape_kind = ArrayShapeKind::from_identifier(&name);
        let identifier = self.finish_type(TypeKind::Identifier(name), start);

        if self.stream.is_current(TokenKind::OpenAngle) {
            return self.parse_generic(identifier, start);
        }
        if self.stream.is_current(TokenKind::OpenParen) {
            return Ok(self.try_parse_callable(identifier, start));
        }
        if let Some(kind) = shape_kind {
            if self.stream.is_current(TokenKind::OpenCurly)
                && !self.stream.is_preceded_by_horizontal_whitespace()
            {
                return self.parse_array_shape(kind, start);
            }
        }
        Ok(identifier)
    }

    fn parse_const_type(&mut self) -> Result<TypeNode, ParseError> {
        if !self.stream.is_current_any(CONST_TYPE_START) {
            return Err(self.stream.unexpected(Expected::kind(TokenKind::Identifier)));
        }
        let start = self.mark();
        let expr = self.parse_const_expr()?;
        Ok(self.finish_type(TypeKind::Const(expr), start))
    }

    /// `Base<A, B>`; trailing commas and line breaks are accepted.
    pub(crate) fn parse_generic(
        &mut self,
        base: TypeNode,
        start: usize,
    ) -> Result<TypeNode, ParseError> {
        self.stream.consume(TokenKind::OpenAngle)?;
        self.skip_line_breaks();
        let mut arguments = vec![self.parse_type()?];
        self.skip_line_breaks();
        while self.stream.try_consume_kind(TokenKind::Comma) {
            self.skip_line_breaks();
            if self.stream.is_current(TokenKind::CloseAngle) {
                break;
            }
            arguments.push(self.parse_type()?);
            self.skip_line_breaks();
        }
        self.stream.consume(TokenKind::CloseAngle)?;
        Ok(self.finish_type(
            TypeKind::Generic {
                base: Box::new(base),
                arguments,
            },
            start,
        ))
    }

    /// `name(` may open a callable signature or be a plain name followed by
    /// unrelated text, e.g. a description in parentheses.
    fn try_parse_callable(&mut self, identifier: TypeNode, start: usize) -> TypeNode {
        let fallback = identifier.clone();
        self.attempt(|p| p.parse_callable(identifier, start))
            .unwrap_or(fallback)
    }

    fn parse_callable(&mut self, identifier: TypeNode, start: usize) -> Result<TypeNode, ParseError> {
        self.stream.consume(TokenKind::OpenParen)?;
        self.skip_line_breaks();
        let mut parameters = Vec::new();
        if !self.stream.is_current(TokenKind::CloseParen) {
            parameters.push(self.parse_callable_parameter()?);
            self.skip_line_breaks();
            while self.stream.try_consume_kind(TokenKind::Comma) {
                self.skip_line_breaks();
                if self.stream.is_current(TokenKind::CloseParen) {
                    break;
                }
                parameters.push(self.parse_callable_parameter()?);
                self.skip_line_breaks();
            }
        }
        self.stream.consume(TokenKind::CloseParen)?;
        self.stream.consume(TokenKind::Colon)?;
        let return_type = self.parse_operand()?;

        Ok(self.finish_type(
            TypeKind::Callable(CallableType {
                identifier: Box::new(identifier),
                parameters,
                return_type: Box::new(return_type),
            }),
            start,
        ))
    }

    fn parse_callable_parameter(&mut self) -> Result<CallableParameter, ParseError> {
        let start = self.mark();
        let mut parameter = CallableParameter::new(self.parse_type()?);
        parameter.is_reference = self.stream.try_consume_kind(TokenKind::Reference);
        parameter.is_variadic = self.stream.try_consume_kind(TokenKind::Variadic);
        if self.stream.is_current(TokenKind::Variable) {
            parameter.name = Some(variable_name(&self.stream.consume(TokenKind::Variable)?));
        }
        parameter.is_optional = self.stream.try_consume_kind(TokenKind::Equal);
        self.enrich(&mut parameter, start);
        Ok(parameter)
    }

    fn parse_array_shape(
        &mut self,
        kind: ArrayShapeKind,
        start: usize,
    ) -> Result<TypeNode, ParseError> {
        self.stream.consume(TokenKind::OpenCurly)?;
        let mut items = Vec::new();
        let mut sealed = true;
        loop {
            self.skip_line_breaks();
            if self.stream.try_consume_kind(TokenKind::CloseCurly) {
                break;
            }
            if self.stream.try_consume_kind(TokenKind::Variadic) {
                sealed = false;
                self.skip_line_breaks();
                self.stream.try_consume_kind(TokenKind::Comma);
                self.skip_line_breaks();
                self.stream.consume(TokenKind::CloseCurly)?;
                break;
            }
            items.push(self.parse_array_shape_item()?);
            self.skip_line_breaks();
            if !self.stream.try_consume_kind(TokenKind::Comma) {
                self.stream.consume(TokenKind::CloseCurly)?;
                break;
            }
        }
        Ok(self.finish_type(
            TypeKind::ArrayShape(ArrayShape {
                kind,
                items,
                sealed,
            }),
            start,
        ))
    }

    fn parse_array_shape_item(&mut self) -> Result<ArrayShapeItem, ParseError> {
        let start = self.mark();
        let keyed = self.attempt(|p| {
            let key = p.parse_array_shape_key()?;
            let optional = p.stream.try_consume_kind(TokenKind::Nullable);
            p.stream.consume(TokenKind::Colon)?;
            Ok((key, optional))
        });
        let (key, optional) = match keyed {
            Ok((key, optional)) => (Some(key), optional),
            Err(_) => (None, false),
        };
        let value = self.parse_type()?;
        let mut item = ArrayShapeItem::new(key, optional, value);
        self.enrich(&mut item, start);
        Ok(item)
    }

    fn parse_array_shape_key(&mut self) -> Result<ArrayShapeKey, ParseError> {
        let start = self.mark();
        let key = match self.stream.current_kind() {
            TokenKind::Integer => {
                let mut expr = ConstExpr::integer(self.stream.current_value());
                self.stream.advance();
                self.enrich(&mut expr, start);
                ArrayShapeKey::Const(expr)
            }
            TokenKind::SingleQuotedString | TokenKind::DoubleQuotedString => {
                let mut expr = ConstExpr::string(self.stream.current_value());
                self.stream.advance();
                self.enrich(&mut expr, start);
                ArrayShapeKey::Const(expr)
            }
            TokenKind::Identifier => {
                ArrayShapeKey::Identifier(self.stream.consume(TokenKind::Identifier)?)
            }
            _ => return Err(self.stream.unexpected(Expected::kind(TokenKind::Identifier))),
        };
        Ok(key)
    }
}

/// Strip the `$` sigil.
pub(crate) fn variable_name(token: &str) -> String {
    token.strip_prefix('$').unwrap_or(token).to_owned()
}
