//! Tag dispatch and tag-value grammars.
//!
//! The tag name picks a grammar from a fixed table. Unknown names keep
//! their text as a generic value. A known grammar that fails is rolled
//! back and its text kept as an invalid value; the error stays local to
//! the tag.

use phpdoc_ir::attributes::{keys, Attributes};
use phpdoc_ir::{
    InheritanceTagValue, InvalidTagValue, MethodParameter, MethodTagValue, Node, ParamTagValue,
    PhpDocTagValue, PropertyTagValue, TemplateTagValue, TextTagValue, TokenKind, TokenSet,
    TypeAliasImportTagValue, TypeAliasTagValue, TypeKind, TypeTagValue, VarTagValue,
};
use tracing::debug;

use super::ty::variable_name;
use crate::error::{Expected, ParseError};
use crate::Parser;

/// Where a tag value may end.
const TAG_END: TokenSet = TokenSet::new()
    .with(TokenKind::PhpDocEol)
    .with(TokenKind::ClosePhpDoc)
    .with(TokenKind::End);

/// The grammar a tag name selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TagGrammar {
    Param,
    Var,
    Return,
    Throws,
    Mixin,
    Deprecated,
    Property,
    Method,
    Template,
    Extends,
    Implements,
    Uses,
    TypeAlias,
    TypeAliasImport,
}

impl TagGrammar {
    /// Look up a tag name, `@` included. Matching is exact.
    pub(crate) fn for_tag(name: &str) -> Option<Self> {
        let grammar = match name {
            "@param" | "@phpstan-param" | "@psalm-param" => TagGrammar::Param,
            "@var" | "@phpstan-var" | "@psalm-var" => TagGrammar::Var,
            "@return" | "@phpstan-return" | "@psalm-return" => TagGrammar::Return,
            "@throws" | "@phpstan-throws" => TagGrammar::Throws,
            "@mixin" => TagGrammar::Mixin,
            "@deprecated" => TagGrammar::Deprecated,
            "@property"
            | "@property-read"
            | "@property-write"
            | "@phpstan-property"
            | "@phpstan-property-read"
            | "@phpstan-property-write"
            | "@psalm-property"
            | "@psalm-property-read"
            | "@psalm-property-write" => TagGrammar::Property,
            "@method" | "@phpstan-method" | "@psalm-method" => TagGrammar::Method,
            "@template"
            | "@template-covariant"
            | "@template-contravariant"
            | "@phpstan-template"
            | "@phpstan-template-covariant"
            | "@phpstan-template-contravariant"
            | "@psalm-template"
            | "@psalm-template-covariant"
            | "@psalm-template-contravariant" => TagGrammar::Template,
            "@extends" | "@phpstan-extends" | "@template-extends" => TagGrammar::Extends,
            "@implements" | "@phpstan-implements" | "@template-implements" => {
                TagGrammar::Implements
            }
            "@use" | "@uses" | "@phpstan-use" | "@template-use" => TagGrammar::Uses,
            "@phpstan-type" | "@psalm-type" => TagGrammar::TypeAlias,
            "@phpstan-import-type" | "@psalm-import-type" => TagGrammar::TypeAliasImport,
            _ => return None,
        };
        Some(grammar)
    }
}

impl Parser {
    /// Parse the value of tag `name`; the name token is already consumed.
    ///
    /// Never fails: see the module docs.
    pub(crate) fn parse_tag_value(&mut self, name: &str) -> PhpDocTagValue {
        let start = self.mark();
        let Some(grammar) = TagGrammar::for_tag(name) else {
            let mut value = PhpDocTagValue::Generic(TextTagValue {
                text: self.parse_text(),
                attributes: Attributes::new(),
            });
            self.enrich(&mut value, start);
            return value;
        };

        let mut value = match self.attempt(|p| p.parse_known_tag_value(grammar)) {
            Ok(value) => value,
            Err(error) => {
                debug!(tag = name, %error, "tag value degraded to invalid");
                let mut value = PhpDocTagValue::Invalid(InvalidTagValue {
                    value: self.parse_text(),
                    message: error.to_string(),
                    attributes: Attributes::new(),
                });
                value.set_attribute(keys::ERROR, error);
                value
            }
        };
        self.enrich(&mut value, start);
        value
    }

    fn parse_known_tag_value(&mut self, grammar: TagGrammar) -> Result<PhpDocTagValue, ParseError> {
        let value = match grammar {
            TagGrammar::Param => PhpDocTagValue::Param(self.parse_param_tag_value()?),
            TagGrammar::Var => PhpDocTagValue::Var(self.parse_var_tag_value()?),
            TagGrammar::Return => PhpDocTagValue::Return(self.parse_type_tag_value()?),
            TagGrammar::Throws => PhpDocTagValue::Throws(self.parse_type_tag_value()?),
            TagGrammar::Mixin => PhpDocTagValue::Mixin(self.parse_type_tag_value()?),
            TagGrammar::Deprecated => PhpDocTagValue::Deprecated(TextTagValue {
                text: self.parse_text(),
                attributes: Attributes::new(),
            }),
            TagGrammar::Property => PhpDocTagValue::Property(self.parse_property_tag_value()?),
            TagGrammar::Method => PhpDocTagValue::Method(self.parse_method_tag_value()?),
            TagGrammar::Template => PhpDocTagValue::Template(self.parse_template_tag_value()?),
            TagGrammar::Extends => PhpDocTagValue::Extends(self.parse_inheritance_tag_value()?),
            TagGrammar::Implements => {
                PhpDocTagValue::Implements(self.parse_inheritance_tag_value()?)
            }
            TagGrammar::Uses => PhpDocTagValue::Uses(self.parse_inheritance_tag_value()?),
            TagGrammar::TypeAlias => PhpDocTagValue::TypeAlias(self.parse_type_alias_tag_value()?),
            TagGrammar::TypeAliasImport => {
                PhpDocTagValue::TypeAliasImport(self.parse_type_alias_import_tag_value()?)
            }
        };
        if !self.stream.is_current_any(TAG_END) {
            return Err(self.stream.unexpected(Expected::kind(TokenKind::PhpDocEol)));
        }
        Ok(value)
    }

    fn parse_param_tag_value(&mut self) -> Result<ParamTagValue, ParseError> {
        let ty = self.parse_type()?;
        let is_reference = self.stream.try_consume_kind(TokenKind::Reference);
        let is_variadic = self.stream.try_consume_kind(TokenKind::Variadic);
        let name = self.parse_required_variable_name()?;
        let description = self.parse_text();
        Ok(ParamTagValue {
            ty,
            is_reference,
            is_variadic,
            name,
            description,
            attributes: Attributes::new(),
        })
    }

    fn parse_var_tag_value(&mut self) -> Result<VarTagValue, ParseError> {
        let ty = self.parse_type()?;
        let variable = if self.stream.is_current(TokenKind::Variable) {
            Some(variable_name(&self.stream.consume(TokenKind::Variable)?))
        } else {
            None
        };
        let description = self.parse_text();
        Ok(VarTagValue {
            ty,
            variable,
            description,
            attributes: Attributes::new(),
        })
    }

    fn parse_type_tag_value(&mut self) -> Result<TypeTagValue, ParseError> {
        let ty = self.parse_type()?;
        let description = self.parse_text();
        Ok(TypeTagValue {
            ty,
            description,
            attributes: Attributes::new(),
        })
    }

    fn parse_property_tag_value(&mut self) -> Result<PropertyTagValue, ParseError> {
        let ty = self.parse_type()?;
        let name = self.parse_required_variable_name()?;
        let description = self.parse_text();
        Ok(PropertyTagValue {
            ty,
            name,
            description,
            attributes: Attributes::new(),
        })
    }

    /// `[static] [ReturnType] name(params) [description]`
    ///
    /// With one identifier before `(` it is the name; `static foo()` then
    /// reads as return type `static`.
    fn parse_method_tag_value(&mut self) -> Result<MethodTagValue, ParseError> {
        let static_start = self.mark();
        let static_type = if self.stream.is_current(TokenKind::Identifier)
            && self.stream.try_consume("static")
        {
            Some(self.finish_type(TypeKind::Identifier("static".to_owned()), static_start))
        } else {
            None
        };
        let type_or_name = self.parse_type()?;

        let (is_static, return_type, name) = if self.stream.is_current(TokenKind::Identifier) {
            let name = self.stream.consume(TokenKind::Identifier)?;
            (static_type.is_some(), Some(type_or_name), name)
        } else if let Some(name) = type_or_name.as_identifier() {
            (false, static_type, name.to_owned())
        } else {
            return Err(self.stream.unexpected(Expected::kind(TokenKind::Identifier)));
        };

        self.stream.consume(TokenKind::OpenParen)?;
        let mut parameters = Vec::new();
        if !self.stream.is_current(TokenKind::CloseParen) {
            parameters.push(self.parse_method_parameter()?);
            while self.stream.try_consume_kind(TokenKind::Comma) {
                parameters.push(self.parse_method_parameter()?);
            }
        }
        self.stream.consume(TokenKind::CloseParen)?;
        let description = self.parse_text();

        Ok(MethodTagValue {
            is_static,
            return_type,
            name,
            parameters,
            description,
            attributes: Attributes::new(),
        })
    }

    fn parse_method_parameter(&mut self) -> Result<MethodParameter, ParseError> {
        let start = self.mark();
        let untyped = self.stream.is_current(TokenKind::Reference)
            || self.stream.is_current(TokenKind::Variadic)
            || self.stream.is_current(TokenKind::Variable);
        let ty = if untyped {
            None
        } else {
            Some(self.parse_type()?)
        };
        let is_reference = self.stream.try_consume_kind(TokenKind::Reference);
        let is_variadic = self.stream.try_consume_kind(TokenKind::Variadic);
        let name = self.parse_required_variable_name()?;
        let default = if self.stream.try_consume_kind(TokenKind::Equal) {
            Some(self.parse_const_expr()?)
        } else {
            None
        };

        let mut parameter = MethodParameter {
            ty,
            is_reference,
            is_variadic,
            name,
            default,
            attributes: Attributes::new(),
        };
        self.enrich(&mut parameter, start);
        Ok(parameter)
    }

    fn parse_template_tag_value(&mut self) -> Result<TemplateTagValue, ParseError> {
        let name = self.stream.consume(TokenKind::Identifier)?;
        let bound = if self.stream.try_consume("of") || self.stream.try_consume("as") {
            Some(self.parse_type()?)
        } else {
            None
        };
        let default = if self.stream.try_consume_kind(TokenKind::Equal) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let description = self.parse_text();
        Ok(TemplateTagValue {
            name,
            bound,
            default,
            description,
            attributes: Attributes::new(),
        })
    }

    /// `@extends`, `@implements`, `@use`: a generic type is required.
    fn parse_inheritance_tag_value(&mut self) -> Result<InheritanceTagValue, ParseError> {
        let start = self.mark();
        let base_name = self.stream.consume(TokenKind::Identifier)?;
        let base = self.finish_type(TypeKind::Identifier(base_name), start);
        let ty = self.parse_generic(base, start)?;
        let description = self.parse_text();
        Ok(InheritanceTagValue {
            ty,
            description,
            attributes: Attributes::new(),
        })
    }

    fn parse_type_alias_tag_value(&mut self) -> Result<TypeAliasTagValue, ParseError> {
        let alias = self.stream.consume(TokenKind::Identifier)?;
        self.stream.try_consume_kind(TokenKind::Equal);
        let ty = self.parse_type()?;
        Ok(TypeAliasTagValue {
            alias,
            ty,
            attributes: Attributes::new(),
        })
    }

    fn parse_type_alias_import_tag_value(
        &mut self,
    ) -> Result<TypeAliasImportTagValue, ParseError> {
        let imported_alias = self.stream.consume(TokenKind::Identifier)?;
        self.stream.consume_value(TokenKind::Identifier, "from")?;

        let from_start = self.mark();
        let from_name = self.stream.consume(TokenKind::Identifier)?;
        let imported_from = self.finish_type(TypeKind::Identifier(from_name), from_start);

        let imported_as = if self.stream.is_current(TokenKind::Identifier)
            && self.stream.try_consume("as")
        {
            Some(self.stream.consume(TokenKind::Identifier)?)
        } else {
            None
        };

        Ok(TypeAliasImportTagValue {
            imported_alias,
            imported_from,
            imported_as,
            attributes: Attributes::new(),
        })
    }

    fn parse_required_variable_name(&mut self) -> Result<String, ParseError> {
        Ok(variable_name(&self.stream.consume(TokenKind::Variable)?))
    }
}
