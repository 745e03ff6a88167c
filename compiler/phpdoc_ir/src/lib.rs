//! PHPDoc IR - tokens and the AST node model.
//!
//! This crate holds the data shared by the lexer and the parser:
//! - Tokens, `TokenList` and `TokenSet` for lexer output
//! - The attribute side channel every node carries
//! - Doc, tag, tag-value, type and constant-expression nodes
//!
//! # Design Philosophy
//!
//! - **Values, not handles**: nodes own their children; no parent links.
//! - **Verbatim literals**: numbers, strings and descriptions keep their source text.
//! - **Printing is canonical**: `Display` output reparses to an equal tree.

pub mod ast;
pub mod attributes;
mod token;

pub use ast::{
    ArrayShape, ArrayShapeItem, ArrayShapeKey, ArrayShapeKind, CallableParameter, CallableType,
    ConditionalSubject, ConditionalType, ConstArrayItem, ConstExpr, ConstExprKind,
    InheritanceTagValue, InvalidTagValue, InvalidType, MethodParameter, MethodTagValue, Node,
    ParamTagValue, PhpDocChild, PhpDocNode, PhpDocTagNode, PhpDocTagValue, PhpDocTextNode,
    PropertyTagValue, TemplateTagValue, TextTagValue, TypeAliasImportTagValue, TypeAliasTagValue,
    TypeKind, TypeNode, TypeTagValue, VarTagValue,
};
pub use attributes::{AttributeValue, Attributes};
pub use token::{Token, TokenKind, TokenList, TokenSet};
