//! Tag values: the structured payload after a tag name.
//!
//! [`PhpDocTagValue`] is closed. Tags the parser does not know land in
//! [`PhpDocTagValue::Generic`]; tags whose value failed to parse land in
//! [`PhpDocTagValue::Invalid`] with their raw text kept.

use std::fmt;

use super::{impl_node, write_joined, write_spaced, ConstExpr, Node, TypeNode};
use crate::attributes::Attributes;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhpDocTagValue {
    Var(VarTagValue),
    Param(ParamTagValue),
    Return(TypeTagValue),
    Throws(TypeTagValue),
    Mixin(TypeTagValue),
    Deprecated(TextTagValue),
    /// `@property`, `@property-read`, `@property-write`.
    Property(PropertyTagValue),
    Method(MethodTagValue),
    /// `@template`, `@template-covariant`, `@template-contravariant`.
    Template(TemplateTagValue),
    Extends(InheritanceTagValue),
    Implements(InheritanceTagValue),
    Uses(InheritanceTagValue),
    TypeAlias(TypeAliasTagValue),
    TypeAliasImport(TypeAliasImportTagValue),
    Generic(TextTagValue),
    Invalid(InvalidTagValue),
}

impl PhpDocTagValue {
    /// The type the value is about, when it has exactly one.
    pub fn ty(&self) -> Option<&TypeNode> {
        match self {
            PhpDocTagValue::Var(v) => Some(&v.ty),
            PhpDocTagValue::Param(v) => Some(&v.ty),
            PhpDocTagValue::Return(v) | PhpDocTagValue::Throws(v) | PhpDocTagValue::Mixin(v) => {
                Some(&v.ty)
            }
            PhpDocTagValue::Property(v) => Some(&v.ty),
            PhpDocTagValue::Extends(v) | PhpDocTagValue::Implements(v) | PhpDocTagValue::Uses(v) => {
                Some(&v.ty)
            }
            PhpDocTagValue::TypeAlias(v) => Some(&v.ty),
            PhpDocTagValue::Method(_)
            | PhpDocTagValue::Template(_)
            | PhpDocTagValue::TypeAliasImport(_)
            | PhpDocTagValue::Deprecated(_)
            | PhpDocTagValue::Generic(_)
            | PhpDocTagValue::Invalid(_) => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, PhpDocTagValue::Invalid(_))
    }

    fn inner(&self) -> &dyn Node {
        match self {
            PhpDocTagValue::Var(v) => v,
            PhpDocTagValue::Param(v) => v,
            PhpDocTagValue::Return(v) | PhpDocTagValue::Throws(v) | PhpDocTagValue::Mixin(v) => v,
            PhpDocTagValue::Deprecated(v) | PhpDocTagValue::Generic(v) => v,
            PhpDocTagValue::Property(v) => v,
            PhpDocTagValue::Method(v) => v,
            PhpDocTagValue::Template(v) => v,
            PhpDocTagValue::Extends(v) | PhpDocTagValue::Implements(v) | PhpDocTagValue::Uses(v) => {
                v
            }
            PhpDocTagValue::TypeAlias(v) => v,
            PhpDocTagValue::TypeAliasImport(v) => v,
            PhpDocTagValue::Invalid(v) => v,
        }
    }
}

impl Node for PhpDocTagValue {
    fn attributes(&self) -> &Attributes {
        self.inner().attributes()
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        match self {
            PhpDocTagValue::Var(v) => &mut v.attributes,
            PhpDocTagValue::Param(v) => &mut v.attributes,
            PhpDocTagValue::Return(v) | PhpDocTagValue::Throws(v) | PhpDocTagValue::Mixin(v) => {
                &mut v.attributes
            }
            PhpDocTagValue::Deprecated(v) | PhpDocTagValue::Generic(v) => &mut v.attributes,
            PhpDocTagValue::Property(v) => &mut v.attributes,
            PhpDocTagValue::Method(v) => &mut v.attributes,
            PhpDocTagValue::Template(v) => &mut v.attributes,
            PhpDocTagValue::Extends(v) | PhpDocTagValue::Implements(v) | PhpDocTagValue::Uses(v) => {
                &mut v.attributes
            }
            PhpDocTagValue::TypeAlias(v) => &mut v.attributes,
            PhpDocTagValue::TypeAliasImport(v) => &mut v.attributes,
            PhpDocTagValue::Invalid(v) => &mut v.attributes,
        }
    }
}

impl fmt::Display for PhpDocTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

/// Renders `$name`, or nothing for `None`.
struct Variable<'a>(Option<&'a str>);

impl fmt::Display for Variable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(name) => write!(f, "${name}"),
            None => Ok(()),
        }
    }
}

/// Renders the `&...$name` part of a parameter.
struct ParameterName<'a> {
    is_reference: bool,
    is_variadic: bool,
    name: &'a str,
}

impl fmt::Display for ParameterName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_reference {
            f.write_str("&")?;
        }
        if self.is_variadic {
            f.write_str("...")?;
        }
        write!(f, "${}", self.name)
    }
}

/// `@var Type [$name] [description]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarTagValue {
    pub ty: TypeNode,
    /// Without the `$` sigil.
    pub variable: Option<String>,
    pub description: String,
    pub attributes: Attributes,
}

/// `@param Type [&][...]$name [description]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamTagValue {
    pub ty: TypeNode,
    pub is_reference: bool,
    pub is_variadic: bool,
    /// Without the `$` sigil.
    pub name: String,
    pub description: String,
    pub attributes: Attributes,
}

/// `Type [description]`: `@return`, `@throws`, `@mixin`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeTagValue {
    pub ty: TypeNode,
    pub description: String,
    pub attributes: Attributes,
}

/// Free text: `@deprecated` and unknown tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextTagValue {
    pub text: String,
    pub attributes: Attributes,
}

/// `@property Type $name [description]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyTagValue {
    pub ty: TypeNode,
    pub name: String,
    pub description: String,
    pub attributes: Attributes,
}

/// `@method [static] [ReturnType] name(params) [description]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodTagValue {
    pub is_static: bool,
    pub return_type: Option<TypeNode>,
    pub name: String,
    pub parameters: Vec<MethodParameter>,
    pub description: String,
    pub attributes: Attributes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodParameter {
    pub ty: Option<TypeNode>,
    pub is_reference: bool,
    pub is_variadic: bool,
    pub name: String,
    pub default: Option<ConstExpr>,
    pub attributes: Attributes,
}

/// `@template T [of Bound] [= Default] [description]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateTagValue {
    pub name: String,
    pub bound: Option<TypeNode>,
    pub default: Option<TypeNode>,
    pub description: String,
    pub attributes: Attributes,
}

/// `Generic<Args> [description]`: `@extends`, `@implements`, `@use`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InheritanceTagValue {
    pub ty: TypeNode,
    pub description: String,
    pub attributes: Attributes,
}

/// `@phpstan-type Alias Type`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAliasTagValue {
    pub alias: String,
    pub ty: TypeNode,
    pub attributes: Attributes,
}

/// `@phpstan-import-type Alias from Class [as Local]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAliasImportTagValue {
    pub imported_alias: String,
    pub imported_from: TypeNode,
    pub imported_as: Option<String>,
    pub attributes: Attributes,
}

/// Raw text of a tag whose value failed to parse.
///
/// The parser also stores the full error under the `error` attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidTagValue {
    pub value: String,
    pub message: String,
    pub attributes: Attributes,
}

impl_node!(
    VarTagValue,
    ParamTagValue,
    TypeTagValue,
    TextTagValue,
    PropertyTagValue,
    MethodTagValue,
    MethodParameter,
    TemplateTagValue,
    InheritanceTagValue,
    TypeAliasTagValue,
    TypeAliasImportTagValue,
    InvalidTagValue,
);

impl fmt::Display for VarTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variable = Variable(self.variable.as_deref());
        write_spaced(f, &[&self.ty, &variable, &self.description])
    }
}

impl fmt::Display for ParamTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = ParameterName {
            is_reference: self.is_reference,
            is_variadic: self.is_variadic,
            name: &self.name,
        };
        write_spaced(f, &[&self.ty, &name, &self.description])
    }
}

impl fmt::Display for TypeTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_spaced(f, &[&self.ty, &self.description])
    }
}

impl fmt::Display for TextTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Display for PropertyTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = Variable(Some(&self.name));
        write_spaced(f, &[&self.ty, &name, &self.description])
    }
}

impl fmt::Display for MethodTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let is_static = if self.is_static { "static" } else { "" };
        let return_type = self
            .return_type
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let signature = MethodSignature(self);
        write_spaced(f, &[&is_static, &return_type, &signature, &self.description])
    }
}

struct MethodSignature<'a>(&'a MethodTagValue);

impl fmt::Display for MethodSignature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.0.name)?;
        write_joined(f, &self.0.parameters, ", ")?;
        f.write_str(")")
    }
}

impl fmt::Display for MethodParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ty = self.ty.as_ref().map(ToString::to_string).unwrap_or_default();
        let name = ParameterName {
            is_reference: self.is_reference,
            is_variadic: self.is_variadic,
            name: &self.name,
        };
        write_spaced(f, &[&ty, &name])?;
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TemplateTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound = self
            .bound
            .as_ref()
            .map(|b| format!("of {b}"))
            .unwrap_or_default();
        let default = self
            .default
            .as_ref()
            .map(|d| format!("= {d}"))
            .unwrap_or_default();
        write_spaced(f, &[&self.name, &bound, &default, &self.description])
    }
}

impl fmt::Display for InheritanceTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_spaced(f, &[&self.ty, &self.description])
    }
}

impl fmt::Display for TypeAliasTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.alias, self.ty)
    }
}

impl fmt::Display for TypeAliasImportTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {}", self.imported_alias, self.imported_from)?;
        if let Some(local) = &self.imported_as {
            write!(f, " as {local}")?;
        }
        Ok(())
    }
}

impl fmt::Display for InvalidTagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
