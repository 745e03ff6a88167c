//! Type expression nodes.

use std::{fmt, mem};

use phpdoc_stack::ensure_sufficient_stack;

use super::{impl_node, write_joined, ConstExpr};
use crate::attributes::Attributes;

/// A type expression.
///
/// Nesting depth is bounded only by the source length, so printing,
/// comparing, cloning and dropping each step through the stack guard once
/// per level.
#[derive(Debug, Eq)]
pub struct TypeNode {
    pub kind: TypeKind,
    pub attributes: Attributes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeKind {
    /// `int`, `\Foo\Bar`, `non-empty-string`.
    Identifier(String),
    /// `$this`
    This,
    /// `?T`
    Nullable(Box<TypeNode>),
    /// `T[]`
    Array(Box<TypeNode>),
    /// `T<A, B>`; `base` is always an identifier.
    Generic {
        base: Box<TypeNode>,
        arguments: Vec<TypeNode>,
    },
    /// `A|B|C`, flat.
    Union(Vec<TypeNode>),
    /// `A&B&C`, flat.
    Intersection(Vec<TypeNode>),
    Callable(CallableType),
    ArrayShape(ArrayShape),
    Conditional(ConditionalType),
    /// A literal or constant fetch in type position: `1`, `'foo'`, `Foo::BAR`.
    Const(ConstExpr),
    Invalid(InvalidType),
}

impl TypeNode {
    pub fn new(kind: TypeKind) -> Self {
        TypeNode {
            kind,
            attributes: Attributes::new(),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        TypeNode::new(TypeKind::Identifier(name.into()))
    }

    pub fn nullable(inner: TypeNode) -> Self {
        TypeNode::new(TypeKind::Nullable(Box::new(inner)))
    }

    pub fn array(inner: TypeNode) -> Self {
        TypeNode::new(TypeKind::Array(Box::new(inner)))
    }

    pub fn generic(base: TypeNode, arguments: Vec<TypeNode>) -> Self {
        TypeNode::new(TypeKind::Generic {
            base: Box::new(base),
            arguments,
        })
    }

    pub fn union(types: Vec<TypeNode>) -> Self {
        TypeNode::new(TypeKind::Union(types))
    }

    pub fn intersection(types: Vec<TypeNode>) -> Self {
        TypeNode::new(TypeKind::Intersection(types))
    }

    /// The identifier name, if this is a plain identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Binding strength when printed, higher binds tighter.
    fn precedence(&self) -> u8 {
        match self.kind {
            TypeKind::Union(_) => 0,
            TypeKind::Intersection(_) => 1,
            // Both extend to the right: `?A` takes postfix, a callable takes its return type.
            TypeKind::Nullable(_) | TypeKind::Callable(_) => 2,
            _ => 3,
        }
    }
}

impl Clone for TypeNode {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| TypeNode {
            kind: self.kind.clone(),
            attributes: self.attributes.clone(),
        })
    }
}

impl PartialEq for TypeNode {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| self.kind == other.kind && self.attributes == other.attributes)
    }
}

impl Drop for TypeNode {
    fn drop(&mut self) {
        let kind = mem::replace(&mut self.kind, TypeKind::This);
        ensure_sufficient_stack(move || drop(kind));
    }
}

/// `callable(A, B $b=): R`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallableType {
    /// `callable`, `Closure`, `\Closure`, `pure-callable`, ...
    pub identifier: Box<TypeNode>,
    pub parameters: Vec<CallableParameter>,
    pub return_type: Box<TypeNode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallableParameter {
    pub ty: TypeNode,
    pub is_reference: bool,
    pub is_variadic: bool,
    /// Without the `$` sigil.
    pub name: Option<String>,
    pub is_optional: bool,
    pub attributes: Attributes,
}

impl CallableParameter {
    pub fn new(ty: TypeNode) -> Self {
        CallableParameter {
            ty,
            is_reference: false,
            is_variadic: false,
            name: None,
            is_optional: false,
            attributes: Attributes::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrayShapeKind {
    Array,
    List,
}

impl ArrayShapeKind {
    pub fn from_identifier(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("array") {
            Some(ArrayShapeKind::Array)
        } else if name.eq_ignore_ascii_case("list") {
            Some(ArrayShapeKind::List)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArrayShapeKind::Array => "array",
            ArrayShapeKind::List => "list",
        }
    }
}

/// `array{a: int, b?: string, ...}`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayShape {
    pub kind: ArrayShapeKind,
    pub items: Vec<ArrayShapeItem>,
    /// `false` when the shape ends with `...`.
    pub sealed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayShapeItem {
    pub key: Option<ArrayShapeKey>,
    pub optional: bool,
    pub value: TypeNode,
    pub attributes: Attributes,
}

impl ArrayShapeItem {
    pub fn new(key: Option<ArrayShapeKey>, optional: bool, value: TypeNode) -> Self {
        ArrayShapeItem {
            key,
            optional,
            value,
            attributes: Attributes::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayShapeKey {
    Identifier(String),
    /// Integer or quoted string literal.
    Const(ConstExpr),
}

/// `(T is U ? V : W)` or `($param is not U ? V : W)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionalType {
    pub subject: ConditionalSubject,
    pub negated: bool,
    pub target: Box<TypeNode>,
    pub if_type: Box<TypeNode>,
    pub else_type: Box<TypeNode>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConditionalSubject {
    Type(Box<TypeNode>),
    /// Parameter name without the `$` sigil.
    Parameter(String),
}

/// Raw text of a type that failed to parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidType {
    pub raw: String,
    pub message: String,
}

impl_node!(TypeNode, CallableParameter, ArrayShapeItem);

/// Write `node`, parenthesized when it binds looser than `min`.
fn write_operand(f: &mut fmt::Formatter<'_>, node: &TypeNode, min: u8) -> fmt::Result {
    if node.precedence() < min {
        write!(f, "({node})")
    } else {
        write!(f, "{node}")
    }
}

/// Write `operands` separated by `sep`, each parenthesized below `min`.
fn write_operands(
    f: &mut fmt::Formatter<'_>,
    operands: &[TypeNode],
    sep: &str,
    min: u8,
) -> fmt::Result {
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write_operand(f, operand, min)?;
    }
    Ok(())
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.write_kind(f))
    }
}

impl TypeNode {
    fn write_kind(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeKind::Identifier(name) => f.write_str(name),
            TypeKind::This => f.write_str("$this"),
            TypeKind::Nullable(inner) => {
                f.write_str("?")?;
                // `??A` does not parse; a nested nullable needs its own parentheses.
                let min = if matches!(inner.kind, TypeKind::Nullable(_)) { 3 } else { 2 };
                write_operand(f, inner, min)
            }
            TypeKind::Array(inner) => {
                write_operand(f, inner, 3)?;
                f.write_str("[]")
            }
            TypeKind::Generic { base, arguments } => {
                write!(f, "{base}<")?;
                write_joined(f, arguments, ", ")?;
                f.write_str(">")
            }
            TypeKind::Union(types) => write_operands(f, types, "|", 1),
            TypeKind::Intersection(types) => write_operands(f, types, "&", 2),
            TypeKind::Callable(callable) => write!(f, "{callable}"),
            TypeKind::ArrayShape(shape) => write!(f, "{shape}"),
            TypeKind::Conditional(conditional) => write!(f, "{conditional}"),
            TypeKind::Const(expr) => write!(f, "{expr}"),
            TypeKind::Invalid(invalid) => f.write_str(&invalid.raw),
        }
    }
}

impl fmt::Display for CallableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.identifier)?;
        write_joined(f, &self.parameters, ", ")?;
        f.write_str("): ")?;
        write_operand(f, &self.return_type, 2)
    }
}

impl fmt::Display for CallableParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        if self.is_reference || self.is_variadic || self.name.is_some() {
            f.write_str(" ")?;
            if self.is_reference {
                f.write_str("&")?;
            }
            if self.is_variadic {
                f.write_str("...")?;
            }
            if let Some(name) = &self.name {
                write!(f, "${name}")?;
            }
        }
        if self.is_optional {
            f.write_str("=")?;
        }
        Ok(())
    }
}

impl fmt::Display for ArrayShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{", self.kind.as_str())?;
        write_joined(f, &self.items, ", ")?;
        if !self.sealed {
            if !self.items.is_empty() {
                f.write_str(", ")?;
            }
            f.write_str("...")?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for ArrayShapeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(key) = &self.key {
            match key {
                ArrayShapeKey::Identifier(name) => f.write_str(name)?,
                ArrayShapeKey::Const(expr) => write!(f, "{expr}")?,
            }
            if self.optional {
                f.write_str("?")?;
            }
            f.write_str(": ")?;
        }
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for ConditionalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        match &self.subject {
            ConditionalSubject::Type(ty) => write!(f, "{ty}")?,
            ConditionalSubject::Parameter(name) => write!(f, "${name}")?,
        }
        f.write_str(if self.negated { " is not " } else { " is " })?;
        write!(
            f,
            "{} ? {} : {})",
            self.target, self.if_type, self.else_type
        )
    }
}
