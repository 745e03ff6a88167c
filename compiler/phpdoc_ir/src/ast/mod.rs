//! AST node model.
//!
//! Four families of nodes:
//! - document level: [`PhpDocNode`], [`PhpDocTextNode`], [`PhpDocTagNode`]
//! - tag values: [`PhpDocTagValue`] and its payload structs
//! - type expressions: [`TypeNode`]
//! - constant expressions: [`ConstExpr`]
//!
//! Every node implements [`Node`]: canonical printing through `Display`
//! plus the attribute side channel.

mod const_expr;
mod doc;
mod tag_value;
mod ty;

pub use const_expr::{ConstArrayItem, ConstExpr, ConstExprKind};
pub use doc::{PhpDocChild, PhpDocNode, PhpDocTagNode, PhpDocTextNode};
pub use tag_value::{
    InheritanceTagValue, InvalidTagValue, MethodParameter, MethodTagValue, ParamTagValue,
    PhpDocTagValue, PropertyTagValue, TemplateTagValue, TextTagValue, TypeAliasImportTagValue,
    TypeAliasTagValue, TypeTagValue, VarTagValue,
};
pub use ty::{
    ArrayShape, ArrayShapeItem, ArrayShapeKey, ArrayShapeKind, CallableParameter, CallableType,
    ConditionalSubject, ConditionalType, InvalidType, TypeKind, TypeNode,
};

use std::any::Any;
use std::fmt;

use crate::attributes::{AttributeValue, Attributes};

/// Capability shared by every node: canonical printing and attributes.
pub trait Node: fmt::Display {
    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    fn set_attribute<V: Any + Send + Sync>(&mut self, key: impl Into<String>, value: V)
    where
        Self: Sized,
    {
        self.attributes_mut().set(key, value);
    }

    fn has_attribute(&self, key: &str) -> bool {
        self.attributes().has(key)
    }

    /// The attached value, `None` when the key was never set.
    fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes().get(key)
    }

    /// Typed access to an attached value.
    fn attribute<V: Any>(&self, key: &str) -> Option<&V>
    where
        Self: Sized,
    {
        self.attributes().get_as(key)
    }
}

/// Implement [`Node`] for structs with an `attributes` field.
macro_rules! impl_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::ast::Node for $ty {
                #[inline]
                fn attributes(&self) -> &$crate::attributes::Attributes {
                    &self.attributes
                }

                #[inline]
                fn attributes_mut(&mut self) -> &mut $crate::attributes::Attributes {
                    &mut self.attributes
                }
            }
        )*
    };
}

pub(crate) use impl_node;

/// Write the non-empty parts separated by single spaces.
pub(crate) fn write_spaced(f: &mut fmt::Formatter<'_>, parts: &[&dyn fmt::Display]) -> fmt::Result {
    let mut first = true;
    for part in parts {
        let text = part.to_string();
        if text.is_empty() {
            continue;
        }
        if !first {
            f.write_str(" ")?;
        }
        f.write_str(&text)?;
        first = false;
    }
    Ok(())
}

/// Write `items` separated by `sep`.
pub(crate) fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
