//! Constant expressions: literals, arrays and constant fetches.
//!
//! Numbers, strings and keywords keep their source lexeme, so `0x1F`,
//! `1_000`, `"a\n"` and `TRUE` print exactly as written.

use std::{fmt, mem};

use phpdoc_stack::ensure_sufficient_stack;

use super::{impl_node, write_joined};
use crate::attributes::Attributes;

#[derive(Debug, Eq)]
pub struct ConstExpr {
    pub kind: ConstExprKind,
    pub attributes: Attributes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstExprKind {
    Integer(String),
    Float(String),
    /// Quoted source text, quotes included.
    String(String),
    /// The keyword as written: `true`, `TRUE`, `True`.
    True(String),
    False(String),
    Null(String),
    Array {
        items: Vec<ConstArrayItem>,
        /// `array(...)` rather than `[...]`.
        long_syntax: bool,
    },
    /// `Foo::BAR`, `Foo::BAR_*`, `Foo::*` or a global `BAR`.
    Fetch {
        class_name: Option<String>,
        name: String,
    },
    UnaryMinus(Box<ConstExpr>),
}

impl ConstExpr {
    pub fn new(kind: ConstExprKind) -> Self {
        ConstExpr {
            kind,
            attributes: Attributes::new(),
        }
    }

    pub fn integer(lexeme: impl Into<String>) -> Self {
        ConstExpr::new(ConstExprKind::Integer(lexeme.into()))
    }

    pub fn float(lexeme: impl Into<String>) -> Self {
        ConstExpr::new(ConstExprKind::Float(lexeme.into()))
    }

    pub fn string(quoted: impl Into<String>) -> Self {
        ConstExpr::new(ConstExprKind::String(quoted.into()))
    }

    pub fn fetch(class_name: Option<&str>, name: impl Into<String>) -> Self {
        ConstExpr::new(ConstExprKind::Fetch {
            class_name: class_name.map(str::to_owned),
            name: name.into(),
        })
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, ConstExprKind::Array { .. })
    }

    fn is_number(&self) -> bool {
        matches!(self.kind, ConstExprKind::Integer(_) | ConstExprKind::Float(_))
    }
}

impl Clone for ConstExpr {
    fn clone(&self) -> Self {
        ensure_sufficient_stack(|| ConstExpr {
            kind: self.kind.clone(),
            attributes: self.attributes.clone(),
        })
    }
}

impl PartialEq for ConstExpr {
    fn eq(&self, other: &Self) -> bool {
        ensure_sufficient_stack(|| self.kind == other.kind && self.attributes == other.attributes)
    }
}

impl Drop for ConstExpr {
    fn drop(&mut self) {
        let kind = mem::replace(&mut self.kind, ConstExprKind::Integer(String::new()));
        ensure_sufficient_stack(move || drop(kind));
    }
}

/// An array entry: `value` or `key => value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstArrayItem {
    pub key: Option<ConstExpr>,
    pub value: ConstExpr,
    pub attributes: Attributes,
}

impl ConstArrayItem {
    pub fn new(key: Option<ConstExpr>, value: ConstExpr) -> Self {
        ConstArrayItem {
            key,
            value,
            attributes: Attributes::new(),
        }
    }
}

impl_node!(ConstExpr, ConstArrayItem);

impl fmt::Display for ConstExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.write_kind(f))
    }
}

impl ConstExpr {
    fn write_kind(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConstExprKind::Integer(s)
            | ConstExprKind::Float(s)
            | ConstExprKind::String(s)
            | ConstExprKind::True(s)
            | ConstExprKind::False(s)
            | ConstExprKind::Null(s) => f.write_str(s),
            ConstExprKind::Array { items, long_syntax } => {
                let (open, close) = if *long_syntax { ("array(", ")") } else { ("[", "]") };
                f.write_str(open)?;
                write_joined(f, items, ", ")?;
                f.write_str(close)
            }
            ConstExprKind::Fetch { class_name, name } => match class_name {
                Some(class_name) => write!(f, "{class_name}::{name}"),
                None => f.write_str(name),
            },
            // `-1` would lex back as a single negative literal.
            ConstExprKind::UnaryMinus(inner) if inner.is_number() => write!(f, "- {inner}"),
            ConstExprKind::UnaryMinus(inner) => write!(f, "-{inner}"),
        }
    }
}

impl fmt::Display for ConstArrayItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(key) = &self.key {
            write!(f, "{key} => ")?;
        }
        write!(f, "{}", self.value)
    }
}
