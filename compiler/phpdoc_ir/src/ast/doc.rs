//! Document-level nodes.

use std::fmt;

use super::{
    impl_node, MethodTagValue, Node, ParamTagValue, PhpDocTagValue, PropertyTagValue,
    TemplateTagValue, TypeTagValue, VarTagValue,
};
use crate::attributes::Attributes;

/// The root of a parsed `/** ... */` comment.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PhpDocNode {
    pub children: Vec<PhpDocChild>,
    pub attributes: Attributes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhpDocChild {
    Text(PhpDocTextNode),
    Tag(PhpDocTagNode),
}

/// A run of free text. Empty text stands for a blank separator line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhpDocTextNode {
    pub text: String,
    pub attributes: Attributes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhpDocTagNode {
    /// Includes the leading `@`.
    pub name: String,
    pub value: PhpDocTagValue,
    pub attributes: Attributes,
}

impl PhpDocNode {
    pub fn new(children: Vec<PhpDocChild>) -> Self {
        PhpDocNode {
            children,
            attributes: Attributes::new(),
        }
    }

    pub fn tags(&self) -> impl Iterator<Item = &PhpDocTagNode> {
        self.children.iter().filter_map(|child| match child {
            PhpDocChild::Tag(tag) => Some(tag),
            PhpDocChild::Text(_) => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &PhpDocTextNode> {
        self.children.iter().filter_map(|child| match child {
            PhpDocChild::Text(text) => Some(text),
            PhpDocChild::Tag(_) => None,
        })
    }

    /// Tags whose name matches exactly, `@` included.
    pub fn tags_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PhpDocTagNode> {
        self.tags().filter(move |tag| tag.name == name)
    }

    pub fn tag_values_by_name<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a PhpDocTagValue> {
        self.tags_by_name(name).map(|tag| &tag.value)
    }

    /// `@var` values, any vendor prefix.
    pub fn var_tag_values(&self) -> impl Iterator<Item = &VarTagValue> {
        self.tags().filter_map(|tag| match &tag.value {
            PhpDocTagValue::Var(v) => Some(v),
            _ => None,
        })
    }

    pub fn param_tag_values(&self) -> impl Iterator<Item = &ParamTagValue> {
        self.tags().filter_map(|tag| match &tag.value {
            PhpDocTagValue::Param(v) => Some(v),
            _ => None,
        })
    }

    /// The first `@return` value, if any.
    pub fn return_tag_value(&self) -> Option<&TypeTagValue> {
        self.tags().find_map(|tag| match &tag.value {
            PhpDocTagValue::Return(v) => Some(v),
            _ => None,
        })
    }

    pub fn throws_tag_values(&self) -> impl Iterator<Item = &TypeTagValue> {
        self.tags().filter_map(|tag| match &tag.value {
            PhpDocTagValue::Throws(v) => Some(v),
            _ => None,
        })
    }

    pub fn template_tag_values(&self) -> impl Iterator<Item = &TemplateTagValue> {
        self.tags().filter_map(|tag| match &tag.value {
            PhpDocTagValue::Template(v) => Some(v),
            _ => None,
        })
    }

    pub fn property_tag_values(&self) -> impl Iterator<Item = &PropertyTagValue> {
        self.tags().filter_map(|tag| match &tag.value {
            PhpDocTagValue::Property(v) => Some(v),
            _ => None,
        })
    }

    pub fn method_tag_values(&self) -> impl Iterator<Item = &MethodTagValue> {
        self.tags().filter_map(|tag| match &tag.value {
            PhpDocTagValue::Method(v) => Some(v),
            _ => None,
        })
    }
}

impl PhpDocTextNode {
    pub fn new(text: impl Into<String>) -> Self {
        PhpDocTextNode {
            text: text.into(),
            attributes: Attributes::new(),
        }
    }
}

impl PhpDocTagNode {
    pub fn new(name: impl Into<String>, value: PhpDocTagValue) -> Self {
        PhpDocTagNode {
            name: name.into(),
            value,
            attributes: Attributes::new(),
        }
    }
}

impl_node!(PhpDocNode, PhpDocTextNode, PhpDocTagNode);

impl Node for PhpDocChild {
    fn attributes(&self) -> &Attributes {
        match self {
            PhpDocChild::Text(text) => &text.attributes,
            PhpDocChild::Tag(tag) => &tag.attributes,
        }
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        match self {
            PhpDocChild::Text(text) => &mut text.attributes,
            PhpDocChild::Tag(tag) => &mut tag.attributes,
        }
    }
}

impl fmt::Display for PhpDocNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/**\n *")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str("\n *")?;
            }
            let text = child.to_string();
            if !text.is_empty() {
                write!(f, " {}", text.replace('\n', "\n * "))?;
            }
        }
        f.write_str("\n */")
    }
}

impl fmt::Display for PhpDocChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhpDocChild::Text(text) => write!(f, "{text}"),
            PhpDocChild::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

impl fmt::Display for PhpDocTextNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Display for PhpDocTagNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.value.to_string();
        if value.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{} {value}", self.name)
        }
    }
}
