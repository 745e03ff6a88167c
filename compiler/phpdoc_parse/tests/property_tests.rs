//! Property-based tests for parsing and printing.
//!
//! Generated trees must survive printing: parsing the printed form gives
//! back an equal tree. Generated docblocks must print to a fixed point.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use phpdoc_ir::{
    ArrayShape, ArrayShapeItem, ArrayShapeKey, ArrayShapeKind, CallableParameter, CallableType,
    ConditionalSubject, ConditionalType, ConstExpr, TypeKind, TypeNode,
};
use phpdoc_parse::{parse_docblock_str, parse_type_str};
use proptest::prelude::*;

// -- Strategies --

/// Class-like names; the capital keeps them clear of `is`, `of`, `array`
/// and the other lowercase words the grammar reacts to.
fn type_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,6}"
}

/// Never `this`, which lexes differently.
fn variable_name() -> impl Strategy<Value = String> {
    "p[a-z0-9]{0,4}"
}

fn const_type(expr: ConstExpr) -> TypeNode {
    TypeNode::new(TypeKind::Const(expr))
}

fn leaf_type() -> impl Strategy<Value = TypeNode> {
    prop_oneof![
        6 => type_name().prop_map(TypeNode::identifier),
        1 => Just(TypeNode::new(TypeKind::This)),
        1 => (-50i32..1000).prop_map(|n| const_type(ConstExpr::integer(n.to_string()))),
        1 => "[a-z ]{0,5}".prop_map(|s| const_type(ConstExpr::string(format!("'{s}'")))),
        1 => type_name().prop_map(|class| const_type(ConstExpr::fetch(Some(&class), "BAR"))),
    ]
}

fn callable_parameter(
    ty: impl Strategy<Value = TypeNode>,
) -> impl Strategy<Value = CallableParameter> {
    (
        ty,
        any::<bool>(),
        any::<bool>(),
        prop::option::of(variable_name()),
        any::<bool>(),
    )
        .prop_map(|(ty, is_reference, is_variadic, name, is_optional)| {
            let mut parameter = CallableParameter::new(ty);
            parameter.is_reference = is_reference;
            parameter.is_variadic = is_variadic;
            parameter.name = name;
            parameter.is_optional = is_optional;
            parameter
        })
}

fn shape_item(ty: impl Strategy<Value = TypeNode>) -> impl Strategy<Value = ArrayShapeItem> {
    let key = prop_oneof![
        "[a-z]{1,5}".prop_map(ArrayShapeKey::Identifier),
        (0u32..100).prop_map(|n| ArrayShapeKey::Const(ConstExpr::integer(n.to_string()))),
    ];
    (prop::option::of(key), any::<bool>(), ty).prop_map(|(key, optional, value)| {
        let optional = optional && key.is_some();
        ArrayShapeItem::new(key, optional, value)
    })
}

fn type_node() -> impl Strategy<Value = TypeNode> {
    leaf_type().prop_recursive(4, 48, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(TypeNode::nullable),
            inner.clone().prop_map(TypeNode::array),
            prop::collection::vec(inner.clone(), 2..4).prop_map(TypeNode::union),
            prop::collection::vec(inner.clone(), 2..4).prop_map(TypeNode::intersection),
            (type_name(), prop::collection::vec(inner.clone(), 1..3)).prop_map(
                |(base, arguments)| TypeNode::generic(TypeNode::identifier(base), arguments)
            ),
            (
                prop::collection::vec(callable_parameter(inner.clone()), 0..3),
                inner.clone()
            )
                .prop_map(|(parameters, return_type)| {
                    TypeNode::new(TypeKind::Callable(CallableType {
                        identifier: Box::new(TypeNode::identifier("callable")),
                        parameters,
                        return_type: Box::new(return_type),
                    }))
                }),
            (
                any::<bool>(),
                prop::collection::vec(shape_item(inner.clone()), 0..3),
                any::<bool>()
            )
                .prop_map(|(is_list, items, sealed)| {
                    let kind = if is_list {
                        ArrayShapeKind::List
                    } else {
                        ArrayShapeKind::Array
                    };
                    TypeNode::new(TypeKind::ArrayShape(ArrayShape {
                        kind,
                        items,
                        sealed,
                    }))
                }),
            (
                prop_oneof![
                    inner.clone().prop_map(|t| ConditionalSubject::Type(Box::new(t))),
                    variable_name().prop_map(ConditionalSubject::Parameter),
                ],
                any::<bool>(),
                inner.clone(),
                inner.clone(),
                inner
            )
                .prop_map(|(subject, negated, target, if_type, else_type)| {
                    TypeNode::new(TypeKind::Conditional(ConditionalType {
                        subject,
                        negated,
                        target: Box::new(target),
                        if_type: Box::new(if_type),
                        else_type: Box::new(else_type),
                    }))
                }),
        ]
    })
}

/// One line of a docblock body, without the gutter. Empty means a blank
/// line.
fn doc_line() -> impl Strategy<Value = String> {
    let text = "[A-Z][a-z]{0,6}( [a-z,.]{1,6}){0,3}";
    prop_oneof![
        2 => text,
        1 => Just(String::new()),
        2 => (type_node(), variable_name(), prop::option::of(text))
            .prop_map(|(ty, name, description)| match description {
                Some(description) => format!("@param {ty} ${name} {description}"),
                None => format!("@param {ty} ${name}"),
            }),
        1 => type_node().prop_map(|ty| format!("@return {ty}")),
        1 => (type_node(), prop::option::of(variable_name()))
            .prop_map(|(ty, name)| match name {
                Some(name) => format!("@var {ty} ${name}"),
                None => format!("@var {ty}"),
            }),
        1 => (type_name(), prop::option::of(type_node()))
            .prop_map(|(name, bound)| match bound {
                Some(bound) => format!("@template {name} of {bound}"),
                None => format!("@template {name}"),
            }),
        // Unknown tags; the `x` prefix keeps clear of the known names.
        1 => "@x[a-z]{1,7}( [a-z]{1,6}){0,2}",
    ]
}

fn docblock() -> impl Strategy<Value = String> {
    prop::collection::vec(doc_line(), 1..8).prop_map(|lines| {
        let mut source = String::from("/**");
        for line in lines {
            source.push_str("\n *");
            if !line.is_empty() {
                source.push(' ');
                source.push_str(&line);
            }
        }
        source.push_str("\n */");
        source
    })
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_printed_types_parse_back_to_equal_trees(ty in type_node()) {
        let printed = ty.to_string();
        let reparsed = parse_type_str(&printed)
            .map_err(|e| TestCaseError::fail(format!("{printed:?}: {e}")))?;
        prop_assert_eq!(&reparsed, &ty, "printed as {:?}", printed);
    }

    #[test]
    fn prop_type_printing_is_idempotent(ty in type_node()) {
        let once = ty.to_string();
        let twice = parse_type_str(&once).unwrap().to_string();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_docblock_printing_reaches_a_fixed_point(source in docblock()) {
        let doc = parse_docblock_str(&source)
            .map_err(|e| TestCaseError::fail(format!("{source:?}: {e}")))?;
        let printed = doc.to_string();
        let reparsed = parse_docblock_str(&printed).unwrap();
        prop_assert_eq!(&reparsed, &doc);
        prop_assert_eq!(reparsed.to_string(), printed);
    }

    #[test]
    fn prop_generated_tags_never_degrade(source in docblock()) {
        let doc = parse_docblock_str(&source).unwrap();
        for tag in doc.tags() {
            prop_assert!(!tag.value.is_invalid(), "{} degraded in {:?}", tag.name, source);
        }
    }

    #[test]
    fn prop_arbitrary_text_never_panics(body in "[ -~\n]{0,64}") {
        let source = format!("/** {body} */");
        let _ = parse_docblock_str(&source);
        let _ = parse_type_str(&body);
        let _ = phpdoc_parse::parse_type_lenient(phpdoc_lexer::tokenize(&body));
    }
}
