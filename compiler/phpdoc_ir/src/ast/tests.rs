use super::*;

use pretty_assertions::assert_eq;

fn ident(name: &str) -> TypeNode {
    TypeNode::identifier(name)
}

fn text(s: &str) -> PhpDocChild {
    PhpDocChild::Text(PhpDocTextNode::new(s))
}

fn var_tag(ty: TypeNode) -> PhpDocChild {
    PhpDocChild::Tag(PhpDocTagNode::new(
        "@var",
        PhpDocTagValue::Var(VarTagValue {
            ty,
            variable: None,
            description: String::new(),
            attributes: Attributes::new(),
        }),
    ))
}

#[test]
fn test_print_single_text() {
    let doc = PhpDocNode::new(vec![text("It works")]);
    assert_eq!(doc.to_string(), "/**\n * It works\n */");
}

#[test]
fn test_print_blank_separator_line() {
    let doc = PhpDocNode::new(vec![text("It works"), text(""), text("with empty lines")]);
    assert_eq!(
        doc.to_string(),
        "/**\n * It works\n *\n * with empty lines\n */"
    );
}

#[test]
fn test_print_multiline_text_gets_gutter() {
    let doc = PhpDocNode::new(vec![text("first\nsecond")]);
    assert_eq!(doc.to_string(), "/**\n * first\n * second\n */");
}

#[test]
fn test_print_empty_doc() {
    assert_eq!(PhpDocNode::default().to_string(), "/**\n *\n */");
}

#[test]
fn test_print_var_tag() {
    let doc = PhpDocNode::new(vec![var_tag(ident("string"))]);
    assert_eq!(doc.to_string(), "/**\n * @var string\n */");
}

#[test]
fn test_print_bare_generic_tag() {
    let tag = PhpDocTagNode::new(
        "@internal",
        PhpDocTagValue::Generic(TextTagValue {
            text: String::new(),
            attributes: Attributes::new(),
        }),
    );
    assert_eq!(tag.to_string(), "@internal");
}

#[test]
fn test_print_param_markers() {
    let value = ParamTagValue {
        ty: ident("int"),
        is_reference: true,
        is_variadic: true,
        name: "rest".to_owned(),
        description: "the rest".to_owned(),
        attributes: Attributes::new(),
    };
    assert_eq!(value.to_string(), "int &...$rest the rest");
}

#[test]
fn test_print_union_and_intersection() {
    let ty = TypeNode::union(vec![
        ident("A"),
        TypeNode::intersection(vec![ident("B"), ident("C")]),
    ]);
    assert_eq!(ty.to_string(), "A|B&C");

    let ty = TypeNode::intersection(vec![
        ident("A"),
        TypeNode::union(vec![ident("B"), ident("C")]),
    ]);
    assert_eq!(ty.to_string(), "A&(B|C)");
}

#[test]
fn test_print_nested_union_keeps_parentheses() {
    let ty = TypeNode::union(vec![
        TypeNode::union(vec![ident("A"), ident("B")]),
        ident("C"),
    ]);
    assert_eq!(ty.to_string(), "(A|B)|C");
}

#[test]
fn test_print_array_and_nullable() {
    assert_eq!(TypeNode::nullable(TypeNode::array(ident("A"))).to_string(), "?A[]");
    assert_eq!(TypeNode::array(TypeNode::nullable(ident("A"))).to_string(), "(?A)[]");
    assert_eq!(
        TypeNode::array(TypeNode::union(vec![ident("A"), ident("B")])).to_string(),
        "(A|B)[]"
    );
    assert_eq!(
        TypeNode::nullable(TypeNode::nullable(ident("A"))).to_string(),
        "?(?A)"
    );
}

#[test]
fn test_print_generic() {
    let ty = TypeNode::generic(ident("array"), vec![ident("int"), ident("string")]);
    assert_eq!(ty.to_string(), "array<int, string>");
}

#[test]
fn test_print_callable() {
    let mut rest = CallableParameter::new(ident("int"));
    rest.is_variadic = true;
    rest.name = Some("rest".to_owned());
    let mut optional = CallableParameter::new(ident("bool"));
    optional.is_optional = true;

    let callable = TypeNode::new(TypeKind::Callable(CallableType {
        identifier: Box::new(ident("callable")),
        parameters: vec![CallableParameter::new(ident("string")), optional, rest],
        return_type: Box::new(TypeNode::union(vec![ident("int"), ident("null")])),
    }));
    assert_eq!(
        callable.to_string(),
        "callable(string, bool=, int ...$rest): (int|null)"
    );
    assert_eq!(TypeNode::array(callable).to_string(), "(callable(string, bool=, int ...$rest): (int|null))[]");
}

#[test]
fn test_print_array_shape() {
    let shape = ArrayShape {
        kind: ArrayShapeKind::Array,
        items: vec![
            ArrayShapeItem::new(Some(ArrayShapeKey::Identifier("a".to_owned())), false, ident("int")),
            ArrayShapeItem::new(
                Some(ArrayShapeKey::Const(ConstExpr::string("'b c'"))),
                true,
                ident("string"),
            ),
            ArrayShapeItem::new(None, false, ident("bool")),
        ],
        sealed: false,
    };
    assert_eq!(
        TypeNode::new(TypeKind::ArrayShape(shape)).to_string(),
        "array{a: int, 'b c'?: string, bool, ...}"
    );

    let empty = ArrayShape {
        kind: ArrayShapeKind::List,
        items: Vec::new(),
        sealed: true,
    };
    assert_eq!(TypeNode::new(TypeKind::ArrayShape(empty)).to_string(), "list{}");
}

#[test]
fn test_print_conditional() {
    let conditional = ConditionalType {
        subject: ConditionalSubject::Parameter("x".to_owned()),
        negated: true,
        target: Box::new(ident("int")),
        if_type: Box::new(ident("string")),
        else_type: Box::new(ident("bool")),
    };
    assert_eq!(
        TypeNode::new(TypeKind::Conditional(conditional)).to_string(),
        "($x is not int ? string : bool)"
    );
}

#[test]
fn test_print_const_exprs() {
    let array = ConstExpr::new(ConstExprKind::Array {
        items: vec![
            ConstArrayItem::new(None, ConstExpr::integer("0x1F")),
            ConstArrayItem::new(
                Some(ConstExpr::string("'k'")),
                ConstExpr::new(ConstExprKind::Null("null".into())),
            ),
        ],
        long_syntax: true,
    });
    assert_eq!(array.to_string(), "array(0x1F, 'k' => null)");

    let minus = ConstExpr::new(ConstExprKind::UnaryMinus(Box::new(ConstExpr::fetch(
        Some("Foo"),
        "BAR",
    ))));
    assert_eq!(minus.to_string(), "-Foo::BAR");
    assert_eq!(ConstExpr::fetch(None, "PHP_EOL").to_string(), "PHP_EOL");

    let spaced = ConstExpr::new(ConstExprKind::UnaryMinus(Box::new(ConstExpr::integer("1"))));
    assert_eq!(spaced.to_string(), "- 1");
}

#[test]
fn test_deep_trees_print_compare_and_drop() {
    let depth = 5000;
    let mut ty = ident("int");
    for _ in 0..depth {
        ty = TypeNode::generic(ident("array"), vec![ty]);
    }
    let printed = ty.to_string();
    assert_eq!(printed.len(), "array<".len() * depth + "int".len() + depth);
    assert!(printed.starts_with("array<array<"));
    assert_eq!(ty.clone(), ty);

    let mut nullable = ident("int");
    for _ in 0..50_000 {
        nullable = TypeNode::nullable(nullable);
    }
    drop(nullable);
}

#[test]
fn test_print_method_tag() {
    let value = MethodTagValue {
        is_static: true,
        return_type: Some(ident("void")),
        name: "run".to_owned(),
        parameters: vec![MethodParameter {
            ty: Some(ident("int")),
            is_reference: false,
            is_variadic: false,
            name: "times".to_owned(),
            default: Some(ConstExpr::integer("1")),
            attributes: Attributes::new(),
        }],
        description: "Runs.".to_owned(),
        attributes: Attributes::new(),
    };
    assert_eq!(value.to_string(), "static void run(int $times = 1) Runs.");
}

#[test]
fn test_print_template_and_import() {
    let template = TemplateTagValue {
        name: "T".to_owned(),
        bound: Some(ident("object")),
        default: Some(ident("stdClass")),
        description: String::new(),
        attributes: Attributes::new(),
    };
    assert_eq!(template.to_string(), "T of object = stdClass");

    let import = TypeAliasImportTagValue {
        imported_alias: "Foo".to_owned(),
        imported_from: ident("\\Bar"),
        imported_as: Some("Baz".to_owned()),
        attributes: Attributes::new(),
    };
    assert_eq!(import.to_string(), "Foo from \\Bar as Baz");
}

#[test]
fn test_attributes_do_not_change_equality_or_printing() {
    let plain = ident("int");
    let mut annotated = ident("int");
    annotated.set_attribute("key", "value");

    assert_eq!(plain, annotated);
    assert_eq!(plain.to_string(), annotated.to_string());
    assert!(annotated.has_attribute("key"));
    assert_eq!(annotated.attribute::<&str>("key"), Some(&"value"));
    assert!(!plain.has_attribute("key"));
}

#[test]
fn test_sibling_attributes_are_isolated() {
    let mut doc = PhpDocNode::new(vec![var_tag(ident("int")), var_tag(ident("int"))]);
    doc.children[0].set_attribute("seen", true);

    assert!(doc.children[0].has_attribute("seen"));
    assert!(!doc.children[1].has_attribute("seen"));
    assert!(doc.children[1].get_attribute("seen").is_none());
}

#[test]
fn test_tag_value_attributes_reach_payload() {
    let mut value = PhpDocTagValue::Generic(TextTagValue {
        text: "x".to_owned(),
        attributes: Attributes::new(),
    });
    value.set_attribute("k", 1_u8);

    let PhpDocTagValue::Generic(inner) = &value else {
        panic!("expected generic tag value");
    };
    assert!(inner.has_attribute("k"));
}

#[test]
fn test_query_helpers() {
    let doc = PhpDocNode::new(vec![
        text("Summary"),
        var_tag(ident("int")),
        PhpDocChild::Tag(PhpDocTagNode::new(
            "@return",
            PhpDocTagValue::Return(TypeTagValue {
                ty: ident("void"),
                description: String::new(),
                attributes: Attributes::new(),
            }),
        )),
    ]);

    assert_eq!(doc.tags().count(), 2);
    assert_eq!(doc.texts().count(), 1);
    assert_eq!(doc.tags_by_name("@var").count(), 1);
    assert_eq!(doc.var_tag_values().count(), 1);
    assert_eq!(
        doc.return_tag_value().map(|v| v.ty.to_string()),
        Some("void".to_owned())
    );
    assert!(doc.param_tag_values().next().is_none());
}
