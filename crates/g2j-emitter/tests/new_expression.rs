use super::*;
use crate::options::VarNaming;
use crate::{
    EmitterOptions, ExpressionContext, LoweredExpression, lower_expression, lower_with_context,
};
use g2j_ast::{Expr, ExprArena};
use g2j_common::PrimitiveType;
use g2j_resolver::{MethodInfo, ParamInfo, Resolved, Resolver, TableResolver};

fn lower_with(
    arena: &ExprArena,
    resolver: &dyn Resolver,
    root: ExprId,
    options: &EmitterOptions,
) -> LoweredExpression {
    lower_expression(arena, resolver, root, options).expect("new expression should lower")
}

fn lower(arena: &ExprArena, resolver: &dyn Resolver, root: ExprId) -> LoweredExpression {
    lower_with(arena, resolver, root, &EmitterOptions::default())
}

/// `new Point(x: 1, y: 2)`
fn new_point(arena: &mut ExprArena) -> ExprId {
    let one = arena.int(1);
    let two = arena.int(2);
    let args = ArgumentList::default().with_named(vec![
        NamedArgument::named("x", one),
        NamedArgument::named("y", two),
    ]);
    arena.new_object(JavaType::class("Point"), args)
}

// =============================================================================
// Field-init lowering
// =============================================================================

#[test]
fn test_named_arguments_without_map_constructor_hoist_field_init() {
    let mut arena = ExprArena::new();
    let root = new_point(&mut arena);
    let lowered = lower(&arena, &TableResolver::new(), root);
    assert_eq!(lowered.text, "point");
    assert_eq!(
        lowered.hoisted,
        ["Point point = new Point();", "point.x = 1;", "point.y = 2;"]
    );
}

#[test]
fn test_temporary_does_not_shadow_a_referenced_local() {
    let mut arena = ExprArena::new();
    let point = arena.reference("point");
    let args = ArgumentList::default().with_named(vec![NamedArgument::named("x", point)]);
    let root = arena.new_object(JavaType::class("Point"), args);
    let lowered = lower(&arena, &TableResolver::new(), root);
    assert_eq!(lowered.text, "point1");
    assert_eq!(lowered.hoisted, ["Point point1 = new Point();", "point1.x = point;"]);
}

#[test]
fn test_initial_naming() {
    let mut arena = ExprArena::new();
    let root = new_point(&mut arena);
    let options = EmitterOptions {
        var_naming: VarNaming::Initial,
        ..EmitterOptions::default()
    };
    let lowered = lower_with(&arena, &TableResolver::new(), root, &options);
    assert_eq!(lowered.text, "p");
    assert_eq!(lowered.hoisted, ["Point p = new Point();", "p.x = 1;", "p.y = 2;"]);
}

#[test]
fn test_setters_are_preferred_over_fields() {
    let mut arena = ExprArena::new();
    let root = new_point(&mut arena);
    let resolver = TableResolver::new().with_setter(
        "Point",
        "y",
        MethodRef::new(MethodInfo::new("setY").in_class("Point")),
    );
    let lowered = lower(&arena, &resolver, root);
    assert_eq!(
        lowered.hoisted,
        ["Point point = new Point();", "point.x = 1;", "point.setY(2);"]
    );
}

#[test]
fn test_positional_arguments_stay_on_constructor() {
    let mut arena = ExprArena::new();
    let one = arena.int(1);
    let two = arena.int(2);
    let args = ArgumentList::positional(vec![one]).with_named(vec![NamedArgument::named("y", two)]);
    let root = arena.new_object(JavaType::class("Point"), args);
    let lowered = lower(&arena, &TableResolver::new(), root);
    assert_eq!(lowered.hoisted, ["Point point = new Point(1);", "point.y = 2;"]);
}

#[test]
fn test_reserved_name_gets_suffix() {
    let mut arena = ExprArena::new();
    let root = new_point(&mut arena);
    let mut ctx = ExpressionContext::default().with_reserved_names(["point"]);
    let lowered = lower_with_context(&arena, &TableResolver::new(), root, &mut ctx).unwrap();
    assert_eq!(lowered.text, "point1");
    assert_eq!(lowered.hoisted[0], "Point point1 = new Point();");
}

#[test]
fn test_nested_field_init_keeps_discovery_order() {
    let mut arena = ExprArena::new();
    let point = new_point(&mut arena);
    let args = ArgumentList::default().with_named(vec![NamedArgument::named("start", point)]);
    let root = arena.new_object(JavaType::class("Line"), args);
    let lowered = lower(&arena, &TableResolver::new(), root);
    assert_eq!(lowered.text, "line");
    assert_eq!(
        lowered.hoisted,
        [
            "Line line = new Line();",
            "Point point = new Point();",
            "point.x = 1;",
            "point.y = 2;",
            "line.start = point;",
        ]
    );
}

#[test]
fn test_diamond_declaration() {
    let mut arena = ExprArena::new();
    let label = arena.string("a");
    let args = ArgumentList::default().with_named(vec![NamedArgument::named("label", label)]);
    let root = arena.new_object(JavaType::generic("Box", vec![JavaType::string()]), args);
    let options = EmitterOptions {
        diamond: true,
        ..EmitterOptions::default()
    };
    let lowered = lower_with(&arena, &TableResolver::new(), root, &options);
    assert_eq!(
        lowered.hoisted,
        ["Box<java.lang.String> box = new Box<>();", "box.label = \"a\";"]
    );
}

#[test]
fn test_computed_field_name_is_unsupported() {
    let mut arena = ExprArena::new();
    let key = arena.reference("key");
    let one = arena.int(1);
    let args = ArgumentList::default().with_named(vec![NamedArgument::keyed(key, one)]);
    let root = arena.new_object(JavaType::class("Point"), args);
    let err = lower_expression(&arena, &TableResolver::new(), root, &EmitterOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        LowerError::Unsupported { construct: "computed field name", expr, .. } if expr == key
    ));
}

// =============================================================================
// Plain constructor calls
// =============================================================================

#[test]
fn test_constructor_without_named_arguments_hoists_nothing() {
    let mut arena = ExprArena::new();
    let one = arena.int(1);
    let two = arena.int(2);
    let root = arena.new_object(JavaType::class("Point"), ArgumentList::positional(vec![one, two]));
    let lowered = lower(&arena, &TableResolver::new(), root);
    assert_eq!(lowered.text, "new Point(1, 2)");
    assert!(lowered.hoisted.is_empty());

    let mut arena = ExprArena::new();
    let root = arena.alloc(Expr::New {
        qualifier: None,
        ty: JavaType::class("java.lang.Object"),
        args: None,
        array_dims: None,
        anonymous_body: false,
    });
    assert_eq!(lower(&arena, &TableResolver::new(), root).text, "new java.lang.Object()");
}

#[test]
fn test_map_constructor_receives_named_arguments() {
    let mut arena = ExprArena::new();
    let root = new_point(&mut arena);
    let ctor = MethodInfo::constructor(
        "Point",
        vec![ParamInfo::new("attributes", JavaType::class("java.util.Map"))],
    );
    let resolver =
        TableResolver::new().with_resolution(root, Resolved::Method(MethodRef::new(ctor)));
    let lowered = lower(&arena, &resolver, root);
    assert_eq!(lowered.text, "new Point(linkedHashMap)");
    assert_eq!(lowered.hoisted.len(), 3);
    assert_eq!(lowered.hoisted[1], "linkedHashMap.put(\"x\", 1);");
}

#[test]
fn test_varargs_constructor() {
    let mut arena = ExprArena::new();
    let one = arena.int(1);
    let two = arena.int(2);
    let root = arena.new_object(JavaType::class("Bag"), ArgumentList::positional(vec![one, two]));
    let ctor =
        MethodInfo::constructor("Bag", vec![ParamInfo::varargs("items", JavaType::object())]);
    let resolver =
        TableResolver::new().with_resolution(root, Resolved::Method(MethodRef::new(ctor)));
    assert_eq!(
        lower(&arena, &resolver, root).text,
        "new Bag(new java.lang.Object[]{1, 2})"
    );
}

#[test]
fn test_primitive_type_is_boxed() {
    let mut arena = ExprArena::new();
    let five = arena.int(5);
    let root = arena.new_object(
        JavaType::primitive(PrimitiveType::Int),
        ArgumentList::positional(vec![five]),
    );
    assert_eq!(lower(&arena, &TableResolver::new(), root).text, "new java.lang.Integer(5)");
}

#[test]
fn test_inner_class_creation_through_outer_instance() {
    let mut arena = ExprArena::new();
    let outer = arena.reference("outer");
    let root = arena.alloc(Expr::New {
        qualifier: Some(outer),
        ty: JavaType::class("com.example.Outer$Inner"),
        args: Some(ArgumentList::default()),
        array_dims: None,
        anonymous_body: false,
    });
    assert_eq!(lower(&arena, &TableResolver::new(), root).text, "outer.new Inner()");
}

#[test]
fn test_named_arguments_keep_the_outer_instance() {
    let mut arena = ExprArena::new();
    let outer = arena.reference("outer");
    let one = arena.int(1);
    let root = arena.alloc(Expr::New {
        qualifier: Some(outer),
        ty: JavaType::class("com.example.Outer$Inner"),
        args: Some(ArgumentList::default().with_named(vec![NamedArgument::named("x", one)])),
        array_dims: None,
        anonymous_body: false,
    });

    let mut ctx = ExpressionContext::new(EmitterOptions::default());
    let lowered = lower_with_context(&arena, &TableResolver::new(), root, &mut ctx).unwrap();
    assert_eq!(lowered.text, "inner");
    assert_eq!(
        lowered.hoisted,
        [
            "com.example.Outer.Inner inner = outer.new Inner();",
            "inner.x = 1;",
        ]
    );
    assert_eq!(ctx.visited_count(), arena.len());
}

#[test]
fn test_array_creation() {
    let mut arena = ExprArena::new();
    let three = arena.int(3);
    let ints = arena.new_array(JavaType::primitive(PrimitiveType::Int), vec![three]);
    assert_eq!(lower(&arena, &TableResolver::new(), ints).text, "new int[3]");

    let mut arena = ExprArena::new();
    let n = arena.reference("n");
    let rows = arena.new_array(JavaType::array(JavaType::string()), vec![n]);
    assert_eq!(
        lower(&arena, &TableResolver::new(), rows).text,
        "new java.lang.String[n][]"
    );

    let mut arena = ExprArena::new();
    let open = arena.new_array(JavaType::primitive(PrimitiveType::Int), Vec::new());
    assert_eq!(lower(&arena, &TableResolver::new(), open).text, "new int[]");
}

#[test]
fn test_anonymous_class_body_is_unsupported() {
    let mut arena = ExprArena::new();
    let root = arena.alloc(Expr::New {
        qualifier: None,
        ty: JavaType::class("java.lang.Runnable"),
        args: Some(ArgumentList::default()),
        array_dims: None,
        anonymous_body: true,
    });
    let err = lower_expression(&arena, &TableResolver::new(), root, &EmitterOptions::default())
        .unwrap_err();
    assert!(err.is_unsupported());
}
