use super::*;
use crate::{EmitterOptions, lower_expression};
use g2j_ast::{ExprArena, Literal};
use g2j_common::PrimitiveType;
use g2j_common::names::DEFAULT_GROOVY_METHODS;
use g2j_resolver::{MethodInfo, MethodRef, Resolver, TableResolver};

fn lower(arena: &ExprArena, resolver: &dyn Resolver, root: ExprId) -> String {
    lower_expression(arena, resolver, root, &EmitterOptions::default())
        .expect("expression should lower")
        .text
}

fn method(name: &str) -> Resolved {
    Resolved::Method(MethodRef::new(MethodInfo::new(name)))
}

// =============================================================================
// Binary operators
// =============================================================================

#[test]
fn test_unresolved_binary_is_verbatim() {
    let mut arena = ExprArena::new();
    let a = arena.reference("a");
    let b = arena.reference("b");
    let sum = arena.binary(BinaryOp::Plus, a, b);
    assert_eq!(lower(&arena, &TableResolver::new(), sum), "a + b");
}

#[test]
fn test_unresolved_groovy_operators_are_flagged_and_kept_verbatim() {
    for (op, expected) in [
        (BinaryOp::Power, "a ** b"),
        (BinaryOp::Compare, "a <=> b"),
        (BinaryOp::RegexMatch, "a ==~ b"),
    ] {
        assert!(op.is_groovy_only());
        let mut arena = ExprArena::new();
        let a = arena.reference("a");
        let b = arena.reference("b");
        let root = arena.binary(op, a, b);
        assert_eq!(lower(&arena, &TableResolver::new(), root), expected);
    }
    assert!(!BinaryOp::Equal.is_groovy_only());
    assert!(!BinaryOp::UnsignedRightShift.is_groovy_only());
}

#[test]
fn test_resolved_plus_becomes_method_call() {
    let mut arena = ExprArena::new();
    let a = arena.reference("a");
    let b = arena.reference("b");
    let sum = arena.binary(BinaryOp::Plus, a, b);
    let resolver = TableResolver::new().with_resolution(sum, method("plus"));
    assert_eq!(lower(&arena, &resolver, sum), "a.plus(b)");
}

#[test]
fn test_builtin_and_ambiguous_operators_stay_verbatim() {
    let mut arena = ExprArena::new();
    let a = arena.reference("a");
    let b = arena.reference("b");
    let sum = arena.binary(BinaryOp::Plus, a, b);

    let builtin = TableResolver::new().with_resolution(sum, Resolved::Builtin);
    assert_eq!(lower(&arena, &builtin, sum), "a + b");

    let ambiguous = TableResolver::new()
        .with_resolution(sum, method("plus"))
        .with_resolution(sum, method("plus"));
    assert_eq!(lower(&arena, &ambiguous, sum), "a + b");
}

#[test]
fn test_precedence_parenthesizes_operands() {
    let mut arena = ExprArena::new();
    let a = arena.reference("a");
    let b = arena.reference("b");
    let c = arena.reference("c");
    let sum = arena.binary(BinaryOp::Plus, a, b);
    let product = arena.binary(BinaryOp::Multiply, sum, c);
    assert_eq!(lower(&arena, &TableResolver::new(), product), "(a + b) * c");

    let mut arena = ExprArena::new();
    let a = arena.reference("a");
    let b = arena.reference("b");
    let c = arena.reference("c");
    let inner = arena.binary(BinaryOp::Minus, b, c);
    let outer = arena.binary(BinaryOp::Minus, a, inner);
    assert_eq!(lower(&arena, &TableResolver::new(), outer), "a - (b - c)");

    let mut arena = ExprArena::new();
    let a = arena.reference("a");
    let b = arena.reference("b");
    let c = arena.reference("c");
    let product = arena.binary(BinaryOp::Multiply, a, b);
    let sum = arena.binary(BinaryOp::Plus, product, c);
    assert_eq!(lower(&arena, &TableResolver::new(), sum), "a * b + c");
}

#[test]
fn test_receiver_of_rewritten_operator_is_parenthesized() {
    let mut arena = ExprArena::new();
    let a = arena.reference("a");
    let b = arena.reference("b");
    let c = arena.reference("c");
    let sum = arena.binary(BinaryOp::Plus, a, b);
    let product = arena.binary(BinaryOp::Multiply, sum, c);
    let resolver = TableResolver::new().with_resolution(product, method("multiply"));
    assert_eq!(lower(&arena, &resolver, product), "(a + b).multiply(c)");

    let mut arena = ExprArena::new();
    let minus_one = arena.literal(Literal::Int(-1));
    let x = arena.reference("x");
    let sum = arena.binary(BinaryOp::Plus, minus_one, x);
    let resolver = TableResolver::new().with_resolution(sum, method("plus"));
    assert_eq!(lower(&arena, &resolver, sum), "(-1).plus(x)");
}

#[test]
fn test_missing_right_operand() {
    let mut arena = ExprArena::new();
    let a = arena.reference("a");
    let partial = arena.alloc(Expr::Binary {
        op: BinaryOp::Plus,
        left: a,
        right: None,
    });

    let resolver = TableResolver::new().with_resolution(partial, method("plus"));
    assert_eq!(lower(&arena, &resolver, partial), "a.plus(null)");

    let err = lower_expression(&arena, &TableResolver::new(), partial, &EmitterOptions::default())
        .unwrap_err();
    assert!(matches!(err, LowerError::Malformed { expr, .. } if expr == partial));
}

#[test]
fn test_gdk_operator_uses_static_owner() {
    let mut arena = ExprArena::new();
    let list = arena.reference("list");
    let item = arena.reference("item");
    let sum = arena.binary(BinaryOp::Plus, list, item);
    let plus = MethodInfo::new("plus").gdk(DEFAULT_GROOVY_METHODS);
    let resolver = TableResolver::new()
        .with_resolution(sum, Resolved::Method(MethodRef::new(plus)))
        .with_type(list, JavaType::class("java.util.List"));
    assert_eq!(
        lower(&arena, &resolver, sum),
        "org.codehaus.groovy.runtime.DefaultGroovyMethods.plus(list, item)"
    );
}

// =============================================================================
// Unary operators
// =============================================================================

#[test]
fn test_unary_operators() {
    let mut arena = ExprArena::new();
    let x = arena.reference("x");
    let negate = arena.prefix(UnaryOp::Negate, x);
    let i = arena.reference("i");
    let increment = arena.postfix(UnaryOp::Increment, i);
    let resolver = TableResolver::new();
    assert_eq!(lower(&arena, &resolver, negate), "-x");
    assert_eq!(lower(&arena, &resolver, increment), "i++");

    let mut arena = ExprArena::new();
    let x = arena.reference("x");
    let negate = arena.prefix(UnaryOp::Negate, x);
    let resolver = TableResolver::new().with_resolution(negate, method("negative"));
    assert_eq!(lower(&arena, &resolver, negate), "x.negative()");
}

#[test]
fn test_adjacent_signs_are_separated() {
    let mut arena = ExprArena::new();
    let x = arena.reference("x");
    let inner = arena.prefix(UnaryOp::Negate, x);
    let outer = arena.prefix(UnaryOp::Negate, inner);
    assert_eq!(lower(&arena, &TableResolver::new(), outer), "- -x");
}

// =============================================================================
// Assignment
// =============================================================================

#[test]
fn test_assignment_through_setter() {
    let mut arena = ExprArena::new();
    let p = arena.reference("p");
    let target = arena.qualified(p, "x");
    let one = arena.int(1);
    let assign = arena.assign(target, one);

    assert_eq!(lower(&arena, &TableResolver::new(), assign), "p.x = 1");

    let setter = MethodRef::new(MethodInfo::new("setX").in_class("Point"));
    let resolver = TableResolver::new().with_resolution(target, Resolved::Setter(setter));
    assert_eq!(lower(&arena, &resolver, assign), "p.setX(1)");
}

#[test]
fn test_compound_assignment_is_verbatim() {
    let mut arena = ExprArena::new();
    let a = arena.reference("a");
    let b = arena.reference("b");
    let assign = arena.alloc(Expr::Assignment {
        op: Some(BinaryOp::Plus),
        target: a,
        value: b,
    });
    assert_eq!(lower(&arena, &TableResolver::new(), assign), "a += b");
}

// =============================================================================
// Conditional
// =============================================================================

#[test]
fn test_conditional_verbatim_and_nested() {
    let mut arena = ExprArena::new();
    let c = arena.reference("c");
    let a = arena.reference("a");
    let d = arena.reference("d");
    let e = arena.reference("e");
    let f = arena.reference("f");
    let nested = arena.conditional(d, e, f);
    let root = arena.conditional(c, a, nested);
    assert_eq!(lower(&arena, &TableResolver::new(), root), "c ? a : d ? e : f");

    let mut arena = ExprArena::new();
    let c = arena.reference("c");
    let a = arena.reference("a");
    let b = arena.reference("b");
    let d = arena.reference("d");
    let e = arena.reference("e");
    let condition = arena.conditional(c, a, b);
    let root = arena.conditional(condition, d, e);
    assert_eq!(lower(&arena, &TableResolver::new(), root), "(c ? a : b) ? d : e");
}

#[test]
fn test_non_boolean_condition_uses_as_boolean() {
    let mut arena = ExprArena::new();
    let s = arena.reference("s");
    let a = arena.reference("a");
    let b = arena.reference("b");
    let root = arena.conditional(s, a, b);
    let string = JavaType::string();

    let instance = TableResolver::new()
        .with_type(s, string.clone())
        .with_method_candidate(&string, "asBoolean", method("asBoolean"));
    assert_eq!(lower(&arena, &instance, root), "s.asBoolean() ? a : b");

    let gdk = MethodInfo::new("asBoolean").gdk(DEFAULT_GROOVY_METHODS);
    let static_owner = TableResolver::new()
        .with_type(s, string.clone())
        .with_method_candidate(&string, "asBoolean", Resolved::Method(MethodRef::new(gdk)));
    assert_eq!(
        lower(&arena, &static_owner, root),
        "org.codehaus.groovy.runtime.DefaultGroovyMethods.asBoolean(s) ? a : b"
    );

    let boolean = TableResolver::new()
        .with_type(s, JavaType::primitive(PrimitiveType::Boolean))
        .with_method_candidate(&string, "asBoolean", method("asBoolean"));
    assert_eq!(lower(&arena, &boolean, root), "s ? a : b");
}

// =============================================================================
// Casts and type checks
// =============================================================================

#[test]
fn test_casts() {
    let mut arena = ExprArena::new();
    let x = arena.reference("x");
    let cast = arena.cast(JavaType::primitive(PrimitiveType::Int), x);
    assert_eq!(lower(&arena, &TableResolver::new(), cast), "(int) x");

    let mut arena = ExprArena::new();
    let x = arena.reference("x");
    let negated = arena.prefix(UnaryOp::Negate, x);
    let cast = arena.cast(JavaType::class("java.lang.Integer"), negated);
    assert_eq!(
        lower(&arena, &TableResolver::new(), cast),
        "(java.lang.Integer) (-x)"
    );

    let mut arena = ExprArena::new();
    let x = arena.reference("x");
    let negated = arena.prefix(UnaryOp::Negate, x);
    let cast = arena.cast(JavaType::primitive(PrimitiveType::Long), negated);
    assert_eq!(lower(&arena, &TableResolver::new(), cast), "(long) -x");
}

#[test]
fn test_safe_cast() {
    let mut arena = ExprArena::new();
    let x = arena.reference("x");
    let list = JavaType::generic("java.util.List", vec![JavaType::string()]);
    let cast = arena.alloc(Expr::SafeCast {
        ty: list,
        operand: x,
    });

    assert_eq!(
        lower(&arena, &TableResolver::new(), cast),
        "(java.util.List<java.lang.String>) x"
    );

    let resolver = TableResolver::new().with_resolution(cast, method("asType"));
    assert_eq!(lower(&arena, &resolver, cast), "x.asType(java.util.List.class)");
}

#[test]
fn test_instance_of_uses_erasure() {
    let mut arena = ExprArena::new();
    let x = arena.reference("x");
    let check = arena.instance_of(
        x,
        JavaType::generic("java.util.List", vec![JavaType::string()]),
    );
    assert_eq!(
        lower(&arena, &TableResolver::new(), check),
        "x instanceof java.util.List"
    );
}
