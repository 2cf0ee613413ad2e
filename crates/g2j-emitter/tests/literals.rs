use super::*;
use crate::{EmitterOptions, lower_expression};
use g2j_ast::{BinaryOp, ExprArena};
use g2j_common::PrimitiveType;
use g2j_resolver::NullResolver;

fn lower_literal(value: Literal) -> Result<String, LowerError> {
    let mut arena = ExprArena::new();
    let root = arena.literal(value);
    lower_expression(&arena, &NullResolver, root, &EmitterOptions::default())
        .map(|lowered| lowered.text)
}

fn literal(value: Literal) -> String {
    lower_literal(value).expect("literal should lower")
}

#[test]
fn test_integer_literals() {
    assert_eq!(literal(Literal::Int(42)), "42");
    assert_eq!(literal(Literal::Int(-7)), "-7");
    assert_eq!(literal(Literal::Int(i32::MIN)), "java.lang.Integer.MIN_VALUE");
    assert_eq!(literal(Literal::Long(5)), "5L");
    assert_eq!(literal(Literal::Long(i64::MIN)), "java.lang.Long.MIN_VALUE");
    assert_eq!(
        literal(Literal::BigInteger("123456789012345678901234567890".into())),
        "new java.math.BigInteger(\"123456789012345678901234567890\")"
    );
}

#[test]
fn test_floating_point_literals() {
    assert_eq!(literal(Literal::Float(1.5)), "1.5f");
    assert_eq!(literal(Literal::Float(0.1)), "0.1f");
    assert_eq!(literal(Literal::Double(2.0)), "2.0");
    assert_eq!(literal(Literal::Double(-0.25)), "-0.25");
    assert_eq!(literal(Literal::Double(f64::NAN)), "java.lang.Double.NaN");
    assert_eq!(
        literal(Literal::Float(f32::INFINITY)),
        "java.lang.Float.POSITIVE_INFINITY"
    );
    assert_eq!(
        literal(Literal::Double(f64::NEG_INFINITY)),
        "java.lang.Double.NEGATIVE_INFINITY"
    );
    assert_eq!(
        literal(Literal::BigDecimal("1.50".into())),
        "new java.math.BigDecimal(\"1.50\")"
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(literal(Literal::String("plain".into())), r#""plain""#);
    assert_eq!(
        literal(Literal::String("say \"hi\"\\".into())),
        r#""say \"hi\"\\""#
    );
    assert_eq!(literal(Literal::String("it's".into())), r#""it's""#);
    assert_eq!(literal(Literal::String("\u{1}\u{7f}".into())), r#""\001\177""#);
    assert_eq!(literal(Literal::String("caf\u{e9}".into())), "\"caf\u{e9}\"");
}

#[test]
fn test_multiline_string_escapes_newlines() {
    assert_eq!(
        literal(Literal::String("line one\n\tline two\r\n".into())),
        r#""line one\n\tline two\r\n""#
    );
}

#[test]
fn test_char_literals() {
    assert_eq!(literal(Literal::Char('x')), "'x'");
    assert_eq!(literal(Literal::Char('\'')), r"'\''");
    assert_eq!(literal(Literal::Char('"')), "'\"'");
    assert_eq!(literal(Literal::Char('\n')), r"'\n'");
    assert!(
        lower_literal(Literal::Char('\u{1F600}'))
            .unwrap_err()
            .is_unsupported()
    );
}

#[test]
fn test_boolean_and_null() {
    assert_eq!(literal(Literal::Boolean(true)), "true");
    assert_eq!(literal(Literal::Boolean(false)), "false");
    assert_eq!(literal(Literal::Null), "null");
}

#[test]
fn test_quote_string_matches_literal_output() {
    assert_eq!(quote_string("a\tb"), r#""a\tb""#);
}

// =============================================================================
// GStrings
// =============================================================================

fn lower_root(arena: &ExprArena, root: ExprId) -> String {
    lower_expression(arena, &NullResolver, root, &EmitterOptions::default())
        .expect("gstring should lower")
        .text
}

fn text(text: &str) -> GStringPart {
    GStringPart::Text { text: text.into() }
}

#[test]
fn test_gstring_concatenation() {
    let mut arena = ExprArena::new();
    let name = arena.reference("name");
    let root = arena.gstring(vec![
        text("Hello, "),
        GStringPart::Injection { expr: name },
        text("!"),
    ]);
    assert_eq!(lower_root(&arena, root), r#""Hello, " + name + "!""#);
}

#[test]
fn test_gstring_leading_injection_is_forced_to_string() {
    let mut arena = ExprArena::new();
    let count = arena.reference("count");
    let root = arena.gstring(vec![GStringPart::Injection { expr: count }, text(" items")]);
    assert_eq!(lower_root(&arena, root), r#""" + count + " items""#);
}

#[test]
fn test_gstring_parenthesizes_additive_injection() {
    let mut arena = ExprArena::new();
    let a = arena.reference("a");
    let b = arena.reference("b");
    let sum = arena.binary(BinaryOp::Plus, a, b);
    let root = arena.gstring(vec![text("sum: "), GStringPart::Injection { expr: sum }]);
    assert_eq!(lower_root(&arena, root), r#""sum: " + (a + b)"#);
}

#[test]
fn test_gstring_text_only_and_empty() {
    let mut arena = ExprArena::new();
    let merged = arena.gstring(vec![text("a"), text(""), text("b")]);
    let empty = arena.gstring(Vec::new());
    assert_eq!(lower_root(&arena, merged), r#""ab""#);
    assert_eq!(lower_root(&arena, empty), r#""""#);
}

#[test]
fn test_builtin_type_class() {
    let mut arena = ExprArena::new();
    let int = arena.builtin_class(PrimitiveType::Int);
    let boolean = arena.builtin_class(PrimitiveType::Boolean);
    assert_eq!(lower_root(&arena, int), "java.lang.Integer.class");
    assert_eq!(lower_root(&arena, boolean), "java.lang.Boolean.class");
}
