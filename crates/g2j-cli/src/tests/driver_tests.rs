use clap::Parser;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::args::CliArgs;
use crate::config::{DEFAULT_INCLUDE, ResolvedOptions};
use crate::driver::{discover_inputs, lower_files, lower_unit, parse_unit, run};
use g2j_ast::{ArgumentList, Expr, ExprArena, ExprId, NamedArgument};
use g2j_common::JavaType;
use g2j_emitter::{EmitterOptions, LowerError};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test dir");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

/// `new Point(x: 1)`
fn new_point(arena: &mut ExprArena) -> ExprId {
    let one = arena.int(1);
    let args = ArgumentList::default().with_named(vec![NamedArgument::named("x", one)]);
    arena.new_object(JavaType::class("Point"), args)
}

/// A unit whose roots are `count` independent `new Point(x: 1)` expressions.
fn point_unit(count: usize) -> String {
    let mut arena = ExprArena::new();
    let roots: Vec<Value> = (0..count)
        .map(|_| json!({ "expr": new_point(&mut arena) }))
        .collect();
    json!({ "nodes": arena, "roots": roots }).to_string()
}

// =============================================================================
// Units
// =============================================================================

#[test]
fn parses_lowering_unit() {
    let unit = parse_unit(
        r#"{
          "nodes": [
            {"kind": "reference", "name": "a"},
            {"kind": "reference", "name": "b"},
            {"kind": "binary", "op": "plus", "left": 0, "right": 1}
          ],
          "roots": [{"expr": 2, "assignTo": "sum"}],
          "resolver": {
            "resolutions": {"2": [{"kind": "method", "method": {"name": "plus"}}]}
          },
          "reservedNames": ["tmp"]
        }"#,
    )
    .expect("unit should parse");

    assert_eq!(unit.nodes.len(), 3);
    assert_eq!(unit.roots.len(), 1);
    assert_eq!(unit.roots[0].expr, ExprId(2));
    assert_eq!(unit.roots[0].assign_to.as_deref(), Some("sum"));
    assert_eq!(unit.reserved_names, vec!["tmp".to_string()]);

    let outcomes = lower_unit(&unit, &EmitterOptions::default(), &[]);
    assert_eq!(
        outcomes[0].render_java().as_deref(),
        Some("sum = a.plus(b);\n")
    );
}

#[test]
fn rejects_malformed_arena() {
    let err = parse_unit(
        r#"{
          "nodes": [
            {"kind": "parenthesized", "operand": 1},
            {"kind": "reference", "name": "a"}
          ]
        }"#,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("invalid expression arena"));

    assert!(parse_unit("{\"roots\": []}").is_err());
}

#[test]
fn later_roots_avoid_names_of_earlier_ones() {
    let unit = parse_unit(&point_unit(2)).unwrap();
    let outcomes = lower_unit(&unit, &EmitterOptions::default(), &["point".to_string()]);

    let texts: Vec<&str> = outcomes
        .iter()
        .map(|outcome| outcome.result.as_ref().unwrap().text.as_str())
        .collect();
    assert_eq!(texts, ["point1", "point2"]);
}

#[test]
fn assignment_targets_are_reserved() {
    let mut arena = ExprArena::new();
    let root = new_point(&mut arena);
    let source = json!({
        "nodes": arena,
        "roots": [{ "expr": root, "assignTo": "point" }]
    })
    .to_string();

    let unit = parse_unit(&source).unwrap();
    let outcomes = lower_unit(&unit, &EmitterOptions::default(), &[]);
    assert_eq!(
        outcomes[0].render_java().unwrap(),
        "Point point1 = new Point();\npoint1.x = 1;\npoint = point1;\n"
    );
}

#[test]
fn failing_root_does_not_stop_the_rest() {
    let mut arena = ExprArena::new();
    let closure = arena.alloc(Expr::Closure {
        parameters: Vec::new(),
    });
    let point = new_point(&mut arena);
    let source = json!({
        "nodes": arena,
        "roots": [{ "expr": closure }, { "expr": point }]
    })
    .to_string();

    let unit = parse_unit(&source).unwrap();
    let outcomes = lower_unit(&unit, &EmitterOptions::default(), &[]);
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(
        outcomes[0].result,
        Err(LowerError::Unsupported { construct: "closure", .. })
    ));
    assert!(outcomes[0].render_java().is_none());
    assert_eq!(outcomes[1].result.as_ref().unwrap().text, "point");
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn discovers_units_with_include_and_exclude_globs() {
    let temp = TempDir::new().expect("temp dir");
    let a = write_file(temp.path(), "a.g2j.json", "{}");
    let b = write_file(temp.path(), "nested/b.g2j.json", "{}");
    write_file(temp.path(), "skip/c.g2j.json", "{}");
    write_file(temp.path(), "notes.json", "{}");
    write_file(temp.path(), "g2j.json", "{}");

    let files = discover_inputs(
        &[temp.path().to_path_buf()],
        &[DEFAULT_INCLUDE.to_string()],
        &["skip/**".to_string()],
    )
    .unwrap();
    assert_eq!(files, vec![a.clone(), b]);

    // Files named directly bypass the include patterns.
    let notes = temp.path().join("notes.json");
    let files = discover_inputs(&[notes.clone(), a.clone()], &[], &[]).unwrap();
    assert_eq!(files, vec![notes, a]);
}

#[test]
fn reports_missing_inputs_and_bad_globs() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("missing");
    let err = discover_inputs(&[missing], &[DEFAULT_INCLUDE.to_string()], &[]).unwrap_err();
    assert!(err.to_string().contains("input not found"));

    let err = discover_inputs(&[temp.path().to_path_buf()], &["a[".to_string()], &[]).unwrap_err();
    assert!(err.to_string().contains("invalid glob pattern"));
}

#[test]
fn parallel_lowering_keeps_input_order() {
    let temp = TempDir::new().expect("temp dir");
    let files: Vec<PathBuf> = (0..12)
        .map(|i| write_file(temp.path(), &format!("unit{i:02}.g2j.json"), &point_unit(i % 3)))
        .collect();

    let result = lower_files(&files, &ResolvedOptions::default());
    let paths: Vec<&PathBuf> = result.files.iter().map(|file| &file.path).collect();
    assert_eq!(paths, files.iter().collect::<Vec<_>>());
    assert_eq!(result.root_count(), 12);
    assert!(!result.has_errors());
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn run_uses_config_and_reports_unreadable_units() {
    let temp = TempDir::new().expect("temp dir");
    write_file(
        temp.path(),
        "g2j.json",
        r#"{"emitterOptions": {"varNaming": "initial"}}"#,
    );
    write_file(temp.path(), "a.g2j.json", &point_unit(1));
    write_file(temp.path(), "b.g2j.json", "{ not json");

    let args = CliArgs::try_parse_from(["g2j"]).unwrap();
    let result = run(&args, temp.path()).expect("run should succeed");
    assert_eq!(result.files.len(), 2);
    assert!(result.has_errors());
    assert_eq!(result.failed_root_count(), 0);

    let broken = &result.files[1];
    assert!(broken.roots.is_empty());
    assert!(
        broken
            .load_error
            .as_deref()
            .is_some_and(|message| message.contains("failed to parse lowering unit"))
    );

    let java = result.render_java();
    assert!(java.starts_with(&format!("// {}\n", result.files[0].path.display())));
    assert!(java.contains("Point p = new Point();\np.x = 1;\np;\n"));
}

#[test]
fn run_fails_without_units() {
    let temp = TempDir::new().expect("temp dir");
    let args = CliArgs::try_parse_from(["g2j"]).unwrap();
    let err = run(&args, temp.path()).unwrap_err();
    assert!(err.to_string().contains("no lowering units found"));
}

#[test]
fn renders_json_records() {
    let temp = TempDir::new().expect("temp dir");
    let mut arena = ExprArena::new();
    let regex = arena.alloc(Expr::Regex {
        pattern: "a+".to_string(),
    });
    let point = new_point(&mut arena);
    let unit = write_file(
        temp.path(),
        "unit.g2j.json",
        &json!({
            "nodes": arena,
            "roots": [{ "expr": point, "assignTo": "origin" }, { "expr": regex }]
        })
        .to_string(),
    );

    let result = lower_files(&[unit.clone()], &ResolvedOptions::default());
    let value: Value = serde_json::from_str(&result.render_json().unwrap()).unwrap();
    assert_eq!(
        value,
        json!([{
            "file": unit.display().to_string(),
            "roots": [
                {
                    "expr": point,
                    "assignTo": "origin",
                    "text": "point",
                    "hoisted": ["Point point = new Point();", "point.x = 1;"]
                },
                {
                    "expr": regex,
                    "error": "unsupported construct: regex at node #0"
                }
            ]
        }])
    );

    // A single file gets no header comment.
    assert_eq!(
        result.render_java(),
        "Point point = new Point();\npoint.x = 1;\norigin = point;\n"
    );
}
