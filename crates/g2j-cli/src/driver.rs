//! Lowering driver: finds lowering units, lowers every root and collects the
//! per-file outcomes.
//!
//! A lowering unit is one JSON file holding an expression arena, the roots to
//! lower (in output order) and the resolver tables:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "kind": "literal", "value": { "type": "int", "value": 1 } },
//!     { "kind": "new", "type": { "kind": "class", "name": "Point" },
//!       "args": { "named": [{ "label": { "kind": "name", "name": "x" }, "value": 0 }] } }
//!   ],
//!   "roots": [{ "expr": 1, "assignTo": "origin" }],
//!   "resolver": {}
//! }
//! ```

use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, debug_span, warn};
use walkdir::WalkDir;

use g2j_ast::{ExprArena, ExprId};
use g2j_emitter::{
    EmitterOptions, ExpressionContext, LowerError, LoweredExpression, lower_with_context,
};
use g2j_resolver::TableResolver;

use crate::args::CliArgs;
use crate::config::{self, G2jConfig, ResolvedOptions};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoweringUnit {
    pub nodes: ExprArena,
    #[serde(default)]
    pub roots: Vec<RootEntry>,
    #[serde(default)]
    pub resolver: TableResolver,
    /// Names already declared where this unit's output is placed.
    #[serde(default)]
    pub reserved_names: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootEntry {
    pub expr: ExprId,
    /// Emit `target = <expr>;` instead of an expression statement.
    #[serde(default)]
    pub assign_to: Option<String>,
}

#[derive(Debug)]
pub struct RootOutcome {
    pub expr: ExprId,
    pub assign_to: Option<String>,
    pub result: Result<LoweredExpression, LowerError>,
}

impl RootOutcome {
    /// Java statements for a successfully lowered root.
    pub fn render_java(&self) -> Option<String> {
        let lowered = self.result.as_ref().ok()?;
        Some(match self.assign_to.as_deref() {
            Some(target) => lowered.render_assignment(target),
            None => lowered.render_statement(),
        })
    }
}

#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Set when the unit could not be read, parsed or validated. No roots
    /// are lowered in that case.
    pub load_error: Option<String>,
    pub roots: Vec<RootOutcome>,
}

impl FileOutcome {
    pub fn failed_roots(&self) -> impl Iterator<Item = &RootOutcome> {
        self.roots.iter().filter(|root| root.result.is_err())
    }

    pub fn has_errors(&self) -> bool {
        self.load_error.is_some() || self.failed_roots().next().is_some()
    }
}

#[derive(Debug, Default)]
pub struct LoweringResult {
    /// One entry per input file, in discovery order.
    pub files: Vec<FileOutcome>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileRecord<'a> {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    roots: Vec<RootRecord<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RootRecord<'a> {
    expr: ExprId,
    #[serde(skip_serializing_if = "Option::is_none")]
    assign_to: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hoisted: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl LoweringResult {
    pub fn root_count(&self) -> usize {
        self.files.iter().map(|file| file.roots.len()).sum()
    }

    pub fn failed_root_count(&self) -> usize {
        self.files.iter().map(|file| file.failed_roots().count()).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.files.iter().any(FileOutcome::has_errors)
    }

    /// Java text for every successfully lowered root. With more than one
    /// input file each file's block starts with a `// path` comment.
    pub fn render_java(&self) -> String {
        let headers = self.files.len() > 1;
        let mut out = String::new();
        for (index, file) in self.files.iter().enumerate() {
            if headers {
                if index > 0 {
                    out.push('\n');
                }
                out.push_str(&format!("// {}\n", file.path.display()));
            }
            for root in &file.roots {
                if let Some(java) = root.render_java() {
                    out.push_str(&java);
                }
            }
        }
        out
    }

    pub fn render_json(&self) -> Result<String> {
        let records: Vec<FileRecord<'_>> = self
            .files
            .iter()
            .map(|file| FileRecord {
                file: file.path.display().to_string(),
                error: file.load_error.as_deref(),
                roots: file
                    .roots
                    .iter()
                    .map(|root| {
                        let lowered = root.result.as_ref().ok();
                        RootRecord {
                            expr: root.expr,
                            assign_to: root.assign_to.as_deref(),
                            text: lowered.map(|l| l.text.as_str()),
                            hoisted: lowered.map(|l| l.hoisted.as_slice()),
                            error: root.result.as_ref().err().map(ToString::to_string),
                        }
                    })
                    .collect(),
            })
            .collect();
        let mut json =
            serde_json::to_string_pretty(&records).context("failed to serialize output")?;
        json.push('\n');
        Ok(json)
    }
}

/// Resolve configuration, discover inputs and lower them.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<LoweringResult> {
    let config = match config::find_config(args.config.as_deref(), cwd)? {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            config::load_config(&path)?
        }
        None => G2jConfig::default(),
    };
    let options = config::resolve_options(&config, args)?;

    let inputs: Vec<PathBuf> = if args.inputs.is_empty() {
        vec![cwd.to_path_buf()]
    } else {
        args.inputs.iter().map(|input| cwd.join(input)).collect()
    };
    let files = discover_inputs(&inputs, &options.include, &options.exclude)?;
    if files.is_empty() {
        bail!("no lowering units found");
    }
    Ok(lower_files(&files, &options))
}

/// Files named directly are taken as-is; directories are walked and filtered
/// with the include and exclude globs, matched against the path relative to
/// that directory.
pub fn discover_inputs(
    inputs: &[PathBuf],
    include: &[String],
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    let include = build_glob_set(include)?;
    let exclude = build_glob_set(exclude)?;

    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            bail!("input not found: {}", input.display());
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(input)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(input).unwrap_or(entry.path());
            if include.is_match(relative) && !exclude.is_match(relative) {
                found.push(entry.into_path());
            }
        }
        found.sort();
        debug!(dir = %input.display(), count = found.len(), "discovered lowering units");
        files.extend(found);
    }
    Ok(files)
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("failed to compile glob patterns")
}

/// Lower every file in parallel. Outcomes keep the order of `files`.
pub fn lower_files(files: &[PathBuf], options: &ResolvedOptions) -> LoweringResult {
    let files = files
        .par_iter()
        .map(|path| lower_file(path, options))
        .collect();
    LoweringResult { files }
}

pub fn lower_file(path: &Path, options: &ResolvedOptions) -> FileOutcome {
    let _span = debug_span!("lower_file", path = %path.display()).entered();
    match load_unit(path) {
        Ok(unit) => FileOutcome {
            path: path.to_path_buf(),
            load_error: None,
            roots: lower_unit(&unit, &options.emitter, &options.reserved_names),
        },
        Err(err) => {
            let message = format!("{err:#}");
            warn!(error = %message, "skipping lowering unit");
            FileOutcome {
                path: path.to_path_buf(),
                load_error: Some(message),
                roots: Vec::new(),
            }
        }
    }
}

pub fn load_unit(path: &Path) -> Result<LoweringUnit> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read lowering unit: {}", path.display()))?;
    parse_unit(&source)
}

pub fn parse_unit(source: &str) -> Result<LoweringUnit> {
    let unit: LoweringUnit =
        serde_json::from_str(source).context("failed to parse lowering unit")?;
    unit.nodes.validate().context("invalid expression arena")?;
    Ok(unit)
}

/// Lower the roots of one unit in order. Every root gets a fresh context;
/// temporaries named by earlier roots, assignment targets and reserved
/// names stay taken for the later ones since all of them share one Java
/// scope. A failing root does not stop the others.
pub fn lower_unit(
    unit: &LoweringUnit,
    options: &EmitterOptions,
    reserved: &[String],
) -> Vec<RootOutcome> {
    let mut used: FxHashSet<String> = reserved
        .iter()
        .chain(&unit.reserved_names)
        .cloned()
        .collect();
    used.extend(
        unit.roots
            .iter()
            .filter_map(|root| root.assign_to.as_deref())
            .map(assignment_variable),
    );

    let mut outcomes = Vec::with_capacity(unit.roots.len());
    for root in &unit.roots {
        let mut ctx = ExpressionContext::new(options.clone()).with_reserved_names(used.iter());
        let result = lower_with_context(&unit.nodes, &unit.resolver, root.expr, &mut ctx);
        if let Err(err) = &result {
            debug!(expr = %root.expr, %err, "root failed to lower");
        }
        used.extend(ctx.used_names().map(str::to_string));
        outcomes.push(RootOutcome {
            expr: root.expr,
            assign_to: root.assign_to.clone(),
            result,
        });
    }
    outcomes
}

/// Leading identifier of an assignment target (`point` for `point.x`), the
/// local a temporary must not shadow.
fn assignment_variable(target: &str) -> String {
    target
        .split(['.', '['])
        .next()
        .unwrap_or(target)
        .trim()
        .to_string()
}
