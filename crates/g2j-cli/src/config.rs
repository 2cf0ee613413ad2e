use anyhow::{Context, Result, anyhow, bail};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use g2j_emitter::{EmitterOptions, VarNaming};

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "g2j.json";

/// Pattern used to find lowering units inside input directories when the
/// configuration does not list any.
pub const DEFAULT_INCLUDE: &str = "**/*.g2j.json";

/// Accept `"diamond": "true"` as well as `"diamond": true`.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

/// Contents of a `g2j.json` file.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct G2jConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub emitter_options: Option<ConfigEmitterOptions>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEmitterOptions {
    #[serde(default)]
    pub var_naming: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub diamond: Option<bool>,
    #[serde(default)]
    pub max_depth: Option<u32>,
    /// Names already declared in the Java scope the output is pasted into.
    #[serde(default)]
    pub reserved_names: Option<Vec<String>>,
}

/// Configuration after merging `g2j.json` with command-line flags.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub emitter: EmitterOptions,
    pub reserved_names: Vec<String>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        ResolvedOptions {
            emitter: EmitterOptions::default(),
            reserved_names: Vec::new(),
            include: vec![DEFAULT_INCLUDE.to_string()],
            exclude: Vec::new(),
        }
    }
}

/// Flags win over the configuration file, which wins over defaults.
pub fn resolve_options(config: &G2jConfig, args: &CliArgs) -> Result<ResolvedOptions> {
    let mut resolved = ResolvedOptions::default();
    if let Some(include) = &config.include {
        resolved.include = include.clone();
    }
    if let Some(exclude) = &config.exclude {
        resolved.exclude = exclude.clone();
    }

    if let Some(options) = &config.emitter_options {
        if let Some(var_naming) = options.var_naming.as_deref() {
            resolved.emitter.var_naming = parse_var_naming(var_naming)?;
        }
        if let Some(diamond) = options.diamond {
            resolved.emitter.diamond = diamond;
        }
        if let Some(max_depth) = options.max_depth {
            resolved.emitter.max_depth = max_depth;
        }
        if let Some(names) = &options.reserved_names {
            resolved.reserved_names = names.clone();
        }
    }

    if let Some(var_naming) = args.var_naming {
        resolved.emitter.var_naming = var_naming.to_var_naming();
    }
    if args.diamond {
        resolved.emitter.diamond = true;
    }
    if let Some(max_depth) = args.max_depth {
        resolved.emitter.max_depth = max_depth;
    }

    if resolved.emitter.max_depth == 0 {
        bail!("maxDepth must be at least 1");
    }
    Ok(resolved)
}

pub fn parse_config(source: &str) -> Result<G2jConfig> {
    let config = serde_json::from_str(source).context("failed to parse g2j.json")?;
    Ok(config)
}

/// Read a configuration file, following `extends` chains.
pub fn load_config(path: &Path) -> Result<G2jConfig> {
    let mut visited = FxHashSet::default();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut FxHashSet<PathBuf>) -> Result<G2jConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("g2j.json extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config = parse_config(&source)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends)?;
        let base = load_config_inner(&base_path, visited)?;
        config = merge_configs(base, config);
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("config has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }

    if candidate.is_absolute() {
        Ok(candidate)
    } else {
        Ok(base_dir.join(candidate))
    }
}

fn merge_configs(base: G2jConfig, child: G2jConfig) -> G2jConfig {
    let emitter_options = match (base.emitter_options, child.emitter_options) {
        (Some(base), Some(child)) => Some(ConfigEmitterOptions {
            var_naming: child.var_naming.or(base.var_naming),
            diamond: child.diamond.or(base.diamond),
            max_depth: child.max_depth.or(base.max_depth),
            reserved_names: child.reserved_names.or(base.reserved_names),
        }),
        (base, child) => child.or(base),
    };

    G2jConfig {
        extends: None,
        emitter_options,
        include: child.include.or(base.include),
        exclude: child.exclude.or(base.exclude),
    }
}

/// The explicit `--config` path (a file, or a directory holding `g2j.json`),
/// otherwise `g2j.json` in `cwd` when present.
pub fn find_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    let Some(explicit) = explicit else {
        let candidate = cwd.join(CONFIG_FILE_NAME);
        return Ok(candidate.is_file().then_some(candidate));
    };

    let mut path = cwd.join(explicit);
    if path.is_dir() {
        path.push(CONFIG_FILE_NAME);
    }
    if !path.is_file() {
        bail!("config file not found: {}", path.display());
    }
    Ok(Some(path))
}

fn parse_var_naming(value: &str) -> Result<VarNaming> {
    match normalize_option(value).as_str() {
        "typename" => Ok(VarNaming::TypeName),
        "initial" => Ok(VarNaming::Initial),
        _ => bail!("unsupported varNaming '{value}'. Expected 'typeName' or 'initial'"),
    }
}

fn normalize_option(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
