use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use g2j_emitter::VarNaming;

/// CLI arguments for the g2j binary.
#[derive(Parser, Debug)]
#[command(
    name = "g2j",
    version,
    about = "Lower Groovy expression trees to Java source"
)]
pub struct CliArgs {
    /// Path to a g2j.json configuration file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Java)]
    pub format: OutputFormat,

    /// How temporary variable names are derived from their type.
    #[arg(long = "var-naming", alias = "varNaming", value_enum, ignore_case = true)]
    pub var_naming: Option<VarNamingArg>,

    /// Instantiate generic temporaries with the diamond operator (`new T<>()`).
    #[arg(long)]
    pub diamond: bool,

    /// Maximum expression nesting before lowering gives up.
    #[arg(long = "max-depth", alias = "maxDepth")]
    pub max_depth: Option<u32>,

    /// Write output to this file instead of stdout.
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Disable colored diagnostics.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Lowering unit files, or directories searched with the configured
    /// include patterns.
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Hoisted statements followed by the expression statement.
    Java,
    /// One JSON record per file with the lowered roots.
    Json,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum VarNamingArg {
    #[value(name = "type-name", alias = "typeName")]
    TypeName,
    Initial,
}

impl VarNamingArg {
    pub fn to_var_naming(self) -> VarNaming {
        match self {
            VarNamingArg::TypeName => VarNaming::TypeName,
            VarNamingArg::Initial => VarNaming::Initial,
        }
    }
}
