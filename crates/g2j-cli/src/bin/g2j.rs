#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use g2j_cli::args::{CliArgs, OutputFormat};
use g2j_cli::reporter::Reporter;
use g2j_cli::{driver, tracing_config};

/// Some root or input file could not be lowered; the output holds the rest.
const EXIT_LOWERING_FAILED: i32 = 1;

fn main() -> Result<()> {
    // Initialize tracing if G2J_LOG or RUST_LOG is set.
    tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let result = driver::run(&args, &cwd)?;

    let output = match args.format {
        OutputFormat::Java => result.render_java(),
        OutputFormat::Json => result.render_json()?,
    };
    match &args.out {
        Some(out) => {
            let path = cwd.join(out);
            std::fs::write(&path, output)
                .with_context(|| format!("failed to write output: {}", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")?;
        }
    }

    let reporter = Reporter::new(!args.no_color && std::io::stderr().is_terminal());
    if result.has_errors() {
        eprintln!("{}", reporter.render(&result));
        eprintln!("{}", reporter.format_summary(&result));
        std::process::exit(EXIT_LOWERING_FAILED);
    }
    Ok(())
}
