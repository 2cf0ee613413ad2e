use colored::Colorize;
use std::path::Path;

use g2j_emitter::LowerError;

use crate::driver::LoweringResult;

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// One line per unreadable file and per failed root, in input order.
    pub fn render(&self, result: &LoweringResult) -> String {
        let mut lines = Vec::new();
        for file in &result.files {
            if let Some(message) = &file.load_error {
                lines.push(self.format_load_error(&file.path, message));
            }
            for root in file.failed_roots() {
                if let Err(err) = &root.result {
                    lines.push(self.format_lower_error(&file.path, err));
                }
            }
        }
        lines.join("\n")
    }

    pub fn format_load_error(&self, path: &Path, message: &str) -> String {
        format!(
            "{} - {}: {}",
            self.format_path(path),
            self.format_category(false),
            message
        )
    }

    pub fn format_lower_error(&self, path: &Path, err: &LowerError) -> String {
        format!(
            "{} - {}: {}",
            self.format_path(path),
            self.format_category(err.is_unsupported()),
            err
        )
    }

    /// `Lowered 3 of 4 roots in 2 files.` plus the failure count when any
    /// root or file failed.
    pub fn format_summary(&self, result: &LoweringResult) -> String {
        let total = result.root_count();
        let failed = result.failed_root_count();
        let unreadable = result
            .files
            .iter()
            .filter(|file| file.load_error.is_some())
            .count();
        let files = result.files.len();

        let mut summary = format!(
            "Lowered {} of {} {} in {} {}.",
            total - failed,
            total,
            plural(total, "root", "roots"),
            files,
            plural(files, "file", "files"),
        );
        if failed == 0 && unreadable == 0 {
            return if self.color {
                summary.green().to_string()
            } else {
                summary
            };
        }

        let mut problems = Vec::new();
        if failed > 0 {
            problems.push(format!("{failed} failed"));
        }
        if unreadable > 0 {
            problems.push(format!(
                "{unreadable} {} could not be read",
                plural(unreadable, "file", "files")
            ));
        }
        let problems = problems.join(", ");
        summary.push(' ');
        if self.color {
            summary.push_str(&problems.red().bold().to_string());
        } else {
            summary.push_str(&problems);
        }
        summary
    }

    fn format_path(&self, path: &Path) -> String {
        let path = path.display().to_string();
        if self.color {
            path.cyan().to_string()
        } else {
            path
        }
    }

    fn format_category(&self, unsupported: bool) -> String {
        let label = if unsupported { "unsupported" } else { "error" };
        if !self.color {
            return label.to_string();
        }

        if unsupported {
            label.yellow().bold().to_string()
        } else {
            label.red().bold().to_string()
        }
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
