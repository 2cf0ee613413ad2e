use g2j_ast::{ExprId, GStringPart, Literal};
use g2j_common::names::{JAVA_MATH_BIG_DECIMAL, JAVA_MATH_BIG_INTEGER};

use super::ExpressionGenerator;
use super::precedence;
use crate::error::LowerError;

impl<'a> ExpressionGenerator<'a> {
    // =========================================================================
    // Literals
    // =========================================================================

    pub(super) fn emit_literal(&mut self, id: ExprId, value: &Literal) -> Result<(), LowerError> {
        let text = match value {
            Literal::Int(i32::MIN) => "java.lang.Integer.MIN_VALUE".to_string(),
            Literal::Int(v) => v.to_string(),
            Literal::Long(i64::MIN) => "java.lang.Long.MIN_VALUE".to_string(),
            Literal::Long(v) => format!("{v}L"),
            Literal::BigInteger(digits) => {
                format!("new {JAVA_MATH_BIG_INTEGER}({})", quote_string(digits))
            }
            Literal::Float(v) => float_literal(f64::from(*v), "java.lang.Float", "f"),
            Literal::Double(v) => float_literal(*v, "java.lang.Double", ""),
            Literal::BigDecimal(digits) => {
                format!("new {JAVA_MATH_BIG_DECIMAL}({})", quote_string(digits))
            }
            Literal::String(text) => quote_string(text),
            Literal::Char(ch) => {
                if u32::from(*ch) > 0xFFFF {
                    return Err(self.unsupported(id, "supplementary character literal"));
                }
                quote_char(*ch)
            }
            Literal::Boolean(v) => v.to_string(),
            Literal::Null => "null".to_string(),
        };
        self.write(&text);
        Ok(())
    }

    /// `"Hello, ${name}!"` becomes `"Hello, " + name + "!"`.
    pub(super) fn emit_gstring(&mut self, parts: &[GStringPart]) -> Result<(), LowerError> {
        let segments = merge_text(parts);
        if segments.is_empty() {
            self.write("\"\"");
            return Ok(());
        }
        // A leading injection would not be a String without this.
        if matches!(segments[0], Segment::Injection(_)) {
            self.write("\"\" + ");
        }
        for (i, segment) in segments.into_iter().enumerate() {
            if i > 0 {
                self.write(" + ");
            }
            match segment {
                Segment::Text(text) => self.write(&quote_string(&text)),
                Segment::Injection(expr) => {
                    self.generate_operand(expr, precedence::MULTIPLICATIVE)?;
                }
            }
        }
        Ok(())
    }
}

enum Segment {
    Text(String),
    Injection(ExprId),
}

fn merge_text(parts: &[GStringPart]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::with_capacity(parts.len());
    for part in parts {
        match part {
            GStringPart::Text { text } if text.is_empty() => {}
            GStringPart::Text { text } => {
                if let Some(Segment::Text(last)) = segments.last_mut() {
                    last.push_str(text);
                } else {
                    segments.push(Segment::Text(text.clone()));
                }
            }
            GStringPart::Injection { expr } => segments.push(Segment::Injection(*expr)),
        }
    }
    segments
}

/// A GString without injections lowers to a single string literal.
pub(super) fn is_plain_text(parts: &[GStringPart]) -> bool {
    parts
        .iter()
        .all(|part| matches!(part, GStringPart::Text { .. }))
}

fn float_literal(value: f64, class: &str, suffix: &str) -> String {
    if value.is_nan() {
        format!("{class}.NaN")
    } else if value.is_infinite() {
        let which = if value > 0.0 {
            "POSITIVE_INFINITY"
        } else {
            "NEGATIVE_INFINITY"
        };
        format!("{class}.{which}")
    } else if suffix == "f" {
        // Print the shortest form of the f32, not of its widened value.
        format!("{:?}{suffix}", value as f32)
    } else {
        format!("{value:?}")
    }
}

/// Java string literal for `text`, quotes included.
pub(crate) fn quote_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            other => escape_into(&mut out, other),
        }
    }
    out.push('"');
    out
}

fn quote_char(ch: char) -> String {
    let mut out = String::with_capacity(4);
    out.push('\'');
    match ch {
        '\'' => out.push_str("\\'"),
        other => escape_into(&mut out, other),
    }
    out.push('\'');
    out
}

fn escape_into(out: &mut String, ch: char) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '\u{8}' => out.push_str("\\b"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\u{c}' => out.push_str("\\f"),
        '\r' => out.push_str("\\r"),
        // Octal, not \u: javac expands unicode escapes before lexing.
        c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", u32::from(c))),
        c => out.push(c),
    }
}

#[cfg(test)]
#[path = "../../tests/literals.rs"]
mod tests;
