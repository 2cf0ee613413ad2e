//! Temporary variable names derived from Java types.

use g2j_common::JavaType;

use crate::options::VarNaming;

/// Base name for a temporary holding a value of type `ty`, before any
/// collision suffix is applied.
pub fn base_name(ty: &JavaType, naming: VarNaming) -> String {
    let full = match ty {
        JavaType::Array { element } => match element.as_ref() {
            JavaType::Primitive { name } => format!("{}s", name.keyword()),
            other => format!("{}s", base_name(other, VarNaming::TypeName)),
        },
        JavaType::Primitive { name } => name.keyword()[..1].to_string(),
        JavaType::Class { name, .. } => lower_camel(g2j_common::names::simple_name(name)),
        JavaType::Variable { name } => lower_camel(name),
    };
    let full = if full.is_empty() {
        "value".to_string()
    } else {
        full
    };
    match naming {
        VarNaming::TypeName => full,
        VarNaming::Initial => full.chars().take(1).collect(),
    }
}

/// `Point` gives `point`, `URLConnection` gives `urlConnection`, `URL`
/// gives `url`. Characters that cannot appear in a Java identifier are
/// dropped.
pub fn lower_camel(name: &str) -> String {
    let chars: Vec<char> = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .skip_while(|c| c.is_ascii_digit())
        .collect();
    let upper_run = chars.iter().take_while(|c| c.is_uppercase()).count();
    let lowered = match upper_run {
        0 => 0,
        n if n == chars.len() => n,
        1 => 1,
        // The last capital of a run starts the next word.
        n => n - 1,
    };
    let mut out = String::with_capacity(chars.len());
    for (i, c) in chars.into_iter().enumerate() {
        if i < lowered {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
#[path = "../tests/naming.rs"]
mod tests;
