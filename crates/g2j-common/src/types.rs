//! Java type model.
//!
//! Types are produced by the resolver (static types of expressions, parameter
//! types of resolved methods) and consumed by the emitter, which writes them
//! verbatim into declarations, casts, `instanceof` checks and `.class`
//! literals. Class names are kept fully qualified; the emitter never imports.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::names;

/// Java primitive types (plus `void`, which only appears as a return type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    Void,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Char,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
        PrimitiveType::Void,
    ];

    /// The Java keyword spelling (`int`, `boolean`, ...).
    pub const fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Void => "void",
        }
    }

    /// Fully qualified name of the wrapper class.
    pub const fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "java.lang.Boolean",
            PrimitiveType::Byte => "java.lang.Byte",
            PrimitiveType::Char => "java.lang.Character",
            PrimitiveType::Short => "java.lang.Short",
            PrimitiveType::Int => "java.lang.Integer",
            PrimitiveType::Long => "java.lang.Long",
            PrimitiveType::Float => "java.lang.Float",
            PrimitiveType::Double => "java.lang.Double",
            PrimitiveType::Void => "java.lang.Void",
        }
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == text)
    }

    /// Accepts both `java.lang.Integer` and `Integer`.
    pub fn from_boxed_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| {
            let boxed = p.boxed_name();
            boxed == name || boxed.strip_prefix("java.lang.") == Some(name)
        })
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A Java type as it appears in generated source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum JavaType {
    /// `int`, `boolean`, ...
    Primitive { name: PrimitiveType },
    /// `java.util.Map<java.lang.String, java.lang.Object>`
    Class {
        name: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<JavaType>,
    },
    /// `T[]`
    Array { element: Box<JavaType> },
    /// Unsubstituted type parameter such as `T`.
    Variable { name: String },
}

impl JavaType {
    pub fn primitive(name: PrimitiveType) -> Self {
        JavaType::Primitive { name }
    }

    pub fn class(name: impl Into<String>) -> Self {
        JavaType::Class {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<JavaType>) -> Self {
        JavaType::Class {
            name: name.into(),
            args,
        }
    }

    pub fn array(element: JavaType) -> Self {
        JavaType::Array {
            element: Box::new(element),
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        JavaType::Variable { name: name.into() }
    }

    pub fn object() -> Self {
        Self::class(names::JAVA_LANG_OBJECT)
    }

    pub fn string() -> Self {
        Self::class(names::JAVA_LANG_STRING)
    }

    pub const fn is_primitive(&self) -> bool {
        matches!(self, JavaType::Primitive { .. })
    }

    pub const fn is_array(&self) -> bool {
        matches!(self, JavaType::Array { .. })
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            JavaType::Primitive { name } => Some(*name),
            _ => None,
        }
    }

    pub fn element_type(&self) -> Option<&JavaType> {
        match self {
            JavaType::Array { element } => Some(element),
            _ => None,
        }
    }

    /// Qualified class name, ignoring type arguments.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            JavaType::Class { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Primitive types become their wrapper class; everything else is unchanged.
    pub fn boxed(&self) -> JavaType {
        match self {
            JavaType::Primitive { name } => JavaType::class(name.boxed_name()),
            other => other.clone(),
        }
    }

    /// The primitive behind this type, looking through wrapper classes.
    pub fn unboxed(&self) -> Option<PrimitiveType> {
        match self {
            JavaType::Primitive { name } => Some(*name),
            JavaType::Class { name, args } if args.is_empty() => {
                PrimitiveType::from_boxed_name(name)
            }
            _ => None,
        }
    }

    /// `boolean` or `java.lang.Boolean`.
    pub fn is_boolean(&self) -> bool {
        self.unboxed() == Some(PrimitiveType::Boolean)
    }

    /// Whether a value of this type is a `java.util.Map`.
    pub fn is_map_like(&self) -> bool {
        self.class_name().is_some_and(names::is_map_class)
    }

    /// Type without generic arguments; type variables erase to `Object`.
    ///
    /// Used wherever Java forbids parameterized types: `.class` literals,
    /// `instanceof` and array creation.
    pub fn erasure(&self) -> JavaType {
        match self {
            JavaType::Primitive { .. } => self.clone(),
            JavaType::Class { name, .. } => JavaType::class(name.clone()),
            JavaType::Array { element } => JavaType::array(element.erasure()),
            JavaType::Variable { .. } => JavaType::object(),
        }
    }

    /// Last segment of the class name (`java.util.List<X>` gives `List`).
    /// Nested classes written with `$` keep only the innermost part.
    pub fn simple_name(&self) -> String {
        match self {
            JavaType::Primitive { name } => name.keyword().to_string(),
            JavaType::Class { name, .. } => names::simple_name(name).to_string(),
            JavaType::Array { element } => format!("{}[]", element.simple_name()),
            JavaType::Variable { name } => name.clone(),
        }
    }

    /// Replace type variables bound in `bindings`.
    pub fn substitute(&self, bindings: &FxHashMap<String, JavaType>) -> JavaType {
        if bindings.is_empty() {
            return self.clone();
        }
        match self {
            JavaType::Variable { name } => bindings
                .get(name)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            JavaType::Class { name, args } => JavaType::Class {
                name: name.clone(),
                args: args.iter().map(|arg| arg.substitute(bindings)).collect(),
            },
            JavaType::Array { element } => JavaType::array(element.substitute(bindings)),
            JavaType::Primitive { .. } => self.clone(),
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Primitive { name } => f.write_str(name.keyword()),
            JavaType::Class { name, args } => {
                f.write_str(&name.replace('$', "."))?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{}", arg.boxed())?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            JavaType::Array { element } => write!(f, "{element}[]"),
            JavaType::Variable { name } => f.write_str(name),
        }
    }
}

#[cfg(test)]
#[path = "../tests/types.rs"]
mod tests;
