//! Expression node variants.
//!
//! # Node set
//!
//! | variant              | Groovy                       |
//! |----------------------|------------------------------|
//! | `Literal`            | `1`, `2L`, `1.5`, `'a'`      |
//! | `GString`            | `"Hello, ${name}"`           |
//! | `Reference`          | `a`, `a.b`                   |
//! | `This`               | `this`, `Outer.super`        |
//! | `Binary`             | `a + b`, `a <=> b`           |
//! | `Unary`              | `-a`, `i++`                  |
//! | `Assignment`         | `a = b`, `a += b`            |
//! | `MethodCall`         | `a.foo(1, x: 2)`             |
//! | `New`                | `new Point(x: 1)`, `new int[3]` |
//! | `Conditional`        | `c ? a : b`                  |
//! | `Cast` / `SafeCast`  | `(T) a`, `a as T`            |
//! | `InstanceOf`         | `a instanceof T`             |
//! | `List` / `Map`       | `[1, 2]`, `[a: 1]`           |
//! | `Range`              | `1..5`, `1..<5`              |
//! | `Index`              | `a[i]`                       |
//! | `Parenthesized`      | `(a)`                        |
//! | `BuiltinTypeClass`   | `int` used as a value        |
//! | `Closure`, `Regex`, `PropertySelection` | parsed, not lowered |

use g2j_common::{JavaType, PrimitiveType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of an expression inside an [`ExprArena`](crate::ExprArena).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExprId(pub u32);

impl ExprId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Literals
// =============================================================================

/// Literal values, already decoded by the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Literal {
    Int(i32),
    Long(i64),
    /// Digits of a `G`-suffixed integer.
    BigInteger(String),
    Float(f32),
    Double(f64),
    /// Digits of an unsuffixed decimal such as `1.5` (Groovy's default).
    BigDecimal(String),
    /// Decoded string contents, whatever the source quoting was.
    String(String),
    Char(char),
    Boolean(bool),
    Null,
}

/// One segment of an interpolated string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GStringPart {
    Text { text: String },
    Injection { expr: ExprId },
}

// =============================================================================
// Operators
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinaryOp {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Power,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Equal,
    NotEqual,
    Compare,
    Identical,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    In,
    RegexFind,
    RegexMatch,
}

impl BinaryOp {
    /// Source token, emitted verbatim when the operator is not rewritten.
    pub const fn token(self) -> &'static str {
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "**",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::UnsignedRightShift => ">>>",
            BinaryOp::Less => "<",
            BinaryOp::LessEq => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Compare => "<=>",
            BinaryOp::Identical => "===",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::In => "in",
            BinaryOp::RegexFind => "=~",
            BinaryOp::RegexMatch => "==~",
        }
    }

    /// Operators with no Java counterpart; their verbatim token does not
    /// compile as Java.
    pub const fn is_groovy_only(self) -> bool {
        matches!(
            self,
            BinaryOp::Power
                | BinaryOp::Compare
                | BinaryOp::Identical
                | BinaryOp::In
                | BinaryOp::RegexFind
                | BinaryOp::RegexMatch
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnaryOp {
    Negate,
    Plus,
    Not,
    BitwiseNot,
    Increment,
    Decrement,
}

impl UnaryOp {
    pub const fn token(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
            UnaryOp::BitwiseNot => "~",
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThisKeyword {
    This,
    Super,
}

impl ThisKeyword {
    pub const fn text(self) -> &'static str {
        match self {
            ThisKeyword::This => "this",
            ThisKeyword::Super => "super",
        }
    }
}

// =============================================================================
// Arguments
// =============================================================================

/// Label of a named argument: `x: 1` or `(key): 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ArgumentLabel {
    Name { name: String },
    Expression { expr: ExprId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArgument {
    /// `None` for a malformed argument the front end recovered from.
    #[serde(default)]
    pub label: Option<ArgumentLabel>,
    #[serde(default)]
    pub value: Option<ExprId>,
}

impl NamedArgument {
    pub fn named(name: impl Into<String>, value: ExprId) -> Self {
        Self {
            label: Some(ArgumentLabel::Name { name: name.into() }),
            value: Some(value),
        }
    }

    pub fn keyed(key: ExprId, value: ExprId) -> Self {
        Self {
            label: Some(ArgumentLabel::Expression { expr: key }),
            value: Some(value),
        }
    }

    pub fn label_name(&self) -> Option<&str> {
        match &self.label {
            Some(ArgumentLabel::Name { name }) => Some(name),
            _ => None,
        }
    }
}

/// Arguments of a call, `new` or index expression, split the way Groovy
/// passes them: positional, named (collected into a map) and trailing closures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgumentList {
    #[serde(default)]
    pub positional: Vec<ExprId>,
    #[serde(default)]
    pub named: Vec<NamedArgument>,
    #[serde(default)]
    pub closures: Vec<ExprId>,
}

impl ArgumentList {
    pub fn positional(args: Vec<ExprId>) -> Self {
        Self {
            positional: args,
            ..Self::default()
        }
    }

    pub fn with_named(mut self, named: Vec<NamedArgument>) -> Self {
        self.named = named;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty() && self.closures.is_empty()
    }
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Expr {
    Literal {
        value: Literal,
    },
    GString {
        parts: Vec<GStringPart>,
    },
    Reference {
        #[serde(default)]
        qualifier: Option<ExprId>,
        name: String,
    },
    This {
        keyword: ThisKeyword,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        /// Missing in recovered trees such as `a +`.
        #[serde(default)]
        right: Option<ExprId>,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
        #[serde(default)]
        postfix: bool,
    },
    /// `target = value`, or `target op= value` when `op` is set.
    Assignment {
        #[serde(default)]
        op: Option<BinaryOp>,
        target: ExprId,
        value: ExprId,
    },
    MethodCall {
        callee: ExprId,
        #[serde(default)]
        args: ArgumentList,
    },
    New {
        /// Outer instance for `outer.new Inner()`.
        #[serde(default)]
        qualifier: Option<ExprId>,
        #[serde(rename = "type")]
        ty: JavaType,
        #[serde(default)]
        args: Option<ArgumentList>,
        /// Dimension expressions; `Some(vec![])` is `new T[]`.
        #[serde(default)]
        array_dims: Option<Vec<ExprId>>,
        #[serde(default)]
        anonymous_body: bool,
    },
    Conditional {
        condition: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
    Cast {
        #[serde(rename = "type")]
        ty: JavaType,
        operand: ExprId,
    },
    SafeCast {
        #[serde(rename = "type")]
        ty: JavaType,
        operand: ExprId,
    },
    InstanceOf {
        operand: ExprId,
        #[serde(rename = "type")]
        ty: JavaType,
    },
    List {
        #[serde(default)]
        elements: Vec<ExprId>,
    },
    Map {
        #[serde(default)]
        entries: Vec<NamedArgument>,
    },
    Range {
        from: ExprId,
        #[serde(default)]
        to: Option<ExprId>,
        #[serde(default)]
        exclusive: bool,
    },
    Index {
        target: ExprId,
        #[serde(default)]
        args: ArgumentList,
    },
    Parenthesized {
        #[serde(default)]
        operand: Option<ExprId>,
    },
    BuiltinTypeClass {
        primitive: PrimitiveType,
    },
    Closure {
        #[serde(default)]
        parameters: Vec<String>,
    },
    Regex {
        pattern: String,
    },
    PropertySelection {
        qualifier: ExprId,
        selector: ExprId,
    },
}

impl Expr {
    /// Human-readable variant name, used in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Expr::Literal { .. } => "literal",
            Expr::GString { .. } => "GString",
            Expr::Reference { .. } => "reference",
            Expr::This { .. } => "this reference",
            Expr::Binary { .. } => "binary expression",
            Expr::Unary { .. } => "unary expression",
            Expr::Assignment { .. } => "assignment",
            Expr::MethodCall { .. } => "method call",
            Expr::New { .. } => "new expression",
            Expr::Conditional { .. } => "conditional expression",
            Expr::Cast { .. } => "cast",
            Expr::SafeCast { .. } => "safe cast",
            Expr::InstanceOf { .. } => "instanceof",
            Expr::List { .. } => "list literal",
            Expr::Map { .. } => "map literal",
            Expr::Range { .. } => "range",
            Expr::Index { .. } => "index expression",
            Expr::Parenthesized { .. } => "parenthesized expression",
            Expr::BuiltinTypeClass { .. } => "builtin type class",
            Expr::Closure { .. } => "closure",
            Expr::Regex { .. } => "regex",
            Expr::PropertySelection { .. } => "property selection",
        }
    }

    /// Direct sub-expressions in source order.
    pub fn children(&self) -> Vec<ExprId> {
        fn push_args(out: &mut Vec<ExprId>, args: &ArgumentList) {
            out.extend(args.positional.iter().copied());
            for named in &args.named {
                push_named(out, named);
            }
            out.extend(args.closures.iter().copied());
        }
        fn push_named(out: &mut Vec<ExprId>, named: &NamedArgument) {
            if let Some(ArgumentLabel::Expression { expr }) = named.label {
                out.push(expr);
            }
            out.extend(named.value);
        }

        let mut out = Vec::new();
        match self {
            Expr::Literal { .. }
            | Expr::This { .. }
            | Expr::BuiltinTypeClass { .. }
            | Expr::Closure { .. }
            | Expr::Regex { .. } => {}
            Expr::GString { parts } => {
                for part in parts {
                    if let GStringPart::Injection { expr } = part {
                        out.push(*expr);
                    }
                }
            }
            Expr::Reference { qualifier, .. } => out.extend(*qualifier),
            Expr::Binary { left, right, .. } => {
                out.push(*left);
                out.extend(*right);
            }
            Expr::Unary { operand, .. } => out.push(*operand),
            Expr::Assignment { target, value, .. } => {
                out.push(*target);
                out.push(*value);
            }
            Expr::MethodCall { callee, args } => {
                out.push(*callee);
                push_args(&mut out, args);
            }
            Expr::New {
                qualifier,
                args,
                array_dims,
                ..
            } => {
                out.extend(*qualifier);
                if let Some(args) = args {
                    push_args(&mut out, args);
                }
                if let Some(dims) = array_dims {
                    out.extend(dims.iter().copied());
                }
            }
            Expr::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                out.push(*condition);
                out.push(*then_branch);
                out.push(*else_branch);
            }
            Expr::Cast { operand, .. }
            | Expr::SafeCast { operand, .. }
            | Expr::InstanceOf { operand, .. } => out.push(*operand),
            Expr::List { elements } => out.extend(elements.iter().copied()),
            Expr::Map { entries } => {
                for entry in entries {
                    push_named(&mut out, entry);
                }
            }
            Expr::Range { from, to, .. } => {
                out.push(*from);
                out.extend(*to);
            }
            Expr::Index { target, args } => {
                out.push(*target);
                push_args(&mut out, args);
            }
            Expr::Parenthesized { operand } => out.extend(*operand),
            Expr::PropertySelection {
                qualifier,
                selector,
            } => {
                out.push(*qualifier);
                out.push(*selector);
            }
        }
        out
    }
}
