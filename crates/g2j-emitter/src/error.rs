//! Lowering errors.

use g2j_ast::ExprId;
use g2j_common::Span;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LowerError {
    /// The node kind (or one of its forms) has no Java lowering.
    Unsupported {
        construct: &'static str,
        expr: ExprId,
        span: Option<Span>,
    },
    /// An id that is not in the arena.
    MissingNode { expr: ExprId },
    /// The tree is structurally incomplete (recovered parse).
    Malformed { expr: ExprId, reason: &'static str },
    /// An instance-style GDK call with nothing to pass as the receiver.
    MissingReceiver { method: String, expr: ExprId },
    /// The same node was reached twice in one pass.
    RepeatedVisit { expr: ExprId },
    TooDeep { limit: u32, expr: ExprId },
    /// No free temporary name was found.
    NamesExhausted { base: String },
}

impl LowerError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, LowerError::Unsupported { .. })
    }

    /// The node the error was raised at, when there is one.
    pub fn expr(&self) -> Option<ExprId> {
        match self {
            LowerError::Unsupported { expr, .. }
            | LowerError::MissingNode { expr }
            | LowerError::Malformed { expr, .. }
            | LowerError::MissingReceiver { expr, .. }
            | LowerError::RepeatedVisit { expr }
            | LowerError::TooDeep { expr, .. } => Some(*expr),
            LowerError::NamesExhausted { .. } => None,
        }
    }
}

impl fmt::Display for LowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowerError::Unsupported {
                construct,
                expr,
                span,
            } => {
                write!(f, "unsupported construct: {construct} at node {expr}")?;
                if let Some(span) = span {
                    write!(f, " ({span})")?;
                }
                Ok(())
            }
            LowerError::MissingNode { expr } => write!(f, "node {expr} is not in the arena"),
            LowerError::Malformed { expr, reason } => {
                write!(f, "malformed expression at node {expr}: {reason}")
            }
            LowerError::MissingReceiver { method, expr } => write!(
                f,
                "instance call of '{method}' at node {expr} has no receiver"
            ),
            LowerError::RepeatedVisit { expr } => {
                write!(f, "node {expr} was visited twice in one lowering pass")
            }
            LowerError::TooDeep { limit, expr } => write!(
                f,
                "expression nesting exceeds {limit} levels at node {expr}"
            ),
            LowerError::NamesExhausted { base } => {
                write!(f, "no free temporary name derived from '{base}'")
            }
        }
    }
}

impl std::error::Error for LowerError {}
