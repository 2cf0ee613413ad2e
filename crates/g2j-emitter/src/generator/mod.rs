//! Node-to-text dispatcher.
//!
//! [`ExpressionGenerator`] walks one expression tree and writes Java text
//! into its [`SourceWriter`], pushing any statements that must run first
//! into the [`ExpressionContext`]. Each variant is lowered by an `emit_*`
//! method in the submodule for its family:
//!
//! - `literals`: literals, GStrings, builtin type classes
//! - `operators`: binary, unary, assignment, conditional, casts
//! - `references`: references and `this`/`super`
//! - `calls`: method calls, index access, argument lists
//! - `new_expression`: constructor calls and field-init lowering
//! - `collections`: list and map literals, ranges

use g2j_ast::{BinaryOp, Expr, ExprArena, ExprId, Literal};
use g2j_resolver::{Resolved, Resolver};
use tracing::trace;

use crate::context::ExpressionContext;
use crate::error::LowerError;
use crate::source_writer::SourceWriter;

mod calls;
mod collections;
mod literals;
mod new_expression;
mod operators;
mod references;

pub(crate) use calls::Operand;

/// Java operator precedence levels, loosest first.
pub(crate) mod precedence {
    pub const LOWEST: u8 = 0;
    pub const ASSIGNMENT: u8 = 1;
    pub const CONDITIONAL: u8 = 2;
    pub const LOGICAL_OR: u8 = 3;
    pub const LOGICAL_AND: u8 = 4;
    pub const BIT_OR: u8 = 5;
    pub const BIT_XOR: u8 = 6;
    pub const BIT_AND: u8 = 7;
    pub const EQUALITY: u8 = 8;
    pub const RELATIONAL: u8 = 9;
    pub const SHIFT: u8 = 10;
    pub const ADDITIVE: u8 = 11;
    pub const MULTIPLICATIVE: u8 = 12;
    pub const UNARY: u8 = 13;
    pub const POSTFIX: u8 = 14;
    pub const PRIMARY: u8 = 15;
}

pub struct ExpressionGenerator<'a> {
    arena: &'a ExprArena,
    resolver: &'a dyn Resolver,
    ctx: &'a mut ExpressionContext,
    writer: SourceWriter,
}

impl<'a> ExpressionGenerator<'a> {
    pub fn new(
        arena: &'a ExprArena,
        resolver: &'a dyn Resolver,
        ctx: &'a mut ExpressionContext,
    ) -> Self {
        ExpressionGenerator {
            arena,
            resolver,
            ctx,
            writer: SourceWriter::new(),
        }
    }

    /// The text written so far.
    pub fn finish(self) -> String {
        self.writer.into_string()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Lower `expr` into the output buffer.
    pub fn generate(&mut self, expr: ExprId) -> Result<(), LowerError> {
        let node = self.node(expr)?;
        self.ctx.mark_visited(expr)?;
        self.ctx.enter(expr)?;
        let result = self.dispatch(expr, node);
        self.ctx.exit();
        result
    }

    fn dispatch(&mut self, id: ExprId, expr: &'a Expr) -> Result<(), LowerError> {
        match expr {
            Expr::Literal { value } => self.emit_literal(id, value),
            Expr::GString { parts } => self.emit_gstring(parts),
            Expr::Reference { qualifier, name } => self.emit_reference(id, *qualifier, name),
            Expr::This { keyword } => self.emit_this(id, *keyword),
            Expr::Binary { op, left, right } => self.emit_binary(id, *op, *left, *right),
            Expr::Unary {
                op,
                operand,
                postfix,
            } => self.emit_unary(id, *op, *operand, *postfix),
            Expr::Assignment { op, target, value } => {
                self.emit_assignment(id, *op, *target, *value)
            }
            Expr::MethodCall { callee, args } => self.emit_method_call(id, *callee, args),
            Expr::New {
                qualifier,
                ty,
                args,
                array_dims,
                anonymous_body,
            } => {
                if *anonymous_body {
                    return Err(self.unsupported(id, "anonymous class body"));
                }
                self.emit_new(id, *qualifier, ty, args.as_ref(), array_dims.as_deref())
            }
            Expr::Conditional {
                condition,
                then_branch,
                else_branch,
            } => self.emit_conditional(*condition, *then_branch, *else_branch),
            Expr::Cast { ty, operand } => self.emit_cast(ty, *operand),
            Expr::SafeCast { ty, operand } => self.emit_safe_cast(id, ty, *operand),
            Expr::InstanceOf { operand, ty } => self.emit_instance_of(*operand, ty),
            Expr::List { elements } => self.emit_list(id, elements),
            Expr::Map { entries } => self.emit_map(id, entries),
            Expr::Range {
                from,
                to,
                exclusive,
            } => self.emit_range(id, *from, *to, *exclusive),
            Expr::Index { target, args } => self.emit_index(id, *target, args),
            Expr::Parenthesized { operand } => {
                let operand = operand.ok_or(LowerError::Malformed {
                    expr: id,
                    reason: "empty parentheses",
                })?;
                self.write("(");
                self.generate(operand)?;
                self.write(")");
                Ok(())
            }
            Expr::BuiltinTypeClass { primitive } => {
                self.write(primitive.boxed_name());
                self.write(".class");
                Ok(())
            }
            Expr::Closure { .. } | Expr::Regex { .. } | Expr::PropertySelection { .. } => {
                Err(self.unsupported(id, expr.kind_name()))
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    pub(crate) fn node(&self, expr: ExprId) -> Result<&'a Expr, LowerError> {
        let arena: &'a ExprArena = self.arena;
        arena.get(expr).ok_or(LowerError::MissingNode { expr })
    }

    pub(crate) fn unsupported(&self, expr: ExprId, construct: &'static str) -> LowerError {
        LowerError::Unsupported {
            construct,
            expr,
            span: self.arena.span(expr),
        }
    }

    #[inline]
    pub(crate) fn write(&mut self, text: &str) {
        self.writer.write(text);
    }

    /// Run `f` against a fresh buffer and return what it wrote. Hoisted
    /// statements still go to the shared context.
    pub(crate) fn with_buffer<F>(&mut self, f: F) -> Result<String, LowerError>
    where
        F: FnOnce(&mut Self) -> Result<(), LowerError>,
    {
        let saved = std::mem::take(&mut self.writer);
        let result = f(self);
        let written = std::mem::replace(&mut self.writer, saved);
        result.map(|()| written.into_string())
    }

    pub(crate) fn generate_to_string(&mut self, expr: ExprId) -> Result<String, LowerError> {
        self.with_buffer(|g| g.generate(expr))
    }

    /// Lower `expr`, parenthesized when it binds looser than `min`.
    pub(crate) fn generate_operand(&mut self, expr: ExprId, min: u8) -> Result<(), LowerError> {
        if self.precedence(expr)? < min {
            self.write("(");
            self.generate(expr)?;
            self.write(")");
            Ok(())
        } else {
            self.generate(expr)
        }
    }

    /// Mark every node under `root` as consumed without lowering it.
    pub(crate) fn discard_subtree(&mut self, root: ExprId) -> Result<(), LowerError> {
        trace!(%root, "discarding subtree");
        for id in self.arena.subtree(root) {
            self.ctx.mark_visited(id)?;
        }
        Ok(())
    }

    /// The unique method `expr` resolves to, ignoring builtin operations.
    pub(crate) fn resolved_method(&self, expr: ExprId) -> Option<g2j_resolver::MethodRef> {
        self.resolver.resolve(expr).unique_method().cloned()
    }

    // =========================================================================
    // Precedence
    // =========================================================================

    /// Precedence of the Java text `expr` lowers to.
    pub(crate) fn precedence(&self, expr: ExprId) -> Result<u8, LowerError> {
        use precedence::*;

        let level = match self.node(expr)? {
            Expr::Literal { value } => match value {
                Literal::Int(v) if *v < 0 && *v != i32::MIN => UNARY,
                Literal::Long(v) if *v < 0 && *v != i64::MIN => UNARY,
                Literal::Float(v) if v.is_finite() && v.is_sign_negative() => UNARY,
                Literal::Double(v) if v.is_finite() && v.is_sign_negative() => UNARY,
                _ => PRIMARY,
            },
            Expr::GString { parts } => {
                if literals::is_plain_text(parts) {
                    PRIMARY
                } else {
                    ADDITIVE
                }
            }
            Expr::Binary { op, .. } => {
                if self.resolved_method(expr).is_some() {
                    PRIMARY
                } else {
                    binary_precedence(*op)
                }
            }
            Expr::Unary { postfix, .. } => {
                if self.resolved_method(expr).is_some() {
                    PRIMARY
                } else if *postfix {
                    POSTFIX
                } else {
                    UNARY
                }
            }
            Expr::Assignment { op, target, .. } => {
                let setter = op.is_none()
                    && matches!(self.node(*target)?, Expr::Reference { .. })
                    && matches!(
                        self.resolver.resolve(*target).unique(),
                        Some(Resolved::Setter(_))
                    );
                if setter { PRIMARY } else { ASSIGNMENT }
            }
            Expr::Conditional { .. } => CONDITIONAL,
            Expr::Cast { .. } => UNARY,
            Expr::SafeCast { .. } => {
                if self.resolved_method(expr).is_some() {
                    PRIMARY
                } else {
                    UNARY
                }
            }
            Expr::InstanceOf { .. } => RELATIONAL,
            Expr::Reference { .. }
            | Expr::This { .. }
            | Expr::MethodCall { .. }
            | Expr::New { .. }
            | Expr::List { .. }
            | Expr::Map { .. }
            | Expr::Range { .. }
            | Expr::Index { .. }
            | Expr::Parenthesized { .. }
            | Expr::BuiltinTypeClass { .. }
            | Expr::Closure { .. }
            | Expr::Regex { .. }
            | Expr::PropertySelection { .. } => PRIMARY,
        };
        Ok(level)
    }
}

/// Java precedence of a binary operator written verbatim. Groovy-only
/// operators take the level of the Java operator they sit next to.
pub(crate) const fn binary_precedence(op: BinaryOp) -> u8 {
    use precedence::*;

    match op {
        BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo | BinaryOp::Power => {
            MULTIPLICATIVE
        }
        BinaryOp::Plus | BinaryOp::Minus => ADDITIVE,
        BinaryOp::LeftShift | BinaryOp::RightShift | BinaryOp::UnsignedRightShift => SHIFT,
        BinaryOp::Less
        | BinaryOp::LessEq
        | BinaryOp::Greater
        | BinaryOp::GreaterEq
        | BinaryOp::Compare
        | BinaryOp::In => RELATIONAL,
        BinaryOp::Equal
        | BinaryOp::NotEqual
        | BinaryOp::Identical
        | BinaryOp::RegexFind
        | BinaryOp::RegexMatch => EQUALITY,
        BinaryOp::BitAnd => BIT_AND,
        BinaryOp::BitXor => BIT_XOR,
        BinaryOp::BitOr => BIT_OR,
        BinaryOp::And => LOGICAL_AND,
        BinaryOp::Or => LOGICAL_OR,
    }
}
