use g2j_ast::{BinaryOp, Expr, ExprId, UnaryOp};
use g2j_common::JavaType;
use g2j_resolver::Resolved;
use tracing::{debug, warn};

use super::precedence;
use super::{ExpressionGenerator, Operand, binary_precedence};
use crate::error::LowerError;

impl<'a> ExpressionGenerator<'a> {
    // =========================================================================
    // Binary and unary operators
    // =========================================================================

    /// `a + b` becomes `a.plus(b)` when `+` resolves to a method, else stays.
    pub(super) fn emit_binary(
        &mut self,
        id: ExprId,
        op: BinaryOp,
        left: ExprId,
        right: Option<ExprId>,
    ) -> Result<(), LowerError> {
        if let Some(method) = self.resolved_method(id) {
            let right = right.map_or_else(|| Operand::text("null"), Operand::Expr);
            let receiver = Some(Operand::Expr(left));
            return self.invoke_method_on(id, &method, receiver, vec![right], &[]);
        }
        self.log_verbatim(id, op.token());
        if op.is_groovy_only() {
            warn!(%id, token = op.token(), "unresolved Groovy operator emitted verbatim");
        }

        let right = right.ok_or(LowerError::Malformed {
            expr: id,
            reason: "binary expression without right operand",
        })?;
        let level = binary_precedence(op);
        self.generate_operand(left, level)?;
        self.write(" ");
        self.write(op.token());
        self.write(" ");
        self.generate_operand(right, level + 1)
    }

    pub(super) fn emit_unary(
        &mut self,
        id: ExprId,
        op: UnaryOp,
        operand: ExprId,
        postfix: bool,
    ) -> Result<(), LowerError> {
        if let Some(method) = self.resolved_method(id) {
            let receiver = Some(Operand::Expr(operand));
            return self.invoke_method_on(id, &method, receiver, Vec::new(), &[]);
        }
        self.log_verbatim(id, op.token());

        if postfix {
            self.generate_operand(operand, precedence::POSTFIX)?;
            self.write(op.token());
            return Ok(());
        }
        let token = op.token();
        let text = self.with_buffer(|g| g.generate_operand(operand, precedence::UNARY))?;
        self.write(token);
        // `- -x`, `+ ++x`
        if let (Some(last), Some(first)) = (token.chars().last(), text.chars().next())
            && last == first
            && matches!(first, '+' | '-')
        {
            self.write(" ");
        }
        self.write(&text);
        Ok(())
    }

    fn log_verbatim(&self, id: ExprId, token: &str) {
        if self.resolver.resolve(id).is_ambiguous() {
            debug!(%id, token, "ambiguous operator, emitted verbatim");
        }
    }

    // =========================================================================
    // Assignment
    // =========================================================================

    /// `p.x = v` becomes `p.setX(v)` when `x` resolves to a setter.
    pub(super) fn emit_assignment(
        &mut self,
        id: ExprId,
        op: Option<BinaryOp>,
        target: ExprId,
        value: ExprId,
    ) -> Result<(), LowerError> {
        let resolution = self.resolver.resolve(target);
        if op.is_none()
            && let Some(Resolved::Setter(setter)) = resolution.unique()
            && let Expr::Reference { qualifier, .. } = self.node(target)?
        {
            self.ctx.mark_visited(target)?;
            let receiver = self.receiver_for(&setter.method, *qualifier)?;
            return self.invoke_method_on(id, setter, receiver, vec![Operand::Expr(value)], &[]);
        }

        self.generate_operand(target, precedence::POSTFIX)?;
        self.write(" ");
        if let Some(op) = op {
            self.write(op.token());
        }
        self.write("= ");
        self.generate_operand(value, precedence::ASSIGNMENT)
    }

    // =========================================================================
    // Conditional
    // =========================================================================

    pub(super) fn emit_conditional(
        &mut self,
        condition: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    ) -> Result<(), LowerError> {
        self.emit_condition(condition)?;
        self.write(" ? ");
        self.generate_operand(then_branch, precedence::LOWEST)?;
        self.write(" : ");
        self.generate_operand(else_branch, precedence::CONDITIONAL)
    }

    /// A condition whose type is known and not boolean is converted with
    /// its `asBoolean` method when exactly one applies.
    fn emit_condition(&mut self, condition: ExprId) -> Result<(), LowerError> {
        if let Some(ty) = self.resolver.type_of(condition)
            && !ty.is_boolean()
            && let Some(as_boolean) = self
                .resolver
                .method_candidates(&ty, "asBoolean")
                .unique_method()
                .cloned()
        {
            debug!(%condition, %ty, "converting condition with asBoolean");
            let receiver = Some(Operand::Expr(condition));
            return self.invoke_method_on(condition, &as_boolean, receiver, Vec::new(), &[]);
        }
        self.generate_operand(condition, precedence::LOGICAL_OR)
    }

    // =========================================================================
    // Casts and type checks
    // =========================================================================

    pub(super) fn emit_cast(&mut self, ty: &JavaType, operand: ExprId) -> Result<(), LowerError> {
        self.write("(");
        self.write(&ty.to_string());
        self.write(") ");
        // `(Integer) -x` parses as a subtraction; only primitive casts take
        // a signed operand.
        let min = if ty.is_primitive() {
            precedence::UNARY
        } else {
            precedence::POSTFIX
        };
        self.generate_operand(operand, min)
    }

    /// `x as T` becomes `x.asType(T.class)` when `asType` resolves.
    pub(super) fn emit_safe_cast(
        &mut self,
        id: ExprId,
        ty: &JavaType,
        operand: ExprId,
    ) -> Result<(), LowerError> {
        let Some(as_type) = self.resolved_method(id) else {
            return self.emit_cast(ty, operand);
        };
        let class_literal = Operand::typed(
            format!("{}.class", ty.erasure()),
            JavaType::generic("java.lang.Class", vec![ty.boxed()]),
        );
        let receiver = Some(Operand::Expr(operand));
        self.invoke_method_on(id, &as_type, receiver, vec![class_literal], &[])
    }

    pub(super) fn emit_instance_of(
        &mut self,
        operand: ExprId,
        ty: &JavaType,
    ) -> Result<(), LowerError> {
        self.generate_operand(operand, precedence::RELATIONAL)?;
        self.write(" instanceof ");
        self.write(&ty.erasure().to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/operators.rs"]
mod tests;
