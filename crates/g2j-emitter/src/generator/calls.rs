use g2j_ast::{ArgumentList, Expr, ExprId, NamedArgument};
use g2j_common::JavaType;
use g2j_resolver::{MethodInfo, MethodRef, ParamInfo, Resolved};
use tracing::debug;

use super::ExpressionGenerator;
use super::precedence;
use crate::error::LowerError;

/// A value passed to a generated call: either a node still to be lowered or
/// text the generator produced itself (a temporary's name, `T.class`).
#[derive(Debug, Clone)]
pub(crate) enum Operand {
    Expr(ExprId),
    Text { text: String, ty: Option<JavaType> },
}

impl Operand {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Operand::Text {
            text: text.into(),
            ty: None,
        }
    }

    pub(crate) fn typed(text: impl Into<String>, ty: JavaType) -> Self {
        Operand::Text {
            text: text.into(),
            ty: Some(ty),
        }
    }
}

/// An operand after lowering, with its static type when known.
#[derive(Debug, Clone)]
pub(crate) struct Rendered {
    pub text: String,
    pub ty: Option<JavaType>,
}

impl<'a> ExpressionGenerator<'a> {
    // =========================================================================
    // Method calls
    // =========================================================================

    pub(super) fn emit_method_call(
        &mut self,
        id: ExprId,
        callee: ExprId,
        args: &'a ArgumentList,
    ) -> Result<(), LowerError> {
        self.reject_closures(&args.closures)?;
        let positional: Vec<Operand> =
            args.positional.iter().copied().map(Operand::Expr).collect();

        let Expr::Reference { qualifier, name } = self.node(callee)? else {
            // `(expr)(args)`, `f()(args)`
            return self.invoke_by_name(
                Some(Operand::Expr(callee)),
                "call",
                positional,
                &args.named,
                id,
            );
        };

        let resolution = self.resolver.resolve(callee);
        match resolution.unique() {
            Some(Resolved::Method(method)) => {
                self.ctx.mark_visited(callee)?;
                let receiver = self.receiver_for(&method.method, *qualifier)?;
                self.invoke_method_on(id, method, receiver, positional, &args.named)
            }
            Some(_) => {
                // A property or class holding something callable.
                self.invoke_by_name(
                    Some(Operand::Expr(callee)),
                    "call",
                    positional,
                    &args.named,
                    id,
                )
            }
            None => {
                if resolution.is_ambiguous() {
                    debug!(%id, method = %name, "ambiguous call, emitted verbatim");
                }
                self.ctx.mark_visited(callee)?;
                let receiver = qualifier.map(Operand::Expr);
                self.invoke_by_name(receiver, name, positional, &args.named, id)
            }
        }
    }

    /// `a[i]`: plain array access, a resolved `getAt`, or `getAt` by name.
    pub(super) fn emit_index(
        &mut self,
        id: ExprId,
        target: ExprId,
        args: &'a ArgumentList,
    ) -> Result<(), LowerError> {
        self.reject_closures(&args.closures)?;
        let resolution = self.resolver.resolve(id);
        match resolution.unique() {
            Some(Resolved::Builtin) => {
                let [index] = args.positional.as_slice() else {
                    return Err(LowerError::Malformed {
                        expr: id,
                        reason: "array access needs exactly one index",
                    });
                };
                if !args.named.is_empty() {
                    return Err(LowerError::Malformed {
                        expr: id,
                        reason: "array access with named arguments",
                    });
                }
                self.generate_operand(target, precedence::PRIMARY)?;
                self.write("[");
                self.generate(*index)?;
                self.write("]");
                Ok(())
            }
            Some(Resolved::Method(method)) => {
                let positional = args.positional.iter().copied().map(Operand::Expr).collect();
                let receiver = Some(Operand::Expr(target));
                self.invoke_method_on(id, method, receiver, positional, &args.named)
            }
            _ => {
                let positional = args.positional.iter().copied().map(Operand::Expr).collect();
                let receiver = Some(Operand::Expr(target));
                self.invoke_by_name(receiver, "getAt", positional, &args.named, id)
            }
        }
    }

    // =========================================================================
    // Invocation
    // =========================================================================

    /// Receiver to pass for `method` called through `qualifier`. A static
    /// method of a known class drops its qualifier, which only named the class.
    pub(crate) fn receiver_for(
        &mut self,
        method: &MethodInfo,
        qualifier: Option<ExprId>,
    ) -> Result<Option<Operand>, LowerError> {
        let drops_qualifier =
            method.is_static && !method.is_gdk_instance() && method.containing_class.is_some();
        match qualifier {
            Some(qualifier) if drops_qualifier => {
                self.discard_subtree(qualifier)?;
                Ok(None)
            }
            other => Ok(other.map(Operand::Expr)),
        }
    }

    /// Call a resolved method.
    ///
    /// - GDK instance methods become `Owner.name(receiver[, namedArgs], args)`.
    /// - Static methods of a known class become `pkg.Class.name(args)`; a
    ///   receiver, if one is given, is passed as the first argument.
    /// - Everything else is `receiver.name(args)`, or `name(args)` with an
    ///   implicit receiver.
    ///
    /// Named arguments are collected into a hoisted map passed first.
    pub(crate) fn invoke_method_on(
        &mut self,
        at: ExprId,
        method: &MethodRef,
        receiver: Option<Operand>,
        args: Vec<Operand>,
        named: &[NamedArgument],
    ) -> Result<(), LowerError> {
        let info = &method.method;
        let as_argument =
            info.is_gdk_instance() || (info.is_static && info.containing_class.is_some());
        let receiver_min = if as_argument {
            precedence::LOWEST
        } else {
            precedence::PRIMARY
        };
        let receiver = receiver
            .map(|receiver| self.render_operand(receiver, receiver_min))
            .transpose()?;
        let arguments = self.render_call_arguments(at, args, named)?;

        if info.is_gdk_instance() {
            let Some(receiver) = receiver else {
                return Err(LowerError::MissingReceiver {
                    method: info.name.clone(),
                    expr: at,
                });
            };
            let receiver_ty = receiver.ty.clone().unwrap_or_else(JavaType::object);
            let static_form = info.gdk_static_form(receiver_ty, !named.is_empty());
            let signature =
                MethodRef::with_substitutor(static_form.clone(), method.substitutor.clone())
                    .signature();
            let mut all = Vec::with_capacity(arguments.len() + 1);
            all.push(receiver);
            all.extend(arguments);
            self.write_static_target(&static_form);
            self.write_argument_list(&signature, all);
            return Ok(());
        }

        let signature = method.signature();
        if as_argument {
            let mut all = Vec::with_capacity(arguments.len() + 1);
            all.extend(receiver);
            all.extend(arguments);
            self.write_static_target(info);
            self.write_argument_list(&signature, all);
        } else {
            if let Some(receiver) = receiver {
                self.write(&receiver.text);
                self.write(".");
            }
            self.write(&info.name);
            self.write_argument_list(&signature, arguments);
        }
        Ok(())
    }

    /// Call `name` without a resolved target: `receiver.name(args)`.
    pub(crate) fn invoke_by_name(
        &mut self,
        receiver: Option<Operand>,
        name: &str,
        args: Vec<Operand>,
        named: &[NamedArgument],
        at: ExprId,
    ) -> Result<(), LowerError> {
        let receiver = receiver
            .map(|receiver| self.render_operand(receiver, precedence::PRIMARY))
            .transpose()?;
        let arguments = self.render_call_arguments(at, args, named)?;
        if let Some(receiver) = receiver {
            self.write(&receiver.text);
            self.write(".");
        }
        self.write(name);
        self.write_argument_list(&[], arguments);
        Ok(())
    }

    fn write_static_target(&mut self, method: &MethodInfo) {
        if let Some(class) = &method.containing_class {
            self.write(&JavaType::class(class.as_str()).to_string());
            self.write(".");
        }
        self.write(&method.name);
    }

    // =========================================================================
    // Arguments
    // =========================================================================

    pub(crate) fn render_operand(
        &mut self,
        operand: Operand,
        min: u8,
    ) -> Result<Rendered, LowerError> {
        match operand {
            Operand::Expr(expr) => {
                let ty = self.resolver.type_of(expr);
                let text = self.with_buffer(|g| g.generate_operand(expr, min))?;
                Ok(Rendered { text, ty })
            }
            Operand::Text { text, ty } => Ok(Rendered { text, ty }),
        }
    }

    /// Lower positional arguments in order, then hoist the named-argument
    /// map (if any) and put it first.
    pub(crate) fn render_call_arguments(
        &mut self,
        at: ExprId,
        args: Vec<Operand>,
        named: &[NamedArgument],
    ) -> Result<Vec<Rendered>, LowerError> {
        let mut rendered = Vec::with_capacity(args.len() + 1);
        for arg in args {
            rendered.push(self.render_operand(arg, precedence::LOWEST)?);
        }
        if !named.is_empty() {
            let map = self.hoist_named_argument_map(at, named)?;
            rendered.insert(0, map);
        }
        Ok(rendered)
    }

    pub(crate) fn write_argument_list(&mut self, signature: &[ParamInfo], args: Vec<Rendered>) {
        self.write("(");
        self.write(&pack_varargs(signature, args).join(", "));
        self.write(")");
    }

    pub(crate) fn reject_closures(&self, closures: &[ExprId]) -> Result<(), LowerError> {
        match closures.first() {
            Some(&closure) => Err(self.unsupported(closure, "closure argument")),
            None => Ok(()),
        }
    }
}

/// Wrap trailing arguments of a varargs call in an explicit array.
///
/// Arguments pass through unchanged when the signature is not varargs, when
/// there are too few arguments to reach the varargs slot, or when exactly one
/// value fills that slot and it is an array (or of unknown type).
pub(crate) fn pack_varargs(signature: &[ParamInfo], args: Vec<Rendered>) -> Vec<String> {
    let Some(last) = signature.last().filter(|param| param.varargs) else {
        return args.into_iter().map(|arg| arg.text).collect();
    };
    let fixed = signature.len() - 1;
    let passes_array = args.len() == signature.len()
        && args[fixed].ty.as_ref().is_none_or(JavaType::is_array);
    if args.len() < fixed || passes_array {
        return args.into_iter().map(|arg| arg.text).collect();
    }

    let element = last
        .ty
        .element_type()
        .map_or_else(JavaType::object, JavaType::erasure);
    let mut texts: Vec<String> = args.into_iter().map(|arg| arg.text).collect();
    let rest = texts.split_off(fixed).join(", ");
    texts.push(format!("new {element}[]{{{rest}}}"));
    texts
}

#[cfg(test)]
#[path = "../../tests/calls.rs"]
mod tests;
