use g2j_ast::{ArgumentLabel, ArgumentList, ExprId, NamedArgument};
use g2j_common::JavaType;
use g2j_resolver::MethodRef;
use tracing::debug;

use super::calls::{Rendered, pack_varargs};
use super::{ExpressionGenerator, Operand, precedence};
use crate::error::LowerError;

impl<'a> ExpressionGenerator<'a> {
    // =========================================================================
    // Constructor calls
    // =========================================================================

    pub(super) fn emit_new(
        &mut self,
        id: ExprId,
        qualifier: Option<ExprId>,
        ty: &JavaType,
        args: Option<&'a ArgumentList>,
        array_dims: Option<&'a [ExprId]>,
    ) -> Result<(), LowerError> {
        if let Some(dims) = array_dims {
            if qualifier.is_some() {
                return Err(LowerError::Malformed {
                    expr: id,
                    reason: "qualified array creation",
                });
            }
            return self.emit_new_array(ty, dims);
        }

        let (positional, named): (&[ExprId], &[NamedArgument]) = match args {
            Some(args) => {
                self.reject_closures(&args.closures)?;
                (&args.positional, &args.named)
            }
            None => (&[], &[]),
        };
        let constructor = self.resolved_method(id);

        let outer = qualifier
            .map(|q| self.with_buffer(|g| g.generate_operand(q, precedence::PRIMARY)))
            .transpose()?;

        let takes_map = constructor
            .as_ref()
            .is_some_and(|ctor| ctor.method.accepts_leading_map());
        if !named.is_empty() && !takes_map && matches!(ty, JavaType::Class { .. }) {
            let outer = outer.as_deref();
            return self.emit_field_init(id, outer, ty, constructor.as_ref(), positional, named);
        }

        let operands = positional.iter().copied().map(Operand::Expr).collect();
        let arguments = self.render_call_arguments(id, operands, named)?;

        if let Some(outer) = outer {
            // Inner classes are named by their simple name after `outer.new`.
            self.write(&outer);
            self.write(".new ");
            self.write(&ty.simple_name());
        } else {
            self.write("new ");
            self.write(&ty.boxed().to_string());
        }
        let signature = constructor.map(|ctor| ctor.signature()).unwrap_or_default();
        self.write_argument_list(&signature, arguments);
        Ok(())
    }

    /// `new T[a][b]`; an element type that is itself an array contributes
    /// trailing `[]` after the given dimensions.
    fn emit_new_array(&mut self, element: &JavaType, dims: &[ExprId]) -> Result<(), LowerError> {
        let mut base = element;
        let mut extra = 0usize;
        while let JavaType::Array { element } = base {
            base = element;
            extra += 1;
        }

        self.write("new ");
        self.write(&base.erasure().to_string());
        if dims.is_empty() {
            self.write("[]");
        }
        for &dim in dims {
            self.write("[");
            self.generate(dim)?;
            self.write("]");
        }
        for _ in 0..extra {
            self.write("[]");
        }
        Ok(())
    }

    // =========================================================================
    // Field-init lowering
    // =========================================================================

    /// `new Point(x: 1, y: 2)` without a map-accepting constructor:
    ///
    /// ```java
    /// Point point = new Point();
    /// point.x = 1;      // or point.setX(1) when a setter exists
    /// point.y = 2;
    /// ```
    ///
    /// and the expression itself becomes `point`. A qualified creation keeps
    /// its outer instance in the declaration (`outer.new Inner()`).
    fn emit_field_init(
        &mut self,
        id: ExprId,
        outer: Option<&str>,
        ty: &JavaType,
        constructor: Option<&MethodRef>,
        positional: &[ExprId],
        named: &[NamedArgument],
    ) -> Result<(), LowerError> {
        let mut arguments: Vec<Rendered> = Vec::with_capacity(positional.len());
        for &arg in positional {
            arguments.push(self.render_operand(Operand::Expr(arg), precedence::LOWEST)?);
        }
        let signature = constructor.map(MethodRef::signature).unwrap_or_default();
        let arguments = pack_varargs(&signature, arguments).join(", ");

        let name = self.ctx.suggest_var_name(ty)?;
        let created = match outer {
            Some(outer) => format!("{outer}.new {}", ty.simple_name()),
            None => format!("new {}", self.instantiation(ty)),
        };
        self.ctx
            .add_statement(format!("{ty} {name} = {created}({arguments});"));
        debug!(
            %id,
            %ty,
            var = %name,
            fields = named.len(),
            "lowering named arguments to field init"
        );

        let class = constructor
            .and_then(|ctor| ctor.method.containing_class.as_deref())
            .or_else(|| ty.class_name())
            .map(str::to_string);
        for argument in named {
            let field = match &argument.label {
                Some(ArgumentLabel::Name { name }) => name.as_str(),
                Some(ArgumentLabel::Expression { expr }) => {
                    return Err(self.unsupported(*expr, "computed field name"));
                }
                None => {
                    return Err(LowerError::Malformed {
                        expr: id,
                        reason: "named argument without a name",
                    });
                }
            };
            let value = argument.value.ok_or(LowerError::Malformed {
                expr: id,
                reason: "named argument without a value",
            })?;
            let value_text = self.generate_to_string(value)?;

            let setter = class
                .as_deref()
                .and_then(|class| self.resolver.find_setter(class, field));
            let statement = match setter {
                Some(setter) => {
                    let receiver = Some(Operand::typed(name.as_str(), ty.clone()));
                    let value = Operand::text(value_text);
                    let call = self.with_buffer(|g| {
                        g.invoke_method_on(id, &setter, receiver, vec![value], &[])
                    })?;
                    format!("{call};")
                }
                None => format!("{name}.{field} = {value_text};"),
            };
            self.ctx.add_statement(statement);
        }

        self.write(&name);
        Ok(())
    }

    /// Type written after `new` in a hoisted declaration, using the diamond
    /// form when enabled.
    pub(crate) fn instantiation(&self, ty: &JavaType) -> String {
        match ty {
            JavaType::Class { args, .. } if self.ctx.options().diamond && !args.is_empty() => {
                format!("{}<>", ty.erasure())
            }
            _ => ty.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/new_expression.rs"]
mod tests;
