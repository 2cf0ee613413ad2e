use g2j_ast::{ExprId, ThisKeyword};
use g2j_common::JavaType;
use g2j_resolver::Resolved;

use super::ExpressionGenerator;
use super::precedence;
use crate::error::LowerError;

impl<'a> ExpressionGenerator<'a> {
    /// `q.name`, or `q.getName()` when the reference resolves to a getter.
    pub(super) fn emit_reference(
        &mut self,
        id: ExprId,
        qualifier: Option<ExprId>,
        name: &str,
    ) -> Result<(), LowerError> {
        let resolution = self.resolver.resolve(id);
        if let Some(Resolved::Getter(getter)) = resolution.unique() {
            let receiver = self.receiver_for(&getter.method, qualifier)?;
            return self.invoke_method_on(id, getter, receiver, Vec::new(), &[]);
        }

        if let Some(qualifier) = qualifier {
            self.generate_operand(qualifier, precedence::PRIMARY)?;
            self.write(".");
        }
        self.write(name);
        Ok(())
    }

    /// `this`/`super`, qualified with the outer class when it refers to a
    /// class other than the innermost enclosing one.
    pub(super) fn emit_this(&mut self, id: ExprId, keyword: ThisKeyword) -> Result<(), LowerError> {
        let resolution = self.resolver.resolve(id);
        if let Some(class) = resolution.unique_class()
            && self.resolver.enclosing_class(id).as_deref() != Some(class.qualified_name.as_str())
        {
            self.write(&JavaType::class(class.qualified_name.as_str()).to_string());
            self.write(".");
        }
        self.write(keyword.text());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/references.rs"]
mod tests;
