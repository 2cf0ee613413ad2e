use g2j_ast::{ArgumentLabel, ExprId, NamedArgument};
use g2j_common::JavaType;
use g2j_common::names::{
    GROOVY_LANG_INT_RANGE, GROOVY_LANG_OBJECT_RANGE, JAVA_LANG_OBJECT, JAVA_LANG_STRING,
    JAVA_UTIL_ARRAY_LIST, JAVA_UTIL_LINKED_HASH_MAP, has_capacity_constructor,
    instantiable_collection,
};
use tracing::debug;

use super::ExpressionGenerator;
use super::calls::Rendered;
use super::literals::quote_string;
use crate::error::LowerError;

impl<'a> ExpressionGenerator<'a> {
    // =========================================================================
    // List and map literals
    // =========================================================================

    /// `[a, b]` hoists `T list = new T(2); list.add(a); list.add(b);` and
    /// lowers to `list`. Array-typed literals stay inline as `new T[]{a, b}`.
    pub(super) fn emit_list(&mut self, id: ExprId, elements: &[ExprId]) -> Result<(), LowerError> {
        let ty = self.resolver.type_of(id);
        if let Some(JavaType::Array { element }) = &ty {
            self.write("new ");
            self.write(&element.erasure().to_string());
            self.write("[]{");
            for (i, &element) in elements.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.generate(element)?;
            }
            self.write("}");
            return Ok(());
        }

        let declared = match ty {
            Some(ty @ JavaType::Class { .. }) => ty,
            _ => JavaType::generic(JAVA_UTIL_ARRAY_LIST, vec![JavaType::object()]),
        };
        let name = self.hoist_collection_declaration(&declared, elements.len())?;
        for &element in elements {
            let value = self.generate_to_string(element)?;
            self.ctx.add_statement(format!("{name}.add({value});"));
        }
        self.write(&name);
        Ok(())
    }

    /// `[k: v]` hoists `T map = new T(1); map.put("k", v);` and lowers to `map`.
    pub(super) fn emit_map(
        &mut self,
        id: ExprId,
        entries: &[NamedArgument],
    ) -> Result<(), LowerError> {
        let declared = match self.resolver.type_of(id) {
            Some(ty @ JavaType::Class { .. }) => ty,
            _ => JavaType::generic(
                JAVA_UTIL_LINKED_HASH_MAP,
                vec![JavaType::object(), JavaType::object()],
            ),
        };
        let name = self.hoist_map(id, &declared, entries)?;
        self.write(&name);
        Ok(())
    }

    /// Collect the named arguments of a call into a hoisted
    /// `LinkedHashMap<String, Object>` and return its name.
    pub(crate) fn hoist_named_argument_map(
        &mut self,
        at: ExprId,
        named: &[NamedArgument],
    ) -> Result<Rendered, LowerError> {
        let ty = JavaType::generic(
            JAVA_UTIL_LINKED_HASH_MAP,
            vec![JavaType::class(JAVA_LANG_STRING), JavaType::class(JAVA_LANG_OBJECT)],
        );
        let name = self.hoist_map(at, &ty, named)?;
        Ok(Rendered {
            text: name,
            ty: Some(ty),
        })
    }

    fn hoist_map(
        &mut self,
        at: ExprId,
        declared: &JavaType,
        entries: &[NamedArgument],
    ) -> Result<String, LowerError> {
        let name = self.hoist_collection_declaration(declared, entries.len())?;
        for entry in entries {
            let key = match &entry.label {
                Some(ArgumentLabel::Name { name }) => quote_string(name),
                Some(ArgumentLabel::Expression { expr }) => self.generate_to_string(*expr)?,
                None => {
                    return Err(LowerError::Malformed {
                        expr: at,
                        reason: "map entry without a key",
                    });
                }
            };
            let value = entry.value.ok_or(LowerError::Malformed {
                expr: at,
                reason: "map entry without a value",
            })?;
            let value = self.generate_to_string(value)?;
            self.ctx.add_statement(format!("{name}.put({key}, {value});"));
        }
        Ok(name)
    }

    /// Hoist `Declared name = new Concrete(count);` and return `name`.
    /// Interface types are instantiated through their usual implementation.
    pub(crate) fn hoist_collection_declaration(
        &mut self,
        declared: &JavaType,
        count: usize,
    ) -> Result<String, LowerError> {
        let (class, args) = match declared {
            JavaType::Class { name, args } => (instantiable_collection(name), args.clone()),
            _ => (JAVA_UTIL_ARRAY_LIST, Vec::new()),
        };
        let concrete = JavaType::generic(class, args);
        let created = self.instantiation(&concrete);
        let capacity = if has_capacity_constructor(class) {
            count.to_string()
        } else {
            String::new()
        };

        let name = self.ctx.suggest_var_name(declared)?;
        debug!(ty = %declared, var = %name, count, "hoisting collection");
        self.ctx
            .add_statement(format!("{declared} {name} = new {created}({capacity});"));
        Ok(name)
    }

    // =========================================================================
    // Ranges
    // =========================================================================

    /// `a..b` becomes `new groovy.lang.ObjectRange(a, b)`, or the range class
    /// the resolver typed the node with. `a..<b` is only expressible for
    /// `IntRange`, as `new groovy.lang.IntRange(false, a, b)`.
    pub(super) fn emit_range(
        &mut self,
        id: ExprId,
        from: ExprId,
        to: Option<ExprId>,
        exclusive: bool,
    ) -> Result<(), LowerError> {
        let to = to.ok_or(LowerError::Malformed {
            expr: id,
            reason: "range without an upper bound",
        })?;
        let class = self
            .resolver
            .type_of(id)
            .and_then(|ty| ty.class_name().map(str::to_string))
            .unwrap_or_else(|| GROOVY_LANG_OBJECT_RANGE.to_string());
        if exclusive && class != GROOVY_LANG_INT_RANGE {
            return Err(self.unsupported(id, "exclusive range"));
        }

        self.write("new ");
        self.write(&JavaType::class(class).to_string());
        self.write("(");
        if exclusive {
            self.write("false, ");
        }
        self.generate(from)?;
        self.write(", ");
        self.generate(to)?;
        self.write(")");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/collections.rs"]
mod tests;
