//! Per-statement emission state.
//!
//! An [`ExpressionContext`] lives for the lowering of one top-level
//! expression. It owns the hoisted statements in discovery order, the names
//! handed out to temporaries, the nodes already visited and the current
//! recursion depth. Nothing in it is shared between statements; callers that
//! lower several statements into one Java scope carry the used names forward
//! with [`ExpressionContext::with_reserved_names`].

use g2j_ast::{Expr, ExprArena, ExprId};
use g2j_common::JavaType;
use g2j_common::limits::MAX_NAME_SUFFIX;
use g2j_common::names::is_java_keyword;
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::error::LowerError;
use crate::naming::base_name;
use crate::options::EmitterOptions;

#[derive(Debug, Default)]
pub struct ExpressionContext {
    options: EmitterOptions,
    statements: Vec<String>,
    used_names: FxHashSet<String>,
    visited: FxHashSet<ExprId>,
    depth: u32,
}

impl ExpressionContext {
    pub fn new(options: EmitterOptions) -> Self {
        ExpressionContext {
            options,
            ..Self::default()
        }
    }

    /// Treat `names` as already declared in the surrounding scope.
    pub fn with_reserved_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.used_names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn options(&self) -> &EmitterOptions {
        &self.options
    }

    // =========================================================================
    // Traversal bookkeeping
    // =========================================================================

    pub(crate) fn enter(&mut self, expr: ExprId) -> Result<(), LowerError> {
        if self.depth >= self.options.max_depth {
            return Err(LowerError::TooDeep {
                limit: self.options.max_depth,
                expr,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Record that `expr` has been lowered (or consumed by its parent).
    pub(crate) fn mark_visited(&mut self, expr: ExprId) -> Result<(), LowerError> {
        if self.visited.insert(expr) {
            Ok(())
        } else {
            Err(LowerError::RepeatedVisit { expr })
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    // =========================================================================
    // Hoisted statements
    // =========================================================================

    pub fn add_statement(&mut self, statement: impl Into<String>) {
        let statement = statement.into();
        trace!(statement = %statement, "hoisted");
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn take_statements(&mut self) -> Vec<String> {
        std::mem::take(&mut self.statements)
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Pick a fresh name for a temporary of type `ty` and mark it used.
    pub fn suggest_var_name(&mut self, ty: &JavaType) -> Result<String, LowerError> {
        let base = base_name(ty, self.options.var_naming);
        if self.is_free(&base) {
            self.used_names.insert(base.clone());
            return Ok(base);
        }
        for suffix in 1..=MAX_NAME_SUFFIX {
            let candidate = format!("{base}{suffix}");
            if self.is_free(&candidate) {
                self.used_names.insert(candidate.clone());
                return Ok(candidate);
            }
        }
        Err(LowerError::NamesExhausted { base })
    }

    fn is_free(&self, name: &str) -> bool {
        !is_java_keyword(name) && !self.used_names.contains(name)
    }

    /// Reserve every unqualified name the tree under `root` refers to, so a
    /// temporary never shadows a local the expression reads.
    pub fn reserve_referenced_names(&mut self, arena: &ExprArena, root: ExprId) {
        let mut seen = FxHashSet::default();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Some(expr) = arena.get(id) else {
                continue;
            };
            if let Expr::Reference {
                qualifier: None,
                name,
            } = expr
            {
                self.used_names.insert(name.clone());
            }
            stack.extend(expr.children());
        }
    }

    pub fn is_name_used(&self, name: &str) -> bool {
        self.used_names.contains(name)
    }

    pub fn used_names(&self) -> impl Iterator<Item = &str> {
        self.used_names.iter().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../tests/context.rs"]
mod tests;
