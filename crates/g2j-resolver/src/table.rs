//! Table-driven resolver.
//!
//! A [`TableResolver`] answers every query from precomputed tables. Front
//! ends that run their own analysis serialize the tables next to the
//! expression arena (see the `resolver` section of a lowering unit):
//!
//! ```json
//! {
//!   "resolutions": { "2": [{ "kind": "method", "method": { "name": "plus" } }] },
//!   "types": { "5": { "kind": "class", "name": "Point" } },
//!   "setters": { "Point": { "y": { "method": { "name": "setY" } } } },
//!   "methodCandidates": [
//!     { "receiver": "java.lang.String", "name": "asBoolean",
//!       "candidates": [{ "kind": "method", "method": { "name": "asBoolean" } }] }
//!   ],
//!   "enclosing": { "7": "com.example.Outer" }
//! }
//! ```

use g2j_ast::ExprId;
use g2j_common::JavaType;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::method::MethodRef;
use crate::resolution::{ResolutionResult, Resolved};
use crate::resolver::Resolver;

/// Candidates for a method looked up by receiver type and name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCandidates {
    /// Erased receiver type as written in Java (`java.lang.String`, `int`).
    pub receiver: String,
    pub name: String,
    #[serde(default)]
    pub candidates: ResolutionResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableResolver {
    #[serde(default)]
    resolutions: FxHashMap<ExprId, ResolutionResult>,
    #[serde(default)]
    types: FxHashMap<ExprId, JavaType>,
    #[serde(default)]
    setters: FxHashMap<String, FxHashMap<String, MethodRef>>,
    #[serde(default)]
    method_candidates: Vec<MethodCandidates>,
    #[serde(default)]
    enclosing: FxHashMap<ExprId, String>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Add a candidate for `expr`. Adding a second candidate makes the
    /// resolution ambiguous.
    pub fn with_resolution(mut self, expr: ExprId, resolved: Resolved) -> Self {
        self.resolutions.entry(expr).or_default().push(resolved);
        self
    }

    pub fn with_type(mut self, expr: ExprId, ty: JavaType) -> Self {
        self.types.insert(expr, ty);
        self
    }

    pub fn with_setter(
        mut self,
        class: impl Into<String>,
        property: impl Into<String>,
        setter: MethodRef,
    ) -> Self {
        self.setters
            .entry(class.into())
            .or_default()
            .insert(property.into(), setter);
        self
    }

    pub fn with_method_candidate(
        mut self,
        receiver: &JavaType,
        name: impl Into<String>,
        resolved: Resolved,
    ) -> Self {
        let receiver = receiver.erasure().to_string();
        let name = name.into();
        if let Some(entry) = self
            .method_candidates
            .iter_mut()
            .find(|entry| entry.receiver == receiver && entry.name == name)
        {
            entry.candidates.push(resolved);
        } else {
            self.method_candidates.push(MethodCandidates {
                receiver,
                name,
                candidates: ResolutionResult::single(resolved),
            });
        }
        self
    }

    pub fn with_enclosing_class(mut self, expr: ExprId, class: impl Into<String>) -> Self {
        self.enclosing.insert(expr, class.into());
        self
    }

    pub fn resolution_count(&self) -> usize {
        self.resolutions.len()
    }
}

impl Resolver for TableResolver {
    fn resolve(&self, expr: ExprId) -> ResolutionResult {
        match self.resolutions.get(&expr) {
            Some(result) => result.clone(),
            None => {
                trace!(%expr, "no resolution recorded");
                ResolutionResult::none()
            }
        }
    }

    fn type_of(&self, expr: ExprId) -> Option<JavaType> {
        self.types.get(&expr).cloned()
    }

    fn find_setter(&self, class: &str, property: &str) -> Option<MethodRef> {
        self.setters
            .get(class)
            .and_then(|properties| properties.get(property))
            .cloned()
    }

    fn method_candidates(&self, receiver: &JavaType, name: &str) -> ResolutionResult {
        let receiver = receiver.erasure().to_string();
        self.method_candidates
            .iter()
            .find(|entry| entry.receiver == receiver && entry.name == name)
            .map(|entry| entry.candidates.clone())
            .unwrap_or_default()
    }

    fn enclosing_class(&self, expr: ExprId) -> Option<String> {
        self.enclosing.get(&expr).cloned()
    }
}

#[cfg(test)]
#[path = "../tests/table_resolver.rs"]
mod tests;
