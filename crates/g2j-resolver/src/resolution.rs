//! Resolution results handed from the resolver to the emitter.

use serde::{Deserialize, Serialize};

use crate::method::{ClassInfo, MethodRef};

/// What a single expression resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Resolved {
    /// A method: an operator overload, a called method, a constructor or a
    /// conversion such as `asBoolean`/`asType`.
    Method(MethodRef),
    /// A property read through its accessor.
    Getter(MethodRef),
    /// A property written through its mutator.
    Setter(MethodRef),
    /// A class, e.g. the target of `new` when no constructor matched, or the
    /// class a `this`/`super` refers to.
    Class(ClassInfo),
    /// A language-level operation: primitive arithmetic, plain array access.
    Builtin,
}

/// All candidates the resolver found for one expression.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolutionResult {
    candidates: Vec<Resolved>,
}

impl ResolutionResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(resolved: Resolved) -> Self {
        Self {
            candidates: vec![resolved],
        }
    }

    pub fn from_candidates(candidates: Vec<Resolved>) -> Self {
        Self { candidates }
    }

    pub fn push(&mut self, resolved: Resolved) {
        self.candidates.push(resolved);
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[Resolved] {
        &self.candidates
    }

    /// The only candidate, or `None` when resolution failed or is ambiguous.
    pub fn unique(&self) -> Option<&Resolved> {
        match self.candidates.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }

    pub fn unique_method(&self) -> Option<&MethodRef> {
        match self.unique() {
            Some(Resolved::Method(method)) => Some(method),
            _ => None,
        }
    }

    pub fn unique_class(&self) -> Option<&ClassInfo> {
        match self.unique() {
            Some(Resolved::Class(class)) => Some(class),
            _ => None,
        }
    }
}
