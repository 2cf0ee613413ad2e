//! The resolver trait.

use g2j_ast::ExprId;
use g2j_common::JavaType;

use crate::method::MethodRef;
use crate::resolution::ResolutionResult;

/// Semantic facts about expressions, supplied by the host's analyzer.
///
/// Only [`resolve`](Resolver::resolve) is required. The other queries
/// default to "unknown", which makes the emitter fall back to verbatim
/// output for the affected construct.
pub trait Resolver {
    /// Candidates for the operation `expr` performs: the operator method of
    /// a binary/unary expression, the method or getter a reference names,
    /// the constructor of a `new`, the `getAt` of an index expression, the
    /// `asType` of a safe cast, the class of a `this` reference.
    fn resolve(&self, expr: ExprId) -> ResolutionResult;

    /// Static type of `expr`.
    fn type_of(&self, _expr: ExprId) -> Option<JavaType> {
        None
    }

    /// Setter for `property` on `class` (a qualified class name).
    fn find_setter(&self, _class: &str, _property: &str) -> Option<MethodRef> {
        None
    }

    /// Methods called `name` applicable to a receiver of type `receiver`
    /// with no arguments; used for implicit conversions such as `asBoolean`.
    fn method_candidates(&self, _receiver: &JavaType, _name: &str) -> ResolutionResult {
        ResolutionResult::none()
    }

    /// Qualified name of the innermost class enclosing `expr`, or `None`
    /// when a closure sits between `expr` and that class.
    fn enclosing_class(&self, _expr: ExprId) -> Option<String> {
        None
    }
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn resolve(&self, expr: ExprId) -> ResolutionResult {
        (**self).resolve(expr)
    }

    fn type_of(&self, expr: ExprId) -> Option<JavaType> {
        (**self).type_of(expr)
    }

    fn find_setter(&self, class: &str, property: &str) -> Option<MethodRef> {
        (**self).find_setter(class, property)
    }

    fn method_candidates(&self, receiver: &JavaType, name: &str) -> ResolutionResult {
        (**self).method_candidates(receiver, name)
    }

    fn enclosing_class(&self, expr: ExprId) -> Option<String> {
        (**self).enclosing_class(expr)
    }
}

/// Resolves nothing; every construct is emitted verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl Resolver for NullResolver {
    fn resolve(&self, _expr: ExprId) -> ResolutionResult {
        ResolutionResult::none()
    }
}
