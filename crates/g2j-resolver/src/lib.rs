//! Resolver bridge for the g2j lowering engine.
//!
//! The emitter never performs semantic analysis. Everything it needs to know
//! about an expression (which overload an operator picked, whether a
//! reference is a property accessor, what a `new` expression constructs)
//! comes through the [`Resolver`] trait. [`TableResolver`] is a concrete,
//! table-driven implementation used by the CLI and by tests.

pub mod method;
pub use method::{ClassInfo, MethodInfo, MethodKind, MethodRef, ParamInfo, Substitutor};

pub mod resolution;
pub use resolution::{Resolved, ResolutionResult};

pub mod resolver;
pub use resolver::{NullResolver, Resolver};

pub mod table;
pub use table::TableResolver;
