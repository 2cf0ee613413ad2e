//! Groovy expression trees for the g2j lowering engine.
//!
//! Expressions live in an [`ExprArena`] and refer to each other through
//! [`ExprId`] handles. The arena is immutable once built; the emitter only
//! borrows it. Trees arrive either from a front end building them through the
//! helpers in [`builder`] or deserialized from JSON lowering units.

pub mod node;
pub use node::{
    ArgumentLabel, ArgumentList, BinaryOp, Expr, ExprId, GStringPart, Literal, NamedArgument,
    ThisKeyword, UnaryOp,
};

pub mod arena;
pub use arena::{ArenaError, ExprArena, ExprNode};

pub mod builder;
