//! Java source generation for Groovy expression trees.
//!
//! The entry point is [`lower_expression`]: it walks one expression tree,
//! asks the [`Resolver`] what each operator, reference and constructor means,
//! and returns the Java text for the expression together with the statements
//! that must be emitted before it.
//!
//! ```
//! use g2j_ast::{ArgumentList, ExprArena, NamedArgument};
//! use g2j_common::JavaType;
//! use g2j_emitter::{EmitterOptions, lower_expression};
//! use g2j_resolver::NullResolver;
//!
//! let mut arena = ExprArena::new();
//! let one = arena.int(1);
//! let two = arena.int(2);
//! let args = ArgumentList::default().with_named(vec![
//!     NamedArgument::named("x", one),
//!     NamedArgument::named("y", two),
//! ]);
//! let root = arena.new_object(JavaType::class("Point"), args);
//!
//! let lowered = lower_expression(&arena, &NullResolver, root, &EmitterOptions::default())
//!     .expect("lowers");
//! assert_eq!(lowered.text, "point");
//! assert_eq!(
//!     lowered.hoisted,
//!     ["Point point = new Point();", "point.x = 1;", "point.y = 2;"]
//! );
//! ```

use g2j_ast::{ExprArena, ExprId};
use g2j_resolver::Resolver;
use serde::Serialize;
use tracing::debug_span;

pub mod context;
pub mod error;
pub mod generator;
pub mod naming;
pub mod options;
pub mod source_writer;

pub use context::ExpressionContext;
pub use error::LowerError;
pub use generator::ExpressionGenerator;
pub use options::{EmitterOptions, VarNaming};
pub use source_writer::SourceWriter;

/// Java text for one expression plus the statements that must precede it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoweredExpression {
    pub text: String,
    /// Complete statements (with trailing `;`) in the order they must run.
    pub hoisted: Vec<String>,
}

impl LoweredExpression {
    /// Hoisted statements followed by `text;`, one per line.
    pub fn render_statement(&self) -> String {
        self.render_with(format!("{};", self.text))
    }

    /// Hoisted statements followed by `target = text;`.
    pub fn render_assignment(&self, target: &str) -> String {
        self.render_with(format!("{target} = {};", self.text))
    }

    fn render_with(&self, last: String) -> String {
        let mut out = String::new();
        for statement in &self.hoisted {
            out.push_str(statement);
            out.push('\n');
        }
        out.push_str(&last);
        out.push('\n');
        out
    }
}

/// Lower the tree rooted at `root` in a fresh context.
pub fn lower_expression(
    arena: &ExprArena,
    resolver: &dyn Resolver,
    root: ExprId,
    options: &EmitterOptions,
) -> Result<LoweredExpression, LowerError> {
    let mut ctx = ExpressionContext::new(options.clone());
    lower_with_context(arena, resolver, root, &mut ctx)
}

/// Lower the tree rooted at `root` using a caller-supplied context, so that
/// reserved and previously used names are respected. Names the tree itself
/// refers to are reserved before any temporary is named.
///
/// On error nothing is returned and the context's pending statements are
/// dropped.
pub fn lower_with_context(
    arena: &ExprArena,
    resolver: &dyn Resolver,
    root: ExprId,
    ctx: &mut ExpressionContext,
) -> Result<LoweredExpression, LowerError> {
    let _span = debug_span!("lower_expression", %root).entered();
    ctx.reserve_referenced_names(arena, root);
    let result = {
        let mut generator = ExpressionGenerator::new(arena, resolver, ctx);
        generator.generate(root).map(|()| generator.finish())
    };
    let hoisted = ctx.take_statements();
    let text = result?;
    Ok(LoweredExpression { text, hoisted })
}

#[cfg(test)]
#[path = "../tests/lowering.rs"]
mod tests;
