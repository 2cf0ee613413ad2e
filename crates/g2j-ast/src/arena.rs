//! Expression arena.
//!
//! Nodes are appended and never removed or mutated, so an [`ExprId`] stays
//! valid for the arena's lifetime. Children must be allocated before their
//! parents, which keeps every well-formed arena acyclic.

use g2j_common::Span;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::node::{Expr, ExprId};

/// An expression plus its optional source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprNode {
    #[serde(flatten)]
    pub expr: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExprArena {
    nodes: Vec<ExprNode>,
}

/// Structural problems found by [`ExprArena::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// A node refers to an id that is not in the arena.
    DanglingChild { parent: ExprId, child: ExprId },
    /// A node refers to itself or to a node allocated after it.
    ForwardReference { parent: ExprId, child: ExprId },
    /// Two parents share one child; the tree property is broken.
    SharedChild {
        child: ExprId,
        first_parent: ExprId,
        second_parent: ExprId,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaError::DanglingChild { parent, child } => {
                write!(f, "node {parent} refers to missing node {child}")
            }
            ArenaError::ForwardReference { parent, child } => {
                write!(f, "node {parent} refers to later node {child}")
            }
            ArenaError::SharedChild {
                child,
                first_parent,
                second_parent,
            } => write!(
                f,
                "node {child} is a child of both {first_parent} and {second_parent}"
            ),
        }
    }
}

impl std::error::Error for ArenaError {}

impl ExprArena {
    pub fn new() -> ExprArena {
        ExprArena::default()
    }

    pub fn with_capacity(capacity: usize) -> ExprArena {
        ExprArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        self.push(ExprNode { expr, span: None })
    }

    pub fn alloc_spanned(&mut self, expr: Expr, span: Span) -> ExprId {
        self.push(ExprNode {
            expr,
            span: Some(span),
        })
    }

    fn push(&mut self, node: ExprNode) -> ExprId {
        let id = ExprId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn get(&self, id: ExprId) -> Option<&Expr> {
        self.nodes.get(id.index()).map(|node| &node.expr)
    }

    #[inline]
    pub fn span(&self, id: ExprId) -> Option<Span> {
        self.nodes.get(id.index()).and_then(|node| node.span)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExprId, &Expr)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (ExprId(i as u32), &node.expr))
    }

    /// Ids reachable from `root`, including `root`, in pre-order.
    pub fn subtree(&self, root: ExprId) -> Vec<ExprId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(expr) = self.get(id) else {
                continue;
            };
            out.push(id);
            let children = expr.children();
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Check that every child id exists, precedes its parent and has a
    /// single parent.
    pub fn validate(&self) -> Result<(), ArenaError> {
        let mut parents: FxHashMap<ExprId, ExprId> = FxHashMap::default();
        for (parent, expr) in self.iter() {
            for child in expr.children() {
                if child.index() >= self.nodes.len() {
                    return Err(ArenaError::DanglingChild { parent, child });
                }
                if child >= parent {
                    return Err(ArenaError::ForwardReference { parent, child });
                }
                if let Some(&first_parent) = parents.get(&child) {
                    return Err(ArenaError::SharedChild {
                        child,
                        first_parent,
                        second_parent: parent,
                    });
                }
                parents.insert(child, parent);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/arena.rs"]
mod tests;
