//! Convenience constructors for building expression trees by hand.
//!
//! ```
//! use g2j_ast::{BinaryOp, ExprArena};
//!
//! let mut arena = ExprArena::new();
//! let a = arena.reference("a");
//! let b = arena.reference("b");
//! let sum = arena.binary(BinaryOp::Plus, a, b);
//! assert_eq!(arena.subtree(sum).len(), 3);
//! ```

use g2j_common::{JavaType, PrimitiveType};

use crate::arena::ExprArena;
use crate::node::{
    ArgumentList, BinaryOp, Expr, ExprId, GStringPart, Literal, NamedArgument, ThisKeyword,
    UnaryOp,
};

impl ExprArena {
    // =========================================================================
    // Literals
    // =========================================================================

    pub fn literal(&mut self, value: Literal) -> ExprId {
        self.alloc(Expr::Literal { value })
    }

    pub fn int(&mut self, value: i32) -> ExprId {
        self.literal(Literal::Int(value))
    }

    pub fn string(&mut self, value: impl Into<String>) -> ExprId {
        self.literal(Literal::String(value.into()))
    }

    pub fn boolean(&mut self, value: bool) -> ExprId {
        self.literal(Literal::Boolean(value))
    }

    pub fn null(&mut self) -> ExprId {
        self.literal(Literal::Null)
    }

    pub fn gstring(&mut self, parts: Vec<GStringPart>) -> ExprId {
        self.alloc(Expr::GString { parts })
    }

    // =========================================================================
    // References
    // =========================================================================

    pub fn reference(&mut self, name: impl Into<String>) -> ExprId {
        self.alloc(Expr::Reference {
            qualifier: None,
            name: name.into(),
        })
    }

    pub fn qualified(&mut self, qualifier: ExprId, name: impl Into<String>) -> ExprId {
        self.alloc(Expr::Reference {
            qualifier: Some(qualifier),
            name: name.into(),
        })
    }

    pub fn this(&mut self) -> ExprId {
        self.alloc(Expr::This {
            keyword: ThisKeyword::This,
        })
    }

    // =========================================================================
    // Operators
    // =========================================================================

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.alloc(Expr::Binary {
            op,
            left,
            right: Some(right),
        })
    }

    pub fn prefix(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.alloc(Expr::Unary {
            op,
            operand,
            postfix: false,
        })
    }

    pub fn postfix(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.alloc(Expr::Unary {
            op,
            operand,
            postfix: true,
        })
    }

    pub fn assign(&mut self, target: ExprId, value: ExprId) -> ExprId {
        self.alloc(Expr::Assignment {
            op: None,
            target,
            value,
        })
    }

    pub fn conditional(
        &mut self,
        condition: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    ) -> ExprId {
        self.alloc(Expr::Conditional {
            condition,
            then_branch,
            else_branch,
        })
    }

    pub fn cast(&mut self, ty: JavaType, operand: ExprId) -> ExprId {
        self.alloc(Expr::Cast { ty, operand })
    }

    pub fn instance_of(&mut self, operand: ExprId, ty: JavaType) -> ExprId {
        self.alloc(Expr::InstanceOf { operand, ty })
    }

    pub fn paren(&mut self, operand: ExprId) -> ExprId {
        self.alloc(Expr::Parenthesized {
            operand: Some(operand),
        })
    }

    pub fn builtin_class(&mut self, primitive: PrimitiveType) -> ExprId {
        self.alloc(Expr::BuiltinTypeClass { primitive })
    }

    // =========================================================================
    // Calls and construction
    // =========================================================================

    pub fn call(&mut self, callee: ExprId, args: ArgumentList) -> ExprId {
        self.alloc(Expr::MethodCall { callee, args })
    }

    /// `qualifier.name(args...)` with positional arguments only.
    pub fn method_call(&mut self, qualifier: ExprId, name: &str, args: Vec<ExprId>) -> ExprId {
        let callee = self.qualified(qualifier, name);
        self.call(callee, ArgumentList::positional(args))
    }

    pub fn new_object(&mut self, ty: JavaType, args: ArgumentList) -> ExprId {
        self.alloc(Expr::New {
            qualifier: None,
            ty,
            args: Some(args),
            array_dims: None,
            anonymous_body: false,
        })
    }

    pub fn new_array(&mut self, element: JavaType, dims: Vec<ExprId>) -> ExprId {
        self.alloc(Expr::New {
            qualifier: None,
            ty: element,
            args: None,
            array_dims: Some(dims),
            anonymous_body: false,
        })
    }

    pub fn index(&mut self, target: ExprId, index: ExprId) -> ExprId {
        self.alloc(Expr::Index {
            target,
            args: ArgumentList::positional(vec![index]),
        })
    }

    // =========================================================================
    // Collections
    // =========================================================================

    pub fn list(&mut self, elements: Vec<ExprId>) -> ExprId {
        self.alloc(Expr::List { elements })
    }

    pub fn map(&mut self, entries: Vec<NamedArgument>) -> ExprId {
        self.alloc(Expr::Map { entries })
    }

    pub fn range(&mut self, from: ExprId, to: ExprId, exclusive: bool) -> ExprId {
        self.alloc(Expr::Range {
            from,
            to: Some(to),
            exclusive,
        })
    }
}
