//! Expression trees consumed by the resolution engine.
//!
//! Expressions form a closed set of variants matched exhaustively by the
//! resolver; a construct outside the set gets the generic first-child
//! descent. Nodes live in an [`ExprArena`] and refer to each other through
//! [`ExprId`] handles, so arbitrarily shaped (even pathological) trees
//! carry no ownership hazards.

use crate::base::Span;

use super::ident::{IdentId, QualifiedIdent};

/// Handle of an [`Expr`] in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(pub u32);

impl ExprId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Binary operators of the expression grammar.
///
/// Only [`Operation::As`] carries resolution semantics; the rest matter
/// solely for building realistic trees around the names being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    As,
    Is,
    In,
    Add,
    Sub,
    Mul,
    Div,
    IntDiv,
    Mod,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Operation {
    /// Map an operator token to its operation, `None` for unknown tokens.
    pub fn from_token(text: &str) -> Option<Self> {
        let op = match text.to_ascii_lowercase().as_str() {
            "as" => Self::As,
            "is" => Self::Is,
            "in" => Self::In,
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "div" => Self::IntDiv,
            "mod" => Self::Mod,
            "and" => Self::And,
            "or" => Self::Or,
            "xor" => Self::Xor,
            "shl" => Self::Shl,
            "shr" => Self::Shr,
            "=" => Self::Eq,
            "<>" => Self::Ne,
            "<" => Self::Lt,
            "<=" => Self::Le,
            ">" => Self::Gt,
            ">=" => Self::Ge,
            _ => return None,
        };
        Some(op)
    }
}

/// Unary operators (`not x`, `-x`, `@x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperation {
    Not,
    Neg,
    Plus,
    AddressOf,
}

/// Literal constants; opaque to resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Float,
    Str,
    Char,
    Bool,
    Nil,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A dotted name, possibly qualified by a preceding sub-expression:
    /// `Foo.Bar` or `expr.Foo.Bar`.
    Reference {
        qualifier: Option<ExprId>,
        ident: IdentId,
    },
    /// Pointer/class-reference indirection `expr^`.
    Dereference { operand: ExprId },
    /// Array or indexed-property access `expr[i, j]`.
    Index {
        array: ExprId,
        indices: Vec<ExprId>,
    },
    /// Binary operation `lhs op rhs`.
    Binary {
        op: Operation,
        operands: Vec<ExprId>,
    },
    /// Routine invocation `callee(args)`.
    Call {
        callee: ExprId,
        arguments: Vec<ExprId>,
    },
    /// Prefix operation `op expr`.
    Unary {
        op: UnaryOperation,
        operand: ExprId,
    },
    /// Parenthesized sub-expression `(expr)`.
    Paren { inner: ExprId },
    /// A literal constant.
    Literal { kind: LiteralKind, span: Span },
}

impl Expr {
    /// First non-trivial child, skipping leaf tokens; the generic descent
    /// target for variants without resolution rules of their own.
    pub fn first_meaningful_child(&self) -> Option<ExprId> {
        match self {
            Expr::Reference { qualifier, .. } => *qualifier,
            Expr::Dereference { operand } => Some(*operand),
            Expr::Index { array, .. } => Some(*array),
            Expr::Binary { operands, .. } => operands.first().copied(),
            Expr::Call { callee, .. } => Some(*callee),
            Expr::Unary { operand, .. } => Some(*operand),
            Expr::Paren { inner } => Some(*inner),
            Expr::Literal { .. } => None,
        }
    }
}

/// Arena storage for expressions and their dotted names.
#[derive(Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    idents: Vec<QualifiedIdent>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len());
        self.exprs.push(expr);
        id
    }

    pub fn alloc_ident(&mut self, ident: QualifiedIdent) -> IdentId {
        let id = IdentId::new(self.idents.len());
        self.idents.push(ident);
        id
    }

    pub fn expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    pub fn ident(&self, id: IdentId) -> Option<&QualifiedIdent> {
        self.idents.get(id.index())
    }

    // ============================================================
    // Builder helpers
    // ============================================================

    /// Allocate a reference expression over `ident`, returning both the
    /// node and the name handle used for identity checks.
    pub fn reference(
        &mut self,
        qualifier: Option<ExprId>,
        ident: QualifiedIdent,
    ) -> (ExprId, IdentId) {
        let ident_id = self.alloc_ident(ident);
        let expr = self.alloc(Expr::Reference {
            qualifier,
            ident: ident_id,
        });
        (expr, ident_id)
    }

    pub fn dereference(&mut self, operand: ExprId) -> ExprId {
        self.alloc(Expr::Dereference { operand })
    }

    pub fn index(&mut self, array: ExprId, indices: Vec<ExprId>) -> ExprId {
        self.alloc(Expr::Index { array, indices })
    }

    pub fn binary(&mut self, op: Operation, operands: Vec<ExprId>) -> ExprId {
        self.alloc(Expr::Binary { op, operands })
    }

    pub fn call(&mut self, callee: ExprId, arguments: Vec<ExprId>) -> ExprId {
        self.alloc(Expr::Call { callee, arguments })
    }

    pub fn unary(&mut self, op: UnaryOperation, operand: ExprId) -> ExprId {
        self.alloc(Expr::Unary { op, operand })
    }

    pub fn paren(&mut self, inner: ExprId) -> ExprId {
        self.alloc(Expr::Paren { inner })
    }

    pub fn literal(&mut self, kind: LiteralKind, span: Span) -> ExprId {
        self.alloc(Expr::Literal { kind, span })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ident::Identifier;

    #[test]
    fn arena_handles_round_trip() {
        let mut arena = ExprArena::new();
        let (expr, ident) = arena.reference(
            None,
            QualifiedIdent::new(vec![Identifier::synthetic("Foo")]),
        );
        match arena.expr(expr) {
            Some(Expr::Reference {
                qualifier: None,
                ident: got,
            }) => assert_eq!(*got, ident),
            other => panic!("unexpected node: {other:?}"),
        }
        assert_eq!(
            arena
                .ident(ident)
                .and_then(|qi| qi.name_part())
                .map(|p| p.name.as_str()),
            Some("Foo")
        );
    }

    #[test]
    fn first_meaningful_child_skips_nothing_on_literals() {
        let mut arena = ExprArena::new();
        let lit = arena.literal(LiteralKind::Integer, Span::default());
        let paren = arena.paren(lit);
        assert_eq!(
            arena.expr(paren).and_then(Expr::first_meaningful_child),
            Some(lit)
        );
        assert_eq!(arena.expr(lit).and_then(Expr::first_meaningful_child), None);
    }

    #[test]
    fn operation_token_mapping_is_case_insensitive() {
        assert_eq!(Operation::from_token("AS"), Some(Operation::As));
        assert_eq!(Operation::from_token("div"), Some(Operation::IntDiv));
        assert_eq!(Operation::from_token("??"), None);
    }
}
