//! Syntax layer: the expression AST the resolution engine walks.
//!
//! The engine consumes trees that are already built (by an external parser
//! or by hand in tests); this module only defines their shape.

pub mod expr;
pub mod ident;

pub use expr::{Expr, ExprArena, ExprId, LiteralKind, Operation, UnaryOperation};
pub use ident::{IdentId, Identifier, QualifiedIdent};
