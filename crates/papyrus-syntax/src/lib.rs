//! Papyrus syntax tree.
//!
//! The tree the semantic checker consumes. Nodes live in a bumpalo arena and
//! borrow from it; every node the checker records results for carries a
//! [`NodeId`].
//!
//! The lexer and parser that normally produce these trees live outside this
//! workspace. [`AstBuilder`] builds trees directly.

mod builder;
mod decl;
mod expr;
mod node;
mod ops;
mod stmt;

pub use builder::AstBuilder;
pub use decl::*;
pub use expr::*;
pub use node::*;
pub use ops::*;
pub use stmt::*;
