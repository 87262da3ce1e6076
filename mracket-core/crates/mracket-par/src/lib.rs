//! AST, visitor, parser, and stringifier for the Racket-like dialect `mracket-lex`
//! tokenizes.
//!
//! The AST lives in a flat arena ([`ast::Ast`]); nodes reference each other by
//! [`ast::NodeId`] rather than by owned pointer, which gives mutation generation a safe
//! notion of node identity without unsafe code (see `ast` module docs). [`parser::parse`]
//! builds the arena from a token stream, applying every desugaring the grammar requires
//! (function-definition shorthand, quote abbreviations, `if` → `cond`) so that later
//! consumers — the stringifier here, and the mutation engine in `mracket-mutate` — see a
//! uniform tree.

pub mod ast;
mod error;
mod parser;
mod stringify;
pub mod visitor;

pub use ast::{Ast, LetKind, NodeId, NodeKind, TestCaseKind};
pub use error::{ParseError, ParseResult};
pub use parser::{parse, parse_expression_into};
pub use stringify::{stringify, stringify_node};
pub use visitor::{accept, children, Visitor};
