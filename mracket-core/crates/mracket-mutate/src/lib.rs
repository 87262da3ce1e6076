//! Mutation generation, traversal, and application for mracket programs.
//!
//! [`generator`] holds the two mandated mutation rules, [`Mutator`] walks a program
//! deciding where each rule applies, and [`apply_mutations`] turns the resulting list
//! of [`Mutation`]s into a lazy sequence of [`Mutant`] source strings.

pub mod generator;

mod applier;
mod mutator;

use mracket_par::NodeId;

pub use applier::{apply_mutations, Applier};
pub use generator::MutationGenerator;
pub use mutator::Mutator;

/// One candidate edit: swap the node at `original` for `replacement`.
///
/// `original` and `replacement` are [`NodeId`]s into the same arena as the program
/// being mutated — see `mracket_par::ast` module docs for why this replaces the
/// identity-pointer design the specification allows as an alternative.
#[derive(Clone, Debug)]
pub struct Mutation {
    pub original: NodeId,
    pub replacement: NodeId,
    pub explanation: String,
}

/// A materialized mutant: the mutation that produced it, plus the full resulting
/// program source.
#[derive(Clone, Debug)]
pub struct Mutant {
    pub mutation: Mutation,
    pub source: String,
}

/// Errors raised while constructing a generator that pre-parses replacement source
/// (currently just [`generator::ProcedureApplicationReplacement`]).
#[derive(thiserror::Error, Debug)]
pub enum MutateError {
    #[error(transparent)]
    Lex(#[from] mracket_lex::LexError),
    #[error(transparent)]
    Parse(#[from] mracket_par::ParseError),
}
