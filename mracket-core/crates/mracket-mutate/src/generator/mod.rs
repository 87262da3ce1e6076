//! Mutation generators: rules that look at one AST node at a time and decide whether
//! it is a site for a mutation.

pub mod procedure_application_replacement;
pub mod procedure_replacement;

pub use procedure_application_replacement::ProcedureApplicationReplacement;
pub use procedure_replacement::ProcedureReplacement;

use mracket_par::{Ast, NodeId};

use crate::Mutation;

/// Looks at one AST node and yields zero or more mutations rooted there.
///
/// Both mandated generators only ever act on `ProcedureApplication` nodes and return
/// nothing for anything else, which is why this trait has a single method instead of
/// mirroring [`mracket_par::Visitor`]'s one-method-per-variant shape — a generator that
/// does need per-variant dispatch can still match on `ast.get(id)` inside `generate`.
/// `ast` is `&mut` because building a replacement node (a synthesized `Name`, or an
/// expression pre-parsed at construction time) means allocating into the same arena
/// the mutated program lives in.
pub trait MutationGenerator {
    fn generate(&self, ast: &mut Ast, id: NodeId) -> Vec<Mutation>;
}
