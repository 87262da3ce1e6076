//! Turns a materialized list of [`Mutation`]s into a lazy sequence of [`Mutant`]s.
//!
//! The reference algorithm (swap-stringify-restore) revisits the whole tree looking
//! for the parent slot holding each mutation's `original` node, because its AST nodes
//! are identified by object identity and have no stable index of their own. Here every
//! node already lives at a stable [`mracket_par::NodeId`] slot in the arena, so the
//! swap can address that slot directly — [`Ast::replace`] — without walking the tree to
//! find it. The externally observable sequence of mutants is unchanged: one mutant per
//! mutation, in the order the mutations were generated.

use mracket_par::{stringify, Ast};

use crate::{Mutant, Mutation};

/// Lazily applies `mutations` to `ast`, one at a time, restoring `ast` to its original
/// state after each. Holds at most one stringified program in memory at a time.
pub struct Applier<'a> {
    ast: &'a mut Ast,
    mutations: std::slice::Iter<'a, Mutation>,
}

impl<'a> Applier<'a> {
    pub fn new(ast: &'a mut Ast, mutations: &'a [Mutation]) -> Self {
        Self { ast, mutations: mutations.iter() }
    }
}

impl Iterator for Applier<'_> {
    type Item = Mutant;

    fn next(&mut self) -> Option<Mutant> {
        let mutation = self.mutations.next()?;
        let original = self.ast.get(mutation.original).clone();
        let replacement = self.ast.get(mutation.replacement).clone();
        self.ast.replace(mutation.original, replacement);
        let source = stringify(self.ast);
        self.ast.replace(mutation.original, original);
        Some(Mutant { mutation: mutation.clone(), source })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.mutations.size_hint()
    }
}

/// Convenience entry point; see [`Applier`].
pub fn apply_mutations<'a>(ast: &'a mut Ast, mutations: &'a [Mutation]) -> Applier<'a> {
    Applier::new(ast, mutations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ProcedureReplacement;
    use crate::Mutator;
    use indexmap::IndexMap;
    use mracket_lex::Lexer;
    use mracket_par::parse;

    #[test]
    fn applies_each_mutation_and_restores_the_tree() {
        let mut ast = parse(Lexer::tokenize("#lang racket\n(+ 1)").unwrap()).unwrap();
        let mut replacements = IndexMap::new();
        replacements.insert("+".to_string(), vec!["-".to_string(), "*".to_string()]);
        let mutator = Mutator::new(vec![Box::new(ProcedureReplacement::new(replacements))], IndexMap::new());
        let mutations = mutator.generate_mutations(&mut ast);
        // Capture after mutation generation (which allocates replacement nodes) but
        // before the applier's swap/restore cycle.
        let before = ast.clone();

        let mutants: Vec<Mutant> = apply_mutations(&mut ast, &mutations).collect();
        let sources: Vec<&str> = mutants.iter().map(|m| m.source.as_str()).collect();
        assert_eq!(sources, vec!["#lang racket\n(- 1)", "#lang racket\n(* 1)"]);

        // Swap-and-restore leaves the arena exactly as it was before applying.
        assert_eq!(format!("{before:?}"), format!("{:?}", ast));
    }
}
