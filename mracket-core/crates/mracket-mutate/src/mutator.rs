//! Walks a program deciding, at each node, which configured generators apply.

use indexmap::IndexMap;
use mracket_par::{Ast, NodeId, NodeKind};

use crate::generator::MutationGenerator;
use crate::Mutation;

/// Composes a list of generators and an optional name-scoped override map.
///
/// For every node it (a) runs each generator on that node, then (b) recurses into
/// children. A `NameDefinition` whose defined name matches an entry in
/// `name_specific_mutators` recurses into that definition's expression using the named
/// sub-mutator instead of `self`, which is how per-function mutation rules are scoped.
///
/// Five node kinds are traversal leaves and never recurse further:
/// `ReaderDirective`, `Literal`, `Name`, `TestCase`, `LibraryRequire`. Every other kind
/// recurses into its real children, in the same order the stringifier visits them, so
/// mutation output order is deterministic.
pub struct Mutator {
    generators: Vec<Box<dyn MutationGenerator>>,
    name_specific_mutators: IndexMap<String, Mutator>,
}

impl Mutator {
    pub fn new(generators: Vec<Box<dyn MutationGenerator>>, name_specific_mutators: IndexMap<String, Mutator>) -> Self {
        Self { generators, name_specific_mutators }
    }

    /// Runs this mutator over the whole program rooted at `ast.root()`.
    pub fn generate_mutations(&self, ast: &mut Ast) -> Vec<Mutation> {
        let root = ast.root();
        self.visit(ast, root)
    }

    fn visit(&self, ast: &mut Ast, id: NodeId) -> Vec<Mutation> {
        let mut mutations = Vec::new();
        for generator in &self.generators {
            mutations.extend(generator.generate(ast, id));
        }
        mutations.extend(self.recurse(ast, id));
        mutations
    }

    fn recurse(&self, ast: &mut Ast, id: NodeId) -> Vec<Mutation> {
        match ast.get(id).clone() {
            NodeKind::Program { directive, statements, .. } => {
                let mut mutations = self.visit(ast, directive);
                for statement in statements {
                    mutations.extend(self.visit(ast, statement));
                }
                mutations
            }
            NodeKind::ReaderDirective { .. } => Vec::new(),
            NodeKind::NameDefinition { name, expression, .. } => {
                let mut mutations = self.visit(ast, name);
                let defined_name = match ast.get(name) {
                    NodeKind::Name { token } => token.source.clone(),
                    _ => String::new(),
                };
                match self.name_specific_mutators.get(&defined_name) {
                    Some(sub_mutator) => mutations.extend(sub_mutator.visit(ast, expression)),
                    None => mutations.extend(self.visit(ast, expression)),
                }
                mutations
            }
            NodeKind::StructureDefinition { name, fields, .. } => {
                let mut mutations = self.visit(ast, name);
                for field in fields {
                    mutations.extend(self.visit(ast, field));
                }
                mutations
            }
            NodeKind::Literal { .. } => Vec::new(),
            NodeKind::Name { .. } => Vec::new(),
            NodeKind::Cond { branches, .. } => {
                let mut mutations = Vec::new();
                for (condition, result) in branches {
                    mutations.extend(self.visit(ast, condition));
                    mutations.extend(self.visit(ast, result));
                }
                mutations
            }
            NodeKind::Lambda { variables, body, .. } => {
                let mut mutations = Vec::new();
                for variable in variables {
                    mutations.extend(self.visit(ast, variable));
                }
                mutations.extend(self.visit(ast, body));
                mutations
            }
            NodeKind::Let { bindings, body, .. } => {
                let mut mutations = Vec::new();
                for (name, expr) in bindings {
                    mutations.extend(self.visit(ast, name));
                    mutations.extend(self.visit(ast, expr));
                }
                mutations.extend(self.visit(ast, body));
                mutations
            }
            NodeKind::Local { definitions, body, .. } => {
                let mut mutations = Vec::new();
                for definition in definitions {
                    mutations.extend(self.visit(ast, definition));
                }
                mutations.extend(self.visit(ast, body));
                mutations
            }
            NodeKind::ProcedureApplication { expressions, .. } => {
                let mut mutations = Vec::new();
                for expression in expressions {
                    mutations.extend(self.visit(ast, expression));
                }
                mutations
            }
            NodeKind::TestCase { .. } => Vec::new(),
            NodeKind::LibraryRequire { .. } => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{ProcedureApplicationReplacement, ProcedureReplacement};
    use mracket_lex::Lexer;
    use mracket_par::parse;

    fn index_map(pairs: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect())).collect()
    }

    #[test]
    fn procedure_replacement_counts_match_scenarios() {
        let mut ast = parse(Lexer::tokenize("#lang racket\n(+ 1)").unwrap()).unwrap();
        let generator = ProcedureReplacement::new(index_map(&[("+", &["-", "*"])]));
        let mutator = Mutator::new(vec![Box::new(generator)], IndexMap::new());
        assert_eq!(mutator.generate_mutations(&mut ast).len(), 2);

        let mut ast = parse(Lexer::tokenize("#lang racket\n(+ 1 (+ 2 3))").unwrap()).unwrap();
        let generator = ProcedureReplacement::new(index_map(&[("+", &["-", "*", "/"])]));
        let mutator = Mutator::new(vec![Box::new(generator)], IndexMap::new());
        assert_eq!(mutator.generate_mutations(&mut ast).len(), 6);
    }

    #[test]
    fn procedure_application_replacement_counts_match_scenarios() {
        let mut ast = parse(Lexer::tokenize("#lang racket\n(and (or #t))").unwrap()).unwrap();
        let generator = ProcedureApplicationReplacement::new(
            &mut ast,
            index_map(&[("and", &["#t", "#f"]), ("or", &["#t", "#f"])]),
        )
        .unwrap();
        let mutator = Mutator::new(vec![Box::new(generator)], IndexMap::new());
        assert_eq!(mutator.generate_mutations(&mut ast).len(), 4);
    }

    #[test]
    fn name_specific_mutator_scopes_rules_to_one_definition() {
        let source = "#lang racket\n(define (f) (+ 1 2))\n(define (g) (+ 1 2))";
        let mut ast = parse(Lexer::tokenize(source).unwrap()).unwrap();
        let mut scoped = IndexMap::new();
        scoped.insert(
            "f".to_string(),
            Mutator::new(vec![Box::new(ProcedureReplacement::new(index_map(&[("+", &["-"])])))], IndexMap::new()),
        );
        let mutator = Mutator::new(Vec::new(), scoped);
        // No general generators, so only `f`'s body (via the scoped sub-mutator) yields.
        assert_eq!(mutator.generate_mutations(&mut ast).len(), 1);
    }

    #[test]
    fn general_and_name_specific_rules_both_apply_in_one_traversal() {
        // A general `+ -> *` rule and an `f`-scoped `+ -> -` rule active at once: the
        // top-level `(+ 1)` only ever sees the general rule, and `f`'s body only ever
        // sees its own scoped rule — never both on the same node.
        let source = "#lang racket\n(+ 1)\n(define (f) (+ 1))";
        let mut ast = parse(Lexer::tokenize(source).unwrap()).unwrap();
        let mut scoped = IndexMap::new();
        scoped.insert(
            "f".to_string(),
            Mutator::new(vec![Box::new(ProcedureReplacement::new(index_map(&[("+", &["-"])])))], IndexMap::new()),
        );
        let general = ProcedureReplacement::new(index_map(&[("+", &["*"])]));
        let mutator = Mutator::new(vec![Box::new(general)], scoped);

        let mutations = mutator.generate_mutations(&mut ast);
        assert_eq!(mutations.len(), 2);

        let replacement_name = |id: NodeId| match ast.get(id) {
            NodeKind::Name { token } => token.source.clone(),
            other => panic!("expected a Name node, got {other:?}"),
        };
        assert_eq!(replacement_name(mutations[0].replacement), "*");
        assert_eq!(replacement_name(mutations[1].replacement), "-");
    }
}
