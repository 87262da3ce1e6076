//! Replaces a procedure-application head with one of its configured replacement names.

use indexmap::IndexMap;
use mracket_lex::{Token, TokenKind};
use mracket_par::{Ast, NodeId, NodeKind};

use super::MutationGenerator;
use crate::Mutation;

/// Config: `{procedure-name -> [replacement-name...]}`.
///
/// For every `ProcedureApplication` whose head is a `Name` found in the mapping, yields
/// one mutation per configured replacement whose `original` is the head `Name` node and
/// whose `replacement` is a freshly synthesized `Name` node carrying the replacement
/// symbol. Applications with zero expressions or a non-symbol head are ignored.
pub struct ProcedureReplacement {
    replacements: IndexMap<String, Vec<String>>,
}

impl ProcedureReplacement {
    pub fn new(replacements: IndexMap<String, Vec<String>>) -> Self {
        Self { replacements }
    }
}

impl MutationGenerator for ProcedureReplacement {
    fn generate(&self, ast: &mut Ast, id: NodeId) -> Vec<Mutation> {
        let procedure = match ast.get(id) {
            NodeKind::ProcedureApplication { expressions, .. } => match expressions.first() {
                Some(&procedure) => procedure,
                None => return Vec::new(),
            },
            _ => return Vec::new(),
        };
        let (procedure_name, line, column) = match ast.get(procedure) {
            NodeKind::Name { token } => (token.source.clone(), token.line, token.column),
            _ => return Vec::new(),
        };
        let Some(replacement_names) = self.replacements.get(&procedure_name) else {
            return Vec::new();
        };

        let mut mutations = Vec::with_capacity(replacement_names.len());
        for replacement in replacement_names {
            let replacement_id =
                ast.alloc(NodeKind::Name { token: Token::synthesized(TokenKind::Symbol, replacement.clone()) });
            let explanation = format!(
                "Replace procedure `{procedure_name}' at line {line}, column {column} with {replacement}"
            );
            mutations.push(Mutation { original: procedure, replacement: replacement_id, explanation });
        }
        mutations
    }
}
