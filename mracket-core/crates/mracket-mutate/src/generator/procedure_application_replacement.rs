//! Replaces a whole procedure application with a pre-parsed replacement expression.

use indexmap::IndexMap;
use mracket_lex::Lexer;
use mracket_par::{parse_expression_into, stringify_node, Ast, NodeId, NodeKind};

use super::MutationGenerator;
use crate::{Mutation, MutateError};

/// Config: `{procedure-name -> [replacement-source...]}`.
///
/// Each replacement source is tokenized and parsed exactly once, at construction time,
/// into the same arena as the program it will later mutate. For every matching
/// application, yields a mutation whose `original` is the whole application node and
/// whose `replacement` is one of the pre-parsed expressions.
pub struct ProcedureApplicationReplacement {
    replacements: IndexMap<String, Vec<NodeId>>,
}

impl ProcedureApplicationReplacement {
    pub fn new(ast: &mut Ast, replacements: IndexMap<String, Vec<String>>) -> Result<Self, MutateError> {
        let mut processed = IndexMap::new();
        for (procedure_name, sources) in replacements {
            let mut ids = Vec::with_capacity(sources.len());
            for source in sources {
                let tokens = Lexer::tokenize(&source)?;
                ids.push(parse_expression_into(ast, tokens)?);
            }
            processed.insert(procedure_name, ids);
        }
        Ok(Self { replacements: processed })
    }
}

impl MutationGenerator for ProcedureApplicationReplacement {
    fn generate(&self, ast: &mut Ast, id: NodeId) -> Vec<Mutation> {
        let procedure = match ast.get(id) {
            NodeKind::ProcedureApplication { expressions, .. } => match expressions.first() {
                Some(&procedure) => procedure,
                None => return Vec::new(),
            },
            _ => return Vec::new(),
        };
        let procedure_name = match ast.get(procedure) {
            NodeKind::Name { token } => token.source.clone(),
            _ => return Vec::new(),
        };
        let Some(replacement_ids) = self.replacements.get(&procedure_name) else {
            return Vec::new();
        };

        let mut mutations = Vec::with_capacity(replacement_ids.len());
        for &replacement in replacement_ids {
            let explanation = format!(
                "Replace procedure application of {procedure_name} with {}",
                stringify_node(ast, replacement)
            );
            mutations.push(Mutation { original: id, replacement, explanation });
        }
        mutations
    }
}
