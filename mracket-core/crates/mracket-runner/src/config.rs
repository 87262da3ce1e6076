//! Deserializes the `-c/--config` mutation-configuration file and builds the
//! [`Mutator`] it describes.

use indexmap::IndexMap;
use mracket_mutate::generator::{ProcedureApplicationReplacement, ProcedureReplacement};
use mracket_mutate::{MutateError, MutationGenerator, Mutator};
use mracket_par::Ast;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub mutators: MutatorsConfig,
}

#[derive(Debug, Deserialize)]
pub struct MutatorsConfig {
    pub general: Vec<GeneratorConfig>,
    #[serde(rename = "procedure-specific", default)]
    pub procedure_specific: Vec<ProcedureSpecificConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ProcedureSpecificConfig {
    #[serde(rename = "procedure-name")]
    pub procedure_name: String,
    pub mutator: Vec<GeneratorConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum GeneratorConfig {
    #[serde(rename = "procedure replacement")]
    ProcedureReplacement { replacements: IndexMap<String, Vec<String>> },
    #[serde(rename = "procedure application replacement")]
    ProcedureApplicationReplacement { replacements: IndexMap<String, Vec<String>> },
}

impl Config {
    /// Builds the top-level [`Mutator`] this configuration describes.
    ///
    /// `ast` is the arena the resulting mutator — and any
    /// `ProcedureApplicationReplacement` generator within it, which pre-parses its
    /// replacement expressions at construction time — allocates into. It must be the
    /// same arena as the program that will later be mutated, so the allocated
    /// replacement nodes are valid `NodeId`s against it.
    pub fn build_mutator(&self, ast: &mut Ast) -> Result<Mutator, MutateError> {
        let general = build_generators(ast, &self.mutators.general)?;
        let mut name_specific = IndexMap::new();
        for entry in &self.mutators.procedure_specific {
            let generators = build_generators(ast, &entry.mutator)?;
            name_specific.insert(entry.procedure_name.clone(), Mutator::new(generators, IndexMap::new()));
        }
        Ok(Mutator::new(general, name_specific))
    }
}

fn build_generators(
    ast: &mut Ast,
    configs: &[GeneratorConfig],
) -> Result<Vec<Box<dyn MutationGenerator>>, MutateError> {
    let mut generators: Vec<Box<dyn MutationGenerator>> = Vec::with_capacity(configs.len());
    for config in configs {
        let generator: Box<dyn MutationGenerator> = match config {
            GeneratorConfig::ProcedureReplacement { replacements } => {
                Box::new(ProcedureReplacement::new(replacements.clone()))
            }
            GeneratorConfig::ProcedureApplicationReplacement { replacements } => {
                Box::new(ProcedureApplicationReplacement::new(ast, replacements.clone())?)
            }
        };
        generators.push(generator);
    }
    Ok(generators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mracket_lex::Lexer;
    use mracket_par::parse;

    #[test]
    fn deserializes_general_and_procedure_specific_sections() {
        let json = r#"
        {
            "mutators": {
                "general": [
                    { "type": "procedure replacement", "replacements": { "+": ["-", "*"] } }
                ],
                "procedure-specific": [
                    { "procedure-name": "f", "mutator": [
                        { "type": "procedure application replacement", "replacements": { "list": ["'()"] } }
                    ] }
                ]
            }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.mutators.general.len(), 1);
        assert_eq!(config.mutators.procedure_specific.len(), 1);
        assert_eq!(config.mutators.procedure_specific[0].procedure_name, "f");
    }

    #[test]
    fn builds_a_working_mutator() {
        let json = r#"
        {
            "mutators": {
                "general": [
                    { "type": "procedure replacement", "replacements": { "+": ["-", "*"] } }
                ]
            }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        let mut ast = parse(Lexer::tokenize("#lang racket\n(+ 1)").unwrap()).unwrap();
        let mutator = config.build_mutator(&mut ast).unwrap();
        assert_eq!(mutator.generate_mutations(&mut ast).len(), 2);
    }
}
