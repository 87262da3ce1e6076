//! Aggregated run results and their output-JSON shape.

use mracket_mutate::Mutation;
use serde::Serialize;

use crate::report::ProgramOutput;

/// The outcome of running one mutant through the interpreter.
///
/// A mutant is *killed* if the test report shows at least one failure; an *execution
/// error* if stderr is non-empty or the returncode is non-zero; otherwise it
/// *survived*.
#[derive(Debug, Clone)]
pub struct MutantOutput {
    pub mutation: Mutation,
    pub returncode: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub report: ProgramOutput,
}

impl MutantOutput {
    pub fn from_process(mutation: Mutation, returncode: Option<i32>, stdout: String, stderr: String) -> Self {
        let report = ProgramOutput::parse(&stdout);
        Self { mutation, returncode, stdout, stderr, report }
    }

    pub fn timeout(mutation: Mutation) -> Self {
        Self { mutation, returncode: None, stdout: String::new(), stderr: "timeout".to_string(), report: ProgramOutput::default() }
    }

    pub fn is_execution_error(&self) -> bool {
        !self.stderr.is_empty() || matches!(self.returncode, Some(code) if code != 0)
    }

    pub fn is_killed(&self) -> bool {
        !self.is_execution_error() && self.report.failed > 0
    }
}

/// The summary `(total, killed, execution_error)` over all mutants of one input.
/// `survived` is derived, not stored: `total - killed - execution_error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MutationScore {
    pub total: u32,
    pub killed: u32,
    pub execution_error: u32,
}

impl MutationScore {
    pub fn survived(&self) -> u32 {
        self.total - self.killed - self.execution_error
    }
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub total: u32,
    pub killed: u32,
    #[serde(rename = "execution-error", skip_serializing_if = "Option::is_none")]
    pub execution_error: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct MutationResult {
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub killed: Option<bool>,
    #[serde(rename = "execution-error", skip_serializing_if = "Option::is_none")]
    pub execution_error: Option<String>,
}

/// The exact shape of `mracket`'s output JSON: `{filepath, execution-succeeded,
/// reason?, summary?, mutations?}`.
#[derive(Debug, Serialize)]
pub struct RunnerOutput {
    pub filepath: String,
    #[serde(rename = "execution-succeeded")]
    pub execution_succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutations: Option<Vec<MutationResult>>,
}

impl RunnerOutput {
    pub fn failure(filepath: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            filepath: filepath.into(),
            execution_succeeded: false,
            reason: Some(reason.into()),
            summary: None,
            mutations: None,
        }
    }

    pub fn success(filepath: impl Into<String>, mutant_outputs: &[MutantOutput]) -> Self {
        let mut killed = 0u32;
        let mut execution_error = 0u32;
        let mutations = mutant_outputs
            .iter()
            .map(|output| {
                if output.is_execution_error() {
                    execution_error += 1;
                    MutationResult {
                        explanation: output.mutation.explanation.clone(),
                        killed: None,
                        execution_error: Some(output.stderr.clone()),
                    }
                } else {
                    let is_killed = output.report.failed > 0;
                    if is_killed {
                        killed += 1;
                    }
                    MutationResult {
                        explanation: output.mutation.explanation.clone(),
                        killed: Some(is_killed),
                        execution_error: None,
                    }
                }
            })
            .collect();

        Self {
            filepath: filepath.into(),
            execution_succeeded: true,
            reason: None,
            summary: Some(Summary {
                total: mutant_outputs.len() as u32,
                killed,
                execution_error: (execution_error > 0).then_some(execution_error),
            }),
            mutations: Some(mutations),
        }
    }

    pub fn score(&self) -> Option<MutationScore> {
        self.summary.as_ref().map(|summary| MutationScore {
            total: summary.total,
            killed: summary.killed,
            execution_error: summary.execution_error.unwrap_or(0),
        })
    }
}
