//! mracket-runner — drives mutation testing for a single mracket program.
//!
//! Given a parsed program and a mutation [`Config`], this crate runs the
//! unmodified source through the Racket interpreter, generates mutants with
//! `mracket-mutate`, schedules them through a bounded pool of interpreter
//! child processes, and scores the result into the tool's output JSON shape.

mod config;
mod error;
mod process;
mod report;
mod result;
mod runner;
mod scheduler;

pub use config::{Config, GeneratorConfig, MutatorsConfig, ProcedureSpecificConfig};
pub use error::RunnerFailure;
pub use process::{InterpreterOutput, InterpreterProcess, PollState, PROGRAM_SUFFIX};
pub use report::{ProgramOutput, TestFailure};
pub use result::{MutantOutput, MutationResult, MutationScore, RunnerOutput, Summary};
pub use runner::{Runner, DRRACKET_PREFIX};
pub use scheduler::run_mutants;
