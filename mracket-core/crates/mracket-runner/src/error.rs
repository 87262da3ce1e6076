//! The runner's error taxonomy.
//!
//! Every variant is a fatal, run-aborting failure from one of the setup phases
//! (precondition check, unmodified run, parsing) — per-mutant failures during
//! scheduling never abort the run and are reported as `execution-error` entries
//! instead (see [`crate::result::MutantOutput::is_execution_error`]).

use mracket_lex::LexError;
use mracket_par::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum RunnerFailure {
    #[error("Reader unable to read program: {0}")]
    ReaderError(String),
    #[error("Program missing DrRacket prefix")]
    NotDrRackety,
    #[error("Program not well-formed")]
    NotWellFormedProgram,
    #[error("Non-zero returncode when running unmodified source")]
    NonZeroUnmodifiedReturncode { returncode: Option<i32>, stderr: String },
    #[error("Test failure when running unmodified source")]
    UnmodifiedTestFailure,
    #[error("Non-zero returncode when running mutant")]
    NonZeroMutantReturncode,
    #[error("timeout")]
    Timeout,
    #[error("Unknown error: {0}")]
    UnknownError(String),
}

impl RunnerFailure {
    /// The stable, human-readable tag serialized into the output JSON's `"reason"`
    /// field.
    pub fn reason(&self) -> String {
        match self {
            RunnerFailure::ReaderError(cause) => format!("Reader unable to read program: {cause}"),
            RunnerFailure::NotDrRackety => "Program missing DrRacket prefix".to_string(),
            RunnerFailure::NotWellFormedProgram => "Program not well-formed".to_string(),
            RunnerFailure::NonZeroUnmodifiedReturncode { .. } => {
                "Non-zero returncode when running unmodified source".to_string()
            }
            RunnerFailure::UnmodifiedTestFailure => "Test failure when running unmodified source".to_string(),
            RunnerFailure::NonZeroMutantReturncode => "Non-zero returncode when running mutant".to_string(),
            RunnerFailure::Timeout => "timeout".to_string(),
            RunnerFailure::UnknownError(cause) => format!("Unknown error: {cause}"),
        }
    }
}

impl From<LexError> for RunnerFailure {
    fn from(e: LexError) -> Self {
        RunnerFailure::ReaderError(e.to_string())
    }
}

impl From<ParseError> for RunnerFailure {
    fn from(e: ParseError) -> Self {
        RunnerFailure::ReaderError(e.to_string())
    }
}
