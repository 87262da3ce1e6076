//! Orchestrates one end-to-end mutation-testing run over a single input file.

use std::path::Path;
use std::time::Duration;

use mracket_lex::Lexer;
use mracket_mutate::apply_mutations;
use mracket_par::parse;

use crate::config::Config;
use crate::error::RunnerFailure;
use crate::process::{InterpreterProcess, PollState};
use crate::report::ProgramOutput;
use crate::result::RunnerOutput;
use crate::scheduler::run_mutants;

/// The specific comment header DrRacket inserts at the top of every file it saves;
/// this tool only accepts files carrying it.
pub const DRRACKET_PREFIX: &str = ";; The first three lines of this file were inserted by DrRacket.";

const DEFAULT_MAX_PROCESSES: usize = 100;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Runner {
    pub interpreter: String,
    pub max_processes: usize,
    pub mutant_timeout: Duration,
}

impl Default for Runner {
    fn default() -> Self {
        Self { interpreter: "racket".to_string(), max_processes: DEFAULT_MAX_PROCESSES, mutant_timeout: DEFAULT_TIMEOUT }
    }
}

impl Runner {
    /// Precondition check: is the interpreter discoverable on `$PATH`?
    pub fn interpreter_available(&self) -> bool {
        let Some(path_var) = std::env::var_os("PATH") else { return false };
        std::env::split_paths(&path_var).any(|dir| dir.join(&self.interpreter).is_file())
    }

    /// Runs the full pipeline over `filepath`, never propagating a hard error: setup
    /// failures are folded into a failure-shaped [`RunnerOutput`], matching the
    /// reference design's "abort this file, keep going for the rest of the batch"
    /// contract.
    pub fn run(&self, filepath: &Path, config: &Config) -> std::io::Result<RunnerOutput> {
        let filepath_str = filepath.display().to_string();
        match self.run_inner(filepath, config) {
            Ok(output) => Ok(output),
            Err(failure) => Ok(RunnerOutput::failure(filepath_str, failure.reason())),
        }
    }

    fn run_inner(&self, filepath: &Path, config: &Config) -> Result<RunnerOutput, RunnerFailure> {
        let filepath_str = filepath.display().to_string();

        if !self.interpreter_available() {
            return Err(RunnerFailure::UnknownError(format!("interpreter `{}' not found on PATH", self.interpreter)));
        }
        if !filepath.is_file() {
            return Err(RunnerFailure::UnknownError(format!("{} not found", filepath.display())));
        }
        let source = std::fs::read_to_string(filepath).map_err(|e| RunnerFailure::UnknownError(e.to_string()))?;
        if !source.starts_with(DRRACKET_PREFIX) {
            return Err(RunnerFailure::NotDrRackety);
        }

        tracing::debug!("tokenizing");
        let tokens = Lexer::tokenize(&source)?;
        tracing::debug!("parsing");
        let mut ast = parse(tokens)?;

        tracing::debug!("running the unmodified program");
        self.run_unmodified(&source)?;

        tracing::debug!("generating mutations");
        let mutator = config.build_mutator(&mut ast).map_err(|e| RunnerFailure::UnknownError(e.to_string()))?;
        let mutations = mutator.generate_mutations(&mut ast);
        tracing::debug!(count = mutations.len(), "generated mutations");

        tracing::debug!("running the mutated programs");
        let mut outputs = Vec::with_capacity(mutations.len());
        {
            let mutants = apply_mutations(&mut ast, &mutations);
            run_mutants(&self.interpreter, self.max_processes, self.mutant_timeout, mutants, |result| {
                outputs.push(result);
            })
            .map_err(|e| RunnerFailure::UnknownError(e.to_string()))?;
        }

        Ok(RunnerOutput::success(filepath_str, &outputs))
    }

    /// Runs the unmodified source, verifying it is green before any mutant is scored.
    ///
    /// The *stringified* source isn't run here because it hasn't been built yet at
    /// this point in the pipeline — the reference design re-runs the raw file text
    /// directly, on the grounds that it and `stringify(parse(tokenize(source)))` are
    /// required to behave identically (see the semantic round-trip property).
    fn run_unmodified(&self, source: &str) -> Result<(), RunnerFailure> {
        let mut process = InterpreterProcess::spawn(&self.interpreter, source, self.mutant_timeout)
            .map_err(|e| RunnerFailure::UnknownError(e.to_string()))?;
        loop {
            match process.poll().map_err(|e| RunnerFailure::UnknownError(e.to_string()))? {
                PollState::Running => std::thread::sleep(Duration::from_millis(100)),
                PollState::Exited | PollState::TimedOut => break,
            }
        }
        let output = process.finish().map_err(|e| RunnerFailure::UnknownError(e.to_string()))?;
        if output.returncode != Some(0) || !output.stderr.is_empty() {
            return Err(RunnerFailure::NonZeroUnmodifiedReturncode {
                returncode: output.returncode,
                stderr: output.stderr,
            });
        }
        let report = ProgramOutput::parse(&output.stdout);
        if report.failed > 0 {
            return Err(RunnerFailure::UnmodifiedTestFailure);
        }
        Ok(())
    }
}
