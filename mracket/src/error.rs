//! Error handling module for the mracket CLI.
//!
//! This module provides custom error types using `thiserror` for structured
//! error handling throughout the application.

use thiserror::Error;

/// Main error type for the mracket CLI application.
///
/// Distinct from [`mracket_runner::RunnerFailure`], which is the per-file
/// failure taxonomy reported inside the output JSON: these variants cover
/// the CLI's own setup concerns (arguments, filesystem, config parsing)
/// that prevent a run from starting at all.
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file does not exist.
    #[error("input file not found: {0}")]
    InputNotFound(String),

    /// Output file already exists and `-f/--force` was not given.
    #[error("output file already exists: {0}")]
    OutputExists(String),

    /// Mutation-configuration file could not be read or parsed.
    #[error("invalid config file {path}: {source}")]
    Config { path: String, source: serde_json::Error },

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using CliError.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found_display() {
        let err = CliError::InputNotFound("missing.rkt".to_string());
        assert_eq!(err.to_string(), "input file not found: missing.rkt");
    }

    #[test]
    fn test_output_exists_display() {
        let err = CliError::OutputExists("out.json".to_string());
        assert_eq!(err.to_string(), "output file already exists: out.json");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io(_)));
    }
}
