//! Parses an interpreter's captured stdout into a pass/fail tally.

use regex::Regex;
use std::sync::OnceLock;

/// One `check-expect`-family failure, extracted from a `"Check failures:"` block.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TestFailure {
    pub actual: String,
    pub expected: String,
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for TestFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Actual value {} differs from {}, the expected value", self.actual, self.expected)
    }
}

/// The outcome of running one Racket program (unmodified or a mutant) through the
/// interpreter's `test-engine/racket-tests` report.
///
/// Parsed from `stdout` by five ordered rules, applied in order — the first that
/// matches wins:
///
/// 1. Contains `"The test passed!"` -> passed=1, failed=0.
/// 2. Contains `"Both tests passed!"` -> passed=2, failed=0.
/// 3. Matches `(\d+) tests passed!` -> passed=N, failed=0.
/// 4. Matches `Ran (\d+) test.*?0 tests passed\.` (dotall) -> passed=0, failed=N.
/// 5. Matches `(\d+) of the (\d+) tests failed\.` -> failed=A, passed=B-A.
///
/// Anything else leaves passed=failed=0. When the report reports failures, the
/// `"Check failures:"` block (if present) is additionally parsed into [`TestFailure`]
/// entries for diagnostic detail.
#[derive(Clone, Debug, Default)]
pub struct ProgramOutput {
    pub passed: u32,
    pub failed: u32,
    pub failures: Vec<TestFailure>,
}

impl ProgramOutput {
    pub fn total(&self) -> u32 {
        self.passed + self.failed
    }

    pub fn parse(stdout: &str) -> Self {
        if stdout.contains("The test passed!") {
            return Self { passed: 1, failed: 0, failures: Vec::new() };
        }
        if stdout.contains("Both tests passed!") {
            return Self { passed: 2, failed: 0, failures: Vec::new() };
        }
        if let Some(caps) = tests_passed_re().captures(stdout) {
            let passed = caps[1].parse().unwrap_or(0);
            return Self { passed, failed: 0, failures: Vec::new() };
        }
        if let Some(caps) = ran_zero_passed_re().captures(stdout) {
            let failed = caps[1].parse().unwrap_or(0);
            return Self { passed: 0, failed, failures: parse_failures(stdout) };
        }
        if let Some(caps) = tests_failed_re().captures(stdout) {
            let failed: u32 = caps[1].parse().unwrap_or(0);
            let total: u32 = caps[2].parse().unwrap_or(0);
            return Self { passed: total.saturating_sub(failed), failed, failures: parse_failures(stdout) };
        }
        Self::default()
    }
}

fn parse_failures(stdout: &str) -> Vec<TestFailure> {
    if !stdout.contains("Check failures:") {
        return Vec::new();
    }
    check_failure_re()
        .captures_iter(stdout)
        .filter_map(|caps| {
            Some(TestFailure {
                actual: caps.get(1)?.as_str().to_string(),
                expected: caps.get(2)?.as_str().to_string(),
                line: caps.get(3)?.as_str().parse().ok()?,
                column: caps.get(4)?.as_str().parse().ok()?,
            })
        })
        .collect()
}

fn tests_passed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+) tests passed!").unwrap())
}

fn ran_zero_passed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)Ran (\d+) test.*?0 tests passed\.").unwrap())
}

fn tests_failed_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+) of the (\d+) tests failed\.").unwrap())
}

fn check_failure_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)Actual value │ (.*?) │ differs from │ (.*?) │, the expected value.*?line (\d+), column (\d+)")
            .unwrap()
    })
}
