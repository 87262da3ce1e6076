//! Drives mutants through the interpreter under a bounded pool of concurrent child
//! processes.

use std::thread;
use std::time::Duration;

use mracket_mutate::Mutant;

use crate::process::{InterpreterProcess, PollState};
use crate::result::MutantOutput;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs every mutant `mutants` yields through the interpreter, calling `on_result` once
/// per finished mutant as soon as it completes.
///
/// At most `max_processes` children run concurrently. Mutants are drained as they
/// finish, not in strict submission order — wall time, not scheduling order, decides
/// drain order once more than one process is in flight. This mirrors the same
/// "spawn while under the cap, poll the running set, drain what finished" loop both
/// while mutants remain and, once they're exhausted, for whatever is still running —
/// one shared loop body instead of duplicating it for the two phases.
pub fn run_mutants(
    interpreter: &str,
    max_processes: usize,
    timeout: Duration,
    mutants: impl Iterator<Item = Mutant>,
    mut on_result: impl FnMut(MutantOutput),
) -> std::io::Result<()> {
    let mut mutants = mutants;
    let mut exhausted = false;
    let mut running: Vec<(InterpreterProcess, Mutant)> = Vec::new();

    loop {
        while !exhausted && running.len() < max_processes {
            match mutants.next() {
                Some(mutant) => {
                    let process = InterpreterProcess::spawn(interpreter, &mutant.source, timeout)?;
                    running.push((process, mutant));
                }
                None => exhausted = true,
            }
        }

        let mut still_running = Vec::with_capacity(running.len());
        for (mut process, mutant) in running.drain(..) {
            match process.poll()? {
                PollState::Running => still_running.push((process, mutant)),
                PollState::Exited => {
                    let output = process.finish()?;
                    on_result(MutantOutput::from_process(
                        mutant.mutation,
                        output.returncode,
                        output.stdout,
                        output.stderr,
                    ));
                }
                PollState::TimedOut => {
                    process.finish()?;
                    on_result(MutantOutput::timeout(mutant.mutation));
                }
            }
        }
        running = still_running;

        if exhausted && running.is_empty() {
            return Ok(());
        }
        thread::sleep(POLL_INTERVAL);
    }
}
