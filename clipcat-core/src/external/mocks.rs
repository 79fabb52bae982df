// clipcat-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for this crate's own tests and, via the "test-mocks" feature,
// for downstream test suites.

use super::{FfmpegProcess, FfmpegSpawner};
use crate::error::{CoreError, CoreResult};
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::sync::{Arc, Mutex};

/// Mock implementation of FfmpegProcess.
pub struct MockProcess {
    /// Events to emit when handle_events is called.
    events_to_emit: Vec<FfmpegEvent>,
    /// Exit status to return when wait is called.
    exit_status: ExitStatus,
}

impl FfmpegProcess for MockProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in std::mem::take(&mut self.events_to_emit) {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg invocation and its scripted outcome.
struct MockExpectation {
    arg_pattern: String,
    result: CoreResult<MockProcess>,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// Expectations are matched by substring against the spawned command's
/// arguments and consumed in registration order. Every spawned command's
/// full argument list is recorded for later assertions.
#[derive(Clone, Default)]
pub struct MockSpawner {
    expectations: Arc<Mutex<Vec<MockExpectation>>>,
    received_calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    fn add_expectation(&self, arg_pattern: &str, result: CoreResult<MockProcess>) {
        self.expectations
            .lock()
            .unwrap()
            .push(MockExpectation {
                arg_pattern: arg_pattern.to_string(),
                result,
            });
    }

    /// The next command whose args contain `arg_pattern` exits 0.
    pub fn expect_success(&self, arg_pattern: &str) {
        self.expect_success_with_events(arg_pattern, Vec::new());
    }

    /// Like `expect_success`, emitting the given events before exiting 0.
    pub fn expect_success_with_events(&self, arg_pattern: &str, events: Vec<FfmpegEvent>) {
        self.add_expectation(
            arg_pattern,
            Ok(MockProcess {
                events_to_emit: events,
                exit_status: ExitStatus::from_raw(0),
            }),
        );
    }

    /// The next command whose args contain `arg_pattern` exits with `raw_status`.
    pub fn expect_exit_error(&self, arg_pattern: &str, raw_status: i32) {
        self.add_expectation(
            arg_pattern,
            Ok(MockProcess {
                events_to_emit: Vec::new(),
                exit_status: ExitStatus::from_raw(raw_status),
            }),
        );
    }

    /// The next command whose args contain `arg_pattern` fails to spawn at all.
    pub fn expect_spawn_error(&self, arg_pattern: &str, error: CoreError) {
        self.add_expectation(arg_pattern, Err(error));
    }

    /// Full argument lists of every spawned command, in spawn order.
    pub fn received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.lock().unwrap().clone()
    }
}

impl FfmpegSpawner for MockSpawner {
    type Process = MockProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.lock().unwrap().push(args.clone());

        let mut expectations = self.expectations.lock().unwrap();
        let found_index = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        match found_index {
            Some(index) => expectations.remove(index).result,
            None => panic!("MockSpawner: no expectation found for command args: {args:?}"),
        }
    }
}
