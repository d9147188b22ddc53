//! Scripted probe runner for tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use super::{Invocation, ProbeOutput, ProbeRunner};
use crate::error::Result;

/// Probe runner that replays scripted outputs instead of spawning
/// processes.
///
/// Outputs are keyed by the invocation's display form and consumed in
/// order, one per call, so a command probed twice can answer differently.
/// An invocation with nothing scripted reports its binary as absent,
/// which makes "this probe must never run" assertions easy: script
/// nothing and check [`FakeRunner::calls`].
#[derive(Debug, Default)]
pub struct FakeRunner {
    responses: RefCell<HashMap<String, VecDeque<ProbeOutput>>>,
    calls: RefCell<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an output for the given command line.
    pub fn script(&self, command: &str, output: ProbeOutput) {
        self.responses
            .borrow_mut()
            .entry(command.to_string())
            .or_default()
            .push_back(output);
    }

    /// Queue a successful probe that prints `stdout`.
    pub fn script_stdout(&self, command: &str, stdout: &str) {
        self.script(command, ProbeOutput::completed(0, stdout, ""));
    }

    /// Every command line probed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl ProbeRunner for FakeRunner {
    fn run(&self, invocation: &Invocation, _timeout: Duration) -> Result<ProbeOutput> {
        let key = invocation.to_string();
        self.calls.borrow_mut().push(key.clone());
        let scripted = self
            .responses
            .borrow_mut()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front());
        Ok(scripted.unwrap_or_else(ProbeOutput::not_found))
    }
}
