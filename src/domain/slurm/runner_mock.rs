use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use crate::domain::slurm::command::{CommandOutput, CommandRunner, CommandSpec};

/// Canned command results for tests.
///
/// Commands without a registered result fail to launch with `NotFound`,
/// like a status tool that is not installed.
#[derive(Debug, Default)]
pub struct MockRunner {
    outputs: HashMap<CommandSpec, CommandOutput>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, command: &CommandSpec, stdout: &str) -> Self {
        let output = CommandOutput { stdout: stdout.to_string(), stderr: String::new(), status: Some(0) };
        self.outputs.insert(command.clone(), output);
        self
    }

    pub fn with_failure(mut self, command: &CommandSpec, status: i32, stderr: &str) -> Self {
        let output = CommandOutput { stdout: String::new(), stderr: stderr.to_string(), status: Some(status) };
        self.outputs.insert(command.clone(), output);
        self
    }

    /// Every command run so far, in call order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn call_count(&self, command: &CommandSpec) -> usize {
        self.calls().iter().filter(|call| *call == command).count()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &CommandSpec) -> io::Result<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }

        self.outputs
            .get(command)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{}: command not found", command.program)))
    }
}
