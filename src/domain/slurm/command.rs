use std::fmt;
use std::io;
use std::process::Command;

use crate::api::config_dto::CommandDto;
use crate::error::{Error, Result};

/// Program plus arguments of one status tool invocation. No shell is involved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self { program: program.into(), args: args.iter().map(|arg| arg.to_string()).collect() }
    }
}

impl From<CommandDto> for CommandSpec {
    fn from(dto: CommandDto) -> Self {
        Self { program: dto.program, args: dto.args }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code; `None` when the process was killed by a signal.
    pub status: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs a command to completion and captures its output.
///
/// `Err` means the command could not be started at all.
pub trait CommandRunner: fmt::Debug + Send + Sync {
    fn run(&self, command: &CommandSpec) -> io::Result<CommandOutput>;
}

/// Runs commands as local child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &CommandSpec) -> io::Result<CommandOutput> {
        let output = Command::new(&command.program).args(&command.args).output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        })
    }
}

/// Runs `command` and returns its stdout.
///
/// A command that cannot be started or exits non-zero is an error. With `lenient`
/// set, the failure is logged and the output is treated as empty instead, which the
/// parsers then read as "no records".
pub fn acquire(runner: &dyn CommandRunner, command: &CommandSpec, lenient: bool) -> Result<String> {
    log::debug!("Running `{}`", command);

    let error = match runner.run(command) {
        Ok(output) if output.success() => return Ok(output.stdout),
        Ok(output) => Error::CommandFailedError { command: command.to_string(), status: output.status, stderr: output.stderr.trim_end().to_string() },
        Err(source) => Error::CommandLaunchError { command: command.to_string(), source },
    };

    if lenient {
        log::warn!("{} Continuing with empty output.", error);
        return Ok(String::new());
    }

    log::error!("{}", error);
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slurm::runner_mock::MockRunner;

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let command = CommandSpec::new("sinfo", &["-o", "%P %a %l %D %t"]);
        assert_eq!(command.to_string(), r#"sinfo -o "%P %a %l %D %t""#);
    }

    #[test]
    fn successful_command_returns_stdout() {
        let command = CommandSpec::new("sinfo", &[]);
        let runner = MockRunner::new().with_output(&command, "HEADER\nrow\n");

        assert_eq!(acquire(&runner, &command, false).unwrap(), "HEADER\nrow\n");
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let command = CommandSpec::new("squeue", &["--me"]);
        let runner = MockRunner::new().with_failure(&command, 1, "slurm_load_jobs error: Unable to contact slurm controller\n");

        match acquire(&runner, &command, false) {
            Err(Error::CommandFailedError { command, status, stderr }) => {
                assert_eq!(command, "squeue --me");
                assert_eq!(status, Some(1));
                assert_eq!(stderr, "slurm_load_jobs error: Unable to contact slurm controller");
            }
            other => panic!("expected CommandFailedError, got {:?}", other),
        }
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let command = CommandSpec::new("scontrol", &[]);
        let error = acquire(&MockRunner::new(), &command, false).unwrap_err();

        assert!(matches!(error, Error::CommandLaunchError { .. }));
        assert!(error.is_acquisition());
    }

    #[test]
    fn lenient_mode_turns_failures_into_empty_output() {
        let command = CommandSpec::new("sinfo", &[]);
        let runner = MockRunner::new().with_failure(&command, 2, "boom");

        assert_eq!(acquire(&runner, &command, true).unwrap(), "");
        assert_eq!(acquire(&MockRunner::new(), &command, true).unwrap(), "");
    }

    #[test]
    fn process_runner_reports_unknown_programs() {
        let command = CommandSpec::new("this-program-does-not-exist-4f1c", &[]);
        assert!(ProcessRunner.run(&command).is_err());
    }
}
