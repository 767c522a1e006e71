//! External command boundary
//!
//! Every installer and package-manager invocation goes through a
//! [`CommandRunner`], so the workflow can be exercised without spawning
//! real processes.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::process::Command;

/// A command to execute, together with its shell-level rendering for the audit log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable to spawn
    pub program: OsString,
    /// Arguments passed verbatim
    pub args: Vec<OsString>,
    /// The line a user would type to run the same thing
    pub display: String,
}

impl CommandSpec {
    /// Build a command whose display text is the program followed by its arguments
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        let program = program.into();
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let display = std::iter::once(&program)
            .chain(args.iter())
            .map(|part| part.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            program,
            args,
            display,
        }
    }

    /// Run a command line through `cmd /C`, displaying only the line itself
    pub fn cmd_shell<I, A>(parts: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        let parts: Vec<OsString> = parts.into_iter().map(Into::into).collect();
        let display = parts
            .iter()
            .map(|part| part.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");

        let mut args = vec![OsString::from("/C")];
        args.extend(parts);

        Self {
            program: OsString::from("cmd"),
            args,
            display,
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Synchronous process execution
pub trait CommandRunner {
    /// Run the command to completion and capture its output
    fn run(&self, command: &CommandSpec) -> io::Result<CommandOutput>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> io::Result<CommandOutput> {
        tracing::debug!(command = %command, "spawning process");

        let output = Command::new(&command.program)
            .args(&command.args)
            .output()?;

        tracing::debug!(command = %command, status = ?output.status.code(), "process finished");

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording runner shared by unit tests

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::{CommandOutput, CommandRunner, CommandSpec};

    /// Records every command and answers with scripted exit codes (default 0)
    #[derive(Default)]
    pub struct RecordingRunner {
        pub calls: RefCell<Vec<CommandSpec>>,
        pub exit_codes: RefCell<VecDeque<i32>>,
    }

    impl RecordingRunner {
        pub fn with_exit_codes(codes: &[i32]) -> Self {
            Self {
                calls: RefCell::default(),
                exit_codes: RefCell::new(codes.iter().copied().collect()),
            }
        }

        pub fn displays(&self) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .map(|c| c.display.clone())
                .collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, command: &CommandSpec) -> std::io::Result<CommandOutput> {
            self.calls.borrow_mut().push(command.clone());
            let code = self.exit_codes.borrow_mut().pop_front().unwrap_or(0);
            Ok(CommandOutput {
                code: Some(code),
                stdout: format!("ran {}", command.display),
                stderr: if code == 0 {
                    String::new()
                } else {
                    "boom".to_string()
                },
            })
        }
    }
}
