use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::process::{Command, Stdio};

use tracing::debug;

/// Program to run with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub prog: String,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(prog: impl Into<String>) -> Self {
        Self {
            prog: prog.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, v: impl Into<OsString>) -> Self {
        self.args.push(v.into());
        self
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prog)?;

        for a in &self.args {
            write!(f, " {}", a.to_string_lossy())?;
        }

        Ok(())
    }
}

/// Spawns a process and blocks until it exits.
pub trait ProcessRunner {
    /// Returns the exit code of the process or [`None`] if it was terminated by a signal.
    fn run_and_wait(&self, cmd: &Invocation) -> std::io::Result<Option<i32>>;
}

/// Implementation of [`ProcessRunner`] using [`std::process::Command`].
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run_and_wait(&self, cmd: &Invocation) -> std::io::Result<Option<i32>> {
        let mut prog = Command::new(&cmd.prog);

        prog.args(&cmd.args);

        // Setup streams.
        prog.stdin(Stdio::null());
        prog.stdout(Stdio::inherit());
        prog.stderr(Stdio::inherit());

        // Run.
        debug!(command = %cmd, "spawning");

        prog.status().map(|s| s.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_command_line() {
        let cmd = Invocation::new("cmd").arg("/c").arg(r"C:\BTK\Batch\start.cmd");

        assert_eq!(cmd.to_string(), r"cmd /c C:\BTK\Batch\start.cmd");
        assert_eq!(Invocation::new("open").to_string(), "open");
    }

    #[test]
    fn missing_program() {
        let cmd = Invocation::new("easy-install-no-such-program");

        assert!(SystemRunner.run_and_wait(&cmd).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn exit_code() {
        let cmd = Invocation::new("sh").arg("-c").arg("exit 3");

        assert_eq!(SystemRunner.run_and_wait(&cmd).unwrap(), Some(3));
    }
}
