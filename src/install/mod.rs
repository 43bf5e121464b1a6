use std::path::{Path, PathBuf};

use erdp::ErrorDisplay;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::notice::{Level, Notifier};
use crate::os::{Invocation, OsFamily, ProcessRunner};

pub mod msvc;
pub mod terminal;

/// Title of all notices.
pub const TITLE: &str = "BTK Easy Install";

/// Subfolder that ships the build scripts. It also receives the generated files.
pub const BATCH: &str = "Batch";

/// Script the user needs to run on Unix-like.
pub const UNIX_SCRIPT: &str = "EasyInstallWithRedistributableMatlabToolbox_GCC_Unix.sh";

/// Generates and runs the install script for the host OS.
pub struct Launcher<N, R> {
    os: OsFamily,
    os_name: String,
    dir: Option<PathBuf>,
    notifier: N,
    runner: R,
}

impl<N: Notifier, R: ProcessRunner> Launcher<N, R> {
    pub fn new(os_name: impl Into<String>, notifier: N, runner: R) -> Self {
        let os_name = os_name.into();

        Self {
            os: OsFamily::from_name(&os_name),
            os_name,
            dir: None,
            notifier,
            runner,
        }
    }

    /// Use `dir` instead of the current directory.
    #[cfg(test)]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Same as [`Self::run()`] but also report the error to the user.
    pub fn execute(&self) -> Result<Outcome, LaunchError> {
        self.run().inspect_err(|e| {
            error!(error = %e.display(), "launch failed");

            self.notifier.show(
                Level::Error,
                TITLE,
                &format!("Unexpected error: {}", e.display()),
            );
        })
    }

    pub fn run(&self) -> Result<Outcome, LaunchError> {
        // Resolve working directory.
        let dir = match &self.dir {
            Some(v) => std::path::absolute(v).map_err(LaunchError::CurrentDir)?,
            None => std::env::current_dir().map_err(LaunchError::CurrentDir)?,
        };

        info!(os = %self.os, dir = %dir.display(), "launching");

        // The directory ends up inside the scripts so it must be exact.
        let root = dir
            .to_str()
            .ok_or_else(|| LaunchError::NonUtf8Dir(dir.clone()))?;

        // Generate scripts.
        let cmd = match self.os {
            OsFamily::Windows => msvc::prepare(&dir, root)?,
            OsFamily::MacOs => terminal::prepare(&dir, root)?,
            OsFamily::Unix => {
                // The directory we got is not reliable when started from a desktop launcher (it
                // may be the home directory instead) so we can't run anything ourselves.
                self.notifier.show(
                    Level::Info,
                    TITLE,
                    &format!(
                        "The build cannot be started automatically on this system.\n\
                         To build BTK with Matlab, run '{UNIX_SCRIPT}'\n\
                         in the subfolder {BATCH}."
                    ),
                );

                return Ok(Outcome::Manual);
            }
            OsFamily::Unsupported => {
                return Err(LaunchError::UnsupportedPlatform(self.os_name.clone()));
            }
        };

        // Run.
        let code = self.spawn(&cmd)?;

        Ok(Outcome::Launched { code })
    }

    fn spawn(&self, cmd: &Invocation) -> Result<Option<i32>, LaunchError> {
        info!(command = %cmd, "running");

        let code = self
            .runner
            .run_and_wait(cmd)
            .map_err(|e| LaunchError::Spawn(cmd.to_string(), e))?;

        match code {
            Some(v) => info!(code = v, "'{}' exited", cmd.prog),
            None => warn!("'{}' was terminated by a signal", cmd.prog),
        }

        Ok(code)
    }
}

/// Result of a successful launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The generated script was run. The exit code is not checked.
    Launched { code: Option<i32> },
    /// Nothing was run; the user was told how to start the build.
    Manual,
}

/// Classification of [`LaunchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedPlatform,
    UnexpectedError,
}

/// Represents an error when [`Launcher`] fails.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("unsupported OS '{0}', contact the developers")]
    UnsupportedPlatform(String),

    #[error("couldn't resolve the current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("{} is not valid UTF-8", .0.display())]
    NonUtf8Dir(PathBuf),

    #[error("'{0}' does not start with a drive")]
    NoDrive(String),

    #[error("couldn't write {}", .0.display())]
    WriteFile(PathBuf, #[source] std::io::Error),

    #[error("couldn't run '{0}'")]
    Spawn(String, #[source] std::io::Error),
}

impl LaunchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedPlatform(_) => ErrorKind::UnsupportedPlatform,
            Self::CurrentDir(_)
            | Self::NonUtf8Dir(_)
            | Self::NoDrive(_)
            | Self::WriteFile(..)
            | Self::Spawn(..) => ErrorKind::UnexpectedError,
        }
    }
}

/// Create or truncate `path` with `content`.
fn write_file(path: &Path, content: &str) -> Result<(), LaunchError> {
    std::fs::write(path, content).map_err(|e| LaunchError::WriteFile(path.into(), e))?;

    info!(path = %path.display(), "written");

    Ok(())
}
