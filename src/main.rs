use std::process::{ExitCode, Termination};

use clap::{Arg, ArgAction, Command};
use tracing::debug;

use self::install::{ErrorKind, Launcher, Outcome};
use self::notice::{ConsoleNotifier, DialogNotifier, Notifier};
use self::os::SystemRunner;

mod install;
mod notice;
mod os;

fn main() -> Exit {
    // Parse arguments.
    let args = Command::new("BTK Easy Install")
        .about("Build the BTK toolbox for Matlab with the bundled batch scripts")
        .version(clap::crate_version!())
        .arg(
            Arg::new("os")
                .long("os")
                .value_name("NAME")
                .help("Name of the operating system to use instead of the host"),
        )
        .arg(
            Arg::new("headless")
                .long("headless")
                .action(ArgAction::SetTrue)
                .help("Print notices to the terminal instead of showing a dialog"),
        )
        .get_matches();

    install_tracing();

    // Classify OS once.
    let os = args
        .get_one::<String>("os")
        .cloned()
        .unwrap_or_else(|| self::os::host_name().to_owned());

    if args.get_flag("headless") {
        launch(Launcher::new(os, ConsoleNotifier, SystemRunner))
    } else {
        launch(Launcher::new(os, DialogNotifier, SystemRunner))
    }
}

fn launch<N: Notifier>(launcher: Launcher<N, SystemRunner>) -> Exit {
    match launcher.execute() {
        Ok(Outcome::Launched { code }) => {
            debug!(?code, "install script finished");
            Exit::Success
        }
        Ok(Outcome::Manual) => Exit::Success,
        Err(e) => match e.kind() {
            ErrorKind::UnsupportedPlatform => Exit::UnsupportedPlatform,
            ErrorKind::UnexpectedError => Exit::UnexpectedError,
        },
    }
}

fn install_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

/// Exit code of Easy Install.
#[repr(u8)]
#[derive(Clone, Copy)]
enum Exit {
    Success = 0,
    UnsupportedPlatform = 102, // 101 is Rust panic.
    UnexpectedError = 103,
}

impl Termination for Exit {
    fn report(self) -> ExitCode {
        // The error was already reported to the user by the launcher.
        (self as u8).into()
    }
}
