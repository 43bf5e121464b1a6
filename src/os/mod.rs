pub use self::run::*;

use std::fmt::{Display, Formatter};

mod run;

/// Family of the host operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    MacOs,
    Unix,
    Unsupported,
}

impl OsFamily {
    /// Classifies an OS name the way the JVM reports it (e.g. `Windows 10`, `Mac OS X`, `Linux`).
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();

        if name.contains("win") {
            Self::Windows
        } else if name.contains("mac") {
            Self::MacOs
        } else if name.contains("nix") || name.contains("nux") {
            Self::Unix
        } else {
            Self::Unsupported
        }
    }
}

impl Display for OsFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let v = match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Unix => "unix",
            Self::Unsupported => "unsupported",
        };

        f.write_str(v)
    }
}

/// Name of the OS this binary was built for.
pub fn host_name() -> &'static str {
    std::env::consts::OS
}
