use std::path::Path;

use tracing::info;

use super::{BATCH, LaunchError, write_file};
use crate::os::Invocation;

/// Script that runs the MSVC build from within `Batch`.
pub const SCRIPT: &str = "EasyInstall_MSVC.cmd";

/// Script that opens a new console running [`SCRIPT`].
pub const START_SCRIPT: &str = "EasyInstall_MSVC_start.cmd";

const BUILD_SCRIPT: &str = "EasyInstallWithRedistributableMatlabToolbox_MSVC.bat";

/// Generates both scripts inside `dir` and returns the command to start them. `root` is `dir` as
/// UTF-8.
pub fn prepare(dir: &Path, root: &str) -> Result<Invocation, LaunchError> {
    let batch = dir.join(BATCH);

    // Write the build script.
    let path = batch.join(SCRIPT);

    write_file(&path, &script(root)?)?;

    // Write the launcher.
    let start = batch.join(START_SCRIPT);

    write_file(&start, &start_script(root))?;

    info!(script = %start.display(), "MSVC scripts generated");

    Ok(Invocation::new("cmd").arg("/c").arg(start))
}

/// Content of [`SCRIPT`]. The drive switch is needed since `cd` alone does not change the current
/// drive of `cmd`.
pub fn script(dir: &str) -> Result<String, LaunchError> {
    let drive = dir
        .get(..2)
        .ok_or_else(|| LaunchError::NoDrive(dir.into()))?;

    Ok(format!(
        "@ECHO OFF\n\
         cd \"{dir}\\{BATCH}\"\n\
         {drive}\n\
         call .\\{BUILD_SCRIPT}\n\
         exit\n"
    ))
}

/// Content of [`START_SCRIPT`].
pub fn start_script(dir: &str) -> String {
    format!("start cmd /c \"{dir}\\{BATCH}\\{SCRIPT}\"\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_script() {
        let s = script(r"D:\Tools\BTK").unwrap();

        assert_eq!(
            s,
            "@ECHO OFF\n\
             cd \"D:\\Tools\\BTK\\Batch\"\n\
             D:\n\
             call .\\EasyInstallWithRedistributableMatlabToolbox_MSVC.bat\n\
             exit\n"
        );
    }

    #[test]
    fn launcher_script() {
        assert_eq!(
            start_script(r"C:\BTK"),
            "start cmd /c \"C:\\BTK\\Batch\\EasyInstall_MSVC.cmd\"\n"
        );
    }

    #[test]
    fn no_drive() {
        assert!(matches!(script("C"), Err(LaunchError::NoDrive(d)) if d == "C"));
    }
}
