use std::borrow::Cow;
use std::path::Path;

use tracing::info;

use super::{BATCH, LaunchError, write_file};
use crate::os::Invocation;

/// Terminal window settings that run the GCC build. Opening it this way lets Terminal close the
/// window by itself once the build finished.
pub const DESCRIPTOR: &str = "EasyInstall_GCC.terminal";

const BUILD_SCRIPT: &str = "EasyInstallWithRedistributableMatlabToolbox_GCC_MacOSX.sh";

/// Generates the descriptor inside `dir` and returns the command to open it. `root` is `dir` as
/// UTF-8.
pub fn prepare(dir: &Path, root: &str) -> Result<Invocation, LaunchError> {
    let path = dir.join(BATCH).join(DESCRIPTOR);

    write_file(&path, &descriptor(root))?;

    info!(descriptor = %path.display(), "Terminal settings generated");

    Ok(Invocation::new("open").arg(path))
}

/// Shell command that Terminal runs in the new window.
pub fn command(dir: &str) -> String {
    format!("cd {dir};{dir}/{BATCH}/{BUILD_SCRIPT};exit")
}

/// Content of [`DESCRIPTOR`].
pub fn descriptor(dir: &str) -> String {
    let cmd = command(dir);
    let cmd = escape(&cmd);

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CommandString</key>
	<string>{cmd}</string>
	<key>RunCommandAsShell</key>
	<false/>
	<key>columnCount</key>
	<integer>116</integer>
	<key>name</key>
	<string>EasyInstall_GCC</string>
	<key>rowCount</key>
	<integer>29</integer>
	<key>shellExitAction</key>
	<integer>0</integer>
	<key>type</key>
	<string>Window Settings</string>
</dict>
</plist>
"#
    )
}

fn escape(v: &str) -> Cow<'_, str> {
    if !v.contains(['&', '<', '>']) {
        return Cow::Borrowed(v);
    }

    let mut buf = String::with_capacity(v.len() + 8);

    for c in v.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            c => buf.push(c),
        }
    }

    Cow::Owned(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_string() {
        assert_eq!(
            command("/Users/me/BTK"),
            "cd /Users/me/BTK;/Users/me/BTK/Batch/EasyInstallWithRedistributableMatlabToolbox_GCC_MacOSX.sh;exit"
        );
    }

    #[test]
    fn descriptor_content() {
        let d = descriptor("/Applications/BTK");

        assert!(d.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE plist"));
        assert!(d.contains(&format!(
            "\t<key>CommandString</key>\n\t<string>{}</string>\n",
            command("/Applications/BTK")
        )));
        assert!(d.contains("\t<key>columnCount</key>\n\t<integer>116</integer>\n"));
        assert!(d.contains("\t<key>rowCount</key>\n\t<integer>29</integer>\n"));
        assert!(d.contains("\t<key>type</key>\n\t<string>Window Settings</string>\n"));
        assert!(d.ends_with("</dict>\n</plist>\n"));
    }

    #[test]
    fn escape_markup() {
        let d = descriptor("/tmp/R&D <new>");

        assert!(d.contains("<string>cd /tmp/R&amp;D &lt;new&gt;;/tmp/R&amp;D &lt;new&gt;/Batch/"));
        assert_eq!(escape("/plain"), Cow::Borrowed("/plain"));
    }
}
