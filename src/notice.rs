use rfd::{MessageButtons, MessageDialog, MessageLevel};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// Shows a message to the user.
pub trait Notifier {
    fn show(&self, level: Level, title: &str, message: &str);
}

/// Implementation of [`Notifier`] using a native modal dialog.
pub struct DialogNotifier;

impl Notifier for DialogNotifier {
    fn show(&self, level: Level, title: &str, message: &str) {
        let level = match level {
            Level::Info => MessageLevel::Info,
            Level::Error => MessageLevel::Error,
        };

        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

/// Implementation of [`Notifier`] for a terminal without a display.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show(&self, level: Level, title: &str, message: &str) {
        match level {
            Level::Info => eprintln!("{title}: {message}"),
            Level::Error => eprintln!("error: {title}: {message}"),
        }
    }
}
