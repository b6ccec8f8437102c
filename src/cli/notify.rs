use super::ui;
use crate::core::notify::Notifier;

/// Prints notifications to stderr so they never mix with command output.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_error(&self, title: &str, description: &str) {
        eprintln!(
            "{} {}",
            ui::style_text(title, ui::StyleType::Error),
            ui::style_text(description, ui::StyleType::Subtle)
        );
    }
}
