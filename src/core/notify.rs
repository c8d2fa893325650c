//! User-facing notifications
//!
//! The exporter never lets an error escape a command; instead it tells the
//! user through a [`Notifier`] and carries on.

use console::style;
use serde::Serialize;
use std::fmt;

/// How prominent a notice is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Receives non-fatal messages for the user
pub trait Notifier {
    fn notify(&mut self, severity: Severity, message: &str);
}

/// Prints notices to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    /// Drop info notices
    pub quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Info if self.quiet => {}
            Severity::Info => eprintln!("{} {}", style("•").cyan(), message),
            Severity::Warning => eprintln!("{} {}", style("!").yellow().bold(), message),
            Severity::Error => eprintln!("{} {}", style("✗").red().bold(), message),
        }
    }
}

/// Collects notices in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pub notices: Vec<(Severity, String)>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages of the given severity, in the order received
    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.notices
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&mut self, severity: Severity, message: &str) {
        self.notices.push((severity, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_filters_by_severity() {
        let mut n = MemoryNotifier::new();
        n.notify(Severity::Info, "saved A");
        n.notify(Severity::Error, "failed B");
        n.notify(Severity::Info, "saved C");
        assert_eq!(n.messages(Severity::Info), vec!["saved A", "saved C"]);
        assert_eq!(n.messages(Severity::Error), vec!["failed B"]);
        assert!(n.messages(Severity::Warning).is_empty());
    }
}
