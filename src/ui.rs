//! Centralized UI formatting and color utilities
//!
//! Shared by the CLI for verdict colors and quiet mode detection.

use colored::{ColoredString, Colorize};

/// Environment variable that forces quiet mode.
pub const QUIET_ENV: &str = "DAMPENER_QUIET";

/// Check if quiet mode is enabled via environment variable
pub fn is_quiet() -> bool {
    std::env::var(QUIET_ENV)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Returns a colored verdict word.
///
/// - safe: green
/// - unsafe: red
pub fn verdict(safe: bool) -> ColoredString {
    if safe {
        "safe".green()
    } else {
        "unsafe".red()
    }
}

/// Returns a colored verdict icon: ● for safe, ✗ for unsafe.
pub fn verdict_icon(safe: bool) -> ColoredString {
    if safe {
        "●".green()
    } else {
        "✗".red()
    }
}

/// Color scheme for result text output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Bold for counts and totals
    pub fn count(value: impl ToString) -> ColoredString {
        value.to_string().bold()
    }

    /// Cyan for report levels
    pub fn levels(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for secondary information
    pub fn dim(text: &str) -> ColoredString {
        text.dimmed()
    }
}
