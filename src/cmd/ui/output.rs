//! Structured output abstraction for dampener.
//!
//! Provides a unified interface for outputting messages in different modes:
//! - Human: Colored prefixed output for terminal display
//! - Json: One JSON object per line for programmatic consumption
//! - Quiet: Only errors and command results are emitted
//!
//! The Output struct auto-detects TTY for color support and can be injected
//! with a custom writer for test capture.

use colored::Colorize;
use serde_json::json;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Output mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable colored output
    Human,
    /// JSON-formatted structured output
    Json,
    /// Silent mode - only errors and results
    Quiet,
}

/// Output abstraction with mode-aware formatting
#[derive(Clone)]
pub struct Output {
    mode: OutputMode,
    verbose: bool,
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    is_tty: bool,
}

impl Output {
    /// Create a new Output writing to stdout
    pub fn new(mode: OutputMode) -> Self {
        let is_tty = atty::is(atty::Stream::Stdout);
        Self {
            mode,
            verbose: false,
            writer: Arc::new(Mutex::new(Box::new(io::stdout()))),
            is_tty,
        }
    }

    /// Create an Output with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(mode: OutputMode, writer: Box<dyn Write + Send>) -> Self {
        Self {
            mode,
            verbose: false,
            writer: Arc::new(Mutex::new(writer)),
            is_tty: false, // Assume non-TTY for custom writers
        }
    }

    /// Enable per-report trace lines
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Whether detail lines are emitted
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Output a step message: "→ {msg}" in cyan
    pub fn step(&self, msg: &str) {
        match self.mode {
            OutputMode::Human => {
                let prefix = if self.is_tty {
                    "→".cyan().to_string()
                } else {
                    "→".to_string()
                };
                self.write_line(&format!("{} {}", prefix, msg));
            }
            OutputMode::Json => {
                self.write_json("step", msg, None);
            }
            OutputMode::Quiet => {}
        }
    }

    /// Output a success message: "✓ {msg}" in green
    pub fn success(&self, msg: &str) {
        match self.mode {
            OutputMode::Human => {
                let prefix = if self.is_tty {
                    "✓".green().to_string()
                } else {
                    "✓".to_string()
                };
                self.write_line(&format!("{} {}", prefix, msg));
            }
            OutputMode::Json => {
                self.write_json("success", msg, None);
            }
            OutputMode::Quiet => {}
        }
    }

    /// Output a warning message: "⚠ {msg}" in yellow
    pub fn warn(&self, msg: &str) {
        match self.mode {
            OutputMode::Human => {
                let prefix = if self.is_tty {
                    "⚠".yellow().to_string()
                } else {
                    "⚠".to_string()
                };
                self.write_line(&format!("{} {}", prefix, msg));
            }
            OutputMode::Json => {
                self.write_json("warning", msg, None);
            }
            OutputMode::Quiet => {}
        }
    }

    /// Output an error message: "✗ {msg}" in red
    pub fn error(&self, msg: &str) {
        match self.mode {
            OutputMode::Human => {
                let prefix = if self.is_tty {
                    "✗".red().to_string()
                } else {
                    "✗".to_string()
                };
                self.write_line(&format!("{} {}", prefix, msg));
            }
            OutputMode::Json => {
                self.write_json("error", msg, None);
            }
            OutputMode::Quiet => {
                // Errors always output, even in quiet mode
                self.write_line(&format!("✗ {}", msg));
            }
        }
    }

    /// Output detail text (indented). Only emitted in verbose mode.
    pub fn detail(&self, msg: &str, field: Option<(&str, &str)>) {
        if !self.verbose {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                self.write_line(&format!("  {}", msg));
            }
            OutputMode::Json => {
                self.write_json("detail", msg, field);
            }
            OutputMode::Quiet => {}
        }
    }

    /// Output a command result.
    ///
    /// Results are never suppressed: human and quiet modes print `text`,
    /// json mode prints `value` as a single line.
    pub fn result(&self, text: &str, value: &serde_json::Value) {
        match self.mode {
            OutputMode::Human | OutputMode::Quiet => self.write_line(text),
            OutputMode::Json => self.json(value),
        }
    }

    /// Output a structured JSON event
    pub fn json(&self, value: &serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", value);
        }
    }

    /// Write a line to the output
    fn write_line(&self, line: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
        }
    }

    /// Write a JSON-formatted log line
    fn write_json(&self, level: &str, msg: &str, extra: Option<(&str, &str)>) {
        if let Ok(mut writer) = self.writer.lock() {
            let mut obj = json!({
                "level": level,
                "msg": msg,
            });

            if let Some((key, value)) = extra {
                obj[key] = json!(value);
            }

            let _ = writeln!(writer, "{}", obj);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    // Test-specific writer that wraps Arc<Mutex<Vec<u8>>>
    pub(crate) struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        pub(crate) fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.buffer.lock().unwrap().flush()
        }
    }

    /// Output in `mode` capturing everything it writes.
    pub(crate) fn captured(mode: OutputMode) -> (Output, Arc<Mutex<Vec<u8>>>) {
        let (writer, buffer) = TestWriter::new();
        (Output::with_writer(mode, Box::new(writer)), buffer)
    }

    pub(crate) fn contents(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_human_mode_output() {
        let (output, buffer) = captured(OutputMode::Human);
        let output = output.verbose(true);

        output.step("Starting");
        output.success("Done");
        output.warn("Warning");
        output.error("Error");
        output.detail("Detail", None);

        let result = contents(&buffer);
        assert!(result.contains("→ Starting"));
        assert!(result.contains("✓ Done"));
        assert!(result.contains("⚠ Warning"));
        assert!(result.contains("✗ Error"));
        assert!(result.contains("  Detail"));
    }

    #[test]
    fn test_json_mode_output() {
        let (output, buffer) = captured(OutputMode::Json);
        let output = output.verbose(true);

        output.step("Starting");
        output.detail("Removed", Some(("removed", "2")));

        let result = contents(&buffer);
        assert!(result.contains(r#""level":"step""#));
        assert!(result.contains(r#""msg":"Starting""#));
        assert!(result.contains(r#""level":"detail""#));
        assert!(result.contains(r#""removed":"2""#));
    }

    #[test]
    fn test_detail_requires_verbose() {
        let (output, buffer) = captured(OutputMode::Human);

        output.detail("Hidden", None);

        assert!(contents(&buffer).is_empty());
    }

    #[test]
    fn test_quiet_mode_keeps_errors_and_results() {
        let (output, buffer) = captured(OutputMode::Quiet);

        output.step("Starting");
        output.success("Done");
        output.warn("Warning");
        output.error("Error");
        output.result("2", &json!({ "safe": 2 }));

        let result = contents(&buffer);
        assert!(result.contains("✗ Error"));
        assert!(result.contains("2\n"));
        assert!(!result.contains("Starting"));
        assert!(!result.contains("Done"));
        assert!(!result.contains("Warning"));
    }

    #[test]
    fn test_json_result_is_value() {
        let (output, buffer) = captured(OutputMode::Json);

        output.result("ignored", &json!({ "safe": 2 }));

        let result = contents(&buffer);
        assert_eq!(result.trim(), r#"{"safe":2}"#);
    }
}
