//! Error formatting for CLI output.

use std::fmt::Write as _;

use crate::error::CliError;

/// Error output formatter
#[derive(Debug, Default)]
pub struct ErrorFormatter {
    verbose: bool,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Format and print an error
    pub fn print(&self, error: &CliError) {
        eprint!("{}", self.format(error));
    }

    /// Format an error to a string
    pub fn format(&self, error: &CliError) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "error[{}]: {error}", error.code());

        if self.verbose {
            format_source_chain(&mut output, error);
        }

        if let CliError::Io { path: Some(p), .. } = error {
            let _ = writeln!(output, "  path: {}", p.display());
        }

        if let Some(hint) = error.hint() {
            let _ = writeln!(output, "\nhint: {hint}");
        }

        let suggestions = error.suggestions();
        if !suggestions.is_empty() {
            let _ = writeln!(output, "\navailable:");
            for suggestion in suggestions {
                let _ = writeln!(output, "  - {suggestion}");
            }
        }

        output
    }

    /// Format as JSON
    pub fn format_json(&self, error: &CliError) -> String {
        let json = serde_json::json!({
            "success": false,
            "error": {
                "code": error.code(),
                "message": error.to_string(),
                "hint": error.hint(),
                "suggestions": error.suggestions(),
            }
        });

        serde_json::to_string_pretty(&json).unwrap_or_else(|_| error.to_string())
    }
}

fn format_source_chain(output: &mut String, error: &CliError) {
    use std::error::Error;

    let mut current = error.source();
    if current.is_none() {
        return;
    }

    let _ = writeln!(output, "\ncaused by:");
    let mut depth = 1;
    while let Some(src) = current {
        let _ = writeln!(output, "  {depth}: {src}");
        current = src.source();
        depth += 1;
    }
}
