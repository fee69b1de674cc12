//! Validate command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use metaspec_definition::{check_meta_spec, format_issues, ValidationIssue, DEFAULT_MAX_ISSUES};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, Icons};

/// Validate a meta-spec file
#[derive(Debug, Parser)]
pub struct ValidateCommand {
    /// Meta-spec YAML file
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct ValidateOutput {
    file: PathBuf,
    valid: bool,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl FormattedOutput for ValidateOutput {
    fn format_text(&self) -> String {
        let mut out = if self.valid {
            format!("{} {} is valid", Icons::CHECK, self.file.display())
        } else {
            format!(
                "{} {}\n\n{}",
                Icons::CROSS,
                self.file.display(),
                format_issues(&self.errors, DEFAULT_MAX_ISSUES)
            )
        };

        if !self.warnings.is_empty() {
            out.push_str(&format!("\n\n{} Warnings:", Icons::WARNING));
            for warning in &self.warnings {
                out.push_str(&format!("\n  - {warning}"));
            }
        }

        out
    }
}

impl ValidateCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        if !self.file.is_file() {
            return Err(CliError::not_found(
                "meta-spec file",
                self.file.display().to_string(),
            ));
        }

        let source = std::fs::read_to_string(&self.file)
            .map_err(|e| CliError::io_with_path("failed to read meta-spec", e, &self.file))?;
        let report = check_meta_spec(&source);
        tracing::debug!(
            file = %self.file.display(),
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "validated"
        );

        let valid = report.is_valid();
        let error_count = report.errors.len();
        print_output(
            ctx,
            &ValidateOutput {
                file: self.file.clone(),
                valid,
                errors: report.errors,
                warnings: report.warnings,
            },
        )?;

        if valid {
            Ok(())
        } else {
            Err(CliError::validation(format!(
                "{} has {error_count} validation error(s)",
                self.file.display()
            )))
        }
    }
}
