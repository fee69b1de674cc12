//! Version command implementation.

use clap::Parser;
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput};

/// Show version information
#[derive(Debug, Parser)]
pub struct VersionCommand {}

#[derive(Debug, Serialize)]
struct VersionOutput {
    name: &'static str,
    version: &'static str,
}

impl FormattedOutput for VersionOutput {
    fn format_text(&self) -> String {
        format!("MetaSpec version {}", self.version)
    }
}

impl VersionCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        print_output(
            ctx,
            &VersionOutput {
                name: "metaspec",
                version: env!("CARGO_PKG_VERSION"),
            },
        )
    }
}
