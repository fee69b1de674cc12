//! Sync command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueEnum, ValueHint};
use metaspec_common_log::spans;
use metaspec_sync::{SyncReport, SyncSource, Syncer};
use serde::Serialize;
use tracing::Instrument;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, Icons};

/// Sync command templates from spec-kit and OpenSpec into the library
#[derive(Debug, Parser)]
pub struct SyncCommand {
    /// Source to sync
    #[arg(value_enum, default_value = "all")]
    pub source: SourceArg,

    /// Library directory (default: templates.library_dir from the config)
    #[arg(short, long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub target: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    SpecKit,
    #[value(name = "openspec")]
    OpenSpec,
    All,
}

impl SourceArg {
    fn sources(self) -> Vec<SyncSource> {
        match self {
            Self::SpecKit => vec![SyncSource::SpecKit],
            Self::OpenSpec => vec![SyncSource::OpenSpec],
            Self::All => SyncSource::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SyncedSource {
    source: String,
    target_dir: PathBuf,
    commands: Vec<String>,
    templates: Vec<String>,
}

impl From<SyncReport> for SyncedSource {
    fn from(report: SyncReport) -> Self {
        Self {
            source: report.source.name().to_string(),
            target_dir: report.target_dir,
            commands: report.commands,
            templates: report.templates,
        }
    }
}

#[derive(Debug, Serialize)]
struct SyncOutput {
    library_dir: PathBuf,
    sources: Vec<SyncedSource>,
}

impl FormattedOutput for SyncOutput {
    fn format_text(&self) -> String {
        let mut lines = Vec::new();
        for synced in &self.sources {
            lines.push(format!(
                "{} Synced {}: {} commands, {} templates -> {}",
                Icons::CHECK,
                synced.source,
                synced.commands.len(),
                synced.templates.len(),
                synced.target_dir.display()
            ));
        }
        lines.push(String::new());
        lines.push(format!("Library: {}", self.library_dir.display()));
        lines.push(
            "Reference synced templates under templates.custom and pass --templates to `metaspec init`."
                .to_string(),
        );
        lines.join("\n")
    }
}

impl SyncCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let library_dir = self
            .target
            .clone()
            .unwrap_or_else(|| ctx.config.templates.library_dir.clone());
        let syncer = Syncer::new(library_dir.clone(), ctx.config.sync.clone());

        let mut sources = Vec::new();
        for source in self.source.sources() {
            ctx.status(format!("{} Syncing {}...", Icons::ARROW, source.title()));
            let report = syncer
                .sync(source)
                .instrument(spans::sync_span(source.name()))
                .await?;
            sources.push(SyncedSource::from(report));
        }

        print_output(
            ctx,
            &SyncOutput {
                library_dir,
                sources,
            },
        )
    }
}
