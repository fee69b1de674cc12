//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use metaspec_common_config::{apply_env_overrides, ConfigLoader, MetaspecConfig};

use crate::commands::{InitCommand, SpecCommand, SyncCommand, ValidateCommand, VersionCommand};
use crate::error::CliError;

/// MetaSpec - generate spec-driven toolkits from meta-specs
///
/// Render complete toolkit projects from YAML definitions, sync command
/// templates from spec-kit and OpenSpec, and drive installed spec toolkits.
#[derive(Debug, Parser)]
#[command(
    name = "metaspec",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "METASPEC_CONFIG",
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_enum)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a toolkit project from a meta-spec or domain preset
    #[command(visible_alias = "new")]
    Init(InitCommand),

    /// Validate a meta-spec file
    Validate(ValidateCommand),

    /// List, inspect, or run installed spec toolkits
    Spec(SpecCommand),

    /// Sync command templates from spec-kit and OpenSpec into the library
    Sync(SyncCommand),

    /// Show version information
    Version(VersionCommand),

    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsCommand),
}

/// Shell completions generation
#[derive(Debug, Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

impl CompletionsCommand {
    pub fn execute(&self) -> Result<(), CliError> {
        use clap::CommandFactory;

        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(self.shell, &mut cmd, name, &mut std::io::stdout());
        Ok(())
    }
}

impl Cli {
    /// Load `--config` when given, otherwise `.metaspec/config.yaml` in the
    /// working directory, then apply environment overrides.
    pub fn load_config(&self) -> Result<MetaspecConfig, CliError> {
        let loader = ConfigLoader::new(".");
        let mut config = match &self.config {
            Some(path) => loader.load_file(path)?,
            None => loader.load()?,
        };
        apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Execute the selected command
    pub async fn execute(self, config: MetaspecConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config,
            format: self.format,
            verbose: self.verbose,
            quiet: self.quiet,
        };

        match self.command {
            Command::Init(cmd) => cmd.execute(&ctx).await,
            Command::Validate(cmd) => cmd.execute(&ctx),
            Command::Spec(cmd) => cmd.execute(&ctx).await,
            Command::Sync(cmd) => cmd.execute(&ctx).await,
            Command::Version(cmd) => cmd.execute(&ctx),
            Command::Completions(cmd) => cmd.execute(),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: MetaspecConfig,
    pub format: OutputFormat,
    pub verbose: u8,
    pub quiet: bool,
}

impl CommandContext {
    /// Print a progress line to stderr unless quiet or emitting JSON.
    pub fn status(&self, message: impl std::fmt::Display) {
        if !self.quiet && self.format == OutputFormat::Text {
            eprintln!("{message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_init_flags() {
        let cli = Cli::try_parse_from([
            "metaspec", "-vv", "init", "api-kit", "--template", "web", "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Command::Init(init) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(init.name.as_deref(), Some("api-kit"));
        assert!(init.dry_run);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["metaspec", "-q", "-v", "version"]).is_err());
    }

    #[test]
    fn test_spec_passes_trailing_args() {
        let cli = Cli::try_parse_from([
            "metaspec", "spec", "spec-kit", "plan", "--feature", "login", "-x",
        ])
        .unwrap();

        let Command::Spec(spec) = cli.command else {
            panic!("expected spec");
        };
        assert_eq!(spec.toolkit.as_deref(), Some("spec-kit"));
        assert_eq!(spec.command.as_deref(), Some("plan"));
        assert_eq!(spec.args, ["--feature", "login", "-x"]);
    }
}
