//! Spec command implementation: list, inspect and run spec toolkits.

use clap::Parser;
use metaspec_common_log::spans;
use metaspec_toolkit::{SpecToolkit, ToolkitRegistry, ToolkitStatus};
use serde::Serialize;
use tracing::Instrument;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, Column, FormattedOutput, Icons, Table};

/// List, inspect, or run installed spec toolkits
#[derive(Debug, Parser)]
pub struct SpecCommand {
    /// List known toolkits and whether they are installed
    #[arg(short, long, conflicts_with_all = ["info", "toolkit"])]
    pub list: bool,

    /// Show details of one toolkit
    #[arg(short, long, value_name = "TOOLKIT", conflicts_with = "toolkit")]
    pub info: Option<String>,

    /// Toolkit to run (e.g. spec-kit, openspec)
    pub toolkit: Option<String>,

    /// Toolkit command
    pub command: Option<String>,

    /// Arguments passed to the toolkit command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ToolkitList {
    toolkits: Vec<ToolkitStatus>,
}

fn status_label(available: bool) -> String {
    if available {
        format!("{} Installed", Icons::CHECK)
    } else {
        format!("{} Not installed", Icons::PENDING)
    }
}

impl FormattedOutput for ToolkitList {
    fn format_text(&self) -> String {
        let mut out = String::from("Available Spec Toolkits\n");

        for (title, builtin) in [("Built-in", true), ("Custom", false)] {
            let mut table = Table::new(vec![
                Column::new("Name"),
                Column::new("Description").max_width(48),
                Column::new("Status"),
            ]);
            for status in self.toolkits.iter().filter(|s| s.builtin == builtin) {
                table.add_row(vec![
                    status.name.clone(),
                    status.description.clone(),
                    status_label(status.available),
                ]);
            }

            out.push_str(&format!("\n{title}:\n"));
            if table.is_empty() {
                out.push_str("  No custom toolkits configured\n");
                out.push_str("  Declare them under `toolkits` in .metaspec/config.yaml\n");
            } else {
                out.push_str(&table.render());
            }
        }

        out
    }
}

#[derive(Debug, Serialize)]
struct ToolkitInfo {
    name: String,
    version: String,
    description: String,
    binary: String,
    commands: Vec<String>,
    install_hint: Option<String>,
    available: bool,
}

impl FormattedOutput for ToolkitInfo {
    fn format_text(&self) -> String {
        let mut lines = vec![
            format!("Toolkit: {}", self.name),
            String::new(),
            format!("Description: {}", self.description),
            format!("Command:     {}", self.binary),
            format!("Version:     {}", self.version),
            format!("Status:      {}", status_label(self.available)),
        ];
        if let Some(hint) = &self.install_hint {
            lines.push(format!("Install:     {hint}"));
        }

        lines.push(String::new());
        lines.push("Available commands:".to_string());
        lines.extend(
            self.commands
                .iter()
                .map(|c| format!("  {} {c}", Icons::BULLET)),
        );
        lines.push(String::new());
        lines.push(format!("Usage: metaspec spec {} <command>", self.name));

        lines.join("\n")
    }
}

impl SpecCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let registry = ToolkitRegistry::new(&ctx.config.toolkits);

        if let Some(name) = &self.info {
            return show_info(ctx, &registry, name).await;
        }

        match (&self.toolkit, &self.command) {
            (Some(toolkit), Some(command)) if !self.list => {
                self.dispatch(ctx, &registry, toolkit, command).await
            }
            (Some(toolkit), None) if !self.list => Err(CliError::user_with_hint(
                format!("No command given for toolkit '{toolkit}'"),
                format!("Run `metaspec spec --info {toolkit}` to see its commands"),
            )),
            _ => {
                let toolkits = registry.list().await;
                print_output(ctx, &ToolkitList { toolkits })
            }
        }
    }

    async fn dispatch(
        &self,
        ctx: &CommandContext,
        registry: &ToolkitRegistry,
        toolkit: &str,
        command: &str,
    ) -> Result<(), CliError> {
        let program = registry.get(toolkit).map_or(toolkit, |t| t.binary());
        let invocation = std::iter::once(program)
            .chain(std::iter::once(command))
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        ctx.status(format!("{} Executing: {invocation}\n", Icons::ARROW));

        let code = registry
            .dispatch(toolkit, command, &self.args)
            .instrument(spans::toolkit_span(toolkit, command))
            .await?;

        if code == 0 {
            Ok(())
        } else {
            tracing::debug!(toolkit, command, code, "toolkit command failed");
            Err(CliError::exit(code))
        }
    }
}

async fn show_info(
    ctx: &CommandContext,
    registry: &ToolkitRegistry,
    name: &str,
) -> Result<(), CliError> {
    let Some(toolkit) = registry.get(name) else {
        return Err(CliError::not_found_with_suggestions(
            "toolkit",
            name,
            registry.names().into_iter().map(str::to_string).collect(),
        ));
    };

    let info = ToolkitInfo {
        name: toolkit.name().to_string(),
        version: toolkit.version().to_string(),
        description: toolkit.description().to_string(),
        binary: toolkit.binary().to_string(),
        commands: toolkit.commands().to_vec(),
        install_hint: toolkit.install_hint().map(str::to_string),
        available: toolkit.is_available().await,
    };
    print_output(ctx, &info)
}
