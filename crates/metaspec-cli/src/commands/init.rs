//! Init command implementation.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueHint};
use metaspec_common_log::spans;
use metaspec_definition::{
    default_toolkit_name, load_meta_spec, preset, validate_toolkit_name, Domain, MetaSpecDefinition,
};
use metaspec_generator::{GenerateOptions, Generator, ToolkitProject};
use metaspec_toolkit::{probe, BuiltinToolkit, SpecToolkit};
use serde::Serialize;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_output, FormattedOutput, Icons};

/// Create a toolkit project from a meta-spec or domain preset
#[derive(Debug, Parser)]
pub struct InitCommand {
    /// Toolkit name (defaults to the preset's name, or the meta-spec's)
    pub name: Option<String>,

    /// Domain preset to start from (generic, mcp, web, ai)
    #[arg(short, long, value_name = "DOMAIN", conflicts_with = "spec")]
    pub template: Option<Domain>,

    /// Meta-spec YAML file to generate from
    #[arg(short, long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub spec: Option<PathBuf>,

    /// Output directory (default: ./<name>)
    #[arg(short, long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Template directory layered over the built-in templates
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub templates: Option<PathBuf>,

    /// Run `specify init` in the generated project
    #[arg(long)]
    pub spec_kit: bool,

    /// Show what would be generated without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Generate into an existing directory
    #[arg(short, long)]
    pub force: bool,

    /// Also write the resolved meta-spec to FILE
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub emit_spec: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct InitOutput {
    name: String,
    version: String,
    domain: Domain,
    location: PathBuf,
    spec_kit: bool,
    dry_run: bool,
    files: Vec<PathBuf>,
    next_steps: Vec<String>,
}

impl FormattedOutput for InitOutput {
    fn format_text(&self) -> String {
        let spec_kit = if self.spec_kit { "Enabled" } else { "Disabled" };
        let mut lines = Vec::new();

        if self.dry_run {
            lines.push(format!("Preview: {}", self.name));
        } else {
            lines.push(format!("{} Successfully created toolkit!", Icons::CHECK));
        }
        lines.push(String::new());
        lines.push(format!("  Name:     {}", self.name));
        lines.push(format!("  Version:  {}", self.version));
        lines.push(format!("  Domain:   {}", self.domain));
        lines.push(format!("  Location: {}", self.location.display()));
        lines.push(format!("  Spec-Kit: {spec_kit}"));
        lines.push(String::new());

        if self.dry_run {
            lines.push(format!("What will be generated ({} files):", self.files.len()));
            lines.extend(
                self.files
                    .iter()
                    .map(|f| format!("  {} {}", Icons::BULLET, f.display())),
            );
            lines.push(String::new());
            lines.push("This was a dry-run. No files were created.".to_string());
            lines.push(format!(
                "Run without --dry-run to create: {}",
                self.location.display()
            ));
        } else {
            lines.push(format!("Generated {} files", self.files.len()));
            lines.push(String::new());
            lines.push("Next steps:".to_string());
            lines.extend(self.next_steps.iter().map(|s| format!("  {s}")));
        }

        lines.join("\n")
    }
}

impl InitCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let def = self.resolve_definition()?;
        validate_toolkit_name(&def.name).map_err(|message| CliError::Validation {
            message,
            hint: Some("Use letters, digits, '-' or '_', e.g. my-spec-kit".to_string()),
        })?;

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&def.name));

        let custom_dir = self
            .templates
            .clone()
            .or_else(|| ctx.config.templates.custom_dir.clone());
        let options = GenerateOptions {
            force: self.force,
            dry_run: self.dry_run,
            specs_dir: ctx.config.templates.specs_dir.clone(),
        };

        if !self.dry_run {
            ctx.status("Generating toolkit...");
        }

        let generator = Generator::new(custom_dir);
        let project = {
            let _span = spans::generate_span(&def.name, def.domain.as_str()).entered();
            metaspec_common_log::timed!("generate", generator.generate(&def, &output, &options))?
        };

        if !self.dry_run {
            tracing::info!(
                toolkit = %def.name,
                files = project.file_count(),
                output = %output.display(),
                "toolkit generated"
            );

            if self.spec_kit {
                ctx.status("Initializing spec-kit...");
                init_spec_kit(&output).await?;
                ctx.status(format!("{} Initialized spec-kit", Icons::CHECK));
            }

            if let Some(path) = &self.emit_spec {
                let yaml = def.to_yaml().map_err(|e| CliError::Other(e.into()))?;
                std::fs::write(path, yaml)
                    .map_err(|e| CliError::io_with_path("failed to write meta-spec", e, path))?;
            }
        }

        print_output(
            ctx,
            &summarize(&def, &project, self, &ctx.config.templates.specs_dir),
        )
    }

    fn resolve_definition(&self) -> Result<MetaSpecDefinition, CliError> {
        if let Some(path) = &self.spec {
            let mut def = load_meta_spec(path)?;
            if let Some(name) = &self.name {
                def.name = name.clone();
            }
            return Ok(def);
        }

        let domain = self.template.unwrap_or(Domain::Generic);
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| default_toolkit_name(domain));
        tracing::debug!(domain = %domain, name = %name, "using preset");
        Ok(preset(domain, &name))
    }
}

fn summarize(
    def: &MetaSpecDefinition,
    project: &ToolkitProject,
    cmd: &InitCommand,
    specs_dir: &str,
) -> InitOutput {
    let mut next_steps = vec![
        format!("cd {}", project.root_path.display()),
        "pip install -e .".to_string(),
        format!("{} --help", def.name),
    ];
    if cmd.spec_kit {
        next_steps.insert(1, "# Spec-driven development enabled!".to_string());
        next_steps.insert(2, format!("# Edit {specs_dir}/spec.md to define requirements"));
    }

    InitOutput {
        name: def.name.clone(),
        version: def.version.clone(),
        domain: def.domain,
        location: project.root_path.clone(),
        spec_kit: cmd.spec_kit,
        dry_run: cmd.dry_run,
        files: project.paths().map(Path::to_path_buf).collect(),
        next_steps,
    }
}

/// Run `specify init` inside the generated project.
async fn init_spec_kit(output: &Path) -> Result<(), CliError> {
    let spec_kit = BuiltinToolkit::spec_kit();
    let command = format!("{} init", spec_kit.binary());

    if !probe::is_available(spec_kit.binary()).await {
        return Err(CliError::command(
            "spec-kit not installed",
            command,
            spec_kit
                .install_hint()
                .map(|hint| format!("Install spec-kit first: {hint}")),
        ));
    }

    let result = tokio::process::Command::new(spec_kit.binary())
        .arg("init")
        .current_dir(output)
        .output()
        .await
        .map_err(|e| CliError::command(format!("failed to run {command}: {e}"), &command, None))?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(CliError::command(
            format!("Failed to initialize spec-kit: {}", stderr.trim()),
            command,
            None,
        ));
    }

    Ok(())
}
