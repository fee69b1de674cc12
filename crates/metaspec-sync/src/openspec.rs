//! OpenSpec slash command sync.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::typescript::extract_commands;
use crate::{write_template, SyncError, GENERATED_HEADER};

/// Source file holding the slash command bodies, relative to the template path.
pub const COMMANDS_SOURCE: &str = "slash-command-templates.ts";

/// Commands extracted from OpenSpec.
pub const SLASH_COMMANDS: [&str; 3] = ["proposal", "apply", "archive"];

static FOREIGN_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("valid placeholder pattern"));

/// Pattern rewrites applied in order after cleanup.
static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        // CLI invocations inside code spans.
        (r"`openspec\s+(\w+)", "`{{ cli_name }} ${1}"),
        // Paths inside code spans.
        (r"`openspec/([^`]+)`", "`{{ specs_dir }}/${1}`"),
        // Bare CLI invocations.
        (
            r"\bopenspec\s+(list|show|validate|update|archive)\b",
            "{{ cli_name }} ${1}",
        ),
        // Bare directory layout references.
        (
            r"\bopenspec/(changes|specs|project\.md|AGENTS\.md)",
            "{{ specs_dir }}/${1}",
        ),
        (r"\bopenspec/\b", "{{ specs_dir }}/"),
        (r"`openspec`", "`{{ specs_dir }}`"),
        (r"the `openspec/", "the `{{ specs_dir }}/"),
        (r"`ls openspec`", "`ls {{ specs_dir }}`"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("valid generalization pattern"),
            replacement,
        )
    })
    .collect()
});

fn command_description(command: &str) -> &'static str {
    match command {
        "proposal" => {
            "Create a change proposal for specification evolution and team collaboration"
        }
        "apply" => "Implement an approved change proposal - track tasks and execute planned changes",
        "archive" => "Archive a completed change - move to archive and update specifications",
        _ => "Command for specification-driven development",
    }
}

fn command_title(command: &str) -> &'static str {
    match command {
        "proposal" => "Creating Change Proposals",
        "apply" => "Implementing Changes",
        "archive" => "Archiving Changes",
        _ => "Command",
    }
}

/// Turn an extracted OpenSpec command body into a library template.
pub fn generalize_openspec(command: &str, body: &str) -> String {
    let header = format!(
        "{GENERATED_HEADER}---\ndescription: {}\n---\n\n## User Input\n\n```text\n$ARGUMENTS\n```\n\n\
         You **MUST** consider the user input before proceeding (if not empty).\n\n## {}\n\n",
        command_description(command),
        command_title(command),
    );

    let cleaned = body.replace("\\`", "`").replace("\\n", "\n");
    // Placeholders from the source are not ours to render.
    let mut content = FOREIGN_PLACEHOLDER
        .replace_all(&cleaned, "[${1}]")
        .into_owned();

    for (pattern, replacement) in RULES.iter() {
        content = pattern.replace_all(&content, *replacement).into_owned();
    }

    content = content
        .replace("OpenSpec conventions", "project conventions")
        .replace("OpenSpec-managed", "spec-driven");

    format!("{header}{content}\n")
}

/// Extract and convert the OpenSpec slash commands under `source_dir`.
pub(crate) fn sync_openspec(source_dir: &Path, target_dir: &Path) -> Result<Vec<String>, SyncError> {
    let source_file = source_dir.join(COMMANDS_SOURCE);
    if !source_file.is_file() {
        return Err(SyncError::SourceMissing { path: source_file });
    }

    let source = std::fs::read_to_string(&source_file).map_err(|e| SyncError::Io {
        path: source_file.clone(),
        source: e,
    })?;

    let mut synced = Vec::new();
    for (command, body) in extract_commands(&source, &SLASH_COMMANDS) {
        let file_name = format!("{command}.md.hbs");
        write_template(
            &target_dir.join("commands").join(&file_name),
            &generalize_openspec(&command, &body),
        )?;
        tracing::debug!(command = %command, "synced slash command");
        synced.push(file_name);
    }

    if synced.is_empty() {
        tracing::warn!(file = %source_file.display(), "no slash commands found");
    }

    Ok(synced)
}
