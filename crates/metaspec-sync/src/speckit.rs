//! spec-kit template sync.
//!
//! spec-kit ships plain markdown under `templates/`. Files are copied into
//! the library with spec-kit specific names replaced by template variables.

use std::path::{Component, Path};

use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::{write_template, SyncError, GENERATED_HEADER};

/// Files in the template tree that are documentation, not templates.
const SKIPPED_FILES: [&str; 2] = ["README.md", "CONTRIBUTING.md"];

static SLASH_COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/speckit\.(\w+)").expect("valid slash command pattern"));
static TOOL_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bspec-kit\s+").expect("valid tool mention pattern"));

/// Replace spec-kit specific names with template variables.
pub fn generalize_spec_kit(content: &str) -> String {
    let mut content = if content.starts_with('#') {
        content.to_string()
    } else {
        format!("{GENERATED_HEADER}{content}")
    };

    content = SLASH_COMMAND
        .replace_all(&content, "/{{ cli_prefix }}.${1}")
        .into_owned();
    content = content.replace(".specify/", ".{{ specs_dir }}/");
    TOOL_MENTION
        .replace_all(&content, "{{ toolkit_name }} ")
        .into_owned()
}

/// Synced file names, split by library sub-directory.
#[derive(Debug, Default)]
pub(crate) struct Synced {
    pub commands: Vec<String>,
    pub templates: Vec<String>,
}

/// Sync every markdown template under `source_dir` into `target_dir`.
pub(crate) fn sync_spec_kit(source_dir: &Path, target_dir: &Path) -> Result<Synced, SyncError> {
    if !source_dir.is_dir() {
        return Err(SyncError::SourceMissing {
            path: source_dir.to_path_buf(),
        });
    }

    let mut synced = Synced::default();

    let entries = WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file());

    for entry in entries {
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy();
        if !file_name.ends_with(".md") || SKIPPED_FILES.contains(&&*file_name) {
            continue;
        }

        let relative = path.strip_prefix(source_dir).unwrap_or(path);
        let is_command = relative
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .any(|c| c == Component::Normal("commands".as_ref()));

        let content = std::fs::read_to_string(path).map_err(|source| SyncError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let stem = file_name.strip_suffix(".md").unwrap_or(&file_name);
        let output_name = format!("{stem}.md.hbs");
        let subdir = if is_command { "commands" } else { "templates" };

        write_template(
            &target_dir.join(subdir).join(&output_name),
            &generalize_spec_kit(&content),
        )?;
        tracing::debug!(source = %relative.display(), subdir, file = %output_name, "synced template");

        if is_command {
            synced.commands.push(output_name);
        } else {
            synced.templates.push(output_name);
        }
    }

    Ok(synced)
}
