//! Library index (`README.md`) for a synced source.

use std::fmt::Write as _;
use std::path::Path;

use crate::{SyncError, SyncSource};

/// Write `README.md` in `target_dir` listing the synced commands and templates.
pub fn write_index(target_dir: &Path, source: SyncSource) -> Result<(), SyncError> {
    let commands = list_templates(&target_dir.join("commands"))?;
    let templates = list_templates(&target_dir.join("templates"))?;
    let content = render_index(source, &commands, &templates, &chrono::Local::now());

    let path = target_dir.join("README.md");
    std::fs::write(&path, content).map_err(|source| SyncError::Io { path, source })
}

fn list_templates(dir: &Path) -> Result<Vec<String>, SyncError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|source| SyncError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".hbs"))
        .collect();
    names.sort();
    Ok(names)
}

fn short_name(file_name: &str) -> &str {
    let name = file_name.strip_suffix(".md.hbs").unwrap_or(file_name);
    name.strip_suffix("-template").unwrap_or(name)
}

pub(crate) fn render_index(
    source: SyncSource,
    commands: &[String],
    templates: &[String],
    synced_at: &chrono::DateTime<chrono::Local>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {} Templates\n", source.title());
    let _ = writeln!(
        out,
        "> **Synchronized from [{}]({})**\n",
        source.name(),
        source.homepage()
    );
    let _ = writeln!(out, "**Lifecycle**: {}", source.lifecycle());
    let _ = writeln!(out, "**Best for**: {}\n", source.best_for());

    let _ = writeln!(out, "## Commands ({})\n", commands.len());
    for name in commands {
        let _ = writeln!(out, "- `{}` - {}", short_name(name), name);
    }

    let _ = writeln!(out, "\n## Templates ({})\n", templates.len());
    for name in templates {
        let _ = writeln!(out, "- `{}` - {}", short_name(name), name);
    }

    let _ = writeln!(out, "\n## Usage\n");
    let _ = writeln!(
        out,
        "List a template by its path under the library directory in a meta-spec's\n\
         `templates.custom`, and point `metaspec init --templates` at the library:\n"
    );
    let _ = writeln!(
        out,
        "```yaml\ntemplates:\n  custom:\n    - {}/commands/<command>.md.hbs\n```\n",
        source.library_subdir()
    );
    let _ = writeln!(out, "## Updating\n");
    let _ = writeln!(out, "Run `metaspec sync {}` to refresh.\n", source.name());
    let _ = writeln!(out, "**Last synced**: {}", synced_at.format("%Y-%m-%d %H:%M:%S"));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_render_index() {
        let at = chrono::Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let text = render_index(
            SyncSource::SpecKit,
            &["plan.md.hbs".to_string()],
            &["spec-template.md.hbs".to_string(), "checklist.md.hbs".to_string()],
            &at,
        );

        assert!(text.starts_with("# Spec-Kit Templates\n"));
        assert!(text.contains("**Lifecycle**: Greenfield (0->1)"));
        assert!(text.contains("## Commands (1)\n\n- `plan` - plan.md.hbs\n"));
        assert!(text.contains("## Templates (2)"));
        assert!(text.contains("- `spec` - spec-template.md.hbs"));
        assert!(text.contains("- `checklist` - checklist.md.hbs"));
        assert!(text.contains("- sdd/spec-kit/commands/<command>.md.hbs"));
        assert!(text.ends_with("**Last synced**: 2025-01-02 03:04:05\n"));
    }

    #[test]
    fn test_write_index_counts_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("commands")).unwrap();
        fs::write(dir.path().join("commands/apply.md.hbs"), "").unwrap();
        fs::write(dir.path().join("commands/proposal.md.hbs"), "").unwrap();

        write_index(dir.path(), SyncSource::OpenSpec).unwrap();

        let text = fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert!(text.contains("## Commands (2)"));
        assert!(text.contains("## Templates (0)"));
        assert!(text.contains("Brownfield (1->n)"));
    }
}
