//! Toolkit generation.

use std::path::{Path, PathBuf};

use metaspec_definition::MetaSpecDefinition;

use crate::context::{TemplateContext, DEFAULT_SPECS_DIR};
use crate::error::TemplateError;
use crate::loader::{TemplateLoader, TEMPLATE_EXT};
use crate::project::ToolkitProject;
use crate::renderer::TemplateRenderer;

/// Base templates and where they land in every project.
const BASE_TEMPLATES: [(&str, &str); 5] = [
    ("base/AGENTS.md.hbs", "AGENTS.md"),
    ("base/README.md.hbs", "README.md"),
    ("base/pyproject.toml.hbs", "pyproject.toml"),
    ("base/constitution.md.hbs", "memory/constitution.md"),
    ("base/gitignore.hbs", ".gitignore"),
];

/// Package modules rendered into `src/<package>/`.
const PACKAGE_TEMPLATES: [(&str, &str); 4] = [
    ("scaffold/__init__.py.hbs", "__init__.py"),
    ("scaffold/cli.py.hbs", "cli.py"),
    ("scaffold/parser.py.hbs", "parser.py"),
    ("scaffold/validator.py.hbs", "validator.py"),
];

/// Scripts rendered into `scripts/` and marked executable.
const SCRIPT_TEMPLATES: [(&str, &str); 2] = [
    ("scaffold/init.sh.hbs", "init.sh"),
    ("scaffold/validate.sh.hbs", "validate.sh"),
];

/// Directories every project has, even when empty.
const STANDARD_DIRS: [&str; 3] = ["templates", "memory", "examples"];

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Overwrite into an existing output directory.
    pub force: bool,
    /// Build the project without writing it.
    pub dry_run: bool,
    /// Value of the `specs_dir` template variable.
    pub specs_dir: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            force: false,
            dry_run: false,
            specs_dir: DEFAULT_SPECS_DIR.to_string(),
        }
    }
}

/// Generates toolkit projects from meta-spec definitions.
pub struct Generator {
    loader: TemplateLoader,
    renderer: TemplateRenderer,
}

impl Generator {
    pub fn new(custom_template_dir: Option<PathBuf>) -> Self {
        Self {
            loader: TemplateLoader::new(custom_template_dir),
            renderer: TemplateRenderer::new(),
        }
    }

    pub fn loader(&self) -> &TemplateLoader {
        &self.loader
    }

    /// Generate a project for `def` at `output_dir`.
    ///
    /// With `dry_run` nothing is written and an existing output directory is
    /// not an error; the returned project still holds every rendered file.
    pub fn generate(
        &self,
        def: &MetaSpecDefinition,
        output_dir: &Path,
        options: &GenerateOptions,
    ) -> Result<ToolkitProject, TemplateError> {
        if !options.dry_run && output_dir.exists() && !options.force {
            return Err(TemplateError::AlreadyExists {
                path: output_dir.to_path_buf(),
            });
        }

        let context = TemplateContext::from_meta_spec(def).with_specs_dir(&options.specs_dir);
        let mut project = ToolkitProject::new(output_dir);

        for (key, output) in self.select_templates(def) {
            let content = self.renderer.render_key(&self.loader, &key, &context)?;
            project.add_file(output, content);
        }

        let package_dir = Path::new("src").join(&context.package_name);
        project.add_directory(&package_dir);
        for (key, file) in PACKAGE_TEMPLATES {
            let content = self.renderer.render_key(&self.loader, key, &context)?;
            project.add_file(package_dir.join(file), content);
        }

        for (key, file) in SCRIPT_TEMPLATES {
            let content = self.renderer.render_key(&self.loader, key, &context)?;
            project.add_executable(Path::new("scripts").join(file), content);
        }

        for dir in STANDARD_DIRS {
            project.add_directory(dir);
        }

        tracing::debug!(
            toolkit = %def.name,
            domain = %def.domain,
            files = project.file_count(),
            "rendered toolkit"
        );

        if !options.dry_run {
            project.write_to_disk(options.force)?;
        }

        Ok(project)
    }

    /// Template keys paired with their output path relative to the project root.
    fn select_templates(&self, def: &MetaSpecDefinition) -> Vec<(String, PathBuf)> {
        let mut selected: Vec<(String, PathBuf)> = BASE_TEMPLATES
            .iter()
            .map(|(key, output)| (key.to_string(), PathBuf::from(output)))
            .collect();

        let group = def.domain.as_str();
        for name in self.loader.template_names(group) {
            selected.push((format!("{group}/{name}"), templates_output(&name)));
        }

        for key in def.custom_templates() {
            let name = key.rsplit('/').next().unwrap_or(key);
            selected.push((key.clone(), templates_output(name)));
        }

        selected
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(None)
    }
}

fn templates_output(template_name: &str) -> PathBuf {
    let name = template_name
        .strip_suffix(TEMPLATE_EXT)
        .unwrap_or(template_name);
    Path::new("templates").join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use metaspec_definition::{preset, Domain, TemplateConfig};
    use std::fs;
    use tempfile::tempdir;

    fn paths(project: &ToolkitProject) -> Vec<String> {
        project
            .paths()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_generate_writes_full_tree() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("mcp-kit");
        let def = preset(Domain::Mcp, "mcp-kit");

        let project = Generator::default()
            .generate(&def, &out, &GenerateOptions::default())
            .unwrap();

        assert_eq!(
            paths(&project),
            [
                ".gitignore",
                "AGENTS.md",
                "README.md",
                "memory/constitution.md",
                "pyproject.toml",
                "scripts/init.sh",
                "scripts/validate.sh",
                "src/mcp_kit/__init__.py",
                "src/mcp_kit/cli.py",
                "src/mcp_kit/parser.py",
                "src/mcp_kit/validator.py",
                "templates/server-spec.md",
            ]
        );

        for dir in ["templates", "memory", "examples", "src/mcp_kit", "scripts"] {
            assert!(out.join(dir).is_dir(), "missing {dir}");
        }

        let pyproject = fs::read_to_string(out.join("pyproject.toml")).unwrap();
        assert!(pyproject.contains("name = \"mcp-kit\""));
        assert!(pyproject.contains("\"pydantic>=2.0.0\","));
        assert!(pyproject.contains("packages = [\"src/mcp_kit\"]"));

        let cli = fs::read_to_string(out.join("src/mcp_kit/cli.py")).unwrap();
        assert!(cli.contains("def validate(spec_file: str):"));

        let agents = fs::read_to_string(out.join("AGENTS.md")).unwrap();
        assert!(agents.contains("| `capabilities` | array | no | Server capabilities |"));
        assert!(agents.contains("- `mcp-kit generate`: Generate MCP server code"));
    }

    #[test]
    fn test_existing_output_is_refused() {
        let dir = tempdir().unwrap();
        let def = preset(Domain::Generic, "kit");

        let err = Generator::default()
            .generate(&def, dir.path(), &GenerateOptions::default())
            .unwrap_err();
        assert!(matches!(err, TemplateError::AlreadyExists { .. }));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("kit");
        let def = preset(Domain::Ai, "kit");
        let options = GenerateOptions {
            dry_run: true,
            ..Default::default()
        };

        let project = Generator::default().generate(&def, &out, &options).unwrap();
        assert!(!out.exists());
        assert!(project.files.contains_key(Path::new("templates/agent-spec.md")));

        // An existing directory is fine for a preview.
        assert!(Generator::default().generate(&def, dir.path(), &options).is_ok());
    }

    #[test]
    fn test_custom_templates_and_specs_dir() {
        let templates = tempdir().unwrap();
        fs::create_dir_all(templates.path().join("extras")).unwrap();
        fs::write(
            templates.path().join("extras/review.md.hbs"),
            "Review {{entity.name}} in {{specs_dir}}/",
        )
        .unwrap();

        let mut def = preset(Domain::Web, "web-kit");
        def.templates = Some(TemplateConfig {
            custom: vec!["extras/review.md.hbs".to_string()],
        });

        let out = tempdir().unwrap();
        let options = GenerateOptions {
            dry_run: true,
            specs_dir: "design".to_string(),
            ..Default::default()
        };
        let project = Generator::new(Some(templates.path().to_path_buf()))
            .generate(&def, &out.path().join("web-kit"), &options)
            .unwrap();

        assert_eq!(
            project.files[Path::new("templates/review.md")],
            "Review Component in design/"
        );
        assert!(project.files.contains_key(Path::new("templates/component-spec.md")));
    }

    #[test]
    fn test_unknown_custom_template_fails() {
        let mut def = preset(Domain::Generic, "kit");
        def.templates = Some(TemplateConfig {
            custom: vec!["extras/missing.md.hbs".to_string()],
        });

        let out = tempdir().unwrap();
        let options = GenerateOptions {
            dry_run: true,
            ..Default::default()
        };
        let err = Generator::default()
            .generate(&def, out.path(), &options)
            .unwrap_err();
        assert!(matches!(err, TemplateError::NotFound { key } if key == "extras/missing.md.hbs"));
    }

    #[test]
    fn test_scripts_are_executable() {
        let dir = tempdir().unwrap();
        let def = preset(Domain::Generic, "kit");
        let project = Generator::default()
            .generate(&def, &dir.path().join("kit"), &GenerateOptions::default())
            .unwrap();

        assert_eq!(
            project.executable_files,
            [Path::new("scripts/init.sh"), Path::new("scripts/validate.sh")]
        );
    }
}
