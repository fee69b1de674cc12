//! Configuration file loading and parsing.

use crate::types::MetaspecConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Path of the config file relative to the project directory.
pub const CONFIG_FILE: &str = ".metaspec/config.yaml";

static ENV_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").expect("valid env pattern"));

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Load configuration from `.metaspec/config.yaml`, or defaults when the
    /// file does not exist.
    pub fn load(&self) -> Result<MetaspecConfig, ConfigError> {
        let config_path = self.base_path.join(CONFIG_FILE);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(MetaspecConfig::default());
        }

        self.load_file(&config_path)
    }

    /// Load an explicit config file. Unlike [`load`](Self::load), a missing
    /// file is an error.
    pub fn load_file(&self, path: &Path) -> Result<MetaspecConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        let expanded = expand_env_vars(&contents)?;

        let config: MetaspecConfig = if expanded.trim().is_empty() {
            MetaspecConfig::default()
        } else {
            serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?
        };

        self.validate(&config)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Validate configuration values.
    fn validate(&self, config: &MetaspecConfig) -> Result<(), ConfigError> {
        if config.templates.specs_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "templates.specs_dir must not be empty".to_string(),
            });
        }

        if config.sync.spec_kit_repo.trim().is_empty() || config.sync.openspec_repo.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "sync repositories must not be empty".to_string(),
            });
        }

        let mut seen = std::collections::HashSet::new();
        for toolkit in &config.toolkits {
            if toolkit.name.trim().is_empty() || toolkit.command.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "toolkits entries need a name and a command".to_string(),
                });
            }
            if !seen.insert(toolkit.name.as_str()) {
                return Err(ConfigError::ValidationError {
                    message: format!("duplicate toolkit: {}", toolkit.name),
                });
            }
        }

        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, config: &MetaspecConfig) -> Result<(), ConfigError> {
        let config_path = self.base_path.join(CONFIG_FILE);
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(config_path, yaml)?;
        Ok(())
    }

    /// Project directory this loader reads from.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

/// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
pub fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let mut result = content.to_string();

    for cap in ENV_REF.captures_iter(content) {
        let full_match = &cap[0];
        let var_name = &cap[1];
        let default = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) => v,
            Err(_) => match default {
                Some(d) => d.to_string(),
                None => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: var_name.to_string(),
                    })
                }
            },
        };

        result = result.replace(full_match, &value);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolkitConfig;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(dir: &Path, contents: &str) {
        let metaspec_dir = dir.join(".metaspec");
        fs::create_dir_all(&metaspec_dir).unwrap();
        fs::write(metaspec_dir.join("config.yaml"), contents).unwrap();
    }

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config, MetaspecConfig::default());
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
templates:
  custom_dir: my-templates
  specs_dir: specifications
sync:
  openspec_repo: https://example.com/openspec.git
toolkits:
  - name: api-spec-kit
    command: api-kit
    commands: [init, validate]
    install_hint: cargo install api-kit
"#,
        );

        let config = ConfigLoader::new(dir.path()).load().unwrap();

        assert_eq!(config.templates.custom_dir, Some(PathBuf::from("my-templates")));
        assert_eq!(config.templates.specs_dir, "specifications");
        assert_eq!(config.sync.openspec_repo, "https://example.com/openspec.git");
        assert_eq!(config.sync.spec_kit_repo, crate::DEFAULT_SPEC_KIT_REPO);
        assert_eq!(config.toolkits[0].commands, vec!["init", "validate"]);
        assert_eq!(
            config.toolkits[0].install_hint.as_deref(),
            Some("cargo install api-kit")
        );
    }

    #[test]
    fn test_empty_file_is_default() {
        let dir = tempdir().unwrap();
        write_config(dir.path(), "\n");
        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config, MetaspecConfig::default());
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        let result = loader.load_file(&dir.path().join("nope.yaml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("METASPEC_TEST_SPECS", "design");
        let result = expand_env_vars("specs_dir: ${METASPEC_TEST_SPECS}").unwrap();
        assert_eq!(result, "specs_dir: design");
        std::env::remove_var("METASPEC_TEST_SPECS");
    }

    #[test]
    fn test_env_var_default() {
        let result = expand_env_vars("key: ${METASPEC_NONEXISTENT:-fallback}").unwrap();
        assert_eq!(result, "key: fallback");
    }

    #[test]
    fn test_env_var_missing_error() {
        let result = expand_env_vars("key: ${METASPEC_MISSING_VAR}");
        match result {
            Err(ConfigError::EnvVarNotFound { var }) => assert_eq!(var, "METASPEC_MISSING_VAR"),
            other => panic!("Expected EnvVarNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_errors() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());

        let mut config = MetaspecConfig::default();
        config.templates.specs_dir = "  ".to_string();
        match loader.validate(&config) {
            Err(ConfigError::ValidationError { message }) => assert!(message.contains("specs_dir")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }

        let toolkit = ToolkitConfig {
            name: "dup".to_string(),
            command: "dup".to_string(),
            description: String::new(),
            commands: vec![],
            install_hint: None,
        };
        let mut config = MetaspecConfig::default();
        config.toolkits = vec![toolkit.clone(), toolkit];
        match loader.validate(&config) {
            Err(ConfigError::ValidationError { message }) => assert!(message.contains("duplicate")),
            other => panic!("Expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
templates:
  specs_dir: specs
  custom_dir: [unclosed
"#,
        );

        match ConfigLoader::new(dir.path()).load() {
            Err(ConfigError::ParseError { line, .. }) => assert!(line.is_some()),
            other => panic!("Expected ParseError with line number, got {other:?}"),
        }
    }

    #[test]
    fn test_save_config_round_trips() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());

        let mut config = MetaspecConfig::default();
        config.templates.specs_dir = "custom-specs".to_string();
        loader.save(&config).unwrap();

        assert!(dir.path().join(CONFIG_FILE).exists());
        assert_eq!(loader.load().unwrap(), config);
    }
}
