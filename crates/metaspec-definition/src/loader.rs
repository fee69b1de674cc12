//! Meta-spec loading.

use std::path::{Path, PathBuf};

use serde_yaml::Value;
use thiserror::Error;

use crate::types::MetaSpecDefinition;
use crate::validation::{
    format_issues, validate_structure, IssueCode, ValidationIssue, ValidationReport,
    DEFAULT_MAX_ISSUES,
};

/// Errors raised while loading a meta-spec.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("meta-spec file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML{}: {message}", location(.line, .column))]
    Yaml {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{}", format_issues(.issues, DEFAULT_MAX_ISSUES))]
    Validation { issues: Vec<ValidationIssue> },
}

fn location(line: &usize, column: &usize) -> String {
    match (*line, *column) {
        (0, _) => String::new(),
        (l, 0) => format!(" at line {l}"),
        (l, c) => format!(" at line {l}, column {c}"),
    }
}

impl From<serde_yaml::Error> for DefinitionError {
    fn from(err: serde_yaml::Error) -> Self {
        let (line, column) = err
            .location()
            .map(|l| (l.line(), l.column()))
            .unwrap_or((0, 0));
        Self::Yaml {
            line,
            column,
            message: err.to_string(),
        }
    }
}

/// Load and validate a meta-spec file.
pub fn load_meta_spec(path: impl AsRef<Path>) -> Result<MetaSpecDefinition, DefinitionError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DefinitionError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let source = std::fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "loading meta-spec");
    parse_meta_spec(&source)
}

/// Parse and validate a meta-spec document held in memory.
pub fn parse_meta_spec(source: &str) -> Result<MetaSpecDefinition, DefinitionError> {
    let value = parse_value(source)?;

    let report = ValidationReport::from_issues(validate_structure(&value));
    for warning in &report.warnings {
        tracing::warn!(field = warning.field.as_deref().unwrap_or(""), "{}", warning.message);
    }
    if !report.is_valid() {
        return Err(DefinitionError::Validation {
            issues: report.errors,
        });
    }

    into_definition(value)
}

/// Validate a document without failing, for reporting.
pub fn check_meta_spec(source: &str) -> ValidationReport {
    let value = match parse_value(source) {
        Ok(value) => value,
        Err(DefinitionError::Yaml {
            line,
            column,
            message,
        }) => {
            return ValidationReport::from_issues(vec![ValidationIssue::error(
                format!("YAML syntax error: {message}"),
                IssueCode::YamlSyntax,
            )
            .at(line, column)
            .with_suggestion("Check indentation and quoting around this line")]);
        }
        Err(other) => {
            return ValidationReport::from_issues(vec![ValidationIssue::error(
                other.to_string(),
                IssueCode::YamlSyntax,
            )]);
        }
    };

    let mut report = ValidationReport::from_issues(validate_structure(&value));
    if report.is_valid() {
        if let Err(DefinitionError::Validation { issues }) = into_definition(value) {
            report.errors.extend(issues);
        }
    }
    report
}

fn parse_value(source: &str) -> Result<Value, DefinitionError> {
    if source.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_yaml::from_str(source)?)
}

// Catches mismatches the structural pass does not inspect, such as a
// non-boolean `required`.
fn into_definition(value: Value) -> Result<MetaSpecDefinition, DefinitionError> {
    serde_yaml::from_value(value).map_err(|e| DefinitionError::Validation {
        issues: vec![ValidationIssue::error(e.to_string(), IssueCode::WrongType)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Domain, Lifecycle};
    use crate::validation::IssueLevel;
    use std::fs;
    use tempfile::tempdir;

    const MCP_SPEC: &str = r#"
name: mcp-server-kit
version: "0.2.0"
domain: mcp
lifecycle: brownfield
description: Toolkit for MCP servers
entity:
  name: MCPServer
  fields:
    - name: name
      type: string
      required: true
    - name: capabilities
commands:
  - name: generate
    description: Generate server code
    options:
      - name: output
        type: path
dependencies:
  - pydantic>=2.0.0
templates:
  custom:
    - mcp/server.md.hbs
"#;

    #[test]
    fn test_parse_full_definition() {
        let def = parse_meta_spec(MCP_SPEC).unwrap();

        assert_eq!(def.name, "mcp-server-kit");
        assert_eq!(def.domain, Domain::Mcp);
        assert_eq!(def.lifecycle, Lifecycle::Brownfield);
        assert_eq!(def.entity.fields.len(), 2);
        assert!(def.entity.fields[0].required);
        assert_eq!(def.entity.fields[1].field_type, None);
        assert_eq!(def.commands[0].options[0].option_type, "path");
        assert!(!def.commands[0].options[0].required);
        assert_eq!(def.custom_templates(), ["mcp/server.md.hbs"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_meta_spec(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, DefinitionError::NotFound { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("meta-spec.yaml");
        fs::write(&path, MCP_SPEC).unwrap();

        let def = load_meta_spec(&path).unwrap();
        assert_eq!(def.package_name(), "mcp_server_kit");
    }

    #[test]
    fn test_yaml_syntax_error_carries_location() {
        let err = parse_meta_spec("name: kit\nentity: [unclosed\n").unwrap_err();
        match err {
            DefinitionError::Yaml { line, .. } => assert!(line > 0),
            other => panic!("expected Yaml error, got {other:?}"),
        }
    }

    #[test]
    fn test_structural_errors_fail_load() {
        let err = parse_meta_spec("name: kit\n").unwrap_err();
        match &err {
            DefinitionError::Validation { issues } => assert_eq!(issues.len(), 4),
            other => panic!("expected Validation error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("Found 4 validation error(s):"));
    }

    #[test]
    fn test_typed_mismatch_below_structure_is_reported() {
        let source = MCP_SPEC.replace("      required: true", "      required: maybe");
        assert!(matches!(
            parse_meta_spec(&source),
            Err(DefinitionError::Validation { .. })
        ));
        assert!(!check_meta_spec(&source).is_valid());
    }

    #[test]
    fn test_empty_document_is_rejected() {
        let err = parse_meta_spec("").unwrap_err();
        assert!(matches!(err, DefinitionError::Validation { .. }));
    }

    #[test]
    fn test_warnings_do_not_fail_load() {
        let source = MCP_SPEC.replace("name: MCPServer", "name: mcpServer");
        assert!(parse_meta_spec(&source).is_ok());

        let report = check_meta_spec(&source);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].level, IssueLevel::Warning);
    }

    #[test]
    fn test_check_reports_yaml_syntax() {
        let report = check_meta_spec("name: [\n");
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].code, Some(IssueCode::YamlSyntax));
        assert!(report.errors[0].line > 0);
    }

    #[test]
    fn test_check_keeps_warnings_alongside_errors() {
        let source = MCP_SPEC
            .replace("name: MCPServer", "name: server")
            .replace("domain: mcp", "domain: cli");
        let report = check_meta_spec(&source);

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.total_issues(), 2);
    }
}
