//! Structural validation of meta-spec documents.
//!
//! Validation runs on the untyped YAML tree so that every problem in a
//! document is reported at once, each with a field path and, where one
//! exists, a suggested fix.

use std::fmt;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::types::{Domain, Lifecycle};

/// Default number of issues shown by [`format_issues`].
pub const DEFAULT_MAX_ISSUES: usize = 10;

const REQUIRED_FIELDS: [&str; 5] = ["name", "version", "domain", "lifecycle", "entity"];
const ENTITY_REQUIRED_FIELDS: [&str; 2] = ["name", "fields"];

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Error,
    Warning,
    Info,
}

/// Issue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    MissingRequiredField,
    WrongType,
    InvalidEnum,
    NamingConvention,
    EmptyList,
    YamlSyntax,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            Self::WrongType => "WRONG_TYPE",
            Self::InvalidEnum => "INVALID_ENUM",
            Self::NamingConvention => "NAMING_CONVENTION",
            Self::EmptyList => "EMPTY_LIST",
            Self::YamlSyntax => "YAML_SYNTAX",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub message: String,
    /// 1-based line, 0 when unknown.
    pub line: usize,
    /// 1-based column, 0 when unknown.
    pub column: usize,
    pub field: Option<String>,
    pub code: Option<IssueCode>,
    pub suggestion: Option<String>,
    pub level: IssueLevel,
}

impl ValidationIssue {
    pub fn error(message: impl Into<String>, code: IssueCode) -> Self {
        Self {
            message: message.into(),
            line: 0,
            column: 0,
            field: None,
            code: Some(code),
            suggestion: None,
            level: IssueLevel::Error,
        }
    }

    pub fn warning(message: impl Into<String>, code: IssueCode) -> Self {
        Self {
            level: IssueLevel::Warning,
            ..Self::error(message, code)
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == IssueLevel::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "Line {}", self.line)?;
            if self.column > 0 {
                write!(f, ", Column {}", self.column)?;
            }
            f.write_str(": ")?;
        }

        f.write_str(&self.message)?;

        if let Some(field) = &self.field {
            write!(f, " (field: {field})")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n   Suggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Issues split by severity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    /// Warnings and informational notes. Never fail validation.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let (errors, warnings) = issues.into_iter().partition(ValidationIssue::is_error);
        Self { errors, warnings }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}

/// Format issues as a numbered list, showing at most `max` entries.
pub fn format_issues(issues: &[ValidationIssue], max: usize) -> String {
    if issues.is_empty() {
        return "No validation errors".to_string();
    }

    let mut lines = vec![format!("Found {} validation error(s):\n", issues.len())];

    for (idx, issue) in issues.iter().take(max).enumerate() {
        lines.push(format!("{}. {}", idx + 1, issue));
    }

    if issues.len() > max {
        lines.push(format!("\n... and {} more error(s)", issues.len() - max));
    }

    lines.join("\n")
}

/// Check a toolkit name: non-empty, ASCII alphanumerics, `-` and `_` only.
pub fn validate_toolkit_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Toolkit name cannot be empty".to_string());
    }

    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(format!(
            "Invalid toolkit name '{name}': character '{bad}' is not allowed (use letters, digits, '-' or '_')"
        ));
    }

    Ok(())
}

/// Validate the structure of a meta-spec document.
pub fn validate_structure(value: &Value) -> Vec<ValidationIssue> {
    let Some(root) = value.as_mapping() else {
        return vec![ValidationIssue::error(
            format!("Meta-spec must be a mapping, got {}", type_name(value)),
            IssueCode::WrongType,
        )
        .with_suggestion("Start the document with top-level keys such as: name: my-spec-kit")];
    };

    let mut issues = Vec::new();
    check_required_fields(root, &mut issues);
    check_field_types(root, &mut issues);
    check_enum_values(root, &mut issues);

    if let Some(entity) = root.get("entity").and_then(Value::as_mapping) {
        validate_entity(entity, &mut issues);
    }
    if let Some(commands) = root.get("commands") {
        validate_commands(commands, &mut issues);
    }
    if let Some(dependencies) = root.get("dependencies") {
        validate_dependencies(dependencies, &mut issues);
    }

    issues
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn joined<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_required_fields(root: &Mapping, issues: &mut Vec<ValidationIssue>) {
    for field in REQUIRED_FIELDS {
        if !root.contains_key(field) {
            issues.push(
                ValidationIssue::error(
                    format!("Missing required field: '{field}'"),
                    IssueCode::MissingRequiredField,
                )
                .with_field(field)
                .with_suggestion(missing_field_suggestion(field)),
            );
        }
    }
}

fn check_field_types(root: &Mapping, issues: &mut Vec<ValidationIssue>) {
    let expectations: [(&str, fn(&Value) -> bool, &str, String); 4] = [
        (
            "name",
            Value::is_string,
            "a string",
            "Use a string value like 'my-spec-kit' or 'my_spec_kit'".to_string(),
        ),
        (
            "version",
            Value::is_string,
            "a string",
            "Use semantic version string like \"0.1.0\" (quoted)".to_string(),
        ),
        (
            "domain",
            Value::is_string,
            "a string",
            format!("Use one of: {}", joined(&Domain::ALL)),
        ),
        (
            "entity",
            Value::is_mapping,
            "an object",
            "Define entity as: entity:\\n  name: EntityName\\n  fields: [...]".to_string(),
        ),
    ];

    for (field, check, expected, suggestion) in expectations {
        if let Some(value) = root.get(field) {
            if !check(value) {
                issues.push(
                    ValidationIssue::error(
                        format!(
                            "Field '{field}' must be {expected}, got {}",
                            type_name(value)
                        ),
                        IssueCode::WrongType,
                    )
                    .with_field(field)
                    .with_suggestion(suggestion),
                );
            }
        }
    }
}

fn check_enum_values(root: &Mapping, issues: &mut Vec<ValidationIssue>) {
    if let Some(domain) = root.get("domain").and_then(Value::as_str) {
        if domain.parse::<Domain>().is_err() {
            issues.push(
                ValidationIssue::error(
                    format!("Invalid domain: '{domain}'"),
                    IssueCode::InvalidEnum,
                )
                .with_field("domain")
                .with_suggestion(format!("Use one of: {}", joined(&Domain::ALL))),
            );
        }
    }

    if let Some(lifecycle) = root.get("lifecycle").and_then(Value::as_str) {
        if !Lifecycle::ALL.iter().any(|l| l.as_str() == lifecycle) {
            issues.push(
                ValidationIssue::error(
                    format!("Invalid lifecycle: '{lifecycle}'"),
                    IssueCode::InvalidEnum,
                )
                .with_field("lifecycle")
                .with_suggestion(format!("Use one of: {}", joined(&Lifecycle::ALL))),
            );
        }
    }
}

fn validate_entity(entity: &Mapping, issues: &mut Vec<ValidationIssue>) {
    for field in ENTITY_REQUIRED_FIELDS {
        if !entity.contains_key(field) {
            issues.push(
                ValidationIssue::error(
                    format!("Entity missing required field: '{field}'"),
                    IssueCode::MissingRequiredField,
                )
                .with_field(format!("entity.{field}"))
                .with_suggestion(entity_field_suggestion(field)),
            );
        }
    }

    match entity.get("name") {
        Some(Value::String(name)) => {
            if !name.chars().next().is_some_and(char::is_uppercase) {
                issues.push(
                    ValidationIssue::warning(
                        format!("Entity name should start with uppercase: '{name}'"),
                        IssueCode::NamingConvention,
                    )
                    .with_field("entity.name")
                    .with_suggestion("Use PascalCase convention (e.g., 'MyEntity')"),
                );
            }
        }
        Some(other) => issues.push(
            ValidationIssue::error(
                format!("Entity name must be string, got {}", type_name(other)),
                IssueCode::WrongType,
            )
            .with_field("entity.name")
            .with_suggestion("Use PascalCase like 'MyEntity' or 'MCPServer'"),
        ),
        None => {}
    }

    match entity.get("fields") {
        Some(Value::Sequence(fields)) if fields.is_empty() => issues.push(
            ValidationIssue::error("Entity must have at least one field", IssueCode::EmptyList)
                .with_field("entity.fields")
                .with_suggestion("Add at least one field definition"),
        ),
        Some(Value::Sequence(fields)) => {
            for (idx, field) in fields.iter().enumerate() {
                match field.as_mapping() {
                    None => issues.push(
                        ValidationIssue::error(
                            format!("Field {idx} must be an object"),
                            IssueCode::WrongType,
                        )
                        .with_field(format!("entity.fields[{idx}]")),
                    ),
                    Some(map) if !map.contains_key("name") => issues.push(
                        ValidationIssue::error(
                            format!("Field {idx} missing required 'name'"),
                            IssueCode::MissingRequiredField,
                        )
                        .with_field(format!("entity.fields[{idx}].name"))
                        .with_suggestion("Add: name: field_name"),
                    ),
                    Some(_) => {}
                }
            }
        }
        Some(_) => issues.push(
            ValidationIssue::error("Entity fields must be a list", IssueCode::WrongType)
                .with_field("entity.fields")
                .with_suggestion("Define as list: fields:\\n  - name: field1\\n  - name: field2"),
        ),
        None => {}
    }
}

fn validate_commands(commands: &Value, issues: &mut Vec<ValidationIssue>) {
    let Some(commands) = commands.as_sequence() else {
        issues.push(
            ValidationIssue::error("Commands must be a list", IssueCode::WrongType)
                .with_field("commands"),
        );
        return;
    };

    for (idx, command) in commands.iter().enumerate() {
        let Some(command) = command.as_mapping() else {
            issues.push(
                ValidationIssue::error(
                    format!("Command {idx} must be an object"),
                    IssueCode::WrongType,
                )
                .with_field(format!("commands[{idx}]")),
            );
            continue;
        };

        for key in ["name", "description"] {
            if !command.contains_key(key) {
                issues.push(
                    ValidationIssue::error(
                        format!("Command {idx} missing required '{key}'"),
                        IssueCode::MissingRequiredField,
                    )
                    .with_field(format!("commands[{idx}].{key}")),
                );
            }
        }
    }
}

fn validate_dependencies(dependencies: &Value, issues: &mut Vec<ValidationIssue>) {
    let Some(dependencies) = dependencies.as_sequence() else {
        issues.push(
            ValidationIssue::error("Dependencies must be a list", IssueCode::WrongType)
                .with_field("dependencies")
                .with_suggestion("Define as list: dependencies:\\n  - package>=1.0.0"),
        );
        return;
    };

    for (idx, dependency) in dependencies.iter().enumerate() {
        if !dependency.is_string() {
            issues.push(
                ValidationIssue::error(
                    format!("Dependency {idx} must be a string"),
                    IssueCode::WrongType,
                )
                .with_field(format!("dependencies[{idx}]"))
                .with_suggestion("Use pip requirement format: 'package>=1.0.0'"),
            );
        }
    }
}

fn missing_field_suggestion(field: &str) -> String {
    match field {
        "name" => "Add: name: your-toolkit-name".to_string(),
        "version" => "Add: version: \"0.1.0\"".to_string(),
        "domain" => format!(
            "Add: domain: {} (or: {})",
            Domain::Generic,
            joined(&Domain::ALL[1..])
        ),
        "lifecycle" => format!("Add: lifecycle: {}", Lifecycle::Greenfield),
        "entity" => "Add: entity:\\n  name: YourEntity\\n  fields:\\n    - name: field1".to_string(),
        other => format!("Add required field: {other}"),
    }
}

fn entity_field_suggestion(field: &str) -> String {
    match field {
        "name" => "Add entity name: name: MyEntity".to_string(),
        "fields" => "Add entity fields: fields:\\n  - name: id\\n    type: str".to_string(),
        other => format!("Add required entity field: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn issues_for(yaml: &str) -> Vec<ValidationIssue> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        validate_structure(&value)
    }

    fn codes(issues: &[ValidationIssue]) -> Vec<(Option<String>, IssueCode)> {
        issues
            .iter()
            .map(|i| (i.field.clone(), i.code.unwrap()))
            .collect()
    }

    const VALID: &str = r#"
name: my-kit
version: "0.1.0"
domain: generic
lifecycle: greenfield
entity:
  name: Spec
  fields:
    - name: id
      type: str
commands:
  - name: init
    description: Initialize
dependencies:
  - pydantic>=2.0.0
"#;

    #[test]
    fn test_valid_document_has_no_issues() {
        assert!(issues_for(VALID).is_empty());
    }

    #[test]
    fn test_missing_required_fields_in_order() {
        let issues = issues_for("description: only this\n");
        let fields: Vec<_> = issues.iter().filter_map(|i| i.field.as_deref()).collect();

        assert_eq!(fields, ["name", "version", "domain", "lifecycle", "entity"]);
        assert!(issues
            .iter()
            .all(|i| i.code == Some(IssueCode::MissingRequiredField)));
        assert_eq!(
            issues[2].suggestion.as_deref(),
            Some("Add: domain: generic (or: mcp, web, ai)")
        );
    }

    #[test]
    fn test_non_mapping_root_is_single_error() {
        let issues = issues_for("- a\n- b\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, Some(IssueCode::WrongType));
        assert!(issues[0].message.contains("got list"));
    }

    #[test]
    fn test_unquoted_version_is_wrong_type() {
        let yaml = VALID.replace("version: \"0.1.0\"", "version: 1.0");
        let issues = issues_for(&yaml);

        assert_eq!(codes(&issues), [(Some("version".to_string()), IssueCode::WrongType)]);
        assert_eq!(issues[0].message, "Field 'version' must be a string, got float");
    }

    #[test_case("domain: desktop", "domain" ; "bad domain")]
    #[test_case("lifecycle: legacy", "lifecycle" ; "bad lifecycle")]
    fn test_invalid_enum(line: &str, field: &str) {
        let key = line.split(':').next().unwrap();
        let original = VALID
            .lines()
            .find(|l| l.starts_with(&format!("{key}:")))
            .unwrap();
        let issues = issues_for(&VALID.replace(original, line));

        assert_eq!(codes(&issues), [(Some(field.to_string()), IssueCode::InvalidEnum)]);
        assert!(issues[0].suggestion.as_ref().unwrap().starts_with("Use one of: "));
    }

    #[test]
    fn test_lowercase_entity_name_is_warning_only() {
        let issues = issues_for(&VALID.replace("name: Spec", "name: spec"));

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].level, IssueLevel::Warning);
        assert_eq!(issues[0].code, Some(IssueCode::NamingConvention));
        assert!(ValidationReport::from_issues(issues).is_valid());
    }

    #[test_case("  fields: []", IssueCode::EmptyList, "entity.fields" ; "empty fields")]
    #[test_case("  fields: nope", IssueCode::WrongType, "entity.fields" ; "fields not a list")]
    #[test_case("  fields:\n    - just-a-string", IssueCode::WrongType, "entity.fields[0]" ; "field not a mapping")]
    #[test_case("  fields:\n    - type: str", IssueCode::MissingRequiredField, "entity.fields[0].name" ; "field without name")]
    fn test_entity_field_problems(fields: &str, code: IssueCode, field: &str) {
        let yaml = VALID.replace("  fields:\n    - name: id\n      type: str", fields);
        let issues = issues_for(&yaml);
        assert_eq!(codes(&issues), [(Some(field.to_string()), code)]);
    }

    #[test]
    fn test_command_problems() {
        let yaml = VALID.replace(
            "commands:\n  - name: init\n    description: Initialize",
            "commands:\n  - name: init\n  - oops",
        );
        let issues = issues_for(&yaml);

        assert_eq!(
            codes(&issues),
            [
                (Some("commands[0].description".to_string()), IssueCode::MissingRequiredField),
                (Some("commands[1]".to_string()), IssueCode::WrongType),
            ]
        );
    }

    #[test]
    fn test_dependency_problems() {
        let yaml = VALID.replace("  - pydantic>=2.0.0", "  - 42");
        let issues = issues_for(&yaml);
        assert_eq!(codes(&issues), [(Some("dependencies[0]".to_string()), IssueCode::WrongType)]);

        let yaml = VALID.replace("dependencies:\n  - pydantic>=2.0.0", "dependencies: pydantic");
        let issues = issues_for(&yaml);
        assert_eq!(codes(&issues), [(Some("dependencies".to_string()), IssueCode::WrongType)]);
    }

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::error("Invalid domain: 'x'", IssueCode::InvalidEnum)
            .with_field("domain")
            .with_suggestion("Use one of: generic")
            .at(4, 9);
        assert_eq!(
            issue.to_string(),
            "Line 4, Column 9: Invalid domain: 'x' (field: domain)\n   Suggestion: Use one of: generic"
        );

        let issue = ValidationIssue::error("bad", IssueCode::YamlSyntax).at(3, 0);
        assert_eq!(issue.to_string(), "Line 3: bad");

        let issue = ValidationIssue::error("bad", IssueCode::YamlSyntax);
        assert_eq!(issue.to_string(), "bad");
    }

    #[test]
    fn test_format_issues_truncates() {
        assert_eq!(format_issues(&[], DEFAULT_MAX_ISSUES), "No validation errors");

        let issues: Vec<_> = (0..12)
            .map(|i| ValidationIssue::error(format!("problem {i}"), IssueCode::WrongType))
            .collect();
        let text = format_issues(&issues, DEFAULT_MAX_ISSUES);

        assert!(text.starts_with("Found 12 validation error(s):\n"));
        assert!(text.contains("10. problem 9"));
        assert!(!text.contains("11. problem 10"));
        assert!(text.ends_with("... and 2 more error(s)"));
    }

    #[test_case("my-spec-kit", true)]
    #[test_case("kit_2", true)]
    #[test_case("", false)]
    #[test_case("my kit", false)]
    #[test_case("kit/../x", false)]
    fn test_toolkit_name(name: &str, ok: bool) {
        assert_eq!(validate_toolkit_name(name).is_ok(), ok);
    }
}
