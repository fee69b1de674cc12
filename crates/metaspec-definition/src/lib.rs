//! Meta-spec definitions.
//!
//! A meta-spec is a YAML document describing a spec-driven toolkit: its
//! domain, lifecycle, core entity, commands and dependencies. This crate
//! provides:
//!
//! - the typed model ([`MetaSpecDefinition`] and friends)
//! - structural validation with fix suggestions ([`validation`])
//! - loading from files or strings ([`load_meta_spec`], [`parse_meta_spec`])
//! - domain presets for creating definitions without a file ([`presets`])

pub mod loader;
pub mod presets;
pub mod types;
pub mod validation;

pub use loader::{check_meta_spec, load_meta_spec, parse_meta_spec, DefinitionError};
pub use presets::{default_toolkit_name, preset};
pub use types::*;
pub use validation::{
    format_issues, validate_structure, validate_toolkit_name, IssueCode, IssueLevel,
    ValidationIssue, ValidationReport, DEFAULT_MAX_ISSUES,
};
