//! Domain presets.
//!
//! A preset is a complete meta-spec for a domain, used when a toolkit is
//! created without a meta-spec file.

use crate::types::{
    Command, Domain, EntityDefinition, Field, Lifecycle, MetaSpecDefinition,
};

const BASE_DEPENDENCIES: [&str; 3] = ["pydantic>=2.0.0", "typer>=0.9.0", "ruamel.yaml>=0.18.0"];

struct PresetField {
    name: &'static str,
    field_type: &'static str,
    required: bool,
    description: &'static str,
}

struct Preset {
    description: &'static str,
    entity: &'static str,
    /// Noun used in the default command descriptions.
    subject: &'static str,
    fields: &'static [PresetField],
    extra_dependencies: &'static [&'static str],
}

const fn field(
    name: &'static str,
    field_type: &'static str,
    required: bool,
    description: &'static str,
) -> PresetField {
    PresetField {
        name,
        field_type,
        required,
        description,
    }
}

const GENERIC_FIELDS: &[PresetField] = &[field("name", "string", true, "Entity name")];

const MCP_FIELDS: &[PresetField] = &[
    field("name", "string", true, "Server name"),
    field("version", "string", true, "Server version"),
    field("capabilities", "array", false, "Server capabilities"),
];

const WEB_FIELDS: &[PresetField] = &[
    field("name", "string", true, "Component name"),
    field("props", "object", false, "Component props"),
    field("styles", "object", false, "Component styles"),
];

const AI_FIELDS: &[PresetField] = &[
    field("name", "string", true, "Agent name"),
    field("model", "string", true, "LLM model"),
    field("capabilities", "array", true, "Agent capabilities"),
];

fn preset_for(domain: Domain) -> Preset {
    match domain {
        Domain::Generic => Preset {
            description: "Generic spec-driven toolkit",
            entity: "Entity",
            subject: "spec",
            fields: GENERIC_FIELDS,
            extra_dependencies: &[],
        },
        Domain::Mcp => Preset {
            description: "Spec-driven toolkit for MCP server development",
            entity: "MCPServer",
            subject: "MCP server",
            fields: MCP_FIELDS,
            extra_dependencies: &[],
        },
        Domain::Web => Preset {
            description: "Spec-driven toolkit for web component development",
            entity: "Component",
            subject: "component",
            fields: WEB_FIELDS,
            extra_dependencies: &[],
        },
        Domain::Ai => Preset {
            description: "Spec-driven toolkit for AI agent development",
            entity: "Agent",
            subject: "AI agent",
            fields: AI_FIELDS,
            extra_dependencies: &["openai>=1.0.0"],
        },
    }
}

/// Default toolkit name when none is given.
pub fn default_toolkit_name(domain: Domain) -> String {
    match domain {
        Domain::Generic => "my-spec-kit".to_string(),
        other => format!("{other}-toolkit"),
    }
}

/// Build a complete definition for `domain` named `toolkit_name`.
pub fn preset(domain: Domain, toolkit_name: &str) -> MetaSpecDefinition {
    let preset = preset_for(domain);

    let fields = preset
        .fields
        .iter()
        .map(|f| Field {
            name: f.name.to_string(),
            field_type: Some(f.field_type.to_string()),
            description: Some(f.description.to_string()),
            required: f.required,
        })
        .collect();

    let commands = if domain == Domain::Generic {
        vec![
            Command::new("init", "Initialize new spec file"),
            Command::new("validate", "Validate spec file"),
            Command::new("generate", "Generate from spec"),
        ]
    } else {
        vec![
            Command::new("init", format!("Initialize new {} spec", preset.subject)),
            Command::new("validate", format!("Validate {} spec", preset.subject)),
            Command::new("generate", format!("Generate {} code", preset.subject)),
        ]
    };

    let mut dependencies: Vec<String> = BASE_DEPENDENCIES.iter().map(|d| d.to_string()).collect();
    // Keep the YAML parser last, after domain-specific clients.
    let yaml = dependencies.pop();
    dependencies.extend(preset.extra_dependencies.iter().map(|d| d.to_string()));
    dependencies.extend(yaml);

    MetaSpecDefinition {
        name: toolkit_name.to_string(),
        version: "0.1.0".to_string(),
        domain,
        lifecycle: Lifecycle::Greenfield,
        entity: EntityDefinition {
            name: preset.entity.to_string(),
            fields,
        },
        description: Some(preset.description.to_string()),
        commands,
        templates: None,
        dependencies,
    }
}
