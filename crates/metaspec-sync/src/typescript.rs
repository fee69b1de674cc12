//! Extraction of slash command bodies from OpenSpec's TypeScript source.
//!
//! OpenSpec keeps its command text in template-literal constants that
//! reference each other through `${name}`, and assembles each command as
//! `cmd: [a, b, c].join('\n\n')`.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Expansion stops below this nesting depth.
const MAX_EXPANSION_DEPTH: usize = 10;

static CONST_TEMPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)const\s+(\w+)\s*=\s*`((?:[^`\\]|\\.)*)`;?").expect("valid const pattern")
});
static INTERPOLATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{(\w+)\}").expect("valid interpolation pattern"));

/// Template-literal constants declared in `source`, by name.
pub fn template_constants(source: &str) -> HashMap<String, String> {
    CONST_TEMPLATE
        .captures_iter(source)
        .map(|c| (c[1].to_string(), c[2].to_string()))
        .collect()
}

/// Expand `${name}` references recursively. Unknown names stay as written.
pub fn expand(text: &str, constants: &HashMap<String, String>) -> String {
    expand_at(text, constants, 0)
}

fn expand_at(text: &str, constants: &HashMap<String, String>, depth: usize) -> String {
    if depth > MAX_EXPANSION_DEPTH {
        return text.to_string();
    }

    INTERPOLATION
        .replace_all(text, |caps: &Captures| match constants.get(&caps[1]) {
            Some(value) => expand_at(value, constants, depth + 1),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Bodies of the requested commands, in request order. Commands whose
/// definition cannot be found, or whose parts are all unknown, are omitted.
pub fn extract_commands(source: &str, commands: &[&str]) -> Vec<(String, String)> {
    let constants = template_constants(source);

    commands
        .iter()
        .filter_map(|cmd| {
            let pattern = format!(r#"{}:\s*\[([\w,\s]+)\]\.join\(['"]\\n\\n['"]\)"#, regex::escape(cmd));
            let re = Regex::new(&pattern).ok()?;
            let parts_list = re.captures(source)?.get(1)?.as_str().to_string();

            let parts: Vec<String> = parts_list
                .split(',')
                .map(str::trim)
                .filter_map(|name| constants.get(name))
                .map(|body| expand(body, &constants))
                .collect();

            (!parts.is_empty()).then(|| (cmd.to_string(), parts.join("\n\n")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
const baseGuardrails = `- Keep changes small`;
const proposalGuardrails = `${baseGuardrails}
- Ask before editing \`specs\``;
const proposalSteps = `1. Run \`openspec list\`
2. Draft ${unknownRef}`;
const applySteps = `Apply the change.`;

export const slashCommandBodies = {
  proposal: [proposalGuardrails, proposalSteps].join('\n\n'),
  apply: [applySteps, missingPart].join("\n\n"),
};
"#;

    #[test]
    fn test_constants_allow_escaped_backticks() {
        let constants = template_constants(SOURCE);
        assert_eq!(constants.len(), 4);
        assert!(constants["proposalGuardrails"].contains(r"\`specs\`"));
    }

    #[test]
    fn test_expand_nested_and_unknown() {
        let constants = template_constants(SOURCE);
        let expanded = expand(&constants["proposalGuardrails"], &constants);
        assert!(expanded.starts_with("- Keep changes small\n- Ask"));

        let expanded = expand(&constants["proposalSteps"], &constants);
        assert!(expanded.ends_with("2. Draft ${unknownRef}"));
    }

    #[test]
    fn test_self_reference_terminates() {
        let mut constants = HashMap::new();
        constants.insert("a".to_string(), "x${a}".to_string());
        let expanded = expand("${a}", &constants);
        assert!(expanded.starts_with("xxxxxxxxxx"));
        assert!(expanded.ends_with("${a}"));
    }

    #[test]
    fn test_extract_commands() {
        let commands = extract_commands(SOURCE, &["proposal", "apply", "archive"]);

        let names: Vec<_> = commands.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["proposal", "apply"]);

        let (_, proposal) = &commands[0];
        assert!(proposal.contains("- Keep changes small"));
        assert!(proposal.contains("\n\n1. Run"));
        assert_eq!(commands[1].1, "Apply the change.");
    }
}
