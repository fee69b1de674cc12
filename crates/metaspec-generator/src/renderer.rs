//! Handlebars rendering.

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;

use crate::error::TemplateError;
use crate::loader::TemplateLoader;

/// Template renderer with the MetaSpec helper set.
///
/// Helpers: `snake_case`, `kebab_case`, `pascal_case`, `upper`, and
/// `join` (array, optional separator).
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        // Generated files are code and markdown, not HTML.
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(false);

        handlebars.register_helper("snake_case", Box::new(snake_case_helper));
        handlebars.register_helper("kebab_case", Box::new(kebab_case_helper));
        handlebars.register_helper("pascal_case", Box::new(pascal_case_helper));
        handlebars.register_helper("upper", Box::new(upper_helper));
        handlebars.register_helper("join", Box::new(join_helper));

        Self { handlebars }
    }

    /// Render template source. `key` names the template in errors.
    pub fn render<T: Serialize>(
        &self,
        key: &str,
        source: &str,
        data: &T,
    ) -> Result<String, TemplateError> {
        self.handlebars
            .render_template(source, data)
            .map_err(|e| TemplateError::Render {
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    /// Load `key` through `loader` and render it.
    pub fn render_key<T: Serialize>(
        &self,
        loader: &TemplateLoader,
        key: &str,
        data: &T,
    ) -> Result<String, TemplateError> {
        let source = loader.load(key)?;
        self.render(key, &source, data)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn write_transformed(h: &Helper, out: &mut dyn Output, f: fn(&str) -> String) -> HelperResult {
    let text = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&f(text))?;
    Ok(())
}

fn snake_case_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_transformed(h, out, to_snake_case)
}

fn kebab_case_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_transformed(h, out, to_kebab_case)
}

fn pascal_case_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_transformed(h, out, to_pascal_case)
}

fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    write_transformed(h, out, str::to_uppercase)
}

fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let separator = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .unwrap_or(", ");

    if let Some(items) = h.param(0).and_then(|v| v.value().as_array()) {
        let strings: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
        out.write(&strings.join(separator))?;
    }

    Ok(())
}

/// `MCPServer` -> `mcp_server`, `my-kit` -> `my_kit`.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == ' ' || c == '_' {
            if !result.ends_with('_') && !result.is_empty() {
                result.push('_');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
        }

        result.extend(c.to_lowercase());
    }

    result
}

pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}

pub fn to_pascal_case(s: &str) -> String {
    s.split(|c| c == '_' || c == '-' || c == ' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}
