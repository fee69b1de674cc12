//! Template loading from the built-in set and a custom directory.

use std::collections::{BTreeSet, HashMap};
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use crate::error::TemplateError;

/// Template file extension.
pub const TEMPLATE_EXT: &str = ".hbs";

macro_rules! builtin {
    ($($key:literal),* $(,)?) => {
        &[$(($key, include_str!(concat!("../templates/", $key)))),*]
    };
}

/// Templates compiled into the binary, keyed `<group>/<file>.hbs`.
const BUILTIN: &[(&str, &str)] = builtin![
    "base/AGENTS.md.hbs",
    "base/README.md.hbs",
    "base/constitution.md.hbs",
    "base/gitignore.hbs",
    "base/pyproject.toml.hbs",
    "scaffold/__init__.py.hbs",
    "scaffold/cli.py.hbs",
    "scaffold/init.sh.hbs",
    "scaffold/parser.py.hbs",
    "scaffold/validate.sh.hbs",
    "scaffold/validator.py.hbs",
    "generic/plan-template.md.hbs",
    "generic/spec-template.md.hbs",
    "mcp/server-spec.md.hbs",
    "web/component-spec.md.hbs",
    "ai/agent-spec.md.hbs",
];

/// Where a template source came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOrigin {
    Custom,
    Builtin,
}

/// Resolves template keys to template source.
///
/// A custom directory, when set, shadows built-in templates key by key; keys
/// it does not provide still come from the built-in set.
pub struct TemplateLoader {
    custom_dir: Option<PathBuf>,
    cache: RwLock<HashMap<String, String>>,
}

impl TemplateLoader {
    pub fn new(custom_dir: Option<PathBuf>) -> Self {
        Self {
            custom_dir,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn custom_dir(&self) -> Option<&Path> {
        self.custom_dir.as_deref()
    }

    /// Load the source for `key`, checking the custom directory first.
    pub fn load(&self, key: &str) -> Result<String, TemplateError> {
        if let Some(source) = self.cache.read().ok().and_then(|c| c.get(key).cloned()) {
            return Ok(source);
        }

        let (source, origin) = self.resolve(key)?;
        tracing::trace!(key, ?origin, "loaded template");

        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key.to_string(), source.clone());
        }
        Ok(source)
    }

    /// Whether `key` resolves from either source.
    pub fn exists(&self, key: &str) -> bool {
        self.resolve(key).is_ok()
    }

    fn resolve(&self, key: &str) -> Result<(String, TemplateOrigin), TemplateError> {
        check_key(key)?;

        if let Some(path) = self.custom_path(key) {
            if path.is_file() {
                let source = std::fs::read_to_string(&path).map_err(TemplateError::io(&path))?;
                return Ok((source, TemplateOrigin::Custom));
            }
        }

        builtin_source(key)
            .map(|s| (s.to_string(), TemplateOrigin::Builtin))
            .ok_or_else(|| TemplateError::NotFound {
                key: key.to_string(),
            })
    }

    fn custom_path(&self, key: &str) -> Option<PathBuf> {
        self.custom_dir.as_ref().map(|dir| dir.join(key))
    }

    /// Template file names in `group`, sorted and de-duplicated across both
    /// sources. An unknown group yields an empty list.
    pub fn template_names(&self, group: &str) -> Vec<String> {
        let prefix = format!("{group}/");
        let mut names: BTreeSet<String> = BUILTIN
            .iter()
            .filter_map(|(key, _)| key.strip_prefix(&prefix))
            .filter(|name| !name.contains('/'))
            .map(str::to_string)
            .collect();

        if let Some(dir) = &self.custom_dir {
            let group_dir = dir.join(group);
            for entry in walkdir::WalkDir::new(&group_dir)
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
            {
                let name = entry.file_name().to_string_lossy();
                if name.ends_with(TEMPLATE_EXT) {
                    names.insert(name.into_owned());
                }
            }
        }

        names.into_iter().collect()
    }
}

impl Default for TemplateLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

fn builtin_source(key: &str) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, source)| *source)
}

/// Keys must be relative, stay inside the template root and name a `.hbs` file.
fn check_key(key: &str) -> Result<(), TemplateError> {
    let path = Path::new(key);
    let inside = path
        .components()
        .all(|c| matches!(c, Component::Normal(_)));

    if key.ends_with(TEMPLATE_EXT) && inside && path.components().count() >= 2 {
        Ok(())
    } else {
        Err(TemplateError::InvalidKey {
            key: key.to_string(),
        })
    }
}
