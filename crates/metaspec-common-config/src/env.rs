//! Environment variable handling.

use crate::types::MetaspecConfig;
use std::env;
use std::path::PathBuf;

/// Environment variable names.
pub mod vars {
    pub const METASPEC_CONFIG: &str = "METASPEC_CONFIG";
    pub const METASPEC_TEMPLATES_DIR: &str = "METASPEC_TEMPLATES_DIR";
    pub const METASPEC_LIBRARY_DIR: &str = "METASPEC_LIBRARY_DIR";
    pub const METASPEC_LOG_LEVEL: &str = "METASPEC_LOG_LEVEL";
}

/// Load `.env` then `.env.local` from the working directory, if present.
pub fn load_dotenv() {
    for file in [".env", ".env.local"] {
        if let Err(e) = dotenvy::from_filename(file) {
            if !e.not_found() {
                tracing::warn!(file, error = %e, "ignoring unreadable dotenv file");
            }
        }
    }
}

/// Apply environment overrides on top of a loaded config.
pub fn apply_env_overrides(config: &mut MetaspecConfig) {
    if let Some(dir) = non_empty_var(vars::METASPEC_TEMPLATES_DIR) {
        config.templates.custom_dir = Some(PathBuf::from(dir));
    }
    if let Some(dir) = non_empty_var(vars::METASPEC_LIBRARY_DIR) {
        config.templates.library_dir = PathBuf::from(dir);
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_overrides_template_dirs() {
        env::set_var(vars::METASPEC_TEMPLATES_DIR, "/opt/templates");
        env::set_var(vars::METASPEC_LIBRARY_DIR, "");

        let mut config = MetaspecConfig::default();
        apply_env_overrides(&mut config);

        assert_eq!(config.templates.custom_dir, Some(PathBuf::from("/opt/templates")));
        assert_eq!(config.templates.library_dir, PathBuf::from(".metaspec/library"));

        env::remove_var(vars::METASPEC_TEMPLATES_DIR);
        env::remove_var(vars::METASPEC_LIBRARY_DIR);
    }
}
