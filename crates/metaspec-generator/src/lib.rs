//! Toolkit project generation.
//!
//! Turns a [`MetaSpecDefinition`](metaspec_definition::MetaSpecDefinition)
//! into a [`ToolkitProject`]: a map of rendered files, the directories that
//! hold them and the scripts that must be executable.

mod error;
pub mod context;
pub mod generator;
pub mod loader;
pub mod project;
pub mod renderer;

pub use context::TemplateContext;
pub use error::TemplateError;
pub use generator::{GenerateOptions, Generator};
pub use loader::TemplateLoader;
pub use project::ToolkitProject;
pub use renderer::TemplateRenderer;
