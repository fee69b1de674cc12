//! Configuration types for MetaSpec.
//!
//! Project configuration lives in `.metaspec/config.yaml`. Every section is
//! optional and falls back to the defaults defined in [`types`].

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
