//! Command implementations.

mod init;
mod spec;
mod sync;
mod validate;
mod version;

pub use init::InitCommand;
pub use spec::SpecCommand;
pub use sync::SyncCommand;
pub use validate::ValidateCommand;
pub use version::VersionCommand;
