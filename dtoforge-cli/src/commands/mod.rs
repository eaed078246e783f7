//! CLI command implementations

pub mod generate;
pub mod init;
pub mod tree;

pub use generate::GenerateCommand;
pub use init::InitCommand;
pub use tree::TreeCommand;
