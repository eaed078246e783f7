//! dtoforge CLI library
//!
//! Reading definition tables, writing generated sources, and the command
//! implementations behind the `dtoforge` binary.

#![allow(clippy::missing_errors_doc)]

pub mod commands;
pub mod source;
pub mod writer;

pub use source::{CsvRowSource, SourceError};
pub use writer::{OutputWriter, WrittenFile};

use dtoforge::observability::LogFormat;
use dtoforge::CollisionPolicy;

/// What to do when two classes render to the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CollisionArg {
    /// Abort the run
    Reject,
    /// Keep the last class rendered, with a warning
    Overwrite,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Reject => Self::Reject,
            CollisionArg::Overwrite => Self::Overwrite,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormatArg {
    /// Multi-line, human-readable
    Pretty,
    /// Single-line, human-readable (default)
    #[default]
    Compact,
    /// JSON lines
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
