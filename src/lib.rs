//! ClipEditor
//!
//! 剪贴板双向编辑器: a label + content pair kept in step with the system
//! clipboard, each direction and trigger switchable on its own.

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod host;

pub use cli::Cli;
pub use commands::run;
