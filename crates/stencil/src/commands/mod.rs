//! Command handlers, one module per subcommand.

pub mod completion;
pub mod fmt;
pub mod init;
pub mod lint;
pub mod list;
pub mod new;
pub mod render;
pub mod show;
pub mod version;
