pub mod commands;
pub mod output;
pub mod registry;
pub mod render;
pub mod shell;
pub mod shell_context;
pub mod system_clock;

pub use shell::run_cli;
pub use shell_context::{CliMode, ShellContext};
