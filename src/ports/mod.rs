mod command_runner;
mod repository_filesystem;

pub use command_runner::{CommandRunner, CommandSpec, CommandStatus};
pub use repository_filesystem::RepositoryFilesystem;
