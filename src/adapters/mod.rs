pub mod assets;
pub mod filesystem;
mod process_runner;

pub use assets::ManifestTemplate;
pub use filesystem::FilesystemStore;
pub use process_runner::ProcessCommandRunner;
