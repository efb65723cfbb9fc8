pub mod config;
pub mod error;
pub mod file;
pub mod generator;
pub mod job;
pub mod state;
pub mod ui;

pub use config::AppConfig;
pub use error::AppError;
pub use file::SelectedFile;
pub use generator::backend::ChromaClient;
pub use generator::{ImageGenApi, PollPolicy, PollProgress};
pub use state::{Orchestrator, UiState};
pub use ui::{StatusDisplay, TerminalView, View};
