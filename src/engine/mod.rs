//! CLI engine: argument parsing, progress display, run handler.

pub mod arg_parser;
pub mod progress;
pub mod runner;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use progress::{ProgressBar, create_progress_bar, set_bar_total, update_progress_bar};
pub use runner::handle_run;
