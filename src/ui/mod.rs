//! User interface module - console formatting and step outputs.
//!
//! Separates concerns:
//! - `formatter` - Styled result lines and the commit window listing
//! - `outputs` - Named values handed to later workflow steps

pub mod formatter;
pub mod outputs;

pub use formatter::{display_commit_window, display_fatal, display_success};
pub use outputs::{GithubOutputs, MemoryOutputs, OutputSink};
