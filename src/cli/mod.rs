//! Command-line entry points

pub mod orchestration;

pub use orchestration::{run_bump_workflow, WorkflowDeps};
