pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod event;
pub mod exec;
pub mod github;
pub mod manifest;
pub mod outcome;
pub mod tools;
pub mod ui;

pub use error::{BumpError, Result};
