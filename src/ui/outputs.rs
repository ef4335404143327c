//! Step outputs (`bumped`, `newVersion`) read by later workflow steps.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;

/// Receives named step outputs
pub trait OutputSink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Writes outputs the way the GitHub runner expects.
///
/// With an output file (`GITHUB_OUTPUT`) each value is appended as
/// `name=value`; otherwise the legacy `::set-output` command is printed.
#[derive(Debug, Clone, Default)]
pub struct GithubOutputs {
    file: Option<PathBuf>,
}

impl GithubOutputs {
    pub fn new(file: Option<PathBuf>) -> Self {
        GithubOutputs { file }
    }
}

/// Legacy workflow command form of an output
pub fn set_output_command(name: &str, value: &str) -> String {
    format!("::set-output name={}::{}", name, value)
}

impl OutputSink for GithubOutputs {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        match &self.file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{}={}", name, value)?;
            }
            None => println!("{}", set_output_command(name, value)),
        }
        Ok(())
    }
}

/// Keeps outputs in memory; later values overwrite earlier ones
#[derive(Debug, Clone, Default)]
pub struct MemoryOutputs {
    values: HashMap<String, String>,
    history: Vec<(String, String)>,
}

impl MemoryOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Every value written, in order
    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }
}

impl OutputSink for MemoryOutputs {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.values.insert(name.to_string(), value.to_string());
        self.history.push((name.to_string(), value.to_string()));
        Ok(())
    }
}
