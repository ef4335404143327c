use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{BumpError, Result};
use crate::exec::CommandRunner;

/// One recorded call to the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub dir: PathBuf,
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Stdout(String),
    Failure { code: i32, stderr: String },
}

#[derive(Debug, Clone)]
struct Rule {
    program: String,
    needles: Vec<String>,
    reply: Reply,
    once: bool,
}

impl Rule {
    fn matches(&self, program: &str, args: &[String]) -> bool {
        self.program == program && self.needles.iter().all(|needle| args.contains(needle))
    }
}

/// Runner for tests: records every call and answers from scripted rules.
///
/// Rules are checked in the order they were added. A rule matches when the
/// program is equal and every needle appears among the arguments. Calls
/// that match no rule succeed with empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: RefCell<Vec<Rule>>,
    calls: RefCell<Vec<Invocation>>,
}

impl MockRunner {
    /// Create a runner with no rules
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, program: &str, needles: &[&str], reply: Reply, once: bool) {
        self.rules.borrow_mut().push(Rule {
            program: program.to_string(),
            needles: needles.iter().map(|n| n.to_string()).collect(),
            reply,
            once,
        });
    }

    /// Answer matching calls with `stdout`
    pub fn on(self, program: &str, needles: &[&str], stdout: &str) -> Self {
        self.push(program, needles, Reply::Stdout(stdout.to_string()), false);
        self
    }

    /// Answer the next matching call with `stdout`, then forget the rule
    pub fn on_once(self, program: &str, needles: &[&str], stdout: &str) -> Self {
        self.push(program, needles, Reply::Stdout(stdout.to_string()), true);
        self
    }

    /// Fail matching calls with `code` and `stderr`
    pub fn fail_on(self, program: &str, needles: &[&str], code: i32, stderr: &str) -> Self {
        let reply = Reply::Failure {
            code,
            stderr: stderr.to_string(),
        };
        self.push(program, needles, reply, false);
        self
    }

    /// All calls made so far, in order
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// All calls rendered as `program arg arg ...`
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }

    /// Calls made to `program`
    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program == program)
            .cloned()
            .collect()
    }

    fn answer(&self, dir: &Path, program: &str, args: &[String]) -> Result<String> {
        self.calls.borrow_mut().push(Invocation {
            dir: dir.to_path_buf(),
            program: program.to_string(),
            args: args.to_vec(),
        });

        let mut rules = self.rules.borrow_mut();
        let Some(index) = rules.iter().position(|rule| rule.matches(program, args)) else {
            return Ok(String::new());
        };

        let reply = if rules[index].once {
            rules.remove(index).reply
        } else {
            rules[index].reply.clone()
        };

        match reply {
            Reply::Stdout(stdout) => Ok(stdout),
            Reply::Failure { code, stderr } => Err(BumpError::Command {
                program: program.to_string(),
                code: Some(code),
                stderr,
            }),
        }
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, dir: &Path, program: &str, args: &[String]) -> Result<()> {
        self.answer(dir, program, args).map(|_| ())
    }

    fn capture(&self, dir: &Path, program: &str, args: &[String]) -> Result<String> {
        self.answer(dir, program, args)
    }
}
