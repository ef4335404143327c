//! Pure formatting functions for console output.
//!
//! `format_*` functions build the styled line, `display_*` print it.

use console::style;

use crate::domain::Commit;

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✔ Success:").green().bold(), message)
}

pub fn format_fatal(message: &str) -> String {
    format!("{} {}", style("✖ Fatal:").red().bold(), message)
}

/// Format and print the final success line.
pub fn display_success(message: &str) {
    println!("{}", format_success(message));
}

/// Format and print a fatal error line to stderr.
pub fn display_fatal(message: &str) {
    eprintln!("{}", format_fatal(message));
}

/// Lines summarising the commit window, listing at most 10 subjects.
pub fn format_commit_window(commits: &[Commit]) -> Vec<String> {
    let mut lines = vec![format!(
        "{}",
        style(format!("Got {} commit(s):", commits.len())).bold()
    )];

    for (i, commit) in commits.iter().take(10).enumerate() {
        let subject = commit.subject();
        let short: String = subject.chars().take(60).collect();
        lines.push(format!("  {}. {}", i + 1, short));
    }

    if commits.len() > 10 {
        lines.push(format!("  ... and {} more commits", commits.len() - 10));
    }

    lines
}

/// Display the commits the run is about to inspect.
pub fn display_commit_window(commits: &[Commit]) {
    for line in format_commit_window(commits) {
        println!("{}", line);
    }
}
