use tracing::warn;

/// Reads the new version from `npm version` output.
///
/// The output is trimmed and a leading `v` dropped. With `workspace_quirk`
/// set and more than one line of output, the second line is taken instead:
/// npm workspaces print the root version before the package version.
pub fn parse_tool_output(stdout: &str, workspace_quirk: bool) -> String {
    let trimmed = stdout.trim();

    let line = if workspace_quirk {
        trimmed.lines().nth(1).unwrap_or(trimmed)
    } else {
        trimmed
    };

    let version = line.trim();
    let version = version.strip_prefix('v').unwrap_or(version).to_string();

    if semver::Version::parse(&version).is_err() {
        warn!(version = %version, "npm version reported something that is not a semantic version");
    }

    version
}

/// Prefixes a version with the configured tag prefix (e.g. `v` + `1.2.3`)
pub fn tag_name(tag_prefix: &str, version: &str) -> String {
    format!("{}{}", tag_prefix, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output() {
        assert_eq!(parse_tool_output("v1.2.4\n", false), "1.2.4");
        assert_eq!(parse_tool_output("1.2.4", true), "1.2.4");
    }

    #[test]
    fn test_workspace_output_takes_second_line() {
        assert_eq!(parse_tool_output("1.2.3\n1.2.4", true), "1.2.4");
        assert_eq!(parse_tool_output("v1.2.3\nv1.2.4\n", true), "1.2.4");
    }

    #[test]
    fn test_first_call_ignores_extra_lines() {
        assert_eq!(parse_tool_output("v1.2.3\nv1.2.4", false), "1.2.3\nv1.2.4");
    }

    #[test]
    fn test_prerelease_output() {
        assert_eq!(parse_tool_output("v2.0.0-beta.0", true), "2.0.0-beta.0");
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(tag_name("v", "1.2.3"), "v1.2.3");
        assert_eq!(tag_name("", "1.2.3"), "1.2.3");
    }
}
