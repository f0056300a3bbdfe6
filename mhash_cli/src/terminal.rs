//! What the attached terminal can display
//!
//! Probed once per run. Progress bars need stdout and stderr both on a
//! terminal that understands ANSI; colour additionally respects `NO_COLOR`.

use is_terminal::IsTerminal;
use std::ffi::OsString;
use std::io::{stderr, stdout};

/// CI runners that may allocate a TTY nobody is watching
const CI_VARS: [&str; 11] = [
    "CI",
    "CONTINUOUS_INTEGRATION",
    "JENKINS_URL",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "TRAVIS",
    "CIRCLECI",
    "BUILDKITE",
    "DRONE",
    "TEAMCITY_VERSION",
    "TF_BUILD",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    /// A person is presumably watching stdout
    pub interactive: bool,
    pub ansi: bool,
    pub stderr_tty: bool,
    /// `NO_COLOR` is set to a non-empty value
    pub no_color: bool,
}

impl Terminal {
    pub fn detect() -> Self {
        Self::from_env(stdout().is_terminal(), stderr().is_terminal(), |name| {
            std::env::var_os(name)
        })
    }

    /// Build from TTY flags and an environment lookup
    pub fn from_env(
        stdout_tty: bool,
        stderr_tty: bool,
        var: impl Fn(&str) -> Option<OsString>,
    ) -> Self {
        let set = |name: &str| var(name).is_some();
        let interactive = stdout_tty
            && !CI_VARS.iter().any(|name| set(name))
            && var("DEBIAN_FRONTEND").is_none_or(|v| v != "noninteractive");

        let term = var("TERM").unwrap_or_default();
        let ansi = interactive && (cfg!(windows) || !(term.is_empty() || term == "dumb"));

        Self {
            interactive,
            ansi,
            stderr_tty,
            no_color: var("NO_COLOR").is_some_and(|v| !v.is_empty()),
        }
    }

    /// Colour output, given the configured preference
    pub fn use_color(&self, configured: bool) -> bool {
        configured && self.ansi && !self.no_color
    }

    /// Progress bars, given the configured preference
    pub fn show_progress(&self, configured: bool) -> bool {
        configured && self.ansi && self.stderr_tty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn terminal(stdout_tty: bool, stderr_tty: bool, vars: &[(&str, &str)]) -> Terminal {
        let env: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        Terminal::from_env(stdout_tty, stderr_tty, |name| env.get(name).cloned())
    }

    #[test]
    fn test_plain_tty_gets_everything() {
        let term = terminal(true, true, &[("TERM", "xterm-256color")]);

        assert!(term.interactive);
        assert!(term.use_color(true));
        assert!(term.show_progress(true));
        assert!(!term.use_color(false));
        assert!(!term.show_progress(false));
    }

    #[test]
    fn test_pipe_gets_nothing() {
        let term = terminal(false, true, &[("TERM", "xterm")]);

        assert!(!term.interactive);
        assert!(!term.use_color(true));
        assert!(!term.show_progress(true));
    }

    #[test]
    fn test_ci_is_not_interactive() {
        let term = terminal(true, true, &[("TERM", "xterm"), ("GITHUB_ACTIONS", "true")]);
        assert!(!term.interactive);
        assert!(!term.show_progress(true));

        let debconf = terminal(true, true, &[("TERM", "xterm"), ("DEBIAN_FRONTEND", "noninteractive")]);
        assert!(!debconf.interactive);
    }

    #[test]
    fn test_no_color_keeps_progress() {
        let term = terminal(true, true, &[("TERM", "xterm"), ("NO_COLOR", "1")]);
        assert!(!term.use_color(true));
        assert!(term.show_progress(true));

        let empty = terminal(true, true, &[("TERM", "xterm"), ("NO_COLOR", "")]);
        assert!(empty.use_color(true));
    }

    #[test]
    fn test_redirected_stderr_hides_progress() {
        let term = terminal(true, false, &[("TERM", "xterm")]);
        assert!(term.use_color(true));
        assert!(!term.show_progress(true));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_dumb_terminal_has_no_ansi() {
        assert!(!terminal(true, true, &[("TERM", "dumb")]).ansi);
        assert!(!terminal(true, true, &[]).ansi);
    }
}
