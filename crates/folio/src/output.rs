//! Colored terminal output on stderr.

use std::fmt::Display;

use console::{Style, Term};

/// Width of [`Output::separator`] rules.
const RULE_WIDTH: usize = 60;

/// Progress and summary lines for the user.
///
/// Everything goes to stderr so stdout stays free for piping.
pub(crate) struct Output {
    term: Term,
    ok: Style,
    warn: Style,
    err: Style,
    heading: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            err: Style::new().red(),
            heading: Style::new().cyan().bold(),
        }
    }

    fn line(&self, msg: impl Display) {
        let _ = self.term.write_line(&msg.to_string());
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(self.ok.apply_to(msg));
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(self.warn.apply_to(msg));
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(self.err.apply_to(msg));
    }

    pub(crate) fn highlight(&self, msg: &str) {
        self.line(self.heading.apply_to(msg));
    }

    pub(crate) fn separator(&self) {
        self.line("=".repeat(RULE_WIDTH));
    }
}
