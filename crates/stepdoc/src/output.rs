//! Colored terminal output.

use console::{Style, Term};

/// Terminal writer for the CLI.
///
/// Command results (reports, JSON, module listings) go to stdout; progress
/// and diagnostics go to stderr.
pub(crate) struct Output {
    results: Term,
    diagnostics: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            results: Term::stdout(),
            diagnostics: Term::stderr(),
        }
    }

    /// Write a result line.
    pub(crate) fn data(&self, text: &str) {
        let _ = self.results.write_line(text);
    }

    /// Write a result heading (cyan bold).
    pub(crate) fn heading(&self, text: &str) {
        let _ = self
            .results
            .write_line(&styled(&Style::new().cyan().bold(), text));
    }

    /// Write a progress message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.diagnostics.write_line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.diagnostic(&Style::new().green(), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.diagnostic(&Style::new().yellow(), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.diagnostic(&Style::new().red(), msg);
    }

    fn diagnostic(&self, style: &Style, msg: &str) {
        let _ = self.diagnostics.write_line(&styled(style, msg));
    }
}

/// Apply `style` to `msg`; colors are dropped when the terminal has none.
fn styled(style: &Style, msg: &str) -> String {
    style.apply_to(msg).to_string()
}
