//! Output mode and writer.

use super::theme::EnvloadTheme;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show results and status lines.
    #[default]
    Normal,
    /// Show results only.
    Quiet,
}

impl OutputMode {
    /// Whether status lines (success notes, hints) are shown.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}

/// Output writer that respects output mode.
///
/// Results go to stdout; status and errors go to stderr so that JSON
/// output stays machine-readable.
#[derive(Debug)]
pub struct Output {
    mode: OutputMode,
    theme: EnvloadTheme,
}

impl Output {
    /// Create a writer with a theme matching the terminal.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_theme(mode, EnvloadTheme::detect())
    }

    /// Create a writer with an explicit theme.
    pub fn with_theme(mode: OutputMode, theme: EnvloadTheme) -> Self {
        Self { mode, theme }
    }

    /// Get the theme.
    pub fn theme(&self) -> &EnvloadTheme {
        &self.theme
    }

    /// Print a result line. Always shown.
    pub fn result(&self, msg: &str) {
        println!("{}", msg);
    }

    /// Print a status line if the mode allows it.
    pub fn status(&self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", msg);
        }
    }

    /// Print a success status line.
    pub fn success(&self, msg: &str) {
        self.status(&self.theme.format_success(msg));
    }

    /// Print an error. Always shown.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }
}
