//! Visual theme and styling.

use console::Style;

/// envload's visual theme.
#[derive(Debug, Clone)]
pub struct EnvloadTheme {
    /// Success messages (green).
    pub success: Style,
    /// Errors (red bold).
    pub error: Style,
    /// Secondary text (dim).
    pub dim: Style,
    /// Names of environments and packages (bold).
    pub highlight: Style,
    /// Key labels in key-value displays (bold magenta).
    pub key: Style,
}

impl Default for EnvloadTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvloadTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            key: Style::new().bold().magenta(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            key: Style::new(),
        }
    }

    /// Theme matching the terminal's color support.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format an aligned `key: value` line.
    pub fn format_key_value(&self, key: &str, value: &str) -> String {
        format!(
            "  {} {}",
            self.key.apply_to(format!("{:<10}", format!("{}:", key))),
            value
        )
    }
}

/// Whether colors should be used on stdout.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    console::Term::stdout().is_term()
}
