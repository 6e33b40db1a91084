//! Shared CLI output helpers.
//!
//! Status messages go to stderr so stdout carries only search results.
//! Styling is dropped when stderr is not a terminal or `NO_COLOR` is set.

use console::style;

/// Disable styling on both streams when `NO_COLOR` is set.
pub fn init_colors() {
    if std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}

/// Print an error message (red).
///
/// Example: `✗ path does not exist: roles/`
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().for_stderr(), msg);
}

/// Print a warning message (yellow).
///
/// Example: `⚠ search interrupted`
pub fn warn(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().for_stderr(), msg);
}

/// Print a hint message (cyan).
///
/// Example: `→ pass --vault-password-file`
pub fn hint(msg: &str) {
    eprintln!(
        "{} {}",
        style("→").cyan().for_stderr(),
        style(msg).cyan().for_stderr()
    );
}
