//! Terminal detection: TTY status, width and whether to emit color.

use std::env;

/// Width assumed when stdout is not a terminal.
const DEFAULT_WIDTH: usize = 80;

/// Returns `true` if stdout is connected to a terminal (TTY).
pub fn is_tty() -> bool {
    crossterm::tty::IsTty::is_tty(&std::io::stdout())
}

/// Terminal width in columns, or [`DEFAULT_WIDTH`] when it cannot be read.
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => cols as usize,
        _ => DEFAULT_WIDTH,
    }
}

/// Whether ANSI color codes should be written to stdout.
///
/// `NO_COLOR`, `CLICOLOR=0` and `TERM=dumb` switch color off;
/// `CLICOLOR_FORCE` switches it on for pipes. Otherwise color follows TTY
/// detection.
pub fn supports_color() -> bool {
    color_from_env(|key| env::var(key).ok()).unwrap_or_else(is_tty)
}

/// The decision the color variables make on their own, if any.
fn color_from_env(var: impl Fn(&str) -> Option<String>) -> Option<bool> {
    if var("NO_COLOR").is_some()
        || var("CLICOLOR").as_deref() == Some("0")
        || var("TERM").as_deref() == Some("dumb")
    {
        return Some(false);
    }
    var("CLICOLOR_FORCE").map(|_| true)
}
