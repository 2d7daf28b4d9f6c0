//! Terminal logging with colored module prefixes.
//!
//! ```ignore
//! log!("series"; "{} series, {} documents", series, documents);
//! log!("error"; "{err:#}");
//! ```
//!
//! | Module    | Color          |
//! |-----------|----------------|
//! | `error`   | bright red     |
//! | `landing` | bright blue    |
//! | `series`  | bright green   |
//! | others    | bright yellow  |

use colored::{ColoredString, Colorize};
use crossterm::{
    execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::OnceLock,
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Length of "[" + "]" + trailing space around the module name
const PREFIX_OVERHEAD: usize = 3;

/// Get terminal width, cached after first call.
/// Falls back to 120 columns if detection fails.
fn terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120))
}

/// Log a message with a colored module prefix.
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::utils::log::log($module, &format!($($arg)*))
    }};
}

/// Write one log line, truncated to the terminal width.
///
/// Lines are written under a stdout lock, so parallel workers never
/// interleave within a line.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let max_len = (terminal_width() as usize).saturating_sub(module.len() + PREFIX_OVERHEAD);
    let message = truncate_str(message, max_len);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "error" => prefix.bright_red().bold(),
        "landing" => prefix.bright_blue().bold(),
        "series" => prefix.bright_green().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Truncate a string to at most `max_len` bytes on a char boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_fits() {
        assert_eq!(truncate_str("series", 10), "series");
        assert_eq!(truncate_str("series", 6), "series");
    }

    #[test]
    fn test_truncate_str_cuts() {
        assert_eq!(truncate_str("my title series", 8), "my title");
        assert_eq!(truncate_str("series", 0), "");
    }

    #[test]
    fn test_truncate_str_unicode_boundary() {
        // "é" is 2 bytes
        assert_eq!(truncate_str("café", 4), "caf");
        assert_eq!(truncate_str("café", 5), "café");
    }

    #[test]
    fn test_colorize_prefix_wraps_module() {
        colored::control::set_override(false);
        assert_eq!(colorize_prefix("landing").to_string(), "[landing]");
        assert_eq!(colorize_prefix("Series").to_string(), "[Series]");
    }
}
