/// User interface and status output utilities
///
/// This module handles:
/// - Serialized console output
/// - Colored terminal text
/// - Status, notice and error message formatting
///
/// Everything here goes to stderr so stdout stays clean for `--json`.
use crate::source::SourceError;
use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Mutex;

/// Execute a function with exclusive access to console output
fn status_lock<F>(f: F)
where
    F: FnOnce(),
{
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    let _guard = LOCK.lock();
    f();
}

/// Print colored text to stderr, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        eprint!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        let Some(mut t) = term::stderr() else {
            return false;
        };
        if t.fg(fg).is_err() {
            return false;
        }
        let _ = t.attr(term::Attr::Bold);
        if write!(t, "{}", s).is_err() {
            return false;
        }
        let _ = t.reset();
        true
    }
}

/// Print a status message with "leaderboard: " prefix
pub fn status(s: &str) {
    status_lock(|| {
        eprintln!("leaderboard: {}", s);
    });
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    status_lock(|| {
        eprintln!();
        print_color("error", term::color::BRIGHT_RED);
        eprintln!(": {}", msg);
        eprintln!();
    });
}

/// Print a warning that doesn't stop the run
pub fn print_warning(msg: &str) {
    status_lock(|| {
        print_color("warning", term::color::BRIGHT_YELLOW);
        eprintln!(": {}", msg);
    });
}

/// Text of the notice shown when the table could not be loaded
pub fn source_notice(err: &SourceError) -> String {
    let hint = match err {
        SourceError::NotConfigured => "pass --input, --url or --sheet-id",
        SourceError::Unauthorized { .. } => "share the sheet as \"anyone with the link can view\"",
        SourceError::NotFound { .. } => "check the sheet ID and --gid",
        SourceError::Http { .. } => "check the URL and your network connection",
        SourceError::Io { .. } => "check the --input path",
        SourceError::Parse(_) => "the source must be CSV with a header row or a JSON array of objects",
    };
    format!("Leaderboard data unavailable: {} (hint: {}). Showing an empty leaderboard.", err, hint)
}

/// Print the data-unavailable notice
pub fn print_notice(notice: &str) {
    status_lock(|| {
        print_color("notice", term::color::BRIGHT_CYAN);
        eprintln!(": {}", notice);
    });
}
