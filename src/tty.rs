//! Colorability detection for output sinks.
//!
//! Detection never fails loudly: every failure mode (no descriptor, no
//! console, virtual terminal mode refused) resolves to "not colorable".
//! Results are computed at the moment of the call; callers that need a
//! stable answer cache it themselves, as [`Console`](crate::Console) does
//! at construction time.

use std::env;
use std::io::{self, IsTerminal};

#[cfg(not(windows))]
use std::os::fd::AsFd;
#[cfg(windows)]
use std::os::windows::io::AsHandle;

#[cfg(windows)]
use winapi_util::console as wincon;

/// Identifies one of the process's standard output streams.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum StandardStreamKind {
    Stdout,
    Stderr,
}

/// Returns true if the environment permits color at all.
///
/// A non-empty `NO_COLOR` disables color, as does `TERM=dumb`. Anything
/// else, including an unset `TERM`, permits it; the terminal check still
/// has the final word.
fn env_allows_color() -> bool {
    if env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }
    if env::var_os("TERM").is_some_and(|term| term == "dumb") {
        return false;
    }
    true
}

/// Decides colorability for one of the process's standard streams.
///
/// Standard streams consult the environment in addition to the terminal
/// check, since that is where end users express a preference.
#[cfg(not(windows))]
pub(crate) fn stream_colorable(kind: StandardStreamKind) -> bool {
    if !env_allows_color() {
        return false;
    }
    match kind {
        StandardStreamKind::Stdout => io::stdout().is_terminal(),
        StandardStreamKind::Stderr => io::stderr().is_terminal(),
    }
}

#[cfg(windows)]
pub(crate) fn stream_colorable(kind: StandardStreamKind) -> bool {
    if !env_allows_color() {
        return false;
    }
    let is_tty = match kind {
        StandardStreamKind::Stdout => io::stdout().is_terminal(),
        StandardStreamKind::Stderr => io::stderr().is_terminal(),
    };
    if !is_tty {
        return false;
    }
    let con = match kind {
        StandardStreamKind::Stdout => wincon::Console::stdout(),
        StandardStreamKind::Stderr => wincon::Console::stderr(),
    };
    match con {
        // A real console honors ANSI only once virtual terminal processing
        // is enabled. Enabling is idempotent and best-effort; refusal
        // downgrades to not-colorable.
        Ok(mut con) => con.set_virtual_terminal_processing(true).is_ok(),
        // No console at all, yet the handle looks like a terminal: a
        // Cygwin/MSYS pseudo-terminal, which interprets ANSI natively.
        Err(_) => true,
    }
}

/// Decides colorability for an ad-hoc sink exposing a file descriptor.
///
/// The descriptor must be recognized as an interactive terminal (which on
/// Windows includes Cygwin/MSYS pseudo-terminals). Environment variables
/// are not consulted; they only apply to the process's standard streams.
#[cfg(not(windows))]
pub fn terminal_colorable<T: AsFd>(sink: &T) -> bool {
    sink.as_fd().is_terminal()
}

/// Decides colorability for an ad-hoc sink exposing an OS handle.
///
/// The handle must be recognized as an interactive terminal (which
/// includes Cygwin/MSYS pseudo-terminals). Virtual terminal processing is
/// only enabled for the process's standard streams; an ad-hoc console
/// handle is expected to have had it enabled by whoever owns it.
#[cfg(windows)]
pub fn terminal_colorable<T: AsHandle>(sink: &T) -> bool {
    sink.as_handle().is_terminal()
}

#[cfg(test)]
mod tests {
    #[cfg(unix)]
    #[test]
    fn dev_null_is_not_a_terminal() {
        let f = std::fs::File::open("/dev/null").unwrap();
        assert!(!super::terminal_colorable(&f));
    }
}
