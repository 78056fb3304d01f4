use std::fmt;
use std::io::{self, Write};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use crate::strip::strip_ansi_bytes;
use crate::traits::ColorWrite;
use crate::tty::{StandardStreamKind, stream_colorable};
use crate::types::Style;

#[cfg(not(windows))]
use std::os::fd::AsFd;
#[cfg(windows)]
use std::os::windows::io::AsHandle;

/// An output context: a writable sink plus its cached colorability.
///
/// Colorability is decided once, when the sink is installed. The console
/// never owns the sink's lifecycle beyond holding it; it only writes to it.
/// Write failures are propagated verbatim to the caller, with no retry.
///
/// A process-wide default console wrapping standard error is created at
/// first use; the top-level [`print`]/[`println`] functions go through it.
pub struct Console {
    wtr: Box<dyn io::Write + Send>,
    colorable: bool,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("colorable", &self.colorable)
            .finish_non_exhaustive()
    }
}

impl Console {
    /// Create a console writing to standard output, with colorability
    /// decided from the environment and the stream's terminal status.
    pub fn stdout() -> Console {
        Console {
            wtr: Box::new(io::stdout()),
            colorable: stream_colorable(StandardStreamKind::Stdout),
        }
    }

    /// Create a console writing to standard error, with colorability
    /// decided from the environment and the stream's terminal status.
    pub fn stderr() -> Console {
        Console {
            wtr: Box::new(io::stderr()),
            colorable: stream_colorable(StandardStreamKind::Stderr),
        }
    }

    /// Wrap an arbitrary writer.
    ///
    /// A sink with no file descriptor accessor cannot be probed, so it is
    /// always resolved not-colorable. Use [`Console::set_colorable`] to
    /// override, or [`Console::wrap_terminal`] for descriptor-bearing
    /// sinks.
    pub fn wrap<W: io::Write + Send + 'static>(wtr: W) -> Console {
        Console { wtr: Box::new(wtr), colorable: false }
    }

    /// Wrap a writer that exposes a file descriptor, probing the
    /// descriptor for terminal status to decide colorability.
    #[cfg(not(windows))]
    pub fn wrap_terminal<W>(wtr: W) -> Console
    where
        W: io::Write + AsFd + Send + 'static,
    {
        let colorable = crate::tty::terminal_colorable(&wtr);
        Console { wtr: Box::new(wtr), colorable }
    }

    /// Wrap a writer that exposes an OS handle, probing the handle for
    /// terminal status to decide colorability.
    #[cfg(windows)]
    pub fn wrap_terminal<W>(wtr: W) -> Console
    where
        W: io::Write + AsHandle + Send + 'static,
    {
        let colorable = crate::tty::terminal_colorable(&wtr);
        Console { wtr: Box::new(wtr), colorable }
    }

    /// Whether styles rendered through this console emit escape sequences.
    pub fn colorable(&self) -> bool {
        self.colorable
    }

    /// Overrides the detected colorability.
    pub fn set_colorable(&mut self, yes: bool) {
        self.colorable = yes;
    }

    /// Writes `args` wrapped in `style`, honoring this console's
    /// colorability and the style's own force override.
    pub fn print(
        &mut self,
        style: &Style,
        args: fmt::Arguments<'_>,
    ) -> io::Result<()> {
        let text = args.to_string();
        let rendered = style.render(&text, self.colorable);
        self.wtr.write_all(rendered.as_bytes())
    }

    /// Like [`Console::print`], but line-oriented.
    ///
    /// Exactly one trailing newline is stripped from the formatted content
    /// before wrapping, and a single newline is appended after the reset
    /// sequence, so the reset precedes the line terminator.
    pub fn println(
        &mut self,
        style: &Style,
        args: fmt::Arguments<'_>,
    ) -> io::Result<()> {
        let mut text = args.to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        let rendered = style.render(&text, self.colorable);
        self.wtr.write_all(rendered.as_bytes())?;
        self.wtr.write_all(b"\n")
    }
}

impl io::Write for Console {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.wtr.write(buf)
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.wtr.flush()
    }
}

impl ColorWrite for Console {
    fn colorable(&self) -> bool {
        self.colorable
    }

    fn set_colorable(&mut self, yes: bool) {
        self.colorable = yes;
    }
}

/// A writer adapter that strips ANSI escape sequences when its sink is not
/// colorable and passes bytes through untouched when it is.
///
/// The strip path matches sequences within each `write` call; an escape
/// sequence split across two calls is not recognized. Line- or
/// message-oriented callers are unaffected.
#[derive(Debug)]
pub struct ColorWriter<W> {
    wtr: W,
    colorable: bool,
}

impl<W: io::Write> ColorWriter<W> {
    /// Create a writer with an explicit colorability.
    pub fn with_colorable(wtr: W, colorable: bool) -> ColorWriter<W> {
        ColorWriter { wtr, colorable }
    }

    /// Create a writer for a descriptor-bearing sink, deciding
    /// colorability from the descriptor's terminal status.
    #[cfg(not(windows))]
    pub fn detect(wtr: W) -> ColorWriter<W>
    where
        W: AsFd,
    {
        let colorable = crate::tty::terminal_colorable(&wtr);
        ColorWriter { wtr, colorable }
    }

    /// Create a writer for a handle-bearing sink, deciding colorability
    /// from the handle's terminal status.
    #[cfg(windows)]
    pub fn detect(wtr: W) -> ColorWriter<W>
    where
        W: AsHandle,
    {
        let colorable = crate::tty::terminal_colorable(&wtr);
        ColorWriter { wtr, colorable }
    }

    /// Consume this `ColorWriter` and return the inner writer.
    pub fn into_inner(self) -> W {
        self.wtr
    }

    /// Return a reference to the inner writer.
    pub fn get_ref(&self) -> &W {
        &self.wtr
    }

    /// Return a mutable reference to the inner writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.wtr
    }
}

impl<W: io::Write> io::Write for ColorWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.colorable {
            return self.wtr.write(buf);
        }
        // The caller's count must cover the bytes it handed us, not the
        // post-strip length, so stripped content is written in full.
        self.wtr.write_all(&strip_ansi_bytes(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.wtr.flush()
    }
}

impl<W: io::Write> ColorWrite for ColorWriter<W> {
    fn colorable(&self) -> bool {
        self.colorable
    }

    fn set_colorable(&mut self, yes: bool) {
        self.colorable = yes;
    }
}

static DEFAULT: LazyLock<Mutex<Console>> =
    LazyLock::new(|| Mutex::new(Console::stderr()));

fn lock_default() -> MutexGuard<'static, Console> {
    DEFAULT.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Replaces the process-wide default console.
///
/// The default is expected to be set once near process start; replacing it
/// while other threads are printing through it is not a defined-behavior
/// case and must be serialized externally.
pub fn set_default(console: Console) {
    *lock_default() = console;
}

/// The colorability of the process-wide default console.
pub fn default_colorable() -> bool {
    lock_default().colorable()
}

/// Overrides the colorability of the process-wide default console.
pub fn set_default_colorable(yes: bool) {
    lock_default().set_colorable(yes);
}

/// Writes `args` wrapped in `style` to the default console.
pub fn print(style: &Style, args: fmt::Arguments<'_>) -> io::Result<()> {
    lock_default().print(style, args)
}

/// Writes `args` wrapped in `style` to the default console, line-oriented.
pub fn println(style: &Style, args: fmt::Arguments<'_>) -> io::Result<()> {
    lock_default().println(style, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::Attribute;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> Vec<u8> {
            self.0.lock().unwrap().clone()
        }
    }

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn wrapped_writer_without_descriptor_is_not_colorable() {
        let console = Console::wrap(Vec::new());
        assert!(!console.colorable());
    }

    #[test]
    fn capability_override_wins() {
        let mut console = Console::wrap(Vec::new());
        console.set_colorable(true);
        assert!(console.colorable());
        console.set_colorable(false);
        assert!(!console.colorable());
    }

    #[test]
    fn print_passes_content_through_when_not_colorable() {
        let buf = SharedBuf::default();
        let mut console = Console::wrap(buf.clone());
        console.print(&Style::red(), format_args!("{} {}", "a", 1)).unwrap();
        assert_eq!(buf.contents(), b"a 1");
    }

    #[test]
    fn print_wraps_when_colorable() {
        let buf = SharedBuf::default();
        let mut console = Console::wrap(buf.clone());
        console.set_colorable(true);
        let mut style = Style::new();
        style.add(Attribute::BOLD).add(Attribute::FG_RED);
        console.print(&style, format_args!("hot")).unwrap();
        assert_eq!(buf.contents(), b"\x1B[1;31mhot\x1B[22;0m");
    }

    #[test]
    fn println_puts_reset_before_newline() {
        let buf = SharedBuf::default();
        let mut console = Console::wrap(buf.clone());
        console.set_colorable(true);
        console.println(&Style::green(), format_args!("done\n")).unwrap();
        // The trailing newline moves past the reset; only one survives.
        assert_eq!(buf.contents(), b"\x1B[32mdone\x1B[0m\n");
    }

    #[test]
    fn println_appends_newline_when_content_has_none() {
        let buf = SharedBuf::default();
        let mut console = Console::wrap(buf.clone());
        console.println(&Style::green(), format_args!("done")).unwrap();
        assert_eq!(buf.contents(), b"done\n");
    }

    #[test]
    fn color_writer_strips_when_not_colorable() {
        let mut wtr = ColorWriter::with_colorable(Vec::new(), false);
        let n = wtr.write(b"\x1B[31mred\x1B[0m plain").unwrap();
        assert_eq!(n, b"\x1B[31mred\x1B[0m plain".len());
        assert_eq!(wtr.into_inner(), b"red plain");
    }

    #[test]
    fn color_writer_passes_through_when_colorable() {
        let mut wtr = ColorWriter::with_colorable(Vec::new(), true);
        wtr.write_all(b"\x1B[31mred\x1B[0m").unwrap();
        assert_eq!(wtr.into_inner(), b"\x1B[31mred\x1B[0m");
    }

    #[cfg(unix)]
    #[test]
    fn descriptor_bearing_non_terminals_are_not_colorable() {
        let console =
            Console::wrap_terminal(std::fs::File::create("/dev/null").unwrap());
        assert!(!console.colorable());

        let wtr = ColorWriter::detect(std::fs::File::create("/dev/null").unwrap());
        assert!(!ColorWrite::colorable(&wtr));
    }

    #[test]
    fn color_writer_flag_can_be_flipped() {
        let mut wtr = ColorWriter::with_colorable(Vec::new(), true);
        assert!(ColorWrite::colorable(&wtr));
        wtr.set_colorable(false);
        wtr.write_all(b"\x1B[1mx\x1B[22m").unwrap();
        assert_eq!(wtr.into_inner(), b"x");
    }
}
