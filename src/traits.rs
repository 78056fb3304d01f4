use std::io;

/// This trait describes the behavior of writers that know whether ANSI
/// escape sequences are appropriate for their underlying sink.
///
/// The flag acts as an explicit capability override for synthetic or
/// wrapped sinks: when a writer implements this trait, its current flag is
/// used verbatim and bypasses environment and terminal detection.
pub trait ColorWrite: io::Write {
    /// Returns true if and only if escape sequences written to this sink
    /// will be honored rather than shown as garbage.
    fn colorable(&self) -> bool;

    /// Overrides the colorable flag.
    ///
    /// Subsequent writes behave according to the new value until it is
    /// changed again.
    fn set_colorable(&mut self, yes: bool);
}

impl<T: ?Sized + ColorWrite> ColorWrite for &mut T {
    fn colorable(&self) -> bool {
        (**self).colorable()
    }
    fn set_colorable(&mut self, yes: bool) {
        (**self).set_colorable(yes)
    }
}

impl<T: ?Sized + ColorWrite> ColorWrite for Box<T> {
    fn colorable(&self) -> bool {
        (**self).colorable()
    }
    fn set_colorable(&mut self, yes: bool) {
        (**self).set_colorable(yes)
    }
}
