/*!
A simple cross platform library for styling terminal text with ANSI SGR
escape sequences.

Styles are ordered lists of raw attribute codes with correctly paired
set/reset sequences. Whether escape sequences are actually emitted is
decided per sink: an explicit capability override wins, the standard
streams consult `NO_COLOR`, `TERM` and their terminal status (enabling
virtual terminal processing on Windows consoles), and other sinks are
probed through their file descriptor when they have one. Content that
already carries escape sequences can be routed through [`ColorWriter`],
which strips them for non-colorable sinks. A deterministic
[`namespace`] color assignment keeps log component names visually
distinguishable across a process run.

# Example

```no_run
use tinge::{Attribute, Console, Style};

let mut out = Console::stdout();
let mut warn = Style::yellow();
warn.add(Attribute::BOLD);
out.println(&warn, format_args!("disk almost full"))?;

// Stable color for a log namespace, resolved once per process.
let tag = tinge::namespace("http:router");
println!("{} listening", tag.render());
# Ok::<(), std::io::Error>(())
```
*/

pub mod ansi;
mod namespace;
mod strip;
mod traits;
mod tty;
mod types;
mod writers;

pub use ansi::{Attribute, sequence, set_sequence, unset_sequence};
pub use namespace::{namespace, select_color};
pub use strip::{strip_ansi, strip_ansi_bytes};
pub use traits::ColorWrite;
pub use tty::terminal_colorable;
pub use types::{ColorChoice, ColorChoiceParseError, Style, Styled};
pub use writers::{
    ColorWriter, Console, default_colorable, print, println, set_default,
    set_default_colorable,
};
