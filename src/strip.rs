//! Removal of ANSI escape sequences from previously styled content.
//!
//! The pattern matches the widely used strip-ansi grammar: an escape
//! introducer (`ESC` or the 8-bit CSI equivalent) followed by either a
//! BEL-terminated parameter run or a CSI-style parameter run terminated by
//! one of a fixed set of final letters. Matching semantics are kept
//! identical to that grammar so content produced by this crate and by peer
//! tools strips the same way.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use regex::bytes::Regex as BytesRegex;

// Everything after the introducer class is plain ASCII, shared between the
// text and byte engines. Digit classes are spelled out so the text engine
// does not widen `\d` to Unicode digits.
const ANSI_TAIL: &str = "[\\[\\]()#;?]*(?:(?:(?:[a-zA-Z0-9]*(?:;[a-zA-Z0-9]*)*)?\
                         \\x07)|(?:(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-PRZcf-ntqry=><~]))";

static TEXT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("[\\x{{1B}}\\x{{9B}}]{ANSI_TAIL}"))
        .expect("ANSI strip pattern must compile")
});

static BYTE_PATTERN: LazyLock<BytesRegex> = LazyLock::new(|| {
    BytesRegex::new(&format!("(?-u)[\\x1B\\x9B]{ANSI_TAIL}"))
        .expect("ANSI strip pattern must compile")
});

/// Removes all ANSI escape sequences from `text`.
///
/// All non-overlapping occurrences are removed globally; characters outside
/// matches are preserved exactly, in order. Returns the input unchanged
/// (and unallocated) when it contains no sequences. The operation is
/// idempotent.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    TEXT_PATTERN.replace_all(text, "")
}

/// Removes all ANSI escape sequences from raw bytes.
///
/// Identical grammar to [`strip_ansi`], except the 8-bit introducer is
/// recognized as the single byte `0x9B` rather than the code point U+009B.
pub fn strip_ansi_bytes(bytes: &[u8]) -> Cow<'_, [u8]> {
    BYTE_PATTERN.replace_all(bytes, &b""[..])
}
