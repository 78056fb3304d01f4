//! ANSI SGR escape sequence construction.
//!
//! This module maps symbolic style attributes to their numeric SGR codes
//! and builds correctly paired set/unset escape sequences. Codes are raw
//! integers with no range checking: an out-of-range or nonsensical code is
//! rendered as-is, since the codec is a thin mapper, not a validator.

use std::fmt;

/// A single SGR attribute code.
///
/// Attributes fall into four bands: base text effects (`0..=9`), standard
/// and high-intensity foreground colors (`30..=37`, `90..=97`), and
/// standard and high-intensity background colors (`40..=47`, `100..=107`).
/// Any other value is passed through to the terminal unchanged.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Attribute(pub u16);

#[allow(missing_docs)]
impl Attribute {
    // Base text effects.
    pub const RESET: Attribute = Attribute(0);
    pub const BOLD: Attribute = Attribute(1);
    pub const FAINT: Attribute = Attribute(2);
    pub const ITALIC: Attribute = Attribute(3);
    pub const UNDERLINE: Attribute = Attribute(4);
    pub const BLINK_SLOW: Attribute = Attribute(5);
    pub const BLINK_RAPID: Attribute = Attribute(6);
    pub const REVERSE: Attribute = Attribute(7);
    pub const CONCEALED: Attribute = Attribute(8);
    pub const CROSSED_OUT: Attribute = Attribute(9);

    // Standard foreground colors.
    pub const FG_BLACK: Attribute = Attribute(30);
    pub const FG_RED: Attribute = Attribute(31);
    pub const FG_GREEN: Attribute = Attribute(32);
    pub const FG_YELLOW: Attribute = Attribute(33);
    pub const FG_BLUE: Attribute = Attribute(34);
    pub const FG_MAGENTA: Attribute = Attribute(35);
    pub const FG_CYAN: Attribute = Attribute(36);
    pub const FG_WHITE: Attribute = Attribute(37);

    // High-intensity foreground colors.
    pub const FG_BRIGHT_BLACK: Attribute = Attribute(90);
    pub const FG_BRIGHT_RED: Attribute = Attribute(91);
    pub const FG_BRIGHT_GREEN: Attribute = Attribute(92);
    pub const FG_BRIGHT_YELLOW: Attribute = Attribute(93);
    pub const FG_BRIGHT_BLUE: Attribute = Attribute(94);
    pub const FG_BRIGHT_MAGENTA: Attribute = Attribute(95);
    pub const FG_BRIGHT_CYAN: Attribute = Attribute(96);
    pub const FG_BRIGHT_WHITE: Attribute = Attribute(97);

    // Standard background colors.
    pub const BG_BLACK: Attribute = Attribute(40);
    pub const BG_RED: Attribute = Attribute(41);
    pub const BG_GREEN: Attribute = Attribute(42);
    pub const BG_YELLOW: Attribute = Attribute(43);
    pub const BG_BLUE: Attribute = Attribute(44);
    pub const BG_MAGENTA: Attribute = Attribute(45);
    pub const BG_CYAN: Attribute = Attribute(46);
    pub const BG_WHITE: Attribute = Attribute(47);

    // High-intensity background colors.
    pub const BG_BRIGHT_BLACK: Attribute = Attribute(100);
    pub const BG_BRIGHT_RED: Attribute = Attribute(101);
    pub const BG_BRIGHT_GREEN: Attribute = Attribute(102);
    pub const BG_BRIGHT_YELLOW: Attribute = Attribute(103);
    pub const BG_BRIGHT_BLUE: Attribute = Attribute(104);
    pub const BG_BRIGHT_MAGENTA: Attribute = Attribute(105);
    pub const BG_BRIGHT_CYAN: Attribute = Attribute(106);
    pub const BG_BRIGHT_WHITE: Attribute = Attribute(107);

    // Extended color introducers. The full 256-color form is the triple
    // `38;5;<n>` (foreground) or `48;5;<n>` (background).
    pub const FG_EXTENDED: Attribute = Attribute(38);
    pub const BG_EXTENDED: Attribute = Attribute(48);

    /// Returns the attribute that undoes this one.
    ///
    /// Each base text effect has exactly one dedicated reset counterpart.
    /// The mapping is many-to-one: bold and faint both reset via code 22,
    /// and both blink speeds reset via code 25. Colors and any code outside
    /// the effect band reset via the universal reset code 0.
    pub fn reset_attribute(self) -> Attribute {
        match self.0 {
            0 => Attribute(0),
            1 | 2 => Attribute(22),
            3 => Attribute(23),
            4 => Attribute(24),
            5 | 6 => Attribute(25),
            7 => Attribute(27),
            8 => Attribute(28),
            9 => Attribute(29),
            _ => Attribute::RESET,
        }
    }
}

impl From<u16> for Attribute {
    fn from(code: u16) -> Attribute {
        Attribute(code)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Joins the numeric codes of `attrs` with `;`, in the supplied order.
///
/// An empty attribute list yields the single bold code `"1"`. This default
/// is a long-standing quirk of the low-level sequence builder that callers
/// rely on; it is preserved deliberately even though it is inconsistent
/// with a "no styling" expectation.
pub fn sequence(attrs: &[Attribute]) -> String {
    if attrs.is_empty() {
        return Attribute::BOLD.0.to_string();
    }
    join_codes(attrs.iter().map(|a| a.0))
}

/// Builds the SGR set sequence `ESC[<codes>m` for `attrs`.
///
/// Codes appear raw and in the supplied order. Subject to the same
/// empty-list bold default as [`sequence`].
pub fn set_sequence(attrs: &[Attribute]) -> String {
    format!("\x1B[{}m", sequence(attrs))
}

/// Builds the SGR reset sequence undoing `attrs`.
///
/// Each attribute contributes its dedicated reset code where one exists
/// (see [`Attribute::reset_attribute`]) and the universal reset code 0
/// otherwise, in the same relative order as the originals. Resetting
/// per-attribute preserves other active terminal state more often than a
/// single blanket reset would. An empty list yields `ESC[0m`.
///
/// An indexed-color triple (`38;5;<n>` or `48;5;<n>`) is one logical color
/// and contributes a single universal reset; its `5` parameter is not an
/// effect code and must not surface a blink reset.
pub fn unset_sequence(attrs: &[Attribute]) -> String {
    if attrs.is_empty() {
        return "\x1B[0m".to_string();
    }
    let mut codes = Vec::with_capacity(attrs.len());
    let mut i = 0;
    while i < attrs.len() {
        let attr = attrs[i];
        if (attr == Attribute::FG_EXTENDED || attr == Attribute::BG_EXTENDED)
            && attrs.get(i + 1) == Some(&Attribute(5))
        {
            codes.push(0);
            i += 3;
            continue;
        }
        codes.push(attr.reset_attribute().0);
        i += 1;
    }
    format!("\x1B[{}m", join_codes(codes.into_iter()))
}

fn join_codes<I: Iterator<Item = u16>>(codes: I) -> String {
    let mut out = String::with_capacity(16);
    for (i, code) in codes.enumerate() {
        if i > 0 {
            out.push(';');
        }
        out.push_str(&code.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_joins_in_order() {
        let attrs = [Attribute::BOLD, Attribute::FG_RED, Attribute::BG_BLUE];
        assert_eq!(sequence(&attrs), "1;31;44");
    }

    #[test]
    fn empty_sequence_defaults_to_bold() {
        assert_eq!(sequence(&[]), "1");
        assert_eq!(set_sequence(&[]), "\x1B[1m");
    }

    #[test]
    fn set_and_unset_are_paired_per_attribute() {
        let attrs = [Attribute::BOLD, Attribute::FG_RED];
        assert_eq!(set_sequence(&attrs), "\x1B[1;31m");
        // Bold resets via its dedicated code, the color via the universal
        // reset, in the original relative order.
        assert_eq!(unset_sequence(&attrs), "\x1B[22;0m");
    }

    #[test]
    fn effect_resets_are_many_to_one() {
        assert_eq!(Attribute::BOLD.reset_attribute(), Attribute(22));
        assert_eq!(Attribute::FAINT.reset_attribute(), Attribute(22));
        assert_eq!(Attribute::BLINK_SLOW.reset_attribute(), Attribute(25));
        assert_eq!(Attribute::BLINK_RAPID.reset_attribute(), Attribute(25));
        assert_eq!(Attribute::UNDERLINE.reset_attribute(), Attribute(24));
    }

    #[test]
    fn colors_and_unknown_codes_reset_universally() {
        assert_eq!(Attribute::FG_CYAN.reset_attribute(), Attribute::RESET);
        assert_eq!(Attribute::BG_BRIGHT_RED.reset_attribute(), Attribute::RESET);
        assert_eq!(Attribute(999).reset_attribute(), Attribute::RESET);
    }

    #[test]
    fn unset_of_empty_is_universal_reset() {
        assert_eq!(unset_sequence(&[]), "\x1B[0m");
    }

    #[test]
    fn indexed_color_triple_resets_as_one_color() {
        let fg = [Attribute::FG_EXTENDED, Attribute(5), Attribute(26)];
        assert_eq!(unset_sequence(&fg), "\x1B[0m");

        let mixed = [
            Attribute::BOLD,
            Attribute::BG_EXTENDED,
            Attribute(5),
            Attribute(201),
        ];
        assert_eq!(unset_sequence(&mixed), "\x1B[22;0m");
    }

    #[test]
    fn out_of_range_codes_pass_through() {
        assert_eq!(set_sequence(&[Attribute(12345)]), "\x1B[12345m");
    }
}
