use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::ansi::{Attribute, set_sequence, unset_sequence};

/// ColorChoice represents the color preference carried by a [`Style`].
///
/// The `Default` implementation selects `Auto`, which follows the ambient
/// colorability of whatever sink the style is rendered against.
///
/// The `FromStr` implementation converts a lowercase string of the variant
/// name to the corresponding variant. Any other string results in an error.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ColorChoice {
    /// Emit escape sequences regardless of the sink's colorability.
    Always,
    /// Follow the ambient colorability of the active sink.
    #[default]
    Auto,
    /// Never emit escape sequences.
    Never,
}

impl FromStr for ColorChoice {
    type Err = ColorChoiceParseError;

    fn from_str(s: &str) -> Result<ColorChoice, ColorChoiceParseError> {
        match s.to_lowercase().as_str() {
            "always" => Ok(ColorChoice::Always),
            "auto" => Ok(ColorChoice::Auto),
            "never" => Ok(ColorChoice::Never),
            unknown => Err(ColorChoiceParseError {
                unknown_choice: unknown.to_string(),
            }),
        }
    }
}

/// An error that occurs when parsing a `ColorChoice` fails.
#[derive(Clone, Debug)]
pub struct ColorChoiceParseError {
    unknown_choice: String,
}

impl ColorChoiceParseError {
    /// Return the string that couldn't be parsed as a valid color choice.
    pub fn invalid_choice(&self) -> &str {
        &self.unknown_choice
    }
}

impl std::error::Error for ColorChoiceParseError {}

impl fmt::Display for ColorChoiceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized color choice '{}': valid choices are: \
             always, auto, never",
            self.unknown_choice,
        )
    }
}

/// An ordered sequence of SGR attributes plus a color preference.
///
/// Attributes are appended by chained calls; duplicates and arbitrary
/// combinations are allowed, and the order of appends defines the order of
/// codes in the rendered sequence. A style is a plain value: cloning it is
/// cheap and rendering never mutates it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Style {
    attrs: Vec<Attribute>,
    choice: ColorChoice,
}

impl Style {
    /// Create a new style with no attributes and an `Auto` color choice.
    pub fn new() -> Style {
        Style::default()
    }

    /// Create a style from a slice of attributes.
    pub fn with(attrs: &[Attribute]) -> Style {
        Style { attrs: attrs.to_vec(), choice: ColorChoice::Auto }
    }

    /// Append one attribute.
    pub fn add(&mut self, attr: Attribute) -> &mut Style {
        self.attrs.push(attr);
        self
    }

    /// Append several attributes, preserving their order.
    pub fn add_all(&mut self, attrs: &[Attribute]) -> &mut Style {
        self.attrs.extend_from_slice(attrs);
        self
    }

    /// Append the 256-color indexed foreground triple `38;5;<index>`.
    pub fn fg_indexed(&mut self, index: u8) -> &mut Style {
        self.attrs.extend_from_slice(&[
            Attribute::FG_EXTENDED,
            Attribute(5),
            Attribute(u16::from(index)),
        ]);
        self
    }

    /// Append the 256-color indexed background triple `48;5;<index>`.
    pub fn bg_indexed(&mut self, index: u8) -> &mut Style {
        self.attrs.extend_from_slice(&[
            Attribute::BG_EXTENDED,
            Attribute(5),
            Attribute(u16::from(index)),
        ]);
        self
    }

    /// Get the color preference.
    pub fn choice(&self) -> ColorChoice {
        self.choice
    }

    /// Set the color preference.
    pub fn set_choice(&mut self, choice: ColorChoice) -> &mut Style {
        self.choice = choice;
        self
    }

    /// The attributes accumulated so far, in append order.
    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// The SGR set sequence for this style.
    pub fn set_code(&self) -> String {
        set_sequence(&self.attrs)
    }

    /// The SGR reset sequence undoing this style.
    pub fn unset_code(&self) -> String {
        unset_sequence(&self.attrs)
    }

    /// Returns true if escape sequences should be emitted given the
    /// ambient colorability of the active sink.
    pub fn enabled(&self, ambient: bool) -> bool {
        match self.choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => ambient,
        }
    }

    /// Wraps `content` in this style's set/unset sequences.
    ///
    /// When the style is force-disabled, or `ambient` is false and the
    /// style carries no force-enable, the content is returned unmodified
    /// with no bytes added.
    pub fn render<'a>(&self, content: &'a str, ambient: bool) -> Cow<'a, str> {
        if !self.enabled(ambient) {
            return Cow::Borrowed(content);
        }
        Cow::Owned(format!(
            "{}{}{}",
            self.set_code(),
            content,
            self.unset_code()
        ))
    }

    /// Binds a value to a clone of this style for deferred formatting.
    pub fn paint<T: fmt::Display>(&self, value: T) -> Styled<T> {
        Styled { value, style: self.clone() }
    }
}

/// Convenience constructors for common single-attribute styles.
impl Style {
    /// Black foreground text.
    pub fn black() -> Style {
        Style::with(&[Attribute::FG_BLACK])
    }

    /// Red foreground text.
    pub fn red() -> Style {
        Style::with(&[Attribute::FG_RED])
    }

    /// Green foreground text.
    pub fn green() -> Style {
        Style::with(&[Attribute::FG_GREEN])
    }

    /// Yellow foreground text.
    pub fn yellow() -> Style {
        Style::with(&[Attribute::FG_YELLOW])
    }

    /// Blue foreground text.
    pub fn blue() -> Style {
        Style::with(&[Attribute::FG_BLUE])
    }

    /// Magenta foreground text.
    pub fn magenta() -> Style {
        Style::with(&[Attribute::FG_MAGENTA])
    }

    /// Cyan foreground text.
    pub fn cyan() -> Style {
        Style::with(&[Attribute::FG_CYAN])
    }

    /// White foreground text.
    pub fn white() -> Style {
        Style::with(&[Attribute::FG_WHITE])
    }

    /// Gray (bright black) foreground text.
    pub fn gray() -> Style {
        Style::with(&[Attribute::FG_BRIGHT_BLACK])
    }

    /// Black background.
    pub fn black_bg() -> Style {
        Style::with(&[Attribute::BG_BLACK])
    }

    /// Red background.
    pub fn red_bg() -> Style {
        Style::with(&[Attribute::BG_RED])
    }

    /// Green background.
    pub fn green_bg() -> Style {
        Style::with(&[Attribute::BG_GREEN])
    }

    /// Yellow background.
    pub fn yellow_bg() -> Style {
        Style::with(&[Attribute::BG_YELLOW])
    }

    /// Blue background.
    pub fn blue_bg() -> Style {
        Style::with(&[Attribute::BG_BLUE])
    }

    /// Magenta background.
    pub fn magenta_bg() -> Style {
        Style::with(&[Attribute::BG_MAGENTA])
    }

    /// Cyan background.
    pub fn cyan_bg() -> Style {
        Style::with(&[Attribute::BG_CYAN])
    }

    /// White background.
    pub fn white_bg() -> Style {
        Style::with(&[Attribute::BG_WHITE])
    }

    /// Bold text.
    pub fn bold() -> Style {
        Style::with(&[Attribute::BOLD])
    }

    /// Faint (dim) text.
    pub fn faint() -> Style {
        Style::with(&[Attribute::FAINT])
    }

    /// Italic text.
    pub fn italic() -> Style {
        Style::with(&[Attribute::ITALIC])
    }

    /// Underlined text.
    pub fn underline() -> Style {
        Style::with(&[Attribute::UNDERLINE])
    }

    /// Reverse video.
    pub fn reverse() -> Style {
        Style::with(&[Attribute::REVERSE])
    }

    /// Concealed (hidden) text.
    pub fn concealed() -> Style {
        Style::with(&[Attribute::CONCEALED])
    }

    /// Crossed-out text.
    pub fn crossed_out() -> Style {
        Style::with(&[Attribute::CROSSED_OUT])
    }
}

/// A value bound to a [`Style`] for deferred formatting.
///
/// A `Styled` value has a create-render-discard lifecycle and no identity
/// of its own. [`Styled::render`] and [`Styled::bytes`] honor the ambient
/// colorability of the process default console; the `Display` integration
/// emits escape sequences unconditionally and is therefore only
/// appropriate on sinks known to be colorable.
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
}

impl<T: fmt::Display> Styled<T> {
    /// Bind `value` to `style`.
    pub fn new(value: T, style: Style) -> Styled<T> {
        Styled { value, style }
    }

    /// A reference to the wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Unwraps the value, discarding the style.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// The bound style.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Append one attribute to the bound style.
    pub fn add(&mut self, attr: Attribute) -> &mut Styled<T> {
        self.style.add(attr);
        self
    }

    /// Renders against the colorability of the process default console.
    pub fn render(&self) -> String {
        self.render_with(crate::writers::default_colorable())
    }

    /// Renders with an explicit ambient colorability.
    ///
    /// When the style is not enabled for `ambient`, only the value's plain
    /// serialization is returned; no escape bytes are emitted.
    pub fn render_with(&self, ambient: bool) -> String {
        if !self.style.enabled(ambient) {
            return self.value.to_string();
        }
        format!(
            "{}{}{}",
            self.style.set_code(),
            self.value,
            self.style.unset_code()
        )
    }

    /// The rendered form as raw bytes, honoring ambient colorability the
    /// same way [`Styled::render`] does.
    pub fn bytes(&self) -> Vec<u8> {
        self.render().into_bytes()
    }
}

/// The formatted-print integration path: writes the set sequence, then the
/// value formatted per the caller's format spec, then the reset sequence.
/// This path has no access to ambient colorability and always emits escape
/// bytes.
impl<T: fmt::Display> fmt::Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.style.set_code())?;
        self.value.fmt(f)?;
        f.write_str(&self.style.unset_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_choice_from_str() {
        assert_eq!("always".parse::<ColorChoice>().unwrap(), ColorChoice::Always);
        assert_eq!("AUTO".parse::<ColorChoice>().unwrap(), ColorChoice::Auto);
        assert_eq!("never".parse::<ColorChoice>().unwrap(), ColorChoice::Never);
        let err = "sometimes".parse::<ColorChoice>().unwrap_err();
        assert_eq!(err.invalid_choice(), "sometimes");
    }

    #[test]
    fn render_wraps_when_ambient_allows() {
        let mut style = Style::new();
        style.add(Attribute::BOLD).add(Attribute::FG_RED);
        assert_eq!(style.render("alert", true), "\x1B[1;31malert\x1B[22;0m");
    }

    #[test]
    fn render_is_exact_passthrough_when_not_colorable() {
        let mut style = Style::new();
        style.add(Attribute::UNDERLINE).add(Attribute::FG_GREEN);
        let rendered = style.render("plain", false);
        assert_eq!(rendered, "plain");
        assert!(matches!(rendered, Cow::Borrowed(_)));
    }

    #[test]
    fn force_overrides_beat_ambient() {
        let mut forced = Style::red();
        forced.set_choice(ColorChoice::Always);
        assert_eq!(forced.render("x", false), "\x1B[31mx\x1B[0m");

        let mut muted = Style::red();
        muted.set_choice(ColorChoice::Never);
        assert_eq!(muted.render("x", true), "x");
    }

    #[test]
    fn duplicate_attributes_render_in_append_order() {
        let mut style = Style::new();
        style
            .add(Attribute::FG_RED)
            .add(Attribute::BOLD)
            .add(Attribute::FG_RED);
        assert_eq!(style.set_code(), "\x1B[31;1;31m");
        assert_eq!(style.unset_code(), "\x1B[0;22;0m");
    }

    #[test]
    fn fg_indexed_appends_extended_triple() {
        let mut style = Style::new();
        style.fg_indexed(201);
        assert_eq!(style.set_code(), "\x1B[38;5;201m");
    }

    #[test]
    fn bg_indexed_appends_extended_triple() {
        let mut style = Style::new();
        style.bg_indexed(17);
        assert_eq!(style.set_code(), "\x1B[48;5;17m");
        assert_eq!(style.unset_code(), "\x1B[0m");
    }

    #[test]
    fn background_constructors_use_background_band() {
        assert_eq!(Style::red_bg().set_code(), "\x1B[41m");
        assert_eq!(Style::black_bg().set_code(), "\x1B[40m");
        assert_eq!(Style::white_bg().set_code(), "\x1B[47m");
        assert_eq!(Style::cyan_bg().render("x", true), "\x1B[46mx\x1B[0m");
    }

    #[test]
    fn styled_display_always_emits() {
        let styled = Style::cyan().paint("deep");
        assert_eq!(format!("{styled}"), "\x1B[36mdeep\x1B[0m");
    }

    #[test]
    fn styled_display_forwards_format_spec() {
        let styled = Style::bold().paint(7);
        assert_eq!(format!("{styled:>3}"), "\x1B[1m  7\x1B[22m");
    }

    #[test]
    fn styled_render_with_honors_ambient() {
        let styled = Style::yellow().paint("sun");
        assert_eq!(styled.render_with(false), "sun");
        assert_eq!(styled.render_with(true), "\x1B[33msun\x1B[0m");
        assert_eq!(styled.bytes().len(), styled.render().len());
    }
}
