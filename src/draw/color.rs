//! RGBA color type, named color constants, and the color-name resolver.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use pixelpad::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// assert_eq!(red, Color::rgb8(255, 0, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components in the 0.0 - 1.0 range.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Packs the color as a non-premultiplied `0xAARRGGBB` word.
    ///
    /// Components are clamped to 0.0 - 1.0 and rounded to 8 bits each.
    pub fn to_argb32(self) -> u32 {
        fn channel(v: f64) -> u32 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u32
        }
        (channel(self.a) << 24) | (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Unpacks a non-premultiplied `0xAARRGGBB` word.
    pub fn from_argb32(argb: u32) -> Self {
        let a = ((argb >> 24) & 0xFF) as f64 / 255.0;
        let mut color = Self::rgb8((argb >> 16) as u8, (argb >> 8) as u8, argb as u8);
        color.a = a;
        color
    }

    /// Sets this color as the Cairo source.
    pub fn apply(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

// ============================================================================
// Named Colors
// ============================================================================

pub const BLACK: Color = Color::rgb8(0, 0, 0);
pub const BLUE: Color = Color::rgb8(0, 0, 255);
pub const CYAN: Color = Color::rgb8(0, 255, 255);
pub const DARK_GRAY: Color = Color::rgb8(64, 64, 64);
pub const GRAY: Color = Color::rgb8(128, 128, 128);
pub const GREEN: Color = Color::rgb8(0, 255, 0);
pub const LIGHT_GRAY: Color = Color::rgb8(192, 192, 192);
pub const MAGENTA: Color = Color::rgb8(255, 0, 255);
pub const ORANGE: Color = Color::rgb8(255, 200, 0);
pub const PINK: Color = Color::rgb8(255, 175, 175);
pub const RED: Color = Color::rgb8(255, 0, 0);
pub const WHITE: Color = Color::rgb8(255, 255, 255);
pub const YELLOW: Color = Color::rgb8(255, 255, 0);

/// Lookup table for [`resolve_color`]. Keys are lowercase with no whitespace.
const NAMED_COLORS: [(&str, Color); 13] = [
    ("black", BLACK),
    ("blue", BLUE),
    ("cyan", CYAN),
    ("darkgray", DARK_GRAY),
    ("gray", GRAY),
    ("green", GREEN),
    ("lightgray", LIGHT_GRAY),
    ("magenta", MAGENTA),
    ("orange", ORANGE),
    ("pink", PINK),
    ("red", RED),
    ("white", WHITE),
    ("yellow", YELLOW),
];

/// Maps a color name to its predefined value.
///
/// Matching is case-insensitive and ignores all whitespace, so `"Dark Gray"`
/// and `"darkgray"` are the same name.
pub fn name_to_color(name: &str) -> Option<Color> {
    let key: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, color)| *color)
}

/// Parses a hex literal prefixed with `#` or `0x` (case-insensitive prefix).
///
/// The digits are read as a signed 32-bit value and the low 24 bits become
/// RGB, so `#f00` is `0x000F00` rather than CSS shorthand. Returns `None` for
/// a missing prefix, empty or non-hex digits, a sign character, or a value
/// that does not fit in 32 signed bits.
pub fn hex_to_color(literal: &str) -> Option<Color> {
    let lower = literal.to_ascii_lowercase();
    let digits = lower
        .strip_prefix('#')
        .or_else(|| lower.strip_prefix("0x"))?;

    if digits.starts_with(['+', '-']) {
        return None;
    }

    let value = i32::from_str_radix(digits, 16).ok()?;
    let rgb = (value as u32) & 0x00FF_FFFF;
    Some(Color::from_argb32(0xFF00_0000 | rgb))
}

/// Resolves a color name or hex literal to a concrete color.
///
/// Never fails: unknown names and malformed hex both resolve to [`BLACK`].
pub fn resolve_color(spec: &str) -> Color {
    let trimmed = spec.trim();
    let lower = trimmed.to_lowercase();

    if lower.starts_with('#') || lower.starts_with("0x") {
        return hex_to_color(trimmed).unwrap_or_else(|| {
            log::debug!("Malformed hex color '{}', using black", spec);
            BLACK
        });
    }

    name_to_color(trimmed).unwrap_or_else(|| {
        log::debug!("Unknown color '{}', using black", spec);
        BLACK
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_ignore_case_and_whitespace() {
        assert_eq!(resolve_color("RED"), RED);
        assert_eq!(resolve_color("red"), RED);
        assert_eq!(resolve_color(" Red "), RED);
        assert_eq!(resolve_color("Dark Gray"), DARK_GRAY);
        assert_eq!(resolve_color("light\tgray"), LIGHT_GRAY);
    }

    #[test]
    fn every_table_entry_resolves() {
        for (name, color) in NAMED_COLORS {
            assert_eq!(resolve_color(name), color, "{}", name);
        }
    }

    #[test]
    fn hex_literals_resolve() {
        assert_eq!(resolve_color("#ff0000"), RED);
        assert_eq!(resolve_color("0x00FF00"), GREEN);
        assert_eq!(resolve_color("0X0000ff"), BLUE);
        assert_eq!(resolve_color("#f00"), Color::rgb8(0, 0x0F, 0));
    }

    #[test]
    fn hex_drops_the_high_byte() {
        assert_eq!(resolve_color("#7f00ff00"), GREEN);
    }

    #[test]
    fn bad_input_falls_back_to_black() {
        assert_eq!(resolve_color("not-a-color"), BLACK);
        assert_eq!(resolve_color("0xZZZZZZ"), BLACK);
        assert_eq!(resolve_color("#"), BLACK);
        assert_eq!(resolve_color("#-ff"), BLACK);
        assert_eq!(resolve_color("#ffffffff"), BLACK);
        assert_eq!(resolve_color(""), BLACK);
    }

    #[test]
    fn argb_packing_round_trips_named_colors() {
        for (_, color) in NAMED_COLORS {
            assert_eq!(Color::from_argb32(color.to_argb32()), color);
        }
        assert_eq!(ORANGE.to_argb32(), 0xFFFF_C800);
    }
}
