//! Configuration enum types.

use crate::draw::{Color, resolve_color};
use serde::{Deserialize, Serialize};

/// Color specification - either a color-resolver string or RGB values.
///
/// # Examples
/// ```toml
/// # Named color (case and spaces ignored)
/// background = "light gray"
///
/// # Hex literal
/// background = "#1e1e2e"
///
/// # RGB components (0-255 each)
/// background = [30, 30, 46]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Anything [`resolve_color`] accepts: a palette name or a `#`/`0x` hex literal
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the specification to a concrete color.
    ///
    /// Strings go through the fail-soft resolver, so an unknown name becomes black.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => resolve_color(name),
            ColorSpec::Rgb([r, g, b]) => Color::rgb8(*r, *g, *b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, DARK_GRAY};

    #[test]
    fn names_go_through_the_resolver() {
        assert_eq!(ColorSpec::Name("Dark Gray".into()).to_color(), DARK_GRAY);
        assert_eq!(ColorSpec::Name("mauve-ish".into()).to_color(), BLACK);
    }

    #[test]
    fn rgb_arrays_convert_directly() {
        assert_eq!(
            ColorSpec::Rgb([30, 30, 46]).to_color(),
            Color::rgb8(30, 30, 46)
        );
    }
}
