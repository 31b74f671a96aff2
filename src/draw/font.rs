//! Font selection for text annotations.

use crate::config::TextConfig;

/// Font used for every text annotation on the surface.
///
/// Family, weight, and style are passed to Pango by name, so any installed
/// system font can be referenced. Unknown families fall back to Pango's
/// default sans face.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Sans", "Monospace", "DejaVu Serif")
    pub family: String,
    /// Weight name ("normal", "bold", "light", ...) or a numeric 100-900 value
    pub weight: String,
    /// Style name ("normal", "italic", "oblique")
    pub style: String,
    /// Size in points
    pub size: f64,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "normal".to_string(),
            style: "normal".to_string(),
            size: 14.0,
        }
    }
}

impl From<&TextConfig> for FontDescriptor {
    fn from(config: &TextConfig) -> Self {
        Self {
            family: config.font_family.clone(),
            weight: config.font_weight.clone(),
            style: config.font_style.clone(),
            size: config.font_size,
        }
    }
}

impl FontDescriptor {
    /// Builds the Pango description string, e.g. `"Sans Bold 14"`.
    ///
    /// "normal" style and weight are omitted since Pango treats them as the default.
    pub fn to_pango_string(&self) -> String {
        let mut parts = vec![self.family.clone()];

        for modifier in [&self.style, &self.weight] {
            if !modifier.eq_ignore_ascii_case("normal") {
                parts.push(capitalize_first(modifier));
            }
        }

        parts.push(format!("{}", self.size.round() as i32));
        parts.join(" ")
    }

    pub fn to_pango(&self) -> pango::FontDescription {
        pango::FontDescription::from_string(&self.to_pango_string())
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
