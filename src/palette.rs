use palette::Srgba;
use serde::{Deserialize, Serialize};

/// All diagram colors are RGBA; alpha is 255 for everything the built-in
/// diagrams draw, but parsing keeps the channel for theme overrides.
pub type Color = Srgba<u8>;

pub fn rgb(r: u8, g: u8, b: u8) -> Color {
    Srgba::new(r, g, b, 255)
}

/// Parse a hex color string into a [`Color`].
/// Accepts:
/// - "transparent" => fully transparent black
/// - #RRGGBB or RRGGBB
/// - #RRGGBBAA or RRGGBBAA
/// - Empty string => transparent
/// - Anything else => opaque black
pub fn parse_color(color_str: &str) -> Color {
    if color_str.eq_ignore_ascii_case("transparent") || color_str.is_empty() {
        return Srgba::new(0, 0, 0, 0);
    }

    let trimmed = color_str.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

    match hex.len() {
        6 => {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                Srgba::new(r, g, b, 255)
            } else {
                Srgba::new(0, 0, 0, 255)
            }
        }
        8 => {
            if let (Ok(r), Ok(g), Ok(b), Ok(a)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
                u8::from_str_radix(&hex[6..8], 16),
            ) {
                Srgba::new(r, g, b, a)
            } else {
                Srgba::new(0, 0, 0, 255)
            }
        }
        _ => Srgba::new(0, 0, 0, 255),
    }
}

pub fn format_color(color: &Color) -> String {
    if color.alpha == 255 {
        format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
    } else {
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            color.red, color.green, color.blue, color.alpha
        )
    }
}

/// Named color roles shared by every diagram in the batch. Elements reference
/// roles, never ad-hoc values, so swapping the palette restyles the whole set.
/// Defaults are the GitHub dark theme values used by the reference figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    #[serde(with = "hex")]
    pub background: Color,
    #[serde(with = "hex")]
    pub box_background: Color,
    #[serde(with = "hex")]
    pub panel_background: Color,
    #[serde(with = "hex")]
    pub badge_background: Color,
    #[serde(with = "hex")]
    pub border: Color,
    #[serde(with = "hex")]
    pub foreground: Color,
    #[serde(with = "hex")]
    pub secondary: Color,
    #[serde(with = "hex")]
    pub accent: Color,
    #[serde(with = "hex")]
    pub accent_alt: Color,
    #[serde(with = "hex")]
    pub highlight: Color,
    #[serde(with = "hex")]
    pub success: Color,
    #[serde(with = "hex")]
    pub warning: Color,
    #[serde(with = "hex")]
    pub error: Color,
    #[serde(with = "hex")]
    pub code: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: parse_color("#0d1117"),
            box_background: parse_color("#161b22"),
            panel_background: parse_color("#1c2128"),
            badge_background: parse_color("#21262d"),
            border: parse_color("#30363d"),
            foreground: parse_color("#ffffff"),
            secondary: parse_color("#8b949e"),
            accent: parse_color("#58a6ff"),
            accent_alt: parse_color("#a371f7"),
            highlight: parse_color("#56d4dd"),
            success: parse_color("#3fb950"),
            warning: parse_color("#d29922"),
            error: parse_color("#f85149"),
            code: parse_color("#7ee787"),
        }
    }
}

impl Palette {
    /// Load a theme override; fields missing from the JSON keep their default.
    pub fn from_json(json: &str) -> serde_json::Result<Palette> {
        serde_json::from_str(json)
    }
}

mod hex {
    use super::{format_color, parse_color, Color};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_color(color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(parse_color(&s))
    }
}
