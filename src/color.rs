use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Deserializer, Serializer};

/// Display color carried by a spectral series.
pub type SeriesColor = Srgb<u8>;

/// Fallback color for series without a template preference.
pub const DEFAULT_SERIES_COLOR: SeriesColor = Srgb::new(0x1f, 0x77, 0xb4);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<SeriesColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Hex text <-> color
// ---------------------------------------------------------------------------

/// Parse `#rrggbb`, `rrggbb` or the short `#rgb` form.
pub fn parse_hex(text: &str) -> Option<SeriesColor> {
    Srgb::<u8>::from_str(text.trim()).ok()
}

/// Format as lowercase `#rrggbb`.
pub fn to_hex(color: SeriesColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Serde adapter storing a color as a hex string.
pub mod hex {
    use super::*;

    pub fn serialize<S: Serializer>(color: &SeriesColor, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<SeriesColor, D::Error> {
        let text = String::deserialize(d)?;
        parse_hex(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("'{text}' is not a hex color")))
    }
}

/// Same as [`hex`] for optional colors.
pub mod hex_opt {
    use super::*;

    pub fn serialize<S: Serializer>(color: &Option<SeriesColor>, s: S) -> Result<S::Ok, S::Error> {
        match color {
            Some(c) => s.serialize_some(&to_hex(*c)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<SeriesColor>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(text) => parse_hex(&text)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("'{text}' is not a hex color"))),
            None => Ok(None),
        }
    }
}
