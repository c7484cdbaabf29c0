//! Display colors for categorical values

use palette::{LinSrgb, Srgb};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::DepgridError;

/// An sRGB color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse `#rrggbb` (the leading `#` and the short `#rgb` form are accepted)
    pub fn parse(value: &str) -> Result<Self, DepgridError> {
        Srgb::<u8>::from_str(value.trim())
            .map(Self::from)
            .map_err(|e| DepgridError::InvalidColor {
                value: value.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Relative luminance in linear light, 0.0 (black) to 1.0 (white)
    pub fn luminance(&self) -> f32 {
        let linear: LinSrgb = Srgb::from(*self).into_format::<f32>().into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }

    /// Whether light text reads better than dark text on this color
    pub fn is_dark(&self) -> bool {
        self.luminance() < 0.179
    }
}

impl From<Srgb<u8>> for Color {
    fn from(value: Srgb<u8>) -> Self {
        let (red, green, blue) = value.into_components();
        Self { red, green, blue }
    }
}

impl From<Color> for Srgb<u8> {
    fn from(value: Color) -> Self {
        Srgb::new(value.red, value.green, value.blue)
    }
}

impl FromStr for Color {
    type Err = DepgridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = DepgridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_and_format_hex() {
        let color = Color::parse("#1f77b4").unwrap();
        assert_eq!(color, Color::rgb(0x1f, 0x77, 0xb4));
        assert_eq!(color.to_hex(), "#1f77b4");
        assert_eq!(Color::parse("a0a0a0").unwrap().to_string(), "#a0a0a0");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Color::parse("#zz0000").unwrap_err();
        assert!(matches!(err, DepgridError::InvalidColor { .. }));
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(255, 0, 16));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }

    #[test]
    fn test_is_dark() {
        assert!(Color::rgb(0, 0, 0).is_dark());
        assert!(Color::rgb(0, 0, 128).is_dark());
        assert!(!Color::rgb(255, 255, 255).is_dark());
        assert!(!Color::rgb(0xdc, 0xdc, 0xdc).is_dark());
    }
}
