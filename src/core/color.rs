use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DashboardError, DashboardResult};

/// sRGB color with 8-bit channels and a normalized alpha.
///
/// Serializes to the CSS string the charting library accepts: `#rrggbb` when
/// opaque, `rgba(r, g, b, a)` otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Parses `#rrggbb` or `rgba(r, g, b, a)`.
    pub fn parse_css(input: &str) -> DashboardResult<Self> {
        let input = input.trim();
        if let Some(hex) = input.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(DashboardError::InvalidData(format!(
                    "hex color `{input}` must have six digits"
                )));
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16).map_err(|_| {
                    DashboardError::InvalidData(format!("hex color `{input}` is not valid hex"))
                })
            };
            return Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }

        let body = input
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| DashboardError::InvalidData(format!("unsupported color `{input}`")))?;
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(DashboardError::InvalidData(format!(
                "rgba color `{input}` must have four components"
            )));
        }
        let channel = |raw: &str| {
            raw.parse::<u8>().map_err(|_| {
                DashboardError::InvalidData(format!("rgba channel `{raw}` must be 0..=255"))
            })
        };
        let alpha = parts[3].parse::<f64>().map_err(|_| {
            DashboardError::InvalidData(format!("rgba alpha `{}` is not a number", parts[3]))
        })?;
        let color = Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        );
        color.validate()?;
        Ok(color)
    }

    pub fn validate(self) -> DashboardResult<()> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(DashboardError::InvalidData(
                "color alpha must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.alpha >= 1.0
    }

    #[must_use]
    pub fn to_css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {})",
                self.red, self.green, self.blue, self.alpha
            )
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_css(&raw).map_err(serde::de::Error::custom)
    }
}

/// Dashboard color tokens shared by charts, the password meter and toasts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub success: Color,
    pub info: Color,
    pub warning: Color,
    pub danger: Color,
    pub neutral: Color,
    pub trend_fill: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            success: Color::rgb(0x10, 0xb9, 0x81),
            info: Color::rgb(0x3b, 0x82, 0xf6),
            warning: Color::rgb(0xf5, 0x9e, 0x0b),
            danger: Color::rgb(0xef, 0x44, 0x44),
            neutral: Color::rgb(0xe2, 0xe8, 0xf0),
            trend_fill: Color::rgba(59, 130, 246, 0.1),
        }
    }
}

impl Palette {
    pub fn validate(&self) -> DashboardResult<()> {
        for color in [
            self.success,
            self.info,
            self.warning,
            self.danger,
            self.neutral,
            self.trend_fill,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}
