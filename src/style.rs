// Current color / thickness / opacity, plus the ink resolved from them.
// Visual: whatever is set here when a mark is committed is what lands on the layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::error::Error;
use crate::tool::Tool;

pub const MIN_THICKNESS: f32 = 1.0;
pub const MAX_THICKNESS: f32 = 100.0;

/// 8-bit sRGB color, written as `#rrggbb` like an HTML color input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed as 0x00RRGGBB for the window buffer.
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn channel(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    /// Move one channel by `delta`, saturating at 0 and 255.
    pub fn step_channel(self, channel: Channel, delta: i16) -> Self {
        let v = (self.channel(channel) as i16 + delta).clamp(0, 255) as u8;
        match channel {
            Channel::Red => Self { r: v, ..self },
            Channel::Green => Self { g: v, ..self },
            Channel::Blue => Self { b: v, ..self },
        }
    }
}

/// One of the three color components the picker can nudge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub fn label(self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
        }
    }

    pub fn all() -> impl Iterator<Item = Channel> {
        Channel::iter()
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || Error::InvalidColor(s.to_owned());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            // #rgb is shorthand for #rrggbb
            3 => {
                let short = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

/// Paint for one committed mark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ink {
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    /// In [0,1].
    pub opacity: f32,
}

/// Process-wide style controls. Last write wins; read at point of use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    color: Color,
    thickness: f32,
    opacity: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self { color: Color::BLACK, thickness: 5.0, opacity: 1.0 }
    }
}

impl Style {
    pub fn new(color: Color, thickness: f32, opacity: f32) -> Self {
        let mut style = Self { color, ..Self::default() };
        style.set_thickness(thickness);
        style.set_opacity(opacity);
        style
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Clamped into [MIN_THICKNESS, MAX_THICKNESS]; NaN is ignored.
    pub fn set_thickness(&mut self, thickness: f32) {
        if thickness.is_nan() {
            return;
        }
        self.thickness = thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
    }

    /// Clamped into [0,1]; NaN is ignored.
    pub fn set_opacity(&mut self, opacity: f32) {
        if opacity.is_nan() {
            return;
        }
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Resolve the ink `tool` paints with right now.
    /// The eraser paints the white background color but keeps width and opacity.
    pub fn ink(&self, tool: Tool) -> Ink {
        let color = if tool == Tool::Eraser { Color::WHITE } else { self.color };
        Ink { color, width: self.thickness, opacity: self.opacity }
    }
}
