//! Style attributes shared by elements and the tool palette.

use super::Element;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Stroke width bounds accepted by the palette.
pub const MIN_STROKE_WIDTH: f64 = 1.0;
pub const MAX_STROKE_WIDTH: f64 = 20.0;

/// Opacity bounds, in percent.
pub const MIN_OPACITY: u8 = 10;
pub const MAX_OPACITY: u8 = 100;

/// Font size bounds, in world units.
pub const MIN_FONT_SIZE: f64 = 12.0;
pub const MAX_FONT_SIZE: f64 = 72.0;

/// Roughness applied to every new element.
pub const DEFAULT_ROUGHNESS: f64 = 1.0;

/// Font families offered by the property panel.
pub const FONT_FAMILIES: &[&str] = &["Montserrat", "Roboto Mono", "Inter", "Arial", "Courier New"];

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// The near-black default ink.
    pub const fn ink() -> Self {
        Self::rgb(0x11, 0x11, 0x11)
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    fn with_opacity(self, opacity: f64) -> Color {
        let alpha = (self.a as f64 * opacity).round().clamp(0.0, 255.0) as u8;
        Color::from_rgba8(self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color: {0:?}")]
pub struct ColorParseError(pub String);

impl FromStr for Rgba {
    type Err = ColorParseError;

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());

        match hex.len() {
            3 => Ok(Self::rgb(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
            )),
            6 => Ok(Self::rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }
}

/// Parse a background color, where `transparent` or `none` mean no fill.
pub fn parse_background(s: &str) -> Result<Option<Rgba>, ColorParseError> {
    match s.trim() {
        "" | "transparent" | "none" => Ok(None),
        other => other.parse().map(Some),
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties of a single element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Stroke color.
    pub stroke_color: Rgba,
    /// Fill color (None = no fill).
    pub background_color: Option<Rgba>,
    /// Stroke width in world units.
    pub stroke_width: f64,
    /// Opacity in percent (10..=100).
    pub opacity: u8,
    /// Hand-drawn roughness.
    pub roughness: f64,
    /// Random seed for the hand-drawn jitter, fixed at creation.
    #[serde(default = "generate_seed")]
    pub(crate) seed: u32,
}

impl ElementStyle {
    /// Build a style from the palette, with a fresh seed.
    pub fn from_properties(props: &ToolProperties) -> Self {
        Self {
            stroke_color: props.stroke_color,
            background_color: props.background_color,
            stroke_width: props.stroke_width,
            opacity: props.opacity,
            roughness: DEFAULT_ROUGHNESS,
            seed: generate_seed(),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Opacity as a 0.0..=1.0 factor.
    pub fn opacity_factor(&self) -> f64 {
        f64::from(self.opacity) / 100.0
    }

    /// Stroke color with opacity applied, for renderers.
    pub fn stroke_with_opacity(&self) -> Color {
        self.stroke_color.with_opacity(self.opacity_factor())
    }

    /// Fill color with opacity applied, for renderers.
    pub fn fill_with_opacity(&self) -> Option<Color> {
        self.background_color
            .map(|c| c.with_opacity(self.opacity_factor()))
    }
}

/// Generate a random seed for new elements.
/// Uses a counter + hash approach that works on all platforms including WASM.
pub(crate) fn generate_seed() -> u32 {
    use std::sync::atomic::{AtomicU32, Ordering};

    static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    // splitmix32-style mixing
    let mut x = counter.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    x
}

/// Style values applied to the next created element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolProperties {
    pub stroke_color: Rgba,
    pub background_color: Option<Rgba>,
    pub stroke_width: f64,
    pub opacity: u8,
    pub font_family: String,
    pub font_size: f64,
}

impl Default for ToolProperties {
    fn default() -> Self {
        Self {
            stroke_color: Rgba::ink(),
            background_color: None,
            stroke_width: 2.0,
            opacity: MAX_OPACITY,
            font_family: FONT_FAMILIES[0].to_string(),
            font_size: 24.0,
        }
    }
}

impl ToolProperties {
    /// Set a single property.
    pub fn apply(&mut self, property: &ToolProperty) {
        match property {
            ToolProperty::StrokeColor(c) => self.stroke_color = *c,
            ToolProperty::BackgroundColor(c) => self.background_color = *c,
            ToolProperty::StrokeWidth(w) => self.stroke_width = *w,
            ToolProperty::Opacity(o) => self.opacity = *o,
            ToolProperty::FontFamily(f) => self.font_family.clone_from(f),
            ToolProperty::FontSize(s) => self.font_size = *s,
        }
    }

    /// Copy an element's own style into the palette.
    /// Font settings are only taken from text elements.
    pub fn mirror(&mut self, element: &Element) {
        let style = &element.style;
        self.stroke_color = style.stroke_color;
        self.background_color = style.background_color;
        self.stroke_width = style.stroke_width;
        self.opacity = style.opacity;
        if let Some(text) = &element.text {
            self.font_family.clone_from(&text.font_family);
            self.font_size = text.font_size;
        }
    }
}

/// One editable palette property with its new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ToolProperty {
    StrokeColor(Rgba),
    BackgroundColor(Option<Rgba>),
    StrokeWidth(f64),
    Opacity(u8),
    FontFamily(String),
    FontSize(f64),
}

/// Raw value sent by a host property panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
}

/// Errors from the string-keyed property bridge.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropertyError {
    #[error("unknown tool property: {0}")]
    UnknownProperty(String),
    #[error("property {property} expects a {expected} value")]
    WrongType {
        property: &'static str,
        expected: &'static str,
    },
    #[error("property {property} is not a finite number: {value}")]
    NotFinite { property: &'static str, value: f64 },
    #[error(transparent)]
    Color(#[from] ColorParseError),
}

impl ToolProperty {
    /// Host-facing key of this property.
    pub fn key(&self) -> &'static str {
        match self {
            ToolProperty::StrokeColor(_) => "strokeColor",
            ToolProperty::BackgroundColor(_) => "backgroundColor",
            ToolProperty::StrokeWidth(_) => "strokeWidth",
            ToolProperty::Opacity(_) => "opacity",
            ToolProperty::FontFamily(_) => "fontFamily",
            ToolProperty::FontSize(_) => "fontSize",
        }
    }

    /// Clamp numeric values into the ranges the palette allows.
    /// NaN lands on the lower bound.
    pub fn clamped(self) -> Self {
        let bound = |v: f64, min: f64, max: f64| if v.is_nan() { min } else { v.clamp(min, max) };
        match self {
            ToolProperty::StrokeWidth(w) => {
                ToolProperty::StrokeWidth(bound(w, MIN_STROKE_WIDTH, MAX_STROKE_WIDTH))
            }
            ToolProperty::Opacity(o) => ToolProperty::Opacity(o.clamp(MIN_OPACITY, MAX_OPACITY)),
            ToolProperty::FontSize(s) => {
                ToolProperty::FontSize(bound(s, MIN_FONT_SIZE, MAX_FONT_SIZE))
            }
            other => other,
        }
    }

    /// Parse a `(key, value)` pair coming from a host panel.
    /// Accepts camelCase and snake_case keys.
    pub fn parse(key: &str, value: PropertyValue) -> Result<Self, PropertyError> {
        match key {
            "strokeColor" | "stroke_color" => {
                let text = expect_text("strokeColor", value)?;
                Ok(ToolProperty::StrokeColor(text.parse()?))
            }
            "backgroundColor" | "background_color" => {
                let text = expect_text("backgroundColor", value)?;
                Ok(ToolProperty::BackgroundColor(parse_background(&text)?))
            }
            "strokeWidth" | "stroke_width" => {
                Ok(ToolProperty::StrokeWidth(expect_number("strokeWidth", value)?))
            }
            "opacity" => {
                let n = expect_number("opacity", value)?;
                Ok(ToolProperty::Opacity(n.round().clamp(0.0, 255.0) as u8))
            }
            "fontFamily" | "font_family" => {
                Ok(ToolProperty::FontFamily(expect_text("fontFamily", value)?))
            }
            "fontSize" | "font_size" => {
                Ok(ToolProperty::FontSize(expect_number("fontSize", value)?))
            }
            other => Err(PropertyError::UnknownProperty(other.to_string())),
        }
    }
}

fn expect_text(property: &'static str, value: PropertyValue) -> Result<String, PropertyError> {
    match value {
        PropertyValue::Text(s) => Ok(s),
        PropertyValue::Number(_) => Err(PropertyError::WrongType {
            property,
            expected: "string",
        }),
    }
}

fn expect_number(property: &'static str, value: PropertyValue) -> Result<f64, PropertyError> {
    match value {
        PropertyValue::Number(n) if n.is_finite() => Ok(n),
        PropertyValue::Number(n) => Err(PropertyError::NotFinite { property, value: n }),
        // Sliders in some hosts report numbers as strings
        PropertyValue::Text(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            Ok(n) => Err(PropertyError::NotFinite { property, value: n }),
            Err(_) => Err(PropertyError::WrongType {
                property,
                expected: "number",
            }),
        },
    }
}
