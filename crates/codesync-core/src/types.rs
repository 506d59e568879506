//! # Types Module
//!
//! Shared data types in the target canvas's native attribute model.
//!
//! ## Responsibilities
//! - **Color**: Float RGBA color; `Rgb` for solid paints, which carry alpha separately.
//! - **Paint**: Solid and gradient fills as the canvas understands them.
//! - **Effect**: Shadows and blurs.
//! - **FontName**: Family + style identity used for font acquisition.
//!
//! ## Key Types
//! - `Paint`: Tagged by `type` when serialized (`SOLID`, `GRADIENT_LINEAR`, ...).
//! - `GradientTransform`: Row-major 2x3 affine in the paint's unit box.
//! - `NodeId`: Host node handle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A handle to a node owned by the host canvas.
pub type NodeId = usize;

/// Represents a RGBA color in float format.
///
/// Components are nominally in `0.0..=1.0` but are never clamped: whatever the
/// parser produced is passed through unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Default shadow color: 25% opaque black.
    pub const SHADOW: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.25,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Drops the alpha channel.
    pub fn rgb(&self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Channel color without alpha, as used by solid paints.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolidPaint {
    pub color: Rgb,
    pub opacity: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: Color,
}

/// Row-major 2x3 affine: `[[a, c, tx], [b, d, ty]]`.
pub type GradientTransform = [[f64; 3]; 2];

pub const IDENTITY_TRANSFORM: GradientTransform = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPaint {
    pub gradient_stops: Vec<ColorStop>,
    pub gradient_transform: GradientTransform,
}

/// A concrete fill in the canvas's attribute model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Paint {
    Solid(SolidPaint),
    GradientLinear(GradientPaint),
    GradientRadial(GradientPaint),
    GradientAngular(GradientPaint),
}

impl Paint {
    pub fn solid(color: Rgb, opacity: f32) -> Self {
        Paint::Solid(SolidPaint { color, opacity })
    }

    pub fn gradient(&self) -> Option<&GradientPaint> {
        match self {
            Paint::Solid(_) => None,
            Paint::GradientLinear(g) | Paint::GradientRadial(g) | Paint::GradientAngular(g) => {
                Some(g)
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowEffect {
    pub visible: bool,
    pub blend_mode: BlendMode,
    pub color: Color,
    pub offset: Vector,
    pub radius: f64,
    pub spread: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlurEffect {
    pub visible: bool,
    pub radius: f64,
}

/// A concrete shadow or blur in the canvas's attribute model.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    DropShadow(ShadowEffect),
    InnerShadow(ShadowEffect),
    LayerBlur(BlurEffect),
    BackgroundBlur(BlurEffect),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlendMode {
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    /// Maps an IR blend-mode name onto the canvas enumeration.
    ///
    /// Only the fifteen non-normal modes are recognized; anything else,
    /// `NORMAL` included, yields `None` and leaves the node untouched.
    pub fn from_name(name: &str) -> Option<Self> {
        let mode = match name {
            "MULTIPLY" => BlendMode::Multiply,
            "SCREEN" => BlendMode::Screen,
            "OVERLAY" => BlendMode::Overlay,
            "DARKEN" => BlendMode::Darken,
            "LIGHTEN" => BlendMode::Lighten,
            "COLOR_DODGE" => BlendMode::ColorDodge,
            "COLOR_BURN" => BlendMode::ColorBurn,
            "HARD_LIGHT" => BlendMode::HardLight,
            "SOFT_LIGHT" => BlendMode::SoftLight,
            "DIFFERENCE" => BlendMode::Difference,
            "EXCLUSION" => BlendMode::Exclusion,
            "HUE" => BlendMode::Hue,
            "SATURATION" => BlendMode::Saturation,
            "COLOR" => BlendMode::Color,
            "LUMINOSITY" => BlendMode::Luminosity,
            _ => return None,
        };
        Some(mode)
    }
}

impl Default for BlendMode {
    fn default() -> Self {
        Self::Normal
    }
}

/// Family + style pair identifying a loadable font.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl Default for FontName {
    fn default() -> Self {
        Self::new("Inter", "Regular")
    }
}

impl fmt::Display for FontName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

/// Four independent corner radii.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

impl CornerRadii {
    pub fn is_zero(&self) -> bool {
        self.top_left == 0.0
            && self.top_right == 0.0
            && self.bottom_right == 0.0
            && self.bottom_left == 0.0
    }
}

/// Independent stroke weight per side.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeWeights {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}
