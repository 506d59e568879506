use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One node of the design tree.
///
/// Coordinates in `layout` are absolute (page space) for every node in the
/// tree; they only become parent-relative when the tree is materialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrNode {
    #[serde(rename = "figmaName")]
    pub name: String,
    #[serde(rename = "figmaType")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_ref: Option<String>,
    #[serde(default)]
    pub layout: LayoutRect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_layout: Option<AutoLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Styles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImagePayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg_data: Option<SvgData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub clips_content: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plugin_data: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<IrNode>,
}

impl IrNode {
    /// Creates a bare node of the given kind; mostly useful for building trees in code.
    pub fn new(name: impl Into<String>, kind: NodeKind, layout: LayoutRect) -> Self {
        Self {
            name: name.into(),
            kind,
            html_tag: None,
            component_ref: None,
            layout,
            auto_layout: None,
            styles: None,
            text: None,
            image: None,
            svg_data: None,
            transform: None,
            rotation: None,
            clips_content: false,
            plugin_data: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Rotation in degrees, preferring the top-level field over `transform.rotation`.
    pub fn effective_rotation(&self) -> Option<f64> {
        self.rotation
            .or_else(|| self.transform.as_ref().and_then(|t| t.rotation))
    }
}

/// The IR node type, carried on the wire as a `SCREAMING_SNAKE_CASE` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Frame,
    AutoLayout,
    Text,
    Rectangle,
    Ellipse,
    Image,
    Vector,
    Component,
    Instance,
    Group,
    Section,
    /// Any kind this version of the schema does not know; materialized as a
    /// plain container. The raw type string is kept for round-tripping.
    Unknown(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Frame => "FRAME",
            NodeKind::AutoLayout => "AUTO_LAYOUT",
            NodeKind::Text => "TEXT",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Ellipse => "ELLIPSE",
            NodeKind::Image => "IMAGE",
            NodeKind::Vector => "VECTOR",
            NodeKind::Component => "COMPONENT",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Group => "GROUP",
            NodeKind::Section => "SECTION",
            NodeKind::Unknown(raw) => raw,
        }
    }
}

impl From<String> for NodeKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "FRAME" => NodeKind::Frame,
            "AUTO_LAYOUT" => NodeKind::AutoLayout,
            "TEXT" => NodeKind::Text,
            "RECTANGLE" => NodeKind::Rectangle,
            "ELLIPSE" => NodeKind::Ellipse,
            "IMAGE" => NodeKind::Image,
            "VECTOR" => NodeKind::Vector,
            "COMPONENT" => NodeKind::Component,
            "INSTANCE" => NodeKind::Instance,
            "GROUP" => NodeKind::Group,
            "SECTION" => NodeKind::Section,
            _ => NodeKind::Unknown(raw),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutRect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl LayoutRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// --- Auto layout ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoLayout {
    pub direction: LayoutDirection,
    #[serde(default)]
    pub spacing: f64,
    #[serde(default)]
    pub padding_top: f64,
    #[serde(default)]
    pub padding_right: f64,
    #[serde(default)]
    pub padding_bottom: f64,
    #[serde(default)]
    pub padding_left: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_align: Option<PrimaryAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_align: Option<CounterAlign>,
    #[serde(default)]
    pub wrap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutDirection {
    Horizontal,
    Vertical,
    /// Any value this schema does not know; ignored when applied.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrimaryAlign {
    #[default]
    Min,
    Center,
    Max,
    SpaceBetween,
    /// Any value this schema does not know; ignored when applied.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CounterAlign {
    #[default]
    Min,
    Center,
    Max,
    Stretch,
    /// Any value this schema does not know; ignored when applied.
    #[serde(other)]
    Other,
}

// --- Styles ---

/// The style bundle attached to a node. Every attribute is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<FillSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<BorderRadius>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<BorderSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<EffectSpec>>,
    #[serde(default)]
    pub clips_content: bool,
}

/// Abstract fill descriptor, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FillSpec {
    Solid {
        #[serde(default)]
        color: Option<String>,
    },
    GradientLinear {
        /// Degrees, CSS convention (0 = towards top). Absent means 180.
        #[serde(default)]
        angle: Option<f64>,
        #[serde(default)]
        stops: Vec<GradientStop>,
    },
    GradientRadial {
        #[serde(default)]
        stops: Vec<GradientStop>,
    },
    GradientAngular {
        #[serde(default)]
        stops: Vec<GradientStop>,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        #[serde(default)]
        src: Option<String>,
        #[serde(default)]
        scale_mode: Option<ScaleMode>,
    },
    /// Fill types the engine does not understand. Dropped when building paints.
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub position: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    Fill,
    Fit,
    Crop,
    Tile,
    /// Any value this schema does not know; ignored when applied.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectSpec {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
}

impl EffectSpec {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            color: None,
            offset_x: None,
            offset_y: None,
            blur: None,
            spread: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderRadius {
    #[serde(default)]
    pub top_left: Option<f64>,
    #[serde(default)]
    pub top_right: Option<f64>,
    #[serde(default)]
    pub bottom_right: Option<f64>,
    #[serde(default)]
    pub bottom_left: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BorderSpec {
    #[serde(default)]
    pub uniform: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BorderStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sides: Option<BorderSides>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BorderStyle {
    Solid,
    Dashed,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderSide {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub style: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BorderSides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<BorderSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<BorderSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<BorderSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<BorderSide>,
}

impl BorderSides {
    /// Defined sides in top, right, bottom, left order.
    pub fn defined(&self) -> impl Iterator<Item = (Side, &BorderSide)> {
        [
            (Side::Top, self.top.as_ref()),
            (Side::Right, self.right.as_ref()),
            (Side::Bottom, self.bottom.as_ref()),
            (Side::Left, self.left.as_ref()),
        ]
        .into_iter()
        .filter_map(|(side, def)| def.map(|d| (side, d)))
    }

    pub fn first(&self) -> Option<&BorderSide> {
        self.defined().next().map(|(_, side)| side)
    }

    /// Width of one side, 0 when the side is not defined.
    pub fn width(&self, side: Side) -> f64 {
        let def = match side {
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
        };
        def.as_ref().map(|s| s.width).unwrap_or(0.0)
    }
}

// --- Payloads ---

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPayload {
    #[serde(default)]
    pub characters: String,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default)]
    /// Numeric weight; fractional values are accepted.
    pub font_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default)]
    pub letter_spacing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncation: Option<TextTruncation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lines: Option<u32>,
}

impl TextPayload {
    pub fn is_italic(&self) -> bool {
        self.font_style.as_deref() == Some("italic")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justified,
    /// Any value this schema does not know; ignored when applied.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    Underline,
    Strikethrough,
    /// Any value this schema does not know; ignored when applied.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextTruncation {
    Ending,
    /// Any value this schema does not know; ignored when applied.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub base64: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    pub scale_mode: ScaleMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgData {
    #[serde(default)]
    pub markup: String,
    #[serde(default)]
    pub view_box: Option<String>,
    #[serde(default)]
    pub width: Option<String>,
    #[serde(default)]
    pub height: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformData {
    #[serde(default)]
    pub rotation: Option<f64>,
    #[serde(default)]
    pub scale_x: Option<f64>,
    #[serde(default)]
    pub scale_y: Option<f64>,
    #[serde(default)]
    pub translate_x: Option<f64>,
    #[serde(default)]
    pub translate_y: Option<f64>,
}
