//! # Host Module
//!
//! The seam between the engine and the canvas that owns the real nodes.
//!
//! ## Responsibilities
//! - **Canvas**: Document-level operations (create nodes, parse SVG, load fonts, selection).
//! - **SceneNode**: A node handle. Identity, geometry and shared data are always
//!   available; everything else is gated by [`Capability`].
//!
//! Node kinds expose different subsets of attributes. Rather than a class
//! hierarchy, each implementation reports what it supports through
//! [`SceneNode::supports`] and leaves the remaining setters as no-ops.

use crate::types::{
    BlendMode, CornerRadii, Effect, FontName, NodeId, Paint, StrokeWeights,
};
use anyhow::Result;
use codesync_ir::{
    CounterAlign, LayoutDirection, PrimaryAlign, TextAlign, TextDecoration, TextTruncation,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The node types a canvas can hand back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostNodeKind {
    Page,
    Frame,
    Component,
    Section,
    Text,
    Rectangle,
    Ellipse,
    Vector,
}

/// Optional attribute groups a node may expose.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Fills,
    Strokes,
    DashPattern,
    SideStrokeWeights,
    Opacity,
    BlendMode,
    CornerRadius,
    Effects,
    Clipping,
    Rotation,
    Children,
    AutoLayout,
    Text,
}

/// Auto-layout parameters as the canvas stores them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoLayoutProps {
    pub layout_mode: LayoutDirection,
    pub item_spacing: f64,
    pub padding_top: f64,
    pub padding_right: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    /// `None` leaves the canvas's current alignment in place.
    pub primary_axis_align: Option<PrimaryAlign>,
    pub counter_axis_align: Option<CounterAlign>,
    pub wrap: bool,
}

/// Text content and typography, minus the font which is loaded separately.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub characters: String,
    pub font_size: f64,
    /// Pixels.
    pub line_height: Option<f64>,
    /// Pixels.
    pub letter_spacing: Option<f64>,
    pub align: Option<TextAlign>,
    pub decoration: Option<TextDecoration>,
    pub truncation: Option<TextTruncation>,
    pub max_lines: Option<u32>,
}

/// A handle to one canvas node.
pub trait SceneNode: fmt::Debug {
    fn id(&self) -> NodeId;
    fn kind(&self) -> HostNodeKind;

    fn name(&self) -> &str;
    fn set_name(&mut self, name: &str);

    fn set_position(&mut self, x: f64, y: f64);
    fn resize(&mut self, width: f64, height: f64);

    /// Writes a shared-data entry under `namespace`.
    fn set_shared_data(&mut self, namespace: &str, key: &str, value: &str);
    fn shared_data(&self, namespace: &str, key: &str) -> Option<String>;
    fn shared_data_keys(&self, namespace: &str) -> Vec<String>;

    /// Whether this node exposes the given attribute group.
    fn supports(&self, _capability: Capability) -> bool {
        false
    }

    fn fills(&self) -> Option<&[Paint]> {
        None
    }
    fn set_fills(&mut self, _paints: Vec<Paint>) {}

    fn set_strokes(&mut self, _paints: Vec<Paint>) {}
    fn set_stroke_weight(&mut self, _weight: f64) {}
    fn set_side_stroke_weights(&mut self, _weights: StrokeWeights) {}
    fn set_dash_pattern(&mut self, _pattern: Vec<f64>) {}

    fn opacity(&self) -> Option<f64> {
        None
    }
    fn set_opacity(&mut self, _opacity: f64) {}

    fn set_blend_mode(&mut self, _mode: BlendMode) {}

    fn corner_radii(&self) -> Option<CornerRadii> {
        None
    }
    fn set_corner_radii(&mut self, _radii: CornerRadii) {}

    fn effects(&self) -> Option<&[Effect]> {
        None
    }
    fn set_effects(&mut self, _effects: Vec<Effect>) {}

    fn set_clips_content(&mut self, _clips: bool) {}

    fn set_rotation(&mut self, _degrees: f64) {}

    fn set_auto_layout(&mut self, _props: AutoLayoutProps) {}

    fn set_font(&mut self, _font: FontName) {}
    fn set_text(&mut self, _props: TextProps) {}

    fn children(&self) -> Option<&[NodeId]> {
        None
    }
}

/// The document the engine writes into.
///
/// All engine state that touches the outside world goes through this trait;
/// the engine itself keeps no globals.
pub trait Canvas {
    /// Creates an empty node of the given kind on the current page.
    fn create_node(&mut self, kind: HostNodeKind) -> NodeId;

    /// Parses vector markup into a node.
    fn create_node_from_svg(&mut self, markup: &str) -> Result<NodeId>;

    /// Makes a font available for text nodes.
    fn load_font(&mut self, font: &FontName) -> Result<()>;

    fn node(&self, id: NodeId) -> Option<&dyn SceneNode>;
    fn node_mut(&mut self, id: NodeId) -> Option<&mut dyn SceneNode>;

    /// Moves `child` under `parent`. Returns `false` if the parent cannot hold children.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool;

    fn current_page(&self) -> NodeId;

    fn selection(&self) -> Vec<NodeId>;
    fn set_selection(&mut self, nodes: Vec<NodeId>);

    fn scroll_into_view(&mut self, _nodes: &[NodeId]) {}

    /// Ends the session. No further calls are expected.
    fn close(&mut self) {}
}
