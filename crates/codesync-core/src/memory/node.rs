use crate::host::{AutoLayoutProps, Capability, HostNodeKind, SceneNode, TextProps};
use crate::types::{BlendMode, CornerRadii, Effect, FontName, NodeId, Paint, StrokeWeights};
use std::collections::BTreeMap;

use Capability as C;

/// Attribute groups each node kind exposes, modelled on the real canvas.
pub fn kind_capabilities(kind: HostNodeKind) -> &'static [Capability] {
    match kind {
        HostNodeKind::Page => &[C::Children],
        HostNodeKind::Frame | HostNodeKind::Component => &[
            C::Fills,
            C::Strokes,
            C::DashPattern,
            C::SideStrokeWeights,
            C::Opacity,
            C::BlendMode,
            C::CornerRadius,
            C::Effects,
            C::Clipping,
            C::Rotation,
            C::Children,
            C::AutoLayout,
        ],
        HostNodeKind::Section => &[C::Fills, C::Children],
        HostNodeKind::Text => &[
            C::Fills,
            C::Strokes,
            C::DashPattern,
            C::Opacity,
            C::BlendMode,
            C::Effects,
            C::Rotation,
            C::Text,
        ],
        HostNodeKind::Rectangle => &[
            C::Fills,
            C::Strokes,
            C::DashPattern,
            C::SideStrokeWeights,
            C::Opacity,
            C::BlendMode,
            C::CornerRadius,
            C::Effects,
            C::Rotation,
        ],
        HostNodeKind::Ellipse | HostNodeKind::Vector => &[
            C::Fills,
            C::Strokes,
            C::DashPattern,
            C::Opacity,
            C::BlendMode,
            C::Effects,
            C::Rotation,
        ],
    }
}

/// A node held by [`MemoryCanvas`](super::MemoryCanvas).
///
/// Fields are public so tests can inspect exactly what the engine wrote.
/// Setters for attributes the kind does not support leave the fields untouched.
#[derive(Debug, Clone)]
pub struct MemoryNode {
    pub id: NodeId,
    pub kind: HostNodeKind,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_weight: f64,
    pub side_stroke_weights: Option<StrokeWeights>,
    pub dash_pattern: Vec<f64>,
    pub opacity: f64,
    pub blend_mode: BlendMode,
    pub corner_radii: CornerRadii,
    pub effects: Vec<Effect>,
    pub clips_content: bool,
    pub rotation: f64,
    pub auto_layout: Option<AutoLayoutProps>,
    pub font: Option<FontName>,
    pub text: Option<TextProps>,

    pub shared_data: BTreeMap<String, BTreeMap<String, String>>,
}

impl MemoryNode {
    pub fn new(id: NodeId, kind: HostNodeKind) -> Self {
        let name = match kind {
            HostNodeKind::Page => "Page 1",
            HostNodeKind::Frame => "Frame",
            HostNodeKind::Component => "Component",
            HostNodeKind::Section => "Section",
            HostNodeKind::Text => "Text",
            HostNodeKind::Rectangle => "Rectangle",
            HostNodeKind::Ellipse => "Ellipse",
            HostNodeKind::Vector => "Vector",
        };
        // New frames start with a white background, like the real canvas.
        let fills = match kind {
            HostNodeKind::Frame | HostNodeKind::Component => {
                vec![Paint::solid(crate::types::Rgb::new(1.0, 1.0, 1.0), 1.0)]
            }
            _ => Vec::new(),
        };

        Self {
            id,
            kind,
            name: name.to_string(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            parent: None,
            children: Vec::new(),
            fills,
            strokes: Vec::new(),
            stroke_weight: 1.0,
            side_stroke_weights: None,
            dash_pattern: Vec::new(),
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
            corner_radii: CornerRadii::default(),
            effects: Vec::new(),
            clips_content: false,
            rotation: 0.0,
            auto_layout: None,
            font: None,
            text: None,
            shared_data: BTreeMap::new(),
        }
    }
}

impl SceneNode for MemoryNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn kind(&self) -> HostNodeKind {
        self.kind
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn set_shared_data(&mut self, namespace: &str, key: &str, value: &str) {
        let entries = self.shared_data.entry(namespace.to_string()).or_default();
        // An empty value deletes the key.
        if value.is_empty() {
            entries.remove(key);
        } else {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn shared_data(&self, namespace: &str, key: &str) -> Option<String> {
        self.shared_data.get(namespace)?.get(key).cloned()
    }

    fn shared_data_keys(&self, namespace: &str) -> Vec<String> {
        self.shared_data
            .get(namespace)
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn supports(&self, capability: Capability) -> bool {
        kind_capabilities(self.kind).contains(&capability)
    }

    fn fills(&self) -> Option<&[Paint]> {
        self.supports(C::Fills).then_some(self.fills.as_slice())
    }

    fn set_fills(&mut self, paints: Vec<Paint>) {
        if self.supports(C::Fills) {
            self.fills = paints;
        }
    }

    fn set_strokes(&mut self, paints: Vec<Paint>) {
        if self.supports(C::Strokes) {
            self.strokes = paints;
        }
    }

    fn set_stroke_weight(&mut self, weight: f64) {
        if self.supports(C::Strokes) {
            self.stroke_weight = weight;
            self.side_stroke_weights = None;
        }
    }

    fn set_side_stroke_weights(&mut self, weights: StrokeWeights) {
        if self.supports(C::SideStrokeWeights) {
            self.side_stroke_weights = Some(weights);
        }
    }

    fn set_dash_pattern(&mut self, pattern: Vec<f64>) {
        if self.supports(C::DashPattern) {
            self.dash_pattern = pattern;
        }
    }

    fn opacity(&self) -> Option<f64> {
        self.supports(C::Opacity).then_some(self.opacity)
    }

    fn set_opacity(&mut self, opacity: f64) {
        if self.supports(C::Opacity) {
            self.opacity = opacity;
        }
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        if self.supports(C::BlendMode) {
            self.blend_mode = mode;
        }
    }

    fn corner_radii(&self) -> Option<CornerRadii> {
        self.supports(C::CornerRadius).then_some(self.corner_radii)
    }

    fn set_corner_radii(&mut self, radii: CornerRadii) {
        if self.supports(C::CornerRadius) {
            self.corner_radii = radii;
        }
    }

    fn effects(&self) -> Option<&[Effect]> {
        self.supports(C::Effects).then_some(self.effects.as_slice())
    }

    fn set_effects(&mut self, effects: Vec<Effect>) {
        if self.supports(C::Effects) {
            self.effects = effects;
        }
    }

    fn set_clips_content(&mut self, clips: bool) {
        if self.supports(C::Clipping) {
            self.clips_content = clips;
        }
    }

    fn set_rotation(&mut self, degrees: f64) {
        if self.supports(C::Rotation) {
            self.rotation = degrees;
        }
    }

    fn set_auto_layout(&mut self, props: AutoLayoutProps) {
        if self.supports(C::AutoLayout) {
            self.auto_layout = Some(props);
        }
    }

    fn set_font(&mut self, font: FontName) {
        if self.supports(C::Text) {
            self.font = Some(font);
        }
    }

    fn set_text(&mut self, props: TextProps) {
        if self.supports(C::Text) {
            self.text = Some(props);
        }
    }

    fn children(&self) -> Option<&[NodeId]> {
        self.supports(C::Children).then_some(self.children.as_slice())
    }
}
