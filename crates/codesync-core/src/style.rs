//! # Style Module
//!
//! Applies an IR style bundle to a canvas node.
//!
//! Each attribute is applied independently, in a fixed order (fills, opacity,
//! blend mode, corner radii, border, effects, clipping), and only when the
//! node reports the matching [`Capability`]. Missing capabilities are skipped
//! silently.

use crate::color::{parse_color, parse_optional_color};
use crate::effects::build_effects;
use crate::host::{Capability, SceneNode};
use crate::paint::build_fills;
use crate::types::{BlendMode, CornerRadii, Paint, StrokeWeights};
use codesync_ir::{BorderRadius, BorderSides, BorderSpec, BorderStyle, Side, Styles};
use tracing::debug;

/// Dash pattern used for `DASHED` borders.
pub const DASH_PATTERN: [f64; 2] = [8.0, 4.0];

pub fn apply_styles(node: &mut dyn SceneNode, styles: &Styles) {
    if let Some(fills) = &styles.fills {
        if node.supports(Capability::Fills) {
            let paints = build_fills(fills);
            if !paints.is_empty() {
                node.set_fills(paints);
            }
        }
    }

    if let Some(opacity) = styles.opacity {
        if node.supports(Capability::Opacity) {
            node.set_opacity(opacity);
        }
    }

    if let Some(name) = &styles.blend_mode {
        if node.supports(Capability::BlendMode) {
            match BlendMode::from_name(name) {
                Some(mode) => node.set_blend_mode(mode),
                None => debug!(blend_mode = %name, "ignoring unrecognized blend mode"),
            }
        }
    }

    if let Some(radius) = &styles.border_radius {
        if node.supports(Capability::CornerRadius) {
            node.set_corner_radii(corner_radii(radius));
        }
    }

    if let Some(border) = &styles.border {
        if node.supports(Capability::Strokes) {
            apply_border(node, border);
        }
    }

    if let Some(effects) = &styles.effects {
        if node.supports(Capability::Effects) {
            let effects = build_effects(effects);
            if !effects.is_empty() {
                node.set_effects(effects);
            }
        }
    }

    if styles.clips_content && node.supports(Capability::Clipping) {
        node.set_clips_content(true);
    }
}

fn corner_radii(radius: &BorderRadius) -> CornerRadii {
    CornerRadii {
        top_left: radius.top_left.unwrap_or(0.0),
        top_right: radius.top_right.unwrap_or(0.0),
        bottom_right: radius.bottom_right.unwrap_or(0.0),
        bottom_left: radius.bottom_left.unwrap_or(0.0),
    }
}

/// Resolves a border onto the node's single stroke paint plus weights.
///
/// Per-side borders can only carry one color, so the first defined side wins.
/// Nodes without independent side weights get the widest side applied uniformly.
pub fn apply_border(node: &mut dyn SceneNode, border: &BorderSpec) {
    if border.uniform {
        apply_uniform_border(node, border);
    } else if let Some(sides) = &border.sides {
        apply_side_borders(node, sides);
    }
}

fn apply_uniform_border(node: &mut dyn SceneNode, border: &BorderSpec) {
    let Some(color) = parse_optional_color(border.color.as_deref()) else {
        debug!(color = ?border.color, "border color unparseable, skipping stroke");
        return;
    };

    node.set_strokes(vec![Paint::solid(color.rgb(), color.a)]);
    // Zero width falls back to a hairline as well.
    let weight = border.width.filter(|w| *w != 0.0).unwrap_or(1.0);
    node.set_stroke_weight(weight);

    if border.style == Some(BorderStyle::Dashed) && node.supports(Capability::DashPattern) {
        node.set_dash_pattern(DASH_PATTERN.to_vec());
    }
}

fn apply_side_borders(node: &mut dyn SceneNode, sides: &BorderSides) {
    let Some(first) = sides.first() else {
        return;
    };
    let Some(color) = parse_color(&first.color) else {
        debug!(color = %first.color, "border side color unparseable, skipping stroke");
        return;
    };

    // Side strokes are always fully opaque; the side color's alpha is dropped.
    node.set_strokes(vec![Paint::solid(color.rgb(), 1.0)]);

    if node.supports(Capability::SideStrokeWeights) {
        node.set_side_stroke_weights(StrokeWeights {
            top: sides.width(Side::Top),
            right: sides.width(Side::Right),
            bottom: sides.width(Side::Bottom),
            left: sides.width(Side::Left),
        });
    } else {
        let widest = sides
            .defined()
            .map(|(_, side)| side.width)
            .fold(f64::NEG_INFINITY, f64::max);
        node.set_stroke_weight(widest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Canvas, HostNodeKind};
    use crate::memory::MemoryCanvas;
    use crate::types::{Effect, Rgb};
    use codesync_ir::{BorderSide, EffectKind, EffectSpec, FillSpec};

    fn side(width: f64, color: &str) -> Option<BorderSide> {
        Some(BorderSide {
            width,
            color: color.to_string(),
            style: Some("SOLID".to_string()),
        })
    }

    fn styled(kind: HostNodeKind, styles: &Styles) -> MemoryCanvas {
        let mut canvas = MemoryCanvas::new();
        let id = canvas.create_node(kind);
        apply_styles(canvas.node_mut(id).unwrap(), styles);
        canvas
    }

    #[test]
    fn test_full_bundle_on_frame() {
        let styles = Styles {
            fills: Some(vec![FillSpec::Solid {
                color: Some("#ff0000".into()),
            }]),
            opacity: Some(0.5),
            blend_mode: Some("SCREEN".into()),
            border_radius: Some(BorderRadius {
                top_left: Some(8.0),
                bottom_right: Some(2.0),
                ..Default::default()
            }),
            effects: Some(vec![EffectSpec::new(EffectKind::LayerBlur)]),
            clips_content: true,
            ..Default::default()
        };
        let canvas = styled(HostNodeKind::Frame, &styles);
        let node = canvas.get(1).unwrap();

        assert_eq!(node.fills, vec![Paint::solid(Rgb::new(1.0, 0.0, 0.0), 1.0)]);
        assert_eq!(node.opacity, 0.5);
        assert_eq!(node.blend_mode, BlendMode::Screen);
        assert_eq!(
            node.corner_radii,
            CornerRadii {
                top_left: 8.0,
                top_right: 0.0,
                bottom_right: 2.0,
                bottom_left: 0.0
            }
        );
        assert!(matches!(node.effects.as_slice(), [Effect::LayerBlur(_)]));
        assert!(node.clips_content);
    }

    #[test]
    fn test_missing_capabilities_are_skipped() {
        let styles = Styles {
            opacity: Some(0.3),
            border_radius: Some(BorderRadius {
                top_left: Some(8.0),
                ..Default::default()
            }),
            effects: Some(vec![EffectSpec::new(EffectKind::DropShadow)]),
            clips_content: true,
            ..Default::default()
        };
        let canvas = styled(HostNodeKind::Section, &styles);
        let node = canvas.get(1).unwrap();
        assert_eq!(node.opacity, 1.0);
        assert!(node.corner_radii.is_zero());
        assert!(node.effects.is_empty());
        assert!(!node.clips_content);
    }

    #[test]
    fn test_unknown_blend_mode_ignored() {
        let styles = Styles {
            blend_mode: Some("PLUS_DARKER".into()),
            ..Default::default()
        };
        let canvas = styled(HostNodeKind::Rectangle, &styles);
        assert_eq!(canvas.get(1).unwrap().blend_mode, BlendMode::Normal);
    }

    #[test]
    fn test_empty_fill_result_keeps_existing_fills() {
        let styles = Styles {
            fills: Some(vec![FillSpec::Solid {
                color: Some("bogus".into()),
            }]),
            ..Default::default()
        };
        let canvas = styled(HostNodeKind::Frame, &styles);
        // Frames start with a white fill; nothing buildable means no overwrite.
        assert_eq!(canvas.get(1).unwrap().fills.len(), 1);
    }

    #[test]
    fn test_uniform_dashed_border() {
        let styles = Styles {
            border: Some(BorderSpec {
                uniform: true,
                color: Some("rgba(0, 0, 0, 0.5)".into()),
                width: Some(2.0),
                style: Some(BorderStyle::Dashed),
                sides: None,
            }),
            ..Default::default()
        };
        let canvas = styled(HostNodeKind::Rectangle, &styles);
        let node = canvas.get(1).unwrap();
        assert_eq!(node.strokes, vec![Paint::solid(Rgb::new(0.0, 0.0, 0.0), 0.5)]);
        assert_eq!(node.stroke_weight, 2.0);
        assert_eq!(node.dash_pattern, vec![8.0, 4.0]);
    }

    #[test]
    fn test_uniform_border_defaults_width_and_needs_color() {
        let mut border = BorderSpec {
            uniform: true,
            color: Some("blue".into()),
            ..Default::default()
        };
        let canvas = styled(
            HostNodeKind::Rectangle,
            &Styles {
                border: Some(border.clone()),
                ..Default::default()
            },
        );
        assert_eq!(canvas.get(1).unwrap().stroke_weight, 1.0);
        assert!(canvas.get(1).unwrap().dash_pattern.is_empty());

        border.color = None;
        border.width = Some(5.0);
        let canvas = styled(
            HostNodeKind::Rectangle,
            &Styles {
                border: Some(border),
                ..Default::default()
            },
        );
        assert!(canvas.get(1).unwrap().strokes.is_empty());
    }

    #[test]
    fn test_side_border_with_side_weights() {
        let styles = Styles {
            border: Some(BorderSpec {
                uniform: false,
                sides: Some(BorderSides {
                    top: None,
                    right: side(3.0, "rgba(255, 0, 0, 0.5)"),
                    bottom: side(1.0, "#0000ff"),
                    left: None,
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let canvas = styled(HostNodeKind::Frame, &styles);
        let node = canvas.get(1).unwrap();
        // First defined side is `right`; its alpha does not reach the stroke.
        assert_eq!(node.strokes, vec![Paint::solid(Rgb::new(1.0, 0.0, 0.0), 1.0)]);
        assert_eq!(
            node.side_stroke_weights,
            Some(StrokeWeights {
                top: 0.0,
                right: 3.0,
                bottom: 1.0,
                left: 0.0
            })
        );
    }

    #[test]
    fn test_side_border_falls_back_to_widest() {
        let styles = Styles {
            border: Some(BorderSpec {
                uniform: false,
                sides: Some(BorderSides {
                    top: side(1.0, "black"),
                    right: None,
                    bottom: side(6.0, "red"),
                    left: side(2.0, "red"),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let canvas = styled(HostNodeKind::Ellipse, &styles);
        let node = canvas.get(1).unwrap();
        assert_eq!(node.strokes, vec![Paint::solid(Rgb::new(0.0, 0.0, 0.0), 1.0)]);
        assert_eq!(node.stroke_weight, 6.0);
        assert_eq!(node.side_stroke_weights, None);
    }

    #[test]
    fn test_side_border_bad_color_applies_nothing() {
        let styles = Styles {
            border: Some(BorderSpec {
                uniform: false,
                sides: Some(BorderSides {
                    top: side(4.0, "nope"),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        let canvas = styled(HostNodeKind::Rectangle, &styles);
        let node = canvas.get(1).unwrap();
        assert!(node.strokes.is_empty());
        assert_eq!(node.side_stroke_weights, None);
    }
}
