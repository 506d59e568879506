// codesync-ir: Serde structs for the design IR payload
pub mod model;

pub use model::*;

#[cfg(test)]
mod tests {
    use super::model::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal() {
        let data = json!({
            "figmaName": "Card",
            "figmaType": "FRAME",
            "layout": { "x": 0, "y": 0, "width": 320, "height": 200 }
        });
        let node: IrNode = serde_json::from_value(data).unwrap();
        assert_eq!(node.name, "Card");
        assert_eq!(node.kind, NodeKind::Frame);
        assert!(node.children.is_empty());
        assert!(node.styles.is_none());
        assert!(node.plugin_data.is_empty());
    }

    #[test]
    fn test_unknown_kind_falls_back() {
        let data = json!({
            "figmaName": "Mystery",
            "figmaType": "STAR",
            "layout": { "x": 0, "y": 0, "width": 10, "height": 10 }
        });
        let node: IrNode = serde_json::from_value(data).unwrap();
        assert_eq!(node.kind, NodeKind::Unknown("STAR".into()));
        assert_eq!(node.kind.as_str(), "STAR");
        assert_eq!(serde_json::to_value(&node).unwrap()["figmaType"], "STAR");
    }

    #[test]
    fn test_unexpected_sub_values_do_not_reject_node() {
        let data = json!({
            "figmaName": "Row",
            "figmaType": "AUTO_LAYOUT",
            "autoLayout": {
                "direction": "DIAGONAL",
                "primaryAlign": "SPACE_AROUND",
                "counterAlign": "BASELINE"
            },
            "text": {
                "characters": "a",
                "fontWeight": 450.5,
                "textAlign": "START",
                "textDecoration": "OVERLINE",
                "truncation": "MIDDLE"
            },
            "image": { "scaleMode": "STRETCH" }
        });
        let node: IrNode = serde_json::from_value(data).unwrap();

        let layout = node.auto_layout.unwrap();
        assert_eq!(layout.direction, LayoutDirection::Other);
        assert_eq!(layout.primary_align, Some(PrimaryAlign::Other));
        assert_eq!(layout.counter_align, Some(CounterAlign::Other));

        let text = node.text.unwrap();
        assert_eq!(text.font_weight, Some(450.5));
        assert_eq!(text.text_align, Some(TextAlign::Other));
        assert_eq!(text.text_decoration, Some(TextDecoration::Other));
        assert_eq!(text.truncation, Some(TextTruncation::Other));
        assert_eq!(node.image.unwrap().scale_mode, ScaleMode::Other);
    }

    #[test]
    fn test_fill_variants() {
        let fills: Vec<FillSpec> = serde_json::from_value(json!([
            { "type": "SOLID", "color": "#fff" },
            { "type": "GRADIENT_LINEAR", "angle": 45, "stops": [
                { "color": "red", "position": 0 },
                { "color": "blue", "position": 1 }
            ]},
            { "type": "GRADIENT_RADIAL", "stops": [] },
            { "type": "IMAGE", "src": "hero.png", "scaleMode": "FILL" },
            { "type": "PATTERN" }
        ]))
        .unwrap();

        assert_eq!(fills.len(), 5);
        assert!(matches!(&fills[0], FillSpec::Solid { color: Some(c) } if c == "#fff"));
        match &fills[1] {
            FillSpec::GradientLinear { angle, stops } => {
                assert_eq!(*angle, Some(45.0));
                assert_eq!(stops.len(), 2);
                assert_eq!(stops[1].color, "blue");
            }
            other => panic!("expected linear gradient, got {:?}", other),
        }
        assert!(matches!(&fills[2], FillSpec::GradientRadial { stops } if stops.is_empty()));
        assert!(matches!(&fills[3], FillSpec::Image { .. }));
        assert!(matches!(&fills[4], FillSpec::Unsupported));
    }

    #[test]
    fn test_effect_unknown_kind() {
        let effect: EffectSpec = serde_json::from_value(json!({
            "type": "NOISE",
            "blur": 3
        }))
        .unwrap();
        assert_eq!(effect.kind, EffectKind::Unknown);
        assert_eq!(effect.blur, Some(3.0));
    }

    #[test]
    fn test_border_sides_order() {
        let border: BorderSpec = serde_json::from_value(json!({
            "uniform": false,
            "sides": {
                "left": { "width": 4, "color": "#00ff00", "style": "SOLID" },
                "bottom": { "width": 2, "color": "#0000ff", "style": "SOLID" }
            }
        }))
        .unwrap();
        let sides = border.sides.unwrap();
        let defined: Vec<_> = sides.defined().map(|(side, _)| side).collect();
        assert_eq!(defined, vec![Side::Bottom, Side::Left]);
        assert_eq!(sides.first().map(|s| s.width), Some(2.0));
    }
}
