//! # Effects Module
//!
//! Builds canvas shadows and blurs from IR effect descriptors.

use crate::color::parse_optional_color;
use crate::types::{BlendMode, BlurEffect, Color, Effect, ShadowEffect, Vector};
use codesync_ir::{EffectKind, EffectSpec};
use tracing::debug;

/// Converts one effect descriptor. Unknown kinds yield `None`.
pub fn build_effect(spec: &EffectSpec) -> Option<Effect> {
    match spec.kind {
        EffectKind::DropShadow => Some(Effect::DropShadow(build_shadow(spec))),
        EffectKind::InnerShadow => Some(Effect::InnerShadow(build_shadow(spec))),
        EffectKind::LayerBlur => Some(Effect::LayerBlur(build_blur(spec))),
        EffectKind::BackgroundBlur => Some(Effect::BackgroundBlur(build_blur(spec))),
        EffectKind::Unknown => None,
    }
}

fn build_shadow(spec: &EffectSpec) -> ShadowEffect {
    ShadowEffect {
        visible: true,
        blend_mode: BlendMode::Normal,
        color: parse_optional_color(spec.color.as_deref()).unwrap_or(Color::SHADOW),
        offset: Vector {
            x: spec.offset_x.unwrap_or(0.0),
            y: spec.offset_y.unwrap_or(0.0),
        },
        radius: spec.blur.unwrap_or(0.0),
        spread: spec.spread.unwrap_or(0.0),
    }
}

fn build_blur(spec: &EffectSpec) -> BlurEffect {
    BlurEffect {
        visible: true,
        radius: spec.blur.unwrap_or(0.0),
    }
}

/// Maps an ordered effect list onto canvas effects, skipping unknown kinds.
pub fn build_effects(specs: &[EffectSpec]) -> Vec<Effect> {
    specs
        .iter()
        .filter_map(|spec| {
            let effect = build_effect(spec);
            if effect.is_none() {
                debug!(kind = ?spec.kind, "skipping unknown effect");
            }
            effect
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_defaults() {
        let effects = build_effects(&[EffectSpec::new(EffectKind::DropShadow)]);
        assert_eq!(
            effects,
            vec![Effect::DropShadow(ShadowEffect {
                visible: true,
                blend_mode: BlendMode::Normal,
                color: Color::SHADOW,
                offset: Vector { x: 0.0, y: 0.0 },
                radius: 0.0,
                spread: 0.0,
            })]
        );
    }

    #[test]
    fn test_inner_shadow_keeps_values() {
        let spec = EffectSpec {
            color: Some("rgba(255, 0, 0, 0.6)".into()),
            offset_x: Some(2.0),
            offset_y: Some(-3.0),
            blur: Some(6.0),
            spread: Some(1.0),
            ..EffectSpec::new(EffectKind::InnerShadow)
        };
        match build_effect(&spec) {
            Some(Effect::InnerShadow(shadow)) => {
                assert_eq!(shadow.color, Color::new(1.0, 0.0, 0.0, 0.6));
                assert_eq!(shadow.offset, Vector { x: 2.0, y: -3.0 });
                assert_eq!(shadow.radius, 6.0);
                assert_eq!(shadow.spread, 1.0);
            }
            other => panic!("expected inner shadow, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_shadow_color_falls_back() {
        let spec = EffectSpec {
            color: Some("shadowy".into()),
            ..EffectSpec::new(EffectKind::DropShadow)
        };
        match build_effect(&spec) {
            Some(Effect::DropShadow(shadow)) => assert_eq!(shadow.color, Color::SHADOW),
            other => panic!("expected drop shadow, got {:?}", other),
        }
    }

    #[test]
    fn test_blurs_keep_radius_only() {
        let layer = EffectSpec {
            blur: Some(4.0),
            color: Some("red".into()),
            offset_x: Some(10.0),
            ..EffectSpec::new(EffectKind::LayerBlur)
        };
        let background = EffectSpec::new(EffectKind::BackgroundBlur);
        let effects = build_effects(&[layer, background]);
        assert_eq!(
            effects,
            vec![
                Effect::LayerBlur(BlurEffect {
                    visible: true,
                    radius: 4.0
                }),
                Effect::BackgroundBlur(BlurEffect {
                    visible: true,
                    radius: 0.0
                }),
            ]
        );
    }

    #[test]
    fn test_unknown_effects_skipped() {
        let specs = [
            EffectSpec::new(EffectKind::Unknown),
            EffectSpec::new(EffectKind::LayerBlur),
        ];
        assert_eq!(build_effects(&specs).len(), 1);
    }
}
