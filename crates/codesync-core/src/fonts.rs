//! # Fonts Module
//!
//! Two-phase font resolution.
//!
//! 1. [`collect_fonts`] walks the whole IR tree and produces a deduplicated,
//!    ordered [`FontPlan`].
//! 2. [`load_fonts`] asks the canvas for every planned font in sequence, falling
//!    back to the default font, and records the outcome in a [`FontTable`].
//!
//! Node materialization only consults the table; it never loads fonts itself.

use crate::host::Canvas;
use crate::types::FontName;
use codesync_ir::{IrNode, TextPayload};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

pub const DEFAULT_FAMILY: &str = "Inter";
pub const DEFAULT_WEIGHT: f64 = 400.0;

const ITALIC_SUFFIX: &str = " Italic";

/// Weight thresholds, checked top-down.
const WEIGHT_STYLES: &[(f64, &str)] = &[
    (700.0, "Bold"),
    (600.0, "SemiBold"),
    (500.0, "Medium"),
    (300.0, "Light"),
];

/// Style label for a numeric weight, e.g. `700.0, true` -> `"Bold Italic"`.
///
/// Fractional weights compare against the thresholds as-is.
pub fn style_label(weight: f64, italic: bool) -> String {
    let base = WEIGHT_STYLES
        .iter()
        .find(|(min, _)| weight >= *min)
        .map(|(_, style)| *style)
        .unwrap_or("Regular");
    if italic {
        format!("{base}{ITALIC_SUFFIX}")
    } else {
        base.to_string()
    }
}

/// The font a text payload asks for, and its non-italic base when italic.
pub fn text_fonts(text: &TextPayload) -> (FontName, Option<FontName>) {
    let family = text
        .font_family
        .as_deref()
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FAMILY);
    let weight = text
        .font_weight
        .filter(|w| *w > 0.0)
        .unwrap_or(DEFAULT_WEIGHT);
    let italic = text.is_italic();

    let primary = FontName::new(family, style_label(weight, italic));
    let base = italic.then(|| FontName::new(family, style_label(weight, false)));
    (primary, base)
}

/// Ordered, deduplicated set of fonts a tree needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FontPlan {
    fonts: Vec<FontName>,
}

impl FontPlan {
    fn insert(&mut self, font: FontName) {
        if !self.fonts.contains(&font) {
            self.fonts.push(font);
        }
    }

    pub fn fonts(&self) -> &[FontName] {
        &self.fonts
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Collects every font the tree needs, in pre-order.
pub fn collect_fonts(root: &IrNode) -> FontPlan {
    let mut plan = FontPlan::default();
    collect_recursive(root, &mut plan);
    plan
}

fn collect_recursive(node: &IrNode, plan: &mut FontPlan) {
    if let Some(text) = &node.text {
        let (primary, base) = text_fonts(text);
        plan.insert(primary);
        if let Some(base) = base {
            plan.insert(base);
        }
    }
    for child in &node.children {
        collect_recursive(child, plan);
    }
}

/// The outcome of phase two: which fonts the canvas actually has.
#[derive(Debug, Clone, Default)]
pub struct FontTable {
    loaded: HashSet<FontName>,
    default_font: FontName,
}

impl FontTable {
    pub fn new(default_font: FontName) -> Self {
        Self {
            loaded: HashSet::new(),
            default_font,
        }
    }

    pub fn is_loaded(&self, font: &FontName) -> bool {
        self.loaded.contains(font)
    }

    pub fn mark_loaded(&mut self, font: FontName) {
        self.loaded.insert(font);
    }

    /// Font to apply to a text node: the styled key, then its non-italic base,
    /// then the default. `None` when nothing usable was loaded.
    pub fn resolve(&self, text: &TextPayload) -> Option<FontName> {
        let (primary, base) = text_fonts(text);
        [Some(primary), base, Some(self.default_font.clone())]
            .into_iter()
            .flatten()
            .find(|font| self.is_loaded(font))
    }
}

/// Loads each planned font in order. A failed font falls back to the default;
/// a failed default is only logged.
#[instrument(level = "debug", skip_all, fields(fonts = plan.len()))]
pub fn load_fonts(canvas: &mut dyn Canvas, plan: &FontPlan, default_font: &FontName) -> FontTable {
    let mut table = FontTable::new(default_font.clone());

    for font in plan.fonts() {
        match canvas.load_font(font) {
            Ok(()) => {
                debug!(%font, "font loaded");
                table.mark_loaded(font.clone());
            }
            Err(err) => {
                debug!(%font, error = %err, "font unavailable, trying default");
                match canvas.load_font(default_font) {
                    Ok(()) => table.mark_loaded(default_font.clone()),
                    Err(_) => warn!("Font unavailable: {}", font),
                }
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use codesync_ir::{LayoutRect, NodeKind};

    fn text_node(family: &str, weight: f64, italic: bool) -> IrNode {
        let mut node = IrNode::new("Label", NodeKind::Text, LayoutRect::default());
        node.text = Some(TextPayload {
            characters: "Hi".into(),
            font_family: Some(family.into()),
            font_weight: Some(weight),
            font_style: italic.then(|| "italic".to_string()),
            ..Default::default()
        });
        node
    }

    #[test]
    fn test_weight_thresholds() {
        assert_eq!(style_label(900.0, false), "Bold");
        assert_eq!(style_label(700.0, false), "Bold");
        assert_eq!(style_label(699.0, false), "SemiBold");
        assert_eq!(style_label(600.0, false), "SemiBold");
        assert_eq!(style_label(500.0, false), "Medium");
        assert_eq!(style_label(400.0, false), "Regular");
        assert_eq!(style_label(300.0, false), "Light");
        assert_eq!(style_label(100.0, false), "Regular");
        assert_eq!(style_label(700.0, true), "Bold Italic");
    }

    #[test]
    fn test_fractional_weights() {
        assert_eq!(style_label(450.5, false), "Regular");
        assert_eq!(style_label(699.9, false), "SemiBold");
        assert_eq!(style_label(500.0001, true), "Medium Italic");
    }

    #[test]
    fn test_text_defaults() {
        let (primary, base) = text_fonts(&TextPayload::default());
        assert_eq!(primary, FontName::new("Inter", "Regular"));
        assert_eq!(base, None);

        let zero_weight = TextPayload {
            font_weight: Some(0.0),
            font_family: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(text_fonts(&zero_weight).0, FontName::new("Inter", "Regular"));
    }

    #[test]
    fn test_collect_dedupes_in_preorder() {
        let mut root = IrNode::new("Root", NodeKind::Frame, LayoutRect::default());
        let mut group = IrNode::new("Group", NodeKind::Frame, LayoutRect::default());
        group.children.push(text_node("Roboto", 700.0, true));
        root.children.push(text_node("Inter", 400.0, false));
        root.children.push(group);
        root.children.push(text_node("Inter", 450.0, false));
        root.children.push(text_node("Roboto", 700.0, false));

        let plan = collect_fonts(&root);
        assert_eq!(
            plan.fonts(),
            &[
                FontName::new("Inter", "Regular"),
                FontName::new("Roboto", "Bold Italic"),
                FontName::new("Roboto", "Bold"),
            ]
        );
    }

    #[test]
    fn test_collect_without_text_is_empty() {
        let root = IrNode::new("Root", NodeKind::Frame, LayoutRect::default());
        assert!(collect_fonts(&root).is_empty());
    }

    #[test]
    fn test_resolve_prefers_styled_then_base_then_default() {
        let italic = text_node("Roboto", 700.0, true).text.unwrap();
        let mut table = FontTable::new(FontName::default());
        assert_eq!(table.resolve(&italic), None);

        table.mark_loaded(FontName::default());
        assert_eq!(table.resolve(&italic), Some(FontName::default()));

        table.mark_loaded(FontName::new("Roboto", "Bold"));
        assert_eq!(table.resolve(&italic), Some(FontName::new("Roboto", "Bold")));

        table.mark_loaded(FontName::new("Roboto", "Bold Italic"));
        assert_eq!(
            table.resolve(&italic),
            Some(FontName::new("Roboto", "Bold Italic"))
        );
    }
}
