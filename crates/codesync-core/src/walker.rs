//! # Walker Module
//!
//! Materializes an IR tree into canvas nodes.
//!
//! ## Responsibilities
//! - **Dispatch**: One creation path per IR kind; unknown kinds become plain frames.
//! - **Geometry**: Converts absolute IR coordinates to parent-relative positions.
//! - **Styling**: Hands each node to the style applicator.
//! - **Metadata**: Writes round-trip entries into the namespaced shared-data store.
//!
//! The walk is pre-order and depth-first: a node is fully created, named,
//! styled, tagged and appended before any of its children, and children are
//! created in IR order.

use crate::color::parse_optional_color;
use crate::fonts::FontTable;
use crate::host::{AutoLayoutProps, Canvas, Capability, HostNodeKind, SceneNode, TextProps};
use crate::style::apply_styles;
use crate::types::{NodeId, Paint, Rgb};
use codesync_ir::{
    AutoLayout, CounterAlign, IrNode, LayoutDirection, NodeKind, PrimaryAlign, TextAlign,
    TextDecoration, TextPayload, TextTruncation,
};
use kurbo::Point;
use tracing::{debug, instrument, warn};

/// Shared-data key holding the IR node kind.
pub const KEY_IR_TYPE: &str = "irType";
/// Shared-data key holding the originating markup tag.
pub const KEY_HTML_TAG: &str = "htmlTag";
/// Shared-data key holding the component reference id.
pub const KEY_COMPONENT_REF: &str = "componentRef";

pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Fill used when vector markup is missing or fails to parse.
const VECTOR_PLACEHOLDER: Rgb = Rgb {
    r: 0.85,
    g: 0.85,
    b: 0.85,
};

/// Everything the walker needs from the current session.
pub struct MaterializeContext<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub fonts: &'a FontTable,
    pub namespace: &'a str,
}

/// Where a node's children go.
enum ChildPolicy {
    /// Children are not materialized (leaf kinds).
    Skip,
    /// Children are appended to the created node.
    Append,
    /// Children are created but never appended to the created node.
    Detached,
}

fn child_policy(kind: &NodeKind) -> ChildPolicy {
    match kind {
        NodeKind::Text | NodeKind::Rectangle | NodeKind::Ellipse | NodeKind::Vector => {
            ChildPolicy::Skip
        }
        // Section children keep section-relative positions but are left on the
        // page instead of being attached to the section.
        NodeKind::Section => ChildPolicy::Detached,
        NodeKind::Frame
        | NodeKind::AutoLayout
        | NodeKind::Component
        | NodeKind::Image
        | NodeKind::Instance
        | NodeKind::Group
        | NodeKind::Unknown(_) => ChildPolicy::Append,
    }
}

/// Materializes `root` onto the current page and returns the created root node.
#[instrument(level = "debug", skip_all, fields(root = %root.name))]
pub fn materialize_tree(ctx: &mut MaterializeContext<'_>, root: &IrNode) -> NodeId {
    let page = ctx.canvas.current_page();
    materialize_node(ctx, root, Some(page), Point::ZERO)
}

/// Materializes one node and its subtree.
///
/// `origin` is the absolute position of the geometric parent; the node is
/// placed at its own absolute position minus `origin`.
pub fn materialize_node(
    ctx: &mut MaterializeContext<'_>,
    ir: &IrNode,
    parent: Option<NodeId>,
    origin: Point,
) -> NodeId {
    let id = match &ir.kind {
        NodeKind::Text => create_text(ctx, ir),
        NodeKind::Rectangle => ctx.canvas.create_node(HostNodeKind::Rectangle),
        NodeKind::Ellipse => ctx.canvas.create_node(HostNodeKind::Ellipse),
        NodeKind::Vector => create_vector(ctx, ir),
        NodeKind::Component => create_component(ctx, ir),
        NodeKind::AutoLayout => create_auto_layout(ctx, ir),
        NodeKind::Section => ctx.canvas.create_node(HostNodeKind::Section),
        NodeKind::Frame
        | NodeKind::Image
        | NodeKind::Group
        | NodeKind::Instance
        | NodeKind::Unknown(_) => create_frame(ctx, ir),
    };

    if let Some(node) = ctx.canvas.node_mut(id) {
        place(node, ir, origin);
        node.set_name(&ir.name);

        if let Some(styles) = &ir.styles {
            apply_styles(node, styles);
        }

        if let Some(rotation) = ir.effective_rotation().filter(|r| *r != 0.0) {
            if node.supports(Capability::Rotation) {
                node.set_rotation(rotation);
            }
        }

        write_metadata(node, ir, ctx.namespace);
    }

    if let Some(parent) = parent {
        if !ctx.canvas.append_child(parent, id) {
            debug!(parent, child = id, "parent does not accept children");
        }
    }

    let child_origin = Point::new(ir.layout.x, ir.layout.y);
    match child_policy(&ir.kind) {
        ChildPolicy::Skip => {
            if !ir.children.is_empty() {
                debug!(node = %ir.name, count = ir.children.len(), "leaf node children ignored");
            }
        }
        ChildPolicy::Append => {
            for child in &ir.children {
                materialize_node(ctx, child, Some(id), child_origin);
            }
        }
        ChildPolicy::Detached => {
            for child in &ir.children {
                materialize_node(ctx, child, None, child_origin);
            }
        }
    }

    id
}

/// Positions the node relative to `origin` and sizes it (at least 1x1).
fn place(node: &mut dyn SceneNode, ir: &IrNode, origin: Point) {
    let offset = Point::new(ir.layout.x, ir.layout.y) - origin;
    node.set_position(offset.x, offset.y);
    node.resize(ir.layout.width.max(1.0), ir.layout.height.max(1.0));
}

/// Writes caller-supplied metadata plus the engine-owned keys. Empty values are skipped.
pub fn write_metadata(node: &mut dyn SceneNode, ir: &IrNode, namespace: &str) {
    for (key, value) in &ir.plugin_data {
        if !value.is_empty() {
            node.set_shared_data(namespace, key, value);
        }
    }

    node.set_shared_data(namespace, KEY_IR_TYPE, ir.kind.as_str());
    if let Some(tag) = ir.html_tag.as_deref().filter(|t| !t.is_empty()) {
        node.set_shared_data(namespace, KEY_HTML_TAG, tag);
    }
    if let Some(reference) = ir.component_ref.as_deref().filter(|r| !r.is_empty()) {
        node.set_shared_data(namespace, KEY_COMPONENT_REF, reference);
    }
}

fn create_frame(ctx: &mut MaterializeContext<'_>, ir: &IrNode) -> NodeId {
    let id = ctx.canvas.create_node(HostNodeKind::Frame);
    if let Some(node) = ctx.canvas.node_mut(id) {
        node.set_fills(Vec::new());
        if ir.clips_content {
            node.set_clips_content(true);
        }
    }
    id
}

fn create_auto_layout(ctx: &mut MaterializeContext<'_>, ir: &IrNode) -> NodeId {
    let id = create_frame(ctx, ir);
    if let (Some(layout), Some(node)) = (&ir.auto_layout, ctx.canvas.node_mut(id)) {
        match auto_layout_props(layout, true) {
            Some(props) => node.set_auto_layout(props),
            None => debug!(node = %ir.name, "unknown layout direction, auto-layout skipped"),
        }
    }
    id
}

fn create_component(ctx: &mut MaterializeContext<'_>, ir: &IrNode) -> NodeId {
    let id = ctx.canvas.create_node(HostNodeKind::Component);
    if let Some(node) = ctx.canvas.node_mut(id) {
        node.set_fills(Vec::new());
        if let Some(props) = ir.auto_layout.as_ref().and_then(|l| auto_layout_props(l, false)) {
            node.set_auto_layout(props);
        }
    }
    id
}

/// Components only take direction, spacing and padding; alignment and wrap
/// are left at the canvas defaults. Unrecognized alignments leave the
/// canvas value alone; an unrecognized direction yields no props at all.
fn auto_layout_props(layout: &AutoLayout, full: bool) -> Option<AutoLayoutProps> {
    if layout.direction == LayoutDirection::Other {
        return None;
    }
    let primary = layout.primary_align.unwrap_or_default();
    let counter = layout.counter_align.unwrap_or_default();
    Some(AutoLayoutProps {
        layout_mode: layout.direction,
        item_spacing: layout.spacing,
        padding_top: layout.padding_top,
        padding_right: layout.padding_right,
        padding_bottom: layout.padding_bottom,
        padding_left: layout.padding_left,
        primary_axis_align: (full && primary != PrimaryAlign::Other).then_some(primary),
        counter_axis_align: (full && counter != CounterAlign::Other).then_some(counter),
        wrap: full && layout.wrap,
    })
}

fn create_vector(ctx: &mut MaterializeContext<'_>, ir: &IrNode) -> NodeId {
    if let Some(svg) = ir.svg_data.as_ref().filter(|svg| !svg.markup.is_empty()) {
        match ctx.canvas.create_node_from_svg(&svg.markup) {
            Ok(id) => return id,
            Err(err) => warn!(node = %ir.name, error = %err, "SVG parse failed, falling back to frame"),
        }
    }

    let id = ctx.canvas.create_node(HostNodeKind::Frame);
    if let Some(node) = ctx.canvas.node_mut(id) {
        node.set_fills(vec![Paint::solid(VECTOR_PLACEHOLDER, 0.5)]);
    }
    id
}

fn create_text(ctx: &mut MaterializeContext<'_>, ir: &IrNode) -> NodeId {
    let id = ctx.canvas.create_node(HostNodeKind::Text);
    let empty = TextPayload::default();
    let text = ir.text.as_ref().unwrap_or(&empty);
    let font = ctx.fonts.resolve(text);

    if let Some(node) = ctx.canvas.node_mut(id) {
        match font {
            Some(font) => node.set_font(font),
            None => warn!(node = %ir.name, "no font available, keeping current font"),
        }

        node.set_text(text_props(text));

        if let Some(color) = parse_optional_color(text.color.as_deref()) {
            node.set_fills(vec![Paint::solid(color.rgb(), color.a)]);
        }
    }
    id
}

fn text_props(text: &TextPayload) -> TextProps {
    TextProps {
        characters: text.characters.clone(),
        font_size: text
            .font_size
            .filter(|size| *size != 0.0)
            .unwrap_or(DEFAULT_FONT_SIZE),
        line_height: text.line_height.filter(|h| *h != 0.0),
        letter_spacing: text.letter_spacing.filter(|s| *s != 0.0),
        align: text.text_align.filter(|a| *a != TextAlign::Other),
        decoration: text.text_decoration.filter(|d| *d != TextDecoration::Other),
        truncation: text.truncation.filter(|t| *t != TextTruncation::Other),
        max_lines: text.max_lines.filter(|n| *n != 0),
    }
}

/// Number of nodes in the IR tree, counting the root.
pub fn count_nodes(ir: &IrNode) -> usize {
    1 + ir.children.iter().map(count_nodes).sum::<usize>()
}
