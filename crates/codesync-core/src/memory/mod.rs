//! # Memory Canvas
//!
//! An in-process [`Canvas`] that keeps every node in an arena.
//!
//! It behaves like the real canvas where the engine can observe it: new nodes
//! appear on the current page, `append_child` re-parents, fonts load only if
//! installed, and vector markup goes through a real SVG parser (`usvg`).
//! Tests and the CLI drive the engine through it.

pub mod node;

pub use node::{kind_capabilities, MemoryNode};

use crate::host::{Canvas, Capability, HostNodeKind, SceneNode};
use crate::types::{FontName, NodeId};
use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Which fonts [`MemoryCanvas::load_font`] will accept.
#[derive(Debug, Clone)]
pub enum FontAvailability {
    All,
    Only(HashSet<FontName>),
}

#[derive(Debug, Clone)]
pub struct MemoryCanvas {
    /// Node arena, indexed by `NodeId`.
    pub nodes: Vec<MemoryNode>,
    page: NodeId,
    selection: Vec<NodeId>,
    viewport: Vec<NodeId>,
    fonts: FontAvailability,
    loaded_fonts: Vec<FontName>,
    font_requests: Vec<FontName>,
    closed: bool,
}

impl Default for MemoryCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCanvas {
    /// A canvas with one empty page where every font is installed.
    pub fn new() -> Self {
        Self {
            nodes: vec![MemoryNode::new(0, HostNodeKind::Page)],
            page: 0,
            selection: Vec::new(),
            viewport: Vec::new(),
            fonts: FontAvailability::All,
            loaded_fonts: Vec::new(),
            font_requests: Vec::new(),
            closed: false,
        }
    }

    /// A canvas where only the listed fonts are installed.
    pub fn with_fonts(fonts: impl IntoIterator<Item = FontName>) -> Self {
        Self {
            fonts: FontAvailability::Only(fonts.into_iter().collect()),
            ..Self::new()
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(id)
    }

    /// Finds the first node with the given name, in creation order.
    pub fn find_by_name(&self, name: &str) -> Option<&MemoryNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn page_children(&self) -> &[NodeId] {
        &self.nodes[self.page].children
    }

    /// Fonts that loaded successfully, in load order.
    pub fn loaded_fonts(&self) -> &[FontName] {
        &self.loaded_fonts
    }

    /// Every font requested, successful or not, in request order.
    pub fn font_requests(&self) -> &[FontName] {
        &self.font_requests
    }

    pub fn viewport(&self) -> &[NodeId] {
        &self.viewport
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn push_node(&mut self, kind: HostNodeKind) -> NodeId {
        let id = self.nodes.len();
        let mut node = MemoryNode::new(id, kind);
        node.parent = Some(self.page);
        self.nodes.push(node);
        self.nodes[self.page].children.push(id);
        id
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(old_parent) = self.nodes.get(child).and_then(|n| n.parent) {
            if let Some(p_node) = self.nodes.get_mut(old_parent) {
                p_node.children.retain(|&c| c != child);
            }
        }
    }
}

impl Canvas for MemoryCanvas {
    fn create_node(&mut self, kind: HostNodeKind) -> NodeId {
        self.push_node(kind)
    }

    /// Parses the markup with `usvg`; the result is a frame sized to the SVG
    /// holding a single vector child.
    #[instrument(level = "debug", skip_all, fields(len = markup.len()))]
    fn create_node_from_svg(&mut self, markup: &str) -> Result<NodeId> {
        let options = usvg::Options::default();
        let tree = usvg::Tree::from_data(markup.as_bytes(), &options)
            .context("failed to parse SVG markup")?;
        let size = tree.size();

        let frame = self.push_node(HostNodeKind::Frame);
        self.nodes[frame].name = "svg".to_string();
        self.nodes[frame].fills.clear();
        self.nodes[frame].resize(size.width() as f64, size.height() as f64);

        let vector = self.push_node(HostNodeKind::Vector);
        self.nodes[vector].resize(size.width() as f64, size.height() as f64);
        self.append_child(frame, vector);

        debug!(frame, vector, "svg node created");
        Ok(frame)
    }

    fn load_font(&mut self, font: &FontName) -> Result<()> {
        self.font_requests.push(font.clone());
        let installed = match &self.fonts {
            FontAvailability::All => true,
            FontAvailability::Only(fonts) => fonts.contains(font),
        };
        if !installed {
            return Err(anyhow!("font \"{}\" is not installed", font));
        }
        if !self.loaded_fonts.contains(font) {
            self.loaded_fonts.push(font.clone());
        }
        Ok(())
    }

    fn node(&self, id: NodeId) -> Option<&dyn SceneNode> {
        self.nodes.get(id).map(|n| n as &dyn SceneNode)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut dyn SceneNode> {
        self.nodes.get_mut(id).map(|n| n as &mut dyn SceneNode)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent == child || child >= self.nodes.len() {
            return false;
        }
        match self.nodes.get(parent) {
            Some(p_node) if p_node.supports(Capability::Children) => {}
            _ => return false,
        }

        self.detach(child);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        true
    }

    fn current_page(&self) -> NodeId {
        self.page
    }

    fn selection(&self) -> Vec<NodeId> {
        self.selection.clone()
    }

    fn set_selection(&mut self, nodes: Vec<NodeId>) {
        self.selection = nodes;
    }

    fn scroll_into_view(&mut self, nodes: &[NodeId]) {
        self.viewport = nodes.to_vec();
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
