//! # Export Module
//!
//! Serializes a canvas subtree back into a JSON-ready description, including
//! the round-trip metadata written during import.

use crate::errors::{SyncError, SyncResult};
use crate::host::{Canvas, HostNodeKind};
use crate::types::{CornerRadii, Effect, NodeId, Paint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One exported node. Attribute groups the node does not expose are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HostNodeKind,
    pub id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_data: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fills: Option<Vec<Paint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<Vec<Effect>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Only present when at least one corner is rounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<CornerRadii>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ExportedNode>>,
}

impl ExportedNode {
    /// Total nodes in this exported subtree.
    pub fn count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(ExportedNode::count)
            .sum::<usize>()
    }
}

/// Exports the first selected node, or fails with [`SyncError::NoSelection`].
pub fn export_selection(canvas: &dyn Canvas, namespace: &str) -> SyncResult<ExportedNode> {
    let selected = canvas
        .selection()
        .first()
        .copied()
        .ok_or(SyncError::NoSelection)?;
    export_node(canvas, selected, namespace)
}

/// Exports `id` and everything beneath it.
pub fn export_node(canvas: &dyn Canvas, id: NodeId, namespace: &str) -> SyncResult<ExportedNode> {
    let node = canvas.node(id).ok_or(SyncError::NodeNotFound(id))?;

    let keys = node.shared_data_keys(namespace);
    let plugin_data = (!keys.is_empty()).then(|| {
        keys.into_iter()
            .map(|key| {
                let value = node.shared_data(namespace, &key).unwrap_or_default();
                (key, value)
            })
            .collect::<BTreeMap<_, _>>()
    });

    let children = match node.children() {
        Some(ids) => Some(
            ids.iter()
                .map(|&child| export_node(canvas, child, namespace))
                .collect::<SyncResult<Vec<_>>>()?,
        ),
        None => None,
    };

    Ok(ExportedNode {
        name: node.name().to_string(),
        kind: node.kind(),
        id: node.id(),
        plugin_data,
        fills: node.fills().map(<[Paint]>::to_vec),
        effects: node.effects().map(<[Effect]>::to_vec),
        opacity: node.opacity(),
        border_radius: node.corner_radii().filter(|radii| !radii.is_zero()),
        children,
    })
}
