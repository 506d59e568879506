//! # Session Module
//!
//! The message channel between the UI and the engine.
//!
//! ## Responsibilities
//! - **Inbound**: Decodes [`PluginMessage`]s (`import-ir`, `export-tree`, `close`).
//! - **Orchestration**: Runs the two-phase import (fonts, then nodes) and the export walk.
//! - **Outbound**: Posts [`UiMessage`]s on a `crossbeam_channel` sender.
//!
//! Messages are processed one at a time; a session never overlaps imports.

use crate::errors::{SyncError, SyncResult};
use crate::export::{export_selection, ExportedNode};
use crate::fonts::{collect_fonts, load_fonts, FontPlan};
use crate::host::Canvas;
use crate::types::{FontName, NodeId};
use crate::walker::{count_nodes, materialize_tree, MaterializeContext};
use codesync_ir::IrNode;
use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

pub const DEFAULT_NAMESPACE: &str = "figma-code-sync";

/// Environment variable overriding the shared-data namespace.
pub const NAMESPACE_ENV: &str = "CODESYNC_NAMESPACE";

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Namespace for every shared-data entry the engine reads or writes.
    pub namespace: String,
    /// Font used when a requested font cannot be loaded.
    pub default_font: FontName,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_font: FontName::default(),
        }
    }
}

impl SessionConfig {
    /// Defaults, with the namespace taken from `CODESYNC_NAMESPACE` when set and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(namespace) = std::env::var(NAMESPACE_ENV) {
            if !namespace.is_empty() {
                config.namespace = namespace;
            }
        }
        config
    }
}

/// UI -> engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PluginMessage {
    ImportIr { payload: Box<IrNode> },
    ExportTree,
    Close,
}

/// Engine -> UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiMessage {
    Status {
        text: String,
    },
    ImportComplete {
        #[serde(rename = "nodeCount")]
        node_count: usize,
    },
    Error {
        text: String,
    },
    ExportResult {
        data: ExportedNode,
    },
}

/// What an import produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub root: NodeId,
    pub node_count: usize,
    pub fonts: FontPlan,
}

pub struct Session<C: Canvas> {
    canvas: C,
    config: SessionConfig,
    outbox: Sender<UiMessage>,
    open: bool,
}

impl<C: Canvas> Session<C> {
    pub fn new(canvas: C, config: SessionConfig, outbox: Sender<UiMessage>) -> Self {
        Self {
            canvas,
            config,
            outbox,
            open: true,
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Decodes a raw JSON message and handles it.
    pub fn handle_json(&mut self, raw: &str) -> SyncResult<()> {
        let message: PluginMessage = serde_json::from_str(raw)?;
        self.handle(message)
    }

    pub fn handle(&mut self, message: PluginMessage) -> SyncResult<()> {
        if !self.open {
            warn!("session closed, dropping message");
            return Ok(());
        }

        match message {
            PluginMessage::ImportIr { payload } => {
                self.import(&payload);
                Ok(())
            }
            PluginMessage::ExportTree => self.export().map(|_| ()),
            PluginMessage::Close => {
                self.close();
                Ok(())
            }
        }
    }

    /// Loads every font the tree needs, materializes it on the current page,
    /// then selects and reveals the new root.
    #[instrument(skip_all, fields(root = %root.name))]
    pub fn import(&mut self, root: &IrNode) -> ImportReport {
        self.post(UiMessage::Status {
            text: "Loading fonts...".to_string(),
        });
        let plan = collect_fonts(root);
        let table = load_fonts(&mut self.canvas, &plan, &self.config.default_font);

        self.post(UiMessage::Status {
            text: "Creating nodes...".to_string(),
        });
        let mut ctx = MaterializeContext {
            canvas: &mut self.canvas,
            fonts: &table,
            namespace: &self.config.namespace,
        };
        let created = materialize_tree(&mut ctx, root);

        self.canvas.set_selection(vec![created]);
        self.canvas.scroll_into_view(&[created]);

        let node_count = count_nodes(root);
        info!(node_count, fonts = plan.len(), "import complete");
        self.post(UiMessage::ImportComplete { node_count });

        ImportReport {
            root: created,
            node_count,
            fonts: plan,
        }
    }

    /// Exports the current selection and posts it to the UI.
    pub fn export(&mut self) -> SyncResult<ExportedNode> {
        match export_selection(&self.canvas, &self.config.namespace) {
            Ok(data) => {
                info!(root = %data.name, nodes = data.count(), "export complete");
                self.post(UiMessage::ExportResult { data: data.clone() });
                Ok(data)
            }
            Err(err @ SyncError::NoSelection) => {
                self.post(UiMessage::Error {
                    text: err.to_string(),
                });
                Err(err)
            }
            Err(err) => {
                error!(error = %err, "export failed");
                Err(err)
            }
        }
    }

    pub fn close(&mut self) {
        debug!("closing session");
        self.open = false;
        self.canvas.close();
    }

    fn post(&self, message: UiMessage) {
        if let Err(err) = self.outbox.send(message) {
            warn!(error = %err, "UI channel disconnected");
        }
    }
}
