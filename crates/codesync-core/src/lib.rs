//! # Codesync Core
//!
//! `codesync-core` turns a design IR tree (produced by a DOM extractor) into
//! nodes on a vector design canvas, and reads those nodes back out.
//!
//! The engine never owns the canvas. Everything it does goes through the
//! [`Canvas`] and [`SceneNode`] traits, so it can drive a real editor through
//! a binding layer or the in-process [`MemoryCanvas`] used by tests and the CLI.
//!
//! ## Core Features
//!
//! *   **Color Parsing**: Named, hex, `rgb()`/`rgba()` and `hsl()`/`hsla()` strings.
//! *   **Paints**: Solid fills and linear, radial and angular gradients.
//! *   **Effects**: Drop/inner shadows and layer/background blurs.
//! *   **Fonts**: Weight/style to font-style mapping, loaded once per import with fallback.
//! *   **Round-trip Metadata**: IR bookkeeping stored in namespaced shared data.
//! *   **Messaging**: A `crossbeam_channel` session speaking the UI's JSON protocol.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use codesync_core::{MemoryCanvas, Session, SessionConfig};
//! use codesync_ir::IrNode;
//!
//! let (tx, rx) = crossbeam_channel::unbounded();
//! let mut session = Session::new(MemoryCanvas::new(), SessionConfig::from_env(), tx);
//!
//! let ir: IrNode = serde_json::from_str(r#"{"figmaName":"Card","figmaType":"FRAME"}"#)?;
//! let report = session.import(&ir);
//! assert_eq!(report.node_count, 1);
//!
//! for message in rx.try_iter() {
//!     println!("{}", serde_json::to_string(&message)?);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Color string parsing.
pub mod color;

/// IR fill specs to canvas paints.
pub mod paint;

/// IR effect specs to canvas effects.
pub mod effects;

/// Font key resolution and batched font loading.
pub mod fonts;

/// The traits the engine drives: `Canvas` and `SceneNode`.
pub mod host;

/// In-process canvas implementation.
pub mod memory;

/// Applies an IR style bundle to one node.
pub mod style;

/// IR tree materialization and round-trip metadata.
pub mod walker;

/// Canvas subtree export.
pub mod export;

/// UI message protocol and import/export orchestration.
pub mod session;

/// Shared data structures used across the engine.
pub mod types;

pub mod errors;

pub use errors::{SyncError, SyncResult};
pub use export::ExportedNode;
pub use host::{Canvas, Capability, HostNodeKind, SceneNode};
pub use memory::MemoryCanvas;
pub use session::{PluginMessage, Session, SessionConfig, UiMessage};
