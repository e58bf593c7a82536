//! State core for a canvas-based scene editor.
//!
//! This crate owns the structured state behind the editor: which components
//! exist, where they are, how they are layered, what is selected or on the
//! clipboard, and a bounded undo/redo history of full-scene snapshots. It does
//! no rendering and no I/O; the UI layer calls the mutation API and reads the
//! resulting state back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`scene`] | `SceneState` aggregate and the mutable [`scene::SceneStore`] |
//! | [`component`] | Component entity, ids, transform, create options, sparse updates |
//! | [`viewport`] | Viewport parameters and screen/canvas conversions |
//! | [`selection`] | Derived selection view |
//! | [`drag`] | Ephemeral drag gesture state |
//! | [`history`] | Snapshot-based undo/redo engine |
//! | [`debounce`] | Deadline-based debouncer driving coalesced pushes |
//! | [`snapshot`] | JSON export/import with validation |
//! | [`editor`] | [`editor::Editor`] facade tying scene and history together |
//! | [`config`] | Environment-driven configuration |
//! | [`consts`] | Shared constants (scale limits, defaults, copy offset) |

pub mod component;
pub mod config;
pub mod consts;
pub mod debounce;
pub mod drag;
pub mod editor;
pub mod history;
pub mod scene;
pub mod selection;
pub mod snapshot;
pub mod viewport;
