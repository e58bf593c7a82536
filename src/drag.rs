//! Drag model: the ephemeral pointer gesture tracked by the scene store.
//!
//! `DragState` describes an in-progress gesture between pointer-down and
//! pointer-up. It is never part of a history snapshot, so undo/redo leaves it
//! alone. `DragUpdate` carries a sparse merge from the drag controller.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use serde::{Deserialize, Serialize};

use crate::component::ComponentId;
use crate::viewport::Point;

/// Which gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragKind {
    /// Dragging a palette template onto the canvas.
    Create,
    /// Moving existing components (idle baseline).
    #[default]
    Move,
    /// Resizing via a handle.
    Resize,
    /// Rotating via the rotate handle.
    Rotate,
}

/// In-progress gesture state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    /// True between gesture start and completion/cancel.
    pub is_dragging: bool,
    /// Gesture kind.
    pub drag_type: DragKind,
    /// Collaborator-defined payload (e.g. the palette template being created).
    pub drag_data: Option<serde_json::Value>,
    /// Screen position where the gesture started.
    pub start_position: Option<Point>,
    /// Latest screen position of the gesture.
    pub current_position: Option<Point>,
    /// Component the gesture acts on, if any.
    pub target_component: Option<ComponentId>,
}

impl DragState {
    /// Merge the present fields of `update` into this state.
    pub fn merge(&mut self, update: DragUpdate) {
        if let Some(dragging) = update.is_dragging {
            self.is_dragging = dragging;
        }
        if let Some(kind) = update.drag_type {
            self.drag_type = kind;
        }
        if let Some(data) = update.drag_data {
            self.drag_data = Some(data);
        }
        if let Some(start) = update.start_position {
            self.start_position = Some(start);
        }
        if let Some(current) = update.current_position {
            self.current_position = Some(current);
        }
        if let Some(target) = update.target_component {
            self.target_component = Some(target);
        }
    }

    /// Whether this is the idle baseline.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Sparse update for `DragState`. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragUpdate {
    pub is_dragging: Option<bool>,
    pub drag_type: Option<DragKind>,
    pub drag_data: Option<serde_json::Value>,
    pub start_position: Option<Point>,
    pub current_position: Option<Point>,
    pub target_component: Option<ComponentId>,
}
