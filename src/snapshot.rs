//! Snapshot codec: JSON export/import of `SceneState`.
//!
//! Export is a straight serde dump. Import is the one place where the core
//! reports an error: a payload that parses but would break scene invariants
//! (duplicate ids, negative sizes, dangling selection) is rejected whole
//! rather than loaded partially.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::component::{Component, ComponentId};
use crate::consts::{MAX_SCALE, MIN_SCALE};
use crate::scene::{SceneState, SceneStore};

/// Error returned when a snapshot cannot be encoded or loaded.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The payload is not valid JSON for a scene.
    #[error("failed to decode scene: {0}")]
    Decode(#[from] serde_json::Error),
    /// The scene could not be serialized.
    #[error("failed to encode scene: {0}")]
    Encode(#[source] serde_json::Error),
    /// Two components share an id, or an imported id already exists.
    #[error("duplicate component id: {0}")]
    DuplicateId(ComponentId),
    /// A selected id does not name a component in the scene.
    #[error("selected id not in scene: {0}")]
    UnknownSelection(ComponentId),
    /// A container lists a child id that does not exist.
    #[error("container {parent} references unknown child {child}")]
    UnknownChild { parent: ComponentId, child: ComponentId },
    #[error("invalid transform on {id}: {reason}")]
    InvalidTransform { id: ComponentId, reason: &'static str },
    #[error("invalid opacity on {id}: {value}")]
    InvalidOpacity { id: ComponentId, value: f64 },
    #[error("invalid viewport: {0}")]
    InvalidViewport(&'static str),
}

/// How an imported scene is merged into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Replace the current scene (viewport, grid, components, selection)
    /// instead of appending the imported components.
    pub replace_existing: bool,
    /// Keep the ids from the payload instead of generating fresh ones.
    pub preserve_ids: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self { replace_existing: true, preserve_ids: true }
    }
}

impl SceneState {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(SnapshotError::Encode)
    }

    /// Parse and validate a scene from JSON.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let state: SceneState = serde_json::from_str(raw)?;
        state.validate()?;
        Ok(state)
    }

    /// Check every invariant a loaded scene must hold.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let vp = &self.viewport;
        if !(vp.width.is_finite() && vp.height.is_finite() && vp.width >= 0.0 && vp.height >= 0.0) {
            return Err(SnapshotError::InvalidViewport("canvas size must be finite and non-negative"));
        }
        if !(MIN_SCALE..=MAX_SCALE).contains(&vp.scale) {
            return Err(SnapshotError::InvalidViewport("scale out of range"));
        }
        if !(vp.offset_x.is_finite() && vp.offset_y.is_finite()) {
            return Err(SnapshotError::InvalidViewport("offset must be finite"));
        }
        if !(self.grid.grid_size.is_finite() && self.grid.grid_size >= 0.0) {
            return Err(SnapshotError::InvalidViewport("grid size must be finite and non-negative"));
        }

        let mut seen = HashSet::new();
        for component in &self.components {
            if !seen.insert(&component.id) {
                return Err(SnapshotError::DuplicateId(component.id.clone()));
            }
            validate_component(component)?;
        }
        for component in &self.components {
            if let Some(child) = component.children.iter().find(|c| !seen.contains(c)) {
                return Err(SnapshotError::UnknownChild { parent: component.id.clone(), child: child.clone() });
            }
        }
        if let Some(id) = self.selected_ids.iter().find(|id| !seen.contains(id)) {
            return Err(SnapshotError::UnknownSelection((*id).clone()));
        }
        for component in &self.clipboard {
            validate_component(component)?;
        }
        Ok(())
    }
}

fn validate_component(component: &Component) -> Result<(), SnapshotError> {
    let t = &component.transform;
    let invalid = |reason| SnapshotError::InvalidTransform { id: component.id.clone(), reason };
    let all_finite = [t.x, t.y, t.width, t.height, t.rotation, t.scale_x, t.scale_y]
        .iter()
        .all(|v| v.is_finite());
    if !all_finite {
        return Err(invalid("non-finite value"));
    }
    if t.width < 0.0 || t.height < 0.0 {
        return Err(invalid("negative size"));
    }
    if !(0.0..=1.0).contains(&component.opacity) {
        return Err(SnapshotError::InvalidOpacity { id: component.id.clone(), value: component.opacity });
    }
    Ok(())
}

impl SceneStore {
    /// Serialize the current scene to JSON.
    pub fn export_json(&self) -> Result<String, SnapshotError> {
        self.state().to_json()
    }

    /// Load a JSON scene. Returns the ids of the imported components.
    ///
    /// Nothing is changed when the payload is rejected.
    pub fn import_json(&mut self, raw: &str, options: ImportOptions) -> Result<Vec<ComponentId>, SnapshotError> {
        let result = SceneState::from_json(raw).and_then(|incoming| self.import_state(incoming, options));
        if let Err(ref e) = result {
            warn!(error = %e, "scene import rejected");
        }
        result
    }

    fn import_state(&mut self, mut incoming: SceneState, options: ImportOptions) -> Result<Vec<ComponentId>, SnapshotError> {
        if !options.preserve_ids {
            reassign_ids(&mut incoming);
        }
        let imported: Vec<ComponentId> = incoming.components.iter().map(|c| c.id.clone()).collect();

        if options.replace_existing {
            let clipboard = std::mem::take(&mut self.state_mut().clipboard);
            incoming.clipboard = clipboard;
            self.replace_state(incoming);
        } else {
            if let Some(dup) = imported.iter().find(|id| self.get_component(id).is_some()) {
                return Err(SnapshotError::DuplicateId(dup.clone()));
            }
            let mut state = self.state().clone();
            state.components.extend(incoming.components);
            state.selected_ids.clone_from(&imported);
            self.replace_state(state);
        }
        debug!(count = imported.len(), replace = options.replace_existing, "scene imported");
        Ok(imported)
    }
}

/// Give every component a fresh id, remapping child and selection references.
fn reassign_ids(state: &mut SceneState) {
    let mut remap: HashMap<ComponentId, ComponentId> = HashMap::new();
    for component in &mut state.components {
        let fresh = ComponentId::generate(component.kind);
        remap.insert(std::mem::replace(&mut component.id, fresh.clone()), fresh);
    }
    let lookup = |id: &ComponentId| remap.get(id).cloned().unwrap_or_else(|| id.clone());
    for component in &mut state.components {
        component.children = component.children.iter().map(lookup).collect();
    }
    state.selected_ids = state.selected_ids.iter().map(lookup).collect();
}
