//! Scene store: the canonical, mutable state of the canvas editor.
//!
//! `SceneState` is the aggregate root captured by history snapshots and the
//! JSON surface: viewport, grid flags, components, selection, and clipboard.
//! `SceneStore` wraps it together with the two pieces of state that are never
//! snapshotted (the derived `SelectionState` view and the ephemeral
//! `DragState`) and exposes every structural mutation.
//!
//! Lookups by id never fail loudly. A missing id yields `None`/`false` and the
//! store is left untouched, since UI callers routinely act on ids that were
//! removed a moment earlier.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::component::{Component, ComponentId, ComponentOptions, ComponentUpdate};
use crate::consts::{COPY_OFFSET, COPY_SUFFIX};
use crate::drag::{DragState, DragUpdate};
use crate::selection::{self, SelectionState};
use crate::viewport::{GridSettings, Point, Viewport};

/// Everything a history snapshot captures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneState {
    /// Page size, background, and pan/zoom.
    pub viewport: Viewport,
    /// Grid/ruler/snap display configuration.
    #[serde(default)]
    pub grid: GridSettings,
    /// Components in insertion order (not paint order).
    #[serde(default)]
    pub components: Vec<Component>,
    /// Selected ids in selection order.
    #[serde(default)]
    pub selected_ids: Vec<ComponentId>,
    /// Detached deep copies awaiting paste.
    #[serde(default)]
    pub clipboard: Vec<Component>,
}

impl SceneState {
    /// Empty scene with the given viewport and grid.
    #[must_use]
    pub fn new(viewport: Viewport, grid: GridSettings) -> Self {
        Self { viewport, grid, ..Self::default() }
    }

    /// Look up a component by id.
    #[must_use]
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components.iter().find(|c| &c.id == id)
    }

    fn position(&self, id: &ComponentId) -> Option<usize> {
        self.components.iter().position(|c| &c.id == id)
    }
}

/// Owner of the scene state plus the non-snapshotted selection view and drag state.
#[derive(Debug, Clone, Default)]
pub struct SceneStore {
    state: SceneState,
    selection: SelectionState,
    drag: DragState,
}

impl SceneStore {
    /// Create a store holding an empty default scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `state`.
    #[must_use]
    pub fn with_state(state: SceneState) -> Self {
        let mut store = Self { state, ..Self::default() };
        store.sync_selection();
        store
    }

    // --- Reads ---

    /// The full snapshot-able state.
    #[must_use]
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.state.viewport
    }

    #[must_use]
    pub fn grid(&self) -> &GridSettings {
        &self.state.grid
    }

    /// Components in insertion order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.state.components
    }

    #[must_use]
    pub fn selected_ids(&self) -> &[ComponentId] {
        &self.state.selected_ids
    }

    #[must_use]
    pub fn clipboard(&self) -> &[Component] {
        &self.state.clipboard
    }

    /// The derived selection view.
    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Look up a component by id.
    #[must_use]
    pub fn get_component(&self, id: &ComponentId) -> Option<&Component> {
        self.state.component(id)
    }

    /// Selected components, in insertion order.
    #[must_use]
    pub fn selected_components(&self) -> Vec<&Component> {
        self.state
            .components
            .iter()
            .filter(|c| self.state.selected_ids.contains(&c.id))
            .collect()
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.state.selected_ids.is_empty()
    }

    #[must_use]
    pub fn is_multi_selection(&self) -> bool {
        self.state.selected_ids.len() > 1
    }

    /// Components in paint order: `z_index` ascending, ties by insertion order.
    #[must_use]
    pub fn sorted_components(&self) -> Vec<&Component> {
        let mut sorted: Vec<&Component> = self.state.components.iter().collect();
        sorted.sort_by_key(|c| c.z_index);
        sorted
    }

    /// Number of components in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.components.len()
    }

    /// Returns `true` if the scene holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.components.is_empty()
    }

    // --- Viewport ---

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.state.viewport.width = width;
        self.state.viewport.height = height;
    }

    /// Set the background color, and the image when one is given.
    pub fn set_canvas_background(&mut self, color: impl Into<String>, image: Option<String>) {
        self.state.viewport.background_color = color.into();
        if image.is_some() {
            self.state.viewport.background_image = image;
        }
    }

    /// Set the zoom factor, clamped into `[0.1, 5.0]`.
    pub fn set_canvas_scale(&mut self, scale: f64) {
        self.state.viewport.set_scale(scale);
    }

    pub fn set_canvas_offset(&mut self, offset_x: f64, offset_y: f64) {
        self.state.viewport.offset_x = offset_x;
        self.state.viewport.offset_y = offset_y;
    }

    /// Replace the grid settings. Negative grid sizes are clamped to zero.
    pub fn set_grid(&mut self, grid: GridSettings) {
        self.state.grid = GridSettings { grid_size: grid.grid_size.max(0.0), ..grid };
    }

    /// Convert a screen-space point to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, x: f64, y: f64) -> Point {
        self.state.viewport.screen_to_canvas(Point::new(x, y))
    }

    /// Convert a canvas-space point to screen coordinates.
    #[must_use]
    pub fn canvas_to_screen(&self, x: f64, y: f64) -> Point {
        self.state.viewport.canvas_to_screen(Point::new(x, y))
    }

    // --- Components ---

    /// Create a component, append it, and select it exclusively.
    pub fn add_component(&mut self, options: impl Into<ComponentOptions>) -> Component {
        let component = options.into().build(self.state.components.len());
        debug!(id = %component.id, kind = %component.kind, z_index = component.z_index, "component added");
        self.state.components.push(component.clone());
        self.select_only(component.id.clone());
        component
    }

    /// Remove a component by id, returning it if it was present.
    ///
    /// The id is also dropped from the selection and from every container's
    /// child list. Children of a removed container stay in the scene.
    pub fn remove_component(&mut self, id: &ComponentId) -> Option<Component> {
        let removed = self.state.position(id).map(|index| self.state.components.remove(index));
        if let Some(ref component) = removed {
            for container in &mut self.state.components {
                if container.children.contains(id) {
                    container.children.retain(|child| child != id);
                    container.touch();
                }
            }
            debug!(id = %component.id, remaining = self.state.components.len(), "component removed");
        }
        if self.state.selected_ids.contains(id) {
            self.state.selected_ids.retain(|s| s != id);
            self.sync_selection();
        }
        removed
    }

    /// Shallow-merge `update` into a component. Returns false if the id is unknown.
    pub fn update_component(&mut self, id: &ComponentId, update: ComponentUpdate) -> bool {
        let Some(component) = self.state.components.iter_mut().find(|c| &c.id == id) else {
            return false;
        };
        update.apply_to(component);
        true
    }

    /// Copy a component with a fresh id and a +20/+20 offset, then select the copy.
    pub fn duplicate_component(&mut self, id: &ComponentId) -> Option<Component> {
        let duplicate = self
            .state
            .component(id)?
            .copy_with_offset(COPY_OFFSET, COPY_OFFSET, COPY_SUFFIX);
        debug!(source = %id, id = %duplicate.id, "component duplicated");
        self.state.components.push(duplicate.clone());
        self.select_only(duplicate.id.clone());
        Some(duplicate)
    }

    // --- Selection ---

    /// Select a component.
    ///
    /// Without `multiple` the selection becomes exactly `[id]`; with it, `id`
    /// is toggled in the existing selection. Unknown ids are ignored.
    pub fn select_component(&mut self, id: &ComponentId, multiple: bool) -> bool {
        if self.state.component(id).is_none() {
            return false;
        }
        if multiple {
            selection::toggle(&mut self.state.selected_ids, id);
            self.sync_selection();
        } else {
            self.select_only(id.clone());
        }
        true
    }

    /// Drop `id` from the selection, or clear it entirely when `id` is `None`.
    pub fn deselect_component(&mut self, id: Option<&ComponentId>) {
        match id {
            Some(id) => self.state.selected_ids.retain(|s| s != id),
            None => self.state.selected_ids.clear(),
        }
        self.sync_selection();
    }

    /// Select every component, in insertion order.
    pub fn select_all(&mut self) {
        self.state.selected_ids = self.state.components.iter().map(|c| c.id.clone()).collect();
        self.sync_selection();
    }

    pub fn clear_selection(&mut self) {
        self.deselect_component(None);
    }

    fn select_only(&mut self, id: ComponentId) {
        self.state.selected_ids = vec![id];
        self.sync_selection();
    }

    fn sync_selection(&mut self) {
        self.selection.sync(&self.state.selected_ids);
    }

    // --- Layering ---

    /// Move a component above every other one.
    pub fn bring_to_front(&mut self, id: &ComponentId) -> bool {
        let Some(max) = self.state.components.iter().map(|c| c.z_index).max() else {
            return false;
        };
        self.set_z_index(id, |_| max.saturating_add(1))
    }

    /// Move a component beneath every other one.
    pub fn send_to_back(&mut self, id: &ComponentId) -> bool {
        let Some(min) = self.state.components.iter().map(|c| c.z_index).min() else {
            return false;
        };
        self.set_z_index(id, |_| min.saturating_sub(1))
    }

    /// Raise a component by one step. May tie with a neighbor.
    pub fn bring_forward(&mut self, id: &ComponentId) -> bool {
        self.set_z_index(id, |z| z.saturating_add(1))
    }

    /// Lower a component by one step. May tie with a neighbor.
    pub fn send_backward(&mut self, id: &ComponentId) -> bool {
        self.set_z_index(id, |z| z.saturating_sub(1))
    }

    fn set_z_index(&mut self, id: &ComponentId, f: impl FnOnce(i64) -> i64) -> bool {
        let Some(component) = self.state.components.iter_mut().find(|c| &c.id == id) else {
            return false;
        };
        component.z_index = f(component.z_index);
        component.touch();
        true
    }

    // --- Clipboard ---

    /// Replace the clipboard with deep copies of `ids` (or the selection when
    /// `ids` is `None`). Returns the number of components copied.
    pub fn copy_components(&mut self, ids: Option<&[ComponentId]>) -> usize {
        let targets = ids.unwrap_or(&self.state.selected_ids);
        let copied: Vec<Component> = self
            .state
            .components
            .iter()
            .filter(|c| targets.contains(&c.id))
            .cloned()
            .collect();
        debug!(count = copied.len(), "components copied");
        self.state.clipboard = copied;
        self.state.clipboard.len()
    }

    /// Paste a fresh copy of every clipboard entry and select exactly the pasted set.
    pub fn paste_components(&mut self) -> Vec<Component> {
        let pasted: Vec<Component> = self
            .state
            .clipboard
            .iter()
            .map(|c| c.copy_with_offset(COPY_OFFSET, COPY_OFFSET, COPY_SUFFIX))
            .collect();
        debug!(count = pasted.len(), "components pasted");
        self.state.components.extend(pasted.iter().cloned());
        self.state.selected_ids = pasted.iter().map(|c| c.id.clone()).collect();
        self.sync_selection();
        pasted
    }

    // --- Drag ---

    /// Merge fields into the ephemeral drag state.
    pub fn set_drag_state(&mut self, update: DragUpdate) {
        self.drag.merge(update);
    }

    /// Reset the drag state to the idle baseline.
    pub fn clear_drag_state(&mut self) {
        self.drag = DragState::default();
    }

    // --- Restore ---

    /// Overwrite the whole scene state with a deep copy of `snapshot`.
    ///
    /// Drag state is not part of a snapshot and is left as is.
    pub(crate) fn restore(&mut self, snapshot: &SceneState) {
        trace!(components = snapshot.components.len(), "restoring scene snapshot");
        self.state = snapshot.clone();
        self.sync_selection();
    }

    /// Take ownership of an already validated state, e.g. from an import.
    pub(crate) fn replace_state(&mut self, state: SceneState) {
        self.state = state;
        self.sync_selection();
    }

    pub(crate) fn state_mut(&mut self) -> &mut SceneState {
        &mut self.state
    }
}
