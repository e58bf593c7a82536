//! Derived selection view kept in lockstep with `SceneState::selected_ids`.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::component::ComponentId;

/// Ordered selected ids plus the multi-select flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Selected component ids, in selection order.
    pub selected_ids: Vec<ComponentId>,
    /// True when more than one component is selected.
    pub is_multi_select: bool,
}

impl SelectionState {
    /// Re-derive the view from the canonical selected id list.
    pub fn sync(&mut self, selected: &[ComponentId]) {
        self.selected_ids = selected.to_vec();
        self.is_multi_select = selected.len() > 1;
    }

    /// Whether `id` is part of the selection.
    #[must_use]
    pub fn contains(&self, id: &ComponentId) -> bool {
        self.selected_ids.contains(id)
    }
}

/// Toggle `id` within `selected`: remove if present, append otherwise.
pub(crate) fn toggle(selected: &mut Vec<ComponentId>, id: &ComponentId) {
    if let Some(pos) = selected.iter().position(|s| s == id) {
        selected.remove(pos);
    } else {
        selected.push(id.clone());
    }
}
