#![allow(clippy::float_cmp)]

use crate::component::{ComponentKind, Transform};
use crate::drag::DragKind;

use super::*;

fn store_with(kinds: &[ComponentKind]) -> (SceneStore, Vec<ComponentId>) {
    let mut store = SceneStore::new();
    let ids = kinds.iter().map(|k| store.add_component(*k).id).collect();
    (store, ids)
}

fn z(store: &SceneStore, id: &ComponentId) -> i64 {
    store.get_component(id).map_or(i64::MIN, |c| c.z_index)
}

// =============================================================
// add_component
// =============================================================

#[test]
fn add_component_uses_defaults_and_selects_it() {
    let mut store = SceneStore::new();
    let c = store.add_component(ComponentKind::Text);
    assert_eq!(store.len(), 1);
    assert_eq!(c.transform, Transform::default());
    assert_eq!(c.z_index, 0);
    assert_eq!(store.selected_ids(), &[c.id.clone()]);
    assert!(!store.selection().is_multi_select);
}

#[test]
fn add_component_z_index_is_prior_count_and_id_is_fresh() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image]);
    let c = store.add_component(ComponentKind::Button);
    assert_eq!(c.z_index, 2);
    assert!(!ids.contains(&c.id));
    assert_eq!(store.selected_ids(), &[c.id]);
}

#[test]
fn add_component_replaces_prior_selection() {
    let (mut store, ids) = store_with(&[ComponentKind::Text]);
    store.select_component(&ids[0], false);
    let c = store.add_component(ComponentKind::Image);
    assert_eq!(store.selected_ids(), &[c.id]);
}

#[test]
fn add_component_honors_options() {
    let mut store = SceneStore::new();
    let options = ComponentOptions {
        name: Some("Hero".into()),
        transform: Some(Transform { x: 5.0, y: 6.0, ..Transform::default() }),
        ..ComponentOptions::new(ComponentKind::Image)
    };
    let c = store.add_component(options);
    assert_eq!(c.name, "Hero");
    assert_eq!((c.transform.x, c.transform.y), (5.0, 6.0));
}

#[test]
fn add_component_returns_copy_of_stored_component() {
    let mut store = SceneStore::new();
    let c = store.add_component(ComponentKind::Input);
    assert_eq!(store.get_component(&c.id), Some(&c));
}

// =============================================================
// remove_component
// =============================================================

#[test]
fn remove_component_removes_and_deselects() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image]);
    store.select_all();
    let removed = store.remove_component(&ids[0]);
    assert_eq!(removed.map(|c| c.id), Some(ids[0].clone()));
    assert!(store.get_component(&ids[0]).is_none());
    assert!(!store.selected_ids().contains(&ids[0]));
    assert!(!store.selection().is_multi_select);
}

#[test]
fn remove_unknown_component_is_noop() {
    let (mut store, _) = store_with(&[ComponentKind::Text]);
    let before = store.state().clone();
    assert!(store.remove_component(&ComponentId::from("text_missing")).is_none());
    assert_eq!(store.state(), &before);
}

#[test]
fn remove_component_strips_child_references_without_cascading() {
    let mut store = SceneStore::new();
    let child = store.add_component(ComponentKind::Text).id;
    let container = store
        .add_component(ComponentOptions {
            children: Some(vec![child.clone()]),
            ..ComponentOptions::new(ComponentKind::Container)
        })
        .id;

    store.remove_component(&child);
    assert!(store.get_component(&container).is_some_and(|c| c.children.is_empty()));

    let other = store.add_component(ComponentKind::Text).id;
    store.update_component(&container, ComponentUpdate { children: Some(vec![other.clone()]), ..Default::default() });
    store.remove_component(&container);
    assert!(store.get_component(&other).is_some());
}

#[test]
fn remove_keeps_clipboard_contents() {
    let (mut store, ids) = store_with(&[ComponentKind::Text]);
    store.copy_components(None);
    store.remove_component(&ids[0]);
    assert!(store.is_empty());
    assert_eq!(store.clipboard().len(), 1);
}

// =============================================================
// update_component
// =============================================================

#[test]
fn update_component_merges_and_reports_found() {
    let (mut store, ids) = store_with(&[ComponentKind::Text]);
    let ok = store.update_component(&ids[0], ComponentUpdate { opacity: Some(0.5), ..Default::default() });
    assert!(ok);
    assert_eq!(store.get_component(&ids[0]).map(|c| c.opacity), Some(0.5));
}

#[test]
fn update_unknown_component_returns_false() {
    let mut store = SceneStore::new();
    assert!(!store.update_component(&ComponentId::from("nope"), ComponentUpdate::default()));
}

#[test]
fn update_component_refreshes_updated_at() {
    let (mut store, ids) = store_with(&[ComponentKind::Text]);
    let before = store.get_component(&ids[0]).map_or(0, |c| c.updated_at);
    store.update_component(&ids[0], ComponentUpdate::default());
    let after = store.get_component(&ids[0]).map_or(0, |c| c.updated_at);
    assert!(after >= before);
}

#[test]
fn update_component_clamps_negative_size() {
    let (mut store, ids) = store_with(&[ComponentKind::Text]);
    let transform = Transform { width: -50.0, ..Transform::default() };
    store.update_component(&ids[0], ComponentUpdate { transform: Some(transform), ..Default::default() });
    assert_eq!(store.get_component(&ids[0]).map(|c| c.transform.width), Some(0.0));
}

// =============================================================
// duplicate_component
// =============================================================

#[test]
fn duplicate_offsets_and_selects_copy() {
    let (mut store, ids) = store_with(&[ComponentKind::Text]);
    let source = store.get_component(&ids[0]).cloned().unwrap();
    let dup = store.duplicate_component(&ids[0]).unwrap();

    assert_ne!(dup.id, source.id);
    assert_eq!(dup.transform.x, source.transform.x + 20.0);
    assert_eq!(dup.transform.y, source.transform.y + 20.0);
    assert_eq!(dup.name, format!("{} Copy", source.name));
    assert_eq!(store.len(), 2);
    assert_eq!(store.selected_ids(), &[dup.id]);
}

#[test]
fn duplicate_unknown_returns_none() {
    let mut store = SceneStore::new();
    assert!(store.duplicate_component(&ComponentId::from("gone")).is_none());
    assert!(store.is_empty());
}

#[test]
fn duplicate_is_deep_copy() {
    let (mut store, ids) = store_with(&[ComponentKind::Text]);
    let dup = store.duplicate_component(&ids[0]).unwrap();
    store.update_component(&ids[0], ComponentUpdate { name: Some("changed".into()), ..Default::default() });
    assert_ne!(store.get_component(&dup.id).map(|c| c.name.clone()), Some("changed".to_string()));
}

// =============================================================
// Selection
// =============================================================

#[test]
fn multi_select_toggle() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image]);
    let (a, b) = (&ids[0], &ids[1]);

    store.select_component(a, false);
    store.select_component(b, true);
    assert_eq!(store.selected_ids(), &[a.clone(), b.clone()]);
    assert!(store.selection().is_multi_select);

    store.select_component(b, true);
    assert_eq!(store.selected_ids(), &[a.clone()]);
    assert!(!store.selection().is_multi_select);
}

#[test]
fn single_select_replaces() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image]);
    store.select_all();
    store.select_component(&ids[1], false);
    assert_eq!(store.selected_ids(), &[ids[1].clone()]);
}

#[test]
fn select_unknown_is_ignored() {
    let (mut store, ids) = store_with(&[ComponentKind::Text]);
    assert!(!store.select_component(&ComponentId::from("ghost"), true));
    assert_eq!(store.selected_ids(), &[ids[0].clone()]);
}

#[test]
fn deselect_one_and_all() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image, ComponentKind::Button]);
    store.select_all();
    store.deselect_component(Some(&ids[1]));
    assert_eq!(store.selected_ids(), &[ids[0].clone(), ids[2].clone()]);
    assert!(store.is_multi_selection());

    store.deselect_component(None);
    assert!(!store.has_selection());
    assert!(store.selection().selected_ids.is_empty());
}

#[test]
fn select_all_and_clear() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image]);
    store.select_all();
    assert_eq!(store.selected_ids(), ids.as_slice());
    assert!(store.selection().is_multi_select);
    store.clear_selection();
    assert!(store.selected_ids().is_empty());
    assert!(!store.selection().is_multi_select);
}

#[test]
fn select_all_single_component_is_not_multi() {
    let (mut store, _) = store_with(&[ComponentKind::Text]);
    store.select_all();
    assert!(!store.selection().is_multi_select);
}

#[test]
fn selected_components_follow_insertion_order() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image, ComponentKind::Button]);
    store.select_component(&ids[2], false);
    store.select_component(&ids[0], true);
    let selected: Vec<_> = store.selected_components().iter().map(|c| c.id.clone()).collect();
    assert_eq!(selected, vec![ids[0].clone(), ids[2].clone()]);
}

// =============================================================
// Layering
// =============================================================

#[test]
fn bring_to_front_goes_above_max() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image, ComponentKind::Button]);
    assert!(store.bring_to_front(&ids[0]));
    assert_eq!(z(&store, &ids[0]), 3);
}

#[test]
fn send_to_back_goes_below_min() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image, ComponentKind::Button]);
    assert!(store.send_to_back(&ids[2]));
    assert_eq!(z(&store, &ids[2]), -1);
}

#[test]
fn forward_and_backward_step_by_one() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image]);
    store.bring_forward(&ids[0]);
    assert_eq!(z(&store, &ids[0]), 1);
    store.send_backward(&ids[1]);
    assert_eq!(z(&store, &ids[1]), 0);
}

#[test]
fn layering_unknown_id_is_noop() {
    let (mut store, _) = store_with(&[ComponentKind::Text]);
    let missing = ComponentId::from("missing");
    assert!(!store.bring_to_front(&missing));
    assert!(!store.send_to_back(&missing));
    assert!(!store.bring_forward(&missing));
    assert!(!store.send_backward(&missing));
}

#[test]
fn sorted_components_breaks_ties_by_insertion_order() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image, ComponentKind::Button]);
    // Text moves up to tie with Image at z=1.
    store.bring_forward(&ids[0]);
    let order: Vec<_> = store.sorted_components().iter().map(|c| c.id.clone()).collect();
    assert_eq!(order, ids);

    store.send_to_back(&ids[2]);
    let order: Vec<_> = store.sorted_components().iter().map(|c| c.id.clone()).collect();
    assert_eq!(order, vec![ids[2].clone(), ids[0].clone(), ids[1].clone()]);
}

// =============================================================
// Clipboard
// =============================================================

#[test]
fn copy_uses_selection_by_default() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image]);
    store.select_component(&ids[1], false);
    assert_eq!(store.copy_components(None), 1);
    assert_eq!(store.clipboard()[0].id, ids[1]);
}

#[test]
fn copy_explicit_ids_replaces_clipboard() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image]);
    store.copy_components(Some(&ids[..]));
    assert_eq!(store.clipboard().len(), 2);
    store.copy_components(Some(&ids[..1]));
    assert_eq!(store.clipboard().len(), 1);
}

#[test]
fn clipboard_is_detached_from_originals() {
    let (mut store, ids) = store_with(&[ComponentKind::Text]);
    store.copy_components(None);
    store.update_component(&ids[0], ComponentUpdate { name: Some("renamed".into()), ..Default::default() });
    assert_ne!(store.clipboard()[0].name, "renamed");
}

#[test]
fn paste_creates_new_batch_each_time() {
    let (mut store, ids) = store_with(&[ComponentKind::Text, ComponentKind::Image]);
    store.copy_components(Some(&ids[..]));

    let first = store.paste_components();
    let second = store.paste_components();
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(store.len(), 6);
    assert_ne!(first[0].id, second[0].id);

    let pasted: Vec<_> = second.iter().map(|c| c.id.clone()).collect();
    assert_eq!(store.selected_ids(), pasted.as_slice());
    assert!(store.selection().is_multi_select);
}

#[test]
fn paste_offsets_and_renames() {
    let (mut store, ids) = store_with(&[ComponentKind::Text]);
    store.copy_components(None);
    let pasted = store.paste_components();
    let source = store.get_component(&ids[0]).cloned().unwrap();
    assert_eq!(pasted[0].transform.x, source.transform.x + 20.0);
    assert_eq!(pasted[0].transform.y, source.transform.y + 20.0);
    assert_eq!(pasted[0].name, format!("{} Copy", source.name));
}

#[test]
fn copy_remove_paste_scenario() {
    let mut store = SceneStore::new();
    let original = store.add_component(ComponentKind::Text);
    assert_eq!(store.len(), 1);
    assert_eq!(store.selected_ids(), &[original.id.clone()]);

    store.copy_components(None);
    assert_eq!(store.clipboard().len(), 1);

    store.remove_component(&original.id);
    assert!(store.is_empty());
    assert_eq!(store.clipboard().len(), 1);

    let pasted = store.paste_components();
    assert_eq!(store.len(), 1);
    assert_ne!(pasted[0].id, original.id);
}

// =============================================================
// Viewport and coordinates
// =============================================================

#[test]
fn canvas_scale_is_clamped() {
    let mut store = SceneStore::new();
    store.set_canvas_scale(0.0);
    assert_eq!(store.viewport().scale, 0.1);
    store.set_canvas_scale(9.0);
    assert_eq!(store.viewport().scale, 5.0);
}

#[test]
fn canvas_setters_write_fields() {
    let mut store = SceneStore::new();
    store.set_canvas_size(800.0, 600.0);
    store.set_canvas_offset(10.0, -20.0);
    store.set_canvas_background("#000000", Some("bg.png".into()));
    store.set_canvas_background("#111111", None);
    let vp = store.viewport();
    assert_eq!((vp.width, vp.height), (800.0, 600.0));
    assert_eq!((vp.offset_x, vp.offset_y), (10.0, -20.0));
    assert_eq!(vp.background_color, "#111111");
    assert_eq!(vp.background_image.as_deref(), Some("bg.png"));
}

#[test]
fn coordinate_transforms_use_viewport() {
    let mut store = SceneStore::new();
    store.set_canvas_scale(2.0);
    store.set_canvas_offset(40.0, 20.0);
    let canvas = store.screen_to_canvas(240.0, 120.0);
    assert_eq!((canvas.x, canvas.y), (100.0, 50.0));
    let screen = store.canvas_to_screen(canvas.x, canvas.y);
    assert_eq!((screen.x, screen.y), (240.0, 120.0));
}

#[test]
fn set_grid_clamps_negative_size() {
    let mut store = SceneStore::new();
    store.set_grid(GridSettings { grid_size: -4.0, show_grid: false, ..GridSettings::default() });
    assert_eq!(store.grid().grid_size, 0.0);
    assert!(!store.grid().show_grid);
}

// =============================================================
// Drag state
// =============================================================

#[test]
fn drag_state_merge_and_clear() {
    let mut store = SceneStore::new();
    store.set_drag_state(DragUpdate {
        is_dragging: Some(true),
        drag_type: Some(DragKind::Rotate),
        ..Default::default()
    });
    assert!(store.drag_state().is_dragging);
    assert_eq!(store.drag_state().drag_type, DragKind::Rotate);

    store.clear_drag_state();
    assert!(!store.drag_state().is_dragging);
    assert_eq!(store.drag_state().drag_type, DragKind::Move);
}

// =============================================================
// restore
// =============================================================

#[test]
fn restore_overwrites_state_and_resyncs_selection() {
    let (mut store, _) = store_with(&[ComponentKind::Text]);
    let snapshot = store.state().clone();

    store.add_component(ComponentKind::Image);
    store.select_all();
    store.set_canvas_scale(3.0);
    store.restore(&snapshot);

    assert_eq!(store.state(), &snapshot);
    assert_eq!(store.selection().selected_ids, snapshot.selected_ids);
    assert!(!store.selection().is_multi_select);
}

#[test]
fn restore_leaves_drag_state_alone() {
    let (mut store, _) = store_with(&[ComponentKind::Text]);
    let snapshot = store.state().clone();
    store.set_drag_state(DragUpdate { is_dragging: Some(true), ..Default::default() });
    store.restore(&snapshot);
    assert!(store.drag_state().is_dragging);
}

#[test]
fn with_state_derives_selection_view() {
    let (source, _) = store_with(&[ComponentKind::Text, ComponentKind::Image]);
    let mut state = source.state().clone();
    state.selected_ids = state.components.iter().map(|c| c.id.clone()).collect();
    let store = SceneStore::with_state(state);
    assert!(store.selection().is_multi_select);
}
