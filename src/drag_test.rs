use serde_json::json;

use super::*;

#[test]
fn default_is_idle_move() {
    let drag = DragState::default();
    assert!(!drag.is_dragging);
    assert_eq!(drag.drag_type, DragKind::Move);
    assert!(drag.is_idle());
}

#[test]
fn merge_applies_present_fields_only() {
    let mut drag = DragState::default();
    drag.merge(DragUpdate {
        is_dragging: Some(true),
        drag_type: Some(DragKind::Resize),
        start_position: Some(Point::new(1.0, 2.0)),
        ..Default::default()
    });
    drag.merge(DragUpdate { current_position: Some(Point::new(5.0, 6.0)), ..Default::default() });

    assert!(drag.is_dragging);
    assert_eq!(drag.drag_type, DragKind::Resize);
    assert_eq!(drag.start_position, Some(Point::new(1.0, 2.0)));
    assert_eq!(drag.current_position, Some(Point::new(5.0, 6.0)));
    assert!(!drag.is_idle());
}

#[test]
fn merge_sets_payload_and_target() {
    let mut drag = DragState::default();
    drag.merge(DragUpdate {
        drag_type: Some(DragKind::Create),
        drag_data: Some(json!({"template": "text"})),
        target_component: Some(ComponentId::from("text_1")),
        ..Default::default()
    });
    assert_eq!(drag.drag_data, Some(json!({"template": "text"})));
    assert_eq!(drag.target_component, Some(ComponentId::from("text_1")));
}

#[test]
fn kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&DragKind::Rotate).unwrap(), "\"rotate\"");
}
