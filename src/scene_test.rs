#![allow(clippy::float_cmp)]

use super::*;
use crate::color::{HAZARD_FILL, UNIT_MOVED_FILL};
use crate::doc::{ObjectKind, UnitId};

fn hazard(x: i32, y: i32) -> PlacedObject {
    PlacedObject::new(GridPosition::new(x, y), ObjectKind::Hazard { index: 0 })
}

fn unit(x: i32, y: i32) -> PlacedObject {
    PlacedObject::new(
        GridPosition::new(x, y),
        ObjectKind::Unit { name: "Alpha".into(), unit_id: UnitId::Number(1), status: Some("moved".into()) },
    )
}

// =============================================================
// Visual
// =============================================================

#[test]
fn visual_from_hazard() {
    let h = hazard(0, 0);
    let v = Visual::from_object(&h, true);
    assert_eq!(v.object_id, h.object_id);
    assert_eq!(v.variant, ObjectVariant::Hazard);
    assert_eq!(v.origin, Point::new(0.0, -150.0));
    assert_eq!(v.side, 150.0);
    assert_eq!(v.fill, HAZARD_FILL);
    assert_eq!(v.label, "1");
    assert_eq!(v.caption, "(0, 0)");
    assert!(v.draggable);
}

#[test]
fn visual_from_unit_uses_status_fill_and_name() {
    let v = Visual::from_object(&unit(5, 5), false);
    assert_eq!(v.origin, Point::new(250.0, -350.0));
    assert_eq!(v.side, 100.0);
    assert_eq!(v.fill, UNIT_MOVED_FILL);
    assert_eq!(v.label, "Alpha");
    assert!(!v.draggable);
}

#[test]
fn visual_label_anchor_is_center() {
    let v = Visual::from_object(&unit(0, 0), true);
    assert_eq!(v.label_anchor(), Point::new(50.0, -50.0));
}

#[test]
fn visual_caption_anchor_sits_inside_bottom_edge() {
    let v = Visual::from_object(&unit(0, 0), true);
    let anchor = v.caption_anchor();
    assert_eq!(anchor.x, 50.0);
    assert!(anchor.y < 0.0 && anchor.y > -50.0);
}

#[test]
fn visual_snap_to_removes_drift() {
    let mut v = Visual::from_object(&unit(0, 0), true);
    v.origin = Point::new(113.0, -171.0);
    v.snap_to(GridPosition::new(2, 1), Footprint::UNIT);
    assert_eq!(v.origin, Point::new(100.0, -150.0));
}

// =============================================================
// Scene::build
// =============================================================

#[test]
fn build_creates_one_visual_per_object_in_order() {
    let objects = [hazard(0, 0), unit(5, 5)];
    let scene = Scene::build(&objects, true);
    assert_eq!(scene.visuals().len(), 2);
    assert_eq!(scene.visuals()[0].object_id, objects[0].object_id);
    assert_eq!(scene.visuals()[1].object_id, objects[1].object_id);
}

#[test]
fn build_grid_spans_padded_bounds() {
    let objects = [hazard(0, 0), unit(5, 5)];
    let scene = Scene::build(&objects, true);
    // Content x [0, 350], y [-350, 0]; padded by two cells.
    let b = scene.grid_bounds().unwrap();
    assert_eq!(b, Bounds { min_x: -100.0, min_y: -450.0, max_x: 450.0, max_y: 100.0 });
}

#[test]
fn build_grid_lines_land_on_cell_boundaries() {
    let objects = [hazard(0, 0), unit(5, 5)];
    let scene = Scene::build(&objects, true);
    // 550 / 50 + 1 lines each way.
    assert_eq!(scene.grid_lines().len(), 24);
    for line in scene.grid_lines() {
        assert_eq!(line.from.x % CELL, 0.0);
        assert_eq!(line.from.y % CELL, 0.0);
    }
}

#[test]
fn build_wide_span_has_grid_lines_below_cap() {
    let objects = [hazard(0, 0), hazard(4_000, 0)];
    let scene = Scene::build(&objects, true);
    assert!(!scene.grid_lines().is_empty());
}

#[test]
fn build_span_past_line_cap_omits_grid_lines() {
    let objects = [hazard(0, 0), hazard(5_000, 0)];
    let scene = Scene::build(&objects, true);
    assert_eq!(scene.visuals().len(), 2);
    assert!(scene.grid_bounds().is_some());
    assert!(scene.grid_lines().is_empty());
}

#[test]
fn build_empty_has_no_grid() {
    let scene = Scene::build(std::iter::empty(), true);
    assert!(scene.is_empty());
    assert!(scene.grid_bounds().is_none());
    assert!(scene.grid_lines().is_empty());
}

#[test]
fn build_applies_draggable_uniformly() {
    let objects = [hazard(0, 0), unit(5, 5)];
    let scene = Scene::build(&objects, false);
    assert!(scene.visuals().iter().all(|v| !v.draggable));
}

// =============================================================
// Mutation
// =============================================================

#[test]
fn raise_moves_visual_to_top() {
    let objects = [hazard(0, 0), unit(5, 5), unit(9, 9)];
    let mut scene = Scene::build(&objects, true);
    assert!(scene.raise(&objects[0].object_id));
    assert_eq!(scene.visuals().last().unwrap().object_id, objects[0].object_id);
    assert_eq!(scene.visuals().len(), 3);
}

#[test]
fn raise_missing_is_false() {
    let mut scene = Scene::build(&[hazard(0, 0)], true);
    assert!(!scene.raise(&uuid::Uuid::new_v4()));
}

#[test]
fn set_draggable_toggles_every_visual() {
    let objects = [hazard(0, 0), unit(5, 5)];
    let mut scene = Scene::build(&objects, true);
    scene.set_draggable(false);
    assert!(scene.visuals().iter().all(|v| !v.draggable));
}

#[test]
fn content_bounds_follow_live_positions() {
    let objects = [unit(0, 0)];
    let mut scene = Scene::build(&objects, true);
    scene.visual_mut(&objects[0].object_id).unwrap().origin = Point::new(500.0, 500.0);
    let b = scene.content_bounds().unwrap();
    assert_eq!(b, Bounds { min_x: 500.0, min_y: 500.0, max_x: 600.0, max_y: 600.0 });
}

#[test]
fn visual_lookup_by_id() {
    let objects = [hazard(0, 0), unit(5, 5)];
    let scene = Scene::build(&objects, true);
    assert_eq!(scene.visual(&objects[1].object_id).unwrap().variant, ObjectVariant::Unit);
    assert!(scene.visual(&uuid::Uuid::new_v4()).is_none());
}

#[test]
fn caption_text_is_smaller_than_label() {
    assert!(CAPTION_STYLE.font_px < LABEL_STYLE.font_px);
    assert_eq!(LABEL_STYLE.color, CAPTION_STYLE.color);
    let wire = serde_json::to_value(LABEL_STYLE).unwrap();
    assert_eq!(wire["color"], "#1f1a17");
}
