#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::{Shape, ShapeKind};
use crate::engine::CanvasModel;

const SPACING: f64 = 50.0;

fn sibling(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Sibling {
    Sibling { id: Uuid::new_v4(), bounds: Bounds::new(min_x, min_y, max_x, max_y) }
}

fn assert_clear_of(target: &Bounds, offset: Vec2, siblings: &[Sibling]) {
    let placed = target.translate(offset);
    for s in siblings {
        assert!(!placed.overlaps(&s.bounds), "placed {placed:?} overlaps sibling {:?}", s.bounds);
    }
}

// =============================================================
// placement_offset
// =============================================================

#[test]
fn no_siblings_means_no_move() {
    let target = Bounds::new(0.0, 0.0, 100.0, 50.0);
    assert_eq!(placement_offset(&target, &[], Uuid::new_v4(), SPACING), Vec2::ZERO);
}

#[test]
fn single_overlapping_sibling_pushes_past_its_right_edge() {
    let target = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let siblings = [sibling(50.0, 0.0, 150.0, 50.0)];
    let offset = placement_offset(&target, &siblings, Uuid::new_v4(), SPACING);
    // Lands at the sibling's max_x (150) plus spacing.
    assert_eq!(offset, Vec2::new(200.0, 0.0));
    assert_eq!(target.translate(offset).min_x, 200.0);
}

#[test]
fn vertically_disjoint_siblings_never_constrain() {
    let target = Bounds::new(0.0, 100.0, 100.0, 200.0);
    let siblings = [
        sibling(0.0, 0.0, 100.0, 99.0),
        sibling(50.0, 201.0, 150.0, 300.0),
        sibling(-500.0, -100.0, 500.0, 50.0),
        sibling(20.0, 250.0, 80.0, 260.0),
    ];
    assert_eq!(placement_offset(&target, &siblings, Uuid::new_v4(), SPACING), Vec2::ZERO);
}

#[test]
fn sibling_touching_vertical_edge_still_constrains() {
    let target = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let siblings = [sibling(10.0, 50.0, 60.0, 80.0)];
    assert_eq!(placement_offset(&target, &siblings, Uuid::new_v4(), SPACING), Vec2::new(110.0, 0.0));
}

#[test]
fn sibling_to_the_left_is_ignored() {
    let target = Bounds::new(200.0, 0.0, 300.0, 50.0);
    let siblings = [sibling(0.0, 0.0, 150.0, 50.0)];
    assert_eq!(placement_offset(&target, &siblings, Uuid::new_v4(), SPACING), Vec2::ZERO);
}

#[test]
fn sibling_beyond_right_edge_is_ignored() {
    let target = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let siblings = [sibling(100.5, 0.0, 200.0, 50.0)];
    assert_eq!(placement_offset(&target, &siblings, Uuid::new_v4(), SPACING), Vec2::ZERO);
}

#[test]
fn self_entry_is_excluded() {
    let id = Uuid::new_v4();
    let target = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let siblings = [Sibling { id, bounds: target }];
    assert_eq!(placement_offset(&target, &siblings, id, SPACING), Vec2::ZERO);
}

#[test]
fn chain_of_siblings_pushes_repeatedly() {
    let target = Bounds::new(0.0, 0.0, 100.0, 50.0);
    // Second sibling sits where the first push lands.
    let siblings = [sibling(250.0, 0.0, 400.0, 50.0), sibling(0.0, 0.0, 200.0, 50.0)];
    let offset = placement_offset(&target, &siblings, Uuid::new_v4(), SPACING);
    assert_eq!(offset, Vec2::new(450.0, 0.0));
    assert_clear_of(&target, offset, &siblings);
}

#[test]
fn gap_wide_enough_is_used() {
    let target = Bounds::new(0.0, 0.0, 100.0, 50.0);
    // After the first push the target spans 150..250, which fits before 300.
    let siblings = [sibling(0.0, 0.0, 100.0, 50.0), sibling(300.0, 0.0, 400.0, 50.0)];
    let offset = placement_offset(&target, &siblings, Uuid::new_v4(), SPACING);
    assert_eq!(offset, Vec2::new(150.0, 0.0));
    assert_clear_of(&target, offset, &siblings);
}

#[test]
fn unsorted_input_is_swept_by_min_x() {
    let target = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let a = sibling(0.0, 0.0, 100.0, 50.0);
    let b = sibling(120.0, 0.0, 220.0, 50.0);
    let forward = placement_offset(&target, &[a, b], Uuid::new_v4(), SPACING);
    let reversed = placement_offset(&target, &[b, a], Uuid::new_v4(), SPACING);
    assert_eq!(forward, reversed);
    assert_eq!(forward, Vec2::new(270.0, 0.0));
}

#[test]
fn custom_spacing_is_honored() {
    let target = Bounds::new(0.0, 0.0, 100.0, 50.0);
    let siblings = [sibling(50.0, 0.0, 150.0, 50.0)];
    assert_eq!(placement_offset(&target, &siblings, Uuid::new_v4(), 10.0), Vec2::new(160.0, 0.0));
}

#[test]
fn placed_bounds_keep_spacing_from_constraining_sibling() {
    let target = Bounds::new(0.0, 0.0, 100.0, 100.0);
    let siblings = [
        sibling(30.0, 20.0, 90.0, 60.0),
        sibling(-40.0, 80.0, 10.0, 140.0),
        sibling(500.0, 0.0, 600.0, 10.0),
    ];
    let offset = placement_offset(&target, &siblings, Uuid::new_v4(), SPACING);
    let placed = target.translate(offset);
    assert_clear_of(&target, offset, &siblings);
    let nearest_left = siblings
        .iter()
        .filter(|s| s.bounds.max_x <= placed.min_x && placed.overlaps_vertically(&s.bounds))
        .map(|s| s.bounds.max_x)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(placed.min_x - nearest_left >= SPACING);
}

#[test]
fn placement_is_idempotent() {
    let target = Bounds::new(0.0, 0.0, 100.0, 100.0);
    let siblings = [
        sibling(30.0, 20.0, 90.0, 60.0),
        sibling(150.0, 90.0, 260.0, 400.0),
        sibling(300.0, -50.0, 310.0, 0.0),
        sibling(-40.0, 80.0, 10.0, 140.0),
    ];
    let offset = placement_offset(&target, &siblings, Uuid::new_v4(), SPACING);
    let placed = target.translate(offset);
    assert_eq!(placement_offset(&placed, &siblings, Uuid::new_v4(), SPACING), Vec2::ZERO);
}

// =============================================================
// place_shape
// =============================================================

fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape::new(ShapeKind::Geo, x, y, w, h)
}

#[test]
fn place_shape_translates_through_host() {
    let existing = rect(50.0, 0.0, 100.0, 50.0);
    let new_shape = rect(0.0, 0.0, 100.0, 50.0);
    let id = new_shape.id;
    let mut model = CanvasModel::new();
    model.load_snapshot(vec![existing, new_shape], Vec::new());

    let offset = place_shape(&mut model, id, SPACING).unwrap();

    assert_eq!(offset, Vec2::new(200.0, 0.0));
    assert_eq!(model.shape_bounds(id), Some(Bounds::new(200.0, 0.0, 300.0, 50.0)));
    assert_eq!(model.history_marks(), vec![MARK_PLACING_SHAPE]);
}

#[test]
fn place_shape_clear_shape_records_no_history() {
    let new_shape = rect(0.0, 0.0, 100.0, 50.0);
    let id = new_shape.id;
    let mut model = CanvasModel::new();
    model.load_snapshot(vec![new_shape, rect(0.0, 500.0, 10.0, 10.0)], Vec::new());
    assert_eq!(place_shape(&mut model, id, SPACING).unwrap(), Vec2::ZERO);
    assert!(model.history_marks().is_empty());
}

#[test]
fn place_shape_only_considers_same_parent() {
    let group = Shape::new(ShapeKind::Group, 0.0, 0.0, 0.0, 0.0);
    let nested = Shape { parent_id: Some(group.id), ..rect(0.0, 0.0, 100.0, 50.0) };
    let new_shape = rect(0.0, 0.0, 100.0, 50.0);
    let id = new_shape.id;
    let mut model = CanvasModel::new();
    model.load_snapshot(vec![group, nested, new_shape], Vec::new());
    // The group resolves to its nested child's bounds and is a page-level sibling.
    assert_eq!(place_shape(&mut model, id, SPACING).unwrap(), Vec2::new(150.0, 0.0));
}

#[test]
fn place_shape_skips_siblings_without_bounds() {
    let empty_group = Shape::new(ShapeKind::Group, 0.0, 0.0, 0.0, 0.0);
    let new_shape = rect(0.0, 0.0, 100.0, 50.0);
    let id = new_shape.id;
    let mut model = CanvasModel::new();
    model.load_snapshot(vec![empty_group, new_shape], Vec::new());
    assert_eq!(place_shape(&mut model, id, SPACING).unwrap(), Vec2::ZERO);
}

#[test]
fn place_shape_unknown_id_is_reference_error() {
    let mut model = CanvasModel::new();
    let missing = Uuid::new_v4();
    let err = place_shape(&mut model, missing, SPACING).unwrap_err();
    assert!(matches!(err, LayoutError::Reference(id) if id == missing));
}

#[test]
fn place_shape_without_bounds_is_geometry_unavailable() {
    let empty_group = Shape::new(ShapeKind::Group, 0.0, 0.0, 0.0, 0.0);
    let id = empty_group.id;
    let mut model = CanvasModel::new();
    model.load_snapshot(vec![empty_group], Vec::new());
    let err = place_shape(&mut model, id, SPACING).unwrap_err();
    assert!(matches!(err, LayoutError::GeometryUnavailable(g) if g == id));
}
