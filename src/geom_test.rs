#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn vec_approx_eq(a: Vec2, b: Vec2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Vec2 ---

#[test]
fn vec_arithmetic() {
    let a = Vec2::new(3.0, 4.0);
    let b = Vec2::new(1.0, -2.0);
    assert_eq!(a + b, Vec2::new(4.0, 2.0));
    assert_eq!(a - b, Vec2::new(2.0, 6.0));
    assert_eq!(a * 2.0, Vec2::new(6.0, 8.0));
    assert_eq!(-a, Vec2::new(-3.0, -4.0));
    assert_eq!(a.mul_v(b), Vec2::new(3.0, -8.0));
}

#[test]
fn vec_min_max_are_componentwise() {
    let a = Vec2::new(1.0, 9.0);
    let b = Vec2::new(5.0, 2.0);
    assert_eq!(a.min(b), Vec2::new(1.0, 2.0));
    assert_eq!(a.max(b), Vec2::new(5.0, 9.0));
}

#[test]
fn rotate_zero_is_identity() {
    let v = Vec2::new(12.5, -3.0);
    assert_eq!(v.rotate(0.0), v);
}

#[test]
fn rotate_quarter_turn() {
    let v = Vec2::new(1.0, 0.0);
    assert!(vec_approx_eq(v.rotate(FRAC_PI_2), Vec2::new(0.0, 1.0)));
    assert!(vec_approx_eq(v.rotate(PI), Vec2::new(-1.0, 0.0)));
}

#[test]
fn rotate_preserves_length() {
    let v = Vec2::new(3.0, 4.0);
    let r = v.rotate(0.7);
    assert!(approx_eq(r.x.hypot(r.y), 5.0));
}

#[test]
fn rotate_then_unrotate_round_trips() {
    let v = Vec2::new(-7.0, 2.5);
    assert!(vec_approx_eq(v.rotate(1.3).rotate(-1.3), v));
}

#[test]
fn zero_vector_is_zero() {
    assert!(Vec2::ZERO.is_zero());
    assert!(!Vec2::new(0.0, 1.0).is_zero());
}

// --- Bounds ---

#[test]
fn bounds_from_rect_dimensions() {
    let b = Bounds::from_rect(10.0, 20.0, 100.0, 50.0);
    assert_eq!(b.max_x, 110.0);
    assert_eq!(b.max_y, 70.0);
    assert_eq!(b.width(), 100.0);
    assert_eq!(b.height(), 50.0);
    assert_eq!(b.center(), Vec2::new(60.0, 45.0));
    assert_eq!(b.origin(), Vec2::new(10.0, 20.0));
    assert_eq!(b.size(), Vec2::new(100.0, 50.0));
}

#[test]
fn bounds_from_points_empty_is_none() {
    assert!(Bounds::from_points(&[]).is_none());
}

#[test]
fn bounds_from_points_covers_all() {
    let b = Bounds::from_points(&[Vec2::new(3.0, -1.0), Vec2::new(-2.0, 4.0), Vec2::new(0.0, 0.0)]).unwrap();
    assert_eq!(b, Bounds::new(-2.0, -1.0, 3.0, 4.0));
}

#[test]
fn bounds_vertical_overlap_includes_touching() {
    let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.overlaps_vertically(&Bounds::new(100.0, 10.0, 110.0, 20.0)));
    assert!(!a.overlaps_vertically(&Bounds::new(0.0, 10.5, 10.0, 20.0)));
}

#[test]
fn bounds_overlap_requires_both_axes() {
    let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
    assert!(a.overlaps(&Bounds::new(5.0, 5.0, 15.0, 15.0)));
    assert!(!a.overlaps(&Bounds::new(11.0, 0.0, 20.0, 10.0)));
    assert!(!a.overlaps(&Bounds::new(0.0, 11.0, 10.0, 20.0)));
}

#[test]
fn bounds_translate_and_union() {
    let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(a.translate(Vec2::new(5.0, -5.0)), Bounds::new(5.0, -5.0, 15.0, 5.0));
    let b = Bounds::new(20.0, -3.0, 25.0, 4.0);
    assert_eq!(a.union(&b), Bounds::new(0.0, -3.0, 25.0, 10.0));
}

// --- Transform ---

#[test]
fn identity_transform_is_noop() {
    let p = Vec2::new(4.0, 5.0);
    assert_eq!(Transform::IDENTITY.local_to_page(p), p);
    assert_eq!(Transform::IDENTITY.page_to_local(p), p);
}

#[test]
fn translation_only_transform() {
    let t = Transform::new(Vec2::new(100.0, 50.0), 0.0);
    assert_eq!(t.page_to_local(Vec2::new(150.0, 60.0)), Vec2::new(50.0, 10.0));
    assert_eq!(t.local_to_page(Vec2::new(50.0, 10.0)), Vec2::new(150.0, 60.0));
}

#[test]
fn rotated_transform_round_trips() {
    let t = Transform::new(Vec2::new(-30.0, 75.0), FRAC_PI_4);
    for p in [Vec2::new(0.0, 0.0), Vec2::new(123.0, -45.5), Vec2::new(-8.0, 900.0)] {
        assert!(vec_approx_eq(t.local_to_page(t.page_to_local(p)), p));
        assert!(vec_approx_eq(t.page_to_local(t.local_to_page(p)), p));
    }
}

#[test]
fn compose_matches_sequential_application() {
    let outer = Transform::new(Vec2::new(10.0, 20.0), FRAC_PI_2);
    let inner = Transform::new(Vec2::new(5.0, 0.0), 0.3);
    let composed = outer.then(&inner);
    let p = Vec2::new(2.0, 3.0);
    assert!(vec_approx_eq(composed.local_to_page(p), outer.local_to_page(inner.local_to_page(p))));
    assert!(approx_eq(composed.rotation, FRAC_PI_2 + 0.3));
}
