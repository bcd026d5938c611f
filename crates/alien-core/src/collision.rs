//! AABB overlap tests and minimum-translation resolution.
//!
//! Every function takes `a` as the box being resolved and `b` as the
//! obstacle. Normals are the signed distance `a` has to move to stop
//! overlapping `b` along that axis.

use glam::DVec2;

use crate::enums::{Axis, CollisionType};
use crate::types::Aabb;

/// Overlap along a single axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisOverlap {
    pub normal: f64,
    pub kind: Option<CollisionType>,
}

/// Overlap on both axes with the axis to resolve along.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub normal: DVec2,
    pub axis: Axis,
    pub kind: Option<CollisionType>,
}

fn overlap(a_min: f64, a_len: f64, b_min: f64, b_len: f64) -> Option<f64> {
    let gap_a = a_min - (b_min + b_len);
    let gap_b = b_min - (a_min + a_len);

    if gap_a >= 0.0 || gap_b >= 0.0 {
        return None;
    }

    Some(if gap_a < gap_b { gap_b } else { -gap_a })
}

pub fn collision_check_x(a: &Aabb, b: &Aabb) -> Option<AxisOverlap> {
    overlap(a.x, a.w, b.x, b.w).map(|normal| AxisOverlap {
        normal,
        kind: b.kind,
    })
}

pub fn collision_check_y(a: &Aabb, b: &Aabb) -> Option<AxisOverlap> {
    overlap(a.y, a.h, b.y, b.h).map(|normal| AxisOverlap {
        normal,
        kind: b.kind,
    })
}

/// Full overlap test. The axis with the smaller penetration wins; ties go to Y.
pub fn collision_check(a: &Aabb, b: &Aabb) -> Option<Collision> {
    let x = collision_check_x(a, b)?;
    let y = collision_check_y(a, b)?;

    let axis = if x.normal.abs() < y.normal.abs() {
        Axis::X
    } else {
        Axis::Y
    };

    Some(Collision {
        normal: DVec2::new(x.normal, y.normal),
        axis,
        kind: b.kind,
    })
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// 1 for zero and positive numbers, -1 otherwise.
pub fn sign(n: f64) -> f64 {
    if n >= 0.0 {
        1.0
    } else {
        -1.0
    }
}
