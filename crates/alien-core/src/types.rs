//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::CollisionType;

/// Axis-aligned bounding box in world pixels, y growing downward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Collision type reported to whoever hits this box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CollisionType>,
}

impl Aabb {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
            kind: None,
        }
    }

    pub fn from_pos_size(pos: DVec2, size: DVec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Same box tagged with a collision type.
    pub fn with_kind(mut self, kind: CollisionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.w / 2.0
    }

    /// True if `other` lies entirely within this box (edges inclusive).
    pub fn contains(&self, other: &Aabb) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// True if the interiors overlap. Touching edges do not count.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let gap_xa = self.x - other.right();
        let gap_xb = other.x - self.right();
        let gap_ya = self.y - other.bottom();
        let gap_yb = other.y - self.bottom();
        !(gap_xa >= 0.0 || gap_xb >= 0.0 || gap_ya >= 0.0 || gap_yb >= 0.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: f64,
}

impl SimTime {
    /// Advance by one tick of `tick_ms` milliseconds.
    pub fn advance(&mut self, tick_ms: f64) {
        self.tick += 1;
        self.elapsed_ms += tick_ms;
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms / 1000.0
    }
}
