//! Tile-stepped ray sensor.
//!
//! A sensor walks one tile at a time from the tile containing the origin
//! along a single axis. Each registered tile yields a hit whose world
//! coordinate is corrected for the tile's shape:
//!
//! - casts toward +x/+y meet a tile's near edge, casts toward -x/-y its
//!   far edge;
//! - half blocks sit lower for upward casts and are skipped by horizontal
//!   casts from deep below their top edge;
//! - ramps shift the hit linearly along the perpendicular axis.

use glam::DVec2;
use thiserror::Error;

use alien_core::constants::{HALF_BLOCK_MAX_PENETRATION, HALF_BLOCK_RAISE, TILE_SIZE};
use alien_core::enums::CollisionType;

use crate::grid::TileGrid;

#[derive(Debug, Error, PartialEq)]
pub enum SensorError {
    #[error("sensor origin is NaN ({0}, {1})")]
    NanOrigin(f64, f64),
    #[error("sensor direction ({0}, {1}) must be a unit step along one axis")]
    InvalidDirection(f64, f64),
}

/// A registered tile met by a sensor, in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorHit {
    pub sx: i64,
    pub sy: i64,
    pub sprite: u32,
    pub kind: CollisionType,
    pub x: f64,
    pub y: f64,
    /// Hit minus origin.
    pub dx: f64,
    pub dy: f64,
}

impl SensorHit {
    pub fn point(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Result of a cast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorOutcome {
    Hit(SensorHit),
    /// The cast left the grid; the tile is clamped to the grid extent.
    Bounds { sx: i64, sy: i64 },
    /// Nothing accepted within range.
    Miss,
}

impl SensorOutcome {
    /// The accepted hit, if any. `Bounds` counts as no surface.
    pub fn hit(&self) -> Option<&SensorHit> {
        match self {
            SensorOutcome::Hit(hit) => Some(hit),
            _ => None,
        }
    }
}

/// Caller decision on each candidate hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorVerdict {
    /// Skip this tile and keep walking.
    Continue,
    /// Accept, possibly adjusted; ends the cast.
    Stop(SensorHit),
    /// Abandon the whole cast; it reports `Miss`. Use `Continue` to skip
    /// a single tile.
    Abort,
}

fn validate(origin: DVec2, dir: DVec2) -> Result<(), SensorError> {
    if origin.is_nan() {
        return Err(SensorError::NanOrigin(origin.x, origin.y));
    }
    let unit = |v: f64| v == 1.0 || v == -1.0;
    let axis_step = (unit(dir.x) && dir.y == 0.0) || (dir.x == 0.0 && unit(dir.y));
    if !axis_step {
        return Err(SensorError::InvalidDirection(dir.x, dir.y));
    }
    Ok(())
}

impl TileGrid {
    /// Cast from `origin` along `dir` for `length` pixels, offering every
    /// candidate hit to `decide`.
    pub fn sensor<F>(
        &self,
        origin: DVec2,
        dir: DVec2,
        length: f64,
        mut decide: F,
    ) -> Result<SensorOutcome, SensorError>
    where
        F: FnMut(SensorHit) -> SensorVerdict,
    {
        validate(origin, dir)?;

        let (ox, oy) = TileGrid::world_to_tile(origin);
        let (step_x, step_y) = (dir.x as i64, dir.y as i64);
        let steps = (length / TILE_SIZE).ceil().max(0.0) as i64;
        let (width, height) = (self.width() as i64, self.height() as i64);

        for i in 0..steps {
            let sx = ox + step_x * i;
            let sy = oy + step_y * i;

            if !self.in_bounds(sx, sy) {
                log::trace!("sensor from {origin} left the grid at ({sx}, {sy})");
                return Ok(SensorOutcome::Bounds {
                    sx: sx.clamp(0, width),
                    sy: sy.clamp(0, height),
                });
            }

            let sprite = self.tiles()[sy as usize][sx as usize];
            let Some(kind) = self.collision_type(sprite) else {
                continue;
            };
            if !kind.is_blocking() {
                continue;
            }
            let Some(hit) = shape_hit(origin, dir, sx, sy, sprite, kind) else {
                continue;
            };

            match decide(hit) {
                SensorVerdict::Continue => continue,
                SensorVerdict::Stop(hit) => return Ok(SensorOutcome::Hit(hit)),
                SensorVerdict::Abort => return Ok(SensorOutcome::Miss),
            }
        }

        Ok(SensorOutcome::Miss)
    }

    /// Cast accepting the first hit.
    pub fn cast(&self, origin: DVec2, dir: DVec2, length: f64) -> Result<SensorOutcome, SensorError> {
        self.sensor(origin, dir, length, SensorVerdict::Stop)
    }
}

/// World-space hit on tile (`sx`, `sy`), or `None` if the tile's shape
/// cannot be hit from this origin.
fn shape_hit(
    origin: DVec2,
    dir: DVec2,
    sx: i64,
    sy: i64,
    sprite: u32,
    kind: CollisionType,
) -> Option<SensorHit> {
    let tile_x = sx as f64 * TILE_SIZE;
    let tile_y = sy as f64 * TILE_SIZE;

    let mut x = if dir.x == 0.0 { origin.x } else { tile_x };
    let mut y = if dir.y == 0.0 { origin.y } else { tile_y };

    if dir.x < 0.0 {
        x += TILE_SIZE;
    }
    if dir.y < 0.0 {
        y += TILE_SIZE;
    }

    match kind {
        CollisionType::TopHalf => {
            if dir.y < 0.0 {
                y -= HALF_BLOCK_RAISE;
            }
            if dir.x != 0.0 && origin.y - tile_y > HALF_BLOCK_MAX_PENETRATION {
                return None;
            }
        }
        CollisionType::HillDown => {
            if dir.y == 0.0 {
                x += (tile_y - origin.y) + TILE_SIZE;
            } else {
                y += (tile_x - origin.x) + TILE_SIZE;
            }
        }
        CollisionType::HillUp => {
            if dir.y == 0.0 {
                x -= (tile_y - origin.y) + TILE_SIZE;
            } else {
                y -= tile_x - origin.x;
            }
        }
        _ => {}
    }

    let dx = x - origin.x;
    let dy = y - origin.y;

    // Horizontal casts never report hits behind the origin. Vertical casts
    // may: water handling relies on negative dy.
    if dir.x != 0.0 && dir.x * dx <= 0.0 {
        return None;
    }

    Some(SensorHit {
        sx,
        sy,
        sprite,
        kind,
        x,
        y,
        dx,
        dy,
    })
}
