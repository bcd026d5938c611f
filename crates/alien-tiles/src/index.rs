//! Static collision geometry derived from the tile grid.
//!
//! Ramps are approximated by one-pixel-high strips, one per pixel row.

use alien_core::constants::{HALF_BLOCK_HEIGHT, SPRITE_EMPTY, TILE_SIZE};
use alien_core::enums::CollisionType;
use alien_core::types::Aabb;

use crate::quadtree::QuadTree;
use crate::table::CollisionTable;

/// Smallest power of two that is at least `extent` pixels.
fn pow2_extent(extent: f64) -> f64 {
    (extent.max(1.0).ceil() as u64).next_power_of_two() as f64
}

/// Collision boxes for the tile at column `sx`, row `sy`.
pub fn tile_boxes(sx: usize, sy: usize, kind: CollisionType) -> Vec<Aabb> {
    let (x, y) = (sx as f64 * TILE_SIZE, sy as f64 * TILE_SIZE);
    let rows = TILE_SIZE as usize;

    match kind {
        CollisionType::Solid | CollisionType::WaterBody => {
            vec![Aabb::new(x, y, TILE_SIZE, TILE_SIZE).with_kind(kind)]
        }
        CollisionType::TopHalf => {
            vec![Aabb::new(x, y, TILE_SIZE, HALF_BLOCK_HEIGHT).with_kind(kind)]
        }
        // Row k is k pixels wide; row 0 is empty and skipped.
        CollisionType::HillUp => (1..rows)
            .map(|k| Aabb::new(x, y + k as f64, k as f64, 1.0).with_kind(kind))
            .collect(),
        CollisionType::HillDown => (1..rows)
            .map(|k| {
                let k = k as f64;
                Aabb::new(x + (TILE_SIZE - k), y + k, k, 1.0).with_kind(kind)
            })
            .collect(),
        CollisionType::Water | CollisionType::Exit | CollisionType::None => Vec::new(),
    }
}

/// Build the quadtree over every tile. The root covers the level rounded
/// up to a power of two on each axis so quadrants align with tiles.
pub fn build_static_index(tiles: &[Vec<u32>], table: &CollisionTable) -> QuadTree {
    let width = tiles.first().map_or(0, Vec::len) as f64 * TILE_SIZE;
    let height = tiles.len() as f64 * TILE_SIZE;
    let mut tree = QuadTree::new(Aabb::new(0.0, 0.0, pow2_extent(width), pow2_extent(height)));

    for (sy, row) in tiles.iter().enumerate() {
        for (sx, &sprite) in row.iter().enumerate() {
            if sprite == SPRITE_EMPTY {
                continue;
            }
            let Some(kind) = table.get(sprite) else {
                continue;
            };
            for item in tile_boxes(sx, sy, kind) {
                tree.insert(item);
            }
        }
    }

    log::trace!("static index rebuilt: {} boxes", tree.len());
    tree
}
