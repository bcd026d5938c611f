//! TileGrid: the level's sprite map with its collision geometry.

use glam::DVec2;
use thiserror::Error;

use alien_core::constants::{SPRITE_EMPTY, TILE_SIZE};
use alien_core::enums::CollisionType;
use alien_core::types::Aabb;

use crate::index::build_static_index;
use crate::quadtree::QuadTree;
use crate::table::CollisionTable;

#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("tile grid is empty")]
    Empty,
    #[error("row {row} has {found} tiles, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("tile coordinate ({x}, {y}) is negative")]
    NegativeCoordinate { x: i64, y: i64 },
}

/// Rectangular sprite grid, row-major, top row first.
///
/// Geometry and spatial index are rebuilt on every edit, never per tick.
#[derive(Debug, Clone)]
pub struct TileGrid {
    tiles: Vec<Vec<u32>>,
    table: CollisionTable,
    index: QuadTree,
}

impl TileGrid {
    pub fn new(tiles: Vec<Vec<u32>>, table: CollisionTable) -> Result<Self, GridError> {
        let expected = tiles.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, found)) = tiles
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(GridError::Ragged {
                row,
                expected,
                found,
            });
        }

        let index = build_static_index(&tiles, &table);
        Ok(Self {
            tiles,
            table,
            index,
        })
    }

    /// Width in tiles.
    pub fn width(&self) -> usize {
        self.tiles[0].len()
    }

    /// Height in tiles.
    pub fn height(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> &[Vec<u32>] {
        &self.tiles
    }

    pub fn table(&self) -> &CollisionTable {
        &self.table
    }

    pub fn spatial_index(&self) -> &QuadTree {
        &self.index
    }

    /// Tile containing a world position.
    pub fn world_to_tile(pos: DVec2) -> (i64, i64) {
        (
            (pos.x / TILE_SIZE).floor() as i64,
            (pos.y / TILE_SIZE).floor() as i64,
        )
    }

    pub fn in_bounds(&self, sx: i64, sy: i64) -> bool {
        sx >= 0 && sy >= 0 && (sx as usize) < self.width() && (sy as usize) < self.height()
    }

    /// Sprite at a tile, `None` outside the grid.
    pub fn sprite_at(&self, sx: i64, sy: i64) -> Option<u32> {
        if !self.in_bounds(sx, sy) {
            return None;
        }
        Some(self.tiles[sy as usize][sx as usize])
    }

    pub fn collision_type(&self, sprite: u32) -> Option<CollisionType> {
        self.table.get(sprite)
    }

    /// Set a tile, growing the grid with empty tiles when needed, then
    /// rebuild the collision geometry.
    pub fn set_sprite(&mut self, sx: i64, sy: i64, sprite: u32) -> Result<(), GridError> {
        if sx < 0 || sy < 0 {
            return Err(GridError::NegativeCoordinate { x: sx, y: sy });
        }
        let (sx, sy) = (sx as usize, sy as usize);

        let width = self.width().max(sx + 1);
        while self.tiles.len() <= sy {
            self.tiles.push(vec![SPRITE_EMPTY; width]);
        }
        for row in &mut self.tiles {
            row.resize(width, SPRITE_EMPTY);
        }

        self.tiles[sy][sx] = sprite;
        self.rebuild();
        Ok(())
    }

    fn rebuild(&mut self) {
        self.index = build_static_index(&self.tiles, &self.table);
    }

    /// Inclusive column range of the run of `sprite` through (`sx`, `sy`).
    pub fn horizontal_run(&self, sx: i64, sy: i64, sprite: u32) -> (i64, i64) {
        let mut min = sx;
        let mut max = sx;
        while self.sprite_at(max + 1, sy) == Some(sprite) {
            max += 1;
        }
        while self.sprite_at(min - 1, sy) == Some(sprite) {
            min -= 1;
        }
        (min, max)
    }

    /// Static geometry overlapping `area`.
    pub fn static_overlaps(&self, area: &Aabb) -> Vec<Aabb> {
        self.index.query(area, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_grid() -> TileGrid {
        #[rustfmt::skip]
        let tiles = vec![
            vec![1, 1, 1, 1],
            vec![1, 0, 0, 1],
            vec![1, 0x115, 0x115, 1],
            vec![1, 1, 1, 1],
        ];
        TileGrid::new(tiles, CollisionTable::standard()).unwrap()
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = TileGrid::new(vec![vec![0, 0], vec![0]], CollisionTable::new()).unwrap_err();
        assert_eq!(
            err,
            GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            TileGrid::new(Vec::new(), CollisionTable::new()).unwrap_err(),
            GridError::Empty
        );
    }

    #[test]
    fn test_sprite_at_out_of_bounds() {
        let grid = make_test_grid();
        assert_eq!(grid.sprite_at(1, 2), Some(0x115));
        assert_eq!(grid.sprite_at(-1, 0), None);
        assert_eq!(grid.sprite_at(4, 0), None);
    }

    #[test]
    fn test_world_to_tile_floors_negative() {
        assert_eq!(TileGrid::world_to_tile(DVec2::new(-1.0, 33.0)), (-1, 1));
    }

    #[test]
    fn test_set_sprite_grows_grid() {
        let mut grid = make_test_grid();
        grid.set_sprite(6, 5, 1).unwrap();
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 6);
        assert_eq!(grid.sprite_at(6, 5), Some(1));
        assert_eq!(grid.sprite_at(5, 5), Some(0), "padding is empty");
        assert!(grid.tiles().iter().all(|row| row.len() == 7), "grid stays rectangular");
    }

    #[test]
    fn test_set_sprite_rebuilds_index() {
        let mut grid = make_test_grid();
        let probe = Aabb::new(33.0, 33.0, 4.0, 4.0);
        assert!(grid.static_overlaps(&probe).is_empty());
        grid.set_sprite(1, 1, 1).unwrap();
        assert_eq!(grid.static_overlaps(&probe).len(), 1);
    }

    #[test]
    fn test_set_sprite_negative_rejected() {
        let mut grid = make_test_grid();
        assert_eq!(
            grid.set_sprite(-1, 0, 1),
            Err(GridError::NegativeCoordinate { x: -1, y: 0 })
        );
    }

    #[test]
    fn test_horizontal_run() {
        let grid = make_test_grid();
        assert_eq!(grid.horizontal_run(2, 2, 0x115), (1, 2));
    }
}
