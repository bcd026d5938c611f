//! Shared simulation context: static geometry plus control groups.

use alien_tiles::{QuadTree, TileGrid};

use crate::control::ControlGroups;

/// Everything actors share that is not another actor.
#[derive(Debug, Clone)]
pub struct SimContext {
    pub grid: TileGrid,
    pub control_groups: ControlGroups,
}

impl SimContext {
    pub fn new(grid: TileGrid) -> Self {
        Self {
            grid,
            control_groups: ControlGroups::default(),
        }
    }

    /// Quadtree over the static tile geometry. Rebuilt by the grid on edit.
    pub fn spatial_index(&self) -> &QuadTree {
        self.grid.spatial_index()
    }
}
