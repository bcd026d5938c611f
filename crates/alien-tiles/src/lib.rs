//! Tile map for ALIEN levels.
//!
//! Sprite grid, sprite→collision table, the tile-stepped ray sensor
//! every actor probes the level with, and the quadtree over static
//! level geometry.

pub use alien_core as core;

pub mod grid;
pub mod index;
pub mod quadtree;
pub mod sensor;
pub mod table;

// Re-export key types for convenience.
pub use grid::{GridError, TileGrid};
pub use quadtree::QuadTree;
pub use sensor::{SensorError, SensorHit, SensorOutcome, SensorVerdict};
pub use table::{is_slippery, CollisionTable};
