//! Pushable rocks. A rock landing in quicksand petrifies the whole sand
//! row into a static ground slab.

use glam::DVec2;

use alien_core::collision::collision_check;
use alien_core::constants::*;
use alien_core::enums::{Axis, CollisionType, RockMode};
use alien_core::input::Key;
use alien_core::types::Aabb;
use alien_tiles::{SensorVerdict, TileGrid};

use super::body::Body;
use super::physics::{probe_ground, settle_and_fall, ProbeOrigin};
use crate::engine::SimError;
use crate::frame::{find_player, Frame};

#[derive(Debug, Clone, PartialEq)]
pub struct Rock {
    pub body: Body,
    pub sprite: u32,
    pub mode: RockMode,
}

impl Rock {
    pub fn new(spawn: DVec2, sprite: u32) -> Self {
        Self {
            body: Body::new(spawn, DVec2::splat(ACTOR_SIZE)),
            sprite,
            mode: RockMode::Rock,
        }
    }

    pub fn reset(&mut self) {
        self.body.reset();
        self.mode = RockMode::Rock;
    }

    /// Box the player collides with. A rolling rock is narrower and
    /// lower than its sprite.
    pub fn collider(&self) -> Aabb {
        let aabb = self.body.aabb();
        match self.mode {
            RockMode::Rock => Aabb::new(
                aabb.x + ROCK_COLLIDER_INSET_X,
                aabb.y + ROCK_COLLIDER_INSET_TOP,
                aabb.w - 2.0 * ROCK_COLLIDER_INSET_X,
                aabb.h - ROCK_COLLIDER_INSET_TOP,
            ),
            RockMode::Ground => aabb,
        }
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) -> Result<(), SimError> {
        if self.mode == RockMode::Ground {
            return Ok(());
        }

        let mut quicksand = None;
        let ground = probe_ground(&self.body, frame.grid, ProbeOrigin::Base, |mut hit| {
            if hit.kind == CollisionType::Water {
                if hit.sprite == SPRITE_QUICKSAND {
                    quicksand = Some((hit.sx, hit.sy));
                    return SensorVerdict::Abort;
                }
                hit.y += ROCK_WATER_SINK;
                hit.dy += ROCK_WATER_SINK;
            }
            SensorVerdict::Stop(hit)
        })?;

        if let Some((sx, sy)) = quicksand {
            self.petrify(frame.grid, sx, sy);
            return Ok(());
        }
        settle_and_fall(&mut self.body, ground);

        let player = find_player(frame.others, &frame.config.player_name)?;
        if !frame.input.is_down(Key::P) {
            return Ok(());
        }
        if let Some(hit) = collision_check(&self.body.contact_strip(), &player.body.aabb()) {
            if hit.axis == Axis::X {
                self.body.pos.x += hit.normal.x;
            }
        }
        Ok(())
    }

    /// Become a static slab covering the contiguous sand run at row `sy`.
    fn petrify(&mut self, grid: &TileGrid, sx: i64, sy: i64) {
        let (first, last) = grid.horizontal_run(sx, sy, SPRITE_QUICKSAND);
        self.mode = RockMode::Ground;
        self.body.vel = DVec2::ZERO;
        self.body.pos = DVec2::new(first as f64 * TILE_SIZE, sy as f64 * TILE_SIZE);
        self.body.size = DVec2::new((last - first + 1) as f64 * TILE_SIZE, TILE_SIZE);
        log::info!(
            "rock petrified quicksand row {sy} from column {first} to {last}"
        );
    }
}
