//! Worms rear up toward a player passing overhead and kill on contact.

use glam::DVec2;

use alien_core::collision::{collision_check_x, collision_check_y, lerp};
use alien_core::constants::*;

use super::body::Body;
use super::physics::{fall, ProbeOrigin};
use crate::engine::SimError;
use crate::frame::{find_player, Frame};

#[derive(Debug, Clone, PartialEq)]
pub struct Worm {
    pub body: Body,
    pub sprite: u32,
    /// Tallest the worm will stretch, in pixels.
    pub max_height: f64,
    pub alive: bool,
    pub rearing: bool,
    /// Height the worm is stretching toward while rearing.
    pub rear_height: f64,
}

impl Worm {
    pub fn new(spawn: DVec2, sprite: u32, max_height: f64) -> Self {
        Self {
            body: Body::new(spawn, DVec2::splat(ACTOR_SIZE)),
            sprite,
            max_height,
            alive: true,
            rearing: false,
            rear_height: ACTOR_SIZE,
        }
    }

    pub fn reset(&mut self) {
        self.body.reset();
        self.alive = true;
        self.rearing = false;
        self.rear_height = ACTOR_SIZE;
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) -> Result<(), SimError> {
        fall(&mut self.body, frame.grid, ProbeOrigin::Inset, ACTOR_WATER_SINK)?;

        let player = find_player(frame.others, &frame.config.player_name)?;
        let me = self.body.aabb();
        let target = player.body.aabb();

        if self.alive && collision_check_x(&me, &target).is_some() {
            if collision_check_y(&me, &target).is_some() {
                let reason = format!("worm/{}", frame.name);
                player.kill(&reason, Some(self.sprite), frame.now_ms, frame.outbox);
            } else {
                let reach = (me.bottom() - target.y).min(self.max_height);
                self.rearing = true;
                self.rear_height = reach.max(ACTOR_SIZE);
            }
        } else {
            self.rearing = false;
        }

        // Grow upward: the base stays where it is.
        let (goal, rate) = if self.rearing {
            (self.rear_height, WORM_REAR_LERP)
        } else {
            (ACTOR_SIZE, WORM_SETTLE_LERP)
        };
        let height = lerp(self.body.size.y, goal, rate);
        self.body.pos.y += self.body.size.y - height;
        self.body.size.y = height;
        Ok(())
    }
}
