//! Frogs eat worms and can be shoved by the player.

use glam::DVec2;

use alien_core::collision::collision_check;
use alien_core::constants::{ACTOR_SIZE, ACTOR_WATER_SINK, FROG_MAX_PUSH};
use alien_core::enums::Axis;
use alien_core::input::Key;

use super::body::Body;
use super::physics::{fall, ProbeOrigin};
use super::Actor;
use crate::engine::SimError;
use crate::frame::{find_player, Frame};

#[derive(Debug, Clone, PartialEq)]
pub struct Frog {
    pub body: Body,
    pub sprite: u32,
    /// Worms present at reset.
    worms: Vec<String>,
}

impl Frog {
    pub fn new(spawn: DVec2, sprite: u32) -> Self {
        Self {
            body: Body::new(spawn, DVec2::splat(ACTOR_SIZE)),
            sprite,
            worms: Vec::new(),
        }
    }

    pub fn reset(&mut self, worms: Vec<String>) {
        self.body.reset();
        self.worms = worms;
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) -> Result<(), SimError> {
        fall(&mut self.body, frame.grid, ProbeOrigin::Inset, ACTOR_WATER_SINK)?;

        let me = self.body.aabb();
        for name in &self.worms {
            if let Some(Actor::Worm(worm)) = frame.others.get_mut(name) {
                if worm.alive && collision_check(&me, &worm.body.aabb()).is_some() {
                    log::debug!("{} ate {name}", frame.name);
                    worm.kill();
                }
            }
        }

        let player = find_player(frame.others, &frame.config.player_name)?;
        if !frame.input.is_down(Key::P) {
            return Ok(());
        }
        if let Some(hit) = collision_check(&me, &player.body.aabb()) {
            if hit.axis == Axis::X && hit.normal.x.abs() < FROG_MAX_PUSH {
                self.body.pos.x += hit.normal.x;
            }
        }
        Ok(())
    }
}
