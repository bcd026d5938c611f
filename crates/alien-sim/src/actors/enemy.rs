//! Flying and walking enemies that hunt the player.

use std::f64::consts::PI;

use glam::DVec2;

use alien_core::collision::{collision_check, lerp};
use alien_core::constants::*;
use alien_core::events::ActorEvent;

use super::body::Body;
use super::physics::{fall, ProbeOrigin};
use crate::engine::SimError;
use crate::frame::{find_player, Frame};

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: Body,
    pub sprite: u32,
    /// Zero means passive; anything else hunts and kills.
    pub aggression: u32,
    pub killable: bool,
    pub flying: bool,
    pub alive: bool,
    /// Radians; eases toward π while dying.
    pub rotation: f64,
    recorded_aggression: u32,
    recorded_killable: bool,
}

impl Enemy {
    pub fn new(spawn: DVec2, sprite: u32, aggression: u32, killable: bool) -> Self {
        let mut enemy = Self {
            body: Body::new(spawn, DVec2::splat(ACTOR_SIZE)),
            sprite,
            aggression,
            killable,
            flying: true,
            alive: true,
            rotation: 0.0,
            recorded_aggression: aggression,
            recorded_killable: killable,
        };
        enemy.reset();
        enemy
    }

    /// Values as they appear in the level document.
    pub fn recorded(&self) -> (u32, bool) {
        (self.recorded_aggression, self.recorded_killable)
    }

    pub fn reset(&mut self) {
        self.body.reset();
        self.alive = true;
        self.rotation = 0.0;
        self.flying = true;
        self.killable = self.recorded_killable;
        self.aggression = self.recorded_aggression;

        match self.sprite {
            SPRITE_ENEMY_LADYBUG => {
                self.flying = false;
                self.killable = false;
            }
            SPRITE_ENEMY_BEE => self.killable = false,
            SPRITE_ENEMY_FLY | SPRITE_ENEMY_BAT => self.aggression = 1,
            _ => {}
        }
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) -> Result<(), SimError> {
        if !self.alive {
            fall(&mut self.body, frame.grid, ProbeOrigin::Inset, ACTOR_WATER_SINK)?;
            self.rotation = lerp(self.rotation, PI, DYING_ROTATION_LERP);
            return Ok(());
        }

        let player = find_player(frame.others, &frame.config.player_name)?;
        let target = player.body.aabb();
        let aggressive = self.aggression != 0;

        let underneath = target.center_x() >= self.body.pos.x
            && target.center_x() <= self.body.pos.x + self.body.size.x
            && target.y > self.body.pos.y;
        let went_past = target.x - 2.0 * target.w > self.body.spawn.x;

        if aggressive {
            let goal = if underneath || went_past {
                player.body.pos
            } else {
                self.body.spawn
            };
            self.body.pos.x = lerp(self.body.pos.x, goal.x, HUNT_LERP_X);
            self.body.pos.y = lerp(self.body.pos.y, goal.y, HUNT_LERP_Y);
        }

        if !self.flying {
            fall(&mut self.body, frame.grid, ProbeOrigin::Inset, ACTOR_WATER_SINK)?;
        }

        let Some(hit) = collision_check(&self.body.aabb(), &player.body.aabb()) else {
            return Ok(());
        };
        if hit.normal.y < 0.0 || went_past {
            if aggressive {
                player.kill("enemy", Some(self.sprite), frame.now_ms, frame.outbox);
            }
        } else if self.killable {
            log::debug!("{} stomped", frame.name);
            self.alive = false;
            self.rotation = 0.0;
            self.body.vel.y = player.body.vel.y;
            player.push_event(ActorEvent::KilledEnemy);
        }
        Ok(())
    }
}
