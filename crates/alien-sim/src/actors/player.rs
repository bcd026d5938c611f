//! The player: input handling, kinematics and terrain response.
//!
//! Each update reads held keys, integrates velocity, then resolves against
//! the terrain in a fixed order: ground, ceiling, dynamic colliders, walls.
//! Gravity may be inverted, so "ground" and "ceiling" follow its sign.

use std::collections::BTreeMap;

use glam::DVec2;

use alien_core::collision::{collision_check, sign};
use alien_core::constants::*;
use alien_core::enums::{Axis, CollisionType};
use alien_core::events::{ActorEvent, Notification, PositionReport};
use alien_core::input::{InputState, Key};
use alien_tiles::{is_slippery, SensorError, SensorHit, SensorVerdict, TileGrid};

use super::body::Body;
use super::Actor;
use crate::frame::Frame;

/// Abilities granted by the marker tile in row 0 above the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub walk_on_water: bool,
    pub fly: bool,
    pub walk_upside_down: bool,
    pub super_jump: bool,
}

impl Capabilities {
    /// Read the marker in row 0 of the column containing `x`.
    pub fn at(grid: &TileGrid, x: f64) -> Self {
        let column = (x / TILE_SIZE).floor() as i64;
        let code = grid
            .sprite_at(column, 0)
            .and_then(|sprite| sprite.checked_sub(PERMISSION_TILE_BASE));
        Self {
            walk_on_water: code == Some(1),
            fly: code == Some(2),
            walk_upside_down: code == Some(3),
            super_jump: code == Some(4),
        }
    }
}

/// What the player is standing on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ground {
    pub slippery: bool,
    pub surface: CollisionType,
}

impl Default for Ground {
    fn default() -> Self {
        Self {
            slippery: false,
            surface: CollisionType::Solid,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    /// Signed; negative while walking on the ceiling.
    pub gravity: f64,
    pub friction: f64,
    pub speed: f64,
    pub ground: Ground,
    pub alive: bool,
    pub finished: bool,
    pub grounded: bool,
    pub jumping: bool,
    pub super_jumping: bool,
    last_flip_ms: Option<f64>,
    events: Vec<ActorEvent>,
    /// Names of the actors that block the player, fixed at reset.
    colliders: Vec<String>,
}

impl Player {
    pub fn new(spawn: DVec2) -> Self {
        Self {
            body: Body::new(spawn, DVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            gravity: GRAVITY,
            friction: FRICTION_DEFAULT,
            speed: PLAYER_SPEED,
            ground: Ground::default(),
            alive: true,
            finished: false,
            grounded: false,
            jumping: false,
            super_jumping: false,
            last_flip_ms: None,
            events: Vec::new(),
            colliders: Vec::new(),
        }
    }

    pub fn reset(&mut self, colliders: Vec<String>) {
        let spawn = self.body.spawn;
        *self = Self::new(spawn);
        self.colliders = colliders;
        self.events.push(ActorEvent::Restart);
    }

    pub fn colliders(&self) -> &[String] {
        &self.colliders
    }

    /// Events queued since the last position report.
    pub fn pending_events(&self) -> &[ActorEvent] {
        &self.events
    }

    pub fn push_event(&mut self, event: ActorEvent) {
        self.events.push(event);
    }

    /// Kill the player once; later calls are ignored until reset.
    pub fn kill(
        &mut self,
        reason: &str,
        sprite: Option<u32>,
        now_ms: f64,
        outbox: &mut Vec<Notification>,
    ) {
        if !self.alive {
            return;
        }
        log::info!("player died: {reason}");
        self.alive = false;
        self.events.push(ActorEvent::Died(reason.to_string()));
        self.send_position(now_ms, outbox);
        outbox.push(Notification::Died {
            reason: reason.to_string(),
            sprite,
        });
    }

    /// Flush queued events with the current position.
    pub fn send_position(&mut self, now_ms: f64, outbox: &mut Vec<Notification>) {
        let events = self.events.drain(..).map(|e| e.wire_name()).collect();
        outbox.push(Notification::Position(PositionReport {
            timestamp: now_ms / 1000.0,
            x: self.body.pos.x / TILE_SIZE,
            y: self.body.pos.y / TILE_SIZE,
            events,
        }));
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) -> Result<(), SensorError> {
        let caps = Capabilities::at(frame.grid, self.body.pos.x);
        if !self.finished {
            self.handle_input(frame.input, caps, frame.now_ms, frame.config.flip_debounce_ms);
        }
        self.update_kinematics(frame, caps)
    }

    pub fn handle_input(
        &mut self,
        input: &InputState,
        caps: Capabilities,
        now_ms: f64,
        flip_debounce_ms: f64,
    ) {
        if !caps.walk_upside_down && self.gravity < 0.0 {
            self.gravity = -self.gravity;
            self.events.push(ActorEvent::GravityNormal);
        }

        let up = sign(self.gravity);

        if input.is_down(Key::Space) && !self.jumping && self.grounded {
            self.jumping = true;
            self.grounded = false;
            self.body.vel.y = -up * JUMP_SPEED;
        }

        if input.is_down(Key::Up) && self.jumping && caps.super_jump && !self.super_jumping {
            self.super_jumping = true;
            self.body.vel.y = -up * SUPER_JUMP_SPEED;
        }

        if input.is_down(Key::Up) && input.is_down(Key::Down) {
            let rested = self
                .last_flip_ms
                .map_or(true, |last| now_ms - last > flip_debounce_ms);
            if caps.walk_upside_down && rested {
                self.last_flip_ms = Some(now_ms);
                self.gravity = -self.gravity;
                let event = if self.gravity < 0.0 {
                    ActorEvent::GravityInverted
                } else {
                    ActorEvent::GravityNormal
                };
                log::debug!("gravity flipped: {}", event.wire_name());
                self.events.push(event);
            }
        } else if caps.fly {
            if input.is_down(Key::Up) {
                self.body.vel.y = -FLY_SPEED;
            }
            if input.is_down(Key::Down) {
                self.body.vel.y = FLY_SPEED;
            }
        }

        let vel = &mut self.body.vel;
        if input.is_down(Key::Left) && vel.x > -self.speed {
            vel.x -= PLAYER_ACCELERATION;
        }
        if input.is_down(Key::Right) && vel.x < self.speed {
            vel.x += PLAYER_ACCELERATION;
        }

        let crouching = input.is_down(Key::Down);
        if self.ground.slippery && !crouching {
            let limit = SLOPE_SPEED_FRACTION * self.speed;
            match self.ground.surface {
                CollisionType::HillDown if vel.x > -limit => vel.x -= SLOPE_ACCELERATION,
                CollisionType::HillUp if vel.x < limit => vel.x += SLOPE_ACCELERATION,
                _ => {}
            }
        }

        (self.friction, self.speed) = if crouching {
            (FRICTION_CROUCH, PLAYER_SPEED)
        } else if self.ground.slippery {
            (FRICTION_SLIPPERY, PLAYER_SPEED_SLIPPERY)
        } else {
            (FRICTION_DEFAULT, PLAYER_SPEED)
        };
    }

    fn update_kinematics(
        &mut self,
        frame: &mut Frame<'_>,
        caps: Capabilities,
    ) -> Result<(), SensorError> {
        if !self.alive && !self.finished {
            return Ok(());
        }

        let before = self.body.pos;
        self.body.vel.x *= self.friction;
        self.body.vel.y += self.gravity;
        self.body.pos += self.body.vel;

        self.collide_ground(frame.grid, caps, frame.now_ms, frame.outbox)?;
        self.collide_ceiling(frame.grid, frame.outbox)?;
        self.collide_actors(frame.others);
        self.collide_walls(frame.grid, frame.outbox)?;

        if self.body.pos != before || !self.events.is_empty() {
            self.send_position(frame.now_ms, frame.outbox);
        }
        Ok(())
    }

    /// Cast a probe that reports exit tiles on the way without stopping.
    fn probe(
        &mut self,
        grid: &TileGrid,
        origin: DVec2,
        dir: DVec2,
        outbox: &mut Vec<Notification>,
    ) -> Result<Option<SensorHit>, SensorError> {
        let finished = &mut self.finished;
        let events = &mut self.events;
        let outcome = grid.sensor(origin, dir, SENSOR_LENGTH, |hit| {
            if hit.kind != CollisionType::Exit {
                return SensorVerdict::Stop(hit);
            }
            if hit.dx == 0.0 && !*finished {
                log::info!("exit reached at tile ({}, {})", hit.sx, hit.sy);
                *finished = true;
                events.push(ActorEvent::Exit);
                outbox.push(Notification::Finished);
            }
            SensorVerdict::Continue
        })?;
        Ok(outcome.hit().copied())
    }

    /// Two parallel probes along the gravity axis, `dir_y` pointing away
    /// from the player's feet (positive) or head (negative).
    fn probe_pair(
        &mut self,
        grid: &TileGrid,
        dir_y: f64,
        outbox: &mut Vec<Notification>,
    ) -> Result<[Option<SensorHit>; 2], SensorError> {
        let pos = self.body.pos;
        let ori_y = pos.y
            + PROBE_INSET
            + if dir_y > 0.0 {
                self.body.size.y - 2.0 * PROBE_INSET
            } else {
                0.0
            };
        let dir = DVec2::new(0.0, dir_y);
        let left = self.probe(grid, DVec2::new(pos.x + PLAYER_SENSOR_LEFT, ori_y), dir, outbox)?;
        let right = self.probe(grid, DVec2::new(pos.x + PLAYER_SENSOR_RIGHT, ori_y), dir, outbox)?;
        Ok([left, right])
    }

    fn collide_ground(
        &mut self,
        grid: &TileGrid,
        caps: Capabilities,
        now_ms: f64,
        outbox: &mut Vec<Notification>,
    ) -> Result<(), SensorError> {
        let dir_y = sign(self.gravity);
        let hits = self.probe_pair(grid, dir_y, outbox)?;
        let (min, max) = combine(hits);

        let both = |kind: CollisionType| hits.iter().all(|h| h.is_some_and(|h| h.kind == kind));
        let on_water = both(CollisionType::Water);
        let on_water_body = both(CollisionType::WaterBody);
        let skimming = caps.walk_on_water
            && self.body.vel.x.abs() > WATER_WALK_MIN_SPEED
            && !self.jumping;

        match (min, max) {
            (Some(min), _) if dir_y > 0.0 && min.dy < GROUND_SNAP => {
                if on_water && !skimming {
                    if min.dy < WATER_DROWN_DEPTH {
                        self.kill("water", Some(min.sprite), now_ms, outbox);
                    }
                    return Ok(());
                }
                if on_water_body && !skimming {
                    self.kill("water", Some(min.sprite), now_ms, outbox);
                    return Ok(());
                }
                self.body.pos.y = min.y - self.body.size.y;
                self.hit_ground(min.sprite, min.kind);
            }
            (_, Some(max)) if dir_y < 0.0 && max.dy > -GROUND_SNAP => {
                self.body.pos.y = max.y;
                self.body.vel.y = 0.0;
                self.grounded = true;
                self.jumping = false;
            }
            _ => self.grounded = false,
        }
        Ok(())
    }

    fn collide_ceiling(
        &mut self,
        grid: &TileGrid,
        outbox: &mut Vec<Notification>,
    ) -> Result<(), SensorError> {
        let dir_y = -sign(self.gravity);
        let (min, max) = combine(self.probe_pair(grid, dir_y, outbox)?);

        match (min, max) {
            (_, Some(max)) if dir_y < 0.0 && max.dy > -CEILING_SNAP => {
                self.body.pos.y = max.y - CEILING_OVERLAP;
                self.body.vel.y = 0.0;
            }
            (Some(min), _) if dir_y > 0.0 && min.dy < CEILING_SNAP => {
                self.body.pos.y = min.y - self.body.size.y + CEILING_OVERLAP;
                self.body.vel.y = 0.0;
            }
            _ => {}
        }
        Ok(())
    }

    fn collide_actors(&mut self, others: &BTreeMap<String, Actor>) {
        for name in &self.colliders {
            let Some(actor) = others.get(name) else {
                continue;
            };
            let Some(collider) = actor.collider() else {
                continue;
            };
            let Some(hit) = collision_check(&self.body.aabb(), &collider) else {
                continue;
            };
            match hit.axis {
                Axis::X => {
                    self.body.pos.x += hit.normal.x;
                    self.body.vel.x = 0.0;
                }
                Axis::Y => {
                    self.body.pos.y += hit.normal.y;
                    self.body.vel.y = 0.0;
                    self.grounded = true;
                    self.jumping = false;
                    self.super_jumping = false;
                    self.ground = Ground {
                        slippery: is_slippery(actor.sprite()),
                        surface: CollisionType::Solid,
                    };
                }
            }
        }
    }

    fn collide_walls(
        &mut self,
        grid: &TileGrid,
        outbox: &mut Vec<Notification>,
    ) -> Result<(), SensorError> {
        let pos = self.body.pos;
        let size = self.body.size;
        let probe_y = pos.y + size.y - WALL_PROBE_RISE;

        let right = DVec2::new(pos.x + size.x - WALL_PROBE_INSET, probe_y);
        if let Some(hit) = self.probe(grid, right, DVec2::X, outbox)? {
            if hit.dx < WALL_SNAP {
                self.body.vel.x = 0.0;
                self.body.pos.x += hit.dx - WALL_SNAP;
            }
        }

        let left = DVec2::new(self.body.pos.x + WALL_PROBE_INSET, probe_y);
        if let Some(hit) = self.probe(grid, left, DVec2::NEG_X, outbox)? {
            if hit.dx > -WALL_SNAP {
                self.body.vel.x = 0.0;
                self.body.pos.x += hit.dx + WALL_SNAP;
            }
        }
        Ok(())
    }

    fn hit_ground(&mut self, sprite: u32, surface: CollisionType) {
        self.body.vel.y = 0.0;
        self.grounded = true;
        self.jumping = false;
        self.super_jumping = false;
        self.ground = Ground {
            slippery: is_slippery(sprite),
            surface,
        };
    }
}

/// Nearest-upward and nearest-downward of two probe hits.
fn combine(hits: [Option<SensorHit>; 2]) -> (Option<SensorHit>, Option<SensorHit>) {
    let mut min: Option<SensorHit> = None;
    let mut max: Option<SensorHit> = None;
    for hit in hits.into_iter().flatten() {
        if min.map_or(true, |m| hit.y < m.y) {
            min = Some(hit);
        }
        if max.map_or(true, |m| hit.y > m.y) {
            max = Some(hit);
        }
    }
    (min, max)
}
