//! Simulation engine.
//!
//! `Simulation` owns the tile grid, every actor by name, the control groups
//! and the clock. One call to `tick` updates each actor in name order with
//! in-place mutation: an actor sees the effects of every actor updated
//! before it in the same tick.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use alien_core::constants::{
    DEFAULT_PLAYER_NAME, GRAVITY_FLIP_DEBOUNCE_MS, LEVEL_VERSION, TICK_MS,
};
use alien_core::enums::ActorKind;
use alien_core::events::Notification;
use alien_core::input::InputState;
use alien_core::level::{LevelDocument, LevelError, ObjectRecord};
use alien_core::types::{Aabb, SimTime};
use alien_tiles::{CollisionTable, GridError, SensorError, TileGrid};

use crate::actors::{Actor, Player, Roster};
use crate::context::SimContext;
use crate::control::{ControlGroups, GroupMembers};
use crate::frame::Frame;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("required actor {0:?} is missing")]
    MissingActor(String),
    #[error("no actor named {0:?}")]
    UnknownActor(String),
    #[error("actor {0:?} does not belong to a control group")]
    NotGroupMember(String),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Sensor(#[from] SensorError),
}

/// Tuning that is not a physics constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed tick duration in milliseconds.
    pub tick_ms: f64,
    /// Minimum time between two gravity flips.
    pub flip_debounce_ms: f64,
    /// Actor that enemies hunt and whose position is reported.
    pub player_name: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            flip_debounce_ms: GRAVITY_FLIP_DEBOUNCE_MS,
            player_name: DEFAULT_PLAYER_NAME.to_string(),
        }
    }
}

/// What one tick produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickReport {
    /// Clock after the tick.
    pub time: SimTime,
    pub notifications: Vec<Notification>,
}

/// Read-only view of one actor for tools and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorSnapshot {
    pub name: String,
    pub kind: ActorKind,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub sprite: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alive: Option<bool>,
}

impl GroupMembers for BTreeMap<String, Actor> {
    fn sensor_active(&self, name: &str) -> Option<bool> {
        self.get(name)?.is_active()
    }

    fn set_actor_state(&mut self, name: &str, state: bool) -> bool {
        self.get_mut(name).is_some_and(|actor| actor.set_state(state))
    }
}

fn join_group(groups: &mut ControlGroups, name: &str, kind: ActorKind, id: u32) {
    if kind.is_group_sensor() {
        groups.add_sensor(id, name);
    }
    if kind.is_group_actor() {
        groups.add_actor(id, name);
    }
}

pub struct Simulation {
    ctx: SimContext,
    actors: BTreeMap<String, Actor>,
    time: SimTime,
    config: SimConfig,
    outbox: Vec<Notification>,
}

impl Simulation {
    /// Empty world over `grid`. Add actors, then call `reset()`.
    pub fn new(grid: TileGrid, config: SimConfig) -> Self {
        Self {
            ctx: SimContext::new(grid),
            actors: BTreeMap::new(),
            time: SimTime::default(),
            config,
            outbox: Vec::new(),
        }
    }

    /// Build and reset a world from a level document.
    pub fn from_document(
        doc: &LevelDocument,
        table: CollisionTable,
        config: SimConfig,
    ) -> Result<Self, SimError> {
        doc.validate()?;
        let grid = TileGrid::new(doc.level.clone(), table)?;
        let mut sim = Self::new(grid, config);
        for record in &doc.objects {
            sim.add_actor(record);
        }
        sim.warn_buried_spawns();
        sim.reset()?;
        log::info!(
            "level loaded: {}x{} tiles, {} actors, {} control groups",
            sim.ctx.grid.width(),
            sim.ctx.grid.height(),
            sim.actors.len(),
            sim.ctx.control_groups.len()
        );
        Ok(sim)
    }

    /// Parse a JSON level and build a world from it.
    pub fn from_json(text: &str, table: CollisionTable, config: SimConfig) -> Result<Self, SimError> {
        let doc = LevelDocument::from_json(text)?;
        Self::from_document(&doc, table, config)
    }

    /// Insert or replace an actor and register its group membership.
    /// Takes effect for collider lists at the next `reset()`.
    pub fn add_actor(&mut self, record: &ObjectRecord) {
        self.remove_actor(&record.name);
        let actor = Actor::from_record(record);
        if let Some(id) = actor.control_group() {
            join_group(&mut self.ctx.control_groups, &record.name, actor.kind(), id);
        }
        self.actors.insert(record.name.clone(), actor);
    }

    pub fn remove_actor(&mut self, name: &str) -> Option<Actor> {
        let actor = self.actors.remove(name)?;
        self.ctx.control_groups.forget(name);
        Some(actor)
    }

    /// Move an actor to another control group.
    pub fn set_control_group(&mut self, name: &str, id: u32) -> Result<(), SimError> {
        let actor = self
            .actors
            .get_mut(name)
            .ok_or_else(|| SimError::UnknownActor(name.to_string()))?;
        if !actor.set_control_group(id) {
            return Err(SimError::NotGroupMember(name.to_string()));
        }
        self.ctx.control_groups.forget(name);
        join_group(&mut self.ctx.control_groups, name, actor.kind(), id);
        Ok(())
    }

    /// Put every actor back at its spawn. Also the restart hook for the
    /// game shell.
    pub fn reset(&mut self) -> Result<(), SimError> {
        if !matches!(self.actors.get(&self.config.player_name), Some(Actor::Player(_))) {
            return Err(SimError::MissingActor(self.config.player_name.clone()));
        }

        let mut roster = Roster::default();
        for (name, actor) in &self.actors {
            if actor.kind().collides_with_player() {
                roster.colliders.push(name.clone());
            }
            if actor.kind() == ActorKind::Worm {
                roster.worms.push(name.clone());
            }
        }
        for actor in self.actors.values_mut() {
            actor.reset(&roster);
        }
        log::info!("reset {} actors", self.actors.len());
        Ok(())
    }

    /// Advance one tick with the given held keys.
    pub fn tick(&mut self, input: &InputState) -> Result<TickReport, SimError> {
        let names: Vec<String> = self.actors.keys().cloned().collect();
        for name in names {
            let Some(mut actor) = self.actors.remove(&name) else {
                continue;
            };
            let mut frame = Frame {
                grid: &self.ctx.grid,
                input,
                config: &self.config,
                now_ms: self.time.elapsed_ms,
                name: &name,
                others: &mut self.actors,
                outbox: &mut self.outbox,
                recompute: false,
            };
            let result = actor.update(&mut frame);
            let recompute = frame.recompute;
            self.actors.insert(name, actor);
            result?;

            if recompute {
                self.recompute_control_groups();
            }
        }

        self.time.advance(self.config.tick_ms);
        Ok(TickReport {
            time: self.time,
            notifications: std::mem::take(&mut self.outbox),
        })
    }

    /// Re-evaluate every control group and push states to its actors.
    pub fn recompute_control_groups(&mut self) {
        self.ctx.control_groups.recompute_all(&mut self.actors);
    }

    /// Edit one tile; geometry and spatial index are rebuilt before returning.
    pub fn set_tile(&mut self, sx: i64, sy: i64, sprite: u32) -> Result<(), SimError> {
        self.ctx.grid.set_sprite(sx, sy, sprite)?;
        Ok(())
    }

    pub fn to_document(&self) -> LevelDocument {
        LevelDocument {
            version: LEVEL_VERSION,
            level: self.ctx.grid.tiles().to_vec(),
            objects: self
                .actors
                .iter()
                .map(|(name, actor)| actor.to_record(name))
                .collect(),
        }
    }

    pub fn snapshot(&self) -> Vec<ActorSnapshot> {
        self.actors
            .iter()
            .map(|(name, actor)| {
                let body = actor.body();
                ActorSnapshot {
                    name: name.clone(),
                    kind: actor.kind(),
                    x: body.pos.x,
                    y: body.pos.y,
                    w: body.size.x,
                    h: body.size.y,
                    sprite: actor.sprite(),
                    alive: actor.alive(),
                }
            })
            .collect()
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn actor(&self, name: &str) -> Option<&Actor> {
        self.actors.get(name)
    }

    pub fn actor_mut(&mut self, name: &str) -> Option<&mut Actor> {
        self.actors.get_mut(name)
    }

    pub fn actors(&self) -> impl Iterator<Item = (&str, &Actor)> {
        self.actors.iter().map(|(name, actor)| (name.as_str(), actor))
    }

    pub fn player(&self) -> Option<&Player> {
        match self.actors.get(&self.config.player_name) {
            Some(Actor::Player(player)) => Some(player),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        match self.actors.get_mut(&self.config.player_name) {
            Some(Actor::Player(player)) => Some(player),
            _ => None,
        }
    }

    /// Actors whose spawn box overlaps static geometry usually mean a
    /// broken level.
    fn warn_buried_spawns(&self) {
        for (name, actor) in &self.actors {
            let body = actor.body();
            let spawn = Aabb::from_pos_size(body.spawn, body.size);
            let blocking = self
                .ctx
                .grid
                .static_overlaps(&spawn)
                .into_iter()
                .filter(|b| b.kind.is_some_and(|k| k.is_blocking()))
                .count();
            if blocking > 0 {
                log::warn!(
                    "{name} spawns inside {blocking} static boxes at ({}, {})",
                    spawn.x,
                    spawn.y
                );
            }
        }
    }
}
