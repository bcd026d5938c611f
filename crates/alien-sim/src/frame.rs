//! Per-update view handed to an actor.
//!
//! The updating actor is taken out of the map for the duration of its
//! update, so `others` holds every other actor and can be borrowed mutably
//! alongside it.

use std::collections::BTreeMap;

use alien_core::events::Notification;
use alien_core::input::InputState;
use alien_tiles::TileGrid;

use crate::actors::{Actor, Player};
use crate::engine::{SimConfig, SimError};

pub struct Frame<'a> {
    pub grid: &'a TileGrid,
    pub input: &'a InputState,
    pub config: &'a SimConfig,
    /// Clock at the start of this tick.
    pub now_ms: f64,
    /// Name of the actor being updated.
    pub name: &'a str,
    pub others: &'a mut BTreeMap<String, Actor>,
    pub outbox: &'a mut Vec<Notification>,
    /// Set by sensors whose state changed this update.
    pub recompute: bool,
}

impl Frame<'_> {
    pub fn request_recompute(&mut self) {
        self.recompute = true;
    }
}

/// The player among `others`, or `MissingActor`.
pub fn find_player<'m>(
    others: &'m mut BTreeMap<String, Actor>,
    name: &str,
) -> Result<&'m mut Player, SimError> {
    match others.get_mut(name) {
        Some(Actor::Player(player)) => Ok(player),
        _ => Err(SimError::MissingActor(name.to_string())),
    }
}
