//! Tick-driven simulation of an ALIEN level.
//!
//! `Simulation` owns the tile grid, the name-keyed actor map and the
//! control groups. It advances one fixed tick at a time from a snapshot of
//! held keys and hands back the notifications produced by that tick.
//! Completely headless, so every scenario can be driven from tests.

pub mod actors;
pub mod context;
pub mod control;
pub mod engine;
pub mod frame;

pub use alien_core as core;
pub use alien_tiles as tiles;

pub use actors::Actor;
pub use context::SimContext;
pub use control::{ControlGroup, ControlGroups, GroupMembers};
pub use engine::{ActorSnapshot, SimConfig, SimError, Simulation, TickReport};

#[cfg(test)]
mod tests;
