//! Actor state machines and the record-driven factory.
//!
//! `Actor` is a closed set of variants, one per kind in the level format.
//! Each variant owns its state; the engine dispatches updates by name
//! order and the player reads colliders through `Actor::collider`.

pub mod body;
pub mod critter;
pub mod door;
pub mod enemy;
pub mod frog;
pub mod physics;
pub mod platform;
pub mod player;
pub mod rock;
pub mod switch;
pub mod worm;

use glam::DVec2;

use alien_core::constants::{ACTOR_SIZE, SNAIL_HEIGHT, SNAIL_WIDTH, SPRITE_PLAYER};
use alien_core::enums::ActorKind;
use alien_core::level::{ActorRecord, ObjectRecord};
use alien_core::types::Aabb;

pub use body::Body;
pub use critter::Critter;
pub use door::Door;
pub use enemy::Enemy;
pub use frog::Frog;
pub use platform::Platform;
pub use player::{Capabilities, Ground, Player};
pub use rock::Rock;
pub use switch::{HitSwitch, Switch};
pub use worm::Worm;

use crate::engine::SimError;
use crate::frame::Frame;

#[derive(Debug, Clone, PartialEq)]
pub enum Actor {
    Player(Player),
    Enemy(Enemy),
    Worm(Worm),
    Rock(Rock),
    Frog(Frog),
    Snail(Critter),
    Bomb(Critter),
    Door(Door),
    Switch(Switch),
    HitSwitch(HitSwitch),
    Platform(Platform),
}

/// Names of other actors an actor keeps track of, gathered at reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    /// Actors that block the player.
    pub colliders: Vec<String>,
    pub worms: Vec<String>,
}

impl Actor {
    /// Build an actor from its level record, positioned at its spawn.
    pub fn from_record(record: &ObjectRecord) -> Self {
        let spawn = DVec2::new(record.x, record.y);
        match &record.actor {
            ActorRecord::Player {} => Actor::Player(Player::new(spawn)),
            ActorRecord::Enemy {
                sprite,
                aggression_level,
                killable,
            } => Actor::Enemy(Enemy::new(spawn, *sprite, *aggression_level, *killable)),
            ActorRecord::Worm { sprite, max_height } => {
                Actor::Worm(Worm::new(spawn, *sprite, *max_height))
            }
            ActorRecord::Rock { sprite } => Actor::Rock(Rock::new(spawn, *sprite)),
            ActorRecord::Frog { sprite } => Actor::Frog(Frog::new(spawn, *sprite)),
            ActorRecord::Snail { sprite } => Actor::Snail(Critter::new(
                spawn,
                DVec2::new(SNAIL_WIDTH, SNAIL_HEIGHT),
                *sprite,
            )),
            ActorRecord::Bomb { sprite } => {
                Actor::Bomb(Critter::new(spawn, DVec2::splat(ACTOR_SIZE), *sprite))
            }
            ActorRecord::Door {
                direction,
                control_group,
                sprite,
            } => Actor::Door(Door::new(spawn, *sprite, *direction, *control_group)),
            ActorRecord::Switch {
                sprite,
                control_group,
                active_state,
            } => Actor::Switch(Switch::new(spawn, *sprite, *control_group, *active_state)),
            ActorRecord::HitSwitch {
                control_group,
                sprite,
            } => Actor::HitSwitch(HitSwitch::new(spawn, *sprite, *control_group)),
            ActorRecord::Platform {
                direction,
                distance,
                control_group,
                sprite,
            } => Actor::Platform(Platform::new(
                spawn,
                *sprite,
                *direction,
                *distance,
                *control_group,
            )),
        }
    }

    /// Level record for this actor, at its spawn position.
    pub fn to_record(&self, name: &str) -> ObjectRecord {
        let actor = match self {
            Actor::Player(_) => ActorRecord::Player {},
            Actor::Enemy(enemy) => {
                let (aggression_level, killable) = enemy.recorded();
                ActorRecord::Enemy {
                    sprite: enemy.sprite,
                    aggression_level,
                    killable,
                }
            }
            Actor::Worm(worm) => ActorRecord::Worm {
                sprite: worm.sprite,
                max_height: worm.max_height,
            },
            Actor::Rock(rock) => ActorRecord::Rock {
                sprite: rock.sprite,
            },
            Actor::Frog(frog) => ActorRecord::Frog {
                sprite: frog.sprite,
            },
            Actor::Snail(snail) => ActorRecord::Snail {
                sprite: snail.sprite,
            },
            Actor::Bomb(bomb) => ActorRecord::Bomb {
                sprite: bomb.sprite,
            },
            Actor::Door(door) => ActorRecord::Door {
                direction: door.role,
                control_group: door.control_group,
                sprite: door.sprite,
            },
            Actor::Switch(switch) => ActorRecord::Switch {
                sprite: switch.base_sprite(),
                control_group: switch.control_group,
                active_state: switch.active_state,
            },
            Actor::HitSwitch(hit) => ActorRecord::HitSwitch {
                control_group: hit.control_group,
                sprite: hit.sprite,
            },
            Actor::Platform(platform) => ActorRecord::Platform {
                direction: platform.direction,
                distance: platform.distance,
                control_group: platform.control_group,
                sprite: platform.sprite,
            },
        };
        let spawn = self.body().spawn;
        ObjectRecord {
            name: name.to_string(),
            x: spawn.x,
            y: spawn.y,
            actor,
        }
    }

    pub fn kind(&self) -> ActorKind {
        match self {
            Actor::Player(_) => ActorKind::Player,
            Actor::Enemy(_) => ActorKind::Enemy,
            Actor::Worm(_) => ActorKind::Worm,
            Actor::Rock(_) => ActorKind::Rock,
            Actor::Frog(_) => ActorKind::Frog,
            Actor::Snail(_) => ActorKind::Snail,
            Actor::Bomb(_) => ActorKind::Bomb,
            Actor::Door(_) => ActorKind::Door,
            Actor::Switch(_) => ActorKind::Switch,
            Actor::HitSwitch(_) => ActorKind::HitSwitch,
            Actor::Platform(_) => ActorKind::Platform,
        }
    }

    pub fn body(&self) -> &Body {
        match self {
            Actor::Player(a) => &a.body,
            Actor::Enemy(a) => &a.body,
            Actor::Worm(a) => &a.body,
            Actor::Rock(a) => &a.body,
            Actor::Frog(a) => &a.body,
            Actor::Snail(a) | Actor::Bomb(a) => &a.body,
            Actor::Door(a) => &a.body,
            Actor::Switch(a) => &a.body,
            Actor::HitSwitch(a) => &a.body,
            Actor::Platform(a) => &a.body,
        }
    }

    pub fn body_mut(&mut self) -> &mut Body {
        match self {
            Actor::Player(a) => &mut a.body,
            Actor::Enemy(a) => &mut a.body,
            Actor::Worm(a) => &mut a.body,
            Actor::Rock(a) => &mut a.body,
            Actor::Frog(a) => &mut a.body,
            Actor::Snail(a) | Actor::Bomb(a) => &mut a.body,
            Actor::Door(a) => &mut a.body,
            Actor::Switch(a) => &mut a.body,
            Actor::HitSwitch(a) => &mut a.body,
            Actor::Platform(a) => &mut a.body,
        }
    }

    pub fn sprite(&self) -> u32 {
        match self {
            Actor::Player(_) => SPRITE_PLAYER,
            Actor::Enemy(a) => a.sprite,
            Actor::Worm(a) => a.sprite,
            Actor::Rock(a) => a.sprite,
            Actor::Frog(a) => a.sprite,
            Actor::Snail(a) | Actor::Bomb(a) => a.sprite,
            Actor::Door(a) => a.sprite,
            Actor::Switch(a) => a.sprite(),
            Actor::HitSwitch(a) => a.sprite,
            Actor::Platform(a) => a.sprite,
        }
    }

    /// `None` for actors that never die.
    pub fn alive(&self) -> Option<bool> {
        match self {
            Actor::Player(a) => Some(a.alive),
            Actor::Enemy(a) => Some(a.alive),
            Actor::Worm(a) => Some(a.alive),
            _ => None,
        }
    }

    /// Box that blocks the player, for kinds that participate.
    pub fn collider(&self) -> Option<Aabb> {
        match self {
            Actor::Rock(rock) => Some(rock.collider()),
            Actor::Platform(platform) => Some(platform.body.aabb()),
            Actor::HitSwitch(hit) => Some(hit.collider()),
            _ => None,
        }
    }

    pub fn control_group(&self) -> Option<u32> {
        match self {
            Actor::Door(a) => Some(a.control_group),
            Actor::Switch(a) => Some(a.control_group),
            Actor::HitSwitch(a) => Some(a.control_group),
            Actor::Platform(a) => Some(a.control_group),
            _ => None,
        }
    }

    /// Returns false for actors outside the control-group system.
    pub fn set_control_group(&mut self, id: u32) -> bool {
        match self {
            Actor::Door(a) => a.control_group = id,
            Actor::Switch(a) => a.control_group = id,
            Actor::HitSwitch(a) => a.control_group = id,
            Actor::Platform(a) => a.control_group = id,
            _ => return false,
        }
        true
    }

    /// Sensor state, for actors that act as group sensors.
    pub fn is_active(&self) -> Option<bool> {
        match self {
            Actor::Switch(a) => Some(a.is_active()),
            Actor::HitSwitch(a) => Some(a.is_active()),
            _ => None,
        }
    }

    /// Returns false for actors that do not take a group state.
    pub fn set_state(&mut self, state: bool) -> bool {
        match self {
            Actor::Door(a) => a.set_state(state),
            Actor::Platform(a) => a.set_state(state),
            _ => return false,
        }
        true
    }

    pub fn reset(&mut self, roster: &Roster) {
        match self {
            Actor::Player(a) => a.reset(roster.colliders.clone()),
            Actor::Enemy(a) => a.reset(),
            Actor::Worm(a) => a.reset(),
            Actor::Rock(a) => a.reset(),
            Actor::Frog(a) => a.reset(roster.worms.clone()),
            Actor::Snail(a) | Actor::Bomb(a) => a.reset(),
            Actor::Door(a) => a.reset(),
            Actor::Switch(a) => a.reset(),
            Actor::HitSwitch(a) => a.reset(),
            Actor::Platform(a) => a.reset(),
        }
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) -> Result<(), SimError> {
        match self {
            Actor::Player(a) => a.update(frame)?,
            Actor::Enemy(a) => a.update(frame)?,
            Actor::Worm(a) => a.update(frame)?,
            Actor::Rock(a) => a.update(frame)?,
            Actor::Frog(a) => a.update(frame)?,
            Actor::Snail(a) | Actor::Bomb(a) => a.update(frame)?,
            Actor::Door(a) => a.update(frame)?,
            Actor::Switch(a) => a.update(frame)?,
            Actor::HitSwitch(a) => a.update(frame)?,
            // Platforms move only through their control group.
            Actor::Platform(_) => {}
        }
        Ok(())
    }
}
