//! Control groups: named sets of sensors (switches) driving actors
//! (doors, platforms).
//!
//! Membership is by actor name so groups never hold references into the
//! actor map. A group's state is the conjunction of its sensors; an empty
//! sensor set is active.

use std::collections::{BTreeMap, BTreeSet};

/// Access to the members a recompute reads and writes.
pub trait GroupMembers {
    /// `None` when `name` is not a sensor in this world.
    fn sensor_active(&self, name: &str) -> Option<bool>;
    /// Returns false when `name` cannot take a state.
    fn set_actor_state(&mut self, name: &str, state: bool) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlGroup {
    sensors: BTreeSet<String>,
    actors: BTreeSet<String>,
    state: bool,
}

impl ControlGroup {
    pub fn sensors(&self) -> impl Iterator<Item = &str> {
        self.sensors.iter().map(String::as_str)
    }

    pub fn actors(&self) -> impl Iterator<Item = &str> {
        self.actors.iter().map(String::as_str)
    }

    /// State pushed by the last recompute.
    pub fn state(&self) -> bool {
        self.state
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty() && self.actors.is_empty()
    }
}

/// Groups keyed by id, created on first use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlGroups {
    groups: BTreeMap<u32, ControlGroup>,
}

impl ControlGroups {
    pub fn get(&self, id: u32) -> Option<&ControlGroup> {
        self.groups.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.groups.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn group_mut(&mut self, id: u32) -> &mut ControlGroup {
        self.groups.entry(id).or_default()
    }

    pub fn add_sensor(&mut self, id: u32, name: &str) {
        self.group_mut(id).sensors.insert(name.to_string());
    }

    pub fn add_actor(&mut self, id: u32, name: &str) {
        self.group_mut(id).actors.insert(name.to_string());
    }

    /// Removing from a group that does not exist is a no-op.
    pub fn remove_sensor(&mut self, id: u32, name: &str) {
        if let Some(group) = self.groups.get_mut(&id) {
            group.sensors.remove(name);
        }
    }

    pub fn remove_actor(&mut self, id: u32, name: &str) {
        if let Some(group) = self.groups.get_mut(&id) {
            group.actors.remove(name);
        }
    }

    /// Drop `name` from every group it appears in.
    pub fn forget(&mut self, name: &str) {
        for group in self.groups.values_mut() {
            group.sensors.remove(name);
            group.actors.remove(name);
        }
    }

    /// Re-evaluate every group and push the result to its actors.
    pub fn recompute_all<M: GroupMembers + ?Sized>(&mut self, members: &mut M) {
        for (id, group) in &mut self.groups {
            let mut state = true;
            for sensor in &group.sensors {
                match members.sensor_active(sensor) {
                    Some(active) => state &= active,
                    None => {
                        log::warn!("control group {id}: unknown sensor {sensor:?}");
                        state = false;
                    }
                }
            }

            if state != group.state {
                log::debug!("control group {id} -> {state}");
            }
            group.state = state;

            for actor in &group.actors {
                if !members.set_actor_state(actor, state) {
                    log::warn!("control group {id}: {actor:?} cannot take a state");
                }
            }
        }
    }
}
