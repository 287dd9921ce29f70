use tw_core::{ComponentKind, CoreError, Direction, EntityId, RoomId, World};

use super::{Action, DESCRIBED, PORTAL, arguments};
use crate::dispatch::EntitySpec;
use crate::error::FictionResult;
use crate::narrator;

/// Walk through the first active portal facing a direction.
#[derive(Debug, Clone, Copy)]
pub struct MoveAction {
    /// Where to go.
    pub direction: Direction,
}

impl MoveAction {
    /// A move in the given direction.
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl Action for MoveAction {
    fn name(&self) -> &'static str {
        "move"
    }

    fn prerequisites(&self) -> &'static [EntitySpec] {
        &[]
    }

    fn apply(&self, world: &mut World, _entities: &[EntityId]) -> FictionResult<String> {
        let destination = world
            .active()
            .filter_map(|(_, entity)| entity.components.portal)
            .find(|portal| portal.direction == self.direction)
            .map(|portal| portal.room);
        match destination {
            Some(room) => travel(world, room),
            None => Ok("You cannot go that way.".into()),
        }
    }
}

/// Walk through a named portal.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnterAction;

impl Action for EnterAction {
    fn name(&self) -> &'static str {
        "enter"
    }

    fn prerequisites(&self) -> &'static [EntitySpec] {
        &[PORTAL]
    }

    fn apply(&self, world: &mut World, entities: &[EntityId]) -> FictionResult<String> {
        let [portal] = arguments(self, entities)?;
        let room = world
            .get(portal)?
            .components
            .portal
            .map(|p| p.room)
            .ok_or(CoreError::MissingComponent {
                entity: portal,
                kind: ComponentKind::Portal,
            })?;
        travel(world, room)
    }
}

/// Refuses to enter anything that is not a portal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnterAction;

impl Action for DefaultEnterAction {
    fn name(&self) -> &'static str {
        "default enter"
    }

    fn prerequisites(&self) -> &'static [EntitySpec] {
        &[DESCRIBED]
    }

    fn apply(&self, world: &mut World, entities: &[EntityId]) -> FictionResult<String> {
        let [target] = arguments(self, entities)?;
        Ok(format!("You cannot enter {}.", narrator::the(world, target)?))
    }

    fn mutates(&self) -> bool {
        false
    }
}

fn travel(world: &mut World, room: RoomId) -> FictionResult<String> {
    world.set_room(room)?;
    Ok(narrator::describe_room(world)?)
}
