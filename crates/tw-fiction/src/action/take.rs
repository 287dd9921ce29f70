use tw_core::{EntityId, World};

use super::{Action, DESCRIBED, TAKEABLE, arguments};
use crate::dispatch::EntitySpec;
use crate::error::FictionResult;
use crate::narrator;

/// Pick an item up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TakeAction;

impl Action for TakeAction {
    fn name(&self) -> &'static str {
        "take"
    }

    fn prerequisites(&self) -> &'static [EntitySpec] {
        &[TAKEABLE]
    }

    fn apply(&self, world: &mut World, entities: &[EntityId]) -> FictionResult<String> {
        let [item] = arguments(self, entities)?;
        if world.is_carried(item) {
            return Ok("You are already carrying that.".into());
        }
        world.take_into_inventory(item)?;
        Ok(format!("You take {}", narrator::the(world, item)?))
    }
}

/// Refuses to pick up anything that is not takeable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTakeAction;

impl Action for DefaultTakeAction {
    fn name(&self) -> &'static str {
        "default take"
    }

    fn prerequisites(&self) -> &'static [EntitySpec] {
        &[DESCRIBED]
    }

    fn apply(&self, _world: &mut World, _entities: &[EntityId]) -> FictionResult<String> {
        Ok("You cannot take that.".into())
    }

    fn mutates(&self) -> bool {
        false
    }
}
