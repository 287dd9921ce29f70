use tw_core::{EntityId, World};

use super::Action;
use crate::dispatch::EntitySpec;
use crate::error::FictionResult;
use crate::narrator;

/// Describe the current room.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescribeWorldAction;

impl Action for DescribeWorldAction {
    fn name(&self) -> &'static str {
        "look"
    }

    fn prerequisites(&self) -> &'static [EntitySpec] {
        &[]
    }

    fn apply(&self, world: &mut World, _entities: &[EntityId]) -> FictionResult<String> {
        Ok(narrator::describe_room(world)?)
    }

    fn mutates(&self) -> bool {
        false
    }
}
