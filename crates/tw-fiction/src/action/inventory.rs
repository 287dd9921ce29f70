use tw_core::{EntityId, World};

use super::Action;
use crate::dispatch::EntitySpec;
use crate::error::FictionResult;
use crate::narrator;

/// List what the player is carrying.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryAction;

impl Action for InventoryAction {
    fn name(&self) -> &'static str {
        "inventory"
    }

    fn prerequisites(&self) -> &'static [EntitySpec] {
        &[]
    }

    fn apply(&self, world: &mut World, _entities: &[EntityId]) -> FictionResult<String> {
        let items = &world.inventory()?.items;
        if items.is_empty() {
            return Ok("Your inventory is empty".into());
        }
        let mut lines = vec!["Your inventory contains:".to_string()];
        for item in items {
            lines.push(format!(" - {}", narrator::a(world, *item)?));
        }
        Ok(lines.join("\n"))
    }

    fn mutates(&self) -> bool {
        false
    }
}
