use tw_core::{EntityId, World};

use super::{Action, DESCRIBED, arguments};
use crate::dispatch::EntitySpec;
use crate::error::FictionResult;
use crate::narrator;

const NOTHING: &str = "It doesn't look like anything to you.";

/// Print an entity's description and whatever rests on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExamineAction;

impl Action for ExamineAction {
    fn name(&self) -> &'static str {
        "examine"
    }

    fn prerequisites(&self) -> &'static [EntitySpec] {
        &[DESCRIBED]
    }

    fn apply(&self, world: &mut World, entities: &[EntityId]) -> FictionResult<String> {
        let [target] = arguments(self, entities)?;
        let description = narrator::described(world, target)?.description.clone();
        let items = narrator::contents(world, target);

        let mut lines = Vec::new();
        match description {
            Some(text) => lines.push(text),
            None if items.is_empty() => lines.push(NOTHING.to_string()),
            None => {}
        }
        if !items.is_empty() {
            let names = items
                .iter()
                .map(|item| narrator::a(world, *item))
                .collect::<Result<Vec<_>, _>>()?;
            lines.push(format!(
                "{} contains: {}",
                narrator::the(world, target)?,
                names.join(", ")
            ));
        }
        Ok(lines.join("\n"))
    }

    fn mutates(&self) -> bool {
        false
    }
}

/// Examine fallback for entities that cannot be named.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExamineAction;

impl Action for DefaultExamineAction {
    fn name(&self) -> &'static str {
        "default examine"
    }

    fn prerequisites(&self) -> &'static [EntitySpec] {
        &[EntitySpec::ANY]
    }

    fn apply(&self, _world: &mut World, _entities: &[EntityId]) -> FictionResult<String> {
        Ok(NOTHING.into())
    }

    fn mutates(&self) -> bool {
        false
    }
}
