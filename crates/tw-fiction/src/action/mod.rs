//! Actions: the game logic a matched command runs.
//!
//! Each action declares one [`EntitySpec`] per argument. The dispatcher only
//! calls [`Action::apply`] with entities that satisfy those specs, so actions
//! check game rules (is the item carried?) but not structure.

mod examine;
mod inventory;
mod look;
mod movement;
mod put;
mod take;

use std::fmt;

use tw_core::{ComponentKind, EntityId, World};

use crate::dispatch::EntitySpec;
use crate::error::{FictionError, FictionResult};

pub use examine::{DefaultExamineAction, ExamineAction};
pub use inventory::InventoryAction;
pub use look::DescribeWorldAction;
pub use movement::{DefaultEnterAction, EnterAction, MoveAction};
pub use put::{DropAction, PutOnAction};
pub use take::{DefaultTakeAction, TakeAction};

/// An argument that has a name the player can refer to.
pub const DESCRIBED: EntitySpec = EntitySpec::new(&[ComponentKind::Description]);
/// An argument that can be picked up.
pub const TAKEABLE: EntitySpec =
    EntitySpec::new(&[ComponentKind::Description, ComponentKind::Takeable]);
/// An argument that leads to another room.
pub const PORTAL: EntitySpec = EntitySpec::new(&[ComponentKind::Portal]);

/// A unit of game logic.
pub trait Action: fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// One spec per argument. The length is the action's arity.
    fn prerequisites(&self) -> &'static [EntitySpec];

    /// Apply the action and return its narration (lines joined by `\n`,
    /// possibly empty).
    fn apply(&self, world: &mut World, entities: &[EntityId]) -> FictionResult<String>;

    /// Returns false for actions that only read the world.
    fn mutates(&self) -> bool {
        true
    }
}

/// Destructure the argument list of an action with a fixed arity.
pub(crate) fn arguments<const N: usize>(
    action: &dyn Action,
    entities: &[EntityId],
) -> FictionResult<[EntityId; N]> {
    entities.try_into().map_err(|_| FictionError::Arity {
        action: action.name(),
        expected: N,
        found: entities.len(),
    })
}
