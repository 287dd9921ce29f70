//! Shared narration: article forms and room descriptions.

use tw_core::component::DescriptionComponent;
use tw_core::{ComponentKind, CoreError, CoreResult, EntityId, World};

/// The description of an entity that is about to be named in narration.
pub(crate) fn described(world: &World, id: EntityId) -> CoreResult<&DescriptionComponent> {
    world
        .get(id)?
        .description()
        .ok_or(CoreError::MissingComponent {
            entity: id,
            kind: ComponentKind::Description,
        })
}

/// "the X"
pub(crate) fn the(world: &World, id: EntityId) -> CoreResult<String> {
    Ok(described(world, id)?.describe_the())
}

/// "a X" or "an X"
pub(crate) fn a(world: &World, id: EntityId) -> CoreResult<String> {
    Ok(described(world, id)?.describe_a())
}

/// The nameable entities resting on a container, in handle order.
///
/// Entities without a description cannot be narrated and are left out.
pub(crate) fn contents(world: &World, container: EntityId) -> Vec<EntityId> {
    world
        .entity(container)
        .and_then(|e| e.components.container.as_ref())
        .map(|c| {
            c.items
                .iter()
                .copied()
                .filter(|id| world.entity(*id).is_some_and(|e| e.description().is_some()))
                .collect()
        })
        .unwrap_or_default()
}

/// Everything resting on the active floor entities, floor by floor.
pub(crate) fn floor_items(world: &World) -> Vec<EntityId> {
    world
        .query()
        .has(ComponentKind::Floor)
        .execute()
        .into_iter()
        .flat_map(|(floor, _)| contents(world, floor))
        .collect()
}

/// Describe the current surroundings: every active scenery text, then one
/// line per item lying on a floor.
pub(crate) fn describe_room(world: &World) -> CoreResult<String> {
    let mut lines: Vec<String> = world
        .active()
        .filter_map(|(_, entity)| entity.components.world_description.as_ref())
        .map(|scenery| scenery.description.clone())
        .collect();
    for item in floor_items(world) {
        lines.push(format!("There is {} here.", a(world, item)?));
    }
    Ok(lines.join("\n"))
}
