//! JSON world definitions.
//!
//! A definition names rooms and lists the entities placed in them. Entities
//! refer to each other by an optional `id` and to rooms by name; both are
//! resolved when the definition is built into a [`World`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::component::{
    Component, ContainerComponent, DescriptionComponent, Direction, FloorComponent,
    InventoryComponent, PortalComponent, TakeableComponent, WorldDescriptionComponent,
};
use crate::entity::{Entity, EntityId};
use crate::error::{CoreError, CoreResult, DefinitionError};
use crate::world::{Room, RoomId, World};

/// A complete world, as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldDefinition {
    /// The player entity. It always receives an inventory.
    pub player: EntityDefinition,
    /// Name of the room the game starts in. Defaults to the first room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Entities that are reachable from every room.
    #[serde(default)]
    pub globals: Vec<EntityDefinition>,
    /// Rooms, in registration order.
    pub rooms: Vec<RoomDefinition>,
}

/// A room and the entities placed in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomDefinition {
    /// Unique room name.
    pub name: String,
    /// Narration shown when the room is described.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Entities placed in the room.
    #[serde(default)]
    pub entities: Vec<EntityDefinition>,
}

/// One entity and its components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityDefinition {
    /// Identifier used by `on` lists of other entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Alias names. An entity without names cannot be referred to by the player.
    #[serde(default)]
    pub names: Vec<String>,
    /// Text printed when the entity is examined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The entity can be picked up.
    #[serde(default)]
    pub takeable: bool,
    /// The entity is the room's default drop target.
    #[serde(default)]
    pub floor: bool,
    /// Ids of the entities resting on this one. Present means "is a container".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on: Option<Vec<String>>,
    /// Link to another room.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal: Option<PortalDefinition>,
    /// Room narration carried by this entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration: Option<String>,
}

/// A link to another room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PortalDefinition {
    /// Name of the destination room.
    pub to: String,
    /// Direction a movement command must name. `none` means enter-only.
    #[serde(default)]
    pub direction: Direction,
}

impl WorldDefinition {
    /// Parse a definition from JSON.
    pub fn from_json(source: &str) -> CoreResult<Self> {
        serde_json::from_str(source).map_err(|e| CoreError::from(DefinitionError::from(e)))
    }

    /// Build the world and enter the start room.
    ///
    /// Runs in two passes: rooms and entities are created first, then
    /// container contents are resolved by id.
    pub fn build(&self) -> CoreResult<World> {
        if self.rooms.is_empty() {
            return Err(DefinitionError::NoRooms.into());
        }

        let mut builder = Builder::default();
        let mut player = builder.components(&self.player)?;
        player.push(InventoryComponent::new().into());
        let mut world = World::new(Entity::try_from_components(player)?);
        builder.record(&self.player, world.player())?;

        for room in &self.rooms {
            if builder.rooms.contains_key(&room.name) {
                return Err(DefinitionError::DuplicateRoom(room.name.clone()).into());
            }
            let id = world.add_room(Room::new(room.name.clone()));
            builder.rooms.insert(room.name.clone(), id);
        }

        for global in &self.globals {
            let entity = Entity::try_from_components(builder.components(global)?)?;
            let id = world.add_entity(entity);
            builder.record(global, id)?;
        }

        for room in &self.rooms {
            let room_id = builder.rooms[&room.name];
            if let Some(text) = &room.description {
                world.place(
                    room_id,
                    Entity::new().with(WorldDescriptionComponent::new(text.clone())),
                )?;
            }
            for def in &room.entities {
                let entity = Entity::try_from_components(builder.components(def)?)?;
                let id = world.place(room_id, entity)?;
                builder.record(def, id)?;
            }
        }

        builder.fill_containers(&mut world)?;

        let start = match &self.start {
            Some(name) => *builder
                .rooms
                .get(name)
                .ok_or_else(|| DefinitionError::UnknownRoom(name.clone()))?,
            None => RoomId(0),
        };
        world.set_room(start)?;

        tracing::info!(
            rooms = world.room_count(),
            entities = world.entity_count(),
            "world built"
        );
        Ok(world)
    }
}

/// Load a world from a JSON definition.
pub fn load_world(source: &str) -> CoreResult<World> {
    WorldDefinition::from_json(source)?.build()
}

#[derive(Default)]
struct Builder<'d> {
    rooms: HashMap<String, RoomId>,
    ids: HashMap<String, EntityId>,
    containers: Vec<(EntityId, &'d [String])>,
}

impl<'d> Builder<'d> {
    fn components(&self, def: &EntityDefinition) -> CoreResult<Vec<Component>> {
        let mut components = Vec::new();
        if !def.names.is_empty() || def.description.is_some() {
            let mut desc = DescriptionComponent::new(def.names.iter().cloned());
            desc.description = def.description.clone();
            components.push(desc.into());
        }
        if def.takeable {
            components.push(TakeableComponent.into());
        }
        if def.floor {
            components.push(FloorComponent.into());
        }
        if def.on.is_some() {
            components.push(ContainerComponent::new().into());
        }
        if let Some(portal) = &def.portal {
            let room = *self
                .rooms
                .get(&portal.to)
                .ok_or_else(|| DefinitionError::UnknownRoom(portal.to.clone()))?;
            components.push(
                PortalComponent {
                    room,
                    direction: portal.direction,
                }
                .into(),
            );
        }
        if let Some(text) = &def.narration {
            components.push(WorldDescriptionComponent::new(text.clone()).into());
        }
        Ok(components)
    }

    fn record(&mut self, def: &'d EntityDefinition, id: EntityId) -> CoreResult<()> {
        if let Some(key) = &def.id {
            if self.ids.insert(key.clone(), id).is_some() {
                return Err(DefinitionError::DuplicateId(key.clone()).into());
            }
        }
        if let Some(on) = &def.on {
            self.containers.push((id, on.as_slice()));
        }
        Ok(())
    }

    fn fill_containers(&self, world: &mut World) -> CoreResult<()> {
        for (container, refs) in &self.containers {
            let items = refs
                .iter()
                .map(|key| -> CoreResult<EntityId> {
                    let id = self
                        .ids
                        .get(key)
                        .copied()
                        .ok_or_else(|| DefinitionError::UnknownEntity(key.clone()))?;
                    if world.get(id)?.description().is_none() {
                        return Err(DefinitionError::UnnamedItem(key.clone()).into());
                    }
                    Ok(id)
                })
                .collect::<CoreResult<Vec<_>>>()?;
            let slot = world
                .entity_mut(*container)
                .and_then(|e| e.components.container.as_mut())
                .ok_or(CoreError::EntityNotFound(*container))?;
            slot.items.extend(items);
        }
        Ok(())
    }
}
