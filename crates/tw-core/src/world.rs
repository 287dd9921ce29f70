use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::{ComponentKind, InventoryComponent};
use crate::entity::{Entity, EntityId};
use crate::error::{CoreError, CoreResult};
use crate::query::QueryBuilder;

/// Handle of a room registered with a [`World`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub usize);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// A named, ordered group of entities that are reachable only while the
/// room is the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Room {
    /// Display name, used by world definitions and logs.
    pub name: String,
    entities: Vec<EntityId>,
}

impl Room {
    /// Create an empty room.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: Vec::new(),
        }
    }

    /// Create a room holding already spawned entities.
    pub fn with_entities(
        name: impl Into<String>,
        entities: impl IntoIterator<Item = EntityId>,
    ) -> Self {
        let mut room = Self::new(name);
        for id in entities {
            room.add(id);
        }
        room
    }

    /// Append an entity handle. Adding a handle twice has no effect.
    pub fn add(&mut self, id: EntityId) {
        if !self.entities.contains(&id) {
            self.entities.push(id);
        }
    }

    /// Returns true if the room holds the entity.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }

    /// The entity handles, in placement order.
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    fn remove(&mut self, id: EntityId) {
        self.entities.retain(|e| *e != id);
    }
}

/// The central world model. Owns all entities and rooms.
///
/// The active set (player, carried items, current room, globals, and what
/// rests on them) is derived from the other fields and rebuilt by every
/// operation that changes where an entity lives or which room is current.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    entities: Vec<Entity>,
    player: EntityId,
    globals: Vec<EntityId>,
    rooms: Vec<Room>,
    current: Option<RoomId>,
    active: Vec<EntityId>,
}

impl World {
    /// Create a world around the player entity.
    pub fn new(player: Entity) -> Self {
        let mut world = Self {
            entities: vec![player],
            player: EntityId(0),
            globals: Vec::new(),
            rooms: Vec::new(),
            current: None,
            active: Vec::new(),
        };
        world.refresh_active();
        world
    }

    // -----------------------------------------------------------------------
    // Authoring
    // -----------------------------------------------------------------------

    /// Add an entity to the arena without placing it anywhere.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len());
        self.entities.push(entity);
        id
    }

    /// Add a global entity. Globals are active in every room.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        let id = self.spawn(entity);
        self.globals.push(id);
        self.refresh_active();
        id
    }

    /// Register a room. Returns the room's handle.
    pub fn add_room(&mut self, room: Room) -> RoomId {
        let id = RoomId(self.rooms.len());
        tracing::debug!(room = %room.name, %id, "room registered");
        self.rooms.push(room);
        id
    }

    /// Spawn an entity directly into a registered room.
    pub fn place(&mut self, room: RoomId, entity: Entity) -> CoreResult<EntityId> {
        self.room(room).ok_or(CoreError::UnknownRoom(room))?;
        let id = self.spawn(entity);
        self.place_existing(room, id)?;
        Ok(id)
    }

    /// Append an already spawned entity to a registered room.
    pub fn place_existing(&mut self, room: RoomId, id: EntityId) -> CoreResult<()> {
        self.get(id)?;
        self.rooms
            .get_mut(room.0)
            .ok_or(CoreError::UnknownRoom(room))?
            .add(id);
        if self.current == Some(room) {
            self.refresh_active();
        }
        Ok(())
    }

    /// Make a registered room the current one.
    pub fn set_room(&mut self, room: RoomId) -> CoreResult<()> {
        let name = &self.room(room).ok_or(CoreError::UnknownRoom(room))?.name;
        tracing::debug!(room = %name, "entering room");
        self.current = Some(room);
        self.refresh_active();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// The player's entity handle.
    pub fn player(&self) -> EntityId {
        self.player
    }

    /// Get a reference to an entity by handle.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    /// Get a mutable reference to an entity by handle.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0)
    }

    /// Like [`World::entity`], but a missing handle is an error.
    pub fn get(&self, id: EntityId) -> CoreResult<&Entity> {
        self.entity(id).ok_or(CoreError::EntityNotFound(id))
    }

    /// The current room, if one has been entered.
    pub fn current_room(&self) -> Option<RoomId> {
        self.current
    }

    /// Get a registered room.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id.0)
    }

    /// Find a room by name.
    pub fn find_room(&self, name: &str) -> Option<RoomId> {
        self.rooms.iter().position(|r| r.name == name).map(RoomId)
    }

    /// All registered rooms with their handles.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter().enumerate().map(|(i, r)| (RoomId(i), r))
    }

    /// Global entity handles.
    pub fn globals(&self) -> &[EntityId] {
        &self.globals
    }

    /// Handles of all entities currently reachable by name.
    pub fn active_entities(&self) -> &[EntityId] {
        &self.active
    }

    /// Returns true if the entity is currently reachable.
    pub fn is_active(&self, id: EntityId) -> bool {
        self.active.contains(&id)
    }

    /// Iterate active entities with their handles.
    pub fn active(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.active
            .iter()
            .filter_map(|id| self.entity(*id).map(|e| (*id, e)))
    }

    /// Start building a query over the active entities.
    pub fn query(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(self)
    }

    /// The player's inventory.
    pub fn inventory(&self) -> CoreResult<&InventoryComponent> {
        self.get(self.player)?
            .components
            .inventory
            .as_ref()
            .ok_or(CoreError::MissingComponent {
                entity: self.player,
                kind: ComponentKind::Inventory,
            })
    }

    /// Returns true if the player carries the item.
    pub fn is_carried(&self, item: EntityId) -> bool {
        self.inventory().is_ok_and(|inv| inv.contains(item))
    }

    // -----------------------------------------------------------------------
    // Relocation
    // -----------------------------------------------------------------------

    /// Move an item into the player's inventory, taking it out of every
    /// container and room. Whatever rests on the item travels with it.
    /// Carrying an item twice has no effect.
    pub fn take_into_inventory(&mut self, item: EntityId) -> CoreResult<()> {
        self.get(item)?;
        self.inventory()?;

        self.detach_from_containers(item);
        let contents = self.contents(item);
        for room in &mut self.rooms {
            room.remove(item);
            for id in &contents {
                room.remove(*id);
            }
        }
        if let Some(inventory) = self.inventory_mut() {
            if !inventory.contains(item) {
                inventory.items.push(item);
            }
        }
        self.refresh_active();
        Ok(())
    }

    /// Move an item onto a container entity.
    ///
    /// The item leaves the inventory and any other container. It joins the
    /// room that holds the target, if any; otherwise it is reachable only
    /// through the target. An item cannot be put on itself or on anything
    /// resting on it.
    pub fn put_on(&mut self, item: EntityId, target: EntityId) -> CoreResult<()> {
        self.get(item)?;
        if !self.get(target)?.has(ComponentKind::Container) {
            return Err(CoreError::MissingComponent {
                entity: target,
                kind: ComponentKind::Container,
            });
        }
        if item == target || self.holds(item, target) {
            return Err(CoreError::ContainmentCycle { item, target });
        }

        self.detach_from_containers(item);
        if let Some(inventory) = self.inventory_mut() {
            inventory.items.retain(|id| *id != item);
        }
        if let Some(container) = self
            .entity_mut(target)
            .and_then(|e| e.components.container.as_mut())
        {
            container.items.insert(item);
        }

        if !self.globals.contains(&item) {
            let home = self.rooms.iter().position(|room| room.contains(target));
            for room in &mut self.rooms {
                room.remove(item);
            }
            if let Some(room) = home.and_then(|i| self.rooms.get_mut(i)) {
                room.add(item);
            }
        }
        self.refresh_active();
        Ok(())
    }

    /// Returns true if `item` rests on `container`, directly or through
    /// other containers.
    pub fn holds(&self, container: EntityId, item: EntityId) -> bool {
        self.contents(container).contains(&item)
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Number of entities in the arena, including the player.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of registered rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn inventory_mut(&mut self) -> Option<&mut InventoryComponent> {
        self.entities
            .get_mut(self.player.0)
            .and_then(|p| p.components.inventory.as_mut())
    }

    /// Everything resting on the entity, nested contents included.
    fn contents(&self, container: EntityId) -> Vec<EntityId> {
        let mut found = Vec::new();
        let mut pending = vec![container];
        while let Some(id) = pending.pop() {
            let Some(slot) = self.entity(id).and_then(|e| e.components.container.as_ref()) else {
                continue;
            };
            for item in &slot.items {
                if *item != container && !found.contains(item) {
                    found.push(*item);
                    pending.push(*item);
                }
            }
        }
        found
    }

    fn detach_from_containers(&mut self, item: EntityId) {
        for entity in &mut self.entities {
            if let Some(container) = entity.components.container.as_mut() {
                container.items.remove(&item);
            }
        }
    }

    /// Rebuild the active set: player, carried items, current room, globals,
    /// then whatever rests on any of those.
    fn refresh_active(&mut self) {
        let carried = self
            .entity(self.player)
            .and_then(|p| p.components.inventory.as_ref())
            .map(|inv| inv.items.clone())
            .unwrap_or_default();
        let room = self
            .current
            .and_then(|id| self.rooms.get(id.0))
            .map(|r| r.entities.as_slice())
            .unwrap_or_default();

        let mut active = Vec::with_capacity(1 + carried.len() + room.len() + self.globals.len());
        let candidates = std::iter::once(self.player)
            .chain(carried)
            .chain(room.iter().copied())
            .chain(self.globals.iter().copied());
        for id in candidates {
            if !active.contains(&id) {
                active.push(id);
            }
        }

        // Contents of reachable containers are reachable.
        let mut index = 0;
        while let Some(&id) = active.get(index) {
            if let Some(slot) = self.entity(id).and_then(|e| e.components.container.as_ref()) {
                for item in &slot.items {
                    if !active.contains(item) {
                        active.push(*item);
                    }
                }
            }
            index += 1;
        }
        self.active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ContainerComponent, DescriptionComponent, TakeableComponent};
    use proptest::prelude::*;

    fn player() -> Entity {
        Entity::new()
            .with(DescriptionComponent::new(["player", "me"]))
            .with(InventoryComponent::new())
    }

    fn named(name: &str) -> Entity {
        Entity::new().with(DescriptionComponent::new([name]))
    }

    #[test]
    fn player_is_always_active() {
        let world = World::new(player());
        assert_eq!(world.active_entities(), &[world.player()]);
    }

    #[test]
    fn set_room_rejects_unregistered_room() {
        let mut world = World::new(player());
        assert!(matches!(
            world.set_room(RoomId(4)),
            Err(CoreError::UnknownRoom(RoomId(4)))
        ));
        assert_eq!(world.current_room(), None);
    }

    #[test]
    fn active_set_order_is_player_room_globals() {
        let mut world = World::new(player());
        let narrator = world.add_entity(named("narrator"));
        let cellar = world.add_room(Room::new("Cellar"));
        let barrel = world.place(cellar, named("barrel")).unwrap();
        let crate_ = world.place(cellar, named("crate")).unwrap();

        world.set_room(cellar).unwrap();
        assert_eq!(
            world.active_entities(),
            &[world.player(), barrel, crate_, narrator]
        );
    }

    #[test]
    fn switching_rooms_hides_previous_entities() {
        let mut world = World::new(player());
        let cellar = world.add_room(Room::new("Cellar"));
        let hall = world.add_room(Room::new("Hall"));
        let barrel = world.place(cellar, named("barrel")).unwrap();
        let table = world.place(hall, named("table")).unwrap();

        world.set_room(cellar).unwrap();
        assert!(world.is_active(barrel));
        assert!(!world.is_active(table));

        world.set_room(hall).unwrap();
        assert!(!world.is_active(barrel));
        assert!(world.is_active(table));

        world.set_room(cellar).unwrap();
        assert!(world.is_active(barrel));
    }

    #[test]
    fn placing_into_current_room_refreshes_active_set() {
        let mut world = World::new(player());
        let cellar = world.add_room(Room::new("Cellar"));
        world.set_room(cellar).unwrap();
        let barrel = world.place(cellar, named("barrel")).unwrap();
        assert!(world.is_active(barrel));
    }

    #[test]
    fn place_rejects_unknown_room() {
        let mut world = World::new(player());
        assert!(matches!(
            world.place(RoomId(0), named("ghost")),
            Err(CoreError::UnknownRoom(_))
        ));
    }

    #[test]
    fn carried_items_follow_the_player() {
        let mut world = World::new(player());
        let cellar = world.add_room(Room::new("Cellar"));
        let hall = world.add_room(Room::new("Hall"));
        let key = world
            .place(cellar, named("iron key").with(TakeableComponent))
            .unwrap();
        world.set_room(cellar).unwrap();

        world.take_into_inventory(key).unwrap();
        assert!(!world.room(cellar).unwrap().contains(key));

        world.set_room(hall).unwrap();
        assert!(world.is_active(key));
        assert_eq!(world.active_entities()[1], key);
    }

    #[test]
    fn take_removes_from_containers_and_does_not_duplicate() {
        let mut world = World::new(player());
        let cellar = world.add_room(Room::new("Cellar"));
        let key = world.place(cellar, named("iron key")).unwrap();
        let table = world
            .place(
                cellar,
                named("table").with(ContainerComponent::with_items([key])),
            )
            .unwrap();
        world.set_room(cellar).unwrap();

        world.take_into_inventory(key).unwrap();
        world.take_into_inventory(key).unwrap();

        assert_eq!(world.inventory().unwrap().items, vec![key]);
        let container = world.get(table).unwrap().components.container.as_ref().unwrap();
        assert!(container.items.is_empty());
    }

    #[test]
    fn put_on_moves_item_into_the_targets_room() {
        let mut world = World::new(player());
        let cellar = world.add_room(Room::new("Cellar"));
        let hall = world.add_room(Room::new("Hall"));
        let key = world.place(cellar, named("iron key")).unwrap();
        let table = world
            .place(hall, named("table").with(ContainerComponent::new()))
            .unwrap();

        world.set_room(cellar).unwrap();
        world.take_into_inventory(key).unwrap();
        world.set_room(hall).unwrap();
        world.put_on(key, table).unwrap();

        assert!(!world.is_carried(key));
        assert!(world.room(hall).unwrap().contains(key));
        assert!(world.is_active(key));
        let container = world.get(table).unwrap().components.container.as_ref().unwrap();
        assert!(container.items.contains(&key));
    }

    #[test]
    fn contents_of_a_carried_container_travel_with_it() {
        let mut world = World::new(player());
        let cellar = world.add_room(Room::new("Cellar"));
        let hall = world.add_room(Room::new("Hall"));
        let key = world.place(cellar, named("iron key")).unwrap();
        let bag = world
            .place(cellar, named("bag").with(ContainerComponent::new()))
            .unwrap();
        world.set_room(cellar).unwrap();
        world.take_into_inventory(bag).unwrap();
        world.take_into_inventory(key).unwrap();

        world.put_on(key, bag).unwrap();
        assert!(!world.rooms().any(|(_, room)| room.contains(key)));
        assert!(world.holds(bag, key));

        world.set_room(hall).unwrap();
        assert!(world.is_active(key));
        world.take_into_inventory(key).unwrap();
        assert_eq!(world.inventory().unwrap().items, vec![bag, key]);
    }

    #[test]
    fn taking_a_container_lifts_what_rests_on_it() {
        let mut world = World::new(player());
        let cellar = world.add_room(Room::new("Cellar"));
        let hall = world.add_room(Room::new("Hall"));
        let key = world.place(cellar, named("iron key")).unwrap();
        let tray = world
            .place(cellar, named("tray").with(ContainerComponent::with_items([key])))
            .unwrap();
        world.set_room(cellar).unwrap();

        world.take_into_inventory(tray).unwrap();
        assert!(!world.room(cellar).unwrap().contains(key));

        world.set_room(hall).unwrap();
        assert!(world.is_active(key));
        world.set_room(cellar).unwrap();
        assert_eq!(world.active_entities(), &[world.player(), tray, key]);
    }

    #[test]
    fn put_on_rejects_cycles() {
        let mut world = World::new(player());
        let cellar = world.add_room(Room::new("Cellar"));
        let bag = world
            .place(cellar, named("bag").with(ContainerComponent::new()))
            .unwrap();
        let box_ = world
            .place(cellar, named("box").with(ContainerComponent::new()))
            .unwrap();
        world.set_room(cellar).unwrap();
        world.take_into_inventory(box_).unwrap();
        world.put_on(box_, bag).unwrap();
        world.take_into_inventory(bag).unwrap();

        assert!(matches!(
            world.put_on(bag, box_),
            Err(CoreError::ContainmentCycle { .. })
        ));
        assert!(matches!(
            world.put_on(bag, bag),
            Err(CoreError::ContainmentCycle { .. })
        ));
        assert!(world.is_carried(bag));
        assert!(world.holds(bag, box_));
    }

    #[test]
    fn put_on_requires_container() {
        let mut world = World::new(player());
        let cellar = world.add_room(Room::new("Cellar"));
        let key = world.place(cellar, named("iron key")).unwrap();
        let wall = world.place(cellar, named("wall")).unwrap();
        world.set_room(cellar).unwrap();
        world.take_into_inventory(key).unwrap();

        assert!(matches!(
            world.put_on(key, wall),
            Err(CoreError::MissingComponent {
                kind: ComponentKind::Container,
                ..
            })
        ));
        assert!(world.is_carried(key));
    }

    #[test]
    fn take_without_inventory_fails_without_changes() {
        let mut world = World::new(named("ghost"));
        let cellar = world.add_room(Room::new("Cellar"));
        let key = world.place(cellar, named("iron key")).unwrap();
        assert!(world.take_into_inventory(key).is_err());
        assert!(world.room(cellar).unwrap().contains(key));
    }

    #[test]
    fn find_room_by_name() {
        let mut world = World::new(player());
        let hall = world.add_room(Room::new("Hall"));
        assert_eq!(world.find_room("Hall"), Some(hall));
        assert_eq!(world.find_room("Attic"), None);
        assert_eq!(world.room_count(), 1);
    }

    proptest! {
        #[test]
        fn active_set_stays_consistent(steps in prop::collection::vec((0u8..3, 0usize..4), 0..30)) {
            let mut world = World::new(player());
            let rooms = [world.add_room(Room::new("Cellar")), world.add_room(Room::new("Hall"))];
            let items: Vec<EntityId> = ["key", "coin", "lamp", "rope"]
                .iter()
                .enumerate()
                .map(|(i, name)| world.place(rooms[i % 2], named(name)).unwrap())
                .collect();
            let shelf = world
                .place(rooms[0], named("shelf").with(ContainerComponent::new()))
                .unwrap();
            world.set_room(rooms[0]).unwrap();

            for (op, index) in steps {
                let item = items[index];
                match op {
                    0 => world.set_room(rooms[index % 2]).unwrap(),
                    1 => world.take_into_inventory(item).unwrap(),
                    _ => world.put_on(item, shelf).unwrap(),
                }

                let active = world.active_entities();
                prop_assert_eq!(active[0], world.player());
                for (i, id) in active.iter().enumerate() {
                    prop_assert!(!active[i + 1..].contains(id));
                }
                for carried in &world.inventory().unwrap().items {
                    prop_assert!(world.is_active(*carried));
                    prop_assert!(!world.rooms().any(|(_, room)| room.contains(*carried)));
                }
            }
        }
    }
}
