use crate::component::ComponentKind;
use crate::entity::{Entity, EntityId};
use crate::world::World;

/// A builder for filtering the active entities of a world by component.
pub struct QueryBuilder<'w> {
    world: &'w World,
    required: Vec<ComponentKind>,
    excluded: Vec<ComponentKind>,
}

impl<'w> QueryBuilder<'w> {
    /// Start a query over the world's active set.
    pub fn new(world: &'w World) -> Self {
        Self {
            world,
            required: Vec::new(),
            excluded: Vec::new(),
        }
    }

    /// Keep only entities carrying a component of this kind.
    pub fn has(mut self, kind: ComponentKind) -> Self {
        self.required.push(kind);
        self
    }

    /// Drop entities carrying a component of this kind.
    pub fn without(mut self, kind: ComponentKind) -> Self {
        self.excluded.push(kind);
        self
    }

    /// Execute the query. Results keep active-set order.
    pub fn execute(self) -> Vec<(EntityId, &'w Entity)> {
        self.world.active().filter(|(_, e)| self.matches(e)).collect()
    }

    /// The first match in active-set order.
    pub fn first(self) -> Option<(EntityId, &'w Entity)> {
        self.world.active().find(|(_, e)| self.matches(e))
    }

    /// Count matching entities without collecting them.
    pub fn count(self) -> usize {
        self.world.active().filter(|(_, e)| self.matches(e)).count()
    }

    fn matches(&self, entity: &Entity) -> bool {
        self.required.iter().all(|kind| entity.has(*kind))
            && !self.excluded.iter().any(|kind| entity.has(*kind))
    }
}
