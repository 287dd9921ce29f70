use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind, ComponentSet, DescriptionComponent};
use crate::error::{CoreError, CoreResult};

/// Stable handle of an entity in the world's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub usize);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Core entity struct. Every world object is an Entity.
///
/// Entities are plain bundles of components; their identity is the
/// [`EntityId`] the world assigns when the entity is added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Typed component data attached to this entity.
    pub components: ComponentSet,
}

impl Entity {
    /// Create an entity without components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an entity from a list of components.
    ///
    /// A later component of the same kind replaces an earlier one.
    pub fn from_components(components: impl IntoIterator<Item = Component>) -> Self {
        let mut entity = Self::new();
        for component in components {
            let kind = component.kind();
            if entity.components.insert(component) {
                tracing::warn!(%kind, "duplicate component replaced");
            }
        }
        entity
    }

    /// Build an entity from a list of components, rejecting duplicate kinds
    /// and empty alias lists.
    pub fn try_from_components(
        components: impl IntoIterator<Item = Component>,
    ) -> CoreResult<Self> {
        let mut entity = Self::new();
        for component in components {
            let kind = component.kind();
            if matches!(&component, Component::Description(desc) if desc.names.is_empty()) {
                return Err(CoreError::EmptyAliases);
            }
            if entity.components.has(kind) {
                return Err(CoreError::DuplicateComponent(kind));
            }
            entity.components.insert(component);
        }
        Ok(entity)
    }

    /// Add a component, replacing any component of the same kind.
    pub fn with(mut self, component: impl Into<Component>) -> Self {
        self.components.insert(component.into());
        self
    }

    /// Returns true if the entity carries a component of the given kind.
    pub fn has(&self, kind: ComponentKind) -> bool {
        self.components.has(kind)
    }

    /// The description component, if any.
    pub fn description(&self) -> Option<&DescriptionComponent> {
        self.components.description.as_ref()
    }

    /// The canonical name, for logs and error messages.
    pub fn name(&self) -> &str {
        self.description()
            .map(DescriptionComponent::name)
            .unwrap_or("<unnamed>")
    }
}

macro_rules! impl_into_component {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<crate::component::$ty> for Component {
                fn from(value: crate::component::$ty) -> Self {
                    Component::$variant(value)
                }
            }
        )*
    };
}

impl_into_component! {
    DescriptionComponent => Description,
    ContainerComponent => Container,
    InventoryComponent => Inventory,
    TakeableComponent => Takeable,
    FloorComponent => Floor,
    PortalComponent => Portal,
    WorldDescriptionComponent => WorldDescription,
}
