use crate::component::ComponentKind;
use crate::entity::EntityId;
use crate::world::RoomId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or manipulating a world.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The room was never registered with [`World::add_room`](crate::World::add_room).
    #[error("room not registered: {0}")]
    UnknownRoom(RoomId),

    /// The requested entity handle does not exist in the world.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// An entity lacks a component an operation depends on.
    #[error("entity {entity} has no {kind} component")]
    MissingComponent {
        /// The entity that was inspected.
        entity: EntityId,
        /// The kind that was required.
        kind: ComponentKind,
    },

    /// An item would end up resting on itself.
    #[error("{item} cannot be put on {target}, which rests on it")]
    ContainmentCycle {
        /// The item being moved.
        item: EntityId,
        /// The container it was meant to rest on.
        target: EntityId,
    },

    /// Two components of the same kind were given for one entity.
    #[error("duplicate {0} component")]
    DuplicateComponent(ComponentKind),

    /// A description component was given without any alias.
    #[error("description needs at least one name")]
    EmptyAliases,

    /// A world definition could not be turned into a world.
    #[error("invalid world definition: {0}")]
    Definition(#[from] DefinitionError),
}

/// Errors raised while loading a world definition.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    /// The document is not valid JSON or does not fit the schema.
    #[error("malformed document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two entities share an id.
    #[error("duplicate entity id \"{0}\"")]
    DuplicateId(String),

    /// Two rooms share a name.
    #[error("duplicate room \"{0}\"")]
    DuplicateRoom(String),

    /// A portal or the start field names a room that does not exist.
    #[error("unknown room \"{0}\"")]
    UnknownRoom(String),

    /// A container lists an entity id that does not exist.
    #[error("unknown entity id \"{0}\"")]
    UnknownEntity(String),

    /// A container lists an entity that has no name to narrate it by.
    #[error("entity \"{0}\" rests on a container but has no name")]
    UnnamedItem(String),

    /// The document defines no rooms.
    #[error("world has no rooms")]
    NoRooms,
}
