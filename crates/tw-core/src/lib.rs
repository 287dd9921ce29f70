//! Core types for Textwerk: entities, components, rooms, and the world model.
//!
//! This crate defines the data model the command interpreter operates on.
//! It is independent of the interpreter: you can construct a [`World`]
//! programmatically or load one from a JSON [`WorldDefinition`].

/// Typed component data (descriptions, containers, portals, etc.).
pub mod component;
/// JSON world definitions.
pub mod definition;
/// Entity handles and component bundles.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Query builder for filtering active entities by component.
pub mod query;
/// The central world model that owns entities and rooms.
pub mod world;

/// Re-export component types.
pub use component::{Component, ComponentKind, ComponentSet, Direction};
/// Re-export definition types.
pub use definition::{WorldDefinition, load_world};
/// Re-export core entity types.
pub use entity::{Entity, EntityId};
/// Re-export error types.
pub use error::{CoreError, CoreResult, DefinitionError};
/// Re-export world model types.
pub use world::{Room, RoomId, World};
