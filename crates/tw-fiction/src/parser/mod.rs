//! Command grammars and entity name resolution.

mod command;
mod resolver;

pub use command::Command;
pub use resolver::{lookup_entities, resolve_entity};
