//! Entity name resolution against the active set.

use tw_core::component::NameMatcher;
use tw_core::{EntityId, World};

use crate::error::{FictionError, FictionResult};

/// Find every active entity with an alias containing `name` as a whole word.
///
/// Entities without a description are never candidates. Results keep
/// active-set order.
pub fn lookup_entities(world: &World, name: &str) -> Vec<EntityId> {
    let Some(matcher) = NameMatcher::new(name) else {
        return Vec::new();
    };
    world
        .active()
        .filter(|(_, entity)| entity.description().is_some_and(|d| matcher.matches(d)))
        .map(|(id, _)| id)
        .collect()
}

/// Resolve a name to exactly one active entity.
///
/// No match and more than one match are both errors; there is no
/// disambiguation.
pub fn resolve_entity(world: &World, name: &str) -> FictionResult<EntityId> {
    let matches = lookup_entities(world, name);
    tracing::debug!(
        fragment = name,
        count = matches.len(),
        matched = ?matches
            .iter()
            .filter_map(|id| world.entity(*id).map(|e| e.name()))
            .collect::<Vec<_>>(),
        "name resolved"
    );
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(FictionError::NoMatch(name.to_string())),
        many => Err(FictionError::Ambiguous {
            name: name.to_string(),
            count: many.len(),
        }),
    }
}
