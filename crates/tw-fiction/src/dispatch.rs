//! Turning an input line into a validated (action, entities) pair.
//!
//! Rules are tried in order. A rule whose grammar does not match, whose
//! arity differs, or whose entity specs reject an argument is skipped. A
//! name that resolves to nothing, or to more than one entity, ends the
//! whole search: the player picked the right verb but named something
//! that is not there.

use std::fmt;

use tw_core::{ComponentKind, Entity, EntityId, World};

use crate::action::Action;
use crate::error::{FictionError, FictionResult};
use crate::parser::{Command, resolve_entity};

/// The components an action argument must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySpec {
    required: &'static [ComponentKind],
}

impl EntitySpec {
    /// Accepts every entity.
    pub const ANY: EntitySpec = EntitySpec::new(&[]);

    /// A spec requiring all of the given component kinds.
    pub const fn new(required: &'static [ComponentKind]) -> Self {
        Self { required }
    }

    /// The required component kinds.
    pub fn required(&self) -> &'static [ComponentKind] {
        self.required
    }

    /// Returns true if the entity carries every required component.
    pub fn matches(&self, entity: &Entity) -> bool {
        self.required.iter().all(|kind| entity.has(*kind))
    }
}

impl fmt::Display for EntitySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<String> = self.required.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", kinds.join(", "))
    }
}

/// One (command, action) pair of a [`CommandTable`].
#[derive(Debug)]
pub struct Rule {
    /// The grammar that must match.
    pub command: Command,
    /// The action to run when it does.
    pub action: Box<dyn Action>,
}

/// Ordered rules. Earlier rules take priority.
#[derive(Debug, Default)]
pub struct CommandTable {
    rules: Vec<Rule>,
}

impl CommandTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule at the lowest priority.
    pub fn push(&mut self, command: Command, action: impl Action + 'static) {
        self.rules.push(Rule {
            command,
            action: Box::new(action),
        });
    }

    /// Builder form of [`CommandTable::push`].
    pub fn with(mut self, command: Command, action: impl Action + 'static) -> Self {
        self.push(command, action);
        self
    }

    /// The rules, in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The outcome of a successful dispatch.
#[derive(Debug)]
pub struct Dispatch<'t> {
    /// The chosen action.
    pub action: &'t dyn Action,
    /// Its arguments, in grammar order.
    pub entities: Vec<EntityId>,
}

/// Why a rule was passed over after its grammar matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mismatch {
    Arity { expected: usize, found: usize },
    Spec { position: usize, spec: EntitySpec },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity { expected, found } => {
                write!(f, "action expects {expected} entities, command has {found}")
            }
            Self::Spec { position, spec } => {
                write!(f, "argument {position} does not satisfy {spec}")
            }
        }
    }
}

/// Find the first rule that accepts the line.
///
/// Never mutates the world.
pub fn interpret_command<'t>(
    world: &World,
    table: &'t CommandTable,
    line: &str,
) -> FictionResult<Dispatch<'t>> {
    for rule in table.rules() {
        let Some(names) = rule.command.get_entity_names(line) else {
            continue;
        };
        tracing::debug!(
            command = %rule.command,
            action = rule.action.name(),
            names = ?names,
            "command matched"
        );

        let entities = names
            .iter()
            .map(|name| resolve_entity(world, name))
            .collect::<FictionResult<Vec<_>>>()?;

        if let Err(mismatch) = check(world, rule.action.as_ref(), &entities) {
            tracing::debug!(action = rule.action.name(), %mismatch, "skipping rule");
            continue;
        }

        tracing::info!(action = rule.action.name(), entities = ?entities, "action chosen");
        return Ok(Dispatch {
            action: rule.action.as_ref(),
            entities,
        });
    }

    Err(FictionError::InvalidCommand(line.to_string()))
}

fn check(world: &World, action: &dyn Action, entities: &[EntityId]) -> Result<(), Mismatch> {
    let specs = action.prerequisites();
    if specs.len() != entities.len() {
        return Err(Mismatch::Arity {
            expected: specs.len(),
            found: entities.len(),
        });
    }
    for (position, (spec, id)) in specs.iter().zip(entities).enumerate() {
        if !world.entity(*id).is_some_and(|e| spec.matches(e)) {
            return Err(Mismatch::Spec {
                position,
                spec: *spec,
            });
        }
    }
    Ok(())
}
