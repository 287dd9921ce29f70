//! The standard rule table.

use tw_core::Direction;

use crate::action::{
    DefaultEnterAction, DefaultExamineAction, DefaultTakeAction, DescribeWorldAction, DropAction,
    EnterAction, ExamineAction, InventoryAction, MoveAction, PutOnAction, TakeAction,
};
use crate::dispatch::CommandTable;
use crate::error::FictionResult;
use crate::parser::Command;

/// Verb phrases that pick something up.
pub const TAKE_VERBS: &[&str] = &["take", "pick up", "grab", "get"];
/// Verb phrases that examine something.
pub const EXAMINE_VERBS: &[&str] = &["examine", "x", "look at", "l", "describe"];

/// Build the rule table every world starts with.
///
/// Specific rules come before their fallbacks: `take key` reaches
/// [`DefaultTakeAction`] only when the key is not takeable.
pub fn standard_rules() -> FictionResult<CommandTable> {
    let take = Command::verbs(TAKE_VERBS)?;
    let examine = Command::verbs(EXAMINE_VERBS)?;
    let enter = Command::pattern("enter|go_in|go_into <item>")?;

    let mut table = CommandTable::new()
        .with(take.clone(), TakeAction)
        .with(take, DefaultTakeAction)
        .with(examine.clone(), ExamineAction)
        .with(examine, DefaultExamineAction)
        .with(Command::pattern("put|place|drop <item> on <item>")?, PutOnAction)
        .with(Command::pattern("drop <item>")?, DropAction)
        .with(Command::pattern("inventory|i")?, InventoryAction)
        .with(Command::pattern("look|l")?, DescribeWorldAction)
        .with(enter.clone(), EnterAction)
        .with(enter, DefaultEnterAction);

    for direction in Direction::WALKABLE {
        let grammar = format!(
            "[move_|go_]{}|{}",
            direction.name(),
            direction.abbreviation()
        );
        table.push(Command::pattern(&grammar)?, MoveAction::new(direction));
    }

    tracing::debug!(rules = table.len(), "standard rules compiled");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::fixture;
    use crate::dispatch::interpret_command;
    use crate::error::FictionError;

    fn chosen(line: &str) -> Result<&'static str, FictionError> {
        let f = fixture();
        let table = standard_rules().unwrap();
        interpret_command(&f.world, &table, line).map(|d| d.action.name())
    }

    #[test]
    fn table_shape() {
        let table = standard_rules().unwrap();
        assert_eq!(table.len(), 10 + Direction::WALKABLE.len());
        assert_eq!(table.rules()[0].command.source(), "take|pick up|grab|get");
    }

    #[test]
    fn verbs_reach_their_actions() {
        assert_eq!(chosen("take iron key").unwrap(), "take");
        assert_eq!(chosen("get the barrel").unwrap(), "default take");
        assert_eq!(chosen("x table").unwrap(), "examine");
        assert_eq!(chosen("look at key").unwrap(), "examine");
        assert_eq!(chosen("put key on table").unwrap(), "put on");
        assert_eq!(chosen("drop key on table").unwrap(), "put on");
        assert_eq!(chosen("drop key").unwrap(), "drop");
        assert_eq!(chosen("i").unwrap(), "inventory");
        assert_eq!(chosen("look").unwrap(), "look");
        assert_eq!(chosen("l").unwrap(), "look");
        assert_eq!(chosen("go into stairs").unwrap(), "enter");
        assert_eq!(chosen("enter barrel").unwrap(), "default enter");
        assert_eq!(chosen("go north").unwrap(), "move");
        assert_eq!(chosen("u").unwrap(), "move");
        assert_eq!(chosen("move southwest").unwrap(), "move");
    }

    #[test]
    fn unknown_lines_are_invalid() {
        assert!(matches!(chosen("dance"), Err(FictionError::InvalidCommand(_))));
        assert!(matches!(chosen("take"), Err(FictionError::InvalidCommand(_))));
        assert!(matches!(chosen("take lamp"), Err(FictionError::NoMatch(_))));
    }
}
