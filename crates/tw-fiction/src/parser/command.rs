//! Command grammars for player input.
//!
//! Two authoring styles compile to the same anchored regular expression:
//!
//! - a verb list, `Command::verbs(&["take", "pick up"])`, followed by one
//!   entity name;
//! - a pattern, `Command::pattern("put|place <item> on <item>")`.
//!
//! Pattern syntax: `<item>` is an entity name (an optional "the " and one or
//! two words), `a|b|c` is a choice of words, `[...]` is optional and `_` is
//! a literal space.

use std::fmt;

use regex::Regex;

use crate::error::{FictionError, FictionResult};

/// The expansion of `<item>`: an optional article, then one or two words.
const ITEM: &str = r"(?:the )?(\w+(?: \w+)?)";

/// A compiled command grammar. Stateless once built.
#[derive(Debug, Clone)]
pub struct Command {
    source: String,
    regex: Regex,
}

impl Command {
    /// Build a command from a raw regular expression. The expression must
    /// match the whole input line; each capture group is one entity name.
    pub fn regex(pattern: &str) -> FictionResult<Self> {
        Ok(Self {
            source: pattern.to_string(),
            regex: compile(&format!("^(?:{pattern})$"))?,
        })
    }

    /// Build a command from literal verb phrases followed by one entity name.
    pub fn verbs<I, S>(verbs: I) -> FictionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let verbs: Vec<String> = verbs
            .into_iter()
            .map(|v| regex::escape(v.as_ref()))
            .collect();
        let mut command = Self::regex(&format!("(?:{}) {ITEM}", verbs.join("|")))?;
        command.source = verbs.join("|");
        Ok(command)
    }

    /// Build a command from the pattern syntax described in the module docs.
    pub fn pattern(pattern: &str) -> FictionResult<Self> {
        let mut command = Self::regex(&expand_pattern(pattern)?)?;
        command.source = pattern.to_string();
        Ok(command)
    }

    /// The grammar as it was written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Match a whole input line. Returns the entity names in order, or
    /// `None` if the line does not fit the grammar.
    ///
    /// Names inside an optional span that was skipped are left out.
    pub fn get_entity_names(&self, line: &str) -> Option<Vec<String>> {
        let captures = self.regex.captures(line)?;
        Some(
            captures
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .collect(),
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Translate pattern syntax into a regular expression.
///
/// The passes run in a fixed order so that a later pass never rewrites
/// text produced by an earlier one: items, choices, optional spans, spaces.
pub(crate) fn expand_pattern(pattern: &str) -> FictionResult<String> {
    let alternation = compile(r"\b((\w+\|)+(\w+))\b")?;
    let optional = compile(r"\[(.*?)\]")?;

    let expanded = pattern.replace("<item>", ITEM);
    let expanded = alternation.replace_all(&expanded, "(?:${1})");
    let expanded = optional.replace_all(&expanded, "(?:${1})?");
    Ok(expanded.replace('_', " "))
}

fn compile(pattern: &str) -> FictionResult<Regex> {
    Regex::new(pattern).map_err(|source| FictionError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}
