//! Command interpreter for Textwerk.
//!
//! Turns player input into world changes: command grammars compiled to
//! regular expressions, name resolution against the active set, an ordered
//! rule table with fallbacks, the standard actions, and a session loop with
//! undo.

/// Actions and the standard action set.
pub mod action;
/// Session configuration.
pub mod config;
/// Rule tables and command dispatch.
pub mod dispatch;
/// Error types for the interpreter.
pub mod error;
mod narrator;
/// Command grammars and entity resolution.
pub mod parser;
/// The standard rule table.
pub mod rules;
/// Interactive fiction session management.
pub mod session;

pub use action::Action;
pub use config::SessionConfig;
pub use dispatch::{CommandTable, Dispatch, EntitySpec, Rule, interpret_command};
pub use error::{FictionError, FictionResult};
pub use parser::{Command, lookup_entities, resolve_entity};
pub use rules::standard_rules;
pub use session::FictionSession;
