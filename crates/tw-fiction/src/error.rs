//! Error types for the fiction engine.

use thiserror::Error;
use tw_core::CoreError;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur while interpreting and applying a command.
#[derive(Debug, Error)]
pub enum FictionError {
    /// A name fragment matched no active entity.
    #[error("No objects match that description")]
    NoMatch(String),

    /// A name fragment matched more than one active entity.
    #[error("Multiple objects match that description")]
    Ambiguous {
        /// The fragment the player typed.
        name: String,
        /// How many active entities it matched.
        count: usize,
    },

    /// No rule matched the input and passed validation.
    #[error("Invalid command.")]
    InvalidCommand(String),

    /// An action was applied to the wrong number of entities.
    #[error("{action} expects {expected} entities, got {found}")]
    Arity {
        /// The action's name.
        action: &'static str,
        /// Its declared arity.
        expected: usize,
        /// The number of entities it was given.
        found: usize,
    },

    /// A command grammar did not compile.
    #[error("invalid command pattern {pattern:?}: {source}")]
    Pattern {
        /// The grammar source.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// The world rejected an operation.
    #[error(transparent)]
    World(#[from] CoreError),

    /// Reading input or writing narration failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl FictionError {
    /// Returns true for errors the player caused by typing something the
    /// game cannot act on. These are reported and play continues.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NoMatch(_) | Self::Ambiguous { .. } | Self::InvalidCommand(_)
        )
    }
}
