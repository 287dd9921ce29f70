//! Session configuration.

/// Configuration for a [`FictionSession`](crate::FictionSession).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Printed before every line of input.
    pub prompt: String,
    /// The line that ends the session.
    pub exit_command: String,
    /// The line that takes back the last turn. `None` disables undo.
    pub undo_command: Option<String>,
    /// How many turns can be taken back. Zero disables the history.
    pub history_limit: usize,
    /// Describe the starting room before the first prompt.
    pub describe_on_start: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            exit_command: "exit".to_string(),
            undo_command: Some("undo".to_string()),
            history_limit: 32,
            describe_on_start: true,
        }
    }
}

impl SessionConfig {
    /// Create a new session config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the exit command.
    pub fn with_exit_command(mut self, command: impl Into<String>) -> Self {
        self.exit_command = command.into();
        self
    }

    /// Set or clear the undo command.
    pub fn with_undo_command(mut self, command: Option<String>) -> Self {
        self.undo_command = command;
        self
    }

    /// Set the number of turns kept for undo.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Set whether the starting room is described.
    pub fn with_describe_on_start(mut self, describe: bool) -> Self {
        self.describe_on_start = describe;
        self
    }

    /// Returns true if `line` is the undo command.
    pub fn is_undo(&self, line: &str) -> bool {
        self.undo_command.as_deref() == Some(line)
    }
}
