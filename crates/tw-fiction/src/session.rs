//! Interactive fiction session management.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use tw_core::World;

use crate::config::SessionConfig;
use crate::dispatch::{CommandTable, interpret_command};
use crate::error::FictionResult;
use crate::narrator;
use crate::rules::standard_rules;

/// An interactive fiction session: a world, the rules that drive it, and
/// the snapshots needed to take turns back.
#[derive(Debug)]
pub struct FictionSession {
    world: World,
    rules: CommandTable,
    config: SessionConfig,
    history: VecDeque<World>,
}

impl FictionSession {
    /// Create a session.
    pub fn new(world: World, rules: CommandTable, config: SessionConfig) -> Self {
        Self {
            world,
            rules,
            config,
            history: VecDeque::new(),
        }
    }

    /// Create a session with the standard rules and default config.
    pub fn standard(world: World) -> FictionResult<Self> {
        Ok(Self::new(world, standard_rules()?, SessionConfig::default()))
    }

    /// Get the current world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get the rule table.
    pub fn rules(&self) -> &CommandTable {
        &self.rules
    }

    /// Get the config.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Number of turns that can be taken back.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Interpret one line and apply the chosen action.
    ///
    /// A failed dispatch leaves the world untouched.
    pub fn process(&mut self, line: &str) -> FictionResult<String> {
        let dispatch = interpret_command(&self.world, &self.rules, line)?;

        let snapshot = (dispatch.action.mutates() && self.config.history_limit > 0)
            .then(|| self.world.clone());
        let narration = dispatch.action.apply(&mut self.world, &dispatch.entities)?;

        if let Some(snapshot) = snapshot.filter(|s| *s != self.world) {
            self.remember(snapshot);
        }
        Ok(narration)
    }

    /// Restore the world as it was before the last turn that changed it.
    pub fn rewind(&mut self) -> String {
        match self.history.pop_back() {
            Some(previous) => {
                self.world = previous;
                tracing::debug!(remaining = self.history.len(), "turn undone");
                "Undone.".to_string()
            }
            None => "Nothing to undo.".to_string(),
        }
    }

    /// Like [`FictionSession::process`], but mistakes the player made are
    /// turned into their one-line reply. Only fatal errors remain.
    pub fn respond(&mut self, line: &str) -> FictionResult<String> {
        match self.process(line) {
            Err(err) if err.is_user_facing() => {
                tracing::debug!(line, error = ?err, "command rejected");
                Ok(err.to_string())
            }
            other => other,
        }
    }

    /// Play until the exit command or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> FictionResult<()> {
        tracing::info!(rules = self.rules.len(), "session started");
        if self.config.describe_on_start {
            write_narration(&mut output, &narrator::describe_room(&self.world)?)?;
        }

        let mut buffer = String::new();
        loop {
            write!(output, "{}", self.config.prompt)?;
            output.flush()?;

            buffer.clear();
            if input.read_line(&mut buffer)? == 0 {
                break;
            }
            let line = buffer.trim_end_matches(['\n', '\r']);
            if line == self.config.exit_command {
                break;
            }

            let narration = if self.config.is_undo(line) {
                self.rewind()
            } else {
                self.respond(line)?
            };
            write_narration(&mut output, &narration)?;
        }

        tracing::info!("session ended");
        Ok(())
    }

    fn remember(&mut self, snapshot: World) {
        self.history.push_back(snapshot);
        while self.history.len() > self.config.history_limit {
            self.history.pop_front();
        }
    }
}

fn write_narration<W: Write>(output: &mut W, narration: &str) -> FictionResult<()> {
    if !narration.is_empty() {
        writeln!(output, "{narration}")?;
    }
    Ok(())
}
