use std::io::{self, IsTerminal};
use std::path::Path;

use colored::Colorize;

use tw_fiction::{FictionSession, SessionConfig, standard_rules};

/// Options for `tw play`.
pub struct PlayOptions<'a> {
    pub world: Option<&'a Path>,
    pub prompt: &'a str,
    pub intro: bool,
    pub history: usize,
}

pub fn run(options: PlayOptions<'_>) -> Result<(), String> {
    let world = super::load_world(options.world)?;
    let rules = standard_rules().map_err(|e| e.to_string())?;

    let stdout = io::stdout();
    let prompt = if stdout.is_terminal() {
        options.prompt.bold().to_string()
    } else {
        options.prompt.to_string()
    };
    let config = SessionConfig::new()
        .with_prompt(prompt)
        .with_describe_on_start(options.intro)
        .with_history_limit(options.history);

    let mut session = FictionSession::new(world, rules, config);
    session
        .run(io::stdin().lock(), stdout.lock())
        .map_err(|e| e.to_string())
}
