//! CLI frontend for the Textwerk adventure interpreter.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tw",
    about = "Textwerk: play text adventures described in JSON",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log more (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a world (default: the built-in demo)
    Play {
        /// World definition file (JSON)
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// Prompt printed before each command
        #[arg(long, default_value = "> ")]
        prompt: String,

        /// Do not describe the starting room
        #[arg(long)]
        no_intro: bool,

        /// Number of turns that can be undone (0 disables undo)
        #[arg(long, default_value = "32")]
        history: usize,
    },

    /// Validate a world definition file
    Check {
        /// World definition file (JSON)
        file: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            world,
            prompt,
            no_intro,
            history,
        } => commands::play::run(commands::play::PlayOptions {
            world: world.as_deref(),
            prompt: &prompt,
            intro: !no_intro,
            history,
        }),
        Commands::Check { file } => commands::check::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
