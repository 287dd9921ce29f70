pub mod check;
pub mod play;

use std::fs;
use std::path::Path;

use tw_core::World;

/// The world played when no file is given.
const DEMO_WORLD: &str = include_str!("../../worlds/cellar.json");

/// Load a world definition from a file, or the built-in demo.
fn load_world(path: Option<&Path>) -> Result<World, String> {
    let source = match path {
        Some(path) => read_source(path)?,
        None => DEMO_WORLD.to_string(),
    };
    let label = path.map_or_else(|| "demo world".to_string(), |p| p.display().to_string());
    tw_core::load_world(&source).map_err(|e| format!("{label}: {e}"))
}

fn read_source(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}
