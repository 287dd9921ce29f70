use std::path::Path;

use colored::Colorize;

pub fn run(path: &Path) -> Result<(), String> {
    let world = super::load_world(Some(path))?;

    let start = world
        .current_room()
        .and_then(|id| world.room(id))
        .map_or("-", |room| room.name.as_str());

    println!("  All checks passed for '{}'.", path.display());
    println!(
        "  {} rooms, {} entities, starting in {}",
        world.room_count(),
        world.entity_count(),
        start.bold()
    );

    Ok(())
}
