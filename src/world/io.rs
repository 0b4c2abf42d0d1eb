//! File I/O for worlds in the terse text format

use super::{CellState, OccupantKind, World, WorldParams};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Load a world from a text file
/// Format: a header of seven integers followed by one `NAME x y` line per occupant
pub fn load_world_from_file<P: AsRef<Path>>(path: P) -> Result<World> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read world file: {}", path.as_ref().display()))?;

    let world = parse_world_from_string(&content)
        .with_context(|| format!("Failed to parse world from file: {}", path.as_ref().display()))?;

    debug!(
        path = %path.as_ref().display(),
        rows = world.rows(),
        cols = world.cols(),
        occupants = world.occupied_count(),
        "Loaded world"
    );
    Ok(world)
}

/// Parse a world from its terse string representation
pub fn parse_world_from_string(content: &str) -> Result<World> {
    let mut lines = content
        .lines()
        .map(|line| line.trim())
        .enumerate()
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| anyhow::anyhow!("World file is empty"))?;

    let fields = header
        .split_whitespace()
        .map(|field| {
            field
                .parse::<i32>()
                .with_context(|| format!("Invalid header value '{}'", field))
        })
        .collect::<Result<Vec<i32>>>()?;

    let [prey_repro, predator_repro, predator_starve, generations, rows, cols, count] = fields[..]
    else {
        anyhow::bail!(
            "Header has {} values, expected 7 (prey/predator reproduction, starvation, generations, rows, cols, objects)",
            fields.len()
        );
    };

    if count < 0 {
        anyhow::bail!("Object count cannot be negative: {}", count);
    }

    let params = WorldParams::new(prey_repro, predator_repro, predator_starve, generations, rows, cols);
    let mut world = World::create(params).context("Failed to create world")?;

    let mut placed = 0usize;
    for (line_idx, line) in lines {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [name, x, y] = parts[..] else {
            anyhow::bail!("Line {}: expected 'NAME x y', got '{}'", line_idx + 1, line);
        };

        let kind = OccupantKind::from_name(name).ok_or_else(|| {
            anyhow::anyhow!(
                "Line {}: unknown object '{}'. Only ROCK, RABBIT and FOX are allowed",
                line_idx + 1,
                name
            )
        })?;
        let x: i32 = x
            .parse()
            .with_context(|| format!("Line {}: invalid row '{}'", line_idx + 1, x))?;
        let y: i32 = y
            .parse()
            .with_context(|| format!("Line {}: invalid column '{}'", line_idx + 1, y))?;

        if world.is_interior(x, y) && world.read_current(x, y)?.kind().is_occupied() {
            warn!(x, y, "Cell placed twice, keeping the later object");
            placed -= 1;
        }

        world
            .place(x, y, CellState::of(kind))
            .with_context(|| format!("Line {}: cannot place {} at ({}, {})", line_idx + 1, name, x, y))?;
        placed += 1;
    }

    if placed != count as usize {
        anyhow::bail!("Header declares {} objects but {} were placed", count, placed);
    }

    Ok(world)
}

/// Save a world to a text file
pub fn save_world_to_file<P: AsRef<Path>>(world: &World, path: P) -> Result<()> {
    let content = world_to_string(world);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write world to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a world to its terse string representation
pub fn world_to_string(world: &World) -> String {
    world.to_terse_string()
}

/// Create example world files for testing
pub fn create_example_worlds<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Single rabbit in the middle of a 3x3 field
    let single_content = "1 1 1 10 3 3 1\nRABBIT 1 1\n";
    std::fs::write(dir.join("single_rabbit.txt"), single_content)
        .context("Failed to write single_rabbit.txt")?;

    // Small mixed field
    let small_content = "\
2 4 3 6 5 5 9
ROCK 0 0
RABBIT 0 2
RABBIT 1 0
FOX 1 4
ROCK 2 2
RABBIT 3 1
FOX 3 3
RABBIT 4 0
ROCK 4 4
";
    std::fs::write(dir.join("small.txt"), small_content)
        .context("Failed to write small.txt")?;

    // Rock wall splitting a wide field
    let wall_content = "\
3 8 5 20 4 7 7
ROCK 0 3
ROCK 1 3
ROCK 2 3
RABBIT 0 0
RABBIT 3 1
FOX 1 6
FOX 3 5
";
    std::fs::write(dir.join("wall.txt"), wall_content)
        .context("Failed to write wall.txt")?;

    Ok(())
}
