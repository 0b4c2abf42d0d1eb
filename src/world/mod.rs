//! Bordered predator/prey world grid

pub mod cell;
pub mod error;
pub mod grid;
pub mod io;

pub use cell::{CellState, GridCell, OccupantKind, OCCUPANT_GLYPHS, OCCUPANT_NAMES};
pub use error::WorldError;
pub use grid::{worlds_equal, Census, World, WorldParams};
pub use io::{create_example_worlds, load_world_from_file, parse_world_from_string, save_world_to_file, world_to_string};
