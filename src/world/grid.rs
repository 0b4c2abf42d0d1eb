//! Bordered grid storage with a current/next buffer per cell

use super::cell::{CellState, GridCell, OccupantKind};
use super::error::{Result, WorldError};
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation parameters carried alongside the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldParams {
    pub prey_reproduction_period: i32,
    pub predator_reproduction_period: i32,
    pub predator_starvation_period: i32,
    pub generations: i32,
    pub rows: i32,
    pub cols: i32,
}

impl WorldParams {
    pub fn new(
        prey_reproduction_period: i32,
        predator_reproduction_period: i32,
        predator_starvation_period: i32,
        generations: i32,
        rows: i32,
        cols: i32,
    ) -> Self {
        Self {
            prey_reproduction_period,
            predator_reproduction_period,
            predator_starvation_period,
            generations,
            rows,
            cols,
        }
    }
}

/// Per-kind occupant counts over the interior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Census {
    pub empty: usize,
    pub obstacles: usize,
    pub prey: usize,
    pub predators: usize,
}

impl Census {
    pub fn occupied(&self) -> usize {
        self.obstacles + self.prey + self.predators
    }

    fn record(&mut self, kind: OccupantKind) {
        match kind {
            OccupantKind::None => self.empty += 1,
            OccupantKind::Obstacle => self.obstacles += 1,
            OccupantKind::Prey => self.prey += 1,
            OccupantKind::Predator => self.predators += 1,
        }
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Population:")?;
        writeln!(f, "  Rocks:   {}", self.obstacles)?;
        writeln!(f, "  Rabbits: {}", self.prey)?;
        writeln!(f, "  Foxes:   {}", self.predators)?;
        write!(f, "  Empty:   {}", self.empty)
    }
}

/// The world grid.
///
/// Cells live in one row-major buffer of `(rows + 2) x (cols + 2)` entries. The outer ring
/// is a permanent obstacle frame, so every interior cell has all eight neighbours at fixed
/// offsets in the buffer and neighbour lookups never branch on the edge.
#[derive(Debug, Clone)]
pub struct World {
    params: WorldParams,
    stride: usize,
    cells: Vec<GridCell>,
}

impl World {
    /// Allocate a world with every interior cell empty and the border ring set to obstacles
    pub fn create(params: WorldParams) -> Result<Self> {
        if params.rows <= 0 || params.cols <= 0 {
            return Err(WorldError::InvalidDimension {
                rows: params.rows,
                cols: params.cols,
            });
        }

        let padded_rows = params.rows as usize + 2;
        let stride = params.cols as usize + 2;
        let len = padded_rows
            .checked_mul(stride)
            .ok_or(WorldError::Allocation { cells: usize::MAX })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| WorldError::Allocation { cells: len })?;
        cells.resize(len, GridCell::default());

        let last_row = (padded_rows - 1) * stride;
        for y in 0..stride {
            cells[y] = GridCell::OBSTACLE;
            cells[last_row + y] = GridCell::OBSTACLE;
        }
        for x in 1..padded_rows - 1 {
            cells[x * stride] = GridCell::OBSTACLE;
            cells[x * stride + stride - 1] = GridCell::OBSTACLE;
        }

        Ok(Self {
            params,
            stride,
            cells,
        })
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }

    pub fn rows(&self) -> i32 {
        self.params.rows
    }

    pub fn cols(&self) -> i32 {
        self.params.cols
    }

    /// Length of one padded row in the buffer
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of cells in the buffer, border included
    pub fn buffer_len(&self) -> usize {
        self.cells.len()
    }

    /// Map a coordinate in `[-1, rows] x [-1, cols]` to its buffer index
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Result<usize> {
        if x < -1 || x > self.params.rows || y < -1 || y > self.params.cols {
            return Err(self.bounds_error(x, y));
        }
        Ok(self.raw_index(x, y))
    }

    /// Same as [`World::index_of`] but only accepts interior coordinates
    #[inline]
    pub fn interior_index(&self, x: i32, y: i32) -> Result<usize> {
        if !self.is_interior(x, y) {
            return Err(self.bounds_error(x, y));
        }
        Ok(self.raw_index(x, y))
    }

    pub fn is_interior(&self, x: i32, y: i32) -> bool {
        (0..self.params.rows).contains(&x) && (0..self.params.cols).contains(&y)
    }

    /// Whether a buffer index falls on the sentinel border ring
    pub fn is_border_index(&self, index: usize) -> bool {
        let row = index / self.stride;
        let col = index % self.stride;
        row == 0 || row == self.params.rows as usize + 1 || col == 0 || col == self.stride - 1
    }

    pub fn cell_at(&self, index: usize) -> Result<&GridCell> {
        self.cells.get(index).ok_or(WorldError::IndexOutOfRange {
            index,
            len: self.cells.len(),
        })
    }

    /// Mutable access to an interior cell. Border cells are rejected so the obstacle
    /// frame cannot be disturbed.
    pub fn cell_at_mut(&mut self, index: usize) -> Result<&mut GridCell> {
        let len = self.cells.len();
        if index >= len {
            return Err(WorldError::IndexOutOfRange { index, len });
        }
        if self.is_border_index(index) {
            let x = (index / self.stride) as i32 - 1;
            let y = (index % self.stride) as i32 - 1;
            return Err(self.bounds_error(x, y));
        }
        Ok(&mut self.cells[index])
    }

    /// Committed state at `(x, y)`, border ring included
    pub fn read_current(&self, x: i32, y: i32) -> Result<CellState> {
        let idx = self.index_of(x, y)?;
        Ok(self.cells[idx].current)
    }

    /// Scratch state at `(x, y)`, border ring included
    pub fn read_next(&self, x: i32, y: i32) -> Result<CellState> {
        let idx = self.index_of(x, y)?;
        Ok(self.cells[idx].next)
    }

    pub fn write_next(&mut self, x: i32, y: i32, state: CellState) -> Result<()> {
        let idx = self.interior_index(x, y)?;
        self.cells[idx].next = state;
        Ok(())
    }

    /// Set both the current and next state of an interior cell
    pub fn place(&mut self, x: i32, y: i32, state: CellState) -> Result<()> {
        let idx = self.interior_index(x, y)?;
        self.cells[idx] = GridCell::settled(state);
        Ok(())
    }

    /// Committed states of the eight neighbours of an interior cell, in the order
    /// NW, N, NE, W, E, SW, S, SE (x grows southwards, y eastwards).
    pub fn neighborhood(&self, x: i32, y: i32) -> Result<[CellState; 8]> {
        let idx = self.interior_index(x, y)?;
        // the border ring keeps every offset inside the buffer
        let up = idx - self.stride;
        let down = idx + self.stride;
        Ok([
            self.cells[up - 1].current,
            self.cells[up].current,
            self.cells[up + 1].current,
            self.cells[idx - 1].current,
            self.cells[idx + 1].current,
            self.cells[down - 1].current,
            self.cells[down].current,
            self.cells[down + 1].current,
        ])
    }

    /// Publish every interior `next` state as the new `current` state
    pub fn advance_generation(&mut self) {
        let cols = self.params.cols as usize;
        for row in self
            .cells
            .chunks_exact_mut(self.stride)
            .skip(1)
            .take(self.params.rows as usize)
        {
            for cell in &mut row[1..=cols] {
                cell.commit();
            }
        }
    }

    /// Interior coordinates in row-major order
    pub fn interior_coords(&self) -> impl Iterator<Item = (i32, i32)> {
        iproduct!(0..self.params.rows, 0..self.params.cols)
    }

    /// Occupied interior cells as `(kind, x, y)`, row-major
    pub fn occupants(&self) -> Vec<(OccupantKind, i32, i32)> {
        self.interior_coords()
            .filter_map(|(x, y)| {
                let kind = self.cells[self.raw_index(x, y)].current.kind();
                kind.is_occupied().then_some((kind, x, y))
            })
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.interior_coords()
            .filter(|&(x, y)| self.cells[self.raw_index(x, y)].current.kind().is_occupied())
            .count()
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for (x, y) in self.interior_coords() {
            census.record(self.cells[self.raw_index(x, y)].current.kind());
        }
        census
    }

    /// Header line with the parameters and occupant count, then one `NAME x y` line per occupant
    pub fn to_terse_string(&self) -> String {
        let occupants = self.occupants();
        let p = &self.params;
        let mut output = format!(
            "{} {} {} {} {} {} {}\n",
            p.prey_reproduction_period,
            p.predator_reproduction_period,
            p.predator_starvation_period,
            p.generations,
            p.rows,
            p.cols,
            occupants.len()
        );
        for (kind, x, y) in occupants {
            if let Some(name) = kind.name() {
                output.push_str(&format!("{} {} {}\n", name, x, y));
            }
        }
        output
    }

    /// Framed one-glyph-per-cell rendering of the interior
    pub fn to_pretty_string(&self) -> String {
        let cols = self.params.cols as usize;
        let rule = "-".repeat(cols + 2);
        let mut output = String::with_capacity((cols + 3) * (self.params.rows as usize + 2));

        output.push_str(&rule);
        output.push('\n');
        for row in self
            .cells
            .chunks_exact(self.stride)
            .skip(1)
            .take(self.params.rows as usize)
        {
            output.push('|');
            output.extend(row[1..=cols].iter().map(|cell| cell.current.kind().glyph()));
            output.push_str("|\n");
        }
        output.push_str(&rule);
        output.push('\n');
        output
    }

    pub fn print_terse(&self) {
        print!("{}", self.to_terse_string());
    }

    pub fn print_pretty(&self) {
        print!("{}", self.to_pretty_string());
    }

    /// Same parameters and same occupant kind in every interior cell. Counters are ignored.
    pub fn equals(&self, other: &World) -> bool {
        self.params == other.params
            && self
                .interior_coords()
                .map(|(x, y)| self.raw_index(x, y))
                .all(|idx| self.cells[idx].current.kind() == other.cells[idx].current.kind())
    }

    #[inline]
    fn raw_index(&self, x: i32, y: i32) -> usize {
        (x + 1) as usize * self.stride + (y + 1) as usize
    }

    fn bounds_error(&self, x: i32, y: i32) -> WorldError {
        WorldError::Bounds {
            x,
            y,
            rows: self.params.rows,
            cols: self.params.cols,
        }
    }
}

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pretty_string())
    }
}

/// Compare two possibly absent worlds. Absent worlds never compare equal, not even to each other.
pub fn worlds_equal(left: Option<&World>, right: Option<&World>) -> bool {
    match (left, right) {
        (Some(left), Some(right)) => left.equals(right),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn params(rows: i32, cols: i32) -> WorldParams {
        WorldParams::new(1, 1, 1, 10, rows, cols)
    }

    fn border_coords(world: &World) -> Vec<(i32, i32)> {
        let (rows, cols) = (world.rows(), world.cols());
        iproduct!(-1..=rows, -1..=cols)
            .filter(|&(x, y)| x == -1 || x == rows || y == -1 || y == cols)
            .collect()
    }

    #[test]
    fn test_world_creation() {
        let world = World::create(params(3, 4)).unwrap();
        assert_eq!(world.buffer_len(), 5 * 6);
        assert_eq!(world.stride(), 6);
        assert_eq!(world.occupied_count(), 0);
        assert_eq!(world.census().empty, 12);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            World::create(params(0, 3)).unwrap_err(),
            WorldError::InvalidDimension { rows: 0, cols: 3 }
        );
        assert!(matches!(
            World::create(params(3, -2)),
            Err(WorldError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_oversized_world_fails_allocation() {
        let result = World::create(params(i32::MAX, i32::MAX));
        assert!(matches!(result, Err(WorldError::Allocation { .. })));
    }

    #[test]
    fn test_empty_world_terse_dump() {
        let world = World::create(WorldParams::new(2, 8, 4, 6, 5, 7)).unwrap();
        assert_eq!(world.to_terse_string(), "2 8 4 6 5 7 0\n");
    }

    #[test]
    fn test_interior_indices_are_unique() {
        for (rows, cols) in [(3, 3), (2, 5), (6, 1), (1, 1)] {
            let world = World::create(params(rows, cols)).unwrap();
            let interior: HashSet<usize> = world
                .interior_coords()
                .map(|(x, y)| world.index_of(x, y).unwrap())
                .collect();
            assert_eq!(interior.len(), (rows * cols) as usize);

            for (x, y) in border_coords(&world) {
                let idx = world.index_of(x, y).unwrap();
                assert!(!interior.contains(&idx));
                assert!(world.is_border_index(idx));
            }
        }
    }

    #[test]
    fn test_index_matches_padded_layout() {
        let world = World::create(params(3, 3)).unwrap();
        assert_eq!(world.index_of(-1, -1).unwrap(), 0);
        assert_eq!(world.index_of(0, 0).unwrap(), 6);
        assert_eq!(world.index_of(1, 1).unwrap(), 2 * 5 + 2);
        assert_eq!(world.index_of(3, 3).unwrap(), 24);
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let world = World::create(params(3, 4)).unwrap();
        assert!(matches!(world.index_of(-2, 0), Err(WorldError::Bounds { .. })));
        assert!(matches!(world.index_of(0, 5), Err(WorldError::Bounds { .. })));
        assert!(matches!(world.index_of(4, 0), Err(WorldError::Bounds { .. })));
        assert!(world.index_of(3, 4).is_ok());
        assert!(matches!(
            world.cell_at(world.buffer_len()),
            Err(WorldError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_border_is_obstacle_and_stays_so() {
        let mut world = World::create(params(3, 4)).unwrap();
        for (x, y) in world.interior_coords().collect::<Vec<_>>() {
            world
                .write_next(x, y, CellState::of(OccupantKind::Predator))
                .unwrap();
        }
        for _ in 0..3 {
            world.advance_generation();
        }

        for (x, y) in border_coords(&world) {
            let cell = world.cell_at(world.index_of(x, y).unwrap()).unwrap();
            assert_eq!(cell.current.kind(), OccupantKind::Obstacle);
            assert_eq!(cell.next.kind(), OccupantKind::Obstacle);
        }
    }

    #[test]
    fn test_border_cells_reject_writes() {
        let mut world = World::create(params(3, 3)).unwrap();
        assert!(world.write_next(-1, 0, CellState::EMPTY).is_err());
        assert!(world.write_next(1, 3, CellState::EMPTY).is_err());
        assert!(world.place(3, 3, CellState::EMPTY).is_err());

        let border = world.index_of(0, -1).unwrap();
        assert_eq!(
            world.cell_at_mut(border).unwrap_err(),
            WorldError::Bounds { x: 0, y: -1, rows: 3, cols: 3 }
        );

        let interior = world.index_of(2, 2).unwrap();
        world.cell_at_mut(interior).unwrap().next = CellState::of(OccupantKind::Prey);
        assert_eq!(world.read_next(2, 2).unwrap().kind(), OccupantKind::Prey);
    }

    #[test]
    fn test_commit_is_idempotent_without_writes() {
        let mut world = World::create(params(4, 4)).unwrap();
        world.place(0, 0, CellState::new(OccupantKind::Prey, 0, 2)).unwrap();
        world.place(3, 2, CellState::new(OccupantKind::Predator, 4, 1)).unwrap();
        let before = world.to_terse_string();

        world.advance_generation();
        world.advance_generation();

        assert_eq!(world.to_terse_string(), before);
        assert_eq!(world.read_current(3, 2).unwrap().starvation(), 4);
    }

    #[test]
    fn test_next_is_invisible_until_commit() {
        let mut world = World::create(params(3, 3)).unwrap();
        world.write_next(1, 1, CellState::of(OccupantKind::Prey)).unwrap();
        assert!(world.read_current(1, 1).unwrap().is_empty());

        world.advance_generation();
        assert_eq!(world.read_current(1, 1).unwrap().kind(), OccupantKind::Prey);
    }

    #[test]
    fn test_commit_round_trip() {
        let mut world = World::create(params(3, 5)).unwrap();
        let assignment = |x: i32, y: i32| OccupantKind::ALL[((x * 5 + y) % 4) as usize];

        for (x, y) in world.interior_coords().collect::<Vec<_>>() {
            world.write_next(x, y, CellState::of(assignment(x, y))).unwrap();
        }
        world.advance_generation();

        for (x, y) in world.interior_coords() {
            assert_eq!(world.read_current(x, y).unwrap().kind(), assignment(x, y));
        }
        for (x, y) in border_coords(&world) {
            assert_eq!(world.read_current(x, y).unwrap().kind(), OccupantKind::Obstacle);
        }
    }

    #[test]
    fn test_neighborhood_at_corner_sees_border() {
        let mut world = World::create(params(2, 3)).unwrap();
        world.place(0, 1, CellState::of(OccupantKind::Prey)).unwrap();
        world.place(1, 1, CellState::of(OccupantKind::Predator)).unwrap();

        let around = world.neighborhood(0, 0).unwrap();
        let kinds: Vec<OccupantKind> = around.iter().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                OccupantKind::Obstacle,
                OccupantKind::Obstacle,
                OccupantKind::Obstacle,
                OccupantKind::Obstacle,
                OccupantKind::Prey,
                OccupantKind::Obstacle,
                OccupantKind::None,
                OccupantKind::Predator,
            ]
        );
        assert!(world.neighborhood(2, 0).is_err());
    }

    #[test]
    fn test_single_prey_scenario() {
        let mut world = World::create(params(3, 3)).unwrap();
        let idx = world.index_of(1, 1).unwrap();
        world.cell_at_mut(idx).unwrap().next.set_kind(OccupantKind::Prey);
        world.advance_generation();

        assert_eq!(world.to_terse_string(), "1 1 1 10 3 3 1\nRABBIT 1 1\n");
        assert_eq!(
            world.to_pretty_string(),
            "-----\n|   |\n| R |\n|   |\n-----\n"
        );
    }

    #[test]
    fn test_pretty_print_all_glyphs() {
        let mut world = World::create(params(2, 2)).unwrap();
        world.place(0, 1, CellState::OBSTACLE).unwrap();
        world.place(1, 0, CellState::of(OccupantKind::Prey)).unwrap();
        world.place(1, 1, CellState::of(OccupantKind::Predator)).unwrap();

        assert_eq!(world.to_string(), "----\n| *|\n|RF|\n----\n");
    }

    #[test]
    fn test_terse_dump_is_row_major() {
        let mut world = World::create(params(3, 3)).unwrap();
        world.place(2, 0, CellState::of(OccupantKind::Predator)).unwrap();
        world.place(0, 2, CellState::OBSTACLE).unwrap();
        world.place(0, 1, CellState::of(OccupantKind::Prey)).unwrap();

        assert_eq!(
            world.to_terse_string(),
            "1 1 1 10 3 3 3\nRABBIT 0 1\nROCK 0 2\nFOX 2 0\n"
        );
    }

    #[test]
    fn test_equality_ignores_counters() {
        let mut left = World::create(params(3, 3)).unwrap();
        let mut right = World::create(params(3, 3)).unwrap();
        left.place(1, 2, CellState::new(OccupantKind::Predator, 7, 3)).unwrap();
        right.place(1, 2, CellState::new(OccupantKind::Predator, 0, 0)).unwrap();

        assert!(left.equals(&left));
        assert!(left.equals(&right));
        assert!(worlds_equal(Some(&left), Some(&right)));

        right.place(0, 0, CellState::OBSTACLE).unwrap();
        assert!(!left.equals(&right));
    }

    #[test]
    fn test_equality_checks_parameters() {
        let left = World::create(params(3, 3)).unwrap();
        let right = World::create(WorldParams::new(1, 1, 2, 10, 3, 3)).unwrap();
        let wider = World::create(params(3, 4)).unwrap();
        assert!(!left.equals(&right));
        assert!(!left.equals(&wider));
    }

    #[test]
    fn test_absent_worlds_are_not_equal() {
        let world = World::create(params(2, 2)).unwrap();
        assert!(!worlds_equal(None, None));
        assert!(!worlds_equal(Some(&world), None));
        assert!(!worlds_equal(None, Some(&world)));
    }

    #[test]
    fn test_census() {
        let mut world = World::create(params(2, 3)).unwrap();
        world.place(0, 0, CellState::OBSTACLE).unwrap();
        world.place(0, 1, CellState::of(OccupantKind::Prey)).unwrap();
        world.place(1, 2, CellState::of(OccupantKind::Prey)).unwrap();

        let census = world.census();
        assert_eq!(census.obstacles, 1);
        assert_eq!(census.prey, 2);
        assert_eq!(census.predators, 0);
        assert_eq!(census.empty, 3);
        assert_eq!(census.occupied(), world.occupied_count());
    }
}
