//! Occupant kinds and the packed per-cell state

use serde::{Deserialize, Serialize};
use std::fmt;

/// What occupies a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum OccupantKind {
    #[default]
    None = 0,
    Obstacle = 1,
    Prey = 2,
    Predator = 3,
}

/// Externally visible names, indexed by kind discriminant. Empty cells have no name.
pub const OCCUPANT_NAMES: [Option<&str>; 4] = [None, Some("ROCK"), Some("RABBIT"), Some("FOX")];

/// Pretty-print glyphs, indexed by kind discriminant
pub const OCCUPANT_GLYPHS: [char; 4] = [' ', '*', 'R', 'F'];

impl OccupantKind {
    pub const ALL: [OccupantKind; 4] = [
        OccupantKind::None,
        OccupantKind::Obstacle,
        OccupantKind::Prey,
        OccupantKind::Predator,
    ];

    /// Decode a 2-bit tag. Only the low two bits are looked at.
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0b11) as usize]
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> Option<&'static str> {
        OCCUPANT_NAMES[self as usize]
    }

    pub fn glyph(self) -> char {
        OCCUPANT_GLYPHS[self as usize]
    }

    /// Reverse lookup through the name table
    pub fn from_name(name: &str) -> Option<Self> {
        OCCUPANT_NAMES
            .iter()
            .position(|entry| *entry == Some(name))
            .map(|idx| Self::ALL[idx])
    }

    pub fn is_occupied(self) -> bool {
        self != OccupantKind::None
    }
}

impl fmt::Display for OccupantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("NONE"))
    }
}

const KIND_MASK: u16 = 0b11;
const STARVATION_SHIFT: u16 = 2;
const STARVATION_MASK: u16 = 0b11_1111;
const REPRODUCTION_SHIFT: u16 = 8;
const REPRODUCTION_MASK: u16 = 0xff;

/// State of a single occupant, packed into 16 bits:
///
/// | bits   | field                |
/// |--------|----------------------|
/// | 0..2   | occupant kind        |
/// | 2..8   | starvation counter   |
/// | 8..16  | reproduction counter |
///
/// Counters wrap at their bit width; the rule engine decides what the bounds mean.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct CellState(u16);

impl CellState {
    pub const MAX_STARVATION: u8 = STARVATION_MASK as u8;
    pub const MAX_REPRODUCTION: u8 = REPRODUCTION_MASK as u8;

    pub const EMPTY: CellState = CellState(0);
    pub const OBSTACLE: CellState = CellState(OccupantKind::Obstacle as u16);

    pub fn new(kind: OccupantKind, starvation: u8, reproduction: u8) -> Self {
        Self(kind.bits() as u16)
            .with_starvation(starvation)
            .with_reproduction(reproduction)
    }

    /// A fresh occupant with both counters at zero
    pub fn of(kind: OccupantKind) -> Self {
        Self(kind.bits() as u16)
    }

    #[inline]
    pub fn from_packed(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn pack(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn kind(self) -> OccupantKind {
        OccupantKind::from_bits((self.0 & KIND_MASK) as u8)
    }

    #[inline]
    pub fn starvation(self) -> u8 {
        ((self.0 >> STARVATION_SHIFT) & STARVATION_MASK) as u8
    }

    #[inline]
    pub fn reproduction(self) -> u8 {
        ((self.0 >> REPRODUCTION_SHIFT) & REPRODUCTION_MASK) as u8
    }

    pub fn with_kind(self, kind: OccupantKind) -> Self {
        Self((self.0 & !KIND_MASK) | kind.bits() as u16)
    }

    pub fn with_starvation(self, starvation: u8) -> Self {
        let field = (starvation as u16 & STARVATION_MASK) << STARVATION_SHIFT;
        Self((self.0 & !(STARVATION_MASK << STARVATION_SHIFT)) | field)
    }

    pub fn with_reproduction(self, reproduction: u8) -> Self {
        let field = (reproduction as u16 & REPRODUCTION_MASK) << REPRODUCTION_SHIFT;
        Self((self.0 & !(REPRODUCTION_MASK << REPRODUCTION_SHIFT)) | field)
    }

    pub fn set_kind(&mut self, kind: OccupantKind) {
        *self = self.with_kind(kind);
    }

    pub fn set_starvation(&mut self, starvation: u8) {
        *self = self.with_starvation(starvation);
    }

    pub fn set_reproduction(&mut self, reproduction: u8) {
        *self = self.with_reproduction(reproduction);
    }

    pub fn is_empty(self) -> bool {
        self.kind() == OccupantKind::None
    }
}

impl From<OccupantKind> for CellState {
    fn from(kind: OccupantKind) -> Self {
        Self::of(kind)
    }
}

impl fmt::Debug for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellState")
            .field("kind", &self.kind())
            .field("starvation", &self.starvation())
            .field("reproduction", &self.reproduction())
            .finish()
    }
}

/// The committed state of a cell and the scratch state for the upcoming generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridCell {
    pub current: CellState,
    pub next: CellState,
}

impl GridCell {
    pub const OBSTACLE: GridCell = GridCell {
        current: CellState::OBSTACLE,
        next: CellState::OBSTACLE,
    };

    /// Place a state into both halves, as when loading a world
    pub fn settled(state: CellState) -> Self {
        Self {
            current: state,
            next: state,
        }
    }

    #[inline]
    pub fn commit(&mut self) {
        self.current = self.next;
    }
}
