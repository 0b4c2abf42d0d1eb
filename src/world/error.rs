//! Error types for world construction and cell access

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorldError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("Failed to allocate grid buffer of {cells} cells")]
    Allocation { cells: usize },

    #[error("Invalid world dimensions {rows}x{cols}: rows and columns must be positive")]
    InvalidDimension { rows: i32, cols: i32 },

    #[error("Coordinates ({x}, {y}) out of bounds for {rows}x{cols} world")]
    Bounds { x: i32, y: i32, rows: i32, cols: i32 },

    #[error("Cell index {index} out of bounds for buffer of {len} cells")]
    IndexOutOfRange { index: usize, len: usize },
}
