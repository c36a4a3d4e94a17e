//! Grid squares, pixel conversion and the overlap test shared by every
//! entity on the board.
//!
//! ```text
//!   col: -1 ........ 0 .. 1 .. 2 .. 3 .. 4 ........ num_cols
//!        (spawn)                                  (wraps to -1)
//!   row 0             water / goal
//!   row 1..=3         road
//!   row num_rows - 1  start
//! ```
use crate::config::Config;
use serde::{Deserialize, Serialize};

/// The collision tolerance used when none is configured
pub const DEFAULT_TOLERANCE: f64 = 0.7;

/// A place on the grid. Columns are fractional so enemies can glide between
/// squares; rows are always whole.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub col: f64,
    pub row: i32,
}

impl Position {
    pub const fn new(col: f64, row: i32) -> Self {
        Position { col, row }
    }
}

/// Canvas coordinates in pixels, top left is origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// x = col * col_width, y = row * row_height + row_offset
pub fn to_pixels(position: Position, row_offset: f64, config: &Config) -> Point {
    Point {
        x: position.col * config.col_width,
        y: f64::from(position.row) * config.row_height + row_offset,
    }
}

/// True iff both are on the same row and their columns are closer than
/// `tolerance`.
pub fn collides(player: Position, other: Position, tolerance: f64) -> bool {
    player.row == other.row && (player.col - other.col).abs() < tolerance
}

/// Grid position plus the pixel point it was last drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    position: Position,
    point: Point,
}

impl Placement {
    /// No range checks: col = -1 is a legal "about to wrap in" value.
    pub fn place(&mut self, position: Position, row_offset: f64, config: &Config) {
        self.position = position;
        self.point = to_pixels(position, row_offset, config);
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn point(&self) -> Point {
        self.point
    }
}
