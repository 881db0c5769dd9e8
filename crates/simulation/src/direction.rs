//! Compass directions used for aircraft headings and airport rotation.
//!
//! The eight directions are numbered clockwise starting at north, so rotating
//! a heading is modular addition. The four diagonal directions (NE, SE, SW,
//! NW) run along the tile axes of the map.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Encode, Decode, Serialize, Deserialize,
)]
pub enum Direction {
    #[default]
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

/// Clockwise difference between two directions, in 45 degree steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirDiff(u8);

impl DirDiff {
    pub const SAME: DirDiff = DirDiff(0);
    pub const RIGHT_45: DirDiff = DirDiff(1);
    pub const RIGHT_90: DirDiff = DirDiff(2);
    pub const REVERSE: DirDiff = DirDiff(4);
    pub const LEFT_90: DirDiff = DirDiff(6);
    pub const LEFT_45: DirDiff = DirDiff(7);

    pub fn steps(self) -> u8 {
        self.0
    }
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Direction {
        Self::ALL[(index & 7) as usize]
    }

    /// Turn by the given clockwise difference.
    pub fn turn(self, diff: DirDiff) -> Direction {
        Direction::from_index(self.index().wrapping_add(diff.0))
    }

    /// Rotate this direction by an airport rotation (itself expressed as a direction).
    pub fn rotate(self, rotation: Direction) -> Direction {
        Direction::from_index(self.index() + rotation.index())
    }

    /// Clockwise difference from `other` to `self`.
    pub fn difference(self, other: Direction) -> DirDiff {
        DirDiff(self.index().wrapping_sub(other.index()) & 7)
    }

    pub fn reverse(self) -> Direction {
        self.turn(DirDiff::REVERSE)
    }

    /// One-step offset in world pixels `(dx, dy)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::N => (-1, -1),
            Direction::NE => (-1, 0),
            Direction::E => (-1, 1),
            Direction::SE => (0, 1),
            Direction::S => (1, 1),
            Direction::SW => (1, 0),
            Direction::W => (1, -1),
            Direction::NW => (0, -1),
        }
    }

    /// Direction of travel for a unit step towards a target offset.
    ///
    /// Returns `None` when both components are zero.
    pub fn towards(dx: i32, dy: i32) -> Option<Direction> {
        let sx = dx.signum();
        let sy = dy.signum();
        Direction::ALL.into_iter().find(|d| d.delta() == (sx, sy))
    }

    /// True for NE, SE, SW and NW, which move along a single tile axis.
    pub fn along_tile_axis(self) -> bool {
        self.index() & 1 == 1
    }

    /// True for the directions whose ground track points north to south-east,
    /// used to separate opposing flight levels.
    pub fn is_northbound_half(self) -> bool {
        matches!(
            self,
            Direction::N | Direction::NE | Direction::E | Direction::SE
        )
    }
}

/// The four tile-axis directions, used to pick airport entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
pub enum DiagDirection {
    NE,
    SE,
    SW,
    NW,
}

impl DiagDirection {
    pub const ALL: [DiagDirection; 4] = [
        DiagDirection::NE,
        DiagDirection::SE,
        DiagDirection::SW,
        DiagDirection::NW,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> DiagDirection {
        Self::ALL[(index & 3) as usize]
    }

    /// Tile-axis direction closest to `dir` when rounding anticlockwise.
    pub fn from_direction(dir: Direction) -> DiagDirection {
        DiagDirection::from_index(dir.index() >> 1)
    }

    /// Undo an airport rotation: the entry point index stored in an unrotated layout.
    pub fn unrotate(self, rotation: Direction) -> DiagDirection {
        let rot = DiagDirection::from_direction(rotation).index();
        DiagDirection::from_index(self.index().wrapping_sub(rot) & 3)
    }
}
