use std::fmt;

use super::types::PositionId;

/// Problems found while building or validating an airport layout.
#[derive(Debug)]
pub enum LayoutError {
    /// The layout has no positions at all.
    Empty,
    /// Position ids must start at 0 and grow by one.
    NonContiguous {
        expected: PositionId,
        found: PositionId,
    },
    TooManyPositions(usize),
    MovingDataMismatch {
        positions: usize,
        moving_data: usize,
    },
    NextOutOfRange {
        position: PositionId,
        next: PositionId,
    },
    EntryOutOfRange(PositionId),
    UnknownTerminal {
        position: PositionId,
        terminal: u8,
    },
    UnknownTermGroup {
        position: PositionId,
        group: u8,
    },
    /// No landing edge can be reached from an entry point.
    LandingUnreachable {
        entry: PositionId,
    },
    /// The layout file could not be parsed.
    Parse(String),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Empty => write!(f, "layout has no positions"),
            LayoutError::NonContiguous { expected, found } => {
                write!(f, "expected position {expected}, found {found}")
            }
            LayoutError::TooManyPositions(n) => write!(f, "layout has {n} positions, at most 255 allowed"),
            LayoutError::MovingDataMismatch {
                positions,
                moving_data,
            } => write!(
                f,
                "{positions} positions but {moving_data} moving data entries"
            ),
            LayoutError::NextOutOfRange { position, next } => {
                write!(f, "position {position} points at missing position {next}")
            }
            LayoutError::EntryOutOfRange(pos) => write!(f, "entry point {pos} does not exist"),
            LayoutError::UnknownTerminal { position, terminal } => {
                write!(f, "position {position} names unknown terminal {terminal}")
            }
            LayoutError::UnknownTermGroup { position, group } => {
                write!(f, "position {position} lists empty terminal group {group}")
            }
            LayoutError::LandingUnreachable { entry } => {
                write!(f, "no landing edge reachable from entry point {entry}")
            }
            LayoutError::Parse(msg) => write!(f, "layout parse error: {msg}"),
        }
    }
}

impl std::error::Error for LayoutError {}

impl From<serde_json::Error> for LayoutError {
    fn from(e: serde_json::Error) -> Self {
        LayoutError::Parse(e.to_string())
    }
}
