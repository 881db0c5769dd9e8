use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::blocks::BlockMask;
use crate::direction::Direction;

/// Index of a position in an airport topology.
pub type PositionId = u8;

/// Built-in airport layouts plus layouts loaded at runtime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, Serialize, Deserialize,
)]
pub enum AirportKind {
    /// Holding pattern used while the target airport is missing.
    Dummy,
    Small,
    Heliport,
    /// Layout registered from a data file.
    Custom(u16),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, Serialize, Deserialize,
)]
pub struct TerminalId(pub u8);

/// What a terminal is for. The allocation policy matches it against the
/// aircraft class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
pub enum TerminalKind {
    Passenger,
    Cargo,
    Helipad,
}

/// Discrete movement state of an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize)]
pub enum MovementState {
    InHangar,
    AtTerminal(TerminalId),
    /// Pushing back from a terminal before taxiing.
    Backup,
    Takeoff,
    TakeoffRoll,
    TakeoffClimb,
    HeliTakeoff,
    Flying,
    LandingApproach,
    LandingRollout,
    HeliLandingApproach,
    HeliLandingRollout,
    Crashed,
}

impl MovementState {
    /// States during which the aircraft is airborne or committed to the
    /// runway; range checks are skipped while in them.
    pub fn is_flight_phase(self) -> bool {
        matches!(
            self,
            MovementState::TakeoffClimb
                | MovementState::HeliTakeoff
                | MovementState::Flying
                | MovementState::LandingApproach
                | MovementState::LandingRollout
                | MovementState::HeliLandingApproach
                | MovementState::HeliLandingRollout
        )
    }

    pub fn terminal(self) -> Option<TerminalId> {
        match self {
            MovementState::AtTerminal(t) => Some(t),
            _ => None,
        }
    }
}

/// The routing label on an edge: which aircraft state selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Taken by any aircraft, regardless of state.
    ToAll,
    /// Lists the terminals of a group; the block gates the whole group.
    TermGroup(u8),
    /// Taken by aircraft in the given state. On a position's first edge it
    /// also means "an aircraft in this state has arrived".
    State(MovementState),
}

impl Heading {
    pub fn selects(self, state: MovementState) -> bool {
        match self {
            Heading::ToAll => true,
            Heading::TermGroup(_) => false,
            Heading::State(s) => s == state,
        }
    }
}

/// Flags that shape how an aircraft moves towards a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MovingFlags(pub u16);

impl MovingFlags {
    pub const NONE: MovingFlags = MovingFlags(0);
    /// No speed restriction while moving.
    pub const NO_SPEED_CLAMP: MovingFlags = MovingFlags(1 << 0);
    /// Climb to flight level.
    pub const TAKEOFF: MovingFlags = MovingFlags(1 << 1);
    /// Turn slowly, as in flight.
    pub const SLOW_TURN: MovingFlags = MovingFlags(1 << 2);
    /// Glide towards the ground.
    pub const LAND: MovingFlags = MovingFlags(1 << 3);
    /// Arrival requires reaching the exact coordinate.
    pub const EXACT_POS: MovingFlags = MovingFlags(1 << 4);
    /// Decelerate on the ground; may crash when too fast.
    pub const BRAKE: MovingFlags = MovingFlags(1 << 5);
    pub const HELI_RAISE: MovingFlags = MovingFlags(1 << 6);
    pub const HELI_LOWER: MovingFlags = MovingFlags(1 << 7);
    /// Holding pattern.
    pub const HOLD: MovingFlags = MovingFlags(1 << 8);
    /// Pushback: move backwards without changing heading.
    pub const REVERSE: MovingFlags = MovingFlags(1 << 9);

    pub const fn union(self, other: MovingFlags) -> MovingFlags {
        MovingFlags(self.0 | other.0)
    }

    pub fn contains(self, flag: MovingFlags) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl std::ops::BitOr for MovingFlags {
    type Output = MovingFlags;

    fn bitor(self, rhs: MovingFlags) -> MovingFlags {
        self.union(rhs)
    }
}

/// Where a position lies inside the unrotated airport, and how to get there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingData {
    pub x: i16,
    pub y: i16,
    pub flags: MovingFlags,
    /// Heading the aircraft takes on arrival.
    pub direction: Direction,
}

impl MovingData {
    pub const fn new(x: i16, y: i16, flags: MovingFlags, direction: Direction) -> Self {
        Self {
            x,
            y,
            flags,
            direction,
        }
    }
}

/// One edge as written in a layout table. Consecutive entries with the same
/// position form that position's alternate chain in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpec {
    pub position: PositionId,
    pub heading: Heading,
    pub block: BlockMask,
    pub next: PositionId,
}

impl SlotSpec {
    pub const fn new(position: PositionId, heading: Heading, block: BlockMask, next: PositionId) -> Self {
        Self {
            position,
            heading,
            block,
            next,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSpec {
    pub kind: TerminalKind,
    /// Resource that represents the terminal being occupied.
    pub block: BlockMask,
    pub group: u8,
}

/// Capability bits of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AirportFlags(pub u8);

impl AirportFlags {
    pub const AIRPLANES: AirportFlags = AirportFlags(1 << 0);
    pub const HELICOPTERS: AirportFlags = AirportFlags(1 << 1);
    /// Short runway: fast jets risk crashing on landing.
    pub const SHORT_STRIP: AirportFlags = AirportFlags(1 << 2);

    pub const fn union(self, other: AirportFlags) -> AirportFlags {
        AirportFlags(self.0 | other.0)
    }

    pub fn contains(self, flag: AirportFlags) -> bool {
        self.0 & flag.0 == flag.0
    }
}

/// Periodic lateral displacement applied to airborne aircraft near an airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindProfile {
    /// Apply the drift every this many steps; zero disables it.
    pub drift_every: u8,
    pub drift: (i8, i8),
}
