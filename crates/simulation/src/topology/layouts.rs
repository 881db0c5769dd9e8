//! Compiled-in airport layouts.
//!
//! Coordinates are pixels relative to the airport's north corner before
//! rotation. Each table lists positions in ascending order; edges sharing a
//! position are that position's alternates, tried top to bottom.

use crate::blocks::BlockMask;
use crate::direction::Direction::{self, NE, NW, N, SE};

use super::graph::LayoutDesc;
use super::types::{
    AirportFlags, AirportKind, Heading, MovementState::*, MovingData, MovingFlags, SlotSpec,
    TerminalId, TerminalKind, TerminalSpec,
};

const NOTHING: BlockMask = BlockMask::NOTHING;
const FREE: BlockMask = BlockMask::EMPTY;
const ALL: Heading = Heading::ToAll;

const fn at(terminal: u8) -> Heading {
    Heading::State(AtTerminal(TerminalId(terminal)))
}

const fn md(x: i16, y: i16, flags: MovingFlags, dir: Direction) -> MovingData {
    MovingData::new(x, y, flags, dir)
}

const fn edge(
    position: u8,
    heading: Heading,
    block: BlockMask,
    next: u8,
) -> SlotSpec {
    SlotSpec::new(position, heading, block, next)
}

const EXACT: MovingFlags = MovingFlags::EXACT_POS;
const CRUISE: MovingFlags = MovingFlags::NO_SPEED_CLAMP.union(MovingFlags::SLOW_TURN);
const FAST: MovingFlags = MovingFlags::NO_SPEED_CLAMP;

// ---------------------------------------------------------------------------
// Dummy: holding pattern for aircraft whose airport has vanished
// ---------------------------------------------------------------------------

pub fn dummy() -> LayoutDesc {
    LayoutDesc {
        kind: AirportKind::Dummy,
        slots: vec![
            edge(0, ALL, NOTHING, 1),
            edge(1, ALL, NOTHING, 2),
            edge(2, ALL, NOTHING, 3),
            edge(3, ALL, NOTHING, 0),
        ],
        moving_data: vec![
            md(0, 0, CRUISE, N),
            md(0, 96, CRUISE, N),
            md(96, 96, CRUISE, N),
            md(96, 0, CRUISE, N),
        ],
        terminals: Vec::new(),
        entry_points: [0, 1, 2, 3],
        heli_entry_points: [0, 1, 2, 3],
        flags: AirportFlags::default(),
        size: (1, 1),
        delta_z: 0,
        wind: None,
    }
}

// ---------------------------------------------------------------------------
// Small: one runway, two terminals with pushback, one hangar
// ---------------------------------------------------------------------------

pub mod small_blocks {
    use crate::blocks::BlockMask;

    pub const TERM1: BlockMask = BlockMask::bit(0);
    pub const TERM2: BlockMask = BlockMask::bit(1);
    /// Runway and the whole apron.
    pub const AIRFIELD: BlockMask = BlockMask::bit(2);
    /// Final approach airspace.
    pub const APPROACH: BlockMask = BlockMask::bit(3);
}

pub fn small() -> LayoutDesc {
    use small_blocks::*;
    let st = Heading::State;

    LayoutDesc {
        kind: AirportKind::Small,
        slots: vec![
            edge(0, st(InHangar), NOTHING, 1),
            // apron crossing
            edge(1, Heading::TermGroup(0), AIRFIELD, 0),
            edge(1, st(InHangar), FREE, 0),
            edge(1, at(0), TERM1, 2),
            edge(1, at(1), TERM2, 3),
            edge(1, st(HeliTakeoff), FREE, 19),
            edge(1, ALL, FREE, 6),
            // terminals
            edge(2, at(0), TERM1, 1),
            edge(2, st(Backup), FREE, 4),
            edge(2, ALL, FREE, 1),
            edge(3, at(1), TERM2, 1),
            edge(3, st(Backup), FREE, 5),
            edge(3, ALL, FREE, 1),
            // pushback spots
            edge(4, st(Backup), AIRFIELD, 6),
            edge(5, st(Backup), AIRFIELD, 6),
            // departure
            edge(6, ALL, AIRFIELD, 7),
            edge(7, st(Takeoff), AIRFIELD, 8),
            edge(8, st(TakeoffRoll), AIRFIELD, 9),
            edge(9, st(TakeoffClimb), NOTHING, 0),
            // final approach fix
            edge(10, st(Flying), NOTHING, 15),
            edge(10, st(LandingApproach), FREE, 11),
            edge(10, st(HeliLandingApproach), FREE, 20),
            // threshold: land, or go around when the runway is busy
            edge(11, st(LandingApproach), APPROACH, 12),
            edge(11, st(Flying), FREE, 15),
            edge(11, ALL, FREE, 12),
            edge(12, ALL, AIRFIELD, 13),
            edge(13, st(LandingRollout), AIRFIELD, 14),
            edge(13, ALL, FREE, 14),
            edge(14, ALL, AIRFIELD, 1),
            // holding pattern
            edge(15, ALL, NOTHING, 16),
            edge(16, ALL, NOTHING, 17),
            edge(17, ALL, NOTHING, 18),
            edge(18, ALL, NOTHING, 10),
            // helicopters
            edge(19, st(HeliTakeoff), NOTHING, 0),
            edge(20, st(HeliLandingApproach), AIRFIELD, 21),
            edge(21, st(HeliLandingRollout), AIRFIELD, 1),
        ],
        moving_data: vec![
            md(52, 4, EXACT, SE),                                     // 0 hangar
            md(52, 26, MovingFlags::NONE, N),                         // 1 apron crossing
            md(32, 22, EXACT, NW),                                    // 2 terminal 1
            md(12, 22, EXACT, NW),                                    // 3 terminal 2
            md(32, 32, MovingFlags::REVERSE.union(EXACT), NW),        // 4 pushback from 1
            md(12, 32, MovingFlags::REVERSE.union(EXACT), NW),        // 5 pushback from 2
            md(52, 36, MovingFlags::NONE, N),                         // 6 taxi to runway
            md(60, 40, EXACT, NE),                                    // 7 runway start
            md(4, 40, FAST, N),                                       // 8 accelerate
            md(-80, 40, FAST.union(MovingFlags::TAKEOFF), N),         // 9 climb out
            md(176, 40, CRUISE, N),                                   // 10 final approach fix
            md(56, 40, FAST.union(MovingFlags::LAND), N),             // 11 threshold
            md(4, 40, FAST.union(MovingFlags::BRAKE), N),             // 12 brake
            md(8, 40, MovingFlags::NONE, N),                          // 13 runway end
            md(52, 40, MovingFlags::NONE, N),                         // 14 taxi back
            md(0, 192, CRUISE.union(MovingFlags::HOLD), N),           // 15 holding
            md(0, 0, CRUISE.union(MovingFlags::HOLD), N),             // 16 holding
            md(256, 0, CRUISE.union(MovingFlags::HOLD), N),           // 17 holding
            md(272, 48, CRUISE.union(MovingFlags::HOLD), N),          // 18 holding
            md(44, 36, MovingFlags::HELI_RAISE, N),                   // 19 heli lift-off
            md(44, 40, CRUISE, N),                                    // 20 above heli spot
            md(44, 40, MovingFlags::HELI_LOWER, N),                   // 21 heli touchdown
        ],
        terminals: vec![
            TerminalSpec {
                kind: TerminalKind::Passenger,
                block: TERM1,
                group: 0,
            },
            TerminalSpec {
                kind: TerminalKind::Passenger,
                block: TERM2,
                group: 0,
            },
        ],
        entry_points: [16, 15, 18, 17],
        heli_entry_points: [16, 15, 18, 17],
        flags: AirportFlags::AIRPLANES
            .union(AirportFlags::HELICOPTERS)
            .union(AirportFlags::SHORT_STRIP),
        size: (4, 3),
        delta_z: 0,
        wind: None,
    }
}

// ---------------------------------------------------------------------------
// Heliport: a single pad, no hangar
// ---------------------------------------------------------------------------

pub mod heliport_blocks {
    use crate::blocks::BlockMask;

    pub const PAD: BlockMask = BlockMask::bit(0);
    pub const AIRSPACE: BlockMask = BlockMask::bit(1);
}

pub fn heliport() -> LayoutDesc {
    use heliport_blocks::*;
    let st = Heading::State;

    LayoutDesc {
        kind: AirportKind::Heliport,
        slots: vec![
            edge(0, at(0), PAD, 1),
            edge(1, st(HeliTakeoff), NOTHING, 0),
            edge(2, st(HeliLandingApproach), AIRSPACE, 3),
            edge(3, st(HeliLandingRollout), AIRSPACE, 0),
            edge(3, at(0), FREE, 0),
            edge(3, st(HeliTakeoff), FREE, 1),
            edge(4, ALL, NOTHING, 5),
            edge(5, ALL, NOTHING, 6),
            edge(6, ALL, NOTHING, 7),
            edge(7, st(Flying), NOTHING, 4),
            edge(7, st(HeliLandingApproach), FREE, 2),
        ],
        moving_data: vec![
            md(6, 8, EXACT, NE),                // 0 pad
            md(6, 8, MovingFlags::HELI_RAISE, N), // 1 lift-off
            md(6, 8, CRUISE, N),                // 2 above pad
            md(6, 8, MovingFlags::HELI_LOWER, N), // 3 touchdown
            md(-32, 56, CRUISE, N),             // 4 circle
            md(-32, -32, CRUISE, N),            // 5 circle
            md(56, -32, CRUISE, N),             // 6 circle
            md(56, 24, CRUISE, N),              // 7 circle, landing decision
        ],
        terminals: vec![TerminalSpec {
            kind: TerminalKind::Helipad,
            block: PAD,
            group: 0,
        }],
        entry_points: [4, 5, 6, 7],
        heli_entry_points: [4, 5, 6, 7],
        flags: AirportFlags::HELICOPTERS,
        size: (1, 1),
        delta_z: 0,
        wind: None,
    }
}
