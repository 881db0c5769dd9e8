//! Assertion helpers for `TestAirfield` integration tests.

use crate::aircraft::AircraftId;
use crate::blocks::BlockMask;
use crate::topology::MovementState;

use super::TestAirfield;

impl TestAirfield {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    /// Every block an aircraft holds is marked occupied at its target station,
    /// and no two aircraft hold the same block.
    pub fn assert_blocks_consistent(&mut self) {
        let fleet = self.fleet();
        for (i, ac) in fleet.iter().enumerate() {
            let held = ac.ground.held.resources();
            if held.is_empty() {
                continue;
            }
            let occupied = self
                .stations()
                .airport(ac.ground.target_station)
                .map_or(BlockMask::EMPTY, |st| st.occupied);
            assert!(
                occupied.contains(held),
                "aircraft {} holds {:?} but station {} only has {:?} occupied",
                ac.id.0,
                held,
                ac.ground.target_station.0,
                occupied
            );
            for other in &fleet[i + 1..] {
                if other.ground.target_station != ac.ground.target_station {
                    continue;
                }
                let shared = held & other.ground.held.resources();
                assert!(
                    shared.is_empty(),
                    "aircraft {} and {} both hold {:?}",
                    ac.id.0,
                    other.id.0,
                    shared
                );
            }
        }
    }

    pub fn assert_state(&mut self, id: AircraftId, expected: MovementState) {
        let state = self.aircraft(id).ground.state;
        assert_eq!(state, expected, "aircraft {} is {:?}, expected {:?}", id.0, state, expected);
    }

    pub fn assert_aircraft_count(&mut self, expected: usize) {
        let count = self.aircraft_count();
        assert_eq!(count, expected, "Expected {expected} aircraft, found {count}");
    }
}
