//! The block reservation authority: every grant, refusal and release of an
//! airport resource goes through these methods.

use bevy::log::trace;

use crate::aircraft::AircraftGroundState;
use crate::station::StationAirportState;

use super::mask::BlockMask;

impl StationAirportState {
    /// Whether reserving `candidate` would collide with another aircraft.
    /// Bits the asking aircraft already holds never conflict.
    pub fn has_conflict(&self, held: BlockMask, candidate: BlockMask) -> bool {
        ((self.occupied ^ held) & candidate).resources() != BlockMask::EMPTY
    }

    /// Reserve `candidate` for the aircraft, or refuse and bring it to a stop.
    pub fn try_acquire(&mut self, ground: &mut AircraftGroundState, candidate: BlockMask) -> bool {
        if self.has_conflict(ground.held, candidate) {
            trace!(
                "station {}: refused {:?}, occupied {:?}",
                self.id.0,
                candidate,
                self.occupied
            );
            ground.stop();
            return false;
        }
        let grant = candidate.resources();
        self.occupied |= grant;
        ground.held |= grant;
        true
    }

    /// Release the given bits, limited to those the aircraft actually holds.
    pub fn release(&mut self, ground: &mut AircraftGroundState, mask: BlockMask) {
        let owned = mask & ground.held;
        self.occupied = self.occupied.without(owned);
        ground.held = ground.held.without(owned);
    }

    /// Release everything the aircraft holds here.
    pub fn release_all(&mut self, ground: &mut AircraftGroundState) {
        let held = ground.held;
        self.release(ground, held);
    }

    /// Drop every reservation at this station.
    pub fn force_clear(&mut self) {
        self.occupied = BlockMask::EMPTY;
    }
}
