//! Events emitted by airport movement, and the bounded journal that keeps
//! the most recent ones for inspection.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::aircraft::AircraftId;
use crate::config::JOURNAL_CAPACITY;
use crate::station::StationId;
use crate::topology::TerminalId;
use crate::TickCounter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    /// Landed too fast and skidded off the runway.
    Landing,
    /// Target airport vanished and no hangar could be found.
    OutOfFuel,
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum AirportEvent {
    /// First aircraft ever to arrive at a station.
    FirstArrival {
        aircraft: AircraftId,
        station: StationId,
    },
    ArrivedAtTerminal {
        aircraft: AircraftId,
        station: StationId,
        terminal: TerminalId,
    },
    EnteredHangar {
        aircraft: AircraftId,
        station: StationId,
    },
    LeftHangar {
        aircraft: AircraftId,
        station: StationId,
    },
    TakeoffSound {
        aircraft: AircraftId,
    },
    HelicopterStart {
        aircraft: AircraftId,
    },
    Touchdown {
        aircraft: AircraftId,
        station: StationId,
    },
    WentAround {
        aircraft: AircraftId,
        station: StationId,
    },
    Crashed {
        aircraft: AircraftId,
        cause: CrashCause,
        station: Option<StationId>,
    },
    CrashExplosion {
        aircraft: AircraftId,
        x: i32,
        y: i32,
        z: i32,
    },
    Smoke {
        aircraft: AircraftId,
        x: i32,
        y: i32,
        z: i32,
    },
    DestinationTooFar {
        aircraft: AircraftId,
    },
    DestinationReachable {
        aircraft: AircraftId,
    },
    /// Crashed aircraft removed from the world.
    Removed {
        aircraft: AircraftId,
    },
}

impl AirportEvent {
    pub fn aircraft(&self) -> AircraftId {
        match *self {
            AirportEvent::FirstArrival { aircraft, .. }
            | AirportEvent::ArrivedAtTerminal { aircraft, .. }
            | AirportEvent::EnteredHangar { aircraft, .. }
            | AirportEvent::LeftHangar { aircraft, .. }
            | AirportEvent::TakeoffSound { aircraft }
            | AirportEvent::HelicopterStart { aircraft }
            | AirportEvent::Touchdown { aircraft, .. }
            | AirportEvent::WentAround { aircraft, .. }
            | AirportEvent::Crashed { aircraft, .. }
            | AirportEvent::CrashExplosion { aircraft, .. }
            | AirportEvent::Smoke { aircraft, .. }
            | AirportEvent::DestinationTooFar { aircraft }
            | AirportEvent::DestinationReachable { aircraft }
            | AirportEvent::Removed { aircraft } => aircraft,
        }
    }

    /// Visual effects only. Kept out of the journal.
    pub fn is_effect(&self) -> bool {
        matches!(
            self,
            AirportEvent::CrashExplosion { .. } | AirportEvent::Smoke { .. }
        )
    }
}

/// Recent airport events, oldest first, capped at [`JOURNAL_CAPACITY`].
#[derive(Resource, Debug, Default)]
pub struct AirportJournal {
    entries: VecDeque<(u64, AirportEvent)>,
}

impl AirportJournal {
    pub fn push(&mut self, tick: u64, event: AirportEvent) {
        if self.entries.len() == JOURNAL_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back((tick, event));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(u64, AirportEvent)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_matching(&self, f: impl Fn(&AirportEvent) -> bool) -> usize {
        self.entries.iter().filter(|(_, e)| f(e)).count()
    }
}

/// Copy this tick's non-effect events into the journal.
pub fn record_airport_events(
    tick: Res<TickCounter>,
    mut reader: EventReader<AirportEvent>,
    mut journal: ResMut<AirportJournal>,
) {
    for event in reader.read().filter(|e| !e.is_effect()) {
        journal.push(tick.0, event.clone());
    }
}
