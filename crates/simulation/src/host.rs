//! The seam between airport movement and the rest of the game.
//!
//! Movement code never reaches into terrain, orders, cargo or effects
//! directly; it goes through an [`AirportHost`]. The Bevy plugin supplies a
//! world-backed host, tests supply recording doubles.

use std::fmt;

use crate::aircraft::Aircraft;
use crate::events::AirportEvent;
use crate::station::{AirportStations, CompanyId, StationId};
use crate::topology::AirportRegistry;

/// Why a hangar could not be assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepotRoutingError {
    /// No airport with a hangar accepts this aircraft.
    NoHangarReachable,
    /// The acting company does not own the aircraft.
    NotOwner { acting: CompanyId, owner: CompanyId },
    /// The aircraft is already heading to a hangar and the request was service-only.
    AlreadyRouted,
}

impl fmt::Display for DepotRoutingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepotRoutingError::NoHangarReachable => write!(f, "no reachable hangar"),
            DepotRoutingError::NotOwner { acting, owner } => write!(
                f,
                "company {} cannot route an aircraft of company {}",
                acting.0, owner.0
            ),
            DepotRoutingError::AlreadyRouted => write!(f, "aircraft is already heading to a hangar"),
        }
    }
}

impl std::error::Error for DepotRoutingError {}

/// A request to send an aircraft to a hangar on behalf of a company.
#[derive(Clone, Copy)]
pub struct DepotRequest<'a> {
    /// The company on whose behalf the order is issued.
    pub acting_company: CompanyId,
    /// Only service the aircraft; keep its schedule afterwards.
    pub service_only: bool,
    pub stations: &'a AirportStations,
    pub registry: &'a AirportRegistry,
}

pub trait AirportHost {
    /// Highest pixel height of the tile under `(x, y)`.
    fn tile_height(&self, x: i32, y: i32) -> i32;

    /// Ground surface height at `(x, y)`.
    fn ground_height(&self, x: i32, y: i32) -> i32 {
        self.tile_height(x, y)
    }

    /// World size in pixels, used to pick entry quadrants.
    fn map_size_px(&self) -> (i32, i32);

    /// Advance the order list. Called before movement every pass.
    fn process_orders(&mut self, aircraft: &mut Aircraft);

    /// Progress loading at a terminal.
    fn handle_loading(&mut self, aircraft: &mut Aircraft, second_pass: bool);

    fn begin_loading(&mut self, aircraft: &mut Aircraft, station: StationId);

    /// Breakdown bookkeeping; may set `aircraft.status.broken`.
    fn handle_breakdown(&mut self, _aircraft: &mut Aircraft) {}

    fn needs_automatic_servicing(&self, aircraft: &Aircraft) -> bool;

    fn send_to_hangar(
        &mut self,
        aircraft: &mut Aircraft,
        request: DepotRequest<'_>,
    ) -> Result<(), DepotRoutingError>;

    /// The aircraft has entered a hangar at `station`.
    fn enter_depot(&mut self, aircraft: &mut Aircraft, station: StationId);

    /// Cargo loss and rating penalty after a crash.
    fn crash_cleanup(&mut self, _aircraft: &mut Aircraft, _station: Option<StationId>) {}

    fn notify(&mut self, event: AirportEvent);
}
