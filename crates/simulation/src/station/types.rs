use std::collections::BTreeMap;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::blocks::BlockMask;
use crate::config::TILE_SIZE;
use crate::direction::Direction;
use crate::topology::{AirportKind, TerminalId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, Serialize, Deserialize,
)]
pub struct StationId(pub u32);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, Serialize, Deserialize,
)]
pub struct CompanyId(pub u8);

/// Map tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Encode, Decode, Serialize, Deserialize)]
pub struct TilePos {
    pub x: u32,
    pub y: u32,
}

impl TilePos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// World pixel coordinate of the tile's north corner.
    pub fn origin_px(self) -> (i32, i32) {
        (self.x as i32 * TILE_SIZE, self.y as i32 * TILE_SIZE)
    }

    /// Tile containing the given world pixel, saturating at the map origin.
    pub fn from_px(x: i32, y: i32) -> Self {
        Self {
            x: (x.max(0) / TILE_SIZE) as u32,
            y: (y.max(0) / TILE_SIZE) as u32,
        }
    }

    /// Squared tile distance, used for range checks.
    pub fn distance_squared(self, other: TilePos) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        dx * dx + dy * dy
    }
}

/// Per-station airport state: the shared reservation mask plus the
/// ownership and policy data the movement code consults.
#[derive(Debug, Clone, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct StationAirportState {
    pub id: StationId,
    /// Station sign location; survives removal of the airport itself.
    pub xy: TilePos,
    /// North tile of the airport, `None` once the airport has been removed.
    pub tile: Option<TilePos>,
    pub kind: AirportKind,
    /// Only N, E, S and W are valid.
    pub rotation: Direction,
    pub width: u8,
    pub height: u8,
    /// Union of every resource currently reserved by any aircraft.
    pub occupied: BlockMask,
    /// Terminals that refuse aircraft under a full-load order, one bit per terminal id.
    pub fullload_restricted: u64,
    /// Terminals leased to a company other than the station owner.
    pub terminal_owners: BTreeMap<TerminalId, CompanyId>,
    /// `None` for a neutral (e.g. oil rig) station.
    pub owner: Option<CompanyId>,
    /// Whether neutral terminals may be used by any company.
    pub allow_shared_use: bool,
    pub closed: bool,
    /// Set once the first aircraft has arrived at a terminal.
    pub had_aircraft: bool,
}

impl StationAirportState {
    pub fn new(
        id: StationId,
        kind: AirportKind,
        tile: TilePos,
        rotation: Direction,
        size: (u8, u8),
        owner: Option<CompanyId>,
    ) -> Self {
        Self {
            id,
            xy: tile,
            tile: Some(tile),
            kind,
            rotation,
            width: size.0,
            height: size.1,
            occupied: BlockMask::EMPTY,
            fullload_restricted: 0,
            terminal_owners: BTreeMap::new(),
            owner,
            allow_shared_use: owner.is_none(),
            closed: false,
            had_aircraft: false,
        }
    }

    pub fn has_airport(&self) -> bool {
        self.tile.is_some()
    }

    /// Company that controls the given terminal (override or station owner).
    pub fn terminal_owner(&self, terminal: TerminalId) -> Option<CompanyId> {
        self.terminal_owners.get(&terminal).copied().or(self.owner)
    }

    /// Ownership ACL for one terminal.
    pub fn may_use_terminal(&self, terminal: TerminalId, company: CompanyId) -> bool {
        match self.terminal_owner(terminal) {
            Some(owner) => owner == company,
            None => self.allow_shared_use,
        }
    }

    /// Whether a company may land here at all: it owns the station, the
    /// station is shared, or it leases at least one terminal.
    pub fn admits_company(&self, company: CompanyId) -> bool {
        match self.owner {
            Some(owner) if owner == company => true,
            Some(_) => self.terminal_owners.values().any(|&c| c == company),
            None => self.allow_shared_use || self.terminal_owners.values().any(|&c| c == company),
        }
    }

    pub fn is_fullload_restricted(&self, terminal: TerminalId) -> bool {
        terminal.0 < 64 && self.fullload_restricted & (1 << terminal.0) != 0
    }

    pub fn set_fullload_restricted(&mut self, terminal: TerminalId, restricted: bool) {
        if terminal.0 >= 64 {
            return;
        }
        if restricted {
            self.fullload_restricted |= 1 << terminal.0;
        } else {
            self.fullload_restricted &= !(1 << terminal.0);
        }
    }
}
