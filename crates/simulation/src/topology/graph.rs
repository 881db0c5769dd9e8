use bevy::log::error;
use serde::{Deserialize, Serialize};

use crate::blocks::BlockMask;
use crate::direction::{DiagDirection, Direction};

use super::error::LayoutError;
use super::types::{
    AirportFlags, AirportKind, Heading, MovementState, MovingData, PositionId, SlotSpec,
    TerminalId, TerminalKind, TerminalSpec, WindProfile,
};

/// Raw layout description, as written in the built-in tables or loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDesc {
    pub kind: AirportKind,
    pub slots: Vec<SlotSpec>,
    pub moving_data: Vec<MovingData>,
    pub terminals: Vec<TerminalSpec>,
    /// Plane entry positions indexed by approach quadrant (NE, SE, SW, NW).
    pub entry_points: [PositionId; 4],
    pub heli_entry_points: [PositionId; 4],
    pub flags: AirportFlags,
    /// Footprint in tiles before rotation.
    pub size: (u8, u8),
    /// Height of the helipad surface above the ground, in pixels.
    pub delta_z: i8,
    #[serde(default)]
    pub wind: Option<WindProfile>,
}

#[derive(Debug, Clone)]
struct Slot {
    position: PositionId,
    heading: Heading,
    block: BlockMask,
    next_position: PositionId,
    alternate: Option<usize>,
}

/// An immutable airport routing graph.
///
/// Each position owns a chain of edges stored in a flat arena; the first edge
/// of the chain carries the position's own block, the others are alternates
/// tried in declaration order.
#[derive(Debug, Clone)]
pub struct AirportTopology {
    kind: AirportKind,
    slots: Vec<Slot>,
    heads: Vec<usize>,
    moving_data: Vec<MovingData>,
    terminals: Vec<TerminalSpec>,
    entry_points: [PositionId; 4],
    heli_entry_points: [PositionId; 4],
    flags: AirportFlags,
    size: (u8, u8),
    delta_z: i8,
    wind: Option<WindProfile>,
}

/// Borrowed view of one edge of a topology.
#[derive(Clone, Copy)]
pub struct SlotView<'a> {
    topology: &'a AirportTopology,
    index: usize,
}

impl<'a> SlotView<'a> {
    fn slot(&self) -> &'a Slot {
        &self.topology.slots[self.index]
    }

    pub fn position(&self) -> PositionId {
        self.slot().position
    }

    pub fn heading(&self) -> Heading {
        self.slot().heading
    }

    pub fn block(&self) -> BlockMask {
        self.slot().block
    }

    pub fn next_position(&self) -> PositionId {
        self.slot().next_position
    }

    pub fn is_head(&self) -> bool {
        self.topology.heads[self.position() as usize] == self.index
    }

    pub fn alternate(&self) -> Option<SlotView<'a>> {
        self.slot().alternate.map(|index| SlotView {
            topology: self.topology,
            index,
        })
    }

    pub fn has_alternates(&self) -> bool {
        self.slot().alternate.is_some()
    }

    /// This edge followed by every later alternate of the same position.
    pub fn chain(self) -> impl Iterator<Item = SlotView<'a>> {
        std::iter::successors(Some(self), |s| s.alternate())
    }

    /// Alternates after this edge.
    pub fn alternates(self) -> impl Iterator<Item = SlotView<'a>> {
        self.chain().skip(1)
    }
}

impl PartialEq for SlotView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.topology, other.topology) && self.index == other.index
    }
}

impl std::fmt::Debug for SlotView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotView")
            .field("position", &self.position())
            .field("heading", &self.heading())
            .field("block", &self.block())
            .field("next", &self.next_position())
            .finish()
    }
}

impl AirportTopology {
    /// Lay out the arena from a description.
    ///
    /// Only structural problems are reported here; graph properties are
    /// checked by [`AirportTopology::validate`].
    pub fn from_layout(desc: LayoutDesc) -> Result<AirportTopology, LayoutError> {
        if desc.slots.is_empty() {
            return Err(LayoutError::Empty);
        }

        let mut slots: Vec<Slot> = Vec::with_capacity(desc.slots.len());
        let mut heads: Vec<usize> = Vec::new();
        for spec in &desc.slots {
            match slots.last() {
                Some(prev) if prev.position == spec.position => {
                    let index = slots.len();
                    let last = slots.len() - 1;
                    slots[last].alternate = Some(index);
                }
                _ => {
                    let expected = heads.len();
                    if expected > usize::from(PositionId::MAX) {
                        return Err(LayoutError::TooManyPositions(expected + 1));
                    }
                    if usize::from(spec.position) != expected {
                        return Err(LayoutError::NonContiguous {
                            expected: expected as PositionId,
                            found: spec.position,
                        });
                    }
                    heads.push(slots.len());
                }
            }
            slots.push(Slot {
                position: spec.position,
                heading: spec.heading,
                block: spec.block,
                next_position: spec.next,
                alternate: None,
            });
        }

        if desc.moving_data.len() != heads.len() {
            return Err(LayoutError::MovingDataMismatch {
                positions: heads.len(),
                moving_data: desc.moving_data.len(),
            });
        }

        Ok(AirportTopology {
            kind: desc.kind,
            slots,
            heads,
            moving_data: desc.moving_data,
            terminals: desc.terminals,
            entry_points: desc.entry_points,
            heli_entry_points: desc.heli_entry_points,
            flags: desc.flags,
            size: desc.size,
            delta_z: desc.delta_z,
            wind: desc.wind,
        })
    }

    /// Build and validate one of the compiled-in layouts. A broken built-in
    /// table is a programming error.
    pub(crate) fn builtin(desc: LayoutDesc) -> AirportTopology {
        let kind = desc.kind;
        let built = AirportTopology::from_layout(desc).and_then(|t| {
            t.validate()?;
            Ok(t)
        });
        match built {
            Ok(topology) => topology,
            Err(e) => {
                error!("built-in airport layout {:?} is invalid: {}", kind, e);
                panic!("built-in airport layout {kind:?} is invalid: {e}");
            }
        }
    }

    pub fn kind(&self) -> AirportKind {
        self.kind
    }

    /// Number of distinct positions.
    pub fn nofelements(&self) -> usize {
        self.heads.len()
    }

    /// First edge of a position.
    ///
    /// Panics when the position does not exist; aircraft only ever hold
    /// positions reached through the graph, so this is an invariant violation.
    pub fn slot(&self, position: PositionId) -> SlotView<'_> {
        match self.try_slot(position) {
            Some(view) => view,
            None => {
                error!(
                    "position {} out of range for {:?} airport ({} positions)",
                    position,
                    self.kind,
                    self.nofelements()
                );
                panic!("position {position} out of range for {:?} airport", self.kind);
            }
        }
    }

    pub fn try_slot(&self, position: PositionId) -> Option<SlotView<'_>> {
        self.heads
            .get(usize::from(position))
            .map(|&index| SlotView {
                topology: self,
                index,
            })
    }

    pub fn moving_data(&self, position: PositionId) -> MovingData {
        self.moving_data[usize::from(position)]
    }

    pub fn positions(&self) -> impl Iterator<Item = SlotView<'_>> {
        (0..self.heads.len()).map(move |p| self.slot(p as PositionId))
    }

    pub fn flags(&self) -> AirportFlags {
        self.flags
    }

    pub fn size(&self) -> (u8, u8) {
        self.size
    }

    /// Footprint once rotated; east and west rotations swap the axes.
    pub fn rotated_size(&self, rotation: Direction) -> (u8, u8) {
        if DiagDirection::from_direction(rotation).index() & 1 == 1 {
            (self.size.1, self.size.0)
        } else {
            self.size
        }
    }

    pub fn delta_z(&self) -> i8 {
        self.delta_z
    }

    pub fn wind(&self) -> Option<WindProfile> {
        self.wind
    }

    pub fn entry_point(&self, quadrant: DiagDirection, helicopter: bool) -> PositionId {
        let table = if helicopter {
            &self.heli_entry_points
        } else {
            &self.entry_points
        };
        table[quadrant.index() as usize]
    }

    pub(crate) fn entry_points(&self) -> impl Iterator<Item = (PositionId, bool)> + '_ {
        self.entry_points
            .iter()
            .map(|&p| (p, false))
            .chain(self.heli_entry_points.iter().map(|&p| (p, true)))
    }

    pub fn terminals(&self) -> impl Iterator<Item = (TerminalId, &TerminalSpec)> {
        self.terminals
            .iter()
            .enumerate()
            .map(|(i, t)| (TerminalId(i as u8), t))
    }

    pub fn terminal(&self, id: TerminalId) -> Option<&TerminalSpec> {
        self.terminals.get(usize::from(id.0))
    }

    pub fn terminal_count(&self, kind: TerminalKind) -> usize {
        self.terminals.iter().filter(|t| t.kind == kind).count()
    }

    pub fn num_helipads(&self) -> usize {
        self.terminal_count(TerminalKind::Helipad)
    }

    pub fn group_terminals(&self, group: u8) -> impl Iterator<Item = TerminalId> + '_ {
        self.terminals()
            .filter(move |(_, t)| t.group == group)
            .map(|(id, _)| id)
    }

    /// Position whose first edge marks arrival in the hangar.
    pub fn hangar_position(&self) -> Option<PositionId> {
        self.positions()
            .find(|s| s.heading() == Heading::State(MovementState::InHangar))
            .map(|s| s.position())
    }

    pub fn has_hangar(&self) -> bool {
        self.hangar_position().is_some()
    }
}
