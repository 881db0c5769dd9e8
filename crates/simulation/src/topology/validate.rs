use pathfinding::prelude::bfs_reach;

use super::error::LayoutError;
use super::graph::AirportTopology;
use super::types::{AirportFlags, Heading, MovementState, PositionId};

impl AirportTopology {
    /// Check the graph properties every layout must satisfy: edges and entry
    /// points stay in range, headings name real terminals and groups, and a
    /// landing edge of the right kind is reachable from every entry point.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let count = self.nofelements();

        for head in self.positions() {
            for edge in head.chain() {
                let position = edge.position();
                if usize::from(edge.next_position()) >= count {
                    return Err(LayoutError::NextOutOfRange {
                        position,
                        next: edge.next_position(),
                    });
                }
                match edge.heading() {
                    Heading::State(MovementState::AtTerminal(t)) if self.terminal(t).is_none() => {
                        return Err(LayoutError::UnknownTerminal {
                            position,
                            terminal: t.0,
                        });
                    }
                    Heading::TermGroup(g) if head != edge && self.group_terminals(g).next().is_none() => {
                        return Err(LayoutError::UnknownTermGroup { position, group: g });
                    }
                    _ => {}
                }
            }
        }

        for (entry, _) in self.entry_points() {
            if usize::from(entry) >= count {
                return Err(LayoutError::EntryOutOfRange(entry));
            }
        }

        let flags = self.flags();
        for (entry, heli) in self.entry_points() {
            let wanted = if heli {
                if !flags.contains(AirportFlags::HELICOPTERS) {
                    continue;
                }
                MovementState::HeliLandingApproach
            } else {
                if !flags.contains(AirportFlags::AIRPLANES) {
                    continue;
                }
                MovementState::LandingApproach
            };
            if !self.reaches_heading(entry, Heading::State(wanted)) {
                return Err(LayoutError::LandingUnreachable { entry });
            }
        }

        Ok(())
    }

    fn successors(&self, position: PositionId) -> Vec<PositionId> {
        self.slot(position)
            .chain()
            .filter(|e| !matches!(e.heading(), Heading::TermGroup(_)))
            .map(|e| e.next_position())
            .collect()
    }

    /// Whether an edge with the given heading is reachable from `start`.
    pub(crate) fn reaches_heading(&self, start: PositionId, heading: Heading) -> bool {
        bfs_reach(start, |&p| self.successors(p))
            .any(|p| self.slot(p).chain().any(|e| e.heading() == heading))
    }
}
