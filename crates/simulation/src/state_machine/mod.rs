//! The airport state machine.
//!
//! Each evaluation moves an aircraft towards its current position; on
//! arrival the previous position's blocks are released and the aircraft
//! either runs the handler for its state (when the position's first edge is
//! labelled with that state) or reserves and takes the next edge.

mod handlers;
mod moves;


pub(crate) use moves::go_to_next_position;
pub use moves::entry_point;
