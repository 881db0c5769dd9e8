mod error;
mod graph;
pub mod layouts;
mod registry;
mod rotation;
mod types;
mod validate;


pub use error::LayoutError;
pub use graph::{AirportTopology, LayoutDesc, SlotView};
pub use registry::AirportRegistry;
pub use rotation::rotate_moving_data;
pub use types::{
    AirportFlags, AirportKind, Heading, MovementState, MovingData, MovingFlags, PositionId,
    SlotSpec, TerminalId, TerminalKind, TerminalSpec, WindProfile,
};
