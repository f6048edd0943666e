pub mod components;
pub mod resources;
pub mod sim;
pub mod systems;
pub mod utils;

pub use components::{
    AirData, CameraPose, ControlInput, InstrumentSnapshot, RawInputState, ShipState,
    StabilizationMode, StabilizationState,
};
pub use resources::FlightModelConfig;
pub use sim::{FlightSim, TickOutput};
pub use utils::SimError;
