mod camera;
mod controls;
mod instruments;
mod ship;
mod stabilization;

pub use camera::CameraPose;
pub use controls::{ControlInput, RawInputState};
pub use instruments::InstrumentSnapshot;
pub use ship::{AirData, ShipState};
pub use stabilization::{StabilizationMode, StabilizationState};
