mod air_data;
mod integrator;

pub use air_data::AirDataCalculation;
pub use integrator::PhysicsIntegrator;
