pub const GRAVITY: f64 = 9.80665; // m/s^2

pub const MAX_TIMESTEP: f64 = 0.05; // Maximum physics timestep (s)

// Below this airspeed the velocity direction is undefined; angle of
// attack is 0 by convention.
pub const MIN_AIRSPEED_THRESHOLD: f64 = 1e-6;

// Physical limits
pub const MAX_G_FORCE: f64 = 12.0; // Maximum displayed load factor
pub const MAX_VIRTUAL_SPEED: f64 = 2000.0; // Sanity bound on |virtual_velocity| (m/s)
