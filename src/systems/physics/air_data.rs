use nalgebra::Vector3;

use crate::utils::constants::{MAX_G_FORCE, MIN_AIRSPEED_THRESHOLD};

/// Derived aerodynamic quantities for one tick.
#[derive(Debug, Clone, Copy)]
pub struct AirDataCalculation {
    pub aoa: f64,
    pub g_force: f64,
}

impl AirDataCalculation {
    /// Compute AOA and load factor from the nose direction, the stylized
    /// velocity and the angular rate vector. The load factor derives from
    /// the angular rate itself, never from wrapped-angle deltas, so the
    /// (-π, π] wrap cannot produce a discontinuity here.
    pub fn calculate(
        nose: &Vector3<f64>,
        velocity: &Vector3<f64>,
        angular_velocity: &Vector3<f64>,
        g_force_scale: f64,
    ) -> Self {
        let airspeed = velocity.norm();
        Self {
            aoa: Self::calculate_aoa(nose, velocity, airspeed),
            g_force: Self::calculate_g_force(angular_velocity, airspeed, g_force_scale),
        }
    }

    /// Angle between the nose and the velocity vector. Undefined at zero
    /// airspeed; 0 by convention.
    fn calculate_aoa(nose: &Vector3<f64>, velocity: &Vector3<f64>, airspeed: f64) -> f64 {
        if airspeed > MIN_AIRSPEED_THRESHOLD {
            let cos_aoa = (nose.dot(velocity) / airspeed).clamp(-1.0, 1.0);
            cos_aoa.acos()
        } else {
            0.0
        }
    }

    /// Turn-induced load proxy: 1 g baseline plus angular rate times
    /// airspeed, scaled by the configured factor.
    fn calculate_g_force(angular_velocity: &Vector3<f64>, airspeed: f64, scale: f64) -> f64 {
        (1.0 + angular_velocity.norm() * airspeed * scale).min(MAX_G_FORCE)
    }
}
