use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::math::nose_vector;

/// Derived aerodynamic data for the ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirData {
    /// Angle of attack (α) in radians: angle between the nose and the
    /// velocity vector. 0 by convention at zero airspeed.
    pub aoa: f64,
    /// Turn-induced load factor (g). 1.0 in unaccelerated flight.
    pub g_force: f64,
}

impl Default for AirData {
    fn default() -> Self {
        Self {
            aoa: 0.0,
            g_force: 1.0,
        }
    }
}

/// Represents the overall state of the player ship.
///
/// Owned by the simulation loop; mutated only by the physics integrator,
/// the stabilization controller, and collaborator events routed through
/// `FlightSim`. The world is y-up with the ship flying toward +z at
/// neutral orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipState {
    /// Orientation as pitch (x), yaw (y), roll (z) in radians, each
    /// wrapped to (-π, π].
    pub rotation: Vector3<f64>,
    /// Angular rate per axis (rad/s), bounded by the per-axis max rate.
    pub rotational_velocity: Vector3<f64>,
    /// Stylized velocity vector (m/s). Built from orientation, thrust and
    /// gravity sag each tick, not force-integrated.
    pub virtual_velocity: Vector3<f64>,
    /// Scalar speed (m/s), |virtual_velocity| signed by `is_reverse`.
    pub speed: f64,
    /// Commanded throttle lever position (0.0 to 1.0).
    pub throttle_setting: f64,
    /// Engine response (0.0 to 1.0); lags the throttle setting.
    pub engine_power: f64,
    /// Afterburner ramp (0.0 to 1.0).
    pub afterburner_effect: f64,
    /// Seconds until the afterburner may re-engage after depletion.
    pub afterburner_cooldown: f64,
    /// Remaining fuel (0 to 100).
    pub fuel_percent: f64,
    /// Loadout ammo capacity.
    pub ammo_capacity: u32,
    /// Rounds remaining.
    pub current_ammo: u32,
    /// Weapon firing this tick.
    pub is_firing: bool,
    /// Reverse thrust engaged this tick.
    pub is_reverse: bool,
    /// Derived aerodynamic data.
    pub air_data: AirData,
}

impl Default for ShipState {
    /// Level flight at rest with full fuel and a standard loadout.
    fn default() -> Self {
        Self::new(500)
    }
}

impl ShipState {
    pub fn new(ammo_capacity: u32) -> Self {
        Self {
            rotation: Vector3::zeros(),
            rotational_velocity: Vector3::zeros(),
            virtual_velocity: Vector3::zeros(),
            speed: 0.0,
            throttle_setting: 0.0,
            engine_power: 0.0,
            afterburner_effect: 0.0,
            afterburner_cooldown: 0.0,
            fuel_percent: 100.0,
            ammo_capacity,
            current_ammo: ammo_capacity,
            is_firing: false,
            is_reverse: false,
            air_data: AirData::default(),
        }
    }

    /// Unit vector the nose points along. Roll does not move the nose.
    pub fn nose_vector(&self) -> Vector3<f64> {
        nose_vector(self.rotation.x, self.rotation.y)
    }
}
