use serde::{Deserialize, Serialize};

/// Display-ready instrument values, recomputed from the post-tick state
/// snapshot. Always regenerated whole, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSnapshot {
    /// Indicated speed (m/s); negative while reversing.
    pub speed: f64,
    /// Speed as a multiple of the reference speed of sound.
    pub mach: f64,
    /// Mach at or above 1.0.
    pub supersonic: bool,
    /// Angle of attack (degrees).
    pub aoa_deg: f64,
    /// Load factor (g).
    pub g_force: f64,
    /// Heading from yaw, 0 to 360 degrees.
    pub heading_deg: f64,
    /// Altitude (m), from the collaborator-fed vertical world offset.
    pub altitude: f64,
    /// Remaining fuel (0 to 100).
    pub fuel_percent: f64,
    /// Commanded throttle lever position (0 to 1).
    pub throttle_setting: f64,
    /// Engine response (0 to 1).
    pub engine_power: f64,
    /// Afterburner ramp (0 to 1).
    pub afterburner_effect: f64,
    /// Rounds remaining.
    pub current_ammo: u32,
    /// Loadout capacity, for HUD gauge scaling.
    pub ammo_capacity: u32,
    /// Weapon firing this tick.
    pub is_firing: bool,
    /// Stall condition currently observed.
    pub stall_warning: bool,
    /// Automatic recovery in progress.
    pub is_auto_stabilizing: bool,
    /// Recovery progress (0 to 1); 0 when inactive.
    pub stabilization_progress: f64,
}
