use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::utils::errors::SimError;

/// Afterburner ramp and cooldown tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AfterburnerConfig {
    /// Extra speed at full afterburner (m/s).
    pub speed_boost: f64,
    /// Ramp-up rate (fraction per second).
    pub ramp_up_rate: f64,
    /// Ramp-down rate (fraction per second).
    pub ramp_down_rate: f64,
    /// Lockout after the effect returns to zero (s).
    pub cooldown_secs: f64,
    /// Fuel burn multiplier relative to the base engine burn.
    pub burn_multiplier: f64,
}

impl Default for AfterburnerConfig {
    fn default() -> Self {
        Self {
            speed_boost: 140.0,
            ramp_up_rate: 1.6,
            ramp_down_rate: 2.4,
            cooldown_secs: 3.0,
            burn_multiplier: 6.0,
        }
    }
}

/// Automatic recovery tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizationConfig {
    /// Time for recovery progress to run 0 to 1 (s).
    pub recovery_duration_secs: f64,
    /// Fraction of the recovery during which recovery thrust is applied.
    pub recovery_thrust_window: f64,
    /// Engine power floor while recovery thrust is active (0 to 1).
    pub recovery_thrust_floor: f64,
    /// Gain steering pitch/roll toward level (1/s).
    pub corrective_gain: f64,
    /// Shape of the authority fade: weight = (1 - progress)^exponent.
    pub blend_exponent: f64,
    /// Axis deflection above which the pilot cancels recovery.
    pub manual_override_threshold: f64,
    /// AOA below stall_aoa_threshold * this fraction counts as recovered.
    pub safe_aoa_fraction: f64,
    /// Speed above stall_speed_threshold * this fraction counts as recovered.
    pub safe_speed_fraction: f64,
}

impl Default for StabilizationConfig {
    fn default() -> Self {
        Self {
            recovery_duration_secs: 2.5,
            recovery_thrust_window: 0.4,
            recovery_thrust_floor: 0.85,
            corrective_gain: 2.0,
            blend_exponent: 1.0,
            manual_override_threshold: 0.85,
            safe_aoa_fraction: 0.5,
            safe_speed_fraction: 1.15,
        }
    }
}

/// Camera follow, field-of-view and shake tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Chase distance behind the ship (m).
    pub follow_distance: f64,
    /// Height above the ship (m).
    pub follow_height: f64,
    /// Position smoothing rate (1/s).
    pub position_lag: f64,
    /// Orientation smoothing rate (1/s).
    pub orientation_lag: f64,
    /// Field of view at rest (degrees).
    pub fov_base: f64,
    /// Field of view ceiling (degrees).
    pub fov_max: f64,
    /// FOV added at top speed (degrees).
    pub fov_speed_kick: f64,
    /// FOV added at full afterburner (degrees).
    pub fov_afterburner_kick: f64,
    /// FOV smoothing rate (1/s).
    pub fov_lag: f64,
    /// Shake amplitude injected per weapon-fire event (m).
    pub shake_fire_amplitude: f64,
    /// Load factor above which G shake engages.
    pub shake_g_threshold: f64,
    /// Shake amplitude per g above the threshold (m).
    pub shake_g_amplitude: f64,
    /// Exponential shake decay rate (1/s).
    pub shake_decay: f64,
    /// Seed for the deterministic shake noise.
    pub shake_seed: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            follow_distance: 9.0,
            follow_height: 2.5,
            position_lag: 6.0,
            orientation_lag: 8.0,
            fov_base: 60.0,
            fov_max: 85.0,
            fov_speed_kick: 12.0,
            fov_afterburner_kick: 10.0,
            fov_lag: 4.0,
            shake_fire_amplitude: 0.12,
            shake_g_threshold: 5.0,
            shake_g_amplitude: 0.05,
            shake_decay: 6.0,
            shake_seed: 7,
        }
    }
}

/// The immutable flight-model tuning table. Loaded once at startup and
/// validated there; a bad table is a fatal configuration error, never a
/// mid-simulation one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightModelConfig {
    /// Maximum angular rate per axis: pitch, yaw, roll (rad/s).
    pub max_rotation_rate: Vector3<f64>,
    /// Rate-target acquisition per axis (1/s).
    pub rotation_responsiveness: Vector3<f64>,
    /// Self-centering damping per axis when input is neutral (1/s).
    pub rotation_damping: Vector3<f64>,
    /// Axis input magnitude treated as neutral.
    pub input_deadzone: f64,
    /// Top speed at full engine power without afterburner (m/s).
    pub max_speed: f64,
    /// Engine power lag toward the throttle setting (1/s).
    pub engine_spool_rate: f64,
    /// Throttle lever travel rate at full delta input (fraction/s).
    pub throttle_rate: f64,
    /// Reverse thrust as a fraction of max speed.
    pub reverse_thrust_fraction: f64,
    pub afterburner: AfterburnerConfig,
    /// Fuel burn at full engine power (%/s).
    pub fuel_burn_rate: f64,
    /// Fuel restored per projectile hit (%).
    pub refuel_per_hit: f64,
    /// Loadout ammo capacity.
    pub ammo_capacity: u32,
    /// Downward velocity mixed in at zero speed (m/s).
    pub gravity_sag: f64,
    /// Nose-down pitch-rate bias at zero speed (rad/s²).
    pub nose_drop_rate: f64,
    /// Speed below which the stall condition can arise (m/s).
    pub stall_speed_threshold: f64,
    /// AOA above which the stall condition can arise (rad).
    pub stall_aoa_threshold: f64,
    /// Dwell before a stall observation is confirmed (s).
    pub stall_debounce_secs: f64,
    pub stabilization: StabilizationConfig,
    /// Reference speed of sound for Mach display (m/s).
    pub speed_of_sound: f64,
    /// Load-factor proxy scale: g = 1 + |ω| · |v| · scale.
    pub g_force_scale: f64,
    pub camera: CameraConfig,
}

impl Default for FlightModelConfig {
    fn default() -> Self {
        Self {
            max_rotation_rate: Vector3::new(1.2, 0.6, 2.2),
            rotation_responsiveness: Vector3::new(4.0, 2.5, 6.0),
            rotation_damping: Vector3::new(3.0, 2.0, 4.0),
            input_deadzone: 0.05,
            max_speed: 320.0,
            engine_spool_rate: 2.5,
            throttle_rate: 0.8,
            reverse_thrust_fraction: 0.25,
            afterburner: AfterburnerConfig::default(),
            fuel_burn_rate: 0.35,
            refuel_per_hit: 15.0,
            ammo_capacity: 500,
            gravity_sag: 25.0,
            nose_drop_rate: 0.25,
            stall_speed_threshold: 70.0,
            stall_aoa_threshold: 0.35,
            stall_debounce_secs: 0.35,
            stabilization: StabilizationConfig::default(),
            speed_of_sound: 340.29,
            g_force_scale: 0.017,
            camera: CameraConfig::default(),
        }
    }
}

impl FlightModelConfig {
    /// Load and validate a table from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate a table from YAML. Fields absent from the
    /// document keep their defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, SimError> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tables that would divide by zero or run the simulation
    /// with nonsensical limits. Called once at load time.
    pub fn validate(&self) -> Result<(), SimError> {
        for (axis, rate) in ["pitch", "yaw", "roll"].iter().zip(self.max_rotation_rate.iter()) {
            if *rate <= 0.0 || !rate.is_finite() {
                return Err(SimError::InvalidConfig(format!(
                    "max_rotation_rate.{axis} must be positive, got {rate}"
                )));
            }
        }
        for (axis, rate) in ["pitch", "yaw", "roll"]
            .iter()
            .zip(self.rotation_responsiveness.iter())
        {
            if *rate <= 0.0 || !rate.is_finite() {
                return Err(SimError::InvalidConfig(format!(
                    "rotation_responsiveness.{axis} must be positive, got {rate}"
                )));
            }
        }
        for (axis, rate) in ["pitch", "yaw", "roll"].iter().zip(self.rotation_damping.iter()) {
            if *rate < 0.0 || !rate.is_finite() {
                return Err(SimError::InvalidConfig(format!(
                    "rotation_damping.{axis} must be non-negative, got {rate}"
                )));
            }
        }
        if !(0.0..1.0).contains(&self.input_deadzone) {
            return Err(SimError::InvalidConfig(format!(
                "input_deadzone must be in [0, 1), got {}",
                self.input_deadzone
            )));
        }
        for (name, value) in [
            ("max_speed", self.max_speed),
            ("engine_spool_rate", self.engine_spool_rate),
            ("throttle_rate", self.throttle_rate),
            ("speed_of_sound", self.speed_of_sound),
            ("afterburner.ramp_up_rate", self.afterburner.ramp_up_rate),
            ("afterburner.ramp_down_rate", self.afterburner.ramp_down_rate),
            (
                "stabilization.recovery_duration_secs",
                self.stabilization.recovery_duration_secs,
            ),
            (
                "stabilization.corrective_gain",
                self.stabilization.corrective_gain,
            ),
            (
                "stabilization.blend_exponent",
                self.stabilization.blend_exponent,
            ),
            ("stall_speed_threshold", self.stall_speed_threshold),
            ("stall_aoa_threshold", self.stall_aoa_threshold),
            ("camera.position_lag", self.camera.position_lag),
            ("camera.orientation_lag", self.camera.orientation_lag),
            ("camera.fov_lag", self.camera.fov_lag),
            ("camera.fov_base", self.camera.fov_base),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("reverse_thrust_fraction", self.reverse_thrust_fraction),
            ("afterburner.speed_boost", self.afterburner.speed_boost),
            ("afterburner.cooldown_secs", self.afterburner.cooldown_secs),
            ("afterburner.burn_multiplier", self.afterburner.burn_multiplier),
            ("fuel_burn_rate", self.fuel_burn_rate),
            ("refuel_per_hit", self.refuel_per_hit),
            ("gravity_sag", self.gravity_sag),
            ("nose_drop_rate", self.nose_drop_rate),
            ("stall_debounce_secs", self.stall_debounce_secs),
            ("g_force_scale", self.g_force_scale),
            ("camera.shake_decay", self.camera.shake_decay),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(SimError::InvalidConfig(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.stabilization.recovery_thrust_window)
            || self.stabilization.recovery_thrust_window == 0.0
        {
            return Err(SimError::InvalidConfig(format!(
                "stabilization.recovery_thrust_window must be in (0, 1], got {}",
                self.stabilization.recovery_thrust_window
            )));
        }
        if !(0.0..=1.0).contains(&self.stabilization.recovery_thrust_floor) {
            return Err(SimError::InvalidConfig(format!(
                "stabilization.recovery_thrust_floor must be in [0, 1], got {}",
                self.stabilization.recovery_thrust_floor
            )));
        }
        if self.camera.fov_max < self.camera.fov_base {
            return Err(SimError::InvalidConfig(format!(
                "camera.fov_max ({}) must not be below camera.fov_base ({})",
                self.camera.fov_max, self.camera.fov_base
            )));
        }
        Ok(())
    }
}
