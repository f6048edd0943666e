use serde::{Deserialize, Serialize};

use crate::utils::errors::SimError;

/// Raw input device snapshot, sampled by the host once per frame.
/// Unmapped keys simply never set a flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInputState {
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub roll_left: bool,
    pub roll_right: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub throttle_up: bool,
    pub throttle_down: bool,
    pub fire: bool,
    pub afterburner: bool,
    pub brake: bool,
}

/// Normalized per-tick control value produced by the control mapper.
/// Has no persistent identity; a fresh value is created every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    /// Roll axis command [-1, 1]
    pub roll: f64,
    /// Pitch axis command [-1, 1]
    pub pitch: f64,
    /// Yaw axis command [-1, 1]
    pub yaw: f64,
    /// Throttle lever rate command [-1, 1]
    pub throttle_delta: f64,
    /// Trigger held this tick
    pub fire_held: bool,
    /// Trigger newly pressed this tick (edge)
    pub fire_pressed: bool,
    /// Afterburner engaged
    pub afterburner: bool,
    /// Brake / reverse thrust engaged
    pub brake: bool,
}

impl Default for ControlInput {
    fn default() -> Self {
        Self::neutral()
    }
}

impl ControlInput {
    pub fn neutral() -> Self {
        Self {
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            throttle_delta: 0.0,
            fire_held: false,
            fire_pressed: false,
            afterburner: false,
            brake: false,
        }
    }

    /// Replace non-finite axes with zero and clamp everything to range.
    /// Invalid input never propagates past this point.
    pub fn sanitized(mut self) -> Self {
        for axis in [
            &mut self.roll,
            &mut self.pitch,
            &mut self.yaw,
            &mut self.throttle_delta,
        ] {
            if !axis.is_finite() {
                *axis = 0.0;
            } else {
                *axis = axis.clamp(-1.0, 1.0);
            }
        }
        self
    }

    /// Largest absolute deflection across the three rotation axes.
    /// Used by the stabilization controller's manual-override check.
    pub fn max_axis_deflection(&self) -> f64 {
        self.roll.abs().max(self.pitch.abs()).max(self.yaw.abs())
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(-1.0..=1.0).contains(&self.roll) {
            return Err(SimError::InvalidControl("roll out of bounds".into()));
        }
        if !(-1.0..=1.0).contains(&self.pitch) {
            return Err(SimError::InvalidControl("pitch out of bounds".into()));
        }
        if !(-1.0..=1.0).contains(&self.yaw) {
            return Err(SimError::InvalidControl("yaw out of bounds".into()));
        }
        if !(-1.0..=1.0).contains(&self.throttle_delta) {
            return Err(SimError::InvalidControl(
                "throttle_delta out of bounds".into(),
            ));
        }
        Ok(())
    }
}
