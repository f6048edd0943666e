use serde::{Deserialize, Serialize};

/// Mode of the automatic recovery state machine. Modeled as a single
/// tagged variant so inconsistent flag combinations cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StabilizationMode {
    /// Raw control input has full authority.
    Normal,
    /// Stall condition observed at `since` (sim-clock seconds); must
    /// persist past the debounce window before recovery engages.
    StallDetected { since: f64 },
    /// Corrective torques active. `progress` rises 0 to 1 over the
    /// recovery duration; `recovery_thrust` is set during the initial
    /// portion to regain airspeed.
    AutoStabilizing { progress: f64, recovery_thrust: bool },
}

/// Stabilization status read by the integrator, camera and instruments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StabilizationState {
    pub mode: StabilizationMode,
    /// Stall condition currently observed (HUD warning lamp).
    pub stall_warning: bool,
}

impl Default for StabilizationState {
    fn default() -> Self {
        Self {
            mode: StabilizationMode::Normal,
            stall_warning: false,
        }
    }
}

impl StabilizationState {
    pub fn is_auto_stabilizing(&self) -> bool {
        matches!(self.mode, StabilizationMode::AutoStabilizing { .. })
    }

    pub fn stall_detected(&self) -> bool {
        matches!(self.mode, StabilizationMode::StallDetected { .. })
    }

    /// Recovery progress in [0, 1]; 0 while recovery is not active.
    pub fn progress(&self) -> f64 {
        match self.mode {
            StabilizationMode::AutoStabilizing { progress, .. } => progress,
            _ => 0.0,
        }
    }

    pub fn recovery_thrust_active(&self) -> bool {
        matches!(
            self.mode,
            StabilizationMode::AutoStabilizing {
                recovery_thrust: true,
                ..
            }
        )
    }
}
