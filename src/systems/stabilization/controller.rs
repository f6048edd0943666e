use tracing::debug;

use crate::components::{ControlInput, ShipState, StabilizationMode, StabilizationState};
use crate::resources::FlightModelConfig;

/// The automatic recovery state machine. Observes the post-integration
/// ship state once per tick and owns all mode transitions; the
/// integrator reads the resulting state to blend corrective torques.
///
/// Timing uses sim-clock seconds (the sum of clamped timesteps), so the
/// debounce and recovery windows are deterministic under test.
#[derive(Debug, Clone)]
pub struct StabilizationController {
    config: FlightModelConfig,
    state: StabilizationState,
}

impl StabilizationController {
    pub fn new(config: FlightModelConfig) -> Self {
        Self {
            config,
            state: StabilizationState::default(),
        }
    }

    pub fn state(&self) -> &StabilizationState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = StabilizationState::default();
    }

    pub fn update(&mut self, ship: &ShipState, input: &ControlInput, dt: f64, now: f64) {
        let aoa = ship.air_data.aoa;
        let speed = ship.speed.abs();
        let stall_condition =
            aoa > self.config.stall_aoa_threshold && speed < self.config.stall_speed_threshold;
        self.state.stall_warning = stall_condition;

        self.state.mode = match self.state.mode {
            StabilizationMode::Normal => {
                if stall_condition {
                    debug!(aoa, speed, "stall condition observed");
                    StabilizationMode::StallDetected { since: now }
                } else {
                    StabilizationMode::Normal
                }
            }
            StabilizationMode::StallDetected { since } => {
                if !stall_condition {
                    debug!("stall condition cleared within the debounce window");
                    StabilizationMode::Normal
                } else if now - since >= self.config.stall_debounce_secs {
                    debug!("stall confirmed, engaging auto-stabilization");
                    StabilizationMode::AutoStabilizing {
                        progress: 0.0,
                        recovery_thrust: true,
                    }
                } else {
                    StabilizationMode::StallDetected { since }
                }
            }
            StabilizationMode::AutoStabilizing { progress, .. } => {
                if input.max_axis_deflection() >= self.config.stabilization.manual_override_threshold
                {
                    debug!(progress, "manual override, pilot regains authority");
                    StabilizationMode::Normal
                } else if self.recovered(aoa, speed) {
                    debug!(progress, "early recovery, returning control");
                    StabilizationMode::Normal
                } else {
                    let progress = (progress
                        + dt / self.config.stabilization.recovery_duration_secs)
                        .min(1.0);
                    if progress >= 1.0 {
                        debug!("recovery window complete");
                        StabilizationMode::Normal
                    } else {
                        StabilizationMode::AutoStabilizing {
                            progress,
                            recovery_thrust: progress
                                < self.config.stabilization.recovery_thrust_window,
                        }
                    }
                }
            }
        };
    }

    /// Both observations back inside their safe margins.
    fn recovered(&self, aoa: f64, speed: f64) -> bool {
        aoa < self.config.stall_aoa_threshold * self.config.stabilization.safe_aoa_fraction
            && speed
                > self.config.stall_speed_threshold * self.config.stabilization.safe_speed_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.016;

    fn controller() -> StabilizationController {
        StabilizationController::new(FlightModelConfig::default())
    }

    /// Ship with the stall condition present (or comfortably absent).
    fn ship(stalled: bool) -> ShipState {
        let config = FlightModelConfig::default();
        let mut state = ShipState::default();
        if stalled {
            state.air_data.aoa = config.stall_aoa_threshold * 1.5;
            state.speed = config.stall_speed_threshold * 0.5;
        } else {
            state.air_data.aoa = 0.02;
            state.speed = config.stall_speed_threshold * 2.0;
        }
        state
    }

    fn run(
        controller: &mut StabilizationController,
        ship_state: &ShipState,
        input: &ControlInput,
        ticks: usize,
        start: f64,
    ) -> f64 {
        let mut now = start;
        for _ in 0..ticks {
            now += DT;
            controller.update(ship_state, input, DT, now);
        }
        now
    }

    #[test]
    fn test_full_stall_recovery_cycle() {
        let config = FlightModelConfig::default();
        let mut controller = controller();
        let input = ControlInput::neutral();

        // Stall condition appears: detection with a timestamp
        let mut now = DT;
        controller.update(&ship(true), &input, DT, now);
        assert!(controller.state().stall_detected());
        assert!(controller.state().stall_warning);

        // Persisting past the debounce engages recovery at progress 0
        let debounce_ticks = (config.stall_debounce_secs / DT) as usize + 2;
        now = run(&mut controller, &ship(true), &input, debounce_ticks, now);
        assert!(controller.state().is_auto_stabilizing());
        assert!(controller.state().recovery_thrust_active());

        // Progress rises monotonically while the stall persists, and the
        // timer expiring drops straight back to Normal
        let mut last_progress = controller.state().progress();
        let tick_cap = (config.stabilization.recovery_duration_secs / DT) as usize + 10;
        for _ in 0..tick_cap {
            now += DT;
            controller.update(&ship(true), &input, DT, now);
            if !controller.state().is_auto_stabilizing() {
                break;
            }
            let progress = controller.state().progress();
            assert!(progress >= last_progress, "progress went backwards");
            last_progress = progress;
        }
        assert_eq!(controller.state().mode, StabilizationMode::Normal);
        assert!(!controller.state().recovery_thrust_active());
        assert!(last_progress > 0.9, "recovery ended well short of the timer");

        // With safe observations it stays in Normal, flags cleared
        run(&mut controller, &ship(false), &input, 10, now);
        assert_eq!(controller.state().mode, StabilizationMode::Normal);
        assert!(!controller.state().stall_warning);
    }

    #[test]
    fn test_transient_spike_does_not_engage() {
        let mut controller = controller();
        let input = ControlInput::neutral();

        // Condition present for less than the debounce window
        let mut now = run(&mut controller, &ship(true), &input, 5, 0.0);
        assert!(controller.state().stall_detected());

        now = run(&mut controller, &ship(false), &input, 1, now);
        assert_eq!(controller.state().mode, StabilizationMode::Normal);

        // And it never reached AutoStabilizing
        run(&mut controller, &ship(false), &input, 60, now);
        assert_eq!(controller.state().mode, StabilizationMode::Normal);
    }

    #[test]
    fn test_recovery_thrust_window_clears() {
        let config = FlightModelConfig::default();
        let mut controller = controller();
        let input = ControlInput::neutral();

        let debounce_ticks = (config.stall_debounce_secs / DT) as usize + 2;
        let now = run(&mut controller, &ship(true), &input, debounce_ticks + 1, 0.0);
        assert!(controller.state().recovery_thrust_active());

        // Step past the thrust window fraction of the recovery
        let window_ticks = (config.stabilization.recovery_thrust_window
            * config.stabilization.recovery_duration_secs
            / DT) as usize
            + 2;
        run(&mut controller, &ship(true), &input, window_ticks, now);
        assert!(controller.state().is_auto_stabilizing());
        assert!(!controller.state().recovery_thrust_active());
    }

    #[test]
    fn test_early_exit_when_safe() {
        let config = FlightModelConfig::default();
        let mut controller = controller();
        let input = ControlInput::neutral();

        let debounce_ticks = (config.stall_debounce_secs / DT) as usize + 2;
        let now = run(&mut controller, &ship(true), &input, debounce_ticks + 1, 0.0);
        assert!(controller.state().is_auto_stabilizing());

        // Safe observations end recovery before the timer does
        controller.update(&ship(false), &input, DT, now + DT);
        assert_eq!(controller.state().mode, StabilizationMode::Normal);
        assert!(!controller.state().stall_warning);
    }

    #[test]
    fn test_manual_override_cancels_recovery() {
        let config = FlightModelConfig::default();
        let mut controller = controller();
        let neutral = ControlInput::neutral();

        let debounce_ticks = (config.stall_debounce_secs / DT) as usize + 2;
        let now = run(&mut controller, &ship(true), &neutral, debounce_ticks + 1, 0.0);
        assert!(controller.state().is_auto_stabilizing());

        // A strong opposing stick must always win, even mid-stall
        let fighting = ControlInput {
            pitch: -(config.stabilization.manual_override_threshold + 0.05),
            ..ControlInput::neutral()
        };
        controller.update(&ship(true), &fighting, DT, now + DT);
        assert_eq!(controller.state().mode, StabilizationMode::Normal);
    }

    #[test]
    fn test_reset_clears_mode() {
        let config = FlightModelConfig::default();
        let mut controller = controller();
        let input = ControlInput::neutral();

        let debounce_ticks = (config.stall_debounce_secs / DT) as usize + 2;
        run(&mut controller, &ship(true), &input, debounce_ticks + 1, 0.0);
        assert!(controller.state().is_auto_stabilizing());

        controller.reset();
        assert_eq!(*controller.state(), StabilizationState::default());
    }
}
