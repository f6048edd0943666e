#![allow(dead_code)]

use afterburn::{FlightModelConfig, RawInputState, ShipState};

/// Default tuning table used by most scenarios.
pub fn create_test_config() -> FlightModelConfig {
    FlightModelConfig::default()
}

/// Recovery without forced thrust: the stall persists for the whole
/// recovery window, so the full progress ramp is observable.
pub fn create_no_thrust_recovery_config() -> FlightModelConfig {
    let mut config = FlightModelConfig::default();
    config.stabilization.recovery_thrust_floor = 0.0;
    config
}

/// Raw snapshot with only the throttle-up key held.
pub fn throttle_up() -> RawInputState {
    RawInputState {
        throttle_up: true,
        ..RawInputState::default()
    }
}

/// Raw snapshot with only the pitch-up key held.
pub fn pitch_up() -> RawInputState {
    RawInputState {
        pitch_up: true,
        ..RawInputState::default()
    }
}

/// Assert that a ship state is finite and within its unit ranges.
#[track_caller]
pub fn assert_ship_state_valid(state: &ShipState) {
    for (name, value) in [
        ("rotation", &state.rotation),
        ("rotational_velocity", &state.rotational_velocity),
        ("virtual_velocity", &state.virtual_velocity),
    ] {
        assert!(
            value.iter().all(|v| v.is_finite()),
            "{name} contains non-finite values: {value:?}"
        );
    }
    assert!(state.speed.is_finite(), "speed is not finite");
    assert!(
        (0.0..=1.0).contains(&state.engine_power),
        "engine_power out of range: {}",
        state.engine_power
    );
    assert!(
        (0.0..=1.0).contains(&state.afterburner_effect),
        "afterburner_effect out of range: {}",
        state.afterburner_effect
    );
    assert!(
        (0.0..=100.0).contains(&state.fuel_percent),
        "fuel_percent out of range: {}",
        state.fuel_percent
    );
    assert!(state.air_data.aoa.is_finite(), "AOA is not finite");
    assert!(state.air_data.g_force.is_finite(), "g-force is not finite");
}

/// Assert the per-axis angular rate bound.
#[track_caller]
pub fn assert_rates_bounded(state: &ShipState, config: &FlightModelConfig) {
    for i in 0..3 {
        assert!(
            state.rotational_velocity[i].abs() <= config.max_rotation_rate[i] + 1e-12,
            "axis {} rate {} exceeds max {}",
            i,
            state.rotational_velocity[i],
            config.max_rotation_rate[i]
        );
    }
}
