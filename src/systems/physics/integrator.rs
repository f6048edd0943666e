use nalgebra::Vector3;
use tracing::warn;

use crate::components::{AirData, ControlInput, ShipState, StabilizationState};
use crate::resources::FlightModelConfig;
use crate::systems::physics::AirDataCalculation;
use crate::utils::constants::MAX_VIRTUAL_SPEED;
use crate::utils::math::{sanitize_timestep, wrap_angle};

/// Advances `ShipState` one tick from control input and the current
/// stabilization status. The caller clamps `dt`; this system clamps
/// again before any term uses it.
#[derive(Debug, Clone)]
pub struct PhysicsIntegrator {
    config: FlightModelConfig,
}

impl PhysicsIntegrator {
    pub fn new(config: FlightModelConfig) -> Self {
        Self { config }
    }

    pub fn advance(
        &self,
        state: &mut ShipState,
        input: &ControlInput,
        dt: f64,
        stabilization: &StabilizationState,
    ) {
        let dt = sanitize_timestep(dt);
        let input = input.sanitized();

        state.is_reverse = input.brake;
        state.is_firing = input.fire_held && state.current_ammo > 0;

        self.update_rotational_velocity(state, &input, dt, stabilization);
        self.integrate_rotation(state, dt);
        self.update_engine(state, &input, dt, stabilization);
        self.update_afterburner(state, &input, dt);
        self.burn_fuel(state, dt);
        self.update_velocity(state);
        self.update_air_data(state);
        self.clamp_to_bounds(state);
    }

    /// Axis commands in rotation order: pitch (x), yaw (y), roll (z).
    fn axis_command(&self, input: &ControlInput) -> Vector3<f64> {
        let mut command = Vector3::new(input.pitch, input.yaw, input.roll);
        for axis in command.iter_mut() {
            if axis.abs() < self.config.input_deadzone {
                *axis = 0.0;
            }
        }
        command
    }

    /// Move each axis rate toward `command * max_rate` at the axis
    /// responsiveness, or damp it toward zero when the axis is neutral
    /// (stick self-centering). While auto-stabilizing, the input-driven
    /// target is confidence-blended with a corrective target steering
    /// pitch and roll to level; the blend weight fades with recovery
    /// progress so control never snaps back at the transition.
    fn update_rotational_velocity(
        &self,
        state: &mut ShipState,
        input: &ControlInput,
        dt: f64,
        stabilization: &StabilizationState,
    ) {
        let command = self.axis_command(input);
        let authority = if stabilization.is_auto_stabilizing() {
            (1.0 - stabilization.progress())
                .clamp(0.0, 1.0)
                .powf(self.config.stabilization.blend_exponent)
        } else {
            0.0
        };

        for i in 0..3 {
            let max_rate = self.config.max_rotation_rate[i];
            let raw_target = command[i] * max_rate;
            let target = if authority > 0.0 {
                // Yaw stays with the pilot; level flight is a pitch/roll goal.
                let corrective = if i == 1 {
                    0.0
                } else {
                    (-state.rotation[i] * self.config.stabilization.corrective_gain)
                        .clamp(-max_rate, max_rate)
                };
                corrective * authority + raw_target * (1.0 - authority)
            } else {
                raw_target
            };

            let velocity = &mut state.rotational_velocity[i];
            if command[i] != 0.0 || authority > 0.0 {
                *velocity += (target - *velocity) * self.config.rotation_responsiveness[i] * dt;
            } else {
                *velocity *= (-self.config.rotation_damping[i] * dt).exp();
            }
        }

        // Stall tendency: the nose sags when slow.
        let low_speed = 1.0 - (state.speed.abs() / self.config.stall_speed_threshold).min(1.0);
        state.rotational_velocity.x -= self.config.nose_drop_rate * low_speed * dt;

        for i in 0..3 {
            let max_rate = self.config.max_rotation_rate[i];
            state.rotational_velocity[i] = state.rotational_velocity[i].clamp(-max_rate, max_rate);
        }
    }

    fn integrate_rotation(&self, state: &mut ShipState, dt: f64) {
        for i in 0..3 {
            state.rotation[i] = wrap_angle(state.rotation[i] + state.rotational_velocity[i] * dt);
        }
    }

    /// Throttle lever travel plus engine spool lag. Recovery thrust puts
    /// a floor under the spool target; an empty tank pulls it to zero.
    fn update_engine(
        &self,
        state: &mut ShipState,
        input: &ControlInput,
        dt: f64,
        stabilization: &StabilizationState,
    ) {
        state.throttle_setting = (state.throttle_setting
            + input.throttle_delta * self.config.throttle_rate * dt)
            .clamp(0.0, 1.0);

        let mut target = state.throttle_setting;
        if stabilization.recovery_thrust_active() {
            target = target.max(self.config.stabilization.recovery_thrust_floor);
        }
        if state.fuel_percent <= 0.0 {
            target = 0.0;
        }

        state.engine_power = (state.engine_power
            + (target - state.engine_power) * self.config.engine_spool_rate * dt)
            .clamp(0.0, 1.0);
    }

    /// Ramp the afterburner toward 1 while engaged and allowed, toward 0
    /// otherwise. Depletion (the effect returning to zero after having
    /// been active) starts the cooldown, which blocks re-engagement.
    fn update_afterburner(&self, state: &mut ShipState, input: &ControlInput, dt: f64) {
        state.afterburner_cooldown = (state.afterburner_cooldown - dt).max(0.0);

        let was_active = state.afterburner_effect > 0.0;
        let engaged =
            input.afterburner && state.fuel_percent > 0.0 && state.afterburner_cooldown <= 0.0;

        if engaged {
            state.afterburner_effect =
                (state.afterburner_effect + self.config.afterburner.ramp_up_rate * dt).min(1.0);
        } else {
            state.afterburner_effect =
                (state.afterburner_effect - self.config.afterburner.ramp_down_rate * dt).max(0.0);
        }
        if state.fuel_percent <= 0.0 {
            state.afterburner_effect = 0.0;
        }

        if was_active && state.afterburner_effect == 0.0 {
            state.afterburner_cooldown = self.config.afterburner.cooldown_secs;
        }
    }

    fn burn_fuel(&self, state: &mut ShipState, dt: f64) {
        let burn = (state.engine_power
            + state.afterburner_effect * self.config.afterburner.burn_multiplier)
            * self.config.fuel_burn_rate
            * dt;
        state.fuel_percent = (state.fuel_percent - burn).max(0.0);
    }

    /// Rebuild the stylized velocity: thrust along the nose plus a
    /// gravity sag that grows as speed decays below the stall threshold.
    /// Speed is a pure function of this vector, never set directly.
    fn update_velocity(&self, state: &mut ShipState) {
        let nose = state.nose_vector();
        let thrust_speed = if state.is_reverse {
            -(self.config.max_speed * self.config.reverse_thrust_fraction * state.engine_power)
        } else {
            self.config.max_speed * state.engine_power
                + self.config.afterburner.speed_boost * state.afterburner_effect
        };
        let sag = self.config.gravity_sag
            * (1.0 - (state.speed.abs() / self.config.stall_speed_threshold).min(1.0));

        state.virtual_velocity = nose * thrust_speed - Vector3::new(0.0, sag, 0.0);

        let sign = if state.is_reverse { -1.0 } else { 1.0 };
        state.speed = state.virtual_velocity.norm() * sign;
    }

    fn update_air_data(&self, state: &mut ShipState) {
        let nose = state.nose_vector();
        let calc = AirDataCalculation::calculate(
            &nose,
            &state.virtual_velocity,
            &state.rotational_velocity,
            self.config.g_force_scale,
        );
        state.air_data = AirData {
            aoa: calc.aoa,
            g_force: calc.g_force,
        };
    }

    /// Guard against numeric blow-up: anything non-finite or outside
    /// sane bounds is clamped back so NaN never reaches the camera or
    /// HUD outputs.
    fn clamp_to_bounds(&self, state: &mut ShipState) {
        if !state.rotation.iter().all(|v| v.is_finite()) {
            warn!("rotation became non-finite, resetting to level");
            state.rotation = Vector3::zeros();
        }
        if !state.rotational_velocity.iter().all(|v| v.is_finite()) {
            warn!("rotational velocity became non-finite, resetting");
            state.rotational_velocity = Vector3::zeros();
        }
        if !state.virtual_velocity.iter().all(|v| v.is_finite()) {
            warn!("velocity became non-finite, resetting");
            state.virtual_velocity = Vector3::zeros();
            state.speed = 0.0;
        }

        let speed = state.virtual_velocity.norm();
        if speed > MAX_VIRTUAL_SPEED {
            state.virtual_velocity *= MAX_VIRTUAL_SPEED / speed;
            state.speed = state.speed.clamp(-MAX_VIRTUAL_SPEED, MAX_VIRTUAL_SPEED);
        }

        for value in [
            &mut state.throttle_setting,
            &mut state.engine_power,
            &mut state.afterburner_effect,
        ] {
            if !value.is_finite() {
                *value = 0.0;
            }
        }
        state.fuel_percent = state.fuel_percent.clamp(0.0, 100.0);
    }
}
