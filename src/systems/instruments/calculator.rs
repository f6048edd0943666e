use crate::components::{InstrumentSnapshot, ShipState, StabilizationState};
use crate::resources::FlightModelConfig;
use crate::utils::math::rad_to_deg;

/// Derives the display snapshot from the post-tick state. Pure: reads
/// its inputs, mutates nothing, always regenerates the whole snapshot.
#[derive(Debug, Clone)]
pub struct InstrumentCalculator {
    config: FlightModelConfig,
}

impl InstrumentCalculator {
    pub fn new(config: FlightModelConfig) -> Self {
        Self { config }
    }

    pub fn compute(
        &self,
        ship: &ShipState,
        stabilization: &StabilizationState,
        world_offset_y: f64,
    ) -> InstrumentSnapshot {
        let mach = ship.speed.abs() / self.config.speed_of_sound;
        InstrumentSnapshot {
            speed: ship.speed,
            mach,
            supersonic: mach >= 1.0,
            aoa_deg: rad_to_deg(ship.air_data.aoa),
            g_force: ship.air_data.g_force,
            heading_deg: rad_to_deg(ship.rotation.y).rem_euclid(360.0),
            altitude: world_offset_y,
            fuel_percent: ship.fuel_percent,
            throttle_setting: ship.throttle_setting,
            engine_power: ship.engine_power,
            afterburner_effect: ship.afterburner_effect,
            current_ammo: ship.current_ammo,
            ammo_capacity: ship.ammo_capacity,
            is_firing: ship.is_firing,
            stall_warning: stabilization.stall_warning,
            is_auto_stabilizing: stabilization.is_auto_stabilizing(),
            stabilization_progress: stabilization.progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::StabilizationMode;
    use crate::utils::math::deg_to_rad;
    use approx::assert_relative_eq;

    fn calculator() -> InstrumentCalculator {
        InstrumentCalculator::new(FlightModelConfig::default())
    }

    #[test]
    fn test_heading_wraps_to_compass_range() {
        let calculator = calculator();
        let stab = StabilizationState::default();
        let mut ship = ShipState::default();

        ship.rotation.y = 0.0;
        assert_relative_eq!(calculator.compute(&ship, &stab, 0.0).heading_deg, 0.0);

        ship.rotation.y = deg_to_rad(-90.0);
        assert_relative_eq!(
            calculator.compute(&ship, &stab, 0.0).heading_deg,
            270.0,
            epsilon = 1e-9
        );

        ship.rotation.y = deg_to_rad(180.0);
        assert_relative_eq!(
            calculator.compute(&ship, &stab, 0.0).heading_deg,
            180.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_mach_and_supersonic_flag() {
        let config = FlightModelConfig::default();
        let calculator = calculator();
        let stab = StabilizationState::default();
        let mut ship = ShipState::default();

        ship.speed = config.speed_of_sound / 2.0;
        let snapshot = calculator.compute(&ship, &stab, 0.0);
        assert_relative_eq!(snapshot.mach, 0.5);
        assert!(!snapshot.supersonic);

        // Reverse speed reads as positive Mach
        ship.speed = -config.speed_of_sound * 1.2;
        let snapshot = calculator.compute(&ship, &stab, 0.0);
        assert_relative_eq!(snapshot.mach, 1.2);
        assert!(snapshot.supersonic);
    }

    #[test]
    fn test_stabilization_passthrough() {
        let calculator = calculator();
        let ship = ShipState::default();
        let stab = StabilizationState {
            mode: StabilizationMode::AutoStabilizing {
                progress: 0.4,
                recovery_thrust: true,
            },
            stall_warning: true,
        };

        let snapshot = calculator.compute(&ship, &stab, 120.0);
        assert!(snapshot.is_auto_stabilizing);
        assert!(snapshot.stall_warning);
        assert_relative_eq!(snapshot.stabilization_progress, 0.4);
        assert_relative_eq!(snapshot.altitude, 120.0);
    }

    #[test]
    fn test_compute_does_not_mutate_inputs() {
        let calculator = calculator();
        let ship = ShipState::default();
        let stab = StabilizationState::default();
        let ship_before = ship.clone();
        let stab_before = stab;

        let _ = calculator.compute(&ship, &stab, 0.0);
        assert_eq!(ship, ship_before);
        assert_eq!(stab, stab_before);
    }
}
