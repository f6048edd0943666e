use tracing::debug;

use crate::components::{
    CameraPose, InstrumentSnapshot, RawInputState, ShipState, StabilizationState,
};
use crate::resources::FlightModelConfig;
use crate::systems::camera::CameraPlanner;
use crate::systems::control::ControlMapper;
use crate::systems::instruments::InstrumentCalculator;
use crate::systems::physics::PhysicsIntegrator;
use crate::systems::stabilization::StabilizationController;
use crate::utils::errors::SimError;
use crate::utils::math::sanitize_timestep;

/// Everything a host render loop needs from one tick: the post-tick
/// state snapshot plus both derived outputs, computed from that same
/// snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutput {
    pub ship: ShipState,
    pub stabilization: StabilizationState,
    pub camera: CameraPose,
    pub instruments: InstrumentSnapshot,
}

/// The flight-dynamics core. Owns all simulation state; the host drives
/// it with `tick` once per frame and feeds collaborator events through
/// the `on_*` methods. Collaborators never reach into the state
/// directly, and the core never reaches outward.
///
/// Single-threaded by design: one writer per tick, readers consume the
/// returned snapshots.
#[derive(Debug, Clone)]
pub struct FlightSim {
    config: FlightModelConfig,
    mapper: ControlMapper,
    integrator: PhysicsIntegrator,
    stabilization: StabilizationController,
    camera: CameraPlanner,
    instruments: InstrumentCalculator,
    ship: ShipState,
    sim_time: f64,
    world_offset_y: f64,
}

impl FlightSim {
    /// Validates the constants table once; a bad table is a startup
    /// error, never a mid-simulation one.
    pub fn new(config: FlightModelConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            mapper: ControlMapper::new(),
            integrator: PhysicsIntegrator::new(config.clone()),
            stabilization: StabilizationController::new(config.clone()),
            camera: CameraPlanner::new(config.clone()),
            instruments: InstrumentCalculator::new(config.clone()),
            ship: ShipState::new(config.ammo_capacity),
            sim_time: 0.0,
            world_offset_y: 0.0,
            config,
        })
    }

    pub fn config(&self) -> &FlightModelConfig {
        &self.config
    }

    pub fn ship(&self) -> &ShipState {
        &self.ship
    }

    pub fn stabilization(&self) -> &StabilizationState {
        self.stabilization.state()
    }

    /// Advance the simulation one frame. Components run in the fixed
    /// order mapper → integrator → stabilization → {camera, instruments};
    /// the last two both read the post-integration snapshot.
    pub fn tick(&mut self, raw: &RawInputState, dt: f64) -> TickOutput {
        let dt = sanitize_timestep(dt);
        let input = self.mapper.map(raw);

        self.integrator
            .advance(&mut self.ship, &input, dt, self.stabilization.state());

        self.sim_time += dt;
        self.stabilization
            .update(&self.ship, &input, dt, self.sim_time);

        let camera = self.camera.plan(&self.ship, dt);
        let instruments =
            self.instruments
                .compute(&self.ship, self.stabilization.state(), self.world_offset_y);

        TickOutput {
            ship: self.ship.clone(),
            stabilization: *self.stabilization.state(),
            camera,
            instruments,
        }
    }

    /// Collaborator event: a projectile hit refuels the ship.
    pub fn on_projectile_hit(&mut self) {
        self.ship.fuel_percent =
            (self.ship.fuel_percent + self.config.refuel_per_hit).min(100.0);
    }

    /// Collaborator event: the weapon system fired. Decrements ammo and
    /// marks the ship as firing for the tick this lands on. Returns
    /// whether a round was actually available.
    pub fn on_fire_requested(&mut self) -> bool {
        if self.ship.current_ammo == 0 {
            return false;
        }
        self.ship.current_ammo -= 1;
        self.ship.is_firing = true;
        self.camera.notify_weapon_fired();
        true
    }

    /// Collaborator event: the world scrolled vertically; feeds the
    /// altitude instrument.
    pub fn on_world_offset_changed(&mut self, y: f64) {
        self.world_offset_y = y;
    }

    /// Hard reset to initial values. Atomic from any reader's
    /// perspective: readers only ever see state between ticks.
    pub fn reset(&mut self) {
        debug!("resetting flight state");
        self.ship = ShipState::new(self.config.ammo_capacity);
        self.stabilization.reset();
        self.camera.reset();
        self.mapper.reset();
        self.sim_time = 0.0;
        self.world_offset_y = 0.0;
    }
}
