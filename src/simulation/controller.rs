//! Run/stop state machine and per-frame stepping
//!
//! The [`Controller`] owns the live chain, the speedup factor and the run
//! state. Once per rendered frame the host calls [`Controller::tick`] with the
//! frame duration and whatever [`Command`]s arrived since the previous frame.
//!
//! - `Stopped`: no integration. Each arm is resynced from its normalized
//!   [`BodyControls`], `omega` is reset to zero and the energy baseline is
//!   re-captured.
//! - `Running`: the frame is split into substeps according to
//!   [`substep_plan`] and fed to the configured integrator.

use bevy::prelude::Resource;
use tracing::{debug, warn};

use crate::configuration::config::IntegratorConfig;
use crate::simulation::derivatives::EquationsOfMotion;
use crate::simulation::energy::{energy_drift_percent, total_energy};
use crate::simulation::engine::Engine;
use crate::simulation::params::{Parameters, SPEED_EPSILON};
use crate::simulation::states::{Body, NVec2, System};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Discrete input events consumed by [`Controller::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleRun,
    SpeedUp,
    SlowDown,
}

/// Normalized control positions for one arm, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyControls {
    pub mass: f64,
    pub length: f64,
    pub theta: f64,
}

impl BodyControls {
    pub fn clamped(self) -> Self {
        Self {
            mass: self.mass.clamp(0.0, 1.0),
            length: self.length.clamp(0.0, 1.0),
            theta: self.theta.clamp(0.0, 1.0),
        }
    }

    /// Control positions that reproduce `body` under `params`
    pub fn from_body(body: &Body, params: &Parameters) -> Self {
        Self {
            mass: params.normalize_mass(body.mass),
            length: params.normalize_length(body.length),
            theta: params.normalize_theta(body.theta),
        }
    }
}

/// How one frame is split into integrator calls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub substeps: usize, // integrator calls made this frame
    pub step_dt: f64, // simulated time per call
}

impl TickReport {
    pub const IDLE: Self = Self { substeps: 0, step_dt: 0.0 };

    pub fn simulated_time(&self) -> f64 {
        self.substeps as f64 * self.step_dt
    }
}

/// Substeps for one frame at the given speedup
///
/// At 1x and above each substep covers a whole frame and the speedup sets how
/// many of them run; below 1x a single, shorter step runs instead. The step
/// fed to the integrator therefore never exceeds `frame_dt`.
pub fn substep_plan(speedup: f64, frame_dt: f64) -> TickReport {
    if speedup >= 1.0 - SPEED_EPSILON {
        TickReport {
            substeps: speedup.round() as usize,
            step_dt: frame_dt,
        }
    } else {
        TickReport {
            substeps: 1,
            step_dt: frame_dt * speedup,
        }
    }
}

/// Owner of the live simulation state
#[derive(Resource)]
pub struct Controller {
    engine: Engine,
    parameters: Parameters,
    equations: Box<dyn EquationsOfMotion + Send + Sync>,
    system: System,
    state: RunState,
    speedup: f64,
    controls: Vec<BodyControls>,
    initial_energy: f64,
    non_finite_reported: bool,
}

impl Controller {
    /// Start `Stopped` with controls positioned to reproduce `system`
    pub fn new(engine: Engine, parameters: Parameters, system: System) -> Self {
        let equations = engine.equations_of_motion(parameters.g);
        let controls = system
            .bodies
            .iter()
            .map(|b| BodyControls::from_body(b, &parameters))
            .collect();
        let speedup = parameters.clamp_speed(parameters.speedup);
        let initial_energy = total_energy(&system.bodies, parameters.g);

        Self {
            engine,
            parameters,
            equations,
            system,
            state: RunState::Stopped,
            speedup,
            controls,
            initial_energy,
            non_finite_reported: false,
        }
    }

    /// Advance one rendered frame
    pub fn tick(&mut self, frame_dt: f64, commands: &[Command]) -> TickReport {
        for &command in commands {
            self.apply(command);
        }

        match self.state {
            RunState::Stopped => {
                self.resync_from_controls();
                self.initial_energy = self.energy();
                TickReport::IDLE
            }
            RunState::Running => {
                let plan = substep_plan(self.speedup, frame_dt);
                for _ in 0..plan.substeps {
                    self.step(plan.step_dt);
                }
                self.check_finite();
                plan
            }
        }
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::ToggleRun => {
                self.state = match self.state {
                    RunState::Stopped => RunState::Running,
                    RunState::Running => RunState::Stopped,
                };
                debug!(state = ?self.state, t = self.system.t, "run state toggled");
            }
            Command::SpeedUp => {
                self.speedup = self.parameters.clamp_speed(self.speedup * 2.0);
                debug!(speedup = self.speedup, "speed up");
            }
            Command::SlowDown => {
                self.speedup = self.parameters.clamp_speed(self.speedup * 0.5);
                debug!(speedup = self.speedup, "slow down");
            }
        }
    }

    /// One integrator call of length `dt`, regardless of run state
    pub fn step(&mut self, dt: f64) {
        self.engine.integrator.step(&mut self.system, self.equations.as_ref(), dt);
    }

    /// Move the controls of arm `body`; ignored while running
    /// Returns whether the controls were accepted
    pub fn set_controls(&mut self, body: usize, controls: BodyControls) -> bool {
        if self.state == RunState::Running {
            return false;
        }
        match self.controls.get_mut(body) {
            Some(slot) => {
                *slot = controls.clamped();
                true
            }
            None => false,
        }
    }

    fn resync_from_controls(&mut self) {
        let params = &self.parameters;
        for (body, controls) in self.system.bodies.iter_mut().zip(self.controls.iter()) {
            body.mass = params.lerp_mass(controls.mass);
            body.length = params.lerp_length(controls.length);
            body.theta = params.lerp_theta(controls.theta);
            body.omega = 0.0;
        }
        self.non_finite_reported = false;
    }

    fn check_finite(&mut self) {
        if !self.non_finite_reported && !self.system.is_finite() {
            warn!(t = self.system.t, "pendulum state became non-finite");
            self.non_finite_reported = true;
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn speedup(&self) -> f64 {
        self.speedup
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    pub fn controls(&self) -> &[BodyControls] {
        &self.controls
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn integrator(&self) -> IntegratorConfig {
        self.engine.integrator
    }

    pub fn time(&self) -> f64 {
        self.system.t
    }

    pub fn energy(&self) -> f64 {
        total_energy(&self.system.bodies, self.parameters.g)
    }

    pub fn initial_energy(&self) -> f64 {
        self.initial_energy
    }

    pub fn energy_drift_percent(&self) -> Option<f64> {
        energy_drift_percent(self.initial_energy, self.energy())
    }

    /// Bob positions relative to `origin`
    pub fn positions(&self, origin: NVec2) -> Vec<NVec2> {
        self.system.positions(origin)
    }

    /// Bob positions relative to the configured pivot
    pub fn world_positions(&self) -> Vec<NVec2> {
        self.system.positions(self.engine.origin)
    }
}
