//! Build fully-initialized pendulum scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! (`Scenario`) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - chain state (`System` with every arm at t = 0)
//!
//! The bundle is turned into a [`Controller`], which is what the viewer
//! inserts into Bevy as a `Resource` and the headless runner drives directly

use anyhow::{bail, ensure, Result};
use tracing::{info, warn};

use crate::configuration::config::{BodyConfig, EquationsConfig, ScenarioConfig};
use crate::simulation::controller::Controller;
use crate::simulation::engine::Engine;
use crate::simulation::params::{is_power_of_two, Parameters};
use crate::simulation::states::{Body, NVec2, System};

/// Validated runtime scenario
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        ensure!(p_cfg.g.is_finite(), "g must be finite, got {}", p_cfg.g);
        ensure!(
            p_cfg.min_mass > 0.0 && p_cfg.min_mass < p_cfg.max_mass,
            "mass range must satisfy 0 < min_mass < max_mass, got [{}, {}]",
            p_cfg.min_mass,
            p_cfg.max_mass
        );
        ensure!(
            p_cfg.min_length > 0.0 && p_cfg.min_length < p_cfg.max_length,
            "length range must satisfy 0 < min_length < max_length, got [{}, {}]",
            p_cfg.min_length,
            p_cfg.max_length
        );
        ensure!(
            p_cfg.min_speed > 0.0 && p_cfg.min_speed <= p_cfg.max_speed,
            "speed range must satisfy 0 < min_speed <= max_speed, got [{}, {}]",
            p_cfg.min_speed,
            p_cfg.max_speed
        );
        for (name, value) in [
            ("min_speed", p_cfg.min_speed),
            ("max_speed", p_cfg.max_speed),
            ("speedup", p_cfg.speedup),
        ] {
            ensure!(is_power_of_two(value), "{name} must be a power of two, got {value}");
        }

        let frame_dt = p_cfg.frame_dt.unwrap_or(1.0 / 60.0);
        ensure!(frame_dt > 0.0, "frame_dt must be positive, got {}", frame_dt);

        let mut parameters = Parameters {
            g: p_cfg.g,
            min_mass: p_cfg.min_mass,
            max_mass: p_cfg.max_mass,
            min_length: p_cfg.min_length,
            max_length: p_cfg.max_length,
            min_speed: p_cfg.min_speed,
            max_speed: p_cfg.max_speed,
            speedup: p_cfg.speedup,
            frame_dt,
        };
        let speedup = parameters.clamp_speed(parameters.speedup);
        if speedup != parameters.speedup {
            warn!(requested = parameters.speedup, used = speedup, "speedup clamped into range");
            parameters.speedup = speedup;
        }

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let origin = match e_cfg.origin.as_deref() {
            None => NVec2::zeros(),
            Some([x, y]) => NVec2::new(*x, *y),
            Some(other) => bail!("origin needs two coordinates, got {}", other.len()),
        };
        let engine = Engine {
            integrator: e_cfg.integrator,
            equations: e_cfg.equations,
            origin,
        };

        // Bodies: map `BodyConfig` -> runtime `Body`, clamped into the control ranges
        ensure!(!cfg.bodies.is_empty(), "scenario needs at least one body");
        if engine.equations == EquationsConfig::ClosedForm {
            ensure!(
                cfg.bodies.len() <= 2,
                "closed_form equations handle 1 or 2 bodies, got {}; use mass_matrix for longer chains",
                cfg.bodies.len()
            );
        }
        let bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| build_body(i, bc, &parameters))
            .collect::<Result<Vec<Body>>>()?;

        info!(
            bodies = bodies.len(),
            integrator = ?engine.integrator,
            equations = ?engine.equations,
            g = parameters.g,
            "scenario built"
        );

        Ok(Self {
            engine,
            parameters,
            system: System::new(bodies),
        })
    }

    pub fn into_controller(self) -> Controller {
        Controller::new(self.engine, self.parameters, self.system)
    }
}

fn build_body(index: usize, bc: &BodyConfig, params: &Parameters) -> Result<Body> {
    ensure!(
        [bc.mass, bc.length, bc.theta, bc.omega].iter().all(|v| v.is_finite()),
        "body {index}: mass, length, theta and omega must be finite"
    );

    let mass = bc.mass.clamp(params.min_mass, params.max_mass);
    let length = bc.length.clamp(params.min_length, params.max_length);
    if mass != bc.mass || length != bc.length {
        warn!(
            body = index,
            mass = bc.mass,
            length = bc.length,
            "body mass/length clamped into configured range"
        );
    }

    Ok(Body::new(mass, length, bc.theta, bc.omega))
}
