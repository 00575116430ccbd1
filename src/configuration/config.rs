//! Configuration types for loading pendulum scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator and equations-of-motion back-end
//! - [`ParametersConfig`] – gravity, control ranges and speedup bounds
//! - [`BodyConfig`]       – initial state for each arm of the chain
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example double pendulum matching these types:
//!
//! ```yaml
//! engine:
//!   integrator: "rk4"          # or "euler"
//!   equations: "closed_form"   # or "mass_matrix" for longer chains
//!
//! parameters:
//!   g: 200.0                   # gravitational constant
//!   min_mass: 1.0
//!   max_mass: 1000.0
//!   min_length: 10.0
//!   max_length: 250.0
//!   min_speed: 0.0625          # 1/16x
//!   max_speed: 16.0            # 16x
//!   speedup: 1.0
//!
//! bodies:
//!   - mass: 10.0
//!     length: 100.0
//!     theta: 1.2566370614359172   # 0.4 pi
//!   - mass: 5.0
//!     length: 100.0
//!     theta: 2.5132741228718345   # 0.8 pi
//! ```
//!
//! The scenario builder validates this and maps it into a runtime
//! [`Controller`](crate::simulation::controller::Controller).

use serde::Deserialize;

/// Which integrator method used by the engine
/// `integrator: "rk4"` or `integrator: "euler"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[default]
    #[serde(rename = "rk4")] // Classical 4th-order Runge–Kutta, four derivative evaluations per step
    Rk4,

    #[serde(rename = "euler")] // Semi-implicit Euler, one derivative evaluation per step
    Euler,
}

/// Which equations of motion drive the chain
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EquationsConfig {
    #[default]
    #[serde(rename = "closed_form")] // Closed-form single/double pendulum, 1 or 2 bodies only
    ClosedForm,

    #[serde(rename = "mass_matrix")] // Mass-matrix solve, any chain length
    MassMatrix,
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: IntegratorConfig, // Time integrator used for advancing the chain
    #[serde(default)]
    pub equations: EquationsConfig, // Derivative back-end
    pub origin: Option<Vec<f64>>, // Pivot of the first arm in world units, defaults to [0, 0]
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub g: f64,          // gravitational constant
    pub min_mass: f64,   // mass control lower bound
    pub max_mass: f64,   // mass control upper bound
    pub min_length: f64, // length control lower bound
    pub max_length: f64, // length control upper bound
    pub min_speed: f64,  // slowest speedup
    pub max_speed: f64,  // fastest speedup
    #[serde(default = "default_speedup")]
    pub speedup: f64,    // starting speedup
    pub frame_dt: Option<f64>, // frame length for headless runs, defaults to 1/60
}

fn default_speedup() -> f64 {
    1.0
}

/// Configuration for a single arm's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub mass: f64,   // Mass of the bob
    pub length: f64, // Arm length
    pub theta: f64,  // Initial angle from vertical in radians
    #[serde(default)]
    pub omega: f64,  // Initial angular velocity, usually 0
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Integrator and equations selection
    pub parameters: ParametersConfig, // Gravity, control ranges, speed bounds
    pub bodies: Vec<BodyConfig>, // Arms of the chain, innermost first
}
