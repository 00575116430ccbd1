pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, System, NVec2};
pub use simulation::params::Parameters;
pub use simulation::derivatives::{EquationsOfMotion, Rates, SinglePendulum, DoublePendulum, ClosedForm, ChainPendulum};
pub use simulation::integrator::{rk4_integrator, euler_integrator};
pub use simulation::energy::{kinetic_energy, potential_energy, total_energy, energy_drift_percent};
pub use simulation::controller::{Controller, Command, RunState, BodyControls, TickReport, substep_plan};
pub use simulation::engine::Engine;
pub use simulation::scenario::Scenario;

pub use configuration::config::{IntegratorConfig, EquationsConfig, EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use visualization::pendsim_vis2d::run_2d;

pub use benchmark::benchmark::{bench_rk4, bench_chain_curve, bench_drift_curve};
