//! High-level runtime engine settings
//!
//! Selects the integrator, the equations-of-motion back-end and the pivot
//! origin used when building and running a `Scenario`

use crate::configuration::config::{EquationsConfig, IntegratorConfig};
use crate::simulation::derivatives::{ChainPendulum, ClosedForm, EquationsOfMotion};
use crate::simulation::states::NVec2;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: IntegratorConfig, // rk4 or euler
    pub equations: EquationsConfig, // closed form or mass matrix
    pub origin: NVec2, // pivot of the first arm
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            integrator: IntegratorConfig::Rk4,
            equations: EquationsConfig::ClosedForm,
            origin: NVec2::zeros(),
        }
    }
}

impl Engine {
    /// Build the derivative back-end for gravitational constant `g`
    pub fn equations_of_motion(&self, g: f64) -> Box<dyn EquationsOfMotion + Send + Sync> {
        match self.equations {
            EquationsConfig::ClosedForm => Box::new(ClosedForm { g }),
            EquationsConfig::MassMatrix => Box::new(ChainPendulum { g }),
        }
    }
}
