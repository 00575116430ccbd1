//! Fixed-step time integrators for the pendulum chain
//!
//! Provides the classical 4th-order Runge–Kutta step and a semi-implicit
//! Euler step, both driven by an [`EquationsOfMotion`] back-end. Only
//! `theta`/`omega` evolve; masses and lengths are carried through untouched.

use crate::configuration::config::IntegratorConfig;
use super::derivatives::{EquationsOfMotion, Rates};
use super::states::{Body, System};

/// Advance the system by one step using classical RK4
///
/// Every body advances from the same four stage evaluations, since the
/// chain is coupled. Updates `theta`, `omega` and `sys.t` in-place.
pub fn rk4_integrator(sys: &mut System, equations: &dyn EquationsOfMotion, dt: f64) {
    if sys.bodies.is_empty() { // no bodies, return
        return;
    }

    let half_dt = 0.5 * dt; // half step dt/2, used by stages 2 and 3

    // k1 at the current state
    let k1 = equations.rates(&sys.bodies);

    // k2 at state + dt/2 * k1
    let trial = offset_state(&sys.bodies, &k1, half_dt);
    let k2 = equations.rates(&trial);

    // k3 at state + dt/2 * k2
    let trial = offset_state(&sys.bodies, &k2, half_dt);
    let k3 = equations.rates(&trial);

    // k4 at state + dt * k3
    let trial = offset_state(&sys.bodies, &k3, dt);
    let k4 = equations.rates(&trial);

    // state += dt/6 * (k1 + 2 k2 + 2 k3 + k4)
    let sixth_dt = dt / 6.0;
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        let (r1, r2, r3, r4) = (stage(&k1, i), stage(&k2, i), stage(&k3, i), stage(&k4, i));
        b.theta += sixth_dt * (r1.theta_dot + 2.0 * r2.theta_dot + 2.0 * r3.theta_dot + r4.theta_dot);
        b.omega += sixth_dt * (r1.omega_dot + 2.0 * r2.omega_dot + 2.0 * r3.omega_dot + r4.omega_dot);
    }

    sys.t += dt;
}

/// Advance the system by one step using semi-implicit Euler
///
/// Angles move first with the current angular velocities, then the angular
/// accelerations are taken at the moved angles.
pub fn euler_integrator(sys: &mut System, equations: &dyn EquationsOfMotion, dt: f64) {
    if sys.bodies.is_empty() { // no bodies, return
        return;
    }

    // Drift: theta_n+1 = theta_n + dt * omega_n
    for b in sys.bodies.iter_mut() {
        b.theta += dt * b.omega;
    }

    // Kick: omega_n+1 = omega_n + dt * omega_dot(theta_n+1, omega_n)
    let rates = equations.rates(&sys.bodies);
    for (i, b) in sys.bodies.iter_mut().enumerate() {
        b.omega += dt * stage(&rates, i).omega_dot;
    }

    sys.t += dt;
}

impl IntegratorConfig {
    pub fn name(&self) -> &'static str {
        match self {
            IntegratorConfig::Rk4 => "RK4",
            IntegratorConfig::Euler => "semi-implicit Euler",
        }
    }

    /// Dispatch one step to the configured method
    pub fn step(&self, sys: &mut System, equations: &dyn EquationsOfMotion, dt: f64) {
        match self {
            IntegratorConfig::Rk4 => rk4_integrator(sys, equations, dt),
            IntegratorConfig::Euler => euler_integrator(sys, equations, dt),
        }
    }
}

/// Trial state for an RK stage: same masses and lengths, shifted theta/omega
fn offset_state(bodies: &[Body], rates: &[Rates], h: f64) -> Vec<Body> {
    bodies
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let r = stage(rates, i);
            Body {
                theta: b.theta + h * r.theta_dot,
                omega: b.omega + h * r.omega_dot,
                ..*b
            }
        })
        .collect()
}

// A body the back-end returned no rate for turns non-finite instead of freezing
fn stage(rates: &[Rates], i: usize) -> Rates {
    rates.get(i).copied().unwrap_or(Rates::NAN)
}
