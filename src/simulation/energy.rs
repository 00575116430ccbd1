//! Total mechanical energy of a pendulum chain
//!
//! Reporting only; the integrator never reads these values. Potential energy
//! is zero with every arm hanging straight down.

use crate::simulation::derivatives::tail_masses;
use crate::simulation::states::Body;

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    match bodies {
        [] => 0.0,
        [b] => 0.5 * b.mass * b.length * b.length * b.omega * b.omega,
        [b0, b1] => {
            let (m0, m1) = (b0.mass, b1.mass);
            let (l0, l1) = (b0.length, b1.length);
            let (w0, w1) = (b0.omega, b1.omega);
            0.5 * (m0 + m1) * l0 * l0 * w0 * w0
                + 0.5 * m1 * l1 * l1 * w1 * w1
                + m1 * l0 * l1 * w0 * w1 * (b0.theta - b1.theta).cos()
        }
        _ => chain_kinetic_energy(bodies),
    }
}

pub fn potential_energy(bodies: &[Body], g: f64) -> f64 {
    match bodies {
        [] => 0.0,
        [b] => b.mass * g * b.length * (1.0 - b.theta.cos()),
        [b0, b1] => {
            (b0.mass + b1.mass) * g * b0.length * (1.0 - b0.theta.cos())
                + b1.mass * g * b1.length * (1.0 - b1.theta.cos())
        }
        _ => chain_potential_energy(bodies, g),
    }
}

pub fn total_energy(bodies: &[Body], g: f64) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, g)
}

/// `1/2 sum_i sum_j mu_max(i,j) l_i l_j w_i w_j cos(t_i - t_j)`
pub fn chain_kinetic_energy(bodies: &[Body]) -> f64 {
    let mu = tail_masses(bodies);
    let mut ke = 0.0;
    for (i, bi) in bodies.iter().enumerate() {
        for (j, bj) in bodies.iter().enumerate() {
            ke += mu[i.max(j)] * bi.length * bj.length * bi.omega * bj.omega
                * (bi.theta - bj.theta).cos();
        }
    }
    0.5 * ke
}

/// `sum_i mu_i g l_i (1 - cos t_i)`
pub fn chain_potential_energy(bodies: &[Body], g: f64) -> f64 {
    let mu = tail_masses(bodies);
    bodies
        .iter()
        .zip(mu.iter())
        .map(|(b, m)| m * g * b.length * (1.0 - b.theta.cos()))
        .sum()
}

/// Percentage change of `current` relative to `initial`
/// `None` when the baseline is zero (every arm at rest, hanging down)
pub fn energy_drift_percent(initial: f64, current: f64) -> Option<f64> {
    if initial.abs() <= f64::EPSILON {
        return None;
    }
    Some(100.0 * (current - initial) / initial)
}
