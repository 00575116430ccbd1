//! Equations of motion for chained pendulums
//!
//! Every back-end maps the full chain state to the rate of change of each
//! body's `(theta, omega)`. They are pure functions of their inputs: mass and
//! length are read, never written.
//!
//! - [`SinglePendulum`]  one arm, `omega' = -(g / l) sin(theta)`
//! - [`DoublePendulum`]  closed-form Euler–Lagrange solution for two arms
//! - [`ClosedForm`]      picks one of the two above from the chain length
//! - [`ChainPendulum`]   any chain length, solves the mass-matrix system

use nalgebra::{DMatrix, DVector};

use crate::simulation::states::Body;

/// Time derivative of one body's state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rates {
    pub theta_dot: f64,
    pub omega_dot: f64,
}

impl Rates {
    /// Marks a body the back-end cannot evaluate
    pub const NAN: Self = Self { theta_dot: f64::NAN, omega_dot: f64::NAN };
}

/// One NaN entry per body, for chain lengths a closed form does not cover
pub fn unsupported_chain(bodies: &[Body]) -> Vec<Rates> {
    vec![Rates::NAN; bodies.len()]
}

/// Trait for derivative back-ends operating on a chain of [`Body`]
/// Implementations return one [`Rates`] per body, in chain order
pub trait EquationsOfMotion {
    fn rates(&self, bodies: &[Body]) -> Vec<Rates>;
}

// =========================================================================================
// closed-form functions
// =========================================================================================

pub fn theta_dot0(body0: &Body, _body1: &Body) -> f64 {
    body0.omega
}

pub fn theta_dot1(_body0: &Body, body1: &Body) -> f64 {
    body1.omega
}

/// Angular acceleration of the inner arm of a double pendulum
///
/// The denominator `m0 + m1 sin²(t0 - t1)` is only zero for degenerate mass
/// ratios; that case is not guarded and yields a non-finite result.
pub fn omega_dot0(body0: &Body, body1: &Body, g: f64) -> f64 {
    let (m0, m1) = (body0.mass, body1.mass);
    let (l0, l1) = (body0.length, body1.length);
    let (t0, t1) = (body0.theta, body1.theta);
    let (w0, w1) = (body0.omega, body1.omega);

    let delta = t0 - t1;
    let denom = l0 * (m0 + m1 * delta.sin() * delta.sin());

    (m1 * delta.cos() * (l0 * w0 * w0 * (-delta).sin() + g * t1.sin())
        - (m1 * l1 * w1 * w1 * delta.sin() + (m0 + m1) * g * t0.sin()))
        / denom
}

/// Angular acceleration of the outer arm of a double pendulum
pub fn omega_dot1(body0: &Body, body1: &Body, g: f64) -> f64 {
    let (m0, m1) = (body0.mass, body1.mass);
    let (l0, l1) = (body0.length, body1.length);
    let (t0, t1) = (body0.theta, body1.theta);
    let (w0, w1) = (body0.omega, body1.omega);

    let delta = t0 - t1;
    let denom = l1 * (m0 + m1 * delta.sin() * delta.sin());

    (delta.cos() * (m1 * l1 * w1 * w1 * delta.sin() + (m0 + m1) * g * t0.sin())
        - (m0 + m1) * (l0 * w0 * w0 * (-delta).sin() + g * t1.sin()))
        / denom
}

/// Angular acceleration of a lone pendulum
pub fn omega_dot_single(body: &Body, g: f64) -> f64 {
    -(g / body.length) * body.theta.sin()
}

// =========================================================================================
// back-ends
// =========================================================================================

/// One arm swinging about a fixed pivot
#[derive(Debug, Clone, Copy)]
pub struct SinglePendulum {
    pub g: f64,
}

impl EquationsOfMotion for SinglePendulum {
    fn rates(&self, bodies: &[Body]) -> Vec<Rates> {
        let [b] = bodies else {
            return unsupported_chain(bodies);
        };

        vec![Rates {
            theta_dot: b.omega,
            omega_dot: omega_dot_single(b, self.g),
        }]
    }
}

/// Two coupled arms, closed-form solution
#[derive(Debug, Clone, Copy)]
pub struct DoublePendulum {
    pub g: f64,
}

impl EquationsOfMotion for DoublePendulum {
    fn rates(&self, bodies: &[Body]) -> Vec<Rates> {
        let [b0, b1] = bodies else {
            return unsupported_chain(bodies);
        };

        vec![
            Rates {
                theta_dot: theta_dot0(b0, b1),
                omega_dot: omega_dot0(b0, b1, self.g),
            },
            Rates {
                theta_dot: theta_dot1(b0, b1),
                omega_dot: omega_dot1(b0, b1, self.g),
            },
        ]
    }
}

/// Closed-form equations chosen by chain length (1 or 2 bodies)
/// Longer chains get NaN rates; they need [`ChainPendulum`]
#[derive(Debug, Clone, Copy)]
pub struct ClosedForm {
    pub g: f64,
}

impl EquationsOfMotion for ClosedForm {
    fn rates(&self, bodies: &[Body]) -> Vec<Rates> {
        match bodies.len() {
            0 => Vec::new(),
            1 => SinglePendulum { g: self.g }.rates(bodies),
            2 => DoublePendulum { g: self.g }.rates(bodies),
            _ => unsupported_chain(bodies),
        }
    }
}

/// Chain of any length, solved through its mass matrix
///
/// For a chain of `n` arms the Euler–Lagrange equations read
/// `M(theta) * alpha = b(theta, omega)` with
///
/// ```text
/// M_ij = mu_max(i,j) * l_i * l_j * cos(t_i - t_j)
/// b_i  = -sum_j mu_max(i,j) * l_i * l_j * sin(t_i - t_j) * w_j^2
///        - mu_i * g * l_i * sin(t_i)
/// ```
///
/// where `mu_k` is the tail mass, the sum of every mass from arm `k` outwards.
/// A singular mass matrix (zero masses) produces NaN accelerations.
#[derive(Debug, Clone, Copy)]
pub struct ChainPendulum {
    pub g: f64,
}

impl ChainPendulum {
    pub fn mass_matrix(&self, bodies: &[Body]) -> DMatrix<f64> {
        let mu = tail_masses(bodies);
        let n = bodies.len();
        DMatrix::from_fn(n, n, |i, j| {
            let (bi, bj) = (&bodies[i], &bodies[j]);
            mu[i.max(j)] * bi.length * bj.length * (bi.theta - bj.theta).cos()
        })
    }

    /// Centripetal and gravity terms moved to the right-hand side
    pub fn forcing(&self, bodies: &[Body]) -> DVector<f64> {
        let mu = tail_masses(bodies);
        let n = bodies.len();
        DVector::from_fn(n, |i, _| {
            let bi = &bodies[i];
            let centripetal: f64 = bodies
                .iter()
                .enumerate()
                .map(|(j, bj)| {
                    mu[i.max(j)] * bi.length * bj.length
                        * (bi.theta - bj.theta).sin()
                        * bj.omega * bj.omega
                })
                .sum();
            let gravity = mu[i] * self.g * bi.length * bi.theta.sin();
            -centripetal - gravity
        })
    }
}

impl EquationsOfMotion for ChainPendulum {
    fn rates(&self, bodies: &[Body]) -> Vec<Rates> {
        let n = bodies.len();
        if n == 0 {
            return Vec::new();
        }

        let alpha = self
            .mass_matrix(bodies)
            .lu()
            .solve(&self.forcing(bodies))
            .unwrap_or_else(|| DVector::from_element(n, f64::NAN));

        bodies
            .iter()
            .zip(alpha.iter())
            .map(|(b, &a)| Rates {
                theta_dot: b.omega,
                omega_dot: a,
            })
            .collect()
    }
}

/// `mu[k]` = sum of masses from arm `k` to the end of the chain
pub fn tail_masses(bodies: &[Body]) -> Vec<f64> {
    let mut mu = vec![0.0; bodies.len()];
    let mut acc = 0.0;
    for (k, b) in bodies.iter().enumerate().rev() {
        acc += b.mass;
        mu[k] = acc;
    }
    mu
}
