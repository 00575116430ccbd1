//! Core state types for the pendulum simulation.
//!
//! - `Body`   one rigid arm with a bob at its end
//! - `System` the ordered chain of bodies plus the simulated time `t`
//!
//! Body `i` pivots about the bob of body `i - 1`; body 0 pivots about a fixed
//! origin. Angles are measured from the downward vertical, so in screen space
//! (y pointing down) an arm at `theta = 0` hangs straight down.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub mass: f64, // kilograms
    pub length: f64, // arm length from the pivot
    pub theta: f64, // angle from vertical, radians
    pub omega: f64, // angular velocity, radians per second
}

impl Body {
    pub fn new(mass: f64, length: f64, theta: f64, omega: f64) -> Self {
        Self { mass, length, theta, omega }
    }

    /// Bob position relative to this body's own pivot
    pub fn offset(&self) -> NVec2 {
        NVec2::new(self.theta.sin(), self.theta.cos()) * self.length
    }

    pub fn is_finite(&self) -> bool {
        self.theta.is_finite() && self.omega.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub bodies: Vec<Body>, // chain, innermost first
    pub t: f64, // simulated time
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    /// Absolute bob positions, walking the chain outwards from `origin`
    pub fn positions(&self, origin: NVec2) -> Vec<NVec2> {
        let mut pivot = origin;
        self.bodies
            .iter()
            .map(|b| {
                pivot += b.offset();
                pivot
            })
            .collect()
    }

    pub fn is_finite(&self) -> bool {
        self.bodies.iter().all(Body::is_finite)
    }
}
