//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the settings that used to be process-wide constants:
//! - gravitational constant `g`,
//! - the mass and arm length ranges the body controls map into,
//! - the speedup bounds and the starting speedup,
//! - the frame length used when running without a window

use std::f64::consts::TAU;

/// Tolerance used when deciding whether speedup counts as "at least 1x"
pub const SPEED_EPSILON: f64 = 1.0e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant, tuned for the look rather than earth gravity
    pub min_mass: f64,
    pub max_mass: f64,
    pub min_length: f64,
    pub max_length: f64,
    pub min_speed: f64, // lower speedup bound
    pub max_speed: f64, // upper speedup bound
    pub speedup: f64, // starting speedup
    pub frame_dt: f64, // headless frame length
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: 200.0,
            min_mass: 1.0,
            max_mass: 1000.0,
            min_length: 10.0,
            max_length: 250.0,
            min_speed: 0.0625,
            max_speed: 16.0,
            speedup: 1.0,
            frame_dt: 1.0 / 60.0,
        }
    }
}

impl Parameters {
    pub fn lerp_mass(&self, t: f64) -> f64 {
        lerp(self.min_mass, self.max_mass, t)
    }

    pub fn lerp_length(&self, t: f64) -> f64 {
        lerp(self.min_length, self.max_length, t)
    }

    pub fn lerp_theta(&self, t: f64) -> f64 {
        TAU * t
    }

    pub fn normalize_mass(&self, mass: f64) -> f64 {
        normalize(mass, self.min_mass, self.max_mass)
    }

    pub fn normalize_length(&self, length: f64) -> f64 {
        normalize(length, self.min_length, self.max_length)
    }

    /// Any angle folds back into one turn before normalizing
    pub fn normalize_theta(&self, theta: f64) -> f64 {
        theta.rem_euclid(TAU) / TAU
    }

    /// Nearest power of two inside the speed bounds
    pub fn clamp_speed(&self, speedup: f64) -> f64 {
        snap_power_of_two(speedup.clamp(self.min_speed, self.max_speed))
    }
}

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + t * (end - start)
}

pub fn normalize(value: f64, start: f64, end: f64) -> f64 {
    ((value - start) / (end - start)).clamp(0.0, 1.0)
}

pub fn is_power_of_two(value: f64) -> bool {
    value > 0.0 && value.is_finite() && value.log2().fract() == 0.0
}

/// Round to the nearest power of two in log space
pub fn snap_power_of_two(value: f64) -> f64 {
    value.log2().round().exp2()
}
