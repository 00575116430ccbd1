pub mod states;
pub mod params;
pub mod engine;
pub mod derivatives;
pub mod integrator;
pub mod energy;
pub mod controller;
pub mod scenario;
