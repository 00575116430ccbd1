use std::time::Instant;

use crate::configuration::config::IntegratorConfig;
use crate::simulation::derivatives::{ChainPendulum, ClosedForm, EquationsOfMotion};
use crate::simulation::energy::total_energy;
use crate::simulation::integrator::rk4_integrator;
use crate::simulation::states::{Body, System};

const G: f64 = 200.0;

/// Helper to build a chain of `n` arms fanned out from rest
fn make_chain(n: usize) -> System {
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            Body::new(10.0 - 0.5 * i_f, 100.0, 0.4 * std::f64::consts::PI * (1.0 + i_f), 0.0)
        })
        .collect();
    System::new(bodies)
}

/// Time one RK4 step for the closed form and the mass-matrix back-end
pub fn bench_rk4() {
    let steps = 100_000;

    let closed = ClosedForm { g: G };
    let chain = ChainPendulum { g: G };

    for (name, equations) in [
        ("closed_form", &closed as &dyn EquationsOfMotion),
        ("mass_matrix", &chain as &dyn EquationsOfMotion),
    ] {
        let mut sys = make_chain(2);

        // Warm up
        rk4_integrator(&mut sys, equations, 1.0 / 60.0);

        let t0 = Instant::now();
        for _ in 0..steps {
            rk4_integrator(&mut sys, equations, 1.0 / 60.0);
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("n = 2, {name:12} rk4 step = {:10.3} ns", per_step * 1.0e9);
    }
}

/// Time one RK4 step of the mass-matrix back-end for growing chains
pub fn bench_chain_curve() {
    println!("n,ns_per_step");

    let chain = ChainPendulum { g: G };
    for n in 1..=16 {
        let steps = 20_000;
        let mut sys = make_chain(n);

        let t0 = Instant::now();
        for _ in 0..steps {
            rk4_integrator(&mut sys, &chain, 1.0 / 60.0);
        }
        let ns = t0.elapsed().as_secs_f64() * 1.0e9 / steps as f64;

        println!("{},{:.3}", n, ns);
    }
}

/// Relative energy drift after 10 simulated seconds against step size
/// Paste output directly into a spreadsheet to graph
pub fn bench_drift_curve() {
    println!("dt,rk4_drift,euler_drift");

    let closed = ClosedForm { g: G };
    let t_end = 10.0;

    for fps in [15.0, 30.0, 60.0, 120.0, 240.0, 480.0] {
        let dt = 1.0 / fps;
        let steps = (t_end * fps) as usize;

        let drift = |method: IntegratorConfig| {
            let mut sys = make_chain(2);
            let e0 = total_energy(&sys.bodies, G);
            for _ in 0..steps {
                method.step(&mut sys, &closed, dt);
            }
            ((total_energy(&sys.bodies, G) - e0) / e0).abs()
        };

        println!(
            "{:.6},{:.3e},{:.3e}",
            dt,
            drift(IntegratorConfig::Rk4),
            drift(IntegratorConfig::Euler)
        );
    }
}
