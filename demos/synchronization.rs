//! Chaotic synchronization of two coupled Lorenz systems at the two
//! classical coupling strengths.

use chaos_dynamics::{coupling_sweep, linspace, IntegratorConfig, Lorenz};

fn main() {
    let base = Lorenz::default();
    let t_eval = linspace(0.0, 100.0, 10000).unwrap();

    let runs = coupling_sweep(
        &base,
        &[5.0, 1.0],
        &[1.0, 1.0, 1.0],
        &[1.1, 1.1, 1.1],
        (0.0, 100.0),
        &t_eval,
        &IntegratorConfig::default(),
    );

    for run in runs {
        match run {
            Ok(run) => {
                println!(
                    "k = {}: conditional Lyapunov exponent = {:.4} -> {}",
                    run.k,
                    run.lyapunov.exponent,
                    if run.lyapunov.synchronizes() {
                        "synchronizes"
                    } else {
                        "does not synchronize"
                    }
                );
                // First few log-divergence samples for external plotting
                let head: Vec<f64> = run
                    .lyapunov
                    .log_divergence
                    .iter()
                    .take(5)
                    .copied()
                    .collect();
                println!("  log|Δx| head: {head:?}");
            }
            Err(e) => println!("run failed: {e}"),
        }
    }
}
