//! Attractor tour: the four classical attractor types, a Poincaré section,
//! and a fractal-dimension estimate, printed as numbers for external
//! plotting.

use chaos_dynamics::{
    box_counts, iterate_map, lag_pairs, linspace, log_spaced_sizes, poincare_section,
    power_spectrum, rho_sweep, solve_ivp, DampedOscillator, HenonMap, IntegratorConfig, Lorenz,
    TorusFlow, VanDerPol, VectorField, DEFAULT_CHAOS_THRESHOLD,
};

fn main() {
    let config = IntegratorConfig::default();

    // Point attractor, limit cycle, torus
    let t_eval = linspace(0.0, 20.0, 1000).unwrap();
    for (field, y0) in [
        (&DampedOscillator::default() as &dyn VectorField, vec![1.0, 0.0]),
        (&VanDerPol::default(), vec![1.0, 0.0]),
    ] {
        let traj = solve_ivp(field, (0.0, 20.0), &y0, &t_eval, &config).unwrap();
        let last = traj.state(traj.len() - 1);
        println!("{}: final state {last:?}", field.name());
    }

    let torus = TorusFlow::default();
    let t_torus = linspace(0.0, 50.0, 1000).unwrap();
    let traj = solve_ivp(&torus, (0.0, 50.0), &[0.0, 0.0, 0.0], &t_torus, &config).unwrap();
    println!("{}: {} samples on the torus", torus.name(), traj.len());

    // Lorenz across the classical r tour
    let rhos = [10.0, 23.74, 28.0, 35.0, 40.0];
    let t_lorenz = linspace(0.0, 50.0, 1000).unwrap();
    let runs = rho_sweep(
        &rhos,
        10.0,
        8.0 / 3.0,
        &[1.0, 1.0, 1.0],
        (0.0, 50.0),
        &t_lorenz,
        &config,
    );
    for (rho, run) in &runs {
        match run {
            Ok(traj) => {
                let x = traj.component(0);
                let x_max = x.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
                println!("lorenz r={rho}: max x = {x_max:.3}");
            }
            Err(e) => println!("lorenz r={rho}: {e}"),
        }
    }

    // Poincaré section of the chaotic attractor at z = 27 ± 0.5
    let field = Lorenz::default();
    let t_dense = linspace(0.0, 100.0, 10000).unwrap();
    let traj = solve_ivp(&field, (0.0, 100.0), &[1.0, 1.0, 1.0], &t_dense, &config).unwrap();
    let section = poincare_section(&traj, 2, 27.0, 0.5).unwrap();
    println!("poincaré section at z=27: {} points", section.ncols());

    let mut plane = faer::Mat::<f64>::zeros(2, section.ncols());
    for j in 0..section.ncols() {
        plane[(0, j)] = section[(0, j)];
        plane[(1, j)] = section[(1, j)];
    }
    let sizes = log_spaced_sizes(-1.0, 0.5, 10).unwrap();
    let fit = box_counts(&plane, &sizes).unwrap().fit_dimension().unwrap();
    println!(
        "lorenz section dimension: {:.3} (chaotic: {})",
        fit.dimension,
        fit.is_chaotic(DEFAULT_CHAOS_THRESHOLD)
    );

    // Hénon lag plot and its dimension
    let henon = iterate_map(&HenonMap::default(), 10000).unwrap();
    let pairs = lag_pairs(&henon.component(0)).unwrap();
    let sizes = log_spaced_sizes(-2.0, -0.5, 10).unwrap();
    let fit = box_counts(&pairs, &sizes).unwrap().fit_dimension().unwrap();
    println!(
        "hénon lag-plot dimension: {:.3} (chaotic: {})",
        fit.dimension,
        fit.is_chaotic(DEFAULT_CHAOS_THRESHOLD)
    );

    // Power spectrum of x(t) in the quasi-periodic regime r = 21.1
    let quasi = Lorenz::new(10.0, 21.1, 8.0 / 3.0).unwrap();
    let dt = 0.01;
    let t_spec: Vec<f64> = (0..8000).map(|j| 20.0 + j as f64 * dt).collect();
    let traj = solve_ivp(&quasi, (0.0, 100.0), &[1.0, 1.0, 1.0], &t_spec, &config).unwrap();
    let spectrum = power_spectrum(&traj.component(0), dt).unwrap();
    println!(
        "r=21.1 spectrum: peak {:.4} at {:.3} Hz",
        spectrum.amplitudes[spectrum.peak_bin()],
        spectrum.peak_frequency()
    );
}
