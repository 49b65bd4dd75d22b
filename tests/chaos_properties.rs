//! End-to-end properties of the analysis pipeline on the classical systems.

use approx::assert_abs_diff_eq;
use chaos_dynamics::*;

// ============================================================================
// Integration accuracy: one short step against a 4th-order Taylor step
// ============================================================================

/// Classical RK4 step: a fourth-order Taylor approximation of the flow.
fn rk4_step(field: &dyn VectorField, t: f64, y: &[f64], h: f64) -> Vec<f64> {
    let add = |y: &[f64], k: &[f64], s: f64| -> Vec<f64> {
        y.iter().zip(k).map(|(a, b)| a + s * b).collect()
    };
    let k1 = field.eval(t, y);
    let k2 = field.eval(t + h / 2.0, &add(y, &k1, h / 2.0));
    let k3 = field.eval(t + h / 2.0, &add(y, &k2, h / 2.0));
    let k4 = field.eval(t + h, &add(y, &k3, h));
    (0..y.len())
        .map(|i| y[i] + h / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]))
        .collect()
}

#[test]
fn lorenz_short_integration_matches_taylor_step() {
    let field = Lorenz::default();
    let y0 = [1.0, 1.0, 1.0];
    let traj = solve_ivp(
        &field,
        (0.0, 0.01),
        &y0,
        &[0.01],
        &IntegratorConfig::default(),
    )
    .unwrap();

    let reference = rk4_step(&field, 0.0, &y0, 0.01);
    for i in 0..3 {
        assert_abs_diff_eq!(traj.states[(i, 0)], reference[i], epsilon = 1e-4);
    }
}

// ============================================================================
// Sensitivity to initial conditions
// ============================================================================

#[test]
fn lorenz_small_perturbation_grows_before_t40() {
    let field = Lorenz::default();
    let config = IntegratorConfig {
        rtol: 1e-6,
        atol: 1e-9,
        ..Default::default()
    };
    let t_eval = linspace(0.0, 40.0, 4000).unwrap();

    let a = solve_ivp(&field, (0.0, 40.0), &[1.0, 1.0, 1.0], &t_eval, &config).unwrap();
    let b = solve_ivp(&field, (0.0, 40.0), &[1.001, 1.0, 1.0], &t_eval, &config).unwrap();

    let delta_x: Vec<f64> = (0..t_eval.len())
        .map(|j| (a.states[(0, j)] - b.states[(0, j)]).abs())
        .collect();

    let early_max = delta_x
        .iter()
        .zip(&t_eval)
        .filter(|(_, &t)| t <= 1.0)
        .map(|(d, _)| *d)
        .fold(0.0_f64, f64::max);
    let late_max = delta_x
        .iter()
        .zip(&t_eval)
        .filter(|(_, &t)| t >= 30.0)
        .map(|(d, _)| *d)
        .fold(0.0_f64, f64::max);

    assert!(early_max < 0.01, "early divergence too large: {early_max}");
    assert!(late_max > 1.0, "no macroscopic divergence by t=40: {late_max}");
    assert!(
        late_max > 100.0 * early_max,
        "divergence did not grow: early {early_max}, late {late_max}"
    );
}

// ============================================================================
// Synchronization: k = 0 reduces to independent runs
// ============================================================================

#[test]
fn uncoupled_pair_reproduces_independent_integrations() {
    let config = IntegratorConfig {
        rtol: 1e-10,
        atol: 1e-12,
        ..Default::default()
    };
    let t_eval = linspace(0.0, 2.0, 100).unwrap();
    let ic_a = [1.0, 1.0, 1.0];
    let ic_b = [1.1, 1.1, 1.1];

    let pair = CoupledPair::new(Lorenz::default(), 0.0).unwrap();
    let y0 = stacked_initial(&ic_a, &ic_b).unwrap();
    let coupled = solve_ivp(&pair, (0.0, 2.0), &y0, &t_eval, &config).unwrap();

    let field = Lorenz::default();
    let solo_a = solve_ivp(&field, (0.0, 2.0), &ic_a, &t_eval, &config).unwrap();
    let solo_b = solve_ivp(&field, (0.0, 2.0), &ic_b, &t_eval, &config).unwrap();

    for j in 0..t_eval.len() {
        for i in 0..3 {
            assert_abs_diff_eq!(
                coupled.states[(i, j)],
                solo_a.states[(i, j)],
                epsilon = 1e-5
            );
            assert_abs_diff_eq!(
                coupled.states[(3 + i, j)],
                solo_b.states[(i, j)],
                epsilon = 1e-5
            );
        }
    }
}

// ============================================================================
// Synchronization: both classical coupling strengths converge
// ============================================================================

#[test]
fn coupled_lorenz_synchronizes_at_both_strengths() {
    let base = Lorenz::default();
    let t_eval = linspace(0.0, 20.0, 2000).unwrap();
    let runs = coupling_sweep(
        &base,
        &[5.0, 1.0],
        &[1.0, 1.0, 1.0],
        &[1.1, 1.1, 1.1],
        (0.0, 20.0),
        &t_eval,
        &IntegratorConfig::default(),
    );

    for run in runs {
        let run = run.unwrap();
        assert!(
            run.lyapunov.exponent < 0.0,
            "k = {} did not synchronize: exponent {}",
            run.k,
            run.lyapunov.exponent
        );
        assert!(run.lyapunov.synchronizes());
    }
}

// ============================================================================
// Full pipeline: attractor -> Poincaré section -> fractal dimension
// ============================================================================

#[test]
fn lorenz_section_has_fractal_structure() {
    let field = Lorenz::default();
    let t_eval = linspace(0.0, 200.0, 100_000).unwrap();
    let traj = solve_ivp(
        &field,
        (0.0, 200.0),
        &[1.0, 1.0, 1.0],
        &t_eval,
        &IntegratorConfig::default(),
    )
    .unwrap();

    // The classical cut: z = 27 ± 0.5
    let section = poincare_section(&traj, 2, 27.0, 0.5).unwrap();
    assert!(
        section.ncols() > 1000,
        "section too sparse: {} points",
        section.ncols()
    );

    // Project onto (x, y) for box counting
    let mut plane = faer::Mat::<f64>::zeros(2, section.ncols());
    for j in 0..section.ncols() {
        plane[(0, j)] = section[(0, j)];
        plane[(1, j)] = section[(1, j)];
    }

    // The section of the ~2.06-dimensional attractor is a bundle of
    // near-1-D arcs in the plane; a finite sample lands around 1.
    let sizes = log_spaced_sizes(-0.5, 0.5, 8).unwrap();
    let profile = box_counts(&plane, &sizes).unwrap();
    let fit = profile.fit_dimension().unwrap();
    assert!(
        fit.dimension > 0.5 && fit.dimension < 2.0,
        "implausible section dimension: {}",
        fit.dimension
    );
}

#[test]
fn henon_lag_plot_dimension_is_between_curve_and_plane() {
    let map = HenonMap::default();
    let traj = iterate_map(&map, 10000).unwrap();
    assert_eq!(traj.len(), 10000);

    let x = traj.component(0);
    let pairs = lag_pairs(&x).unwrap();
    assert_eq!(pairs.ncols(), 9999);

    let sizes = log_spaced_sizes(-2.0, -0.5, 10).unwrap();
    let profile = box_counts(&pairs, &sizes).unwrap();
    let fit = profile.fit_dimension().unwrap();
    assert!(
        fit.dimension > 0.8 && fit.dimension < 1.8,
        "implausible Hénon lag-plot dimension: {}",
        fit.dimension
    );
}

// ============================================================================
// Spectral analysis of a quasi-periodic Lorenz regime
// ============================================================================

#[test]
fn quasi_periodic_lorenz_has_a_clean_spectral_peak() {
    // r = 21.1 sits below the chaotic regime; x(t) settles into
    // near-periodic oscillation with a dominant line in its spectrum.
    let field = Lorenz::new(10.0, 21.1, 8.0 / 3.0).unwrap();
    let dt = 0.01;
    let n = 8000;
    let t_eval: Vec<f64> = (0..n).map(|j| 20.0 + j as f64 * dt).collect();
    let traj = solve_ivp(
        &field,
        (0.0, 100.0),
        &[1.0, 1.0, 1.0],
        &t_eval,
        &IntegratorConfig::default(),
    )
    .unwrap();

    let spectrum = power_spectrum(&traj.component(0), dt).unwrap();
    let peak = spectrum.peak_bin();
    assert!(spectrum.frequencies[peak] > 0.0, "peak stuck at DC");
    assert!(spectrum.amplitudes[peak] > 0.0);
    // The dominant line towers over the high-frequency tail
    let tail_max = spectrum.amplitudes[spectrum.amplitudes.len() / 2..]
        .iter()
        .fold(0.0_f64, |a, &b| a.max(b));
    assert!(
        spectrum.amplitudes[peak] > 10.0 * tail_max,
        "no dominant spectral line: peak {}, tail {}",
        spectrum.amplitudes[peak],
        tail_max
    );
}

// ============================================================================
// Hénon recurrence, end to end
// ============================================================================

#[test]
fn henon_five_points_match_hand_recurrence() {
    let traj = iterate_map(&HenonMap::default(), 5).unwrap();
    assert_eq!(traj.len(), 5);

    // By hand: (0.1, 0.1) -> (1.086, 0.03) -> (-0.6211544, 0.3258)
    assert_abs_diff_eq!(traj.states[(0, 1)], 1.086, epsilon = 1e-12);
    assert_abs_diff_eq!(traj.states[(1, 1)], 0.03, epsilon = 1e-12);
    assert_abs_diff_eq!(traj.states[(0, 2)], -0.621_154_4, epsilon = 1e-7);
    assert_abs_diff_eq!(traj.states[(1, 2)], 0.3258, epsilon = 1e-12);
}
